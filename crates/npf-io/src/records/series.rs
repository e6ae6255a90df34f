use npf_core::{
    ControlledSeriesCapacitor, Line, LineRef, LineShunt, NetworkFile, NpfResult, Resolver,
    SectionKind, ThreeWindingTransformer, Transformer, TransformerRef,
};

use super::{bus_label, dangling, optional_bus_label, transformer_label};
use crate::field::FieldSpec;
use crate::record::{RecordCodec, RecordReader, RecordWriter};

/// Endpoints, circuit and name of a referenced line.
fn line_label(file: &NetworkFile, handle: LineRef) -> (i64, i64, i64, &str) {
    match file.line(handle) {
        Some(line) => {
            let (from, _) = bus_label(file, line.from_bus);
            let (to, _) = bus_label(file, line.to_bus);
            (from, to, line.parallel_circuit, line.name.as_str())
        }
        None => {
            dangling(SectionKind::Line, handle.index());
            (0, 0, 0, "")
        }
    }
}

impl RecordCodec for Line {
    const COMMENT: &'static str = "# FromBus#,ToBus#,ParallelCirc#,Op,MetEnd,R%,X%,MVAr,\
                                   NorRating,EmgRating,PF,Cost,\"[..Date..]\",\"Cnd\",Serie#,\
                                   Type,\"[...Name...]\",Env,LengthKm,Stt,\
                                   \"[....Extended Name.....]\"";
    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::int("FromBus#", 6),
        FieldSpec::int("ToBus#", 6),
        FieldSpec::int("ParallelCirc#", 3),
        FieldSpec::code("Op", 1),
        FieldSpec::code("MetEnd", 1),
        FieldSpec::float("R%", 8, 3),
        FieldSpec::float("X%", 8, 3),
        FieldSpec::float("MVAr", 8, 3),
        FieldSpec::float("NorRating", 8, 3),
        FieldSpec::float("EmgRating", 8, 3),
        FieldSpec::float("PF", 8, 3),
        FieldSpec::float("Cost", 8, 3).or_float(0.0),
        FieldSpec::text("Date", 10),
        FieldSpec::code("Cnd", 1),
        FieldSpec::int("Serie#", 6),
        FieldSpec::int("Type", 1),
        FieldSpec::text("Name", 12),
        FieldSpec::int("Env", 1),
        FieldSpec::float("LengthKm", 8, 3).or_float(1.0),
        FieldSpec::int("Stt", 1),
        FieldSpec::text("ExtendedName", 12),
    ];

    fn encode(&self, file: &NetworkFile, out: &mut RecordWriter) {
        let (from, _) = bus_label(file, self.from_bus);
        let (to, _) = bus_label(file, self.to_bus);
        out.int(from)
            .int(to)
            .int(self.parallel_circuit)
            .code(self.op)
            .code(self.metering_end)
            .float(self.r_pct)
            .float(self.x_pct)
            .float(self.mvar)
            .float(self.normal_rating)
            .float(self.emergency_rating)
            .float(self.power_factor)
            .float(self.cost)
            .text(&self.date)
            .code(self.condition)
            .int(self.number)
            .int(self.line_type)
            .text(&self.name)
            .int(self.env_factor)
            .float(self.length_km)
            .int(self.status)
            .text(&self.extended_name);
    }

    fn decode(input: &mut RecordReader<'_>, resolver: &Resolver<'_>) -> NpfResult<Self> {
        let from_number = input.int()?;
        let to_number = input.int()?;
        let from_bus = input.resolved(resolver.bus(from_number))?;
        let to_bus = input.resolved(resolver.bus(to_number))?;
        Ok(Line {
            from_bus,
            to_bus,
            parallel_circuit: input.int()?,
            op: input.code()?,
            metering_end: input.code()?,
            r_pct: input.float()?,
            x_pct: input.float()?,
            mvar: input.float()?,
            normal_rating: input.float()?,
            emergency_rating: input.float()?,
            power_factor: input.float()?,
            cost: input.float()?,
            date: input.text()?,
            condition: input.code()?,
            number: input.int()?,
            line_type: input.int()?,
            name: input.text()?,
            env_factor: input.int()?,
            length_km: input.float()?,
            status: input.int()?,
            extended_name: input.text()?,
        })
    }
}

impl RecordCodec for LineShunt {
    const COMMENT: &'static str = "# Shunt#,\"[...Name...]\",\"Op\",FromBus#,ToBus#,\
                                   ParallelCirc#,MVAr,Term,Cost,\"[..Date..]\",\"Cnd\",Stt,\
                                   \"[.LineName.]\"";
    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::int("Shunt#", 6),
        FieldSpec::text("Name", 12),
        FieldSpec::code("Op", 1),
        FieldSpec::int("FromBus#", 6),
        FieldSpec::int("ToBus#", 6),
        FieldSpec::int("ParallelCirc#", 2),
        FieldSpec::float("MVAr", 8, 3),
        FieldSpec::code("Term", 1),
        FieldSpec::float("Cost", 8, 3).or_float(0.0),
        FieldSpec::text("Date", 10),
        FieldSpec::code("Cnd", 1),
        FieldSpec::int("Stt", 1),
        FieldSpec::text("LineName", 12),
    ];

    fn encode(&self, file: &NetworkFile, out: &mut RecordWriter) {
        let (from, to, circuit, line_name) = line_label(file, self.circuit);
        out.int(self.number)
            .text(&self.name)
            .code(self.op)
            .int(from)
            .int(to)
            .int(circuit)
            .float(self.mvar)
            .code(self.terminal)
            .float(self.cost)
            .text(&self.date)
            .code(self.condition)
            .int(self.status)
            .text(line_name);
    }

    fn decode(input: &mut RecordReader<'_>, resolver: &Resolver<'_>) -> NpfResult<Self> {
        let number = input.int()?;
        let name = input.text()?;
        let op = input.code()?;
        let from = input.int()?;
        let to = input.int()?;
        let parallel = input.int()?;
        let circuit = input.resolved(resolver.line(from, to, parallel))?;
        let shunt = LineShunt {
            number,
            name,
            op,
            circuit,
            mvar: input.float()?,
            terminal: input.code()?,
            cost: input.float()?,
            date: input.text()?,
            condition: input.code()?,
            status: input.int()?,
        };
        input.skip()?;
        Ok(shunt)
    }
}

// Shared by TRANSFORMER and EQUIVALENT_TRANSFORMER.
impl RecordCodec for Transformer {
    const COMMENT: &'static str = "# FromBus#,ToBus#,ParallelCirc#,\"Op\",\"MetEnd\",R%,X%,\
                                   TapMin,TapMax,PhaseMin,PhaseMax,ControlType,CtrBus,TapSteps,\
                                   NorRating,EmgRating,PF,Cost,\"[..Date..]\",\"Cnd\",Series#,\
                                   \"[...Name...]\",Env,\"[...Extended Name...]\",Stt,Tap,Phase,\
                                   MinFlow,MaxFlow,EmgMinFlow,EmgMaxFlow";
    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::int("FromBus#", 6),
        FieldSpec::int("ToBus#", 6),
        FieldSpec::int("ParallelCirc#", 3),
        FieldSpec::code("Op", 1),
        FieldSpec::code("MetEnd", 1),
        FieldSpec::float("R%", 8, 3),
        FieldSpec::float("X%", 8, 3),
        FieldSpec::float("TapMin", 8, 3),
        FieldSpec::float("TapMax", 8, 3),
        FieldSpec::float("PhaseMin", 8, 3).or_float(0.0),
        FieldSpec::float("PhaseMax", 8, 3).or_float(0.0),
        FieldSpec::int("ControlType", 1),
        FieldSpec::int("CtrBus", 6).optional(),
        FieldSpec::int("TapSteps", 3),
        FieldSpec::float("NorRating", 8, 3),
        FieldSpec::float("EmgRating", 8, 3),
        FieldSpec::float("PF", 8, 3).or_float(0.0),
        FieldSpec::float("Cost", 8, 3).or_float(0.0),
        FieldSpec::text("Date", 10),
        FieldSpec::code("Cnd", 1),
        FieldSpec::int("Series#", 6),
        FieldSpec::text("Name", 12),
        FieldSpec::int("Env", 1),
        FieldSpec::text("ExtendedName", 12),
        FieldSpec::int("Stt", 1).or_int(1),
        FieldSpec::float("Tap", 8, 3).or_float(1.0),
        FieldSpec::float("Phase", 8, 3).or_float(0.0),
        FieldSpec::float("MinFlow", 8, 3),
        FieldSpec::float("MaxFlow", 8, 3),
        FieldSpec::float("EmgMinFlow", 8, 3),
        FieldSpec::float("EmgMaxFlow", 8, 3),
    ];

    fn encode(&self, file: &NetworkFile, out: &mut RecordWriter) {
        let (from, _) = bus_label(file, self.from_bus);
        let (to, _) = bus_label(file, self.to_bus);
        let (ctr, _) = optional_bus_label(file, self.ctr_bus);
        out.int(from)
            .int(to)
            .int(self.parallel_circuit)
            .code(self.op)
            .code(self.metering_end)
            .float(self.r_pct)
            .float(self.x_pct)
            .float(self.tap_min)
            .float(self.tap_max)
            .float(self.phase_min)
            .float(self.phase_max)
            .int(self.control_type)
            .int(ctr)
            .int(self.tap_steps)
            .float(self.normal_rating)
            .float(self.emergency_rating)
            .float(self.power_factor)
            .float(self.cost)
            .text(&self.date)
            .code(self.condition)
            .int(self.series_number)
            .text(&self.name)
            .int(self.env)
            .text(&self.extended_name)
            .int(self.status)
            .float(self.tap)
            .float(self.phase)
            .float(self.min_flow)
            .float(self.max_flow)
            .float(self.emergency_min_flow)
            .float(self.emergency_max_flow);
    }

    fn decode(input: &mut RecordReader<'_>, resolver: &Resolver<'_>) -> NpfResult<Self> {
        let from_number = input.int()?;
        let to_number = input.int()?;
        let from_bus = input.resolved(resolver.bus(from_number))?;
        let to_bus = input.resolved(resolver.bus(to_number))?;
        let parallel_circuit = input.int()?;
        let op = input.code()?;
        let metering_end = input.code()?;
        let r_pct = input.float()?;
        let x_pct = input.float()?;
        let tap_min = input.float()?;
        let tap_max = input.float()?;
        let phase_min = input.float()?;
        let phase_max = input.float()?;
        let control_type = input.int()?;
        let ctr_number = input.optional_key()?;
        let ctr_bus = input.resolved(resolver.optional_bus(ctr_number))?;
        Ok(Transformer {
            from_bus,
            to_bus,
            parallel_circuit,
            op,
            metering_end,
            r_pct,
            x_pct,
            tap_min,
            tap_max,
            phase_min,
            phase_max,
            control_type,
            ctr_bus,
            tap_steps: input.int()?,
            normal_rating: input.float()?,
            emergency_rating: input.float()?,
            power_factor: input.float()?,
            cost: input.float()?,
            date: input.text()?,
            condition: input.code()?,
            series_number: input.int()?,
            name: input.text()?,
            env: input.int()?,
            extended_name: input.text()?,
            status: input.int()?,
            tap: input.float()?,
            phase: input.float()?,
            min_flow: input.float()?,
            max_flow: input.float()?,
            emergency_min_flow: input.float()?,
            emergency_max_flow: input.float()?,
        })
    }
}

/// Find a winding by name, or by (winding bus, middle point, circuit) when the
/// name column is blank.
fn winding(
    input: &RecordReader<'_>,
    resolver: &Resolver<'_>,
    name: &str,
    bus_number: i64,
    middlepoint_number: i64,
    circuit: i64,
) -> NpfResult<TransformerRef> {
    let lookup = if name.is_empty() {
        resolver.transformer(bus_number, middlepoint_number, circuit)
    } else {
        resolver.transformer_by_name(name)
    };
    input.resolved(lookup)
}

impl RecordCodec for ThreeWindingTransformer {
    const COMMENT: &'static str = "# PrimaryBus#,SecondaryBus#,TertiaryBus#,MiddlePointBus#,\
                                   ParallelCirc#,\"Op\",\"MetEnd\",RPS%,XPS%,SbPS,RST%,XST%,\
                                   SbST,RPT%,XPT%,SbPT,PF,Cost,\"[..Date..]\",\"Cnd\",Series#,\
                                   \"PriEqvTrfName\",\"SecEqvTrfName\",\"TerEqvTrfname\",\
                                   \"[...Name...]\",\"[...Extended Name...]\"";
    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::int("PrimaryBus#", 6),
        FieldSpec::int("SecondaryBus#", 6),
        FieldSpec::int("TertiaryBus#", 6),
        FieldSpec::int("MiddlePointBus#", 6),
        FieldSpec::int("ParallelCirc#", 2),
        FieldSpec::code("Op", 1),
        FieldSpec::code("MetEnd", 1),
        FieldSpec::float("RPS%", 8, 3),
        FieldSpec::float("XPS%", 8, 3),
        FieldSpec::float("SbPS", 8, 3),
        FieldSpec::float("RST%", 8, 3),
        FieldSpec::float("XST%", 8, 3),
        FieldSpec::float("SbST", 8, 3),
        FieldSpec::float("RPT%", 8, 3),
        FieldSpec::float("XPT%", 8, 3),
        FieldSpec::float("SbPT", 8, 3),
        FieldSpec::float("PF", 8, 3).or_float(0.0),
        FieldSpec::float("Cost", 8, 3).or_float(0.0),
        FieldSpec::text("Date", 10),
        FieldSpec::code("Cnd", 1),
        FieldSpec::int("Series#", 6),
        FieldSpec::text("PriEqvTrfName", 12),
        FieldSpec::text("SecEqvTrfName", 12),
        FieldSpec::text("TerEqvTrfName", 12),
        FieldSpec::text("Name", 12),
        FieldSpec::text("ExtendedName", 12),
    ];

    fn encode(&self, file: &NetworkFile, out: &mut RecordWriter) {
        let (primary_bus, primary_name) = transformer_label(file, self.primary);
        let (secondary_bus, secondary_name) = transformer_label(file, self.secondary);
        let (tertiary_bus, tertiary_name) = transformer_label(file, self.tertiary);
        let (middlepoint, _) = bus_label(file, self.middlepoint);
        out.int(primary_bus)
            .int(secondary_bus)
            .int(tertiary_bus)
            .int(middlepoint)
            .int(self.parallel_circuit)
            .code(self.op)
            .code(self.metering_end)
            .float(self.r_ps_pct)
            .float(self.x_ps_pct)
            .float(self.sbase_ps_mva)
            .float(self.r_st_pct)
            .float(self.x_st_pct)
            .float(self.sbase_st_mva)
            .float(self.r_pt_pct)
            .float(self.x_pt_pct)
            .float(self.sbase_pt_mva)
            .float(self.power_factor)
            .float(self.cost)
            .text(&self.date)
            .code(self.condition)
            .int(self.series_number)
            .text(primary_name)
            .text(secondary_name)
            .text(tertiary_name)
            .text(&self.name)
            .text(&self.extended_name);
    }

    fn decode(input: &mut RecordReader<'_>, resolver: &Resolver<'_>) -> NpfResult<Self> {
        let primary_bus: i64 = input.int()?;
        let secondary_bus: i64 = input.int()?;
        let tertiary_bus: i64 = input.int()?;
        let middlepoint_number = input.int()?;
        let middlepoint = input.resolved(resolver.bus(middlepoint_number))?;
        let parallel_circuit = input.int()?;
        let op = input.code()?;
        let metering_end = input.code()?;
        let r_ps_pct = input.float()?;
        let x_ps_pct = input.float()?;
        let sbase_ps_mva = input.float()?;
        let r_st_pct = input.float()?;
        let x_st_pct = input.float()?;
        let sbase_st_mva = input.float()?;
        let r_pt_pct = input.float()?;
        let x_pt_pct = input.float()?;
        let sbase_pt_mva = input.float()?;
        let power_factor = input.float()?;
        let cost = input.float()?;
        let date = input.text()?;
        let condition = input.code()?;
        let series_number = input.int()?;
        let primary_name = input.text()?;
        let secondary_name = input.text()?;
        let tertiary_name = input.text()?;

        let primary = winding(
            input,
            resolver,
            &primary_name,
            primary_bus,
            middlepoint_number,
            parallel_circuit,
        )?;
        let secondary = winding(
            input,
            resolver,
            &secondary_name,
            secondary_bus,
            middlepoint_number,
            parallel_circuit,
        )?;
        let tertiary = winding(
            input,
            resolver,
            &tertiary_name,
            tertiary_bus,
            middlepoint_number,
            parallel_circuit,
        )?;

        Ok(ThreeWindingTransformer {
            primary,
            secondary,
            tertiary,
            middlepoint,
            parallel_circuit,
            op,
            metering_end,
            r_ps_pct,
            x_ps_pct,
            sbase_ps_mva,
            r_st_pct,
            x_st_pct,
            sbase_st_mva,
            r_pt_pct,
            x_pt_pct,
            sbase_pt_mva,
            power_factor,
            cost,
            date,
            condition,
            series_number,
            name: input.text()?,
            extended_name: input.text()?,
        })
    }
}

impl RecordCodec for ControlledSeriesCapacitor {
    const COMMENT: &'static str = "# FromBus#,ToBus#,ParallelCirc#,\"Op\",\"MetEnd\",Xmin%,Xmax%,\
                                   NorRating,EmgRating,PF,Cost,\"[..Date..]\",\"Cnd\",Series#,\
                                   \"[...Name...]\",\"CM\",Stt,Bypass,Setpoint";
    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::int("FromBus#", 6),
        FieldSpec::int("ToBus#", 6),
        FieldSpec::int("ParallelCirc#", 3),
        FieldSpec::code("Op", 1),
        FieldSpec::code("MetEnd", 1),
        FieldSpec::float("Xmin%", 8, 3),
        FieldSpec::float("Xmax%", 8, 3),
        FieldSpec::float("NorRating", 8, 3),
        FieldSpec::float("EmgRating", 8, 3),
        FieldSpec::float("PF", 8, 3),
        FieldSpec::float("Cost", 8, 3).or_float(0.0),
        FieldSpec::text("Date", 10),
        FieldSpec::code("Cnd", 1),
        FieldSpec::int("Series#", 6),
        FieldSpec::text("Name", 12),
        FieldSpec::int("CM", 1),
        FieldSpec::int("Stt", 1),
        FieldSpec::int("Bypass", 1),
        FieldSpec::float("Setpoint", 8, 3),
    ];

    fn encode(&self, file: &NetworkFile, out: &mut RecordWriter) {
        let (from, _) = bus_label(file, self.from_bus);
        let (to, _) = bus_label(file, self.to_bus);
        out.int(from)
            .int(to)
            .int(self.parallel_circuit)
            .code(self.op)
            .code(self.metering_end)
            .float(self.xmin_pct)
            .float(self.xmax_pct)
            .float(self.normal_rating)
            .float(self.emergency_rating)
            .float(self.power_factor)
            .float(self.cost)
            .text(&self.date)
            .code(self.condition)
            .int(self.series_number)
            .text(&self.name)
            .int(self.control_mode)
            .int(self.status)
            .int(self.bypass)
            .float(self.setpoint);
    }

    fn decode(input: &mut RecordReader<'_>, resolver: &Resolver<'_>) -> NpfResult<Self> {
        let from_number = input.int()?;
        let to_number = input.int()?;
        let from_bus = input.resolved(resolver.bus(from_number))?;
        let to_bus = input.resolved(resolver.bus(to_number))?;
        Ok(ControlledSeriesCapacitor {
            from_bus,
            to_bus,
            parallel_circuit: input.int()?,
            op: input.code()?,
            metering_end: input.code()?,
            xmin_pct: input.float()?,
            xmax_pct: input.float()?,
            normal_rating: input.float()?,
            emergency_rating: input.float()?,
            power_factor: input.float()?,
            cost: input.float()?,
            date: input.text()?,
            condition: input.code()?,
            series_number: input.int()?,
            name: input.text()?,
            control_mode: input.int()?,
            status: input.int()?,
            bypass: input.int()?,
            setpoint: input.float()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{decode_line, encode_one};
    use npf_core::{Area, Bus, BusRef, NpfError, RecordKey, Region, ShuntTerminal, System};

    /// Buses 1, 2 and 3 plus middle point 90.
    fn grid() -> NetworkFile {
        let mut file = NetworkFile::new();
        let system = file.add_system(System::new("SY", "System", 1));
        let region = file.add_region(Region::new("RE", "Region", 1, system));
        let area = file.add_area(Area::new("AR", "Area", 1, system));
        for (number, name) in [(1, "One"), (2, "Two"), (3, "Three")] {
            file.add_bus(Bus::new(number, name, area, region, system));
        }
        file.add_middlepoint_bus(Bus::new(90, "Star", area, region, system));
        file
    }

    #[test]
    fn line_keeps_its_number_and_defaults_length() {
        let file = grid();
        let line: Line = decode_line(
            SectionKind::Line,
            "1,2,1,\"A\",\"F\",0.5,5,10,100,120,0,,\"1900/01/01\",\"R\",42,0,\"L12\",0,,1,\"\"",
            &file,
        )
        .unwrap();
        assert_eq!(line.from_bus, BusRef::regular(0));
        assert_eq!(line.to_bus, BusRef::regular(1));
        assert_eq!(line.number, 42);
        assert_eq!(line.cost, 0.0);
        assert_eq!(line.length_km, 1.0);
        assert_eq!(line.name, "L12");
    }

    #[test]
    fn line_round_trips() {
        let file = grid();
        let mut line = Line::new(BusRef::regular(0), BusRef::regular(2), 2).with_impedance(1.0, 10.0, 5.0);
        line.name = "L13".into();
        line.line_type = Line::TYPE_BREAKER;
        let text = encode_one(&line, &file);
        assert!(text.starts_with("     1,     3,  2,\"A\",\"F\",   1.000,  10.000,   5.000,"));
        assert_eq!(decode_line::<Line>(SectionKind::Line, &text, &file).unwrap(), line);
    }

    #[test]
    fn line_shunt_resolves_the_triple_and_reads_status() {
        let mut file = grid();
        let mut line = Line::new(BusRef::regular(0), BusRef::regular(1), 1);
        line.name = "L12".into();
        let circuit = file.add_line(line);

        let shunt: LineShunt = decode_line(
            SectionKind::LineShunt,
            "4,\"Reactor\",\"A\",1,2,1,-20,\"T\",,\"1900/01/01\",\"R\",0,\"ignored\"",
            &file,
        )
        .unwrap();
        assert_eq!(shunt.circuit, circuit);
        assert_eq!(shunt.terminal, ShuntTerminal::To);
        assert_eq!(shunt.status, 0);

        let text = encode_one(&shunt, &file);
        assert!(text.ends_with(",0,\"L12         \""));
    }

    #[test]
    fn line_shunt_on_a_missing_line() {
        let file = grid();
        let err = decode_line::<LineShunt>(
            SectionKind::LineShunt,
            "4,\"Reactor\",\"A\",1,3,1,-20,\"F\",0,\"1900/01/01\",\"R\",1,\"\"",
            &file,
        )
        .unwrap_err();
        match err {
            NpfError::UnresolvedReference { kind, key, .. } => {
                assert_eq!(kind, SectionKind::Line);
                assert_eq!(key, RecordKey::Circuit { from: 1, to: 3, circuit: 1 });
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn transformer_reads_power_factor_and_optional_defaults() {
        let file = grid();
        let transformer: Transformer = decode_line(
            SectionKind::Transformer,
            "1,2,1,\"A\",\"F\",0.1,8,0.9,1.1,,,1,2,16,100,120,0.95,,\"1900/01/01\",\"R\",7,\"T12\",0,\"\",,,,\
             -100,100,-120,120",
            &file,
        )
        .unwrap();
        assert_eq!(transformer.power_factor, 0.95);
        assert_eq!(transformer.phase_min, 0.0);
        assert_eq!(transformer.ctr_bus, Some(BusRef::regular(1)));
        assert_eq!(transformer.tap_steps, 16);
        assert_eq!(transformer.status, 1);
        assert_eq!(transformer.tap, 1.0);
        assert_eq!(transformer.emergency_max_flow, 120.0);
    }

    fn star(file: &mut NetworkFile) -> [TransformerRef; 3] {
        let mid = BusRef::middle_point(0);
        [(0, "P"), (1, "S"), (2, "T")].map(|(bus, name)| {
            file.add_equivalent_transformer(
                Transformer::new(BusRef::regular(bus), mid, 1).with_name(name),
            )
        })
    }

    #[test]
    fn three_winding_writes_winding_buses_and_names() {
        let mut file = grid();
        let [p, s, t] = star(&mut file);
        let three = ThreeWindingTransformer::new(p, s, t, BusRef::middle_point(0));
        let text = encode_one(&three, &file);
        assert!(text.starts_with("     1,     2,     3,    90, 1,"));
        assert!(text.contains(
            ",\"P           \",\"S           \",\"T           \",\"            \",\"            \""
        ));
        assert_eq!(
            decode_line::<ThreeWindingTransformer>(SectionKind::ThreeWindingTransformer, &text, &file)
                .unwrap(),
            three
        );
    }

    #[test]
    fn three_winding_falls_back_to_the_triple() {
        let mut file = grid();
        let [p, s, t] = star(&mut file);
        let three: ThreeWindingTransformer = decode_line(
            SectionKind::ThreeWindingTransformer,
            "1,2,3,90,1,\"A\",\"F\",0,10,100,0,10,100,0,10,100,,,\"1900/01/01\",\"R\",0,\
             \"\",\"\",\"\",\"Star\",\"\"",
            &file,
        )
        .unwrap();
        assert_eq!(three.windings(), [p, s, t]);
        assert_eq!(three.middlepoint_bus(), BusRef::middle_point(0));
        assert_eq!(three.primary_bus(&file), Some(BusRef::regular(0)));
        assert_eq!(three.tertiary_bus(&file), Some(BusRef::regular(2)));
        assert_eq!(three.name, "Star");
    }

    #[test]
    fn three_winding_with_unknown_winding_name() {
        let mut file = grid();
        star(&mut file);
        let err = decode_line::<ThreeWindingTransformer>(
            SectionKind::ThreeWindingTransformer,
            "1,2,3,90,1,\"A\",\"F\",0,10,100,0,10,100,0,10,100,0,0,\"1900/01/01\",\"R\",0,\
             \"P\",\"X\",\"T\",\"\",\"\"",
            &file,
        )
        .unwrap_err();
        match err {
            NpfError::UnresolvedReference { kind, key, .. } => {
                assert_eq!(kind, SectionKind::Transformer);
                assert_eq!(key, RecordKey::Name("X".into()));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn csc_keeps_its_cost() {
        let file = grid();
        let csc: ControlledSeriesCapacitor = decode_line(
            SectionKind::ControlledSeriesCapacitor,
            "2,3,1,\"A\",\"T\",-5,-1,100,120,0,12.5,\"1900/01/01\",\"R\",3,\"TCSC\",1,1,0,50",
            &file,
        )
        .unwrap();
        assert_eq!(csc.cost, 12.5);
        assert_eq!(csc.control_mode, ControlledSeriesCapacitor::CONTROL_MODE_POWER);
        assert_eq!(csc.setpoint, 50.0);
        assert_eq!(
            decode_line::<ControlledSeriesCapacitor>(
                SectionKind::ControlledSeriesCapacitor,
                &encode_one(&csc, &file),
                &file
            )
            .unwrap(),
            csc
        );
    }
}
