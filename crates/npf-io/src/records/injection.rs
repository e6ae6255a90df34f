use npf_core::{BusShunt, Demand, Generator, NetworkFile, NpfResult, Resolver, StaticVarCompensator};

use super::{bus_label, optional_bus_label};
use crate::field::FieldSpec;
use crate::record::{RecordCodec, RecordReader, RecordWriter};

impl RecordCodec for Demand {
    const COMMENT: &'static str = "# Demand#,\"[...Name...]\",\"Op\",Bus#,\"[.Bus Name.]\",\
                                   Units,\"[..Date..]\",\"Cnd\",P_MW,Q_MW";
    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::int("Demand#", 7),
        FieldSpec::text("Name", 12),
        FieldSpec::code("Op", 1),
        FieldSpec::int("Bus#", 5),
        FieldSpec::text("BusName", 12),
        FieldSpec::int("Units", 5),
        FieldSpec::text("Date", 10),
        FieldSpec::code("Cnd", 1),
        FieldSpec::float("P_MW", 8, 3),
        FieldSpec::float("Q_MW", 8, 3),
    ];
    const INDENT: &'static str = "  ";

    fn encode(&self, file: &NetworkFile, out: &mut RecordWriter) {
        let (bus_number, bus_name) = bus_label(file, self.bus);
        out.int(self.number)
            .text(&self.name)
            .code(self.op)
            .int(bus_number)
            .text(bus_name)
            .int(self.units)
            .text(&self.date)
            .code(self.condition)
            .float(self.p_mw)
            .float(self.q_mvar);
    }

    fn decode(input: &mut RecordReader<'_>, resolver: &Resolver<'_>) -> NpfResult<Self> {
        let number = input.int()?;
        let name = input.text()?;
        let op = input.code()?;
        let bus_number = input.int()?;
        let bus = input.resolved(resolver.bus(bus_number))?;
        input.skip()?;
        Ok(Demand {
            number,
            name,
            op,
            bus,
            units: input.int()?,
            date: input.text()?,
            condition: input.code()?,
            p_mw: input.float()?,
            q_mvar: input.float()?,
        })
    }
}

impl RecordCodec for Generator {
    const COMMENT: &'static str = "# Gen#,\"[...Name...]\",\"Op\",Bus#,\"[.Bus Name.]\",\
                                   \"Type\",Units,Pmin,Pmax,Qmin,Qmax,\"[..Date..]\",\"C\",\
                                   CtrBus#,\"[CtrBusName]\",CtrType,Factor,UnitsOn,Pgen,Qgen";
    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::int("Gen#", 6),
        FieldSpec::text("Name", 12),
        FieldSpec::code("Op", 1),
        FieldSpec::int("Bus#", 6),
        FieldSpec::text("BusName", 12),
        FieldSpec::code("Type", 1),
        FieldSpec::int("Units", 3),
        FieldSpec::float("Pmin", 8, 3),
        FieldSpec::float("Pmax", 8, 3),
        FieldSpec::float("Qmin", 8, 3),
        FieldSpec::float("Qmax", 8, 3),
        FieldSpec::text("Date", 10),
        FieldSpec::code("Cnd", 1),
        FieldSpec::int("CtrBus#", 6).optional(),
        FieldSpec::text("CtrBusName", 12),
        FieldSpec::int("CtrType", 1),
        FieldSpec::float("Factor", 8, 3),
        FieldSpec::int("UnitsOn", 3),
        FieldSpec::float("Pgen", 8, 3),
        FieldSpec::float("Qgen", 8, 3),
    ];

    fn encode(&self, file: &NetworkFile, out: &mut RecordWriter) {
        let (bus_number, bus_name) = bus_label(file, self.bus);
        let (ctr_number, ctr_name) = optional_bus_label(file, self.ctr_bus);
        out.int(self.number)
            .text(&self.name)
            .code(self.op)
            .int(bus_number)
            .text(bus_name)
            .code(self.gen_type)
            .int(self.units)
            .float(self.pmin)
            .float(self.pmax)
            .float(self.qmin)
            .float(self.qmax)
            .text(&self.date)
            .code(self.condition)
            .int(ctr_number)
            .text(ctr_name)
            .int(self.ctr_type)
            .float(self.power_factor)
            .int(self.units_on)
            .float(self.pgen)
            .float(self.qgen);
    }

    fn decode(input: &mut RecordReader<'_>, resolver: &Resolver<'_>) -> NpfResult<Self> {
        let number = input.int()?;
        let name = input.text()?;
        let op = input.code()?;
        let bus_number = input.int()?;
        let bus = input.resolved(resolver.bus(bus_number))?;
        input.skip()?;
        let gen_type = input.code()?;
        let units = input.int()?;
        let pmin = input.float()?;
        let pmax = input.float()?;
        let qmin = input.float()?;
        let qmax = input.float()?;
        let date = input.text()?;
        let condition = input.code()?;
        let ctr_number = input.optional_key()?;
        let ctr_bus = input.resolved(resolver.optional_bus(ctr_number))?;
        input.skip()?;
        Ok(Generator {
            number,
            name,
            op,
            bus,
            gen_type,
            units,
            pmin,
            pmax,
            qmin,
            qmax,
            date,
            condition,
            ctr_bus,
            ctr_type: input.int()?,
            power_factor: input.float()?,
            units_on: input.int()?,
            pgen: input.float()?,
            qgen: input.float()?,
        })
    }
}

impl RecordCodec for BusShunt {
    const COMMENT: &'static str = "# Shunt#,\"[...Name...]\",\"Op\",Bus#,\"[.Bus Name.]\",\
                                   CtrBus#,\"[.Ctr Name.]\",\"T\",CtrType,Units,MVAr,Cost,\
                                   \"[..Date..]\",\"Cnd\",UnitsOn";
    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::int("Shunt#", 6),
        FieldSpec::text("Name", 12),
        FieldSpec::code("Op", 1),
        FieldSpec::int("Bus#", 6),
        FieldSpec::text("BusName", 12),
        FieldSpec::int("CtrBus#", 6).optional(),
        FieldSpec::text("CtrName", 12),
        FieldSpec::code("T", 1),
        FieldSpec::int("CtrType", 1),
        FieldSpec::int("Units", 3),
        FieldSpec::float("MVAr", 8, 3),
        FieldSpec::float("Cost", 8, 3).or_float(0.0),
        FieldSpec::text("Date", 10),
        FieldSpec::code("Cnd", 1),
        FieldSpec::int("UnitsOn", 1),
    ];

    fn encode(&self, file: &NetworkFile, out: &mut RecordWriter) {
        let (bus_number, bus_name) = bus_label(file, self.bus);
        let (ctr_number, ctr_name) = optional_bus_label(file, self.ctr_bus);
        out.int(self.number)
            .text(&self.name)
            .code(self.op)
            .int(bus_number)
            .text(bus_name)
            .int(ctr_number)
            .text(ctr_name)
            .code(self.shunt_type)
            .int(self.ctr_type)
            .int(self.units)
            .float(self.mvar)
            .float(self.cost)
            .text(&self.date)
            .code(self.condition)
            .int(self.units_on);
    }

    fn decode(input: &mut RecordReader<'_>, resolver: &Resolver<'_>) -> NpfResult<Self> {
        let number = input.int()?;
        let name = input.text()?;
        let op = input.code()?;
        let bus_number = input.int()?;
        let bus = input.resolved(resolver.bus(bus_number))?;
        input.skip()?;
        let ctr_number = input.optional_key()?;
        let ctr_bus = input.resolved(resolver.optional_bus(ctr_number))?;
        input.skip()?;
        Ok(BusShunt {
            number,
            name,
            op,
            bus,
            ctr_bus,
            shunt_type: input.code()?,
            ctr_type: input.int()?,
            units: input.int()?,
            mvar: input.float()?,
            cost: input.float()?,
            date: input.text()?,
            condition: input.code()?,
            units_on: input.int()?,
        })
    }
}

impl RecordCodec for StaticVarCompensator {
    const COMMENT: &'static str = "# SVC#,\"[...Name...]\",\"Op\",Bus#,\"[.Bus Name.]\",CtrBus,\
                                   \"[.Ctr Name.]\",Droop,CtrMode,Units,Qmin,Qmax,Cost,\
                                   \"[..Date..]\",\"Cnd\",Stt,SetMVAR";
    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::int("SVC#", 6),
        FieldSpec::text("Name", 12),
        FieldSpec::code("Op", 1),
        FieldSpec::int("Bus#", 6),
        FieldSpec::text("BusName", 12),
        FieldSpec::int("CtrBus", 6).optional(),
        FieldSpec::text("CtrName", 12),
        FieldSpec::float("Droop", 8, 3),
        FieldSpec::int("CtrMode", 3),
        FieldSpec::int("Units", 3),
        FieldSpec::float("Qmin", 8, 3),
        FieldSpec::float("Qmax", 8, 3),
        FieldSpec::float("Cost", 8, 2).or_float(0.0),
        FieldSpec::text("Date", 10),
        FieldSpec::code("Cnd", 1),
        FieldSpec::int("Stt", 1),
        FieldSpec::float("SetMVAR", 8, 3),
    ];

    fn encode(&self, file: &NetworkFile, out: &mut RecordWriter) {
        let (bus_number, bus_name) = bus_label(file, self.bus);
        let (ctr_number, ctr_name) = optional_bus_label(file, self.ctr_bus);
        out.int(self.number)
            .text(&self.name)
            .code(self.op)
            .int(bus_number)
            .text(bus_name)
            .int(ctr_number)
            .text(ctr_name)
            .float(self.droop)
            .int(self.ctr_mode)
            .int(self.units)
            .float(self.qmin)
            .float(self.qmax)
            .float(self.cost)
            .text(&self.date)
            .code(self.condition)
            .int(self.status)
            .float(self.mvar_setpoint);
    }

    fn decode(input: &mut RecordReader<'_>, resolver: &Resolver<'_>) -> NpfResult<Self> {
        let number = input.int()?;
        let name = input.text()?;
        let op = input.code()?;
        let bus_number = input.int()?;
        let bus = input.resolved(resolver.bus(bus_number))?;
        input.skip()?;
        let ctr_number = input.optional_key()?;
        let ctr_bus = input.resolved(resolver.optional_bus(ctr_number))?;
        input.skip()?;
        Ok(StaticVarCompensator {
            number,
            name,
            op,
            bus,
            ctr_bus,
            droop: input.float()?,
            ctr_mode: input.int()?,
            units: input.int()?,
            qmin: input.float()?,
            qmax: input.float()?,
            cost: input.float()?,
            date: input.text()?,
            condition: input.code()?,
            status: input.int()?,
            mvar_setpoint: input.float()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{decode_line, encode_one};
    use npf_core::{
        Area, Bus, BusRef, BusShuntType, GeneratorType, NpfError, RecordKey, Region, SectionKind,
        System,
    };

    fn two_buses() -> (NetworkFile, BusRef, BusRef) {
        let mut file = NetworkFile::new();
        let system = file.add_system(System::new("SY", "System", 1));
        let region = file.add_region(Region::new("RE", "Region", 1, system));
        let area = file.add_area(Area::new("AR", "Area", 1, system));
        let b1 = file.add_bus(Bus::new(1, "One", area, region, system));
        let b2 = file.add_bus(Bus::new(2, "Two", area, region, system));
        (file, b1, b2)
    }

    #[test]
    fn demand_writes_bus_name_and_indent() {
        let (file, _, b2) = two_buses();
        let demand = Demand::new(7, "Load", b2).with_power(50.0, 10.0);
        assert_eq!(
            encode_one(&demand, &file),
            "        7,\"Load        \",\"A\",    2,\"Two         \",    1,\"1900/01/01\",\"R\",  50.000,  10.000"
        );
    }

    #[test]
    fn demand_ignores_the_bus_name_column() {
        let (file, _, b2) = two_buses();
        let demand: Demand = decode_line(
            SectionKind::Demand,
            "  7,\"Load\",\"A\",2,\"stale name\",1,\"1900/01/01\",\"R\",50,10",
            &file,
        )
        .unwrap();
        assert_eq!(demand.bus, b2);
        assert_eq!(demand.p_mw, 50.0);
        assert_eq!(demand.q_mvar, 10.0);
    }

    #[test]
    fn generator_reads_control_type_from_its_own_column() {
        let (file, b1, b2) = two_buses();
        let generator: Generator = decode_line(
            SectionKind::Generator,
            "1,\"G1\",\"A\",1,\"One\",\"H\",4,0,100,-50,50,\"1900/01/01\",\"R\",2,\"Two\",3,0.9,2,80,5",
            &file,
        )
        .unwrap();
        assert_eq!(generator.bus, b1);
        assert_eq!(generator.gen_type, GeneratorType::Hydro);
        assert_eq!(generator.units, 4);
        assert_eq!(generator.ctr_bus, Some(b2));
        assert_eq!(generator.ctr_type, 3);
        assert_eq!(generator.units_on, 2);
        assert_eq!(generator.pgen, 80.0);
    }

    #[test]
    fn generator_without_control_bus() {
        let (file, b1, _) = two_buses();
        let generator = Generator::new(1, "G1", b1).with_limits(0.0, 100.0, -50.0, 50.0);
        let line = encode_one(&generator, &file);
        assert!(line.contains(",     0,\"            \","));

        let back: Generator = decode_line(SectionKind::Generator, &line, &file).unwrap();
        assert_eq!(back, generator);
    }

    #[test]
    fn bus_shunt_cost_defaults_when_empty() {
        let (file, b1, _) = two_buses();
        let shunt: BusShunt = decode_line(
            SectionKind::BusShunt,
            "3,\"Cap\",\"A\",1,\"One\",,\"\",\"C\",0,2,15,,\"1900/01/01\",\"R\",1",
            &file,
        )
        .unwrap();
        assert_eq!(shunt.bus, b1);
        assert_eq!(shunt.ctr_bus, None);
        assert_eq!(shunt.shunt_type, BusShuntType::Capacitor);
        assert_eq!(shunt.cost, 0.0);
        assert_eq!(shunt.mvar, 15.0);
    }

    #[test]
    fn svc_with_unknown_control_bus_fails() {
        let (file, _, _) = two_buses();
        let err = decode_line::<StaticVarCompensator>(
            SectionKind::StaticVarCompensator,
            "1,\"SVC\",\"A\",1,\"One\",9,\"\",0.02,1,1,-50,50,,\"1900/01/01\",\"R\",1,0",
            &file,
        )
        .unwrap_err();
        match err {
            NpfError::UnresolvedReference { kind, key, .. } => {
                assert_eq!(kind, SectionKind::Bus);
                assert_eq!(key, RecordKey::Number(9));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
