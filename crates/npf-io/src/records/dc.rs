use npf_core::{
    AcDcConverterLcc, AcDcConverterVsc, DcBus, DcLine, DcLink, DcLinkRef, NetworkFile, NpfResult,
    Resolver, SectionKind,
};

use super::{admin_numbers, bus_label, dangling, dcbus_number, optional_bus_label};
use crate::field::FieldSpec;
use crate::record::{RecordCodec, RecordReader, RecordWriter};

fn dclink_number(file: &NetworkFile, handle: DcLinkRef) -> i64 {
    match file.dclink(handle) {
        Some(link) => link.number,
        None => {
            dangling(SectionKind::DcLink, handle.index());
            0
        }
    }
}

impl RecordCodec for DcLink {
    const COMMENT: &'static str = "# Link#,\"[...Name...]\",kVbase,MWbase,\"Type\"";
    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::int("Link#", 4),
        FieldSpec::text("Name", 12),
        FieldSpec::float("kVbase", 8, 3),
        FieldSpec::float("MWbase", 8, 3),
        FieldSpec::code("Type", 3),
    ];

    fn encode(&self, _file: &NetworkFile, out: &mut RecordWriter) {
        out.int(self.number)
            .text(&self.name)
            .float(self.kv_base)
            .float(self.mw_base)
            .code(self.link_type);
    }

    fn decode(input: &mut RecordReader<'_>, _resolver: &Resolver<'_>) -> NpfResult<Self> {
        Ok(DcLink {
            number: input.int()?,
            name: input.text()?,
            kv_base: input.float()?,
            mw_base: input.float()?,
            link_type: input.code()?,
        })
    }
}

impl RecordCodec for DcBus {
    const COMMENT: &'static str = "# Bus#,\"[...Name...]\",\"Op\",Type,Polarity,GroundR,Area#,\
                                   Region#,System#,DcLink#,\"[..Date..]\",\"Cnd\",Cost,Volt";
    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::int("Bus#", 6),
        FieldSpec::text("Name", 12),
        FieldSpec::code("Op", 1),
        FieldSpec::int("Type", 1).or_int(0),
        FieldSpec::code("Polarity", 1),
        FieldSpec::float("GroundR", 8, 3).or_float(0.0),
        FieldSpec::int("Area#", 4),
        FieldSpec::int("Region#", 4),
        FieldSpec::int("System#", 4),
        FieldSpec::int("DcLink#", 4),
        FieldSpec::text("Date", 10),
        FieldSpec::code("Cnd", 1),
        FieldSpec::float("Cost", 8, 3).or_float(0.0),
        FieldSpec::float("Volt", 8, 3),
    ];

    fn encode(&self, file: &NetworkFile, out: &mut RecordWriter) {
        let (area, region, system) = admin_numbers(file, self.area, self.region, self.system);
        out.int(self.number)
            .text(&self.name)
            .code(self.op)
            .int(self.bus_type)
            .code(self.polarity)
            .float(self.ground_r)
            .int(area)
            .int(region)
            .int(system)
            .int(dclink_number(file, self.dc_link))
            .text(&self.date)
            .code(self.condition)
            .float(self.cost)
            .float(self.voltage);
    }

    fn decode(input: &mut RecordReader<'_>, resolver: &Resolver<'_>) -> NpfResult<Self> {
        let number = input.int()?;
        let name = input.text()?;
        let op = input.code()?;
        let bus_type = input.int()?;
        let polarity = input.code()?;
        let ground_r = input.float()?;
        let area_number = input.int()?;
        let region_number = input.int()?;
        let system_number = input.int()?;
        let link_number = input.int()?;

        let system = input.resolved(resolver.system(system_number))?;
        let area = input.resolved(resolver.area(area_number))?;
        let region = input.resolved(resolver.region(region_number))?;
        let dc_link = input.resolved(resolver.dclink(link_number))?;

        Ok(DcBus {
            number,
            name,
            op,
            bus_type,
            polarity,
            ground_r,
            area,
            region,
            system,
            dc_link,
            date: input.text()?,
            condition: input.code()?,
            cost: input.float()?,
            voltage: input.float()?,
        })
    }
}

impl RecordCodec for DcLine {
    const COMMENT: &'static str = "# FromBus#,ToBus#,ParallelCirc#,\"Op\",\"MetEnd\",R_Ohm,L_Ohm,\
                                   NominalRating,Cost,\"[..Date..]\",Cnd,Series#,\
                                   \"[.........Name.........]\",Stt";
    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::int("FromBus#", 6),
        FieldSpec::int("ToBus#", 6),
        FieldSpec::int("ParallelCirc#", 3),
        FieldSpec::code("Op", 1),
        FieldSpec::code("MetEnd", 1),
        FieldSpec::float("R_Ohm", 8, 3),
        FieldSpec::float("L_Ohm", 8, 3).or_float(0.0),
        FieldSpec::float("NominalRating", 8, 3),
        FieldSpec::float("Cost", 8, 3).or_float(0.0),
        FieldSpec::text("Date", 10),
        FieldSpec::code("Cnd", 1),
        FieldSpec::int("Series#", 6),
        FieldSpec::text("Name", 24),
        FieldSpec::int("Stt", 1),
    ];

    fn encode(&self, file: &NetworkFile, out: &mut RecordWriter) {
        out.int(dcbus_number(file, self.from_bus))
            .int(dcbus_number(file, self.to_bus))
            .int(self.parallel_circuit)
            .code(self.op)
            .code(self.metering_end)
            .float(self.r_ohm)
            .float(self.l_ohm)
            .float(self.normal_rating)
            .float(self.cost)
            .text(&self.date)
            .code(self.condition)
            .int(self.number)
            .text(&self.name)
            .int(self.status);
    }

    fn decode(input: &mut RecordReader<'_>, resolver: &Resolver<'_>) -> NpfResult<Self> {
        let from_number = input.int()?;
        let to_number = input.int()?;
        let from_bus = input.resolved(resolver.dcbus(from_number))?;
        let to_bus = input.resolved(resolver.dcbus(to_number))?;
        Ok(DcLine {
            from_bus,
            to_bus,
            parallel_circuit: input.int()?,
            op: input.code()?,
            metering_end: input.code()?,
            r_ohm: input.float()?,
            l_ohm: input.float()?,
            normal_rating: input.float()?,
            cost: input.float()?,
            date: input.text()?,
            condition: input.code()?,
            number: input.int()?,
            name: input.text()?,
            status: input.int()?,
        })
    }
}

impl RecordCodec for AcDcConverterLcc {
    const COMMENT: &'static str = "# Cnv#,\"Op\",\"MetEnd\",AcBus#,DcBus#,NeutralBus#,\"Type\",\
                                   Inom,Bridges,Xc,Vfs,Snom,Tmin,Tmax,Steps,\"Mode\",FlowAcDc,\
                                   FlowDcAc,FirR,FirRmin,FirRmax,FirI,FirImin,FirImax,CCCC,Cost,\
                                   \"[..Date..]\",\"Cnd\",\"[...Name...]\",Hz,Stt,Tap,Setpoint";
    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::int("Cnv#", 6),
        FieldSpec::code("Op", 1),
        FieldSpec::code("MetEnd", 1),
        FieldSpec::int("AcBus#", 6),
        FieldSpec::int("DcBus#", 6),
        FieldSpec::int("NeutralBus#", 6),
        FieldSpec::code("Type", 1),
        FieldSpec::float("Inom", 8, 3),
        FieldSpec::int("Bridges", 2),
        FieldSpec::float("Xc", 8, 3),
        FieldSpec::float("Vfs", 8, 3),
        FieldSpec::float("Snom", 8, 3),
        FieldSpec::float("Tmin", 8, 3),
        FieldSpec::float("Tmax", 8, 3),
        FieldSpec::int("Steps", 3),
        FieldSpec::text("Mode", 1),
        FieldSpec::float("FlowAcDc", 8, 3),
        FieldSpec::float("FlowDcAc", 8, 3),
        FieldSpec::float("FirR", 8, 3).or_float(0.0),
        FieldSpec::float("FirRmin", 8, 3).or_float(0.0),
        FieldSpec::float("FirRmax", 8, 3).or_float(0.0),
        FieldSpec::float("FirI", 8, 3).or_float(0.0),
        FieldSpec::float("FirImin", 8, 3).or_float(0.0),
        FieldSpec::float("FirImax", 8, 3).or_float(0.0),
        FieldSpec::float("CCCC", 8, 3),
        FieldSpec::float("Cost", 8, 3).or_float(0.0),
        FieldSpec::text("Date", 10),
        FieldSpec::code("Cnd", 1),
        FieldSpec::text("Name", 12),
        FieldSpec::int("Hz", 3),
        FieldSpec::int("Stt", 1),
        FieldSpec::float("Tap", 8, 4),
        FieldSpec::float("Setpoint", 8, 3),
    ];

    fn encode(&self, file: &NetworkFile, out: &mut RecordWriter) {
        let (ac_bus, _) = bus_label(file, self.ac_bus);
        out.int(self.number)
            .code(self.op)
            .code(self.metering_end)
            .int(ac_bus)
            .int(dcbus_number(file, self.dc_bus))
            .int(dcbus_number(file, self.neutral_bus))
            .code(self.converter_type)
            .float(self.nominal_current)
            .int(self.bridges)
            .float(self.xc)
            .float(self.vfs)
            .float(self.nominal_power)
            .float(self.tap_min)
            .float(self.tap_max)
            .int(self.tap_steps)
            .text(&self.control_mode)
            .float(self.flow_ac_dc)
            .float(self.flow_dc_ac)
            .float(self.rectifier_firing_angle_set)
            .float(self.rectifier_firing_angle_min)
            .float(self.rectifier_firing_angle_max)
            .float(self.inverter_firing_angle_set)
            .float(self.inverter_firing_angle_min)
            .float(self.inverter_firing_angle_max)
            .float(self.ccc_capacitance)
            .float(self.cost)
            .text(&self.date)
            .code(self.condition)
            .text(&self.name)
            .int(self.hz_base)
            .int(self.status)
            .float(self.tap)
            .float(self.setpoint);
    }

    fn decode(input: &mut RecordReader<'_>, resolver: &Resolver<'_>) -> NpfResult<Self> {
        let number = input.int()?;
        let op = input.code()?;
        let metering_end = input.code()?;
        let ac_number = input.int()?;
        let dc_number = input.int()?;
        let neutral_number = input.int()?;
        let ac_bus = input.resolved(resolver.bus(ac_number))?;
        let dc_bus = input.resolved(resolver.dcbus(dc_number))?;
        let neutral_bus = input.resolved(resolver.dcbus(neutral_number))?;
        Ok(AcDcConverterLcc {
            number,
            op,
            metering_end,
            ac_bus,
            dc_bus,
            neutral_bus,
            converter_type: input.code()?,
            nominal_current: input.float()?,
            bridges: input.int()?,
            xc: input.float()?,
            vfs: input.float()?,
            nominal_power: input.float()?,
            tap_min: input.float()?,
            tap_max: input.float()?,
            tap_steps: input.int()?,
            control_mode: input.text()?,
            flow_ac_dc: input.float()?,
            flow_dc_ac: input.float()?,
            rectifier_firing_angle_set: input.float()?,
            rectifier_firing_angle_min: input.float()?,
            rectifier_firing_angle_max: input.float()?,
            inverter_firing_angle_set: input.float()?,
            inverter_firing_angle_min: input.float()?,
            inverter_firing_angle_max: input.float()?,
            ccc_capacitance: input.float()?,
            cost: input.float()?,
            date: input.text()?,
            condition: input.code()?,
            name: input.text()?,
            hz_base: input.int()?,
            status: input.int()?,
            tap: input.float()?,
            setpoint: input.float()?,
        })
    }
}

impl RecordCodec for AcDcConverterVsc {
    const COMMENT: &'static str = "# Cnv#,\"Op\",\"MetEnd\",AcBus#,DcBus#,NeutralBus#,\"CnvMode\",\
                                   \"VoltMode\",Aloss,Bloss,Minloss,FlowAcDc,FlowDcAc,Imax,Pwf,\
                                   Qmin,Qmax,CtrBus#,\"[.Ctr Name.]\",Rmpct,Cost,\"[..Date..]\",\
                                   \"Cnd\",\"[...Name...]\",Stt,Setpoint";
    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::int("Cnv#", 6),
        FieldSpec::code("Op", 1),
        FieldSpec::code("MetEnd", 1),
        FieldSpec::int("AcBus#", 6),
        FieldSpec::int("DcBus#", 6),
        FieldSpec::int("NeutralBus#", 6),
        FieldSpec::text("CnvMode", 1),
        FieldSpec::text("VoltMode", 1),
        FieldSpec::float("Aloss", 8, 3),
        FieldSpec::float("Bloss", 8, 3),
        FieldSpec::float("Minloss", 8, 3),
        FieldSpec::float("FlowAcDc", 8, 3),
        FieldSpec::float("FlowDcAc", 8, 3),
        FieldSpec::float("Imax", 8, 3),
        FieldSpec::float("Pwf", 8, 3),
        FieldSpec::float("Qmin", 8, 3),
        FieldSpec::float("Qmax", 8, 3),
        FieldSpec::int("CtrBus#", 6).optional(),
        FieldSpec::text("CtrName", 12),
        FieldSpec::float("Rmpct", 8, 3),
        FieldSpec::float("Cost", 8, 3).or_float(0.0),
        FieldSpec::text("Date", 10),
        FieldSpec::code("Cnd", 1),
        FieldSpec::text("Name", 12),
        FieldSpec::int("Stt", 1),
        FieldSpec::float("Setpoint", 8, 3),
    ];

    fn encode(&self, file: &NetworkFile, out: &mut RecordWriter) {
        let (ac_bus, _) = bus_label(file, self.ac_bus);
        let (ctr_number, ctr_name) = optional_bus_label(file, self.ctr_bus);
        out.int(self.number)
            .code(self.op)
            .code(self.metering_end)
            .int(ac_bus)
            .int(dcbus_number(file, self.dc_bus))
            .int(dcbus_number(file, self.neutral_bus))
            .text(&self.converter_mode)
            .text(&self.voltage_mode)
            .float(self.a_loss)
            .float(self.b_loss)
            .float(self.min_loss)
            .float(self.flow_ac_dc)
            .float(self.flow_dc_ac)
            .float(self.max_current)
            .float(self.power_factor)
            .float(self.qmin)
            .float(self.qmax)
            .int(ctr_number)
            .text(ctr_name)
            .float(self.rmpct)
            .float(self.cost)
            .text(&self.date)
            .code(self.condition)
            .text(&self.name)
            .int(self.status)
            .float(self.setpoint);
    }

    fn decode(input: &mut RecordReader<'_>, resolver: &Resolver<'_>) -> NpfResult<Self> {
        let number = input.int()?;
        let op = input.code()?;
        let metering_end = input.code()?;
        let ac_number = input.int()?;
        let dc_number = input.int()?;
        let neutral_number = input.int()?;
        let ac_bus = input.resolved(resolver.bus(ac_number))?;
        let dc_bus = input.resolved(resolver.dcbus(dc_number))?;
        let neutral_bus = input.resolved(resolver.dcbus(neutral_number))?;
        let converter_mode = input.text()?;
        let voltage_mode = input.text()?;
        let a_loss = input.float()?;
        let b_loss = input.float()?;
        let min_loss = input.float()?;
        let flow_ac_dc = input.float()?;
        let flow_dc_ac = input.float()?;
        let max_current = input.float()?;
        let power_factor = input.float()?;
        let qmin = input.float()?;
        let qmax = input.float()?;
        let ctr_number = input.optional_key()?;
        let ctr_bus = input.resolved(resolver.optional_bus(ctr_number))?;
        input.skip()?;
        Ok(AcDcConverterVsc {
            number,
            op,
            metering_end,
            ac_bus,
            dc_bus,
            neutral_bus,
            converter_mode,
            voltage_mode,
            a_loss,
            b_loss,
            min_loss,
            flow_ac_dc,
            flow_dc_ac,
            max_current,
            power_factor,
            qmin,
            qmax,
            ctr_bus,
            rmpct: input.float()?,
            cost: input.float()?,
            date: input.text()?,
            condition: input.code()?,
            name: input.text()?,
            status: input.int()?,
            setpoint: input.float()?,
        })
    }
}
