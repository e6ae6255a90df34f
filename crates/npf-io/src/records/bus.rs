use npf_core::{Bus, NetworkFile, NpfResult, Resolver};

use super::admin_numbers;
use crate::field::FieldSpec;
use crate::record::{RecordCodec, RecordReader, RecordWriter};

// Shared by BUS and MIDDLEPOINT_BUS.
impl RecordCodec for Bus {
    const COMMENT: &'static str = "# Bus#,\"[...Name...]\",\"Op\",[.kV.],Area#,Region#,System#,\
                                   \"[..Date..]\",\"Cnd\",Cost,Type,LoadShed,Volt,Angle,Vmax,\
                                   Vmin,EVmax,EVmin,Stt,\"[....Extended Name.....]\"";
    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::int("Bus#", 6),
        FieldSpec::text("Name", 12),
        FieldSpec::code("Op", 1),
        FieldSpec::float("kV", 8, 2),
        FieldSpec::int("Area#", 2),
        FieldSpec::int("Region#", 2),
        FieldSpec::int("System#", 2),
        FieldSpec::text("Date", 10),
        FieldSpec::code("Cnd", 1),
        FieldSpec::float("Cost", 7, 2),
        FieldSpec::int("Type", 1),
        FieldSpec::int("LoadShed", 1),
        FieldSpec::float("Volt", 8, 4),
        FieldSpec::float("Angle", 8, 4),
        FieldSpec::float("Vmax", 8, 3),
        FieldSpec::float("Vmin", 8, 3),
        FieldSpec::float("EVmax", 8, 3),
        FieldSpec::float("EVmin", 8, 3),
        FieldSpec::int("Stt", 1),
        FieldSpec::text("ExtendedName", 24),
    ];

    fn encode(&self, file: &NetworkFile, out: &mut RecordWriter) {
        let (area, region, system) = admin_numbers(file, self.area, self.region, self.system);
        out.int(self.number)
            .text(&self.name)
            .code(self.op)
            .float(self.kv_base)
            .int(area)
            .int(region)
            .int(system)
            .text(&self.date)
            .code(self.condition)
            .float(self.cost)
            .int(self.bus_type)
            .int(self.load_shed)
            .float(self.voltage)
            .float(self.angle)
            .float(self.vmax)
            .float(self.vmin)
            .float(self.emergency_vmax)
            .float(self.emergency_vmin)
            .int(self.status)
            .text(&self.extended_name);
    }

    fn decode(input: &mut RecordReader<'_>, resolver: &Resolver<'_>) -> NpfResult<Self> {
        let number = input.int()?;
        let name = input.text()?;
        let op = input.code()?;
        let kv_base = input.float()?;
        let area_number = input.int()?;
        let region_number = input.int()?;
        let system_number = input.int()?;

        let system = input.resolved(resolver.system(system_number))?;
        let area = input.resolved(resolver.area(area_number))?;
        let region = input.resolved(resolver.region(region_number))?;

        Ok(Bus {
            number,
            name,
            op,
            kv_base,
            area,
            region,
            system,
            date: input.text()?,
            condition: input.code()?,
            cost: input.float()?,
            bus_type: input.int()?,
            load_shed: input.int()?,
            voltage: input.float()?,
            angle: input.float()?,
            vmax: input.float()?,
            vmin: input.float()?,
            emergency_vmax: input.float()?,
            emergency_vmin: input.float()?,
            status: input.int()?,
            extended_name: input.text()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{decode_line, encode_one};
    use npf_core::{Area, Condition, NpfError, Op, Region, SectionKind, System};

    fn admin() -> NetworkFile {
        let mut file = NetworkFile::new();
        let system = file.add_system(System::new("SY", "System", 1));
        file.add_region(Region::new("RE", "Region", 3, system));
        file.add_area(Area::new("AR", "Area", 2, system));
        file
    }

    #[test]
    fn bus_line_layout() {
        let file = admin();
        let bus = Bus::new(
            101,
            "Alpha",
            file.find_area(2).unwrap(),
            file.find_region(3).unwrap(),
            file.find_system(1).unwrap(),
        )
        .with_kv_base(138.0);
        assert_eq!(
            encode_one(&bus, &file),
            "   101,\"Alpha       \",\"A\",  138.00, 2, 3, 1,\"1900/01/01\",\"R\",   0.00,0,0,  \
             1.0000,  0.0000,   1.200,   0.800,   1.200,   0.800,1,\"                        \""
        );
    }

    #[test]
    fn bus_decodes_every_column() {
        let file = admin();
        let bus: Bus = decode_line(
            SectionKind::Bus,
            "5,\"Beta\",\"M\",230,2,3,1,\"2020/01/01\",\"P\",1.5,1,0,1.02,-3.5,1.1,0.9,1.15,0.85,0,\"Beta ext\"",
            &file,
        )
        .unwrap();
        assert_eq!(bus.number, 5);
        assert_eq!(bus.name, "Beta");
        assert_eq!(bus.op, Op::Modify);
        assert_eq!(bus.kv_base, 230.0);
        assert_eq!(bus.area, file.find_area(2).unwrap());
        assert_eq!(bus.region, file.find_region(3).unwrap());
        assert_eq!(bus.condition, Condition::Planned);
        assert_eq!(bus.angle, -3.5);
        assert_eq!(bus.status, 0);
        assert_eq!(bus.extended_name, "Beta ext");
    }

    #[test]
    fn bus_resolves_system_before_area() {
        let file = admin();
        let err = decode_line::<Bus>(
            SectionKind::Bus,
            "5,\"Beta\",\"A\",230,9,3,8,\"\",\"R\",0,0,0,1,0,1,1,1,1,1,\"\"",
            &file,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            NpfError::UnresolvedReference {
                kind: SectionKind::System,
                ..
            }
        ));
    }
}
