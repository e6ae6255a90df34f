use npf_core::{Area, NetworkFile, NpfResult, Region, Resolver, SectionKind, System, SystemRef};

use super::dangling;
use crate::field::FieldSpec;
use crate::record::{RecordCodec, RecordReader, RecordWriter};

fn system_label(file: &NetworkFile, handle: SystemRef) -> (i64, &str) {
    match file.system(handle) {
        Some(system) => (system.number, system.id.as_str()),
        None => {
            dangling(SectionKind::System, handle.index());
            (0, "")
        }
    }
}

impl RecordCodec for System {
    const COMMENT: &'static str = "# \"ID\",\"[.......Name.......]\",System#";
    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::text("ID", 2),
        FieldSpec::text("Name", 20),
        FieldSpec::int("System#", 7),
    ];
    const INDENT: &'static str = "  ";

    fn encode(&self, _file: &NetworkFile, out: &mut RecordWriter) {
        out.text(&self.id).text(&self.name).int(self.number);
    }

    fn decode(input: &mut RecordReader<'_>, _resolver: &Resolver<'_>) -> NpfResult<Self> {
        Ok(System {
            id: input.text()?,
            name: input.text()?,
            number: input.int()?,
        })
    }
}

impl RecordCodec for Region {
    const COMMENT: &'static str = "# [ID],\"[........Name......]\",Region#,System#,\"SystemID\"";
    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::text("ID", 2),
        FieldSpec::text("Name", 12),
        FieldSpec::int("Region#", 7),
        FieldSpec::int("System#", 7),
        FieldSpec::text("SystemID", 2),
    ];
    const INDENT: &'static str = "  ";

    fn encode(&self, file: &NetworkFile, out: &mut RecordWriter) {
        let (system_number, system_id) = system_label(file, self.system);
        out.text(&self.id)
            .text(&self.name)
            .int(self.number)
            .int(system_number)
            .text(system_id);
    }

    fn decode(input: &mut RecordReader<'_>, resolver: &Resolver<'_>) -> NpfResult<Self> {
        let id = input.text()?;
        let name = input.text()?;
        let number = input.int()?;
        let system_number = input.int()?;
        let system = input.resolved(resolver.system(system_number))?;
        input.skip()?;
        Ok(Region {
            id,
            name,
            number,
            system,
        })
    }
}

impl RecordCodec for Area {
    const COMMENT: &'static str =
        "# \"[ID]\",\"[.............Area Name............]\",Area#,System#,\"SystemID\"";
    const SCHEMA: &'static [FieldSpec] = &[
        FieldSpec::text("ID", 4),
        FieldSpec::text("Name", 36),
        FieldSpec::int("Area#", 5),
        FieldSpec::int("System#", 7),
        FieldSpec::text("SystemID", 2),
    ];
    const INDENT: &'static str = "  ";

    fn encode(&self, file: &NetworkFile, out: &mut RecordWriter) {
        let (system_number, system_id) = system_label(file, self.system);
        out.text(&self.id)
            .text(&self.name)
            .int(self.number)
            .int(system_number)
            .text(system_id);
    }

    fn decode(input: &mut RecordReader<'_>, resolver: &Resolver<'_>) -> NpfResult<Self> {
        let id = input.text()?;
        let name = input.text()?;
        let number = input.int()?;
        let system_number = input.int()?;
        let system = input.resolved(resolver.system(system_number))?;
        input.skip()?;
        Ok(Area {
            id,
            name,
            number,
            system,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{decode_line, encode_one as encode};
    use npf_core::NpfError;

    #[test]
    fn system_line_layout() {
        let file = NetworkFile::new();
        let line = encode(&System::new("SY", "Main", 1), &file);
        assert_eq!(line, "  \"SY\",\"Main                \",      1");
    }

    #[test]
    fn region_writes_system_number_and_id() {
        let mut file = NetworkFile::new();
        let system = file.add_system(System::new("SY", "Main", 4));
        let line = encode(&Region::new("R1", "North", 2, system), &file);
        assert_eq!(line, "  \"R1\",\"North       \",      2,      4,\"SY\"");
    }

    #[test]
    fn area_resolves_its_system() {
        let mut file = NetworkFile::new();
        file.add_system(System::new("SY", "Main", 4));

        let area: Area = decode_line(SectionKind::Area, "  \"AR1\",\"Area one\",10,4,\"XX\"", &file).unwrap();
        assert_eq!(area.id, "AR1");
        assert_eq!(area.number, 10);
        assert_eq!(area.system, SystemRef::new(0));

        assert!(matches!(
            decode_line::<Area>(SectionKind::Area, "\"AR2\",\"Area two\",11,5,\"\"", &file),
            Err(NpfError::UnresolvedReference {
                section: SectionKind::Area,
                line: 1,
                kind: SectionKind::System,
                ..
            })
        ));
    }
}
