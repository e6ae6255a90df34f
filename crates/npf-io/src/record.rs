//! Typed access to the columns of one data line.
//!
//! A record codec reads its columns front to back through a [`RecordReader`]
//! and writes them through a [`RecordWriter`]; both walk the kind's schema so
//! the codec only states values, never widths or empty-token policies.

use csv::StringRecord;
use npf_core::{Code, NetworkFile, NpfError, NpfResult, Resolver, SectionKind};

use crate::field::{decode_field, encode_field, FieldError, FieldSpec, Scalar};

/// Binding between an entity type and its on-disk record.
pub trait RecordCodec: Sized {
    /// Comment line written under the section header.
    const COMMENT: &'static str;
    /// Column layout.
    const SCHEMA: &'static [FieldSpec];
    /// Prefix of every data line.
    const INDENT: &'static str = "";

    /// Write every column. References are rendered through `file`.
    fn encode(&self, file: &NetworkFile, out: &mut RecordWriter);

    /// Read every column, resolving references against the records loaded so far.
    fn decode(input: &mut RecordReader<'_>, resolver: &Resolver<'_>) -> NpfResult<Self>;
}

/// Cursor over the columns of one tokenized data line.
pub struct RecordReader<'r> {
    section: SectionKind,
    line: usize,
    schema: &'static [FieldSpec],
    record: &'r StringRecord,
    pos: usize,
}

impl<'r> RecordReader<'r> {
    /// Fails unless the line has exactly one token per schema column.
    pub fn new(
        section: SectionKind,
        line: usize,
        schema: &'static [FieldSpec],
        record: &'r StringRecord,
    ) -> NpfResult<Self> {
        if record.len() != schema.len() {
            return Err(NpfError::MalformedRecord {
                section,
                line,
                message: format!("expected {} columns, found {}", schema.len(), record.len()),
            });
        }
        Ok(Self {
            section,
            line,
            schema,
            record,
            pos: 0,
        })
    }

    pub fn section(&self) -> SectionKind {
        self.section
    }

    pub fn line(&self) -> usize {
        self.line
    }

    fn malformed(&self, err: FieldError) -> NpfError {
        NpfError::MalformedField {
            section: self.section,
            line: self.line,
            field: err.field,
            value: err.value,
            expected: err.expected,
        }
    }

    fn next(&mut self) -> NpfResult<(Scalar<'r>, &'static FieldSpec)> {
        let record: &'r StringRecord = self.record;
        let (Some(spec), Some(token)) = (self.schema.get(self.pos), record.get(self.pos)) else {
            return Err(NpfError::MalformedRecord {
                section: self.section,
                line: self.line,
                message: format!("column {} is past the end of the record", self.pos + 1),
            });
        };
        self.pos += 1;
        let value = decode_field(token, spec).map_err(|e| self.malformed(e))?;
        Ok((value, spec))
    }

    fn type_mismatch(&self, spec: &FieldSpec, value: &Scalar<'_>, expected: &'static str) -> NpfError {
        let value = match value {
            Scalar::Int(v) => v.to_string(),
            Scalar::Float(v) => v.to_string(),
            Scalar::Text(v) => v.to_string(),
            Scalar::Absent => String::new(),
        };
        self.malformed(FieldError {
            field: spec.name,
            value,
            expected,
        })
    }

    /// Integer column, range-checked against the target type.
    pub fn int<T: TryFrom<i64>>(&mut self) -> NpfResult<T> {
        let (value, spec) = self.next()?;
        match value {
            Scalar::Int(v) => {
                T::try_from(v).map_err(|_| self.type_mismatch(spec, &value, "an integer in range"))
            }
            other => Err(self.type_mismatch(spec, &other, "an integer")),
        }
    }

    pub fn float(&mut self) -> NpfResult<f64> {
        let (value, spec) = self.next()?;
        match value {
            Scalar::Float(v) => Ok(v),
            Scalar::Int(v) => Ok(v as f64),
            other => Err(self.type_mismatch(spec, &other, "a number")),
        }
    }

    /// Text column, trimmed.
    pub fn text(&mut self) -> NpfResult<String> {
        let (value, spec) = self.next()?;
        match value {
            Scalar::Text(v) => Ok(v.to_string()),
            other => Err(self.type_mismatch(spec, &other, "text")),
        }
    }

    pub fn code<T: Code>(&mut self) -> NpfResult<T> {
        let (value, spec) = self.next()?;
        match value {
            Scalar::Text(v) => T::parse_code(v).map_err(|_| self.type_mismatch(spec, &value, T::NAME)),
            other => Err(self.type_mismatch(spec, &other, T::NAME)),
        }
    }

    /// Optional reference column: an empty token or `0` means no referent.
    pub fn optional_key(&mut self) -> NpfResult<Option<i64>> {
        let (value, spec) = self.next()?;
        match value {
            Scalar::Absent | Scalar::Int(0) => Ok(None),
            Scalar::Int(v) => Ok(Some(v)),
            other => Err(self.type_mismatch(spec, &other, "an integer")),
        }
    }

    /// Pass over a column whose value is derived from a referent.
    pub fn skip(&mut self) -> NpfResult<()> {
        if self.pos >= self.schema.len() {
            return Err(NpfError::MalformedRecord {
                section: self.section,
                line: self.line,
                message: format!("column {} is past the end of the record", self.pos + 1),
            });
        }
        self.pos += 1;
        Ok(())
    }

    /// Attach this record's position to a lookup failure.
    pub fn resolved<T>(&self, lookup: NpfResult<T>) -> NpfResult<T> {
        lookup.map_err(|e| e.in_record(self.section, self.line))
    }
}

/// Builder for one data line.
pub struct RecordWriter {
    schema: &'static [FieldSpec],
    columns: Vec<String>,
}

impl RecordWriter {
    pub fn new(schema: &'static [FieldSpec]) -> Self {
        Self {
            schema,
            columns: Vec::with_capacity(schema.len()),
        }
    }

    fn push(&mut self, value: Scalar<'_>) -> &mut Self {
        debug_assert!(
            self.columns.len() < self.schema.len(),
            "more columns written than the schema declares"
        );
        if let Some(spec) = self.schema.get(self.columns.len()) {
            self.columns.push(encode_field(&value, spec));
        }
        self
    }

    pub fn int(&mut self, value: impl Into<i64>) -> &mut Self {
        self.push(Scalar::Int(value.into()))
    }

    pub fn float(&mut self, value: f64) -> &mut Self {
        self.push(Scalar::Float(value))
    }

    pub fn text(&mut self, value: &str) -> &mut Self {
        self.push(Scalar::Text(value))
    }

    pub fn code<T: Code>(&mut self, value: T) -> &mut Self {
        self.push(Scalar::Text(value.code()))
    }

    /// Join the columns into a line (without indent or line ending).
    pub fn finish(self) -> String {
        debug_assert_eq!(
            self.columns.len(),
            self.schema.len(),
            "record written with missing columns"
        );
        self.columns.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::tokenize;
    use npf_core::{KeyIndex, Op};

    const SCHEMA: &[FieldSpec] = &[
        FieldSpec::int("Bus#", 6),
        FieldSpec::text("Name", 12),
        FieldSpec::code("Op", 1),
        FieldSpec::float("kV", 8, 2),
        FieldSpec::int("CtrBus", 6).optional(),
        FieldSpec::int("Stt", 1).or_int(1),
    ];

    #[test]
    fn writer_walks_the_schema() {
        let mut out = RecordWriter::new(SCHEMA);
        out.int(12)
            .text("North")
            .code(Op::Modify)
            .float(230.0)
            .int(0)
            .int(1u8);
        assert_eq!(
            out.finish(),
            "    12,\"North       \",\"M\",  230.00,     0,1"
        );
    }

    #[test]
    fn reader_decodes_typed_columns() {
        let record = tokenize("    12,\"North       \",\"M\",  230.00,     0,").unwrap();
        let mut input = RecordReader::new(SectionKind::Bus, 7, SCHEMA, &record).unwrap();
        assert_eq!(input.int::<i64>().unwrap(), 12);
        assert_eq!(input.text().unwrap(), "North");
        assert_eq!(input.code::<Op>().unwrap(), Op::Modify);
        assert_eq!(input.float().unwrap(), 230.0);
        assert_eq!(input.optional_key().unwrap(), None);
        assert_eq!(input.int::<u8>().unwrap(), 1);
    }

    #[test]
    fn column_count_is_checked() {
        let record = tokenize("1,\"a\"").unwrap();
        let err = RecordReader::new(SectionKind::Bus, 3, SCHEMA, &record).err().unwrap();
        match err {
            NpfError::MalformedRecord { section, line, message } => {
                assert_eq!(section, SectionKind::Bus);
                assert_eq!(line, 3);
                assert!(message.contains("expected 6 columns, found 2"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn out_of_range_integers_are_malformed() {
        let record = tokenize("1,\"a\",\"A\",1.0,0,7000").unwrap();
        let mut input = RecordReader::new(SectionKind::Bus, 1, SCHEMA, &record).unwrap();
        input.skip().unwrap();
        input.skip().unwrap();
        input.skip().unwrap();
        input.skip().unwrap();
        input.skip().unwrap();
        match input.int::<u8>() {
            Err(NpfError::MalformedField { field, value, .. }) => {
                assert_eq!(field, "Stt");
                assert_eq!(value, "7000");
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn unknown_codes_are_malformed() {
        let record = tokenize("1,\"a\",\"X\",1.0,0,1").unwrap();
        let mut input = RecordReader::new(SectionKind::Bus, 4, SCHEMA, &record).unwrap();
        input.skip().unwrap();
        input.skip().unwrap();
        assert!(matches!(
            input.code::<Op>(),
            Err(NpfError::MalformedField { field: "Op", line: 4, .. })
        ));
    }

    #[test]
    fn lookup_failures_gain_position() {
        let file = NetworkFile::new();
        let index = KeyIndex::new();
        let resolver = Resolver::new(&file, &index);
        let record = tokenize("1,\"a\",\"A\",1.0,0,1").unwrap();
        let input = RecordReader::new(SectionKind::Demand, 9, SCHEMA, &record).unwrap();
        match input.resolved(resolver.bus(1)) {
            Err(NpfError::UnresolvedReference { section, line, kind, .. }) => {
                assert_eq!(section, SectionKind::Demand);
                assert_eq!(line, 9);
                assert_eq!(kind, SectionKind::Bus);
            }
            other => panic!("unexpected result {other:?}"),
        }
    }
}
