//! Primitive column codec.
//!
//! Every column of every record kind is described by a [`FieldSpec`]: its
//! name (used in error messages), its on-disk format and what an empty token
//! decodes to. Encoding pads but never truncates, so a value wider than its
//! column widens the line instead of losing digits or characters.

use std::borrow::Cow;

use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;
use tracing::warn;

/// On-disk shape of a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldFormat {
    /// Right-aligned decimal integer.
    Int { width: usize },
    /// Right-aligned fixed-point number.
    Float { width: usize, precision: usize },
    /// Quoted free text, left-aligned inside the quotes.
    Text { width: usize },
    /// Quoted enumerated code, left-aligned inside the quotes.
    Code { width: usize },
}

impl FieldFormat {
    fn expected(&self) -> &'static str {
        match self {
            FieldFormat::Int { .. } => "an integer",
            FieldFormat::Float { .. } => "a number",
            FieldFormat::Text { .. } => "text",
            FieldFormat::Code { .. } => "a code",
        }
    }
}

/// Value an empty token decodes to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OnEmpty {
    /// Empty is malformed (empty text is still valid text).
    Error,
    Int(i64),
    Float(f64),
    Text(&'static str),
    /// Empty means "no value" (optional references).
    Absent,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub format: FieldFormat,
    pub on_empty: OnEmpty,
}

impl FieldSpec {
    pub const fn int(name: &'static str, width: usize) -> Self {
        Self {
            name,
            format: FieldFormat::Int { width },
            on_empty: OnEmpty::Error,
        }
    }

    pub const fn float(name: &'static str, width: usize, precision: usize) -> Self {
        Self {
            name,
            format: FieldFormat::Float { width, precision },
            on_empty: OnEmpty::Error,
        }
    }

    pub const fn text(name: &'static str, width: usize) -> Self {
        Self {
            name,
            format: FieldFormat::Text { width },
            on_empty: OnEmpty::Error,
        }
    }

    pub const fn code(name: &'static str, width: usize) -> Self {
        Self {
            name,
            format: FieldFormat::Code { width },
            on_empty: OnEmpty::Error,
        }
    }

    pub const fn or_int(mut self, value: i64) -> Self {
        self.on_empty = OnEmpty::Int(value);
        self
    }

    pub const fn or_float(mut self, value: f64) -> Self {
        self.on_empty = OnEmpty::Float(value);
        self
    }

    pub const fn or_text(mut self, value: &'static str) -> Self {
        self.on_empty = OnEmpty::Text(value);
        self
    }

    /// Empty tokens decode to [`Scalar::Absent`].
    pub const fn optional(mut self) -> Self {
        self.on_empty = OnEmpty::Absent;
        self
    }
}

/// A decoded column value, or a value about to be encoded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Int(i64),
    Float(f64),
    Text(&'a str),
    Absent,
}

/// A token that does not match its column's format.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("field {field} expected {expected}, found {value:?}")]
pub struct FieldError {
    pub field: &'static str,
    pub value: String,
    pub expected: &'static str,
}

fn escape_text<'a>(field: &'static str, text: &'a str) -> Cow<'a, str> {
    if !text.contains(['"', '\n', '\r']) {
        return Cow::Borrowed(text);
    }
    if text.contains(['\n', '\r']) {
        warn!("field {} contains a line break, replaced by a space", field);
    }
    Cow::Owned(text.replace('"', "\"\"").replace(['\n', '\r'], " "))
}

/// Render one column.
///
/// Integers written to a float column are widened; floats written to an
/// integer column are rounded. [`Scalar::Absent`] renders as an empty column.
pub fn encode_field(value: &Scalar<'_>, spec: &FieldSpec) -> String {
    match (spec.format, value) {
        (_, Scalar::Absent) => String::new(),
        (FieldFormat::Int { width }, Scalar::Int(v)) => format!("{:>width$}", v),
        (FieldFormat::Int { width }, Scalar::Float(v)) => format!("{:>width$}", v.round() as i64),
        (FieldFormat::Float { width, precision }, Scalar::Float(v)) => {
            format!("{:width$.precision$}", v)
        }
        (FieldFormat::Float { width, precision }, Scalar::Int(v)) => {
            format!("{:width$.precision$}", *v as f64)
        }
        (FieldFormat::Int { width } | FieldFormat::Float { width, .. }, Scalar::Text(s)) => {
            format!("{:>width$}", s)
        }
        (FieldFormat::Text { width } | FieldFormat::Code { width }, Scalar::Text(s)) => {
            format!("\"{:<width$}\"", escape_text(spec.name, s))
        }
        (FieldFormat::Text { width } | FieldFormat::Code { width }, Scalar::Int(v)) => {
            format!("\"{:<width$}\"", v)
        }
        (FieldFormat::Text { width } | FieldFormat::Code { width }, Scalar::Float(v)) => {
            format!("\"{:<width$}\"", v)
        }
    }
}

/// Strip surrounding whitespace and, if present, one pair of quotes.
///
/// The tokenizer already removes quotes; tokens handed in directly may still
/// carry them. Whitespace inside the quotes is padding and is dropped too.
fn unquote(token: &str) -> &str {
    let token = token.trim();
    if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
        token[1..token.len() - 1].trim()
    } else {
        token
    }
}

/// Decode one column token.
pub fn decode_field<'a>(token: &'a str, spec: &FieldSpec) -> Result<Scalar<'a>, FieldError> {
    let text = unquote(token);
    let malformed = || FieldError {
        field: spec.name,
        value: text.to_string(),
        expected: spec.format.expected(),
    };

    if text.is_empty() {
        return match (spec.on_empty, spec.format) {
            (OnEmpty::Int(v), _) => Ok(Scalar::Int(v)),
            (OnEmpty::Float(v), _) => Ok(Scalar::Float(v)),
            (OnEmpty::Text(v), _) => Ok(Scalar::Text(v)),
            (OnEmpty::Absent, _) => Ok(Scalar::Absent),
            (OnEmpty::Error, FieldFormat::Text { .. }) => Ok(Scalar::Text("")),
            (OnEmpty::Error, _) => Err(malformed()),
        };
    }

    match spec.format {
        FieldFormat::Int { .. } => text.parse::<i64>().map(Scalar::Int).map_err(|_| malformed()),
        FieldFormat::Float { .. } => text.parse::<f64>().map(Scalar::Float).map_err(|_| malformed()),
        FieldFormat::Text { .. } | FieldFormat::Code { .. } => Ok(Scalar::Text(text)),
    }
}

/// Drop whitespace between a delimiter and an opening quote.
///
/// The csv reader only honours a quote as the first character of a field, so
/// `1, "a, b"` would otherwise split inside the quotes.
fn tighten_quotes(line: &str) -> Cow<'_, str> {
    let mut fields = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    let mut closed_at = None;
    for (pos, c) in line.char_indices() {
        match c {
            '"' if quoted => {
                quoted = false;
                closed_at = Some(pos);
            }
            // Opening quote, or the second half of a doubled quote.
            '"' if closed_at.map(|p| p + 1) == Some(pos)
                || line[start..pos].trim().is_empty() =>
            {
                quoted = true;
            }
            ',' if !quoted => {
                fields.push(&line[start..pos]);
                start = pos + 1;
            }
            _ => {}
        }
    }
    fields.push(&line[start..]);

    let padded =
        |field: &&str| field.starts_with(char::is_whitespace) && field.trim_start().starts_with('"');
    if !fields.iter().any(padded) {
        return Cow::Borrowed(line);
    }
    let tightened: Vec<&str> = fields
        .into_iter()
        .map(|field| {
            let trimmed = field.trim_start();
            if trimmed.starts_with('"') {
                trimmed
            } else {
                field
            }
        })
        .collect();
    Cow::Owned(tightened.join(","))
}

/// Split one (already trimmed) data line into column tokens.
///
/// Quoting follows RFC 4180: commas inside quotes do not split and a doubled
/// quote stands for one quote character. Quoted fields may be preceded by
/// whitespace.
pub fn tokenize(line: &str) -> Result<StringRecord, csv::Error> {
    let line = tighten_quotes(line);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(line.as_bytes());
    let mut record = StringRecord::new();
    reader.read_record(&mut record)?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_are_right_aligned() {
        let spec = FieldSpec::int("Bus#", 6);
        assert_eq!(encode_field(&Scalar::Int(42), &spec), "    42");
        assert_eq!(encode_field(&Scalar::Int(-3), &spec), "    -3");
        assert_eq!(encode_field(&Scalar::Int(12345678), &spec), "12345678");
    }

    #[test]
    fn floats_use_fixed_precision() {
        let spec = FieldSpec::float("kV", 8, 2);
        assert_eq!(encode_field(&Scalar::Float(138.0), &spec), "  138.00");
        assert_eq!(encode_field(&Scalar::Float(-0.125), &FieldSpec::float("X", 8, 3)), "  -0.125");
        assert_eq!(encode_field(&Scalar::Int(1), &FieldSpec::float("V", 8, 4)), "  1.0000");
    }

    #[test]
    fn text_is_quoted_padded_and_never_truncated() {
        let spec = FieldSpec::text("Name", 12);
        assert_eq!(encode_field(&Scalar::Text("Bus 1"), &spec), "\"Bus 1       \"");
        assert_eq!(
            encode_field(&Scalar::Text("A much longer name"), &spec),
            "\"A much longer name\""
        );
        assert_eq!(encode_field(&Scalar::Text("A"), &FieldSpec::code("Op", 1)), "\"A\"");
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let spec = FieldSpec::text("Name", 4);
        assert_eq!(encode_field(&Scalar::Text("a\"b"), &spec), "\"a\"\"b\"");
        assert_eq!(encode_field(&Scalar::Text("a\nb"), &spec), "\"a b \"");
    }

    #[test]
    fn decode_trims_and_parses() {
        assert_eq!(decode_field("   42", &FieldSpec::int("N", 6)).unwrap(), Scalar::Int(42));
        assert_eq!(
            decode_field("  1.5000", &FieldSpec::float("V", 8, 4)).unwrap(),
            Scalar::Float(1.5)
        );
        assert_eq!(
            decode_field("Bus 1       ", &FieldSpec::text("Name", 12)).unwrap(),
            Scalar::Text("Bus 1")
        );
        assert_eq!(
            decode_field(" \"SY\" ", &FieldSpec::text("ID", 2)).unwrap(),
            Scalar::Text("SY")
        );
    }

    #[test]
    fn empty_tokens_follow_the_column_policy() {
        assert_eq!(
            decode_field("", &FieldSpec::float("LengthKm", 8, 3).or_float(1.0)).unwrap(),
            Scalar::Float(1.0)
        );
        assert_eq!(
            decode_field("  ", &FieldSpec::int("Stt", 1).or_int(1)).unwrap(),
            Scalar::Int(1)
        );
        assert_eq!(
            decode_field("", &FieldSpec::int("CtrBus", 6).optional()).unwrap(),
            Scalar::Absent
        );
        assert_eq!(decode_field("", &FieldSpec::text("Name", 12)).unwrap(), Scalar::Text(""));
        assert!(decode_field("", &FieldSpec::int("Bus#", 6)).is_err());
        assert!(decode_field("", &FieldSpec::code("Op", 1)).is_err());
    }

    #[test]
    fn malformed_numbers_are_reported() {
        let err = decode_field("12a", &FieldSpec::int("Bus#", 6)).unwrap_err();
        assert_eq!(err.field, "Bus#");
        assert_eq!(err.value, "12a");
        assert_eq!(err.expected, "an integer");
        assert!(decode_field("1.5", &FieldSpec::int("Units", 3)).is_err());
        assert!(decode_field("x", &FieldSpec::float("R%", 8, 3)).is_err());
    }

    #[test]
    fn tokenize_respects_quotes() {
        let record = tokenize("     1,\"Bus, one   \",\"A\",  138.00").unwrap();
        assert_eq!(record.len(), 4);
        assert_eq!(&record[0], "1");
        assert_eq!(&record[1], "Bus, one");
        assert_eq!(&record[2], "A");
        assert_eq!(&record[3], "138.00");
    }

    #[test]
    fn quoted_fields_after_padding_keep_their_commas() {
        let record = tokenize("\"SY\", \"Main, one\",   1").unwrap();
        assert_eq!(record.len(), 3);
        assert_eq!(&record[1], "Main, one");
        assert_eq!(&record[2], "1");

        let record = tokenize("  7,\t\"say \"\"a, b\"\"\" , \"x\"").unwrap();
        assert_eq!(record.len(), 3);
        assert_eq!(&record[1], "say \"a, b\"");
        assert_eq!(&record[2], "x");
    }

    #[test]
    fn unpadded_lines_are_tokenized_as_is() {
        assert!(matches!(tighten_quotes("1,\"a, b\",2"), Cow::Borrowed(_)));
        assert!(matches!(tighten_quotes("  1,2"), Cow::Borrowed(_)));
    }

    #[test]
    fn surrounding_spaces_inside_text_are_padding() {
        let spec = FieldSpec::text("Name", 4);
        let line = encode_field(&Scalar::Text("  ab  "), &spec);
        assert_eq!(line, "\"  ab  \"");
        let record = tokenize(&line).unwrap();
        assert_eq!(decode_field(&record[0], &spec).unwrap(), Scalar::Text("ab"));
    }

    #[test]
    fn doubled_quotes_round_trip() {
        let spec = FieldSpec::text("Name", 12);
        let line = format!("{},{}", encode_field(&Scalar::Text("say \"hi\""), &spec), 5);
        let record = tokenize(&line).unwrap();
        assert_eq!(decode_field(&record[0], &spec).unwrap(), Scalar::Text("say \"hi\""));
    }
}
