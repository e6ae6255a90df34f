//! Error types for NetPlan network files
//!
//! Every failure while loading or saving a network file is reported through
//! [`NpfError`]. Loading is all-or-nothing: the first error aborts the whole
//! operation and no partially built [`crate::NetworkFile`] escapes.
//!
//! # Example
//!
//! ```ignore
//! use npf_core::{NpfError, NpfResult};
//!
//! fn count_buses(text: &str) -> NpfResult<usize> {
//!     let file = npf_io::from_text(text)?;
//!     Ok(file.buses.len())
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::section::SectionKind;

/// Key used to look up a referenced record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKey {
    /// Integer `number` column (buses, systems, areas, DC links, ...)
    Number(i64),
    /// Unique name (winding transformers of a three-winding transformer)
    Name(String),
    /// Series element identity: (from bus, to bus, parallel circuit)
    Circuit { from: i64, to: i64, circuit: i64 },
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Number(number) => write!(f, "#{}", number),
            RecordKey::Name(name) => write!(f, "\"{}\"", name),
            RecordKey::Circuit { from, to, circuit } => {
                write!(f, "from bus #{} to bus #{} circuit #{}", from, to, circuit)
            }
        }
    }
}

/// Errors raised while building, loading or saving a network file.
#[derive(Error, Debug)]
pub enum NpfError {
    /// A scalar token does not parse as its declared type.
    #[error("{section} line {line}: field {field} expected {expected}, found {value:?}")]
    MalformedField {
        section: SectionKind,
        line: usize,
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    /// A data line cannot be split into the section's columns.
    #[error("{section} line {line}: {message}")]
    MalformedRecord {
        section: SectionKind,
        line: usize,
        message: String,
    },

    /// A foreign key does not match any record decoded so far.
    #[error("{section} line {line}: could not find {kind} {key}")]
    UnresolvedReference {
        section: SectionKind,
        line: usize,
        kind: SectionKind,
        key: RecordKey,
    },

    /// Lookup failure outside of a decoding context.
    #[error("could not find {kind} {key}")]
    NotFound { kind: SectionKind, key: RecordKey },

    /// A handle passed to a `remove_*` operation points past its sequence.
    #[error("no {kind} record at position {index}")]
    InvalidHandle { kind: SectionKind, index: usize },

    /// A record cannot be removed while another record refers to it.
    #[error("{kind} record at position {index} is still referenced by a {by} record")]
    StillReferenced {
        kind: SectionKind,
        index: usize,
        by: SectionKind,
    },

    /// A line outside any section that is neither a header nor a top-level tag.
    #[error("line {line}: unknown section {content:?}")]
    UnknownSection { line: usize, content: String },

    /// A top-level tag is missing its value line or the value does not parse.
    #[error("line {line}: {tag} {message}")]
    MalformedHeader {
        line: usize,
        tag: &'static str,
        message: String,
    },

    /// The file declares a format revision this codec does not understand.
    #[error("unsupported NPF revision {found} (supported: {supported})")]
    UnsupportedRevision { found: i64, supported: i64 },

    /// Configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Underlying stream failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl NpfError {
    /// Attach decoding context to a lookup failure.
    ///
    /// [`NpfError::NotFound`] becomes [`NpfError::UnresolvedReference`] for the
    /// given section and line; every other error is returned unchanged.
    pub fn in_record(self, section: SectionKind, line: usize) -> Self {
        match self {
            NpfError::NotFound { kind, key } => NpfError::UnresolvedReference {
                section,
                line,
                kind,
                key,
            },
            other => other,
        }
    }
}

/// Convenience type alias for Results using NpfError.
pub type NpfResult<T> = Result<T, NpfError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_gains_record_context() {
        let err = NpfError::NotFound {
            kind: SectionKind::Line,
            key: RecordKey::Circuit {
                from: 1,
                to: 2,
                circuit: 3,
            },
        }
        .in_record(SectionKind::LineShunt, 42);

        match &err {
            NpfError::UnresolvedReference {
                section,
                line,
                kind,
                ..
            } => {
                assert_eq!(*section, SectionKind::LineShunt);
                assert_eq!(*line, 42);
                assert_eq!(*kind, SectionKind::Line);
            }
            other => panic!("unexpected error {other:?}"),
        }
        let message = err.to_string();
        assert!(message.contains("LINE_SHUNT line 42"));
        assert!(message.contains("from bus #1 to bus #2 circuit #3"));
    }

    #[test]
    fn other_errors_pass_through_in_record() {
        let err = NpfError::Config("bad".into()).in_record(SectionKind::Bus, 1);
        assert!(matches!(err, NpfError::Config(_)));
    }

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: NpfError = io_err.into();
        assert!(matches!(err, NpfError::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }
}
