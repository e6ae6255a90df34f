//! Line-oriented section reader.
//!
//! The reader walks the input once. Outside a section it accepts the
//! `NPF_REVISION` and `DESCRIPTION` tags (each followed by its value line) and
//! section headers; inside a section every line is a data record until `END`
//! or the end of input. Blank lines and comment lines are skipped everywhere
//! except in a tag's value line. The first non-blank line after a header is
//! also skipped when it is a column comment, even if the configured comment
//! marker differs.
//!
//! References are resolved as records arrive, so a record pointing into a
//! section that has not been read yet fails immediately.

use std::io::BufRead;

use npf_core::defaults::SUPPORTED_REVISION;
use npf_core::{KeyIndex, NetworkFile, NpfError, NpfResult, SectionKind};
use tracing::{debug, warn};

use crate::config::ReaderConfig;
use crate::field::tokenize;
use crate::records;

pub const REVISION_TAG: &str = "NPF_REVISION";
pub const DESCRIPTION_TAG: &str = "DESCRIPTION";
pub const END_TAG: &str = "END";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between sections, looking for a tag or a header.
    Scanning,
    /// The previous line was a top-level tag; this line is its value.
    TagValue(&'static str),
    /// A header was just read; a column comment may follow.
    Header(SectionKind),
    InSection { kind: SectionKind, records: usize },
}

/// Builds a [`NetworkFile`] from NPF text.
pub struct NpfReader<'c> {
    config: &'c ReaderConfig,
    file: NetworkFile,
    index: KeyIndex,
    state: State,
    line: usize,
}

impl<'c> NpfReader<'c> {
    pub fn new(config: &'c ReaderConfig) -> Self {
        Self {
            config,
            file: NetworkFile::new(),
            index: KeyIndex::new(),
            state: State::Scanning,
            line: 0,
        }
    }

    /// Consume the whole input. Nothing is returned unless every line decodes.
    pub fn read<R: BufRead>(mut self, input: R) -> NpfResult<NetworkFile> {
        for line in input.lines() {
            let line = line?;
            self.line += 1;
            self.process(line.trim())?;
        }
        self.finish()
    }

    fn process(&mut self, line: &str) -> NpfResult<()> {
        if let State::TagValue(tag) = self.state {
            self.state = State::Scanning;
            return self.tag_value(tag, line);
        }
        if line.is_empty() {
            return Ok(());
        }
        if let State::Header(kind) = self.state {
            self.state = State::InSection { kind, records: 0 };
            if line.starts_with(records::COLUMN_COMMENT_MARKER) {
                return Ok(());
            }
        }
        if line.starts_with(self.config.comment_marker) {
            return Ok(());
        }
        match self.state {
            State::InSection { kind, records } if line == END_TAG => {
                self.leave(kind, records);
                Ok(())
            }
            State::InSection { kind, records } => {
                self.record(kind, line)?;
                self.state = State::InSection {
                    kind,
                    records: records + 1,
                };
                Ok(())
            }
            _ => self.scan(line),
        }
    }

    fn scan(&mut self, line: &str) -> NpfResult<()> {
        match line {
            REVISION_TAG => self.state = State::TagValue(REVISION_TAG),
            DESCRIPTION_TAG => self.state = State::TagValue(DESCRIPTION_TAG),
            _ => {
                let kind =
                    SectionKind::from_header(line).ok_or_else(|| NpfError::UnknownSection {
                        line: self.line,
                        content: line.to_string(),
                    })?;
                debug!("entering {} section at line {}", kind.header(), self.line);
                self.state = State::Header(kind);
            }
        }
        Ok(())
    }

    fn tag_value(&mut self, tag: &'static str, value: &str) -> NpfResult<()> {
        if tag == DESCRIPTION_TAG {
            self.file.description = value.to_string();
            return Ok(());
        }

        let revision: i64 = value.parse().map_err(|_| NpfError::MalformedHeader {
            line: self.line,
            tag,
            message: format!("expected an integer, found {:?}", value),
        })?;
        if revision != SUPPORTED_REVISION {
            if self.config.strict_revision {
                return Err(NpfError::UnsupportedRevision {
                    found: revision,
                    supported: SUPPORTED_REVISION,
                });
            }
            warn!(
                "file declares NPF revision {}, reading it as revision {}",
                revision, SUPPORTED_REVISION
            );
        }
        self.file.revision = revision;
        Ok(())
    }

    fn record(&mut self, kind: SectionKind, line: &str) -> NpfResult<()> {
        let record = tokenize(line).map_err(|e| NpfError::MalformedRecord {
            section: kind,
            line: self.line,
            message: e.to_string(),
        })?;
        records::decode_record(kind, self.line, &record, &mut self.file, &mut self.index)
    }

    fn leave(&mut self, kind: SectionKind, records: usize) {
        debug!("leaving {} section with {} records", kind.header(), records);
        self.state = State::Scanning;
    }

    // End of input also terminates an open section.
    fn finish(mut self) -> NpfResult<NetworkFile> {
        match self.state {
            State::TagValue(tag) => Err(NpfError::MalformedHeader {
                line: self.line,
                tag,
                message: "has no value line".to_string(),
            }),
            State::Header(kind) => {
                self.leave(kind, 0);
                Ok(self.file)
            }
            State::InSection { kind, records } => {
                self.leave(kind, records);
                Ok(self.file)
            }
            State::Scanning => Ok(self.file),
        }
    }
}
