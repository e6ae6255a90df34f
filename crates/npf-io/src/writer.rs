//! Section writer.
//!
//! Output always has the same shape: the two top-level tags, then every
//! record kind in canonical order as header, column comment, data lines and
//! `END`. Empty sections are written too.

use std::io::Write;

use npf_core::{NetworkFile, NpfResult, SectionKind};
use tracing::{debug, warn};

use crate::config::WriterConfig;
use crate::reader::{DESCRIPTION_TAG, END_TAG, REVISION_TAG};
use crate::records;

/// Renders a [`NetworkFile`] as NPF text.
pub struct NpfWriter<'c> {
    config: &'c WriterConfig,
}

impl<'c> NpfWriter<'c> {
    pub fn new(config: &'c WriterConfig) -> Self {
        Self { config }
    }

    fn line(&self, output: &mut String, text: &str) {
        output.push_str(text);
        output.push_str(self.config.line_ending.as_str());
    }

    pub fn write_string(&self, file: &NetworkFile) -> String {
        let mut output = String::new();

        self.line(&mut output, REVISION_TAG);
        self.line(&mut output, &file.revision.to_string());
        self.line(&mut output, DESCRIPTION_TAG);
        if file.description.contains(['\n', '\r']) {
            warn!("description contains line breaks; writing them as spaces");
            self.line(&mut output, &file.description.replace(['\r', '\n'], " "));
        } else {
            self.line(&mut output, &file.description);
        }

        for (position, kind) in SectionKind::ALL.iter().enumerate() {
            if position > 0 && self.config.blank_line_between_sections {
                self.line(&mut output, "");
            }
            self.section(&mut output, *kind, file);
        }
        output
    }

    fn section(&self, output: &mut String, kind: SectionKind, file: &NetworkFile) {
        self.line(output, kind.header());
        self.line(output, records::comment(kind));
        let lines = records::encode_section(kind, file);
        for record in &lines {
            self.line(output, record);
        }
        self.line(output, END_TAG);
        debug!("wrote {} section with {} records", kind.header(), lines.len());
    }

    pub fn write<W: Write>(&self, file: &NetworkFile, mut out: W) -> NpfResult<()> {
        out.write_all(self.write_string(file).as_bytes())?;
        out.flush()?;
        Ok(())
    }
}
