//! # npf-io: NetPlan File Reader & Writer
//!
//! Loads and saves NetPlan (NPF) network files: a line-oriented text format
//! of named sections, one per record kind, each holding comma-separated
//! records with quoted text fields.
//!
//! ## Quick Start
//!
//! ```rust
//! use npf_core::*;
//!
//! let mut file = NetworkFile::with_description("Example");
//! let system = file.add_system(System::new("SY", "System", 1));
//! let region = file.add_region(Region::new("RE", "Region", 1, system));
//! let area = file.add_area(Area::new("AR", "Area", 1, system));
//! let bus = file.add_bus(Bus::new(1, "Bus 1", area, region, system));
//! file.add_demand(Demand::new(1, "Load 1", bus).with_power(10.0, 2.0));
//!
//! let text = npf_io::to_text(&file);
//! let back = npf_io::from_text(&text)?;
//! assert_eq!(back.demands[0].p_mw, 10.0);
//! assert_eq!(npf_io::to_text(&back), text);
//! # Ok::<(), npf_core::NpfError>(())
//! ```
//!
//! ## Modules
//!
//! - [`field`] - Scalar encoding, decoding and line tokenizing
//! - [`record`] - Record codec trait and per-line column cursors
//! - [`records`] - Codecs for the twenty record kinds
//! - [`reader`] - Section reader
//! - [`writer`] - Section writer
//! - [`config`] - Reader and writer options, loadable from TOML

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use npf_core::{NetworkFile, NpfResult};
use tracing::info;

pub mod config;
pub mod field;
pub mod reader;
pub mod record;
pub mod records;
pub mod writer;

pub use config::{LineEnding, NpfConfig, ReaderConfig, WriterConfig};
pub use reader::NpfReader;
pub use record::RecordCodec;
pub use writer::NpfWriter;

/// Parse NPF text with default options.
pub fn from_text(text: &str) -> NpfResult<NetworkFile> {
    from_text_with(text, &NpfConfig::default())
}

pub fn from_text_with(text: &str, config: &NpfConfig) -> NpfResult<NetworkFile> {
    NpfReader::new(&config.reader).read(text.as_bytes())
}

/// Render NPF text with default options.
pub fn to_text(file: &NetworkFile) -> String {
    to_text_with(file, &NpfConfig::default())
}

pub fn to_text_with(file: &NetworkFile, config: &NpfConfig) -> String {
    NpfWriter::new(&config.writer).write_string(file)
}

/// Read a network file from disk with default options.
pub fn load(path: impl AsRef<Path>) -> NpfResult<NetworkFile> {
    load_with(path, &NpfConfig::default())
}

pub fn load_with(path: impl AsRef<Path>, config: &NpfConfig) -> NpfResult<NetworkFile> {
    let path = path.as_ref();
    let input = BufReader::new(File::open(path)?);
    let file = NpfReader::new(&config.reader).read(input)?;
    info!(
        "loaded {} records from {}",
        file.total_records(),
        path.display()
    );
    Ok(file)
}

/// Write a network file to disk with default options, replacing any existing file.
pub fn save(file: &NetworkFile, path: impl AsRef<Path>) -> NpfResult<()> {
    save_with(file, path, &NpfConfig::default())
}

pub fn save_with(file: &NetworkFile, path: impl AsRef<Path>, config: &NpfConfig) -> NpfResult<()> {
    let path = path.as_ref();
    let output = BufWriter::new(File::create(path)?);
    NpfWriter::new(&config.writer).write(file, output)?;
    info!("saved {} records to {}", file.total_records(), path.display());
    Ok(())
}
