//! # npf-core: NetPlan Network Model
//!
//! In-memory model of a NetPlan (NPF) transmission network file: twenty
//! record kinds describing buses, branches, injections and HVDC equipment,
//! held together by a single [`NetworkFile`] aggregate.
//!
//! ## Design
//!
//! Records never embed each other. A reference from one record to another is
//! a small `Copy` handle holding the referent's position in its owning
//! sequence. Removing a record through a `remove_*` operation rewrites the
//! handles that pointed past it:
//! - [`BusRef`] points into either `buses` or `middlepoint_buses`
//! - [`TransformerRef`] points into either `transformers` or
//!   `equivalent_transformers`
//! - the remaining handles ([`SystemRef`], [`AreaRef`], [`LineRef`], ...) index
//!   a single sequence
//!
//! On disk the same references are stored as the referent's key: a number,
//! a name, or a (from bus, to bus, circuit) triple. [`KeyIndex`] and
//! [`Resolver`] translate keys back into handles while a file is loaded.
//!
//! ## Quick Start
//!
//! ```rust
//! use npf_core::*;
//!
//! let mut file = NetworkFile::with_description("Two bus example");
//! let system = file.add_system(System::new("SY", "System", 1));
//! let region = file.add_region(Region::new("RE", "Region", 1, system));
//! let area = file.add_area(Area::new("AR", "Area", 1, system));
//!
//! let b1 = file.add_bus(Bus::new(1, "Bus 1", area, region, system).with_kv_base(138.0));
//! let b2 = file.add_bus(Bus::new(2, "Bus 2", area, region, system).with_kv_base(138.0));
//! file.add_line(Line::new(b1, b2, 1).with_impedance(0.5, 5.0, 2.0));
//! file.add_demand(Demand::new(1, "Load 1", b2).with_power(50.0, 10.0));
//!
//! assert_eq!(file.find_line(1, 2, 1).unwrap().index(), 0);
//! assert_eq!(file.total_records(), 7);
//! ```
//!
//! ## Modules
//!
//! - [`elements`] - Record structs, one per kind
//! - [`refs`] - Typed handles
//! - [`network`] - The [`NetworkFile`] aggregate and linear `find_*` lookups
//! - [`remove`] - `remove_*` operations that keep handles on target
//! - [`resolve`] - Hashed key lookup used while decoding
//! - [`codes`] - Single-field text codes (`"A"`, `"R"`, `"LCC"`, ...)
//! - [`defaults`] - Format constants and date helpers
//! - [`section`] - Record kinds and section headers
//! - [`error`] - [`NpfError`] and [`NpfResult`]

pub mod codes;
pub mod defaults;
pub mod elements;
pub mod error;
pub mod network;
pub mod refs;
pub mod remove;
pub mod resolve;
pub mod section;

pub use codes::{
    BusShuntType, Code, Condition, DcLinkType, DcPolarity, GeneratorType, LccConverterType,
    MeteringEnd, Op, ShuntTerminal, UnknownCode,
};
pub use elements::*;
pub use error::{NpfError, NpfResult, RecordKey};
pub use network::NetworkFile;
pub use refs::*;
pub use resolve::{KeyIndex, Resolver};
pub use section::SectionKind;
