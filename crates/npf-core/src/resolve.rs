//! Key lookup over a [`NetworkFile`] while it is being filled.
//!
//! Loading a file resolves every foreign-key column against the records
//! decoded so far. [`KeyIndex`] keeps one hash map per key space so each
//! lookup is constant time; [`Resolver`] pairs it with the aggregate and
//! turns index hits into typed handles.

use std::collections::HashMap;

use tracing::warn;

use crate::error::{NpfError, NpfResult, RecordKey};
use crate::network::NetworkFile;
use crate::refs::*;
use crate::section::SectionKind;

/// Per-kind key spaces: numbers, names and (from, to, circuit) triples.
///
/// The first record registered under a key keeps it; later duplicates are
/// logged and ignored, matching a linear first-match search.
#[derive(Debug, Clone, Default)]
pub struct KeyIndex {
    by_number: HashMap<(SectionKind, i64), usize>,
    by_name: HashMap<(SectionKind, String), usize>,
    by_circuit: HashMap<(SectionKind, i64, i64, i64), usize>,
}

impl KeyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every record already present in `file`.
    pub fn build(file: &NetworkFile) -> Self {
        let mut index = Self::new();
        for kind in SectionKind::ALL {
            for position in 0..file.len_of(*kind) {
                index.register(file, *kind, position);
            }
        }
        index
    }

    /// Index the most recently appended record of `kind`.
    pub fn register_latest(&mut self, file: &NetworkFile, kind: SectionKind) {
        if let Some(position) = file.len_of(kind).checked_sub(1) {
            self.register(file, kind, position);
        }
    }

    /// Index the keys of the record at `position` in the `kind` sequence.
    ///
    /// Kinds nobody references contribute no keys.
    pub fn register(&mut self, file: &NetworkFile, kind: SectionKind, position: usize) {
        match kind {
            SectionKind::System => {
                if let Some(system) = file.systems.get(position) {
                    self.insert_number(kind, system.number, position);
                }
            }
            SectionKind::Region => {
                if let Some(region) = file.regions.get(position) {
                    self.insert_number(kind, region.number, position);
                }
            }
            SectionKind::Area => {
                if let Some(area) = file.areas.get(position) {
                    self.insert_number(kind, area.number, position);
                }
            }
            SectionKind::Bus => {
                if let Some(bus) = file.buses.get(position) {
                    self.insert_number(kind, bus.number, position);
                }
            }
            SectionKind::MiddlePointBus => {
                if let Some(bus) = file.middlepoint_buses.get(position) {
                    self.insert_number(kind, bus.number, position);
                }
            }
            SectionKind::DcLink => {
                if let Some(link) = file.dclinks.get(position) {
                    self.insert_number(kind, link.number, position);
                }
            }
            SectionKind::DcBus => {
                if let Some(bus) = file.dcbuses.get(position) {
                    self.insert_number(kind, bus.number, position);
                }
            }
            SectionKind::Line => {
                if let Some(line) = file.lines.get(position) {
                    if let (Some(from), Some(to)) =
                        (file.bus_number(line.from_bus), file.bus_number(line.to_bus))
                    {
                        self.insert_circuit(kind, (from, to, line.parallel_circuit), position);
                    }
                }
            }
            SectionKind::Transformer | SectionKind::EquivalentTransformer => {
                let seq = if kind == SectionKind::Transformer {
                    TransformerKind::TwoWinding
                } else {
                    TransformerKind::Equivalent
                };
                if let Some(transformer) = file.transformers_of(seq).get(position) {
                    if let (Some(from), Some(to)) = (
                        file.bus_number(transformer.from_bus),
                        file.bus_number(transformer.to_bus),
                    ) {
                        self.insert_circuit(
                            kind,
                            (from, to, transformer.parallel_circuit),
                            position,
                        );
                    }
                    let name = transformer.name.trim();
                    if !name.is_empty() {
                        self.insert_name(kind, name, position);
                    }
                }
            }
            _ => {}
        }
    }

    fn insert_number(&mut self, kind: SectionKind, number: i64, position: usize) {
        if self.by_number.contains_key(&(kind, number)) {
            warn!("duplicate {} number {}, keeping the first declaration", kind.friendly_name(), number);
            return;
        }
        self.by_number.insert((kind, number), position);
    }

    fn insert_name(&mut self, kind: SectionKind, name: &str, position: usize) {
        let key = (kind, name.to_string());
        if self.by_name.contains_key(&key) {
            warn!("duplicate {} name {:?}, keeping the first declaration", kind.friendly_name(), name);
            return;
        }
        self.by_name.insert(key, position);
    }

    fn insert_circuit(&mut self, kind: SectionKind, (from, to, circuit): (i64, i64, i64), position: usize) {
        if self.by_circuit.contains_key(&(kind, from, to, circuit)) {
            warn!(
                "duplicate {} from bus {} to bus {} circuit {}, keeping the first declaration",
                kind.friendly_name(),
                from,
                to,
                circuit
            );
            return;
        }
        self.by_circuit.insert((kind, from, to, circuit), position);
    }

    pub fn number(&self, kind: SectionKind, number: i64) -> Option<usize> {
        self.by_number.get(&(kind, number)).copied()
    }

    /// Look up a name, trimmed.
    pub fn name(&self, kind: SectionKind, name: &str) -> Option<usize> {
        self.by_name.get(&(kind, name.trim().to_string())).copied()
    }

    pub fn circuit(&self, kind: SectionKind, from: i64, to: i64, circuit: i64) -> Option<usize> {
        self.by_circuit.get(&(kind, from, to, circuit)).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.by_number.is_empty() && self.by_name.is_empty() && self.by_circuit.is_empty()
    }
}

/// Typed lookups against a [`NetworkFile`] through its [`KeyIndex`].
///
/// Lookup precedence is the same as the linear `find_*` methods on
/// [`NetworkFile`]: regular buses before middle point buses and two-winding
/// transformers before equivalent transformers.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    file: &'a NetworkFile,
    index: &'a KeyIndex,
}

impl<'a> Resolver<'a> {
    pub fn new(file: &'a NetworkFile, index: &'a KeyIndex) -> Self {
        Self { file, index }
    }

    pub fn file(&self) -> &'a NetworkFile {
        self.file
    }

    fn by_number(&self, kind: SectionKind, number: i64) -> NpfResult<usize> {
        self.index.number(kind, number).ok_or(NpfError::NotFound {
            kind,
            key: RecordKey::Number(number),
        })
    }

    pub fn system(&self, number: i64) -> NpfResult<SystemRef> {
        self.by_number(SectionKind::System, number).map(SystemRef::new)
    }

    pub fn region(&self, number: i64) -> NpfResult<RegionRef> {
        self.by_number(SectionKind::Region, number).map(RegionRef::new)
    }

    pub fn area(&self, number: i64) -> NpfResult<AreaRef> {
        self.by_number(SectionKind::Area, number).map(AreaRef::new)
    }

    pub fn bus(&self, number: i64) -> NpfResult<BusRef> {
        if let Some(index) = self.index.number(SectionKind::Bus, number) {
            return Ok(BusRef::regular(index));
        }
        match self.index.number(SectionKind::MiddlePointBus, number) {
            Some(index) => Ok(BusRef::middle_point(index)),
            None => Err(NpfError::NotFound {
                kind: SectionKind::Bus,
                key: RecordKey::Number(number),
            }),
        }
    }

    /// Resolve an optional bus column; no key means no bus.
    pub fn optional_bus(&self, number: Option<i64>) -> NpfResult<Option<BusRef>> {
        number.map(|n| self.bus(n)).transpose()
    }

    pub fn dclink(&self, number: i64) -> NpfResult<DcLinkRef> {
        self.by_number(SectionKind::DcLink, number).map(DcLinkRef::new)
    }

    pub fn dcbus(&self, number: i64) -> NpfResult<DcBusRef> {
        self.by_number(SectionKind::DcBus, number).map(DcBusRef::new)
    }

    pub fn line(&self, from: i64, to: i64, circuit: i64) -> NpfResult<LineRef> {
        self.index
            .circuit(SectionKind::Line, from, to, circuit)
            .map(LineRef::new)
            .ok_or(NpfError::NotFound {
                kind: SectionKind::Line,
                key: RecordKey::Circuit { from, to, circuit },
            })
    }

    pub fn transformer(&self, from: i64, to: i64, circuit: i64) -> NpfResult<TransformerRef> {
        if let Some(index) = self.index.circuit(SectionKind::Transformer, from, to, circuit) {
            return Ok(TransformerRef::two_winding(index));
        }
        match self
            .index
            .circuit(SectionKind::EquivalentTransformer, from, to, circuit)
        {
            Some(index) => Ok(TransformerRef::equivalent(index)),
            None => Err(NpfError::NotFound {
                kind: SectionKind::Transformer,
                key: RecordKey::Circuit { from, to, circuit },
            }),
        }
    }

    pub fn transformer_by_name(&self, name: &str) -> NpfResult<TransformerRef> {
        if let Some(index) = self.index.name(SectionKind::Transformer, name) {
            return Ok(TransformerRef::two_winding(index));
        }
        match self.index.name(SectionKind::EquivalentTransformer, name) {
            Some(index) => Ok(TransformerRef::equivalent(index)),
            None => Err(NpfError::NotFound {
                kind: SectionKind::Transformer,
                key: RecordKey::Name(name.trim().to_string()),
            }),
        }
    }
}
