//! The in-memory image of one network file.

use serde::{Deserialize, Serialize};

use crate::defaults::SUPPORTED_REVISION;
use crate::elements::*;
use crate::error::{NpfError, NpfResult, RecordKey};
use crate::refs::*;
use crate::section::SectionKind;

/// Every record of a network file, grouped by kind in insertion order.
///
/// The aggregate owns its records; cross references between records are
/// handles into these sequences. Records are written back in sequence order.
///
/// Taking a record out of `systems`, `regions`, `areas`, `buses`,
/// `middlepoint_buses`, `lines`, `transformers`, `equivalent_transformers`,
/// `dclinks` or `dcbuses` directly would shift the handles of every later
/// record; use the matching `remove_*` operation instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkFile {
    pub revision: i64,
    /// Single line of free text
    pub description: String,
    pub systems: Vec<System>,
    pub regions: Vec<Region>,
    pub areas: Vec<Area>,
    pub buses: Vec<Bus>,
    /// Star points of three-winding transformers
    pub middlepoint_buses: Vec<Bus>,
    pub demands: Vec<Demand>,
    pub generators: Vec<Generator>,
    pub lines: Vec<Line>,
    pub transformers: Vec<Transformer>,
    /// Windings of three-winding transformers
    pub equivalent_transformers: Vec<Transformer>,
    pub three_winding_transformers: Vec<ThreeWindingTransformer>,
    pub cscs: Vec<ControlledSeriesCapacitor>,
    pub line_shunts: Vec<LineShunt>,
    pub bus_shunts: Vec<BusShunt>,
    pub svcs: Vec<StaticVarCompensator>,
    pub dclinks: Vec<DcLink>,
    pub dcbuses: Vec<DcBus>,
    pub dclines: Vec<DcLine>,
    pub lcc_converters: Vec<AcDcConverterLcc>,
    pub vsc_converters: Vec<AcDcConverterVsc>,
}

impl Default for NetworkFile {
    fn default() -> Self {
        Self {
            revision: SUPPORTED_REVISION,
            description: String::new(),
            systems: Vec::new(),
            regions: Vec::new(),
            areas: Vec::new(),
            buses: Vec::new(),
            middlepoint_buses: Vec::new(),
            demands: Vec::new(),
            generators: Vec::new(),
            lines: Vec::new(),
            transformers: Vec::new(),
            equivalent_transformers: Vec::new(),
            three_winding_transformers: Vec::new(),
            cscs: Vec::new(),
            line_shunts: Vec::new(),
            bus_shunts: Vec::new(),
            svcs: Vec::new(),
            dclinks: Vec::new(),
            dcbuses: Vec::new(),
            dclines: Vec::new(),
            lcc_converters: Vec::new(),
            vsc_converters: Vec::new(),
        }
    }
}

fn not_found<T>(kind: SectionKind, key: RecordKey) -> NpfResult<T> {
    Err(NpfError::NotFound { kind, key })
}

fn push<T>(items: &mut Vec<T>, item: T) -> usize {
    items.push(item);
    items.len() - 1
}

impl NetworkFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_description(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    // ---- insertion --------------------------------------------------------

    pub fn add_system(&mut self, system: System) -> SystemRef {
        SystemRef::new(push(&mut self.systems, system))
    }

    pub fn add_region(&mut self, region: Region) -> RegionRef {
        RegionRef::new(push(&mut self.regions, region))
    }

    pub fn add_area(&mut self, area: Area) -> AreaRef {
        AreaRef::new(push(&mut self.areas, area))
    }

    pub fn add_bus(&mut self, bus: Bus) -> BusRef {
        BusRef::regular(push(&mut self.buses, bus))
    }

    pub fn add_middlepoint_bus(&mut self, bus: Bus) -> BusRef {
        BusRef::middle_point(push(&mut self.middlepoint_buses, bus))
    }

    pub fn add_demand(&mut self, demand: Demand) -> usize {
        push(&mut self.demands, demand)
    }

    pub fn add_generator(&mut self, generator: Generator) -> usize {
        push(&mut self.generators, generator)
    }

    pub fn add_line(&mut self, line: Line) -> LineRef {
        LineRef::new(push(&mut self.lines, line))
    }

    pub fn add_transformer(&mut self, transformer: Transformer) -> TransformerRef {
        TransformerRef::two_winding(push(&mut self.transformers, transformer))
    }

    pub fn add_equivalent_transformer(&mut self, transformer: Transformer) -> TransformerRef {
        TransformerRef::equivalent(push(&mut self.equivalent_transformers, transformer))
    }

    pub fn add_three_winding_transformer(&mut self, transformer: ThreeWindingTransformer) -> usize {
        push(&mut self.three_winding_transformers, transformer)
    }

    pub fn add_csc(&mut self, csc: ControlledSeriesCapacitor) -> usize {
        push(&mut self.cscs, csc)
    }

    pub fn add_line_shunt(&mut self, shunt: LineShunt) -> usize {
        push(&mut self.line_shunts, shunt)
    }

    pub fn add_bus_shunt(&mut self, shunt: BusShunt) -> usize {
        push(&mut self.bus_shunts, shunt)
    }

    pub fn add_svc(&mut self, svc: StaticVarCompensator) -> usize {
        push(&mut self.svcs, svc)
    }

    pub fn add_dclink(&mut self, link: DcLink) -> DcLinkRef {
        DcLinkRef::new(push(&mut self.dclinks, link))
    }

    pub fn add_dcbus(&mut self, bus: DcBus) -> DcBusRef {
        DcBusRef::new(push(&mut self.dcbuses, bus))
    }

    pub fn add_dcline(&mut self, line: DcLine) -> usize {
        push(&mut self.dclines, line)
    }

    pub fn add_lcc_converter(&mut self, converter: AcDcConverterLcc) -> usize {
        push(&mut self.lcc_converters, converter)
    }

    pub fn add_vsc_converter(&mut self, converter: AcDcConverterVsc) -> usize {
        push(&mut self.vsc_converters, converter)
    }

    // ---- dereferencing ----------------------------------------------------

    pub fn system(&self, handle: SystemRef) -> Option<&System> {
        self.systems.get(handle.index())
    }

    pub fn region(&self, handle: RegionRef) -> Option<&Region> {
        self.regions.get(handle.index())
    }

    pub fn area(&self, handle: AreaRef) -> Option<&Area> {
        self.areas.get(handle.index())
    }

    /// Bus sequence a [`BusKind`] refers to.
    pub fn buses_of(&self, kind: BusKind) -> &[Bus] {
        match kind {
            BusKind::Regular => &self.buses,
            BusKind::MiddlePoint => &self.middlepoint_buses,
        }
    }

    pub fn bus(&self, handle: BusRef) -> Option<&Bus> {
        self.buses_of(handle.kind).get(handle.index)
    }

    pub fn bus_mut(&mut self, handle: BusRef) -> Option<&mut Bus> {
        match handle.kind {
            BusKind::Regular => self.buses.get_mut(handle.index),
            BusKind::MiddlePoint => self.middlepoint_buses.get_mut(handle.index),
        }
    }

    pub fn line(&self, handle: LineRef) -> Option<&Line> {
        self.lines.get(handle.index())
    }

    /// Transformer sequence a [`TransformerKind`] refers to.
    pub fn transformers_of(&self, kind: TransformerKind) -> &[Transformer] {
        match kind {
            TransformerKind::TwoWinding => &self.transformers,
            TransformerKind::Equivalent => &self.equivalent_transformers,
        }
    }

    pub fn transformer(&self, handle: TransformerRef) -> Option<&Transformer> {
        self.transformers_of(handle.kind).get(handle.index)
    }

    pub fn dclink(&self, handle: DcLinkRef) -> Option<&DcLink> {
        self.dclinks.get(handle.index())
    }

    pub fn dcbus(&self, handle: DcBusRef) -> Option<&DcBus> {
        self.dcbuses.get(handle.index())
    }

    // ---- linear lookups ---------------------------------------------------

    pub fn find_system(&self, number: i64) -> NpfResult<SystemRef> {
        match self.systems.iter().position(|s| s.number == number) {
            Some(index) => Ok(SystemRef::new(index)),
            None => not_found(SectionKind::System, RecordKey::Number(number)),
        }
    }

    pub fn find_region(&self, number: i64) -> NpfResult<RegionRef> {
        match self.regions.iter().position(|r| r.number == number) {
            Some(index) => Ok(RegionRef::new(index)),
            None => not_found(SectionKind::Region, RecordKey::Number(number)),
        }
    }

    pub fn find_area(&self, number: i64) -> NpfResult<AreaRef> {
        match self.areas.iter().position(|a| a.number == number) {
            Some(index) => Ok(AreaRef::new(index)),
            None => not_found(SectionKind::Area, RecordKey::Number(number)),
        }
    }

    /// Find a bus by number, searching regular buses before middle point buses.
    pub fn find_bus(&self, number: i64) -> NpfResult<BusRef> {
        if let Some(index) = self.buses.iter().position(|b| b.number == number) {
            return Ok(BusRef::regular(index));
        }
        match self.middlepoint_buses.iter().position(|b| b.number == number) {
            Some(index) => Ok(BusRef::middle_point(index)),
            None => not_found(SectionKind::Bus, RecordKey::Number(number)),
        }
    }

    pub fn find_dclink(&self, number: i64) -> NpfResult<DcLinkRef> {
        match self.dclinks.iter().position(|l| l.number == number) {
            Some(index) => Ok(DcLinkRef::new(index)),
            None => not_found(SectionKind::DcLink, RecordKey::Number(number)),
        }
    }

    pub fn find_dcbus(&self, number: i64) -> NpfResult<DcBusRef> {
        match self.dcbuses.iter().position(|b| b.number == number) {
            Some(index) => Ok(DcBusRef::new(index)),
            None => not_found(SectionKind::DcBus, RecordKey::Number(number)),
        }
    }

    /// Find a line by its (from bus, to bus, parallel circuit) identity.
    pub fn find_line(&self, from: i64, to: i64, circuit: i64) -> NpfResult<LineRef> {
        let found = self.lines.iter().position(|line| {
            line.parallel_circuit == circuit
                && self.bus_number(line.from_bus) == Some(from)
                && self.bus_number(line.to_bus) == Some(to)
        });
        match found {
            Some(index) => Ok(LineRef::new(index)),
            None => not_found(SectionKind::Line, RecordKey::Circuit { from, to, circuit }),
        }
    }

    /// Find a transformer by its circuit identity, searching two-winding
    /// transformers before equivalent transformers.
    pub fn find_transformer(&self, from: i64, to: i64, circuit: i64) -> NpfResult<TransformerRef> {
        let matches = |t: &Transformer| {
            t.parallel_circuit == circuit
                && self.bus_number(t.from_bus) == Some(from)
                && self.bus_number(t.to_bus) == Some(to)
        };
        for kind in [TransformerKind::TwoWinding, TransformerKind::Equivalent] {
            if let Some(index) = self.transformers_of(kind).iter().position(|t| matches(t)) {
                return Ok(TransformerRef { kind, index });
            }
        }
        not_found(SectionKind::Transformer, RecordKey::Circuit { from, to, circuit })
    }

    /// Find a transformer by name. Both sides are compared trimmed.
    pub fn find_transformer_by_name(&self, name: &str) -> NpfResult<TransformerRef> {
        let name = name.trim();
        for kind in [TransformerKind::TwoWinding, TransformerKind::Equivalent] {
            if let Some(index) = self
                .transformers_of(kind)
                .iter()
                .position(|t| t.name.trim() == name)
            {
                return Ok(TransformerRef { kind, index });
            }
        }
        not_found(SectionKind::Transformer, RecordKey::Name(name.to_string()))
    }

    // ---- referent keys ----------------------------------------------------

    /// Number of the bus behind a handle, if the handle is live.
    pub fn bus_number(&self, handle: BusRef) -> Option<i64> {
        self.bus(handle).map(|b| b.number)
    }

    pub fn dcbus_number(&self, handle: DcBusRef) -> Option<i64> {
        self.dcbus(handle).map(|b| b.number)
    }

    // ---- statistics -------------------------------------------------------

    /// Number of records of one kind.
    pub fn len_of(&self, kind: SectionKind) -> usize {
        match kind {
            SectionKind::System => self.systems.len(),
            SectionKind::Region => self.regions.len(),
            SectionKind::Area => self.areas.len(),
            SectionKind::Bus => self.buses.len(),
            SectionKind::MiddlePointBus => self.middlepoint_buses.len(),
            SectionKind::Demand => self.demands.len(),
            SectionKind::Generator => self.generators.len(),
            SectionKind::Line => self.lines.len(),
            SectionKind::Transformer => self.transformers.len(),
            SectionKind::EquivalentTransformer => self.equivalent_transformers.len(),
            SectionKind::ThreeWindingTransformer => self.three_winding_transformers.len(),
            SectionKind::ControlledSeriesCapacitor => self.cscs.len(),
            SectionKind::LineShunt => self.line_shunts.len(),
            SectionKind::BusShunt => self.bus_shunts.len(),
            SectionKind::StaticVarCompensator => self.svcs.len(),
            SectionKind::DcLink => self.dclinks.len(),
            SectionKind::DcBus => self.dcbuses.len(),
            SectionKind::DcLine => self.dclines.len(),
            SectionKind::AcDcConverterLcc => self.lcc_converters.len(),
            SectionKind::AcDcConverterVsc => self.vsc_converters.len(),
        }
    }

    /// Record count per kind, in canonical order.
    pub fn counts(&self) -> Vec<(SectionKind, usize)> {
        SectionKind::ALL
            .iter()
            .map(|kind| (*kind, self.len_of(*kind)))
            .collect()
    }

    pub fn total_records(&self) -> usize {
        SectionKind::ALL.iter().map(|kind| self.len_of(*kind)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_records() == 0
    }
}
