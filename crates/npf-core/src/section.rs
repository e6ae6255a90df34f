//! Record kinds and their section headers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One kind of record in a network file, identified on disk by its section header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SectionKind {
    System,
    Region,
    Area,
    Bus,
    MiddlePointBus,
    Demand,
    Generator,
    Line,
    Transformer,
    EquivalentTransformer,
    ThreeWindingTransformer,
    ControlledSeriesCapacitor,
    LineShunt,
    BusShunt,
    StaticVarCompensator,
    DcLink,
    DcBus,
    DcLine,
    AcDcConverterLcc,
    AcDcConverterVsc,
}

impl SectionKind {
    /// All record kinds in canonical write order.
    ///
    /// Referenced sections always precede the sections referencing them.
    pub const ALL: &'static [SectionKind] = &[
        SectionKind::System,
        SectionKind::Region,
        SectionKind::Area,
        SectionKind::Bus,
        SectionKind::MiddlePointBus,
        SectionKind::Demand,
        SectionKind::Generator,
        SectionKind::Line,
        SectionKind::Transformer,
        SectionKind::EquivalentTransformer,
        SectionKind::ThreeWindingTransformer,
        SectionKind::ControlledSeriesCapacitor,
        SectionKind::LineShunt,
        SectionKind::BusShunt,
        SectionKind::StaticVarCompensator,
        SectionKind::DcLink,
        SectionKind::DcBus,
        SectionKind::DcLine,
        SectionKind::AcDcConverterLcc,
        SectionKind::AcDcConverterVsc,
    ];

    /// Section header keyword.
    pub fn header(&self) -> &'static str {
        match self {
            SectionKind::System => "SYSTEM",
            SectionKind::Region => "REGION",
            SectionKind::Area => "AREA",
            SectionKind::Bus => "BUS",
            SectionKind::MiddlePointBus => "MIDDLEPOINT_BUS",
            SectionKind::Demand => "DEMAND",
            SectionKind::Generator => "GENERATOR",
            SectionKind::Line => "LINE",
            SectionKind::Transformer => "TRANSFORMER",
            SectionKind::EquivalentTransformer => "EQUIVALENT_TRANSFORMER",
            SectionKind::ThreeWindingTransformer => "THREE_WINDING_TRANSFORMER",
            SectionKind::ControlledSeriesCapacitor => "CSC",
            SectionKind::LineShunt => "LINE_SHUNT",
            SectionKind::BusShunt => "BUS_SHUNT",
            SectionKind::StaticVarCompensator => "SVC",
            SectionKind::DcLink => "DC_LINK",
            SectionKind::DcBus => "DC_BUS",
            SectionKind::DcLine => "DC_LINE",
            SectionKind::AcDcConverterLcc => "ACDC_CONVERTER_LCC",
            SectionKind::AcDcConverterVsc => "ACDC_CONVERTER_VSC",
        }
    }

    /// Human-readable record name.
    pub fn friendly_name(&self) -> &'static str {
        match self {
            SectionKind::System => "system",
            SectionKind::Region => "region",
            SectionKind::Area => "area",
            SectionKind::Bus => "bus",
            SectionKind::MiddlePointBus => "middle point bus",
            SectionKind::Demand => "demand",
            SectionKind::Generator => "generator",
            SectionKind::Line => "line",
            SectionKind::Transformer => "transformer",
            SectionKind::EquivalentTransformer => "equivalent transformer",
            SectionKind::ThreeWindingTransformer => "three-winding transformer",
            SectionKind::ControlledSeriesCapacitor => "controlled series capacitor",
            SectionKind::LineShunt => "line shunt",
            SectionKind::BusShunt => "bus shunt",
            SectionKind::StaticVarCompensator => "static var compensator",
            SectionKind::DcLink => "DC link",
            SectionKind::DcBus => "DC bus",
            SectionKind::DcLine => "DC line",
            SectionKind::AcDcConverterLcc => "LCC converter",
            SectionKind::AcDcConverterVsc => "VSC converter",
        }
    }

    /// Match an exact (already trimmed) header line.
    pub fn from_header(header: &str) -> Option<SectionKind> {
        Self::ALL.iter().copied().find(|kind| kind.header() == header)
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}
