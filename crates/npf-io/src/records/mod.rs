//! Record registry: one codec per record kind and the dispatch between
//! section kinds and codecs.

mod admin;
mod bus;
mod dc;
mod injection;
mod series;

use csv::StringRecord;
use npf_core::*;
use tracing::{trace, warn};

use crate::field::FieldSpec;
use crate::record::{RecordCodec, RecordReader, RecordWriter};

/// First character of every column comment line, whatever comment marker
/// the reader is configured with.
pub const COLUMN_COMMENT_MARKER: char = '#';

/// Comment line written under a section header.
pub fn comment(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::System => System::COMMENT,
        SectionKind::Region => Region::COMMENT,
        SectionKind::Area => Area::COMMENT,
        SectionKind::Bus | SectionKind::MiddlePointBus => Bus::COMMENT,
        SectionKind::Demand => Demand::COMMENT,
        SectionKind::Generator => Generator::COMMENT,
        SectionKind::Line => Line::COMMENT,
        SectionKind::Transformer | SectionKind::EquivalentTransformer => Transformer::COMMENT,
        SectionKind::ThreeWindingTransformer => ThreeWindingTransformer::COMMENT,
        SectionKind::ControlledSeriesCapacitor => ControlledSeriesCapacitor::COMMENT,
        SectionKind::LineShunt => LineShunt::COMMENT,
        SectionKind::BusShunt => BusShunt::COMMENT,
        SectionKind::StaticVarCompensator => StaticVarCompensator::COMMENT,
        SectionKind::DcLink => DcLink::COMMENT,
        SectionKind::DcBus => DcBus::COMMENT,
        SectionKind::DcLine => DcLine::COMMENT,
        SectionKind::AcDcConverterLcc => AcDcConverterLcc::COMMENT,
        SectionKind::AcDcConverterVsc => AcDcConverterVsc::COMMENT,
    }
}

/// Column layout of a record kind.
pub fn schema(kind: SectionKind) -> &'static [FieldSpec] {
    match kind {
        SectionKind::System => System::SCHEMA,
        SectionKind::Region => Region::SCHEMA,
        SectionKind::Area => Area::SCHEMA,
        SectionKind::Bus | SectionKind::MiddlePointBus => Bus::SCHEMA,
        SectionKind::Demand => Demand::SCHEMA,
        SectionKind::Generator => Generator::SCHEMA,
        SectionKind::Line => Line::SCHEMA,
        SectionKind::Transformer | SectionKind::EquivalentTransformer => Transformer::SCHEMA,
        SectionKind::ThreeWindingTransformer => ThreeWindingTransformer::SCHEMA,
        SectionKind::ControlledSeriesCapacitor => ControlledSeriesCapacitor::SCHEMA,
        SectionKind::LineShunt => LineShunt::SCHEMA,
        SectionKind::BusShunt => BusShunt::SCHEMA,
        SectionKind::StaticVarCompensator => StaticVarCompensator::SCHEMA,
        SectionKind::DcLink => DcLink::SCHEMA,
        SectionKind::DcBus => DcBus::SCHEMA,
        SectionKind::DcLine => DcLine::SCHEMA,
        SectionKind::AcDcConverterLcc => AcDcConverterLcc::SCHEMA,
        SectionKind::AcDcConverterVsc => AcDcConverterVsc::SCHEMA,
    }
}

fn encode_all<T: RecordCodec>(items: &[T], file: &NetworkFile) -> Vec<String> {
    items
        .iter()
        .map(|item| {
            let mut out = RecordWriter::new(T::SCHEMA);
            item.encode(file, &mut out);
            format!("{}{}", T::INDENT, out.finish())
        })
        .collect()
}

/// Render every record of one kind, in sequence order.
pub fn encode_section(kind: SectionKind, file: &NetworkFile) -> Vec<String> {
    match kind {
        SectionKind::System => encode_all(&file.systems, file),
        SectionKind::Region => encode_all(&file.regions, file),
        SectionKind::Area => encode_all(&file.areas, file),
        SectionKind::Bus => encode_all(&file.buses, file),
        SectionKind::MiddlePointBus => encode_all(&file.middlepoint_buses, file),
        SectionKind::Demand => encode_all(&file.demands, file),
        SectionKind::Generator => encode_all(&file.generators, file),
        SectionKind::Line => encode_all(&file.lines, file),
        SectionKind::Transformer => encode_all(&file.transformers, file),
        SectionKind::EquivalentTransformer => encode_all(&file.equivalent_transformers, file),
        SectionKind::ThreeWindingTransformer => {
            encode_all(&file.three_winding_transformers, file)
        }
        SectionKind::ControlledSeriesCapacitor => encode_all(&file.cscs, file),
        SectionKind::LineShunt => encode_all(&file.line_shunts, file),
        SectionKind::BusShunt => encode_all(&file.bus_shunts, file),
        SectionKind::StaticVarCompensator => encode_all(&file.svcs, file),
        SectionKind::DcLink => encode_all(&file.dclinks, file),
        SectionKind::DcBus => encode_all(&file.dcbuses, file),
        SectionKind::DcLine => encode_all(&file.dclines, file),
        SectionKind::AcDcConverterLcc => encode_all(&file.lcc_converters, file),
        SectionKind::AcDcConverterVsc => encode_all(&file.vsc_converters, file),
    }
}

fn decode_one<T: RecordCodec>(
    kind: SectionKind,
    line: usize,
    record: &StringRecord,
    file: &NetworkFile,
    index: &KeyIndex,
) -> NpfResult<T> {
    let mut input = RecordReader::new(kind, line, T::SCHEMA, record)?;
    let resolver = Resolver::new(file, index);
    T::decode(&mut input, &resolver)
}

/// Decode one data line of section `kind`, append it to `file` and index its keys.
pub fn decode_record(
    kind: SectionKind,
    line: usize,
    record: &StringRecord,
    file: &mut NetworkFile,
    index: &mut KeyIndex,
) -> NpfResult<()> {
    match kind {
        SectionKind::System => {
            let system = decode_one(kind, line, record, file, index)?;
            file.systems.push(system);
        }
        SectionKind::Region => {
            let region = decode_one(kind, line, record, file, index)?;
            file.regions.push(region);
        }
        SectionKind::Area => {
            let area = decode_one(kind, line, record, file, index)?;
            file.areas.push(area);
        }
        SectionKind::Bus => {
            let bus = decode_one(kind, line, record, file, index)?;
            file.buses.push(bus);
        }
        SectionKind::MiddlePointBus => {
            let bus = decode_one(kind, line, record, file, index)?;
            file.middlepoint_buses.push(bus);
        }
        SectionKind::Demand => {
            let demand = decode_one(kind, line, record, file, index)?;
            file.demands.push(demand);
        }
        SectionKind::Generator => {
            let generator = decode_one(kind, line, record, file, index)?;
            file.generators.push(generator);
        }
        SectionKind::Line => {
            let branch = decode_one(kind, line, record, file, index)?;
            file.lines.push(branch);
        }
        SectionKind::Transformer => {
            let transformer = decode_one(kind, line, record, file, index)?;
            file.transformers.push(transformer);
        }
        SectionKind::EquivalentTransformer => {
            let transformer = decode_one(kind, line, record, file, index)?;
            file.equivalent_transformers.push(transformer);
        }
        SectionKind::ThreeWindingTransformer => {
            let transformer = decode_one(kind, line, record, file, index)?;
            file.three_winding_transformers.push(transformer);
        }
        SectionKind::ControlledSeriesCapacitor => {
            let csc = decode_one(kind, line, record, file, index)?;
            file.cscs.push(csc);
        }
        SectionKind::LineShunt => {
            let shunt = decode_one(kind, line, record, file, index)?;
            file.line_shunts.push(shunt);
        }
        SectionKind::BusShunt => {
            let shunt = decode_one(kind, line, record, file, index)?;
            file.bus_shunts.push(shunt);
        }
        SectionKind::StaticVarCompensator => {
            let svc = decode_one(kind, line, record, file, index)?;
            file.svcs.push(svc);
        }
        SectionKind::DcLink => {
            let link = decode_one(kind, line, record, file, index)?;
            file.dclinks.push(link);
        }
        SectionKind::DcBus => {
            let bus = decode_one(kind, line, record, file, index)?;
            file.dcbuses.push(bus);
        }
        SectionKind::DcLine => {
            let dcline = decode_one(kind, line, record, file, index)?;
            file.dclines.push(dcline);
        }
        SectionKind::AcDcConverterLcc => {
            let converter = decode_one(kind, line, record, file, index)?;
            file.lcc_converters.push(converter);
        }
        SectionKind::AcDcConverterVsc => {
            let converter = decode_one(kind, line, record, file, index)?;
            file.vsc_converters.push(converter);
        }
    }
    index.register_latest(file, kind);
    trace!("decoded {} record on line {}", kind.friendly_name(), line);
    Ok(())
}

/// Encode a single record the way a section writer does.
#[cfg(test)]
pub(crate) fn encode_one<T: RecordCodec>(item: &T, file: &NetworkFile) -> String {
    encode_all(std::slice::from_ref(item), file).remove(0)
}

/// Decode a single data line against the records already in `file`.
#[cfg(test)]
pub(crate) fn decode_line<T: RecordCodec>(
    kind: SectionKind,
    text: &str,
    file: &NetworkFile,
) -> NpfResult<T> {
    let record = crate::field::tokenize(text.trim()).map_err(|e| NpfError::MalformedRecord {
        section: kind,
        line: 1,
        message: e.to_string(),
    })?;
    let index = KeyIndex::build(file);
    decode_one(kind, 1, &record, file, &index)
}

// ---- reference rendering --------------------------------------------------

pub(crate) fn dangling(kind: SectionKind, index: usize) {
    warn!("dangling {} handle #{} written as 0", kind.friendly_name(), index);
}

/// Number and name of a referenced bus; a dangling handle renders as `(0, "")`.
pub(crate) fn bus_label(file: &NetworkFile, handle: BusRef) -> (i64, &str) {
    match file.bus(handle) {
        Some(bus) => (bus.number, bus.name.as_str()),
        None => {
            let kind = match handle.kind {
                BusKind::Regular => SectionKind::Bus,
                BusKind::MiddlePoint => SectionKind::MiddlePointBus,
            };
            dangling(kind, handle.index);
            (0, "")
        }
    }
}

/// Like [`bus_label`]; no bus renders as `(0, "")`.
pub(crate) fn optional_bus_label(file: &NetworkFile, handle: Option<BusRef>) -> (i64, &str) {
    match handle {
        Some(handle) => bus_label(file, handle),
        None => (0, ""),
    }
}

pub(crate) fn dcbus_number(file: &NetworkFile, handle: DcBusRef) -> i64 {
    match file.dcbus(handle) {
        Some(bus) => bus.number,
        None => {
            dangling(SectionKind::DcBus, handle.index());
            0
        }
    }
}

pub(crate) fn transformer_label(file: &NetworkFile, handle: TransformerRef) -> (i64, &str) {
    match file.transformer(handle) {
        Some(transformer) => {
            let (from, _) = bus_label(file, transformer.from_bus);
            (from, transformer.name.as_str())
        }
        None => {
            let kind = match handle.kind {
                TransformerKind::TwoWinding => SectionKind::Transformer,
                TransformerKind::Equivalent => SectionKind::EquivalentTransformer,
            };
            dangling(kind, handle.index);
            (0, "")
        }
    }
}

pub(crate) fn admin_numbers(
    file: &NetworkFile,
    area: AreaRef,
    region: RegionRef,
    system: SystemRef,
) -> (i64, i64, i64) {
    let area = file.area(area).map(|a| a.number).unwrap_or_else(|| {
        dangling(SectionKind::Area, area.index());
        0
    });
    let region = file.region(region).map(|r| r.number).unwrap_or_else(|| {
        dangling(SectionKind::Region, region.index());
        0
    });
    let system = file.system(system).map(|s| s.number).unwrap_or_else(|| {
        dangling(SectionKind::System, system.index());
        0
    });
    (area, region, system)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::tokenize;

    #[test]
    fn every_kind_has_a_comment_and_schema() {
        for kind in SectionKind::ALL {
            assert!(comment(*kind).starts_with(COLUMN_COMMENT_MARKER), "{kind}");
            assert!(!schema(*kind).is_empty(), "{kind}");
        }
    }

    #[test]
    fn schema_widths_match_comment_columns() {
        // Each comment names one column per schema entry.
        for kind in SectionKind::ALL {
            let columns = tokenize(comment(*kind).trim_start_matches('#').trim()).unwrap();
            assert_eq!(columns.len(), schema(*kind).len(), "{kind}");
        }
    }

    #[test]
    fn dangling_handles_render_as_zero() {
        let file = NetworkFile::new();
        assert_eq!(bus_label(&file, BusRef::regular(3)), (0, ""));
        assert_eq!(optional_bus_label(&file, None), (0, ""));
        assert_eq!(dcbus_number(&file, DcBusRef::new(0)), 0);
    }

    #[test]
    fn decode_appends_and_indexes() {
        let mut file = NetworkFile::new();
        let mut index = KeyIndex::new();
        let record = tokenize("\"SY\",\"System\",1").unwrap();
        decode_record(SectionKind::System, 5, &record, &mut file, &mut index).unwrap();
        assert_eq!(file.systems.len(), 1);
        assert_eq!(file.systems[0].id, "SY");
        assert_eq!(index.number(SectionKind::System, 1), Some(0));
    }
}
