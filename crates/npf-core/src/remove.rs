//! Record removal with handle fix-up.
//!
//! Handles are positions, so taking a record out of its sequence moves every
//! later record down by one. The `remove_*` operations rewrite the handles
//! held by the remaining records to follow that move, and refuse to remove a
//! record that another record still refers to.
//!
//! Demands, generators, shunts, SVCs, CSCs, DC lines, converters and
//! three-winding transformers are never referenced by other records; they can
//! be removed straight from their public sequences.

use crate::elements::*;
use crate::error::{NpfError, NpfResult};
use crate::network::NetworkFile;
use crate::refs::*;
use crate::section::SectionKind;

/// Position of a record, qualified by the sequence it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    kind: SectionKind,
    index: usize,
}

fn bus_slot(handle: BusRef) -> Slot {
    let kind = match handle.kind {
        BusKind::Regular => SectionKind::Bus,
        BusKind::MiddlePoint => SectionKind::MiddlePointBus,
    };
    Slot {
        kind,
        index: handle.index,
    }
}

fn transformer_slot(handle: TransformerRef) -> Slot {
    let kind = match handle.kind {
        TransformerKind::TwoWinding => SectionKind::Transformer,
        TransformerKind::Equivalent => SectionKind::EquivalentTransformer,
    };
    Slot {
        kind,
        index: handle.index,
    }
}

/// One handle field of a record, borrowed for rewriting.
enum HandleMut<'a> {
    System(&'a mut SystemRef),
    Region(&'a mut RegionRef),
    Area(&'a mut AreaRef),
    Bus(&'a mut BusRef),
    Line(&'a mut LineRef),
    Transformer(&'a mut TransformerRef),
    DcLink(&'a mut DcLinkRef),
    DcBus(&'a mut DcBusRef),
}

impl HandleMut<'_> {
    fn slot(&self) -> Slot {
        let plain = |kind, index| Slot { kind, index };
        match self {
            HandleMut::System(h) => plain(SectionKind::System, h.index()),
            HandleMut::Region(h) => plain(SectionKind::Region, h.index()),
            HandleMut::Area(h) => plain(SectionKind::Area, h.index()),
            HandleMut::Bus(h) => bus_slot(**h),
            HandleMut::Line(h) => plain(SectionKind::Line, h.index()),
            HandleMut::Transformer(h) => transformer_slot(**h),
            HandleMut::DcLink(h) => plain(SectionKind::DcLink, h.index()),
            HandleMut::DcBus(h) => plain(SectionKind::DcBus, h.index()),
        }
    }

    /// Follow the record one position down if it sat after `removed`.
    fn shift_past(self, removed: Slot) {
        let slot = self.slot();
        if slot.kind != removed.kind || slot.index <= removed.index {
            return;
        }
        let index = slot.index - 1;
        match self {
            HandleMut::System(h) => *h = SystemRef::new(index),
            HandleMut::Region(h) => *h = RegionRef::new(index),
            HandleMut::Area(h) => *h = AreaRef::new(index),
            HandleMut::Bus(h) => h.index = index,
            HandleMut::Line(h) => *h = LineRef::new(index),
            HandleMut::Transformer(h) => h.index = index,
            HandleMut::DcLink(h) => *h = DcLinkRef::new(index),
            HandleMut::DcBus(h) => *h = DcBusRef::new(index),
        }
    }
}

impl NetworkFile {
    /// Visit every handle held by every record, with the kind of its holder.
    fn for_each_handle(&mut self, mut visit: impl FnMut(SectionKind, HandleMut<'_>)) {
        for region in &mut self.regions {
            visit(SectionKind::Region, HandleMut::System(&mut region.system));
        }
        for area in &mut self.areas {
            visit(SectionKind::Area, HandleMut::System(&mut area.system));
        }
        for (kind, buses) in [
            (SectionKind::Bus, &mut self.buses),
            (SectionKind::MiddlePointBus, &mut self.middlepoint_buses),
        ] {
            for bus in buses {
                visit(kind, HandleMut::Area(&mut bus.area));
                visit(kind, HandleMut::Region(&mut bus.region));
                visit(kind, HandleMut::System(&mut bus.system));
            }
        }
        for demand in &mut self.demands {
            visit(SectionKind::Demand, HandleMut::Bus(&mut demand.bus));
        }
        for generator in &mut self.generators {
            visit(SectionKind::Generator, HandleMut::Bus(&mut generator.bus));
            if let Some(ctr_bus) = &mut generator.ctr_bus {
                visit(SectionKind::Generator, HandleMut::Bus(ctr_bus));
            }
        }
        for line in &mut self.lines {
            visit(SectionKind::Line, HandleMut::Bus(&mut line.from_bus));
            visit(SectionKind::Line, HandleMut::Bus(&mut line.to_bus));
        }
        for (kind, transformers) in [
            (SectionKind::Transformer, &mut self.transformers),
            (SectionKind::EquivalentTransformer, &mut self.equivalent_transformers),
        ] {
            for transformer in transformers {
                visit(kind, HandleMut::Bus(&mut transformer.from_bus));
                visit(kind, HandleMut::Bus(&mut transformer.to_bus));
                if let Some(ctr_bus) = &mut transformer.ctr_bus {
                    visit(kind, HandleMut::Bus(ctr_bus));
                }
            }
        }
        for three in &mut self.three_winding_transformers {
            let kind = SectionKind::ThreeWindingTransformer;
            visit(kind, HandleMut::Transformer(&mut three.primary));
            visit(kind, HandleMut::Transformer(&mut three.secondary));
            visit(kind, HandleMut::Transformer(&mut three.tertiary));
            visit(kind, HandleMut::Bus(&mut three.middlepoint));
        }
        for csc in &mut self.cscs {
            visit(SectionKind::ControlledSeriesCapacitor, HandleMut::Bus(&mut csc.from_bus));
            visit(SectionKind::ControlledSeriesCapacitor, HandleMut::Bus(&mut csc.to_bus));
        }
        for shunt in &mut self.line_shunts {
            visit(SectionKind::LineShunt, HandleMut::Line(&mut shunt.circuit));
        }
        for shunt in &mut self.bus_shunts {
            visit(SectionKind::BusShunt, HandleMut::Bus(&mut shunt.bus));
            if let Some(ctr_bus) = &mut shunt.ctr_bus {
                visit(SectionKind::BusShunt, HandleMut::Bus(ctr_bus));
            }
        }
        for svc in &mut self.svcs {
            visit(SectionKind::StaticVarCompensator, HandleMut::Bus(&mut svc.bus));
            if let Some(ctr_bus) = &mut svc.ctr_bus {
                visit(SectionKind::StaticVarCompensator, HandleMut::Bus(ctr_bus));
            }
        }
        for bus in &mut self.dcbuses {
            visit(SectionKind::DcBus, HandleMut::Area(&mut bus.area));
            visit(SectionKind::DcBus, HandleMut::Region(&mut bus.region));
            visit(SectionKind::DcBus, HandleMut::System(&mut bus.system));
            visit(SectionKind::DcBus, HandleMut::DcLink(&mut bus.dc_link));
        }
        for line in &mut self.dclines {
            visit(SectionKind::DcLine, HandleMut::DcBus(&mut line.from_bus));
            visit(SectionKind::DcLine, HandleMut::DcBus(&mut line.to_bus));
        }
        for converter in &mut self.lcc_converters {
            let kind = SectionKind::AcDcConverterLcc;
            visit(kind, HandleMut::Bus(&mut converter.ac_bus));
            visit(kind, HandleMut::DcBus(&mut converter.dc_bus));
            visit(kind, HandleMut::DcBus(&mut converter.neutral_bus));
        }
        for converter in &mut self.vsc_converters {
            let kind = SectionKind::AcDcConverterVsc;
            visit(kind, HandleMut::Bus(&mut converter.ac_bus));
            visit(kind, HandleMut::DcBus(&mut converter.dc_bus));
            visit(kind, HandleMut::DcBus(&mut converter.neutral_bus));
            if let Some(ctr_bus) = &mut converter.ctr_bus {
                visit(kind, HandleMut::Bus(ctr_bus));
            }
        }
    }

    /// Check that `removed` exists and nothing refers to it.
    fn release(&mut self, removed: Slot) -> NpfResult<()> {
        if removed.index >= self.len_of(removed.kind) {
            return Err(NpfError::InvalidHandle {
                kind: removed.kind,
                index: removed.index,
            });
        }
        let mut holder = None;
        self.for_each_handle(|kind, handle| {
            if holder.is_none() && handle.slot() == removed {
                holder = Some(kind);
            }
        });
        match holder {
            Some(by) => Err(NpfError::StillReferenced {
                kind: removed.kind,
                index: removed.index,
                by,
            }),
            None => Ok(()),
        }
    }

    fn close_gap(&mut self, removed: Slot) {
        self.for_each_handle(|_, handle| handle.shift_past(removed));
    }

    pub fn remove_system(&mut self, handle: SystemRef) -> NpfResult<System> {
        let slot = Slot {
            kind: SectionKind::System,
            index: handle.index(),
        };
        self.release(slot)?;
        let system = self.systems.remove(slot.index);
        self.close_gap(slot);
        Ok(system)
    }

    pub fn remove_region(&mut self, handle: RegionRef) -> NpfResult<Region> {
        let slot = Slot {
            kind: SectionKind::Region,
            index: handle.index(),
        };
        self.release(slot)?;
        let region = self.regions.remove(slot.index);
        self.close_gap(slot);
        Ok(region)
    }

    pub fn remove_area(&mut self, handle: AreaRef) -> NpfResult<Area> {
        let slot = Slot {
            kind: SectionKind::Area,
            index: handle.index(),
        };
        self.release(slot)?;
        let area = self.areas.remove(slot.index);
        self.close_gap(slot);
        Ok(area)
    }

    /// Remove a regular or middle point bus.
    ///
    /// Fails with [`NpfError::StillReferenced`] while any record is attached
    /// to the bus; the file is left untouched in that case.
    pub fn remove_bus(&mut self, handle: BusRef) -> NpfResult<Bus> {
        let slot = bus_slot(handle);
        self.release(slot)?;
        let bus = match handle.kind {
            BusKind::Regular => self.buses.remove(handle.index),
            BusKind::MiddlePoint => self.middlepoint_buses.remove(handle.index),
        };
        self.close_gap(slot);
        Ok(bus)
    }

    pub fn remove_line(&mut self, handle: LineRef) -> NpfResult<Line> {
        let slot = Slot {
            kind: SectionKind::Line,
            index: handle.index(),
        };
        self.release(slot)?;
        let line = self.lines.remove(slot.index);
        self.close_gap(slot);
        Ok(line)
    }

    /// Remove a two-winding or equivalent transformer. Windings of a
    /// three-winding transformer are in use until that record is removed.
    pub fn remove_transformer(&mut self, handle: TransformerRef) -> NpfResult<Transformer> {
        let slot = transformer_slot(handle);
        self.release(slot)?;
        let transformer = match handle.kind {
            TransformerKind::TwoWinding => self.transformers.remove(handle.index),
            TransformerKind::Equivalent => self.equivalent_transformers.remove(handle.index),
        };
        self.close_gap(slot);
        Ok(transformer)
    }

    pub fn remove_dclink(&mut self, handle: DcLinkRef) -> NpfResult<DcLink> {
        let slot = Slot {
            kind: SectionKind::DcLink,
            index: handle.index(),
        };
        self.release(slot)?;
        let link = self.dclinks.remove(slot.index);
        self.close_gap(slot);
        Ok(link)
    }

    pub fn remove_dcbus(&mut self, handle: DcBusRef) -> NpfResult<DcBus> {
        let slot = Slot {
            kind: SectionKind::DcBus,
            index: handle.index(),
        };
        self.release(slot)?;
        let bus = self.dcbuses.remove(slot.index);
        self.close_gap(slot);
        Ok(bus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::DcLinkType;

    struct Grid {
        file: NetworkFile,
        buses: Vec<BusRef>,
    }

    fn three_bus_grid() -> Grid {
        let mut file = NetworkFile::with_description("removal");
        let system = file.add_system(System::new("SY", "System", 1));
        let region = file.add_region(Region::new("RE", "Region", 1, system));
        let area = file.add_area(Area::new("AR", "Area", 1, system));
        let buses = (1..=3)
            .map(|number| {
                file.add_bus(Bus::new(number, format!("Bus {}", number), area, region, system))
            })
            .collect();
        Grid { file, buses }
    }

    #[test]
    fn removing_an_unreferenced_bus_keeps_later_references_on_target() {
        let Grid { mut file, buses } = three_bus_grid();
        file.add_demand(Demand::new(1, "Load 3", buses[2]));
        file.add_generator(Generator::new(1, "Gen 2", buses[1]));

        let removed = file.remove_bus(buses[0]).unwrap();

        assert_eq!(removed.number, 1);
        assert_eq!(file.bus_number(file.generators[0].bus), Some(2));
        assert_eq!(file.bus_number(file.demands[0].bus), Some(3));
        assert_eq!(file.find_bus(3).unwrap(), file.demands[0].bus);
    }

    #[test]
    fn referenced_bus_is_kept_and_reported() {
        let Grid { mut file, buses } = three_bus_grid();
        file.add_demand(Demand::new(1, "Load 2", buses[1]));
        let before = file.clone();

        match file.remove_bus(buses[1]) {
            Err(NpfError::StillReferenced { kind, index, by }) => {
                assert_eq!(kind, SectionKind::Bus);
                assert_eq!(index, 1);
                assert_eq!(by, SectionKind::Demand);
            }
            other => panic!("unexpected result {other:?}"),
        }
        assert_eq!(file, before);
    }

    #[test]
    fn control_bus_counts_as_a_reference() {
        let Grid { mut file, buses } = three_bus_grid();
        let mut generator = Generator::new(1, "Gen 1", buses[0]);
        generator.ctr_bus = Some(buses[2]);
        file.add_generator(generator);

        assert!(matches!(
            file.remove_bus(buses[2]),
            Err(NpfError::StillReferenced {
                by: SectionKind::Generator,
                ..
            })
        ));
    }

    #[test]
    fn middle_point_removal_leaves_regular_handles_alone() {
        let Grid { mut file, buses } = three_bus_grid();
        let template = file.buses[0].clone();
        let spare = file.add_middlepoint_bus(Bus {
            number: 99,
            ..template.clone()
        });
        let star = file.add_middlepoint_bus(Bus {
            number: 100,
            ..template
        });
        let winding = file.add_equivalent_transformer(Transformer::new(buses[1], star, 1));

        file.remove_bus(spare).unwrap();

        let winding = file.transformer(winding).unwrap();
        assert_eq!(file.bus_number(winding.from_bus), Some(2));
        assert_eq!(file.bus_number(winding.to_bus), Some(100));
        assert_eq!(winding.to_bus, BusRef::middle_point(0));
    }

    #[test]
    fn line_removal_follows_line_shunts() {
        let Grid { mut file, buses } = three_bus_grid();
        let first = file.add_line(Line::new(buses[0], buses[1], 1));
        let second = file.add_line(Line::new(buses[1], buses[2], 1));
        file.add_line_shunt(LineShunt::new(1, "LS23", second));

        file.remove_line(first).unwrap();
        assert_eq!(file.line_shunts[0].circuit, LineRef::new(0));
        assert_eq!(file.find_line(2, 3, 1).unwrap(), file.line_shunts[0].circuit);

        assert!(matches!(
            file.remove_line(LineRef::new(0)),
            Err(NpfError::StillReferenced {
                kind: SectionKind::Line,
                by: SectionKind::LineShunt,
                ..
            })
        ));
    }

    #[test]
    fn windings_stay_in_use_until_their_three_winding_record_goes() {
        let Grid { mut file, buses } = three_bus_grid();
        let template = file.buses[0].clone();
        let star = file.add_middlepoint_bus(Bus {
            number: 100,
            ..template
        });
        let spare = file.add_equivalent_transformer(Transformer::new(buses[0], buses[1], 9));
        let windings = [0, 1, 2].map(|i| {
            let name = format!("W{}", i + 1);
            file.add_equivalent_transformer(Transformer::new(buses[i], star, 1).with_name(name))
        });
        file.add_three_winding_transformer(ThreeWindingTransformer::new(
            windings[0],
            windings[1],
            windings[2],
            star,
        ));

        file.remove_transformer(spare).unwrap();
        let three = &file.three_winding_transformers[0];
        let names: Vec<&str> = three
            .windings()
            .iter()
            .filter_map(|w| file.transformer(*w))
            .map(|w| w.name.as_str())
            .collect();
        assert_eq!(names, ["W1", "W2", "W3"]);

        let primary = three.primary;
        assert!(file.remove_transformer(primary).is_err());
        file.three_winding_transformers.clear();
        assert_eq!(file.remove_transformer(primary).unwrap().name, "W1");
    }

    #[test]
    fn dc_bus_removal_shifts_converter_terminals() {
        let Grid { mut file, buses } = three_bus_grid();
        let system = file.buses[0].system;
        let region = file.buses[0].region;
        let area = file.buses[0].area;
        let link = file.add_dclink(DcLink::new(1, "Link", DcLinkType::Lcc));
        let spare = file.add_dcbus(DcBus::new(10, "Spare", area, region, system, link));
        let pole = file.add_dcbus(DcBus::new(11, "Pole", area, region, system, link));
        let neutral = file.add_dcbus(DcBus::new(12, "Neutral", area, region, system, link));
        file.add_lcc_converter(AcDcConverterLcc::new(1, buses[0], pole, neutral));

        file.remove_dcbus(spare).unwrap();

        let converter = &file.lcc_converters[0];
        assert_eq!(file.dcbus_number(converter.dc_bus), Some(11));
        assert_eq!(file.dcbus_number(converter.neutral_bus), Some(12));
        assert!(file.remove_dclink(link).is_err());
    }

    #[test]
    fn admin_records_in_use_cannot_be_removed() {
        let Grid { mut file, .. } = three_bus_grid();
        let extra = file.add_system(System::new("S0", "Unused", 0));
        let system = file.buses[0].system;

        assert!(matches!(
            file.remove_system(system),
            Err(NpfError::StillReferenced {
                kind: SectionKind::System,
                by: SectionKind::Region,
                ..
            })
        ));
        assert_eq!(file.remove_system(extra).unwrap().number, 0);
        assert_eq!(file.system(system).map(|s| s.number), Some(1));
    }

    #[test]
    fn stale_handles_are_rejected() {
        let Grid { mut file, .. } = three_bus_grid();
        assert!(matches!(
            file.remove_bus(BusRef::regular(7)),
            Err(NpfError::InvalidHandle {
                kind: SectionKind::Bus,
                index: 7
            })
        ));
        assert!(matches!(
            file.remove_area(AreaRef::new(3)),
            Err(NpfError::InvalidHandle { .. })
        ));
    }
}
