use npf_core::*;

/// Seven-bus network with at least one record of every kind.
///
/// Buses 1-7 share one system and region and are split over two areas. Bus
/// 100 is the middle point of a three-winding transformer between buses 5, 6
/// and 7. Link 1 is an LCC bipole (DC buses 11-14), link 2 a VSC link (DC
/// buses 21-24).
pub fn seven_bus_network() -> NetworkFile {
    let mut file = NetworkFile::with_description("Seven bus test network");

    let system = file.add_system(System::new("SY", "Test system", 1));
    let region = file.add_region(Region::new("RE", "Region", 1, system));
    let north = file.add_area(Area::new("NO", "North", 1, system));
    let south = file.add_area(Area::new("SO", "South", 2, system));

    let buses: Vec<BusRef> = (1..=7)
        .map(|number| {
            let area = if number <= 4 { north } else { south };
            let kv = if number <= 4 { 230.0 } else { 138.0 };
            file.add_bus(
                Bus::new(number, format!("Bus {}", number), area, region, system).with_kv_base(kv),
            )
        })
        .collect();
    let bus = |number: usize| buses[number - 1];
    let star = file.add_middlepoint_bus(Bus::new(100, "Star", south, region, system));

    file.add_demand(Demand::new(1, "Load 2", bus(2)).with_power(80.0, 20.0));
    file.add_demand(Demand::new(2, "Load 6", bus(6)).with_power(45.5, 12.25));

    file.add_generator(Generator::new(1, "Gen 1", bus(1)).with_limits(10.0, 250.0, -80.0, 120.0));
    let mut hydro = Generator::new(2, "Gen 5", bus(5)).with_limits(0.0, 90.0, -30.0, 45.0);
    hydro.gen_type = GeneratorType::Hydro;
    hydro.ctr_bus = Some(bus(4));
    hydro.ctr_type = 2;
    hydro.pgen = 60.0;
    file.add_generator(hydro);

    let lines: Vec<LineRef> = [(1, 2), (2, 3), (3, 4)]
        .into_iter()
        .enumerate()
        .map(|(position, (from, to))| {
            let mut line = Line::new(bus(from), bus(to), 1).with_impedance(0.5, 5.0, 12.0);
            line.number = position as i64 + 1;
            line.name = format!("L{}{}", from, to);
            line.length_km = 42.5;
            file.add_line(line)
        })
        .collect();

    let mut transformer = Transformer::new(bus(4), bus(5), 1).with_name("T45");
    transformer.r_pct = 0.2;
    transformer.x_pct = 9.5;
    transformer.control_type = defaults::XFMR_VAR_TAP_FIXED_ANGLE;
    transformer.ctr_bus = Some(bus(5));
    transformer.power_factor = 0.95;
    file.add_transformer(transformer);

    let windings = [(5, "EQ_P"), (6, "EQ_S"), (7, "EQ_T")].map(|(from, name)| {
        file.add_equivalent_transformer(Transformer::new(bus(from), star, 1).with_name(name))
    });
    let mut three = ThreeWindingTransformer::new(windings[0], windings[1], windings[2], star);
    three.name = "TW567".into();
    three.x_ps_pct = 10.0;
    three.x_st_pct = 12.0;
    three.x_pt_pct = 14.0;
    three.sbase_ps_mva = 100.0;
    file.add_three_winding_transformer(three);

    let mut csc = ControlledSeriesCapacitor::new(bus(1), bus(3), 1);
    csc.name = "TCSC13".into();
    csc.xmin_pct = -4.0;
    csc.xmax_pct = -1.0;
    csc.cost = 7.5;
    file.add_csc(csc);

    let mut shunt = LineShunt::new(1, "LS12", lines[0]);
    shunt.mvar = -15.0;
    shunt.terminal = ShuntTerminal::To;
    file.add_line_shunt(shunt);

    let mut capacitor = BusShunt::new(1, "Cap 3", bus(3));
    capacitor.shunt_type = BusShuntType::Capacitor;
    capacitor.mvar = 25.0;
    file.add_bus_shunt(capacitor);
    let mut reactor = BusShunt::new(2, "Reac 6", bus(6));
    reactor.mvar = -10.0;
    reactor.ctr_bus = Some(bus(6));
    file.add_bus_shunt(reactor);

    let mut svc = StaticVarCompensator::new(1, "SVC 7", bus(7));
    svc.qmin = -50.0;
    svc.qmax = 100.0;
    svc.ctr_bus = Some(bus(7));
    file.add_svc(svc);

    let links = [(1, "Bipole", DcLinkType::Lcc), (2, "Vsc link", DcLinkType::Vsc)];
    for (number, name, link_type) in links {
        let link = file.add_dclink(DcLink::new(number, name, link_type));
        let base = number * 10;
        let pole_a = file.add_dcbus(DcBus::new(
            base + 1,
            format!("Pole {}A", number),
            north,
            region,
            system,
            link,
        ));
        let pole_b = file.add_dcbus(DcBus::new(
            base + 2,
            format!("Pole {}B", number),
            south,
            region,
            system,
            link,
        ));
        let neutral_a = file.add_dcbus(
            DcBus::new(base + 3, format!("Neut {}A", number), north, region, system, link)
                .with_polarity(DcPolarity::Neutral),
        );
        let neutral_b = file.add_dcbus(
            DcBus::new(base + 4, format!("Neut {}B", number), south, region, system, link)
                .with_polarity(DcPolarity::Neutral),
        );

        let mut dcline = DcLine::new(pole_a, pole_b, 1);
        dcline.r_ohm = 3.5;
        dcline.number = number;
        dcline.name = format!("DC line {}", number);
        file.add_dcline(dcline);

        match link_type {
            DcLinkType::Lcc => {
                let mut rectifier = AcDcConverterLcc::new(base + 1, bus(2), pole_a, neutral_a);
                rectifier.name = "Rect".into();
                rectifier.tap = 1.0625;
                let mut inverter = AcDcConverterLcc::new(base + 2, bus(6), pole_b, neutral_b);
                inverter.converter_type = LccConverterType::Inverter;
                inverter.name = "Inv".into();
                file.add_lcc_converter(rectifier);
                file.add_lcc_converter(inverter);
            }
            DcLinkType::Vsc => {
                let mut sending = AcDcConverterVsc::new(base + 1, bus(3), pole_a, neutral_a);
                sending.converter_mode = "P".into();
                sending.power_factor = 0.9;
                sending.ctr_bus = Some(bus(3));
                let mut receiving = AcDcConverterVsc::new(base + 2, bus(7), pole_b, neutral_b);
                receiving.converter_mode = "V".into();
                file.add_vsc_converter(sending);
                file.add_vsc_converter(receiving);
            }
        }
    }

    file
}
