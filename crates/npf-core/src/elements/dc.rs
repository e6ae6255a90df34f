//! HVDC links: DC buses, DC lines and the AC/DC converters tying them to the
//! AC network.

use serde::{Deserialize, Serialize};

use crate::codes::{Condition, DcLinkType, DcPolarity, LccConverterType, MeteringEnd, Op};
use crate::defaults::{DEFAULT_DATE, FLOW_MAX, HZ_BASE, KV_BASE, MVA_BASE, STATUS_ON};
use crate::refs::{AreaRef, BusRef, DcBusRef, DcLinkRef, RegionRef, SystemRef};

/// Grouping of DC equipment sharing one base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcLink {
    pub number: i64,
    pub name: String,
    pub kv_base: f64,
    pub mw_base: f64,
    pub link_type: DcLinkType,
}

impl DcLink {
    pub fn new(number: i64, name: impl Into<String>, link_type: DcLinkType) -> Self {
        Self {
            number,
            name: name.into(),
            kv_base: KV_BASE,
            mw_base: MVA_BASE,
            link_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcBus {
    pub number: i64,
    pub name: String,
    pub op: Op,
    pub bus_type: i64,
    pub polarity: DcPolarity,
    /// Ground resistance (ohm)
    pub ground_r: f64,
    pub area: AreaRef,
    pub region: RegionRef,
    pub system: SystemRef,
    pub dc_link: DcLinkRef,
    pub date: String,
    pub condition: Condition,
    pub cost: f64,
    pub voltage: f64,
}

impl DcBus {
    pub fn new(
        number: i64,
        name: impl Into<String>,
        area: AreaRef,
        region: RegionRef,
        system: SystemRef,
        dc_link: DcLinkRef,
    ) -> Self {
        Self {
            number,
            name: name.into(),
            op: Op::Add,
            bus_type: 0,
            polarity: DcPolarity::Positive,
            ground_r: 0.0,
            area,
            region,
            system,
            dc_link,
            date: DEFAULT_DATE.to_string(),
            condition: Condition::Registry,
            cost: 0.0,
            voltage: 1.0,
        }
    }

    pub fn with_polarity(mut self, polarity: DcPolarity) -> Self {
        self.polarity = polarity;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcLine {
    pub from_bus: DcBusRef,
    pub to_bus: DcBusRef,
    pub parallel_circuit: i64,
    pub op: Op,
    pub metering_end: MeteringEnd,
    pub r_ohm: f64,
    pub l_ohm: f64,
    pub normal_rating: f64,
    pub cost: f64,
    pub date: String,
    pub condition: Condition,
    pub number: i64,
    pub name: String,
    pub status: u8,
}

impl DcLine {
    pub fn new(from_bus: DcBusRef, to_bus: DcBusRef, parallel_circuit: i64) -> Self {
        Self {
            from_bus,
            to_bus,
            parallel_circuit,
            op: Op::Add,
            metering_end: MeteringEnd::From,
            r_ohm: 0.0,
            l_ohm: 0.0,
            normal_rating: FLOW_MAX,
            cost: 0.0,
            date: DEFAULT_DATE.to_string(),
            condition: Condition::Registry,
            number: 0,
            name: String::new(),
            status: STATUS_ON,
        }
    }
}

/// Line-commutated (thyristor) converter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcDcConverterLcc {
    pub number: i64,
    pub op: Op,
    pub metering_end: MeteringEnd,
    pub ac_bus: BusRef,
    pub dc_bus: DcBusRef,
    pub neutral_bus: DcBusRef,
    pub converter_type: LccConverterType,
    pub nominal_current: f64,
    pub bridges: u32,
    pub xc: f64,
    pub vfs: f64,
    pub nominal_power: f64,
    pub tap_min: f64,
    pub tap_max: f64,
    pub tap_steps: u32,
    /// Single-letter control mode, "P" (power) by default
    pub control_mode: String,
    pub flow_ac_dc: f64,
    pub flow_dc_ac: f64,
    pub rectifier_firing_angle_set: f64,
    pub rectifier_firing_angle_min: f64,
    pub rectifier_firing_angle_max: f64,
    pub inverter_firing_angle_set: f64,
    pub inverter_firing_angle_min: f64,
    pub inverter_firing_angle_max: f64,
    pub ccc_capacitance: f64,
    pub cost: f64,
    pub date: String,
    pub condition: Condition,
    pub name: String,
    pub hz_base: u32,
    pub status: u8,
    pub tap: f64,
    pub setpoint: f64,
}

impl AcDcConverterLcc {
    pub fn new(number: i64, ac_bus: BusRef, dc_bus: DcBusRef, neutral_bus: DcBusRef) -> Self {
        Self {
            number,
            op: Op::Add,
            metering_end: MeteringEnd::From,
            ac_bus,
            dc_bus,
            neutral_bus,
            converter_type: LccConverterType::Rectifier,
            nominal_current: 0.0,
            bridges: 2,
            xc: 0.0,
            vfs: 0.0,
            nominal_power: 0.0,
            tap_min: 0.8,
            tap_max: 1.2,
            tap_steps: 100,
            control_mode: "P".to_string(),
            flow_ac_dc: FLOW_MAX,
            flow_dc_ac: FLOW_MAX,
            rectifier_firing_angle_set: 0.0,
            rectifier_firing_angle_min: 0.0,
            rectifier_firing_angle_max: 0.0,
            inverter_firing_angle_set: 0.0,
            inverter_firing_angle_min: 0.0,
            inverter_firing_angle_max: 0.0,
            ccc_capacitance: 0.0,
            cost: 0.0,
            date: DEFAULT_DATE.to_string(),
            condition: Condition::Registry,
            name: String::new(),
            hz_base: HZ_BASE,
            status: STATUS_ON,
            tap: 1.0,
            setpoint: 0.0,
        }
    }
}

/// Voltage-source converter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcDcConverterVsc {
    pub number: i64,
    pub op: Op,
    pub metering_end: MeteringEnd,
    pub ac_bus: BusRef,
    pub dc_bus: DcBusRef,
    pub neutral_bus: DcBusRef,
    pub converter_mode: String,
    pub voltage_mode: String,
    pub a_loss: f64,
    pub b_loss: f64,
    pub min_loss: f64,
    pub flow_ac_dc: f64,
    pub flow_dc_ac: f64,
    pub max_current: f64,
    pub power_factor: f64,
    pub qmin: f64,
    pub qmax: f64,
    pub ctr_bus: Option<BusRef>,
    pub rmpct: f64,
    pub cost: f64,
    pub date: String,
    pub condition: Condition,
    pub name: String,
    pub status: u8,
    pub setpoint: f64,
}

impl AcDcConverterVsc {
    pub fn new(number: i64, ac_bus: BusRef, dc_bus: DcBusRef, neutral_bus: DcBusRef) -> Self {
        Self {
            number,
            op: Op::Add,
            metering_end: MeteringEnd::From,
            ac_bus,
            dc_bus,
            neutral_bus,
            converter_mode: String::new(),
            voltage_mode: String::new(),
            a_loss: 0.0,
            b_loss: 0.0,
            min_loss: 0.0,
            flow_ac_dc: 0.0,
            flow_dc_ac: 0.0,
            max_current: 0.0,
            power_factor: 0.0,
            qmin: 0.0,
            qmax: 0.0,
            ctr_bus: None,
            rmpct: 0.0,
            cost: 0.0,
            date: DEFAULT_DATE.to_string(),
            condition: Condition::Registry,
            name: String::new(),
            status: STATUS_ON,
            setpoint: 0.0,
        }
    }
}
