//! Bus-connected elements: demands, generators and shunt devices.

use serde::{Deserialize, Serialize};

use crate::codes::{BusShuntType, Condition, GeneratorType, Op};
use crate::defaults::{DEFAULT_DATE, STATUS_ON};
use crate::refs::BusRef;

/// Load connected to a bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demand {
    pub number: i64,
    pub name: String,
    pub op: Op,
    pub bus: BusRef,
    pub units: u32,
    pub date: String,
    pub condition: Condition,
    pub p_mw: f64,
    pub q_mvar: f64,
}

impl Demand {
    pub fn new(number: i64, name: impl Into<String>, bus: BusRef) -> Self {
        Self {
            number,
            name: name.into(),
            op: Op::Add,
            bus,
            units: 1,
            date: DEFAULT_DATE.to_string(),
            condition: Condition::Registry,
            p_mw: 0.0,
            q_mvar: 0.0,
        }
    }

    pub fn with_power(mut self, p_mw: f64, q_mvar: f64) -> Self {
        self.p_mw = p_mw;
        self.q_mvar = q_mvar;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generator {
    pub number: i64,
    pub name: String,
    pub op: Op,
    pub bus: BusRef,
    pub gen_type: GeneratorType,
    pub units: u32,
    pub pmin: f64,
    pub pmax: f64,
    pub qmin: f64,
    pub qmax: f64,
    pub date: String,
    pub condition: Condition,
    /// Bus whose voltage is controlled, if any
    pub ctr_bus: Option<BusRef>,
    pub ctr_type: i64,
    pub power_factor: f64,
    pub units_on: u32,
    pub pgen: f64,
    pub qgen: f64,
}

impl Generator {
    pub fn new(number: i64, name: impl Into<String>, bus: BusRef) -> Self {
        Self {
            number,
            name: name.into(),
            op: Op::Add,
            bus,
            gen_type: GeneratorType::Thermal,
            units: 1,
            pmin: 0.0,
            pmax: 0.0,
            qmin: 0.0,
            qmax: 0.0,
            date: DEFAULT_DATE.to_string(),
            condition: Condition::Registry,
            ctr_bus: None,
            ctr_type: 0,
            power_factor: 1.0,
            units_on: 1,
            pgen: 0.0,
            qgen: 0.0,
        }
    }

    /// Set active and reactive power limits.
    pub fn with_limits(mut self, pmin: f64, pmax: f64, qmin: f64, qmax: f64) -> Self {
        self.pmin = pmin;
        self.pmax = pmax;
        self.qmin = qmin;
        self.qmax = qmax;
        self
    }
}

/// Reactor or capacitor bank connected to a bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusShunt {
    pub number: i64,
    pub name: String,
    pub op: Op,
    pub bus: BusRef,
    pub ctr_bus: Option<BusRef>,
    pub shunt_type: BusShuntType,
    pub ctr_type: i64,
    pub units: u32,
    /// Reactive power per unit (MVAr)
    pub mvar: f64,
    pub cost: f64,
    pub date: String,
    pub condition: Condition,
    pub units_on: u32,
}

impl BusShunt {
    pub fn new(number: i64, name: impl Into<String>, bus: BusRef) -> Self {
        Self {
            number,
            name: name.into(),
            op: Op::Add,
            bus,
            ctr_bus: None,
            shunt_type: BusShuntType::Reactor,
            ctr_type: 0,
            units: 1,
            mvar: 0.0,
            cost: 0.0,
            date: DEFAULT_DATE.to_string(),
            condition: Condition::Registry,
            units_on: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticVarCompensator {
    pub number: i64,
    pub name: String,
    pub op: Op,
    pub bus: BusRef,
    pub ctr_bus: Option<BusRef>,
    pub droop: f64,
    pub ctr_mode: i64,
    pub units: u32,
    pub qmin: f64,
    pub qmax: f64,
    pub cost: f64,
    pub date: String,
    pub condition: Condition,
    pub status: u8,
    pub mvar_setpoint: f64,
}

impl StaticVarCompensator {
    pub const MODE_POWER: i64 = 1;

    pub fn new(number: i64, name: impl Into<String>, bus: BusRef) -> Self {
        Self {
            number,
            name: name.into(),
            op: Op::Add,
            bus,
            ctr_bus: None,
            droop: 0.0,
            ctr_mode: Self::MODE_POWER,
            units: 1,
            qmin: 0.0,
            qmax: 0.0,
            cost: 0.0,
            date: DEFAULT_DATE.to_string(),
            condition: Condition::Registry,
            status: STATUS_ON,
            mvar_setpoint: 0.0,
        }
    }
}
