use serde::{Deserialize, Serialize};

use crate::codes::{Condition, Op};
use crate::defaults::{DEFAULT_DATE, KV_BASE, STATUS_ON};
use crate::refs::{AreaRef, RegionRef, SystemRef};

/// AC network node.
///
/// The same record shape is stored in both [`crate::NetworkFile::buses`] and
/// [`crate::NetworkFile::middlepoint_buses`]; the owning sequence decides the
/// section the bus is written to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bus {
    pub number: i64,
    pub name: String,
    pub op: Op,
    /// Base voltage in kV
    pub kv_base: f64,
    pub area: AreaRef,
    pub region: RegionRef,
    pub system: SystemRef,
    pub date: String,
    pub condition: Condition,
    pub cost: f64,
    pub bus_type: i64,
    pub load_shed: i64,
    /// Voltage magnitude (per-unit)
    pub voltage: f64,
    /// Voltage angle (degrees)
    pub angle: f64,
    pub vmax: f64,
    pub vmin: f64,
    /// Emergency voltage limits
    pub emergency_vmax: f64,
    pub emergency_vmin: f64,
    pub status: u8,
    pub extended_name: String,
}

impl Bus {
    pub fn new(
        number: i64,
        name: impl Into<String>,
        area: AreaRef,
        region: RegionRef,
        system: SystemRef,
    ) -> Self {
        Self {
            number,
            name: name.into(),
            op: Op::Add,
            kv_base: KV_BASE,
            area,
            region,
            system,
            date: DEFAULT_DATE.to_string(),
            condition: Condition::Registry,
            cost: 0.0,
            bus_type: 0,
            load_shed: 0,
            voltage: 1.0,
            angle: 0.0,
            vmax: 1.2,
            vmin: 0.8,
            emergency_vmax: 1.2,
            emergency_vmin: 0.8,
            status: STATUS_ON,
            extended_name: String::new(),
        }
    }

    /// Set the base voltage in kV.
    pub fn with_kv_base(mut self, kv_base: f64) -> Self {
        self.kv_base = kv_base;
        self
    }
}
