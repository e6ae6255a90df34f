//! Branch elements connecting two buses, plus the shunts hung off them.

use serde::{Deserialize, Serialize};

use crate::codes::{Condition, MeteringEnd, Op, ShuntTerminal};
use crate::defaults::{DEFAULT_DATE, FLOW_MAX, STATUS_OFF, STATUS_ON};
use crate::network::NetworkFile;
use crate::refs::{BusRef, LineRef, TransformerRef};

/// AC line, jumper, breaker or switch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub from_bus: BusRef,
    pub to_bus: BusRef,
    pub parallel_circuit: i64,
    pub op: Op,
    pub metering_end: MeteringEnd,
    pub r_pct: f64,
    pub x_pct: f64,
    /// Total line charging (MVAr)
    pub mvar: f64,
    pub normal_rating: f64,
    pub emergency_rating: f64,
    pub power_factor: f64,
    pub cost: f64,
    pub date: String,
    pub condition: Condition,
    pub number: i64,
    pub line_type: i64,
    pub name: String,
    pub env_factor: i64,
    pub length_km: f64,
    pub status: u8,
    pub extended_name: String,
}

impl Line {
    pub const TYPE_LINE: i64 = 0;
    pub const TYPE_JUMPER: i64 = -1;
    pub const TYPE_BREAKER: i64 = -2;
    pub const TYPE_SWITCH: i64 = -3;

    pub fn new(from_bus: BusRef, to_bus: BusRef, parallel_circuit: i64) -> Self {
        Self {
            from_bus,
            to_bus,
            parallel_circuit,
            op: Op::Add,
            metering_end: MeteringEnd::From,
            r_pct: 0.0,
            x_pct: 0.0,
            mvar: 0.0,
            normal_rating: FLOW_MAX,
            emergency_rating: FLOW_MAX,
            power_factor: 0.0,
            cost: 0.0,
            date: DEFAULT_DATE.to_string(),
            condition: Condition::Registry,
            number: 0,
            line_type: Self::TYPE_LINE,
            name: String::new(),
            env_factor: 0,
            length_km: 0.0,
            status: STATUS_ON,
            extended_name: String::new(),
        }
    }

    /// Set resistance, reactance (percent) and charging (MVAr).
    pub fn with_impedance(mut self, r_pct: f64, x_pct: f64, mvar: f64) -> Self {
        self.r_pct = r_pct;
        self.x_pct = x_pct;
        self.mvar = mvar;
        self
    }
}

/// Reactive compensation attached to one end of a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineShunt {
    pub number: i64,
    pub name: String,
    pub op: Op,
    pub circuit: LineRef,
    pub mvar: f64,
    pub terminal: ShuntTerminal,
    pub cost: f64,
    pub date: String,
    pub condition: Condition,
    pub status: u8,
}

impl LineShunt {
    pub fn new(number: i64, name: impl Into<String>, circuit: LineRef) -> Self {
        Self {
            number,
            name: name.into(),
            op: Op::Add,
            circuit,
            mvar: 0.0,
            terminal: ShuntTerminal::From,
            cost: 0.0,
            date: DEFAULT_DATE.to_string(),
            condition: Condition::Registry,
            status: STATUS_ON,
        }
    }
}

/// Two-winding transformer.
///
/// Also used for the star-equivalent windings of a three-winding transformer,
/// which are stored in [`NetworkFile::equivalent_transformers`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transformer {
    pub from_bus: BusRef,
    pub to_bus: BusRef,
    pub parallel_circuit: i64,
    pub op: Op,
    pub metering_end: MeteringEnd,
    pub r_pct: f64,
    pub x_pct: f64,
    pub tap_min: f64,
    pub tap_max: f64,
    pub phase_min: f64,
    pub phase_max: f64,
    /// One of the `XFMR_*` constants, or 0 for no control
    pub control_type: i64,
    pub ctr_bus: Option<BusRef>,
    pub tap_steps: u32,
    pub normal_rating: f64,
    pub emergency_rating: f64,
    pub power_factor: f64,
    pub cost: f64,
    pub date: String,
    pub condition: Condition,
    pub series_number: i64,
    pub name: String,
    pub env: i64,
    pub extended_name: String,
    pub status: u8,
    pub tap: f64,
    pub phase: f64,
    pub min_flow: f64,
    pub max_flow: f64,
    pub emergency_min_flow: f64,
    pub emergency_max_flow: f64,
}

impl Transformer {
    pub fn new(from_bus: BusRef, to_bus: BusRef, parallel_circuit: i64) -> Self {
        Self {
            from_bus,
            to_bus,
            parallel_circuit,
            op: Op::Add,
            metering_end: MeteringEnd::From,
            r_pct: 0.0,
            x_pct: 0.0,
            tap_min: 0.8,
            tap_max: 1.2,
            phase_min: 0.0,
            phase_max: 0.0,
            control_type: 0,
            ctr_bus: None,
            tap_steps: 20,
            normal_rating: FLOW_MAX,
            emergency_rating: FLOW_MAX,
            power_factor: 0.0,
            cost: 0.0,
            date: DEFAULT_DATE.to_string(),
            condition: Condition::Registry,
            series_number: 0,
            name: String::new(),
            env: 0,
            extended_name: String::new(),
            status: STATUS_ON,
            tap: 1.0,
            phase: 0.0,
            min_flow: -FLOW_MAX,
            max_flow: FLOW_MAX,
            emergency_min_flow: -FLOW_MAX,
            emergency_max_flow: FLOW_MAX,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Three-winding transformer expressed as three equivalent windings meeting
/// at a middle point bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreeWindingTransformer {
    pub primary: TransformerRef,
    pub secondary: TransformerRef,
    pub tertiary: TransformerRef,
    pub middlepoint: BusRef,
    pub parallel_circuit: i64,
    pub op: Op,
    pub metering_end: MeteringEnd,
    pub r_ps_pct: f64,
    pub x_ps_pct: f64,
    pub sbase_ps_mva: f64,
    pub r_st_pct: f64,
    pub x_st_pct: f64,
    pub sbase_st_mva: f64,
    pub r_pt_pct: f64,
    pub x_pt_pct: f64,
    pub sbase_pt_mva: f64,
    pub power_factor: f64,
    pub cost: f64,
    pub date: String,
    pub condition: Condition,
    pub series_number: i64,
    pub name: String,
    pub extended_name: String,
}

impl ThreeWindingTransformer {
    pub fn new(
        primary: TransformerRef,
        secondary: TransformerRef,
        tertiary: TransformerRef,
        middlepoint: BusRef,
    ) -> Self {
        Self {
            primary,
            secondary,
            tertiary,
            middlepoint,
            parallel_circuit: 1,
            op: Op::Add,
            metering_end: MeteringEnd::From,
            r_ps_pct: 0.0,
            x_ps_pct: 0.0,
            sbase_ps_mva: 0.0,
            r_st_pct: 0.0,
            x_st_pct: 0.0,
            sbase_st_mva: 0.0,
            r_pt_pct: 0.0,
            x_pt_pct: 0.0,
            sbase_pt_mva: 0.0,
            power_factor: 0.0,
            cost: 0.0,
            date: DEFAULT_DATE.to_string(),
            condition: Condition::Registry,
            series_number: 0,
            name: String::new(),
            extended_name: String::new(),
        }
    }

    /// The three winding transformers in primary, secondary, tertiary order.
    pub fn windings(&self) -> [TransformerRef; 3] {
        [self.primary, self.secondary, self.tertiary]
    }

    /// From-bus of the primary winding.
    pub fn primary_bus(&self, file: &NetworkFile) -> Option<BusRef> {
        file.transformer(self.primary).map(|t| t.from_bus)
    }

    pub fn secondary_bus(&self, file: &NetworkFile) -> Option<BusRef> {
        file.transformer(self.secondary).map(|t| t.from_bus)
    }

    pub fn tertiary_bus(&self, file: &NetworkFile) -> Option<BusRef> {
        file.transformer(self.tertiary).map(|t| t.from_bus)
    }

    pub fn middlepoint_bus(&self) -> BusRef {
        self.middlepoint
    }
}

/// Series capacitor with controllable reactance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlledSeriesCapacitor {
    pub from_bus: BusRef,
    pub to_bus: BusRef,
    pub parallel_circuit: i64,
    pub op: Op,
    pub metering_end: MeteringEnd,
    pub xmin_pct: f64,
    pub xmax_pct: f64,
    pub normal_rating: f64,
    pub emergency_rating: f64,
    pub power_factor: f64,
    pub cost: f64,
    pub date: String,
    pub condition: Condition,
    pub series_number: i64,
    pub name: String,
    pub control_mode: i64,
    pub status: u8,
    pub bypass: u8,
    pub setpoint: f64,
}

impl ControlledSeriesCapacitor {
    pub const CONTROL_MODE_FIXED_X: i64 = 0;
    pub const CONTROL_MODE_POWER: i64 = 1;

    pub fn new(from_bus: BusRef, to_bus: BusRef, parallel_circuit: i64) -> Self {
        Self {
            from_bus,
            to_bus,
            parallel_circuit,
            op: Op::Add,
            metering_end: MeteringEnd::From,
            xmin_pct: 0.0,
            xmax_pct: 0.0,
            normal_rating: FLOW_MAX,
            emergency_rating: FLOW_MAX,
            power_factor: 0.0,
            cost: 0.0,
            date: DEFAULT_DATE.to_string(),
            condition: Condition::Registry,
            series_number: 0,
            name: String::new(),
            control_mode: Self::CONTROL_MODE_FIXED_X,
            status: STATUS_ON,
            bypass: STATUS_OFF,
            setpoint: 0.0,
        }
    }
}
