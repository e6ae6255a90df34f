//! Entity records, one struct per record kind.
//!
//! Records reference each other through the handles in [`crate::refs`], never
//! by embedding. Every constructor fills non-key fields with the format's
//! defaults.

mod admin;
mod bus;
mod dc;
mod injection;
mod series;

pub use admin::{Area, Region, System};
pub use bus::Bus;
pub use dc::{AcDcConverterLcc, AcDcConverterVsc, DcBus, DcLine, DcLink};
pub use injection::{BusShunt, Demand, Generator, StaticVarCompensator};
pub use series::{ControlledSeriesCapacitor, Line, LineShunt, ThreeWindingTransformer, Transformer};
