//! The roll trace: every roll and derived value of one generation, in order.

pub mod event;
pub mod log;

pub use event::{IdentitySource, ItemPart, TraceEvent};
pub use log::RollTrace;
