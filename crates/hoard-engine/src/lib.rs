//! Roll engine for Hoard.
//!
//! A [`LootSession`] binds one loaded loot table definition to a character
//! level and a dice source. [`LootSession::generate`] walks the treasure
//! pipeline (primary → advanced → item type → base item → affixes) or one of
//! the standalone gem / body part rolls, recording every step in a
//! [`RollTrace`]. The trace is the only output; rendering reads it afterwards.

pub mod config;
pub mod dice;
pub mod error;
pub mod mode;
pub mod session;
pub mod trace;

mod affix;
mod pipeline;

pub use config::SessionConfig;
pub use dice::{DiceSource, ScriptedDice};
pub use error::{EngineError, EngineResult};
pub use mode::GenerationMode;
pub use session::LootSession;
pub use trace::{IdentitySource, ItemPart, RollTrace, TraceEvent};
