//! Presentation for Hoard.
//!
//! Everything here reads a finished [`RollTrace`](hoard_engine::RollTrace);
//! nothing rolls dice or touches a loot table.

/// Item cards (HTML and plain text).
pub mod card;
/// Comma-separated summary rows and the append-only treasure log.
pub mod csv;
/// The detailed roll-by-roll log.
pub mod detail;
/// Error types for rendering and persistence.
pub mod error;
/// Machine-readable generation reports.
pub mod report;
/// Aggregating a trace into an item summary.
pub mod summary;

pub use card::{render_card, render_text};
pub use csv::{CSV_HEADER, TreasureLog, csv_row};
pub use detail::detailed_log;
pub use error::{RenderError, RenderResult};
pub use report::GenerationReport;
pub use summary::{EffectLine, ItemSummary};
