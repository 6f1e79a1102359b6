//! Machine-readable generation reports.

use chrono::{DateTime, Utc};
use hoard_engine::{GenerationMode, RollTrace, TraceEvent};
use serde::{Deserialize, Serialize};

use crate::error::RenderResult;
use crate::summary::ItemSummary;

/// Everything about one generation, for JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// The loot table name.
    pub table: String,
    /// Display label of the mode.
    pub mode: String,
    /// Character level.
    pub level: u32,
    /// RNG seed, if one was given.
    pub seed: Option<u64>,
    /// When the report was built.
    pub generated_at: DateTime<Utc>,
    /// The aggregated item.
    pub summary: ItemSummary,
    /// Every trace event in order.
    pub events: Vec<TraceEvent>,
}

impl GenerationReport {
    /// Build a report from a finished trace, stamped with the current time.
    pub fn new(
        table: impl Into<String>,
        mode: GenerationMode,
        level: u32,
        seed: Option<u64>,
        trace: &RollTrace,
    ) -> Self {
        Self {
            table: table.into(),
            mode: mode.to_string(),
            level,
            seed,
            generated_at: Utc::now(),
            summary: ItemSummary::from_trace(trace),
            events: trace.entries().to_vec(),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> RenderResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
