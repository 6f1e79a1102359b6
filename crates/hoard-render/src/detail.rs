//! The detailed roll-by-roll log.

use hoard_engine::{RollTrace, TraceEvent};

/// Render every trace event on its own line.
///
/// Raw rolls read `description: Rolled N (1dM)`, other events
/// `description: value`. Item components are left to the item card.
pub fn detailed_log(trace: &RollTrace) -> String {
    trace
        .iter()
        .filter(|event| !event.has_effect())
        .map(|event| match event {
            TraceEvent::Roll {
                description,
                roll,
                die_size,
            } => format!("{description}: Rolled {roll} (1d{die_size})"),
            other => format!("{}: {}", other.description(), other.value()),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
