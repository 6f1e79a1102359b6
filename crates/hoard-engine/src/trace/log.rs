//! Roll trace storage.

use serde::{Deserialize, Serialize};

use super::event::TraceEvent;

/// The ordered events of one generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RollTrace {
    events: Vec<TraceEvent>,
}

impl RollTrace {
    /// Create an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    /// All events in order.
    pub fn entries(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Iterate events in order.
    pub fn iter(&self) -> std::slice::Iter<'_, TraceEvent> {
        self.events.iter()
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether no events were recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events with the given description, in order.
    pub fn find(&self, description: &str) -> Vec<&TraceEvent> {
        self.events
            .iter()
            .filter(|e| e.description() == description)
            .collect()
    }
}

impl<'a> IntoIterator for &'a RollTrace {
    type Item = &'a TraceEvent;
    type IntoIter = std::slice::Iter<'a, TraceEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl FromIterator<TraceEvent> for RollTrace {
    fn from_iter<I: IntoIterator<Item = TraceEvent>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}
