//! Aggregating a trace into an item summary.

use hoard_engine::{ItemPart, RollTrace, TraceEvent};
use serde::{Deserialize, Serialize};

/// One effect line of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectLine {
    /// The part the effect comes from.
    pub part: ItemPart,
    /// The effect text.
    pub effect: String,
}

/// The user-facing view of one generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSummary {
    /// Prefix, base name, and suffix joined with spaces.
    pub name: String,
    /// Non-empty effects in trace order.
    pub effects: Vec<EffectLine>,
    /// Summed experience value.
    pub xp: i64,
    /// Summed gold value.
    pub gp: i64,
    /// Whether a prefix or suffix category was `cursed`.
    pub cursed: bool,
}

impl ItemSummary {
    /// Aggregate a trace.
    ///
    /// XP and GP are summed over the base item, prefix, and suffix
    /// components only. A later component of the same part replaces the
    /// earlier name. Gem and body part results supply the base name.
    pub fn from_trace(trace: &RollTrace) -> Self {
        let mut base = "";
        let mut prefix = "";
        let mut suffix = "";
        let mut summary = Self::default();

        for event in trace {
            match event {
                TraceEvent::Component {
                    part,
                    name,
                    effect,
                    xp,
                    gp,
                } => {
                    match part {
                        ItemPart::BaseItem => base = name.as_str(),
                        ItemPart::Prefix => prefix = name.as_str(),
                        ItemPart::Suffix => suffix = name.as_str(),
                    }
                    if !effect.is_empty() {
                        summary.effects.push(EffectLine {
                            part: *part,
                            effect: effect.clone(),
                        });
                    }
                    summary.xp += xp;
                    summary.gp += gp;
                }
                TraceEvent::Identity { name, .. } => base = name.as_str(),
                TraceEvent::AffixType { name, .. } if name.eq_ignore_ascii_case("cursed") => {
                    summary.cursed = true;
                }
                _ => {}
            }
        }

        summary.name = format!("{prefix} {base} {suffix}").trim().to_string();
        summary
    }

    /// Effects as `Part: effect` joined with `; `.
    pub fn effects_text(&self) -> String {
        self.effects
            .iter()
            .map(|line| format!("{}: {}", line.part, line.effect))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Whether the trace produced no named item (coins, no treasure, or a
    /// soft miss).
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}
