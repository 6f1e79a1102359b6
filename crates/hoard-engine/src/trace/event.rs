//! Roll trace event types.

use std::fmt;

use hoard_core::{AffixKind, RangeEntry};
use serde::{Deserialize, Serialize};

/// Note value recorded when a roll lands in no bucket.
pub const OUT_OF_RANGE: &str = "Roll outside expected range.";

/// A part of a generated item that carries effect, XP, and GP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemPart {
    /// The base item.
    BaseItem,
    /// The prefix property.
    Prefix,
    /// The suffix property.
    Suffix,
}

impl From<AffixKind> for ItemPart {
    fn from(kind: AffixKind) -> Self {
        match kind {
            AffixKind::Prefix => Self::Prefix,
            AffixKind::Suffix => Self::Suffix,
        }
    }
}

impl fmt::Display for ItemPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::BaseItem => "Base Item",
            Self::Prefix => "Prefix",
            Self::Suffix => "Suffix",
        };
        write!(f, "{s}")
    }
}

/// Which standalone table named an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentitySource {
    /// The `gems` table.
    Gem,
    /// The `monstrous_body_part` table.
    BodyPart,
}

impl IdentitySource {
    /// Description of the result event.
    pub fn description(self) -> &'static str {
        match self {
            Self::Gem => "Gem Type",
            Self::BodyPart => "Monstrous Body Part",
        }
    }

    /// Description of the die roll.
    pub fn roll_label(self) -> &'static str {
        match self {
            Self::Gem => "Gem Type Roll",
            Self::BodyPart => "Body Part Roll",
        }
    }

    /// The definition region this source reads.
    pub fn region(self) -> &'static str {
        match self {
            Self::Gem => "gems",
            Self::BodyPart => "monstrous_body_part",
        }
    }
}

/// A single entry in the roll trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceEvent {
    /// A raw die roll.
    Roll {
        /// What the roll was for.
        description: String,
        /// The face rolled.
        roll: u32,
        /// Number of faces.
        die_size: u32,
    },
    /// A derived or narrative value.
    Note {
        /// What the value is.
        description: String,
        /// The value.
        value: String,
    },
    /// The coin total of a normal treasure.
    Gold {
        /// Gold pieces.
        amount: i64,
    },
    /// A resolved item part with its payload.
    Component {
        /// Which part.
        part: ItemPart,
        /// Entry name.
        name: String,
        /// Effect text (may be empty).
        effect: String,
        /// Experience value.
        xp: i64,
        /// Gold value.
        gp: i64,
    },
    /// The affix category an affix was rolled from.
    AffixType {
        /// Prefix or suffix.
        affix: AffixKind,
        /// Category name.
        name: String,
    },
    /// The name of a gem or body part.
    Identity {
        /// Which table.
        source: IdentitySource,
        /// Entry name.
        name: String,
    },
}

impl TraceEvent {
    /// Create a raw roll event.
    pub fn roll(description: impl Into<String>, roll: u32, die_size: u32) -> Self {
        Self::Roll {
            description: description.into(),
            roll,
            die_size,
        }
    }

    /// Create a note event.
    pub fn note(description: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Note {
            description: description.into(),
            value: value.into(),
        }
    }

    /// Create a component event from a resolved entry.
    pub fn component(part: ItemPart, entry: &RangeEntry) -> Self {
        Self::Component {
            part,
            name: entry.label().to_string(),
            effect: entry.effect().to_string(),
            xp: entry.xp(),
            gp: entry.gp(),
        }
    }

    /// The event's description label.
    pub fn description(&self) -> String {
        match self {
            Self::Roll { description, .. } | Self::Note { description, .. } => description.clone(),
            Self::Gold { .. } => "Total Gold".to_string(),
            Self::Component { part, .. } => part.to_string(),
            Self::AffixType { affix, .. } => format!("{affix} Type"),
            Self::Identity { source, .. } => source.description().to_string(),
        }
    }

    /// The event's value rendered as text.
    pub fn value(&self) -> String {
        match self {
            Self::Roll { roll, .. } => roll.to_string(),
            Self::Note { value, .. } => value.clone(),
            Self::Gold { amount } => amount.to_string(),
            Self::Component { name, .. }
            | Self::AffixType { name, .. }
            | Self::Identity { name, .. } => name.clone(),
        }
    }

    /// Whether the event carries an item payload (effect, XP, GP).
    pub fn has_effect(&self) -> bool {
        matches!(self, Self::Component { .. })
    }
}
