//! Generation modes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What a single `generate` call produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenerationMode {
    /// The whole pipeline from the primary treasure roll.
    Full,
    /// Skip the primary roll and use the `normal_treasure` entry.
    ForceNormalTreasure,
    /// Skip the primary roll and use the `advanced_treasure` entry.
    ForceAdvancedTreasure,
    /// Skip to a perishable base item with prefix and suffix.
    ForcePerishable,
    /// One roll on the gem table.
    GemType,
    /// One roll on the monster body part table.
    MonstrousBodyPartType,
}

impl GenerationMode {
    /// Parse a mode from user input.
    ///
    /// Accepts the display labels and short aliases, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_'], " ").trim() {
            "full" => Some(Self::Full),
            "force normal treasure" | "normal treasure" | "normal" => {
                Some(Self::ForceNormalTreasure)
            }
            "force advanced treasure" | "advanced treasure" | "advanced" => {
                Some(Self::ForceAdvancedTreasure)
            }
            "force perishable" | "perishable" | "perishables" => Some(Self::ForcePerishable),
            "gem type" | "gem" | "gems" => Some(Self::GemType),
            "monstrous body part type" | "monstrous body part" | "body part" | "bodypart" => {
                Some(Self::MonstrousBodyPartType)
            }
            _ => None,
        }
    }

    /// All modes in menu order.
    pub fn all() -> &'static [Self] {
        &[
            Self::Full,
            Self::ForceNormalTreasure,
            Self::ForceAdvancedTreasure,
            Self::ForcePerishable,
            Self::GemType,
            Self::MonstrousBodyPartType,
        ]
    }

    /// A short command-line alias.
    pub fn alias(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::ForceNormalTreasure => "normal",
            Self::ForceAdvancedTreasure => "advanced",
            Self::ForcePerishable => "perishable",
            Self::GemType => "gem",
            Self::MonstrousBodyPartType => "body-part",
        }
    }

    /// Whether this mode runs the treasure pipeline (as opposed to a single
    /// standalone roll).
    pub fn is_treasure(self) -> bool {
        !matches!(self, Self::GemType | Self::MonstrousBodyPartType)
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Full => "Full",
            Self::ForceNormalTreasure => "Force Normal Treasure",
            Self::ForceAdvancedTreasure => "Force Advanced Treasure",
            Self::ForcePerishable => "Force Perishable",
            Self::GemType => "Gem Type",
            Self::MonstrousBodyPartType => "Monstrous Body Part Type",
        };
        write!(f, "{s}")
    }
}
