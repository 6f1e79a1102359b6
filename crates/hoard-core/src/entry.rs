//! Range entries.
//!
//! A range entry is one bucket of a sub-table: an inclusive `[min, max]`
//! interval plus whatever parameters the stage that consults it needs. The
//! known fields are explicit; anything else (`effect`, `xp`, `gp`, custom
//! notes) is kept in [`RangeEntry::extra`] and read by key.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::definition::AffixKind;

/// The `add_level` field of an entry.
///
/// Usually a flag meaning "add the character level to this roll". On
/// `capricious` affix-type entries the same field holds the integer modifier
/// for the reroll, so both shapes are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelBonus {
    /// `true` / `false`.
    Flag(bool),
    /// An explicit integer.
    Amount(i64),
}

impl LevelBonus {
    /// Whether the value is truthy (`true` or a non-zero amount).
    pub fn is_set(self) -> bool {
        match self {
            Self::Flag(flag) => flag,
            Self::Amount(n) => n != 0,
        }
    }

    /// The value as an integer modifier (`true` counts as 1).
    pub fn amount(self) -> i64 {
        match self {
            Self::Flag(flag) => i64::from(flag),
            Self::Amount(n) => n,
        }
    }
}

/// One bucket of a sub-table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeEntry {
    /// The mapping key this entry was declared under.
    #[serde(skip)]
    pub key: String,
    /// Inclusive lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    /// Inclusive upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Die to roll when this entry triggers a further roll.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub die_size: Option<u32>,
    /// Flat modifier for the further roll.
    #[serde(rename = "mod", default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<i64>,
    /// Add the character level to the further roll (or, for `capricious`, the
    /// reroll modifier).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_level: Option<LevelBonus>,
    /// Die size for prefix/suffix property rolls on an item type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ps_die_size: Option<u32>,
    /// Modifier for prefix/suffix property rolls on an item type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ps_mod: Option<i64>,
    /// Whether this entry allows a prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_prefix: Option<bool>,
    /// Whether this entry allows a suffix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_suffix: Option<bool>,
    /// Multiply the roll by the character level instead of adding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mult_level: Option<bool>,
    /// Any other field, preserved as written.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RangeEntry {
    /// Create an entry covering `[min, max]` with the given key and name.
    pub fn new(key: impl Into<String>, min: i64, max: i64, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            min: Some(min),
            max: Some(max),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Whether `roll` falls inside this entry's bounds.
    ///
    /// An entry missing either bound never matches.
    pub fn contains(&self, roll: i64) -> bool {
        match (self.min, self.max) {
            (Some(min), Some(max)) => min <= roll && roll <= max,
            _ => false,
        }
    }

    /// The display name, falling back to the key.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.key)
    }

    /// Whether the name equals `other`, ignoring ASCII case.
    pub fn is_named(&self, other: &str) -> bool {
        self.name
            .as_deref()
            .is_some_and(|name| name.eq_ignore_ascii_case(other))
    }

    /// Whether `add_level` is truthy.
    pub fn adds_level(&self) -> bool {
        self.add_level.is_some_and(LevelBonus::is_set)
    }

    /// Whether this entry permits an affix of `kind`.
    pub fn allows_affix(&self, kind: AffixKind) -> bool {
        match kind {
            AffixKind::Prefix => self.use_prefix.unwrap_or(false),
            AffixKind::Suffix => self.use_suffix.unwrap_or(false),
        }
    }

    /// The `effect` text, or an empty string.
    pub fn effect(&self) -> &str {
        self.extra
            .get("effect")
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// The `xp` value, or 0.
    pub fn xp(&self) -> i64 {
        self.extra_int("xp")
    }

    /// The `gp` value, or 0.
    pub fn gp(&self) -> i64 {
        self.extra_int("gp")
    }

    /// Read an auxiliary integer field, accepting whole floats.
    pub fn extra_int(&self, field: &str) -> i64 {
        match self.extra.get(field) {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(0),
            _ => 0,
        }
    }

    /// Set an auxiliary field.
    pub fn with_extra(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(field.to_string(), value.into());
        self
    }
}
