//! The loot table definition document.
//!
//! Every region is optional when a document is parsed. The roll engine
//! decides which regions a generation mode requires and reports the missing
//! ones itself.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::entry::RangeEntry;

/// An ordered sub-table of range entries.
///
/// Entries keep the order they were declared in; resolution takes the first
/// match, so order is part of a table's meaning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubTable {
    entries: Vec<RangeEntry>,
}

impl SubTable {
    /// Create a sub-table from entries in resolution order.
    pub fn from_entries(entries: Vec<RangeEntry>) -> Self {
        Self { entries }
    }

    /// All entries in declared order.
    pub fn entries(&self) -> &[RangeEntry] {
        &self.entries
    }

    /// Iterate entries in declared order.
    pub fn iter(&self) -> std::slice::Iter<'_, RangeEntry> {
        self.entries.iter()
    }

    /// Look up an entry by its key.
    pub fn get(&self, key: &str) -> Option<&RangeEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// The first entry whose `name` equals `name` exactly.
    pub fn find_by_name(&self, name: &str) -> Option<&RangeEntry> {
        self.entries
            .iter()
            .find(|e| e.name.as_deref() == Some(name))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the sub-table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a SubTable {
    type Item = &'a RangeEntry;
    type IntoIter = std::slice::Iter<'a, RangeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<'de> Deserialize<'de> for SubTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SubTableVisitor;

        impl<'de> Visitor<'de> for SubTableVisitor {
            type Value = SubTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of entry keys to range entries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<SubTable, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, mut entry)) = map.next_entry::<String, RangeEntry>()? {
                    entry.key = key;
                    entries.push(entry);
                }
                Ok(SubTable { entries })
            }
        }

        deserializer.deserialize_map(SubTableVisitor)
    }
}

impl Serialize for SubTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.key, entry)?;
        }
        map.end()
    }
}

/// A selector roll: a die plus the sub-table it is resolved against.
///
/// Used for `primary_treasure_roll`, `advanced_treasure_roll`, and
/// `base_item_type`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RollTable {
    /// Die to roll.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub die_size: Option<u32>,
    /// Add the character level to the roll before lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_level: Option<crate::entry::LevelBonus>,
    /// The buckets.
    #[serde(rename = "type", default)]
    pub entries: SubTable,
    /// Any other field, preserved as written.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RollTable {
    /// Whether `add_level` is truthy.
    pub fn adds_level(&self) -> bool {
        self.add_level.is_some_and(|b| b.is_set())
    }
}

/// A flat table whose buckets sit beside its `die_size` key.
///
/// Used for `gems` and `monstrous_body_part`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatTable {
    /// Die to roll.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub die_size: Option<u32>,
    /// The buckets (every key other than `die_size`).
    #[serde(flatten)]
    pub entries: SubTable,
}

/// The `loot_tables` region.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LootTables {
    /// First roll of the treasure pipeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_treasure_roll: Option<RollTable>,
    /// Roll that decides the advanced treasure shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advanced_treasure_roll: Option<RollTable>,
    /// Item category roll.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_item_type: Option<RollTable>,
    /// Item sub-tables keyed by item type key.
    #[serde(default)]
    pub base_items: IndexMap<String, SubTable>,
}

/// Prefix or suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AffixKind {
    /// Placed before the item name.
    Prefix,
    /// Placed after the item name.
    Suffix,
}

impl AffixKind {
    /// Both kinds in resolution order.
    pub fn all() -> &'static [Self] {
        &[Self::Prefix, Self::Suffix]
    }

    /// The plural region name (`prefixes` / `suffixes`).
    pub fn plural(self) -> &'static str {
        match self {
            Self::Prefix => "prefixes",
            Self::Suffix => "suffixes",
        }
    }
}

impl fmt::Display for AffixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prefix => write!(f, "Prefix"),
            Self::Suffix => write!(f, "Suffix"),
        }
    }
}

/// The `modifiers` region.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Modifiers {
    /// Prefix category buckets.
    #[serde(default)]
    pub prefixes_type: SubTable,
    /// Suffix category buckets.
    #[serde(default)]
    pub suffixes_type: SubTable,
    /// Prefix property tables keyed by category key.
    #[serde(default)]
    pub prefixes: IndexMap<String, SubTable>,
    /// Suffix property tables keyed by category key.
    #[serde(default)]
    pub suffixes: IndexMap<String, SubTable>,
}

impl Modifiers {
    /// The category table for `kind`.
    pub fn type_table(&self, kind: AffixKind) -> &SubTable {
        match kind {
            AffixKind::Prefix => &self.prefixes_type,
            AffixKind::Suffix => &self.suffixes_type,
        }
    }

    /// The property table for category `key`.
    pub fn property_table(&self, kind: AffixKind, key: &str) -> Option<&SubTable> {
        match kind {
            AffixKind::Prefix => self.prefixes.get(key),
            AffixKind::Suffix => self.suffixes.get(key),
        }
    }
}

/// A complete loot table definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LootDefinition {
    /// The treasure pipeline tables.
    #[serde(default)]
    pub loot_tables: LootTables,
    /// Prefix and suffix tables.
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Gem table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gems: Option<FlatTable>,
    /// Monster body part table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monstrous_body_part: Option<FlatTable>,
    /// Any other top-level region, preserved as written.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LootDefinition {
    /// Parse a definition from JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Every sub-table in the document with a dotted path naming it.
    ///
    /// Used for whole-document diagnostics.
    pub fn sub_tables(&self) -> Vec<(String, &SubTable)> {
        let mut out = Vec::new();
        let lt = &self.loot_tables;
        for (name, table) in [
            ("primary_treasure_roll", &lt.primary_treasure_roll),
            ("advanced_treasure_roll", &lt.advanced_treasure_roll),
            ("base_item_type", &lt.base_item_type),
        ] {
            if let Some(table) = table {
                out.push((format!("loot_tables.{name}.type"), &table.entries));
            }
        }
        for (key, table) in &lt.base_items {
            out.push((format!("loot_tables.base_items.{key}"), table));
        }
        for kind in AffixKind::all() {
            let plural = kind.plural();
            out.push((
                format!("modifiers.{plural}_type"),
                self.modifiers.type_table(*kind),
            ));
            let tables = match kind {
                AffixKind::Prefix => &self.modifiers.prefixes,
                AffixKind::Suffix => &self.modifiers.suffixes,
            };
            for (key, table) in tables {
                out.push((format!("modifiers.{plural}.{key}"), table));
            }
        }
        if let Some(gems) = &self.gems {
            out.push(("gems".to_string(), &gems.entries));
        }
        if let Some(parts) = &self.monstrous_body_part {
            out.push(("monstrous_body_part".to_string(), &parts.entries));
        }
        out
    }
}
