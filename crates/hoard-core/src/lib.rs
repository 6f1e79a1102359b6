//! Core types for Hoard: loot table definitions, range entries, and storage.
//!
//! A loot table definition is a JSON document of named sub-tables. Every
//! sub-table is an ordered list of [`RangeEntry`] buckets matched against a
//! die roll by [`resolve`]. Definitions are loaded from a directory through a
//! [`TableStore`] and are immutable once loaded.

/// Loot table definition document and its regions.
pub mod definition;
/// Range entries: a single bucket of a sub-table.
pub mod entry;
/// Error types used by the table store.
pub mod error;
/// Range resolution and bucket diagnostics.
pub mod resolve;
/// Directory-backed loot table storage.
pub mod store;

/// Re-export definition types.
pub use definition::{
    AffixKind, FlatTable, LootDefinition, LootTables, Modifiers, RollTable, SubTable,
};
/// Re-export entry types.
pub use entry::{LevelBonus, RangeEntry};
/// Re-export error types.
pub use error::{StoreError, StoreResult};
/// Re-export resolution helpers.
pub use resolve::{Resolution, coverage_gaps, find_overlaps, resolve};
/// Re-export the table store.
pub use store::{DEFAULT_TABLE, TableStore};
