//! Error types for the roll engine.

use hoard_core::{AffixKind, StoreError};
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Hard failures that abort a generation.
///
/// A roll that lands in no bucket is not an error: it is recorded in the
/// trace and the pipeline stops early.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A consulted table has no `die_size`.
    #[error("{table} requires a 'die_size' to be defined")]
    MissingDieSize {
        /// Dotted path of the table or entry.
        table: String,
    },

    /// A roll was requested on a zero-sided die.
    #[error("cannot roll a d0 for {roll}")]
    ZeroDieSize {
        /// Description of the roll.
        roll: String,
    },

    /// Applying a table's modifier or the level to a roll overflowed.
    #[error("modifier for {roll} overflows")]
    ModifierOverflow {
        /// Description of the roll.
        roll: String,
    },

    /// A region the generation mode needs is absent.
    #[error("loot table is missing required region '{region}'")]
    MissingRegion {
        /// Dotted path of the region.
        region: &'static str,
    },

    /// A forced generation mode names an entry that does not exist.
    #[error("{table} has no '{key}' entry")]
    MissingEntry {
        /// Dotted path of the table.
        table: &'static str,
        /// The entry key the mode requires.
        key: &'static str,
    },

    /// A capricious chain did not settle within the configured bound.
    #[error("{affix} type roll was still capricious after {limit} rerolls")]
    RerollLimit {
        /// Which affix was being rolled.
        affix: AffixKind,
        /// The configured bound.
        limit: u32,
    },

    /// The loot table could not be loaded.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EngineError {
    /// Whether this error comes from a malformed table definition rather
    /// than from loading it.
    pub fn is_configuration_fault(&self) -> bool {
        !matches!(self, Self::Store(_))
    }
}
