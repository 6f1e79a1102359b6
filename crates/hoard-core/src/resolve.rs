//! Range resolution.
//!
//! [`resolve`] is the lookup every roll in the engine goes through: the first
//! entry, in declared order, whose inclusive bounds contain the roll. A roll
//! that lands in no bucket is a [`Resolution::Miss`], which is a valid game
//! outcome rather than an error.

use std::ops::RangeInclusive;

use crate::definition::SubTable;
use crate::entry::RangeEntry;

/// The outcome of looking a roll up in a sub-table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    /// The first entry containing the roll.
    Hit(&'a RangeEntry),
    /// No entry contains the roll.
    Miss,
}

impl<'a> Resolution<'a> {
    /// The matched entry, if any.
    pub fn entry(self) -> Option<&'a RangeEntry> {
        match self {
            Self::Hit(entry) => Some(entry),
            Self::Miss => None,
        }
    }

    /// Whether an entry matched.
    pub fn is_hit(self) -> bool {
        matches!(self, Self::Hit(_))
    }
}

/// Find the first entry of `table` whose `[min, max]` contains `roll`.
pub fn resolve(roll: i64, table: &SubTable) -> Resolution<'_> {
    table
        .iter()
        .find(|entry| entry.contains(roll))
        .map_or(Resolution::Miss, Resolution::Hit)
}

/// Pairs of entry keys whose bounds overlap.
///
/// Resolution is first-match, so an overlap silently shadows part of the
/// later entry.
pub fn find_overlaps(table: &SubTable) -> Vec<(String, String)> {
    let bounded: Vec<(&RangeEntry, i64, i64)> = table
        .iter()
        .filter_map(|e| Some((e, e.min?, e.max?)))
        .collect();

    let mut overlaps = Vec::new();
    for (i, (a, a_min, a_max)) in bounded.iter().enumerate() {
        for (b, b_min, b_max) in &bounded[i + 1..] {
            if a_min <= b_max && b_min <= a_max {
                overlaps.push((a.key.clone(), b.key.clone()));
            }
        }
    }
    overlaps
}

/// Runs of roll values in `range` that no entry of `table` covers.
///
/// Works from the bucket bounds, so a wide range costs no more than a
/// narrow one.
pub fn coverage_gaps(table: &SubTable, range: RangeInclusive<i64>) -> Vec<RangeInclusive<i64>> {
    let (start, end) = range.into_inner();
    let mut bounds: Vec<(i64, i64)> = table
        .iter()
        .filter_map(|e| Some((e.min?, e.max?)))
        .filter(|(min, max)| min <= max)
        .collect();
    bounds.sort_unstable();

    let mut gaps = Vec::new();
    // First roll not yet known to be covered.
    let mut next = start;
    for (min, max) in bounds {
        if next > end {
            return gaps;
        }
        if min > next {
            gaps.push(next..=end.min(min - 1));
        }
        match max.checked_add(1) {
            Some(after) => next = next.max(after),
            None => return gaps,
        }
    }
    if next <= end {
        gaps.push(next..=end);
    }
    gaps
}
