//! Dice sources.
//!
//! The engine draws every roll through [`DiceSource`], so tests can replace
//! the RNG with a fixed script.

use rand::Rng;
use rand::rngs::StdRng;

/// Something that rolls a single die.
pub trait DiceSource {
    /// Roll one die with `sides` faces, returning a value in `1..=sides`.
    ///
    /// Callers never pass zero.
    fn roll(&mut self, sides: u32) -> u32;
}

impl DiceSource for StdRng {
    fn roll(&mut self, sides: u32) -> u32 {
        self.random_range(1..=sides)
    }
}

/// A dice source that replays a fixed list of values.
///
/// Values are returned as written, regardless of the die size, and the list
/// repeats once exhausted. An empty script always rolls 1.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    values: Vec<u32>,
    next: usize,
}

impl ScriptedDice {
    /// Create a script from the values to return, in order.
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            next: 0,
        }
    }

    /// How many values have been drawn so far.
    pub fn drawn(&self) -> usize {
        self.next
    }
}

impl DiceSource for ScriptedDice {
    fn roll(&mut self, _sides: u32) -> u32 {
        if self.values.is_empty() {
            return 1;
        }
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}
