//! Configuration for a loot generation session.

/// Default bound on capricious affix rerolls.
pub const DEFAULT_MAX_REROLLS: u32 = 32;

/// Configuration for a loot session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Character level (at least 1).
    pub level: u32,
    /// RNG seed for reproducible rolls; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// How many capricious rerolls an affix may chain before the table is
    /// treated as malformed.
    pub max_rerolls: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            level: 1,
            seed: None,
            max_rerolls: DEFAULT_MAX_REROLLS,
        }
    }
}

impl SessionConfig {
    /// Set the character level (clamped to at least 1).
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level.max(1);
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the capricious reroll bound.
    pub fn with_max_rerolls(mut self, max: u32) -> Self {
        self.max_rerolls = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.level, 1);
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.max_rerolls, DEFAULT_MAX_REROLLS);
    }

    #[test]
    fn builder_methods() {
        let cfg = SessionConfig::default()
            .with_level(7)
            .with_seed(123)
            .with_max_rerolls(5);
        assert_eq!(cfg.level, 7);
        assert_eq!(cfg.seed, Some(123));
        assert_eq!(cfg.max_rerolls, 5);
    }

    #[test]
    fn level_clamped() {
        let cfg = SessionConfig::default().with_level(0);
        assert_eq!(cfg.level, 1);
    }
}
