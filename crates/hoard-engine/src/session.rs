//! Loot generation sessions.
//!
//! A `LootSession` owns one character level, one roll trace, and one dice
//! source, and shares the loaded definition read-only. Create one per
//! request.

use std::sync::Arc;

use hoard_core::{LootDefinition, TableStore};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::config::SessionConfig;
use crate::dice::DiceSource;
use crate::error::EngineResult;
use crate::mode::GenerationMode;
use crate::pipeline::Pipeline;
use crate::trace::{IdentitySource, RollTrace};

/// A loot generation session.
#[derive(Debug)]
pub struct LootSession<D = StdRng> {
    definition: Arc<LootDefinition>,
    config: SessionConfig,
    trace: RollTrace,
    dice: D,
}

impl LootSession<StdRng> {
    /// Create a session rolling with a `StdRng`, seeded from the config or
    /// from OS entropy.
    pub fn new(definition: impl Into<Arc<LootDefinition>>, config: SessionConfig) -> Self {
        let dice = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_dice(definition, config, dice)
    }

    /// Load `table` from `store` and create a session for it.
    ///
    /// Store failures surface here, before anything is rolled.
    pub fn open(store: &TableStore, table: &str, config: SessionConfig) -> EngineResult<Self> {
        let definition = store.load(table)?;
        Ok(Self::new(definition, config))
    }
}

impl<D: DiceSource> LootSession<D> {
    /// Create a session with an explicit dice source.
    pub fn with_dice(
        definition: impl Into<Arc<LootDefinition>>,
        config: SessionConfig,
        dice: D,
    ) -> Self {
        let config = SessionConfig {
            level: config.level.max(1),
            ..config
        };
        Self {
            definition: definition.into(),
            config,
            trace: RollTrace::new(),
            dice,
        }
    }

    /// Run one generation.
    ///
    /// Each call starts a fresh trace, which holds only this generation's
    /// events afterwards, including when an error is returned.
    pub fn generate(&mut self, mode: GenerationMode) -> EngineResult<()> {
        self.trace = RollTrace::new();
        debug!(%mode, level = self.config.level, "generating loot");

        let mut pipeline = Pipeline {
            definition: &self.definition,
            trace: &mut self.trace,
            dice: &mut self.dice,
            level: i64::from(self.config.level),
            max_rerolls: self.config.max_rerolls,
        };
        match mode {
            GenerationMode::Full => pipeline.full(),
            GenerationMode::ForceNormalTreasure => pipeline.force_normal(),
            GenerationMode::ForceAdvancedTreasure => pipeline.force_advanced(),
            GenerationMode::ForcePerishable => pipeline.force_perishable(),
            GenerationMode::GemType => pipeline.identity(IdentitySource::Gem),
            GenerationMode::MonstrousBodyPartType => pipeline.identity(IdentitySource::BodyPart),
        }
    }

    /// The trace of the last generation.
    pub fn trace(&self) -> &RollTrace {
        &self.trace
    }

    /// Consume the session, keeping the trace.
    pub fn into_trace(self) -> RollTrace {
        self.trace
    }

    /// The character level.
    pub fn level(&self) -> u32 {
        self.config.level
    }

    /// The session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The shared definition.
    pub fn definition(&self) -> &Arc<LootDefinition> {
        &self.definition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;
    use crate::error::EngineError;
    use crate::trace::event::OUT_OF_RANGE;
    use crate::trace::{ItemPart, TraceEvent};
    use hoard_core::{AffixKind, StoreError};
    use proptest::prelude::*;

    const TABLE: &str = r#"{
        "loot_tables": {
            "primary_treasure_roll": {
                "die_size": 20,
                "add_level": true,
                "type": {
                    "no_treasure": {"min": 1, "max": 5, "name": "No Treasure"},
                    "normal_treasure": {"min": 6, "max": 15, "name": "Coins", "die_size": 6, "mod": 2, "mult_level": true},
                    "advanced_treasure": {"min": 16, "max": 40, "name": "Advanced Treasure"}
                }
            },
            "advanced_treasure_roll": {
                "die_size": 10,
                "type": {
                    "base_item": {"min": 1, "max": 4, "name": "Base Item", "die_size": 4, "use_prefix": false, "use_suffix": false},
                    "prefix_base_item": {"min": 5, "max": 7, "name": "Prefix + Base Item", "die_size": 4, "use_prefix": true, "use_suffix": false},
                    "prefix_base_item_suffix": {"min": 8, "max": 10, "name": "Prefix + Base Item + Suffix", "die_size": 4, "use_prefix": true, "use_suffix": true}
                }
            },
            "base_item_type": {
                "die_size": 4,
                "type": {
                    "weapons": {"min": 1, "max": 2, "name": "Weapons", "die_size": 6, "ps_die_size": 10, "ps_mod": 0, "use_prefix": true, "use_suffix": true},
                    "armor": {"min": 3, "max": 3, "name": "Armor", "die_size": 6, "add_level": true, "ps_die_size": 10, "use_prefix": false, "use_suffix": true},
                    "perishables": {"min": 4, "max": 4, "name": "Perishables", "die_size": 4, "ps_die_size": 6, "ps_mod": 1, "use_prefix": true, "use_suffix": true},
                    "relics": {"min": 5, "max": 5, "name": "Relics", "die_size": 4}
                }
            },
            "base_items": {
                "weapons": {
                    "dagger": {"min": 1, "max": 3, "name": "Dagger", "effect": "1d4 piercing", "xp": 10, "gp": 2},
                    "longsword": {"min": 4, "max": 6, "name": "Longsword", "effect": "1d8 slashing", "xp": 50, "gp": 15}
                },
                "armor": {
                    "leather": {"min": 1, "max": 6, "name": "Leather Armor", "effect": "AC 11", "xp": 20, "gp": 10}
                },
                "perishables": {
                    "potion": {"min": 1, "max": 4, "name": "Potion", "effect": "Heal 2d4", "xp": 5, "gp": 50}
                }
            }
        },
        "modifiers": {
            "prefixes_type": {
                "minor": {"min": 1, "max": 5, "name": "Minor", "die_size": 4},
                "major": {"min": 6, "max": 8, "name": "Major", "die_size": 6, "add_level": true},
                "capricious": {"min": 9, "max": 9, "name": "Capricious", "die_size": 4, "add_level": 4},
                "cursed": {"min": 10, "max": 11, "name": "Cursed", "die_size": 4},
                "odd": {"min": 12, "max": 12, "name": "Odd", "die_size": 0},
                "mystery": {"min": 13, "max": 13, "name": "Mystery", "die_size": 4}
            },
            "suffixes_type": {
                "minor": {"min": 1, "max": 10, "name": "Minor", "die_size": 4}
            },
            "prefixes": {
                "minor": {"flaming": {"min": 1, "max": 4, "name": "Flaming", "effect": "+1d4 fire", "xp": 100, "gp": 200}},
                "major": {"vorpal": {"min": 1, "max": 20, "name": "Vorpal", "effect": "Decapitates", "xp": 500, "gp": 1000}},
                "cursed": {"rusty": {"min": 1, "max": 11, "name": "Rusty", "effect": "-1 to hit", "xp": 0, "gp": -5}},
                "odd": {"weird": {"min": 1, "max": 11, "name": "Weird", "effect": "Hums", "xp": 1, "gp": 1}}
            },
            "suffixes": {
                "minor": {"of_light": {"min": 1, "max": 4, "name": "of Light", "effect": "Sheds light", "xp": 30, "gp": 40}}
            }
        },
        "gems": {
            "die_size": 4,
            "quartz": {"min": 1, "max": 2, "name": "Quartz"},
            "ruby": {"min": 3, "max": 3, "name": "Ruby"}
        },
        "monstrous_body_part": {
            "die_size": 6,
            "claw": {"min": 1, "max": 6, "name": "Claw"}
        }
    }"#;

    fn definition(json: &str) -> LootDefinition {
        LootDefinition::from_json(json).unwrap()
    }

    fn session(level: u32, rolls: &[u32]) -> LootSession<ScriptedDice> {
        LootSession::with_dice(
            definition(TABLE),
            SessionConfig::default().with_level(level),
            ScriptedDice::new(rolls),
        )
    }

    fn values(trace: &RollTrace, description: &str) -> Vec<String> {
        trace.find(description).iter().map(|e| e.value()).collect()
    }

    fn components(trace: &RollTrace) -> Vec<(ItemPart, String)> {
        trace
            .iter()
            .filter_map(|e| match e {
                TraceEvent::Component { part, name, .. } => Some((*part, name.clone())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn forced_roll_of_three_is_three_gold() {
        let json = r#"{"loot_tables": {"primary_treasure_roll": {"die_size": 20, "type": {
            "normal_treasure": {"min": 1, "max": 20, "name": "Coins", "die_size": 6, "mod": 0, "mult_level": false}
        }}}}"#;
        let mut s = LootSession::with_dice(
            definition(json),
            SessionConfig::default(),
            ScriptedDice::new([3]),
        );
        s.generate(GenerationMode::Full).unwrap();
        assert_eq!(values(s.trace(), "Primary Treasure Result"), ["Coins"]);
        assert_eq!(values(s.trace(), "Total Gold"), ["3"]);

        s.generate(GenerationMode::ForceNormalTreasure).unwrap();
        assert_eq!(s.trace().len(), 2);
        assert_eq!(values(s.trace(), "Total Gold"), ["3"]);
    }

    #[test]
    fn normal_treasure_multiplies_by_level() {
        let mut s = session(4, &[5]);
        s.generate(GenerationMode::ForceNormalTreasure).unwrap();
        assert_eq!(values(s.trace(), "Normal Treasure Roll"), ["5"]);
        assert_eq!(values(s.trace(), "Total Gold"), ["22"]);
    }

    #[test]
    fn primary_adds_level_and_stops_on_no_treasure() {
        let mut s = session(1, &[2]);
        s.generate(GenerationMode::Full).unwrap();
        assert_eq!(
            values(s.trace(), "Primary Treasure Roll with level mod"),
            ["2 + 1 = 3"]
        );
        assert_eq!(values(s.trace(), "Primary Treasure Result"), ["No Treasure"]);
        assert_eq!(s.trace().len(), 3);
    }

    #[test]
    fn primary_out_of_range_is_a_soft_miss() {
        let mut s = session(30, &[20]);
        s.generate(GenerationMode::Full).unwrap();
        assert_eq!(values(s.trace(), "Primary Treasure Result"), [OUT_OF_RANGE]);
        assert_eq!(s.trace().len(), 3);
    }

    #[test]
    fn full_pipeline_with_both_affixes() {
        let mut s = session(1, &[16, 9, 1, 5, 2, 3, 4, 2]);
        s.generate(GenerationMode::Full).unwrap();
        let trace = s.trace();

        assert_eq!(values(trace, "Primary Treasure Result"), ["Advanced Treasure"]);
        assert_eq!(
            values(trace, "Advanced Treasure Result"),
            ["Prefix + Base Item + Suffix"]
        );
        assert_eq!(values(trace, "Base Item Type"), ["Weapons"]);
        assert_eq!(
            components(trace),
            [
                (ItemPart::BaseItem, "Longsword".to_string()),
                (ItemPart::Prefix, "Flaming".to_string()),
                (ItemPart::Suffix, "of Light".to_string()),
            ]
        );
        assert_eq!(values(trace, "Prefix Type"), ["Minor"]);
        assert_eq!(values(trace, "Suffix Type"), ["Minor"]);
        assert_eq!(values(trace, "Prefix Type Roll (modified)"), ["2 + 0 = 2"]);
        assert_eq!(values(trace, "Prefix Roll (modified)"), ["3 + 0 = 3"]);

        let rolls: Vec<String> = trace
            .iter()
            .filter(|e| matches!(e, TraceEvent::Roll { .. }))
            .map(TraceEvent::description)
            .collect();
        assert_eq!(
            rolls,
            [
                "Primary Treasure Roll",
                "Advanced Treasure Roll",
                "Base Item Type Roll",
                "Base Item Roll for Weapons",
                "Prefix Type Roll",
                "Prefix Roll",
                "Suffix Type Roll",
                "Suffix Roll",
            ]
        );
    }

    #[test]
    fn level_is_added_once() {
        let mut s = session(3, &[1, 3, 2]);
        s.generate(GenerationMode::ForceAdvancedTreasure).unwrap();
        let trace = s.trace();
        assert_eq!(
            values(trace, "Base Item Roll for Armor with level mod"),
            ["2 + 3 = 5"]
        );
        let level_notes = trace
            .iter()
            .filter(|e| e.description().ends_with("with level mod"))
            .count();
        assert_eq!(level_notes, 1);
        assert_eq!(values(trace, "Base Item Type Roll"), ["3"]);
        assert_eq!(components(trace), [(ItemPart::BaseItem, "Leather Armor".to_string())]);
    }

    #[test]
    fn uncovered_base_item_roll_is_a_soft_miss() {
        // Armor rolls a d6 plus level; nothing covers 7.
        let mut s = session(1, &[1, 3, 6]);
        s.generate(GenerationMode::ForceAdvancedTreasure).unwrap();
        let trace = s.trace();
        assert_eq!(values(trace, "Base Item"), [OUT_OF_RANGE]);
        assert!(components(trace).is_empty());
        assert!(trace.find("Prefix Type Roll").is_empty());
    }

    #[test]
    fn missing_table_fails_before_rolling() {
        let store = TableStore::new("/definitely/not/a/real/dir");
        let err = LootSession::open(&store, "missing", SessionConfig::default()).unwrap_err();
        assert!(matches!(err, EngineError::Store(StoreError::NotFound { .. })));
        assert!(!err.is_configuration_fault());
    }

    #[test]
    fn item_type_without_prefix_never_rolls_prefix() {
        let mut s = session(1, &[9, 3, 2, 4, 2]);
        s.generate(GenerationMode::ForceAdvancedTreasure).unwrap();
        let trace = s.trace();
        assert_eq!(values(trace, "Base Item Type"), ["Armor"]);
        assert!(trace.find("Prefix Type Roll").is_empty());
        assert!(trace.find("Prefix Type").is_empty());
        assert_eq!(
            components(trace),
            [
                (ItemPart::BaseItem, "Leather Armor".to_string()),
                (ItemPart::Suffix, "of Light".to_string()),
            ]
        );
        assert_eq!(s.dice.drawn(), 5);
    }

    #[test]
    fn capricious_rerolls_with_its_own_die() {
        let mut s = session(1, &[5, 1, 1, 9, 3, 4]);
        s.generate(GenerationMode::ForceAdvancedTreasure).unwrap();
        let trace = s.trace();
        assert_eq!(values(trace, "Capricious reroll"), ["Rerolling for Prefix"]);
        assert_eq!(
            values(trace, "Prefix Type Roll (modified)"),
            ["9 + 0 = 9", "3 + 4 = 7"]
        );
        assert_eq!(values(trace, "Prefix Roll (modified)"), ["4 + 1 = 5"]);
        assert_eq!(values(trace, "Prefix Type"), ["Major"]);
        assert_eq!(
            components(trace),
            [
                (ItemPart::BaseItem, "Dagger".to_string()),
                (ItemPart::Prefix, "Vorpal".to_string()),
            ]
        );
        assert!(trace.find("Suffix Type Roll").is_empty());
    }

    #[test]
    fn self_referential_capricious_hits_reroll_limit() {
        let json = TABLE.replace(
            r#""die_size": 4, "add_level": 4"#,
            r#""die_size": 1, "add_level": 8"#,
        );
        let mut rolls = vec![5, 1, 1, 9];
        rolls.extend([1; 10]);
        let mut s = LootSession::with_dice(
            definition(&json),
            SessionConfig::default().with_max_rerolls(5),
            ScriptedDice::new(rolls),
        );
        let err = s.generate(GenerationMode::ForceAdvancedTreasure).unwrap_err();
        assert!(matches!(
            err,
            EngineError::RerollLimit {
                affix: AffixKind::Prefix,
                limit: 5
            }
        ));
        assert!(err.is_configuration_fault());
        assert_eq!(s.trace().find("Capricious reroll").len(), 5);
    }

    #[test]
    fn cursed_uses_item_type_property_die() {
        let mut s = session(1, &[5, 1, 1, 10, 7]);
        s.generate(GenerationMode::ForceAdvancedTreasure).unwrap();
        let trace = s.trace();
        assert_eq!(values(trace, "Prefix Type"), ["Cursed"]);
        assert_eq!(values(trace, "Prefix Roll"), ["7"]);
        let die = trace.iter().find_map(|e| match e {
            TraceEvent::Roll {
                description,
                die_size,
                ..
            } if description == "Prefix Roll" => Some(*die_size),
            _ => None,
        });
        assert_eq!(die, Some(10));
        assert!(components(trace).contains(&(ItemPart::Prefix, "Rusty".to_string())));
    }

    #[test]
    fn zero_die_size_falls_back_to_item_type() {
        let mut s = session(1, &[5, 1, 1, 12, 6]);
        s.generate(GenerationMode::ForceAdvancedTreasure).unwrap();
        let trace = s.trace();
        assert_eq!(trace.find("Special handling for Odd").len(), 1);
        assert_eq!(values(trace, "Prefix Roll (modified)"), ["6 + 0 = 6"]);
        assert!(components(trace).contains(&(ItemPart::Prefix, "Weird".to_string())));
        assert_eq!(values(trace, "Prefix Type"), ["Odd"]);
    }

    #[test]
    fn missing_affix_table_is_noted() {
        let mut s = session(1, &[5, 1, 1, 13]);
        s.generate(GenerationMode::ForceAdvancedTreasure).unwrap();
        let trace = s.trace();
        assert_eq!(values(trace, "Affix table not found"), ["mystery"]);
        assert!(trace.find("Prefix Roll").is_empty());
        assert_eq!(values(trace, "Prefix Type"), ["Mystery"]);
    }

    #[test]
    fn uncovered_affix_property_roll_is_noted() {
        // Minor prefixes roll a d4; nothing in their table covers 5.
        let mut s = session(1, &[5, 1, 1, 2, 5]);
        s.generate(GenerationMode::ForceAdvancedTreasure).unwrap();
        let trace = s.trace();
        assert_eq!(values(trace, "Prefix Roll (modified)"), ["5 + 0 = 5"]);
        assert_eq!(values(trace, "Prefix"), [OUT_OF_RANGE]);
        assert_eq!(values(trace, "Prefix Type"), ["Minor"]);
        assert_eq!(components(trace), [(ItemPart::BaseItem, "Dagger".to_string())]);
    }

    #[test]
    fn oversized_modifier_is_a_configuration_fault() {
        let json = r#"{"loot_tables": {"primary_treasure_roll": {"die_size": 20, "type": {
            "normal_treasure": {"min": 1, "max": 20, "name": "Coins", "die_size": 6, "mod": 9223372036854775807}
        }}}}"#;
        let mut s = LootSession::with_dice(
            definition(json),
            SessionConfig::default(),
            ScriptedDice::new([3]),
        );
        let err = s.generate(GenerationMode::ForceNormalTreasure).unwrap_err();
        assert!(matches!(
            err,
            EngineError::ModifierOverflow { ref roll } if roll == "Normal Treasure Roll"
        ));
        assert!(err.is_configuration_fault());
        assert!(s.trace().find("Total Gold").is_empty());
    }

    #[test]
    fn oversized_property_modifier_is_a_configuration_fault() {
        let json = TABLE.replace(
            r#""ps_die_size": 10, "ps_mod": 0"#,
            r#""ps_die_size": 10, "ps_mod": 9223372036854775807"#,
        );
        let mut s = LootSession::with_dice(
            definition(&json),
            SessionConfig::default(),
            ScriptedDice::new([5, 1, 1, 2]),
        );
        let err = s.generate(GenerationMode::ForceAdvancedTreasure).unwrap_err();
        assert!(matches!(
            err,
            EngineError::ModifierOverflow { ref roll } if roll == "Prefix Type Roll"
        ));
        assert!(s.trace().find("Prefix Type").is_empty());
    }

    #[test]
    fn missing_base_item_category_is_noted() {
        let mut s = session(1, &[1, 5]);
        s.generate(GenerationMode::ForceAdvancedTreasure).unwrap();
        assert_eq!(
            values(s.trace(), "Base Item"),
            ["Base item category 'relics' not found in loot tables."]
        );
    }

    #[test]
    fn force_perishable_skips_selector_rolls() {
        let mut s = session(1, &[2, 2, 3, 3, 1]);
        s.generate(GenerationMode::ForcePerishable).unwrap();
        let trace = s.trace();
        assert_eq!(
            trace.entries()[0],
            TraceEvent::note("Advanced Treasure Result", "Prefix + Base Item + Suffix")
        );
        assert_eq!(trace.entries()[1], TraceEvent::note("Base Item Type", "Perishables"));
        assert!(trace.find("Primary Treasure Roll").is_empty());
        assert!(trace.find("Base Item Type Roll").is_empty());
        assert_eq!(values(trace, "Prefix Type Roll (modified)"), ["2 + 1 = 3"]);
        assert_eq!(
            components(trace),
            [
                (ItemPart::BaseItem, "Potion".to_string()),
                (ItemPart::Prefix, "Flaming".to_string()),
                (ItemPart::Suffix, "of Light".to_string()),
            ]
        );
    }

    #[test]
    fn forced_mode_requires_its_entry() {
        let json = r#"{"loot_tables": {"primary_treasure_roll": {"die_size": 20, "type": {
            "normal_treasure": {"min": 1, "max": 20, "name": "Coins", "die_size": 6}
        }}}}"#;
        let mut s = LootSession::with_dice(
            definition(json),
            SessionConfig::default(),
            ScriptedDice::default(),
        );
        let err = s.generate(GenerationMode::ForceAdvancedTreasure).unwrap_err();
        assert!(matches!(
            err,
            EngineError::MissingEntry {
                key: "advanced_treasure",
                ..
            }
        ));
        let err = s.generate(GenerationMode::ForcePerishable).unwrap_err();
        assert!(err.is_configuration_fault());
        assert!(s.trace().is_empty());
    }

    #[test]
    fn missing_die_size_is_a_configuration_fault() {
        let json = r#"{"loot_tables": {"primary_treasure_roll": {"type": {}}}}"#;
        let mut s = LootSession::with_dice(
            definition(json),
            SessionConfig::default(),
            ScriptedDice::default(),
        );
        let err = s.generate(GenerationMode::Full).unwrap_err();
        assert!(matches!(
            err,
            EngineError::MissingDieSize { ref table } if table == "loot_tables.primary_treasure_roll"
        ));
    }

    #[test]
    fn missing_region_is_reported() {
        let mut s = LootSession::with_dice(
            definition("{}"),
            SessionConfig::default(),
            ScriptedDice::default(),
        );
        assert!(matches!(
            s.generate(GenerationMode::GemType),
            Err(EngineError::MissingRegion { region: "gems" })
        ));
        assert!(matches!(
            s.generate(GenerationMode::Full),
            Err(EngineError::MissingRegion { .. })
        ));
    }

    #[test]
    fn gem_and_body_part_rolls() {
        let mut s = session(1, &[3]);
        s.generate(GenerationMode::GemType).unwrap();
        assert_eq!(values(s.trace(), "Gem Type Roll"), ["3"]);
        assert_eq!(values(s.trace(), "Gem Type"), ["Ruby"]);
        assert!(matches!(s.trace().entries()[1], TraceEvent::Identity { .. }));

        s.generate(GenerationMode::MonstrousBodyPartType).unwrap();
        assert_eq!(values(s.trace(), "Monstrous Body Part"), ["Claw"]);
    }

    #[test]
    fn gem_miss_is_a_note() {
        let mut s = session(1, &[4]);
        s.generate(GenerationMode::GemType).unwrap();
        assert_eq!(
            s.trace().entries()[1],
            TraceEvent::note("Gem Type", OUT_OF_RANGE)
        );
    }

    #[test]
    fn generate_resets_the_trace() {
        let mut s = session(1, &[3]);
        s.generate(GenerationMode::GemType).unwrap();
        s.generate(GenerationMode::GemType).unwrap();
        assert_eq!(s.trace().len(), 2);
    }

    #[test]
    fn level_is_clamped() {
        let config = SessionConfig {
            level: 0,
            ..SessionConfig::default()
        };
        let s = LootSession::with_dice(definition("{}"), config, ScriptedDice::default());
        assert_eq!(s.level(), 1);
    }

    #[test]
    fn seeded_sessions_repeat() {
        let def = Arc::new(definition(TABLE));
        let config = SessionConfig::default().with_level(2).with_seed(7);
        let mut a = LootSession::new(Arc::clone(&def), config.clone());
        let mut b = LootSession::new(def, config);
        for _ in 0..5 {
            a.generate(GenerationMode::Full).unwrap();
            b.generate(GenerationMode::Full).unwrap();
            assert_eq!(a.trace(), b.trace());
        }
    }

    proptest! {
        #[test]
        fn normal_treasure_formula(
            roll in 1u32..=6,
            level in 1u32..=20,
            modifier in -5i64..=5,
            mult in any::<bool>(),
        ) {
            let json = format!(
                r#"{{"loot_tables": {{"primary_treasure_roll": {{"die_size": 20, "type": {{
                    "normal_treasure": {{"min": 1, "max": 20, "die_size": 6, "mod": {modifier}, "mult_level": {mult}}}
                }}}}}}}}"#
            );
            let mut s = LootSession::with_dice(
                definition(&json),
                SessionConfig::default().with_level(level),
                ScriptedDice::new([roll]),
            );
            s.generate(GenerationMode::ForceNormalTreasure).unwrap();
            let roll = i64::from(roll);
            let expected = if mult { roll * i64::from(level) + modifier } else { roll + modifier };
            prop_assert_eq!(values(s.trace(), "Total Gold"), vec![expected.to_string()]);
        }

        #[test]
        fn random_generation_never_fails_on_a_complete_table(
            seed in any::<u64>(),
            level in 1u32..=20,
        ) {
            let config = SessionConfig::default().with_level(level).with_seed(seed);
            let mut s = LootSession::new(definition(TABLE), config);
            for mode in GenerationMode::all() {
                prop_assert!(s.generate(*mode).is_ok());
                prop_assert!(!s.trace().is_empty());
            }
        }
    }
}
