//! The treasure pipeline.
//!
//! A [`Pipeline`] borrows the definition, the trace, and the dice for the
//! duration of one `generate` call. Stages return `Ok(None)` on a soft miss,
//! which ends the pipeline without an error.

use hoard_core::{AffixKind, LootDefinition, RangeEntry, Resolution, RollTable, resolve};
use tracing::{debug, warn};

use crate::dice::DiceSource;
use crate::error::{EngineError, EngineResult};
use crate::trace::event::OUT_OF_RANGE;
use crate::trace::{IdentitySource, ItemPart, RollTrace, TraceEvent};

const PRIMARY: &str = "loot_tables.primary_treasure_roll";
const ADVANCED: &str = "loot_tables.advanced_treasure_roll";
const ITEM_TYPE: &str = "loot_tables.base_item_type";

pub(crate) struct Pipeline<'a, D> {
    pub(crate) definition: &'a LootDefinition,
    pub(crate) trace: &'a mut RollTrace,
    pub(crate) dice: &'a mut D,
    pub(crate) level: i64,
    pub(crate) max_rerolls: u32,
}

impl<'a, D: DiceSource> Pipeline<'a, D> {
    /// Roll one die and record it.
    pub(crate) fn roll(&mut self, die_size: u32, description: &str) -> EngineResult<i64> {
        if die_size == 0 {
            return Err(EngineError::ZeroDieSize {
                roll: description.to_string(),
            });
        }
        let roll = self.dice.roll(die_size);
        debug!(roll, die_size, "{description}");
        self.trace.push(TraceEvent::roll(description, roll, die_size));
        Ok(i64::from(roll))
    }

    pub(crate) fn note(&mut self, description: impl Into<String>, value: impl Into<String>) {
        self.trace.push(TraceEvent::note(description, value));
    }

    /// Add the character level to `raw` and record the sum.
    fn with_level(&mut self, label: &str, raw: i64) -> EngineResult<i64> {
        let total = raw.checked_add(self.level).ok_or_else(|| overflow(label))?;
        self.note(
            format!("{label} with level mod"),
            format!("{raw} + {} = {total}", self.level),
        );
        Ok(total)
    }

    /// Record the outcome of a selector lookup under `description`.
    fn record(
        &mut self,
        description: &str,
        roll: i64,
        resolution: Resolution<'a>,
    ) -> Option<&'a RangeEntry> {
        match resolution {
            Resolution::Hit(entry) => {
                self.note(description, entry.label());
                Some(entry)
            }
            Resolution::Miss => {
                warn!(roll, "{description}: no bucket matched");
                self.note(description, OUT_OF_RANGE);
                None
            }
        }
    }

    /// Roll a selector table, applying its level bonus, and record the result.
    fn selector(
        &mut self,
        table: &'a RollTable,
        path: &str,
        label: &str,
        result: &str,
    ) -> EngineResult<Option<&'a RangeEntry>> {
        let die = table.die_size.ok_or_else(|| EngineError::MissingDieSize {
            table: path.to_string(),
        })?;
        let mut roll = self.roll(die, label)?;
        if table.adds_level() {
            roll = self.with_level(label, roll)?;
        }
        Ok(self.record(result, roll, resolve(roll, &table.entries)))
    }

    fn region(table: Option<&'a RollTable>, region: &'static str) -> EngineResult<&'a RollTable> {
        table.ok_or(EngineError::MissingRegion { region })
    }

    /// Look up an entry a forced mode names explicitly.
    fn forced(
        table: Option<&'a RollTable>,
        region: &'static str,
        key: &'static str,
    ) -> EngineResult<&'a RangeEntry> {
        Self::region(table, region)?
            .entries
            .get(key)
            .ok_or(EngineError::MissingEntry { table: region, key })
    }

    /// Run the whole pipeline from the primary treasure roll.
    pub(crate) fn full(&mut self) -> EngineResult<()> {
        let definition = self.definition;
        let table = Self::region(definition.loot_tables.primary_treasure_roll.as_ref(), PRIMARY)?;
        let Some(entry) = self.selector(
            table,
            PRIMARY,
            "Primary Treasure Roll",
            "Primary Treasure Result",
        )?
        else {
            return Ok(());
        };

        match entry.key.as_str() {
            "normal_treasure" => self.normal_treasure(entry),
            "advanced_treasure" => self.advanced_treasure(),
            other => {
                debug!(result = other, "primary result ends the pipeline");
                Ok(())
            }
        }
    }

    pub(crate) fn force_normal(&mut self) -> EngineResult<()> {
        let definition = self.definition;
        let entry = Self::forced(
            definition.loot_tables.primary_treasure_roll.as_ref(),
            PRIMARY,
            "normal_treasure",
        )?;
        self.normal_treasure(entry)
    }

    pub(crate) fn force_advanced(&mut self) -> EngineResult<()> {
        let definition = self.definition;
        Self::forced(
            definition.loot_tables.primary_treasure_roll.as_ref(),
            PRIMARY,
            "advanced_treasure",
        )?;
        self.advanced_treasure()
    }

    /// Skip straight to a perishable item with both affixes enabled.
    pub(crate) fn force_perishable(&mut self) -> EngineResult<()> {
        let definition = self.definition;
        let tables = &definition.loot_tables;
        Self::forced(tables.primary_treasure_roll.as_ref(), PRIMARY, "advanced_treasure")?;
        let advanced = Self::forced(
            tables.advanced_treasure_roll.as_ref(),
            ADVANCED,
            "prefix_base_item_suffix",
        )?;
        let item_type = Self::forced(tables.base_item_type.as_ref(), ITEM_TYPE, "perishables")?;

        self.note("Advanced Treasure Result", advanced.label());
        self.note("Base Item Type", item_type.label());
        self.item(advanced, item_type)
    }

    fn normal_treasure(&mut self, entry: &'a RangeEntry) -> EngineResult<()> {
        let die = entry.die_size.ok_or_else(|| EngineError::MissingDieSize {
            table: format!("{PRIMARY}.type.{}", entry.key),
        })?;
        let label = "Normal Treasure Roll";
        let roll = self.roll(die, label)?;
        let modifier = entry.modifier.unwrap_or(0);
        let scaled = if entry.mult_level.unwrap_or(false) {
            roll.checked_mul(self.level)
        } else {
            Some(roll)
        };
        let amount = scaled
            .and_then(|n| n.checked_add(modifier))
            .ok_or_else(|| overflow(label))?;
        debug!(amount, "normal treasure");
        self.trace.push(TraceEvent::Gold { amount });
        Ok(())
    }

    fn advanced_treasure(&mut self) -> EngineResult<()> {
        let definition = self.definition;
        let tables = &definition.loot_tables;
        let table = Self::region(tables.advanced_treasure_roll.as_ref(), ADVANCED)?;
        let Some(advanced) = self.selector(
            table,
            ADVANCED,
            "Advanced Treasure Roll",
            "Advanced Treasure Result",
        )?
        else {
            return Ok(());
        };

        let sub_die = advanced.die_size.ok_or_else(|| EngineError::MissingDieSize {
            table: format!("{ADVANCED}.type.{}", advanced.key),
        })?;
        let item_types = Self::region(tables.base_item_type.as_ref(), ITEM_TYPE)?;
        let roll = self.roll(sub_die, "Base Item Type Roll")?;
        let resolution = resolve(roll, &item_types.entries);
        let Some(item_type) = self.record("Base Item Type", roll, resolution) else {
            return Ok(());
        };
        self.item(advanced, item_type)
    }

    /// Roll the base item, then whichever affixes both entries allow.
    fn item(&mut self, advanced: &'a RangeEntry, item_type: &'a RangeEntry) -> EngineResult<()> {
        if self.base_item(item_type)?.is_none() {
            return Ok(());
        }
        for kind in AffixKind::all() {
            if advanced.allows_affix(*kind) && item_type.allows_affix(*kind) {
                self.affix(*kind, item_type)?;
            } else {
                debug!(affix = %kind, "affix not enabled");
            }
        }
        Ok(())
    }

    fn base_item(&mut self, item_type: &'a RangeEntry) -> EngineResult<Option<&'a RangeEntry>> {
        let key = &item_type.key;
        let definition = self.definition;
        let Some(table) = definition.loot_tables.base_items.get(key) else {
            warn!(category = %key, "base item category missing");
            self.note(
                "Base Item",
                format!("Base item category '{key}' not found in loot tables."),
            );
            return Ok(None);
        };
        let die = item_type.die_size.ok_or_else(|| EngineError::MissingDieSize {
            table: format!("{ITEM_TYPE}.type.{key}"),
        })?;

        let label = format!("Base Item Roll for {}", item_type.label());
        let mut roll = self.roll(die, &label)?;
        if item_type.adds_level() {
            roll = self.with_level(&label, roll)?;
        }

        match resolve(roll, table) {
            Resolution::Hit(item) => {
                self.trace.push(TraceEvent::component(ItemPart::BaseItem, item));
                self.note("Base Item", item.label());
                Ok(Some(item))
            }
            Resolution::Miss => {
                warn!(roll, category = %key, "base item roll matched no bucket");
                self.note("Base Item", OUT_OF_RANGE);
                Ok(None)
            }
        }
    }

    /// A single roll on the gem or body part table.
    pub(crate) fn identity(&mut self, source: IdentitySource) -> EngineResult<()> {
        let definition = self.definition;
        let table = match source {
            IdentitySource::Gem => definition.gems.as_ref(),
            IdentitySource::BodyPart => definition.monstrous_body_part.as_ref(),
        };
        let region = source.region();
        let table = table.ok_or(EngineError::MissingRegion { region })?;
        let die = table.die_size.ok_or_else(|| EngineError::MissingDieSize {
            table: region.to_string(),
        })?;

        let roll = self.roll(die, source.roll_label())?;
        match resolve(roll, &table.entries) {
            Resolution::Hit(entry) => self.trace.push(TraceEvent::Identity {
                source,
                name: entry.label().to_string(),
            }),
            Resolution::Miss => {
                warn!(roll, region, "roll matched no bucket");
                self.note(source.description(), OUT_OF_RANGE);
            }
        }
        Ok(())
    }
}

/// A modifier pushed the roll past `i64`.
pub(crate) fn overflow(roll: &str) -> EngineError {
    EngineError::ModifierOverflow {
        roll: roll.to_string(),
    }
}
