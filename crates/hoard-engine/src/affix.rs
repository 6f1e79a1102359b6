//! Prefix and suffix resolution.
//!
//! An affix is two rolls: a type roll against `{prefixes,suffixes}_type`,
//! which may chain through `capricious` rerolls, then a property roll against
//! the chosen category's table.

use hoard_core::{AffixKind, LevelBonus, RangeEntry, Resolution, resolve};
use tracing::{debug, warn};

use crate::dice::DiceSource;
use crate::error::{EngineError, EngineResult};
use crate::pipeline::{Pipeline, overflow};
use crate::trace::TraceEvent;
use crate::trace::event::OUT_OF_RANGE;

const CAPRICIOUS: &str = "capricious";
const CURSED: &str = "cursed";

/// Die size and modifier for one roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RollParams {
    die: u32,
    modifier: i64,
}

impl<'a, D: DiceSource> Pipeline<'a, D> {
    /// Resolve one affix for an item type. Does nothing if the item type has
    /// no `ps_die_size`.
    pub(crate) fn affix(&mut self, kind: AffixKind, item_type: &'a RangeEntry) -> EngineResult<()> {
        let Some(die) = item_type.ps_die_size else {
            debug!(affix = %kind, item_type = %item_type.key, "no ps_die_size, skipping affix");
            return Ok(());
        };
        let base = RollParams {
            die,
            modifier: item_type.ps_mod.unwrap_or(0),
        };

        let Some(chosen) = self.affix_type(kind, base)? else {
            return Ok(());
        };
        let params = self.property_params(kind, chosen, base)?;
        self.affix_property(kind, chosen, params)?;
        self.trace.push(TraceEvent::AffixType {
            affix: kind,
            name: chosen.label().to_string(),
        });
        Ok(())
    }

    /// Roll against the type table until a non-capricious category comes up.
    fn affix_type(
        &mut self,
        kind: AffixKind,
        mut params: RollParams,
    ) -> EngineResult<Option<&'a RangeEntry>> {
        let definition = self.definition;
        let table = definition.modifiers.type_table(kind);
        let label = format!("{kind} Type Roll");
        let mut rerolls = 0;

        loop {
            let total = self.modified_roll(&label, params)?;
            let Some(entry) = resolve(total, table).entry() else {
                debug!(affix = %kind, roll = total, "affix type roll matched no bucket");
                return Ok(None);
            };
            if !entry.is_named(CAPRICIOUS) {
                return Ok(Some(entry));
            }

            if rerolls >= self.max_rerolls {
                return Err(EngineError::RerollLimit {
                    affix: kind,
                    limit: self.max_rerolls,
                });
            }
            rerolls += 1;
            self.note("Capricious reroll", format!("Rerolling for {kind}"));
            params = RollParams {
                die: entry.die_size.ok_or_else(|| EngineError::MissingDieSize {
                    table: format!("modifiers.{}_type.{}", kind.plural(), entry.key),
                })?,
                modifier: entry.add_level.map_or(0, LevelBonus::amount),
            };
        }
    }

    /// Parameters for the property roll of the chosen category.
    fn property_params(
        &mut self,
        kind: AffixKind,
        chosen: &RangeEntry,
        base: RollParams,
    ) -> EngineResult<RollParams> {
        let params = if chosen.is_named(CURSED) {
            base
        } else {
            RollParams {
                die: chosen.die_size.ok_or_else(|| EngineError::MissingDieSize {
                    table: format!("modifiers.{}_type.{}", kind.plural(), chosen.key),
                })?,
                modifier: if chosen.adds_level() { self.level } else { 0 },
            }
        };

        if params.die == 0 {
            self.note(
                format!("Special handling for {}", chosen.label()),
                "Using base item type values for affix property roll.",
            );
            return Ok(base);
        }
        Ok(params)
    }

    /// Roll on the chosen category's property table.
    fn affix_property(
        &mut self,
        kind: AffixKind,
        chosen: &RangeEntry,
        params: RollParams,
    ) -> EngineResult<()> {
        let definition = self.definition;
        let modifiers = &definition.modifiers;
        let name = chosen.label();

        let key = match chosen
            .name
            .as_deref()
            .and_then(|n| modifiers.type_table(kind).find_by_name(n))
        {
            Some(entry) => entry.key.as_str(),
            None => {
                self.note("Could not find affix type key for name", name);
                return Ok(());
            }
        };
        let Some(table) = modifiers.property_table(kind, key) else {
            self.note("Affix table not found", key);
            return Ok(());
        };

        let total = self.modified_roll(&format!("{kind} Roll"), params)?;
        match resolve(total, table) {
            Resolution::Hit(entry) => {
                self.trace.push(TraceEvent::component(kind.into(), entry));
            }
            Resolution::Miss => {
                warn!(affix = %kind, category = key, roll = total, "affix roll matched no bucket");
                self.note(kind.to_string(), OUT_OF_RANGE);
            }
        }
        Ok(())
    }

    /// Roll, add the modifier, and record the arithmetic.
    fn modified_roll(&mut self, label: &str, params: RollParams) -> EngineResult<i64> {
        let raw = self.roll(params.die, label)?;
        let total = raw
            .checked_add(params.modifier)
            .ok_or_else(|| overflow(label))?;
        self.note(
            format!("{label} (modified)"),
            format!("{raw} + {} = {total}", params.modifier),
        );
        Ok(total)
    }
}
