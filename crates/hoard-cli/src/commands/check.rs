use std::path::Path;

use colored::Colorize;
use hoard_core::{LootDefinition, SubTable, coverage_gaps, find_overlaps};

pub fn run(dir: &Path, table: &str) -> Result<(), String> {
    let definition = super::load_table(dir, table)?;

    let problems = missing_die_sizes(&definition)
        .into_iter()
        .chain(overlaps(&definition))
        .collect::<Vec<_>>();
    let gaps = gaps(&definition);

    for gap in &gaps {
        println!("  {} {gap}", "note:".cyan().bold());
    }
    if problems.is_empty() {
        println!("  All checks passed for '{table}'.");
        println!("  {} sub-tables", definition.sub_tables().len());
        return Ok(());
    }

    for problem in &problems {
        println!("  {} {problem}", "problem:".red().bold());
    }
    Err(format!(
        "{} problem{} in '{table}'",
        problems.len(),
        if problems.len() == 1 { "" } else { "s" }
    ))
}

/// Every die size a generation could need but the table does not define.
fn missing_die_sizes(def: &LootDefinition) -> Vec<String> {
    let mut out = Vec::new();
    let lt = &def.loot_tables;

    for (name, table) in [
        ("primary_treasure_roll", &lt.primary_treasure_roll),
        ("advanced_treasure_roll", &lt.advanced_treasure_roll),
    ] {
        if table.as_ref().is_some_and(|t| t.die_size.is_none()) {
            out.push(format!("loot_tables.{name} has no die_size"));
        }
    }
    let normal = lt
        .primary_treasure_roll
        .as_ref()
        .and_then(|t| t.entries.get("normal_treasure"));
    if normal.is_some_and(|e| e.die_size.is_none()) {
        out.push(
            "loot_tables.primary_treasure_roll.type.normal_treasure has no die_size".to_string(),
        );
    }
    if let Some(advanced) = &lt.advanced_treasure_roll {
        out.extend(entries_without_die(
            "loot_tables.advanced_treasure_roll.type",
            &advanced.entries,
        ));
    }
    if let Some(item_types) = &lt.base_item_type {
        let stocked: SubTable = SubTable::from_entries(
            item_types
                .entries
                .iter()
                .filter(|e| lt.base_items.contains_key(&e.key))
                .cloned()
                .collect(),
        );
        out.extend(entries_without_die("loot_tables.base_item_type.type", &stocked));
    }
    for kind in hoard_core::AffixKind::all() {
        let types = def.modifiers.type_table(*kind);
        let rolled: SubTable = SubTable::from_entries(
            types
                .iter()
                .filter(|e| !e.is_named("cursed"))
                .cloned()
                .collect(),
        );
        out.extend(entries_without_die(
            &format!("modifiers.{}_type", kind.plural()),
            &rolled,
        ));
    }
    for (name, table) in [("gems", &def.gems), ("monstrous_body_part", &def.monstrous_body_part)] {
        if table.as_ref().is_some_and(|t| t.die_size.is_none()) {
            out.push(format!("{name} has no die_size"));
        }
    }
    out
}

fn entries_without_die(path: &str, table: &SubTable) -> Vec<String> {
    table
        .iter()
        .filter(|e| e.die_size.is_none())
        .map(|e| format!("{path}.{} has no die_size", e.key))
        .collect()
}

fn overlaps(def: &LootDefinition) -> Vec<String> {
    def.sub_tables()
        .into_iter()
        .flat_map(|(path, table)| {
            find_overlaps(table)
                .into_iter()
                .map(move |(a, b)| format!("{path}: '{a}' overlaps '{b}'"))
        })
        .collect()
}

/// Faces of the flat tables no bucket covers. These roll as soft misses.
fn gaps(def: &LootDefinition) -> Vec<String> {
    let mut out = Vec::new();
    for (name, table) in [("gems", &def.gems), ("monstrous_body_part", &def.monstrous_body_part)] {
        let Some(table) = table else { continue };
        let Some(die) = table.die_size else { continue };
        let missing = coverage_gaps(&table.entries, 1..=i64::from(die));
        if !missing.is_empty() {
            let list = missing
                .iter()
                .map(|run| match (run.start(), run.end()) {
                    (start, end) if start == end => start.to_string(),
                    (start, end) => format!("{start}-{end}"),
                })
                .collect::<Vec<_>>()
                .join(", ");
            out.push(format!("{name}: no bucket for {list} on a d{die}"));
        }
    }
    out
}
