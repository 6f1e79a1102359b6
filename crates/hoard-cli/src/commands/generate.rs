use std::path::Path;

use colored::Colorize;
use hoard_core::TableStore;
use hoard_engine::{EngineError, GenerationMode, LootSession, RollTrace, SessionConfig};
use hoard_render::{
    GenerationReport, ItemSummary, TreasureLog, csv_row, detailed_log, render_card, render_text,
};
use tracing::debug;

/// Options for one `generate` invocation.
pub struct GenerateOptions<'a> {
    pub table: &'a str,
    pub level: u32,
    pub mode: &'a str,
    pub seed: Option<u64>,
    pub format: &'a str,
    pub save: bool,
}

pub fn run(tables_dir: &Path, log_file: &Path, opts: &GenerateOptions<'_>) -> Result<(), String> {
    let mode = GenerationMode::parse(opts.mode)
        .ok_or_else(|| format!("unknown mode '{}' (see `hoard modes`)", opts.mode))?;
    if !matches!(opts.format, "text" | "card" | "details" | "csv" | "json") {
        return Err(format!(
            "unknown format '{}'. Supported: text, card, details, csv, json",
            opts.format
        ));
    }

    debug!(table = opts.table, %mode, level = opts.level, seed = ?opts.seed, "starting generation");
    let mut config = SessionConfig::default().with_level(opts.level);
    if let Some(seed) = opts.seed {
        config = config.with_seed(seed);
    }
    let explain = |e: EngineError| {
        if e.is_configuration_fault() {
            format!("loot table '{}' is misconfigured: {e}", opts.table)
        } else {
            e.to_string()
        }
    };
    let store = TableStore::new(tables_dir);
    let mut session = LootSession::open(&store, opts.table, config).map_err(explain)?;
    session.generate(mode).map_err(explain)?;

    let trace = session.trace();
    let summary = ItemSummary::from_trace(trace);

    match opts.format {
        "card" => println!("{}", render_card(&summary)),
        "details" => println!("{}", detailed_log(trace)),
        "csv" => print!("{}", csv_row(&summary)),
        "json" => {
            let report =
                GenerationReport::new(opts.table, mode, session.level(), opts.seed, trace);
            println!("{}", report.to_json().map_err(|e| e.to_string())?);
        }
        _ => print_text(opts, mode, session.level(), trace, &summary),
    }

    if opts.save {
        let log = TreasureLog::new(log_file);
        log.append(&summary).map_err(|e| e.to_string())?;
        eprintln!("  Saved to {}", log.path().display());
    }

    Ok(())
}

fn print_text(
    opts: &GenerateOptions<'_>,
    mode: GenerationMode,
    level: u32,
    trace: &RollTrace,
    summary: &ItemSummary,
) {
    println!(
        "  {} {}",
        "Treasure".bold(),
        format!("({mode}, level {level}, {})", opts.table).dimmed()
    );
    println!();
    for line in render_text(summary).lines() {
        if summary.cursed && line == "Cursed Item" {
            println!("  {}", line.red().bold());
        } else {
            println!("  {line}");
        }
    }
    println!();
    println!("  {}", "Roll Log".bold().underline());
    for line in detailed_log(trace).lines() {
        println!("  {line}");
    }
}
