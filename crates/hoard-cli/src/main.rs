//! CLI frontend for the Hoard loot generator.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use hoard_core::DEFAULT_TABLE;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(
    name = "hoard",
    about = "Hoard: a table-driven loot generator for tabletop RPGs",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory containing loot table .json files
    #[arg(long, global = true, env = "HOARD_TABLES_DIR", default_value = "loot_tables")]
    tables_dir: PathBuf,

    /// CSV file that `generate --save` appends to
    #[arg(long, global = true, env = "HOARD_LOG_FILE", default_value = "logs/treasure.csv")]
    log_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available loot tables
    Tables,

    /// List generation modes
    Modes,

    /// Roll a piece of treasure
    Generate {
        /// Loot table name (with or without .json)
        #[arg(short, long, default_value = DEFAULT_TABLE)]
        table: String,

        /// Character level
        #[arg(short, long, default_value = "1")]
        level: u32,

        /// Generation mode (see `hoard modes`)
        #[arg(short, long, default_value = "full")]
        mode: String,

        /// RNG seed for reproducible rolls
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format: text, card, details, csv, json
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Append the item to the treasure log
        #[arg(long)]
        save: bool,
    },

    /// Validate a loot table: missing die sizes and overlapping buckets
    Check {
        /// Loot table name (with or without .json)
        #[arg(short, long, default_value = DEFAULT_TABLE)]
        table: String,
    },
}

/// Log to stderr, filtered by `HOARD_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_env("HOARD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Commands::Tables => commands::tables::run(&cli.tables_dir),
        Commands::Modes => commands::modes::run(),
        Commands::Generate {
            table,
            level,
            mode,
            seed,
            format,
            save,
        } => commands::generate::run(
            &cli.tables_dir,
            &cli.log_file,
            &commands::generate::GenerateOptions {
                table: &table,
                level,
                mode: &mode,
                seed,
                format: &format,
                save,
            },
        ),
        Commands::Check { table } => commands::check::run(&cli.tables_dir, &table),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
