pub mod check;
pub mod generate;
pub mod modes;
pub mod tables;

use std::path::Path;

use hoard_core::{LootDefinition, TableStore};

/// Load a table from the store, mapping failures to a printable message.
fn load_table(dir: &Path, table: &str) -> Result<LootDefinition, String> {
    TableStore::new(dir).load(table).map_err(|e| e.to_string())
}
