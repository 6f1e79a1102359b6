use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use hoard_core::{DEFAULT_TABLE, TableStore};

pub fn run(dir: &Path) -> Result<(), String> {
    let store = TableStore::new(dir);
    let names = store.list_available();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Table", "Status"]);

    for name in &names {
        let status = match store.load(name) {
            Ok(_) if name == DEFAULT_TABLE => "ok (default)".to_string(),
            Ok(_) => "ok".to_string(),
            Err(e) => e.to_string(),
        };
        table.add_row(vec![name.as_str(), status.as_str()]);
    }

    println!("{table}");
    println!();
    println!("  {} tables in {}", names.len(), dir.display());
    Ok(())
}
