use comfy_table::{ContentArrangement, Table};
use hoard_engine::GenerationMode;

pub fn run() -> Result<(), String> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Mode", "Alias"]);
    for mode in GenerationMode::all() {
        table.add_row(vec![mode.to_string(), mode.alias().to_string()]);
    }
    println!("{table}");
    Ok(())
}
