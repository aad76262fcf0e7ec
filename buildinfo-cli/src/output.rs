use std::collections::BTreeMap;

use colored::Colorize;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};

use buildinfo_core::VersionReport;

/// Print the version line, plus build properties when verbose.
pub fn print_version_text(report: &VersionReport) {
    println!("{}", report.summary());

    if !report.provisioned {
        log::info!("Build provenance is incomplete; missing fields are reported as None");
    }
}

/// Format the version report as a two-column table.
pub fn print_version_table(report: &VersionReport) {
    let mut table = new_table(["Field", "Value"]);

    table.add_row(vec![Cell::new("Program"), Cell::new(&report.program)]);
    table.add_row(vec![Cell::new("Version"), Cell::new(&report.version)]);
    table.add_row(vec![
        Cell::new("Source Revision"),
        Cell::new(format_value(report.identity.source_revision_id)),
    ]);
    table.add_row(vec![
        Cell::new("Revision Date"),
        Cell::new(format_value(report.identity.source_revision_date)),
    ]);
    table.add_row(vec![
        Cell::new("Compiled On"),
        Cell::new(format_value(report.identity.build_compile_date)),
    ]);

    println!("{table}");
}

/// Format build properties as a colored table.
pub fn print_properties_table(props: &BTreeMap<String, String>) {
    if props.is_empty() {
        println!("{}", "No build properties found.".yellow());
        return;
    }

    let mut table = new_table(["Property", "Value"]);
    for (name, value) in props {
        table.add_row(vec![Cell::new(name), Cell::new(format_value(value))]);
    }

    println!("{table}");
}

fn new_table(header: [&str; 2]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.iter().map(|h| Cell::new(*h)).collect::<Vec<_>>());
    table
}

/// Dim values that are, or end in, the `None` sentinel.
fn format_value(value: &str) -> String {
    if value == "None" || value.ends_with(":None") {
        value.dimmed().to_string()
    } else {
        value.green().to_string()
    }
}
