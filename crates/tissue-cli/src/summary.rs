//! Terminal output for catalogs and import reports.

use std::fmt::Write;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tissue_core::{ImportReport, ImportSource};
use tissue_model::Catalog;

/// One row per tissue, background first.
pub fn catalog_table(catalog: &Catalog) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Name"),
        header_cell("Color"),
        header_cell("Opacity"),
        header_cell("Locked"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);

    for (id, record) in catalog.records().iter().enumerate() {
        let name = if id == 0 {
            Cell::new("(background)").add_attribute(Attribute::Dim)
        } else {
            Cell::new(&record.name)
        };
        let [r, g, b] = record.color.to_u8();
        table.add_row(vec![
            Cell::new(id),
            name,
            Cell::new(hex_color(record.color.to_u8())).fg(Color::Rgb { r, g, b }),
            Cell::new(format!("{:.2}", record.opacity)),
            Cell::new(if record.locked { "yes" } else { "" }),
        ]);
    }
    table
}

pub fn print_catalog(catalog: &Catalog) {
    println!("{}", catalog_table(catalog));
    println!("{} tissues", catalog.count());
}

/// `#rrggbb` for an 8-bit color.
pub fn hex_color([r, g, b]: [u8; 3]) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Plain-text description of an import: source, carried-over range and
/// every id that moved.
pub fn import_summary(report: &ImportReport, catalog: &Catalog) -> String {
    let source = match report.source {
        ImportSource::Readable => "readable list",
        ImportSource::ForeignTable => "foreign lookup table",
    };
    let mut out = String::new();
    let _ = writeln!(out, "Imported {source}: {} tissues", catalog.count());
    if report.removed_range == 0 {
        let _ = writeln!(out, "No tissues carried over");
    } else {
        let _ = writeln!(
            out,
            "Carried over (not in the list): ids 1..={}",
            report.removed_range
        );
    }
    let moved: Vec<_> = report.remap.changes().collect();
    if moved.is_empty() {
        let _ = writeln!(out, "No tissue ids changed");
    } else {
        let _ = writeln!(out, "Relabeled:");
        for (old, new) in moved {
            let _ = writeln!(out, "  {old} -> {new} {}", catalog.name(new));
        }
    }
    out
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .add_attribute(Attribute::Bold)
        .fg(Color::Cyan)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
