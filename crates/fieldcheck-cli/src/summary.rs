use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use fieldcheck_cli::commands::{FieldRow, FormatRow, Status, ValidationReport};

pub fn print_validation(report: &ValidationReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Label"),
        header_cell("Kind"),
        header_cell("Value"),
        header_cell("Status"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Center);
    for row in &report.fields {
        table.add_row(vec![
            Cell::new(&row.name).add_attribute(Attribute::Bold),
            Cell::new(&row.label),
            dim_cell(row.kind),
            value_cell(&row.value),
            status_cell(row.status),
            row.message.as_deref().map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    println!("{table}");
    let totals = format!("{} checked, {} failed", report.checked, report.failed);
    if report.has_errors() {
        eprintln!("{totals}");
    } else {
        println!("{totals}");
    }
}

pub fn print_format(rows: &[FormatRow]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Kind"),
        header_cell("Raw"),
        header_cell("Display"),
    ]);
    apply_table_style(&mut table);
    for row in rows {
        let display = if row.changed {
            Cell::new(&row.display).fg(Color::Green)
        } else {
            value_cell(&row.display)
        };
        table.add_row(vec![
            Cell::new(&row.name).add_attribute(Attribute::Bold),
            dim_cell(row.kind),
            value_cell(&row.raw),
            display,
        ]);
    }
    println!("{table}");
}

pub fn print_fields(rows: &[FieldRow]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Label"),
        header_cell("Kind"),
        header_cell("Required"),
        header_cell("Default"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.name).add_attribute(Attribute::Bold),
            Cell::new(&row.label),
            dim_cell(row.kind),
            if row.required {
                Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
            } else {
                dim_cell("-")
            },
            row.default_value.as_deref().map_or_else(|| dim_cell("-"), value_cell),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn status_cell(status: Status) -> Cell {
    match status {
        Status::Pass => Cell::new("pass").fg(Color::Green),
        Status::Fail => Cell::new("fail")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn value_cell(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("(empty)")
    } else {
        Cell::new(value)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
