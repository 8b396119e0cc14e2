use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use i94_core::Relation;

use crate::types::RunResult;

/// Print the per-relation run summary.
pub fn print_summary(result: &RunResult) {
    println!("Output: {}", result.output_dir.display());
    if result.dry_run {
        println!("Dry run: no files written");
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Relation"),
        header_cell("Records"),
        header_cell("Partitioning"),
        header_cell("Path"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    let mut total_records = 0usize;
    for summary in &result.relations {
        total_records += summary.rows;
        let path_cell = match &summary.path {
            Some(path) => Cell::new(path.display()),
            None => Cell::new("-").fg(Color::DarkGrey),
        };
        table.add_row(vec![
            Cell::new(summary.relation.name()),
            Cell::new(summary.rows),
            Cell::new(summary.partitioning()),
            path_cell,
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_records).add_attribute(Attribute::Bold),
        Cell::new("-").fg(Color::DarkGrey),
        Cell::new("-").fg(Color::DarkGrey),
    ]);
    println!("{table}");
}

/// Print the relation catalog for the `tables` subcommand.
pub fn print_tables() {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Relation"),
        header_cell("Partitioning"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);

    for relation in Relation::ALL {
        let columns = relation.partition_columns();
        let partitioning = if columns.is_empty() {
            "-".to_string()
        } else {
            columns.join(", ")
        };
        table.add_row(vec![
            Cell::new(relation.name()),
            Cell::new(partitioning),
            Cell::new(relation.describe()),
        ]);
    }
    println!("{table}");
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
