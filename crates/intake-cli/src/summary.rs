use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use intake_schema::{FieldFormat, SchemaRegistry, ValueType};
use intake_sync::SyncReport;
use intake_validate::{ErrorKind, ValidationResult};

pub fn print_reports(reports: &[SyncReport]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("System"),
        header_cell("Fetched"),
        header_cell("New"),
        header_cell("Updated"),
        header_cell("Skipped"),
        header_cell("Invalid"),
        header_cell("No consent"),
        header_cell("Transport"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut totals = [0usize; 6];
    for report in reports {
        let counts = [
            report.total_fetched,
            report.new_records,
            report.updated_records,
            report.duplicates_skipped,
            report.validation_failures,
            report.compliance_rejections,
        ];
        for (total, count) in totals.iter_mut().zip(counts) {
            *total += count;
        }
        table.add_row(vec![
            Cell::new(&report.system_id)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(report.total_fetched),
            count_cell(report.new_records, Color::Green),
            count_cell(report.updated_records, Color::Green),
            count_cell(report.duplicates_skipped, Color::Yellow),
            count_cell(report.validation_failures, Color::Red),
            count_cell(report.compliance_rejections, Color::Red),
            transport_cell(report.transport_error.as_deref()),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(totals[0]).add_attribute(Attribute::Bold),
        count_cell(totals[1], Color::Green).add_attribute(Attribute::Bold),
        count_cell(totals[2], Color::Green).add_attribute(Attribute::Bold),
        count_cell(totals[3], Color::Yellow).add_attribute(Attribute::Bold),
        count_cell(totals[4], Color::Red).add_attribute(Attribute::Bold),
        count_cell(totals[5], Color::Red).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");
}

pub fn print_schema(registry: &SchemaRegistry) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Section"),
        header_cell("Field"),
        header_cell("Type"),
        header_cell("Required"),
        header_cell("Constraint"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);

    for section in registry.sections() {
        for field in &section.fields {
            table.add_row(vec![
                Cell::new(&section.name).fg(Color::Blue),
                Cell::new(&field.name),
                Cell::new(type_label(field.spec.value_type)),
                if field.spec.required {
                    Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
                } else {
                    dim_cell("-")
                },
                constraint_cell(field.spec.format.as_ref()),
            ]);
        }
    }
    println!("{table}");
    println!(
        "{} fields across {} sections",
        registry.field_count(),
        registry.sections().len()
    );
}

pub fn print_validation(result: &ValidationResult) {
    if result.valid {
        println!("Record is valid.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Kind"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    for error in &result.errors {
        table.add_row(vec![
            Cell::new(&error.path).fg(Color::Blue),
            kind_cell(error.kind),
            Cell::new(&error.message),
        ]);
    }
    println!("{table}");
    println!("{} validation error(s)", result.errors.len());
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
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

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        dim_cell(count)
    }
}

fn transport_cell(error: Option<&str>) -> Cell {
    match error {
        Some(message) => Cell::new(message).fg(Color::Red),
        None => Cell::new("ok").fg(Color::Green),
    }
}

fn kind_cell(kind: ErrorKind) -> Cell {
    let label = match kind {
        ErrorKind::MissingRequired => "MISSING",
        ErrorKind::InvalidFormat => "FORMAT",
        ErrorKind::InvalidEnum => "ENUM",
    };
    Cell::new(label).fg(Color::Red)
}

fn constraint_cell(format: Option<&FieldFormat>) -> Cell {
    match format {
        Some(FieldFormat::Pattern(pattern)) => Cell::new(format!("pattern {pattern}")),
        Some(FieldFormat::AllowedValues(values)) => Cell::new(values.join(", ")),
        None => dim_cell("-"),
    }
}

fn type_label(value_type: ValueType) -> &'static str {
    match value_type {
        ValueType::String => "string",
        ValueType::Email => "email",
        ValueType::Phone => "phone",
        ValueType::Date => "date",
        ValueType::Number => "number",
        ValueType::Boolean => "boolean",
        ValueType::Url => "url",
        ValueType::Array => "array",
        ValueType::Enum => "enum",
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
