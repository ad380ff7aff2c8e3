use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use pwv_cli::types::RunResult;
use pwv_model::{SessionRecord, SessionState};

pub fn print_run_summary(result: &RunResult, show_preview: bool) {
    let session = &result.session;
    println!("Session: {}", session.session_id);
    if session.is_ephemeral() {
        println!("(ephemeral session, not saved)");
    }
    println!("Output: {}", result.output_file.display());

    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Run"), Cell::new(result.run_index)]);
    table.add_row(vec![
        Cell::new("Written this run"),
        Cell::new(result.written).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Total generated"),
        Cell::new(session.total_generated),
    ]);
    table.add_row(vec![
        Cell::new("Started at"),
        Cell::new(cursor_label(
            result.started_at.rule_index,
            result.started_at.count_within_rule,
            result.total_rules,
        )),
    ]);
    table.add_row(vec![
        Cell::new("Resumes at"),
        Cell::new(cursor_label(
            session.cursor.rule_index,
            session.cursor.count_within_rule,
            result.total_rules,
        )),
    ]);
    table.add_row(vec![
        Cell::new("Status"),
        status_cell(session.state(result.total_rules)),
    ]);
    table.add_row(vec![
        Cell::new("Elapsed"),
        dim_cell(format!("{:.2?}", result.elapsed)),
    ]);
    println!("{table}");

    if show_preview && !result.preview.is_empty() {
        println!();
        println!("Preview (first {} candidates):", result.preview.len());
        for candidate in &result.preview {
            println!("{candidate}");
        }
    }
}

pub fn print_already_completed(record: &SessionRecord) {
    println!(
        "Session {} is already completed ({} candidates generated).",
        record.session_id, record.total_generated
    );
    println!(
        "Run `pwv resume {} --restart` to start again from the first rule.",
        record.session_id
    );
}

/// Listing for `pwv sessions`. `total_rules` is unknown when the rule file is missing.
pub fn print_sessions(sessions: &[SessionRecord], total_rules: Option<usize>) {
    if sessions.is_empty() {
        println!("No saved sessions.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Session"),
        header_cell("Created"),
        header_cell("Strings"),
        header_cell("Dates"),
        header_cell("Generated"),
        header_cell("Status"),
    ]);
    apply_listing_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Center);
    for (position, record) in sessions.iter().enumerate() {
        table.add_row(vec![
            dim_cell(position + 1),
            Cell::new(&record.session_id).fg(Color::Cyan),
            Cell::new(short_timestamp(&record.created_at)),
            list_cell(&record.profile.strings),
            list_cell(&record.profile.dates),
            Cell::new(record.total_generated),
            status_cell(session_state(record, total_rules)),
        ]);
    }
    println!("{table}");
}

/// Detail view for `pwv show`.
pub fn print_session_detail(record: &SessionRecord, total_rules: Option<usize>) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    let optional = |value: Option<usize>| value.map_or_else(|| "-".to_string(), |v| v.to_string());
    let rows: Vec<(&str, Cell)> = vec![
        ("session_id", Cell::new(&record.session_id).fg(Color::Cyan)),
        ("created_at", Cell::new(&record.created_at)),
        ("updated_at", Cell::new(&record.updated_at)),
        ("strings", list_cell(&record.profile.strings)),
        ("dates", list_cell(&record.profile.dates)),
        ("numbers", list_cell(&record.profile.numbers)),
        ("min_length", Cell::new(optional(record.constraints.min_length))),
        ("max_length", Cell::new(optional(record.constraints.max_length))),
        (
            "must_include_uppercase",
            Cell::new(record.constraints.must_include_uppercase),
        ),
        (
            "must_include_symbol",
            Cell::new(record.constraints.must_include_symbol),
        ),
        ("current_rule_index", Cell::new(record.cursor.rule_index)),
        (
            "current_rule_password_count",
            Cell::new(record.cursor.count_within_rule),
        ),
        ("is_completed", Cell::new(record.is_completed)),
        ("total_generated", Cell::new(record.total_generated)),
        ("status", status_cell(session_state(record, total_rules))),
        (
            "last_run_files",
            if record.last_run_files.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(record.last_run_files.join("\n"))
            },
        ),
    ];
    for (field, value) in rows {
        table.add_row(vec![Cell::new(field).add_attribute(Attribute::Bold), value]);
    }
    println!("{table}");
}

fn session_state(record: &SessionRecord, total_rules: Option<usize>) -> SessionState {
    match total_rules {
        Some(total) => record.state(total),
        None if record.is_completed => SessionState::Completed,
        None => SessionState::InProgress,
    }
}

fn cursor_label(rule_index: usize, count: usize, total_rules: usize) -> String {
    if rule_index >= total_rules {
        format!("end of rules ({total_rules})")
    } else {
        format!("rule {} of {total_rules}, after {count}", rule_index + 1)
    }
}

/// `2024-05-01T10:20:30+00:00` -> `2024-05-01 10:20`.
fn short_timestamp(value: &str) -> String {
    match value.get(..16) {
        Some(prefix) if value.len() > 16 => prefix.replacen('T', " ", 1),
        _ => value.to_string(),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if table.column_count() >= 2 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(12)),
            ColumnConstraint::UpperBoundary(Width::Percentage(75)),
        ]);
    }
}

fn apply_listing_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 7 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(4)),
            ColumnConstraint::LowerBoundary(Width::Fixed(12)),
            ColumnConstraint::LowerBoundary(Width::Fixed(16)),
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
            ColumnConstraint::UpperBoundary(Width::Percentage(20)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
            ColumnConstraint::LowerBoundary(Width::Fixed(11)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(state: SessionState) -> Cell {
    match state {
        SessionState::New => Cell::new(state.label()).fg(Color::Blue),
        SessionState::InProgress => Cell::new(state.label()).fg(Color::Yellow),
        SessionState::Completed => Cell::new(state.label())
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    }
}

fn list_cell(values: &[String]) -> Cell {
    if values.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(values.join(", "))
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .add_attribute(Attribute::Bold)
        .fg(Color::Cyan)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}
