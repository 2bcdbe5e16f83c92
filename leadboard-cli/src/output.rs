//! Rendering command results as tables, JSON or YAML

use crate::cli::OutputFormat;
use crate::error::CliResult;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde_json::Value;

const TABLE_WIDTH: u16 = 120;

/// Writes results to stdout in the chosen format
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    format: OutputFormat,
    quiet: bool,
}

impl Printer {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Print `value`, using `table` to render it in table mode
    pub fn emit(&self, value: &Value, table: impl FnOnce(&Value) -> String) -> CliResult<()> {
        if self.quiet {
            return Ok(());
        }
        let rendered = match self.format {
            OutputFormat::Table => table(value),
            OutputFormat::Json => serde_json::to_string_pretty(value)?,
            OutputFormat::Yaml => serde_yaml_ng::to_string(value)?,
        };
        println!("{}", rendered.trim_end());
        Ok(())
    }
}

/// A table with the shared look
pub fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_width(TABLE_WIDTH);
    table
}

/// A string field, `-` when missing or blank
fn text(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "-".to_string(),
    }
}

fn money(value: &Value, key: &str) -> String {
    format!("{:.2}", value.get(key).and_then(Value::as_f64).unwrap_or(0.0))
}

fn items<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Every column with its leads, in board order
pub fn board_table(board: &Value) -> String {
    let mut table = new_table();
    table.set_header(vec!["Column", "Lead", "Title", "Company", "Value", "Contact"]);
    for column in items(board, "columns") {
        let heading = format!(
            "{} ({}, {})",
            text(column, "title"),
            text(column, "count"),
            money(column, "total")
        );
        let leads = items(column, "leads");
        if leads.is_empty() {
            table.add_row(vec![heading, "-".into(), "".into(), "".into(), "".into(), "".into()]);
            continue;
        }
        for (i, lead) in leads.iter().enumerate() {
            let first = if i == 0 { heading.clone() } else { String::new() };
            table.add_row(vec![
                first,
                text(lead, "id"),
                text(lead, "title"),
                text(lead, "company"),
                money(lead, "value"),
                text(lead, "contact"),
            ]);
        }
    }
    format!(
        "{table}\n{} lead(s), pipeline total {}",
        text(board, "leads"),
        money(board, "total")
    )
}

/// Leads with the column each sits in
pub fn leads_table(list: &Value) -> String {
    let leads = items(list, "leads");
    if leads.is_empty() {
        return "No leads.".to_string();
    }
    let mut table = new_table();
    table.set_header(vec!["Id", "Title", "Company", "Value", "Contact", "Column"]);
    for lead in leads {
        table.add_row(vec![
            text(lead, "id"),
            text(lead, "title"),
            text(lead, "company"),
            money(lead, "value"),
            text(lead, "contact"),
            text(lead, "column"),
        ]);
    }
    table.to_string()
}

/// One lead, field per row
pub fn lead_table(lead: &Value) -> String {
    let mut table = new_table();
    table.set_header(vec!["Field", "Value"]);
    for (label, key) in [
        ("Id", "id"),
        ("Title", "title"),
        ("Name", "fullName"),
        ("Company", "company"),
        ("Email", "email"),
        ("WhatsApp", "whatsapp"),
        ("Contact", "contact"),
        ("Column", "column"),
        ("Created", "createdAt"),
    ] {
        table.add_row(vec![label.to_string(), text(lead, key)]);
    }
    table.add_row(vec!["Value".to_string(), money(lead, "value")]);
    table.to_string()
}

pub fn columns_table(list: &Value) -> String {
    let mut table = new_table();
    table.set_header(vec!["#", "Id", "Title", "Slug", "Leads", "Total"]);
    for (position, column) in items(list, "columns").iter().enumerate() {
        table.add_row(vec![
            position.to_string(),
            text(column, "id"),
            text(column, "title"),
            text(column, "slug"),
            text(column, "count"),
            money(column, "total"),
        ]);
    }
    table.to_string()
}

pub fn activity_table(list: &Value) -> String {
    let entries = items(list, "entries");
    if entries.is_empty() {
        return "No activity yet.".to_string();
    }
    let mut table = new_table();
    table.set_header(vec!["Time", "Operation", "Actor", "Result"]);
    for entry in entries {
        let result = match entry.get("output").and_then(|o| o.get("error")) {
            Some(error) => format!("error: {}", error.as_str().unwrap_or_default()),
            None => "ok".to_string(),
        };
        table.add_row(vec![
            text(entry, "timestamp"),
            text(entry, "op"),
            text(entry, "actor"),
            result,
        ]);
    }
    table.to_string()
}
