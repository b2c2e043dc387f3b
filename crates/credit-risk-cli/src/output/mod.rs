pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use serde_json::Value;

use crate::OutputFormat;

/// Render a `{rows, skipped, warnings}` envelope in the requested format.
///
/// `columns` carries the command's column names in display order. The
/// tabular formats use it so every run shows the same columns in the same
/// order, including runs where no ticker produced a row.
pub fn format_output(format: &OutputFormat, columns: &[&str], value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(columns, value),
        OutputFormat::Csv => csv_out::print_csv(columns, value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}
