use serde_json::Value;
use std::io::{self, Write};

/// Write the result rows as CSV to stdout. The header row is always
/// emitted, even when every ticker was skipped, so downstream parsers see
/// the command's columns regardless of row count. Diagnostics are not part
/// of the CSV body; use the json or table output to see them.
pub fn print_csv(columns: &[&str], value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_csv(stdout.lock(), columns, value) {
        eprintln!("CSV write error: {}", e);
    }
}

fn write_csv<W: Write>(writer: W, columns: &[&str], value: &Value) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(columns)?;

    if let Some(rows) = value.get("rows").and_then(Value::as_array) {
        for row in rows {
            if let Value::Object(map) = row {
                let record: Vec<String> = columns
                    .iter()
                    .map(|c| map.get(*c).map(format_csv_value).unwrap_or_default())
                    .collect();
                wtr.write_record(&record)?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MERTON_COLUMNS: &[&str] = &["ticker", "distance_to_default", "probability_of_default"];

    fn render(columns: &[&str], value: &Value) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, columns, value).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_all_tickers_skipped_still_emits_header_row() {
        let value = serde_json::json!({
            "rows": [],
            "skipped": [{ "ticker": "VZ", "reason": "missing field total_debt" }],
            "warnings": []
        });
        let out = render(MERTON_COLUMNS, &value);
        assert_eq!(out, "ticker,distance_to_default,probability_of_default\n");
    }

    #[test]
    fn test_cells_follow_declared_column_order() {
        let value = serde_json::json!({
            "rows": [{
                "probability_of_default": 1.25,
                "ticker": "VZ",
                "distance_to_default": 3.1
            }]
        });
        let out = render(MERTON_COLUMNS, &value);
        assert_eq!(
            out,
            "ticker,distance_to_default,probability_of_default\nVZ,3.1,1.25\n"
        );
    }
}
