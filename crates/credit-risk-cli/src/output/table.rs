use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Render a `{rows, skipped, warnings}` result as a table, with skipped
/// tickers and warnings as footers.
pub fn print_table(columns: &[&str], value: &Value) {
    match value.get("rows").and_then(Value::as_array) {
        Some(rows) => {
            print_rows(columns, rows);
            print_skipped(value.get("skipped"));
            print_warnings(value.get("warnings"));
        }
        // Not a row-shaped result; fall back to plain JSON
        None => println!("{}", value),
    }
}

fn print_rows(columns: &[&str], rows: &[Value]) {
    if rows.is_empty() {
        println!("(no rows)");
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(columns.iter().copied());

    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = columns
                .iter()
                .map(|c| map.get(*c).map(|v| format_cell(c, v)).unwrap_or_default())
                .collect();
            builder.push_record(record);
        }
    }

    println!("{}", Table::from(builder));
}

fn print_skipped(skipped: Option<&Value>) {
    let Some(Value::Array(skipped)) = skipped else {
        return;
    };
    if skipped.is_empty() {
        return;
    }
    println!("\nSkipped:");
    for entry in skipped {
        let ticker = entry.get("ticker").and_then(Value::as_str).unwrap_or("?");
        let reason = entry.get("reason").and_then(Value::as_str).unwrap_or("");
        println!("  - {}: {}", ticker, reason);
    }
}

fn print_warnings(warnings: Option<&Value>) {
    let Some(Value::Array(warnings)) = warnings else {
        return;
    };
    if warnings.is_empty() {
        return;
    }
    println!("\nWarnings:");
    for w in warnings {
        if let Value::String(s) = w {
            println!("  - {}", s);
        }
    }
}

/// Column-aware cell formatting: PD to two decimals, other numeric cells
/// (including decimals serialized as strings) to four.
fn format_cell(key: &str, value: &Value) -> String {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(f) if key == "probability_of_default" => format!("{:.2}", f),
            Some(f) if f.fract() != 0.0 => format!("{:.4}", f),
            _ => n.to_string(),
        },
        Value::String(s) => match s.parse::<f64>() {
            Ok(f) if key != "ticker" => format!("{:.4}", f),
            _ => s.clone(),
        },
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
