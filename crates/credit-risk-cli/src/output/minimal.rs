use serde_json::Value;

/// One line per ticker with the headline value of the command:
/// the decision if present, otherwise the score.
pub fn print_minimal(value: &Value) {
    let Some(rows) = value.get("rows").and_then(Value::as_array) else {
        println!("{}", value);
        return;
    };

    // Priority order across the three commands
    let priority_keys = [
        "decision",
        "z_score",
        "probability_of_default",
        "distance_to_default",
    ];

    for row in rows {
        let Value::Object(map) = row else { continue };
        let ticker = map.get("ticker").and_then(Value::as_str).unwrap_or("?");

        let headline = priority_keys
            .iter()
            .find_map(|k| map.get(*k))
            .map(format_minimal)
            .unwrap_or_default();

        println!("{} {}", ticker, headline);
    }
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
