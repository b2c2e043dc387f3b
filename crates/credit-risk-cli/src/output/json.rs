use serde_json::Value;

/// Print the full result envelope as pretty JSON, diagnostics included.
/// This is the only format that shows `skipped` and `warnings` verbatim.
pub fn print_json(value: &Value) {
    println!("{}", render(value));
}

fn render(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_keeps_diagnostics_in_envelope() {
        let value = serde_json::json!({
            "rows": [{ "ticker": "VZ", "z_score": "2.246" }],
            "skipped": [{ "ticker": "MA", "reason": "missing field total_assets" }],
            "warnings": []
        });
        let rendered = render(&value);
        assert!(rendered.contains("\"skipped\""));
        assert!(rendered.contains("missing field total_assets"));
        assert!(rendered.contains("\"warnings\""));
    }
}
