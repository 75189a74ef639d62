pub mod csv_out;
pub mod minimal;
pub mod summary;
pub mod table;

use refi_core::CalculatorConfig;
use serde_json::Value;

use crate::OutputFormat;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value, config: &CalculatorConfig) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(value) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("JSON serialization error: {}", e),
        },
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
        OutputFormat::Summary => summary::print_summary(value, config),
    }
}

/// The computed payload: `result` of an output envelope, else the value itself.
fn payload(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Flatten nested objects into dotted `(path, value)` pairs. Arrays of
/// objects are indexed (`schedule[0].month`).
fn flatten(value: &Value, prefix: &str, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(val, &path, out);
            }
        }
        Value::Array(items) if items.iter().any(|v| v.is_object()) => {
            for (i, item) in items.iter().enumerate() {
                flatten(item, &format!("{prefix}[{i}]"), out);
            }
        }
        other => out.push((prefix.to_string(), scalar_text(other))),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(scalar_text).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested() {
        let value = json!({
            "differences": { "monthly_difference": "-237.66" },
            "schedule": [{ "month": 1 }, { "month": 2 }],
            "warnings": ["a", "b"],
        });
        let mut rows = Vec::new();
        flatten(&value, "", &mut rows);
        assert!(rows.contains(&("differences.monthly_difference".into(), "-237.66".into())));
        assert!(rows.contains(&("schedule[1].month".into(), "2".into())));
        assert!(rows.contains(&("warnings".into(), "a, b".into())));
    }

    #[test]
    fn test_payload_unwraps_envelope() {
        let value = json!({ "result": { "x": 1 }, "warnings": [] });
        assert_eq!(payload(&value), &json!({ "x": 1 }));
        let bare = json!({ "x": 1 });
        assert_eq!(payload(&bare), &bare);
    }
}
