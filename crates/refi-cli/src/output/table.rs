use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{flatten, payload, scalar_text};

/// Format output as tables using the tabled crate. Scalar fields share one
/// Field/Value table; arrays of objects (e.g. a schedule) get their own.
pub fn print_table(value: &Value) {
    let result = payload(value);

    let mut scalars = Vec::new();
    let mut nested_tables = Vec::new();
    if let Value::Object(map) = result {
        for (key, val) in map {
            match val {
                Value::Array(items) if items.iter().all(|v| v.is_object()) && !items.is_empty() => {
                    nested_tables.push((key.as_str(), items.as_slice()))
                }
                other => flatten(other, key, &mut scalars),
            }
        }
    } else {
        println!("{}", scalar_text(result));
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (field, val) in &scalars {
        builder.push_record([field.as_str(), val.as_str()]);
    }
    println!("{}", Table::from(builder));

    for (title, items) in nested_tables {
        println!("\n{}:", title);
        print_array_table(items);
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = value.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_array_table(arr: &[Value]) {
    let Some(Value::Object(first)) = arr.first() else {
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);

    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(scalar_text).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }

    println!("{}", Table::from(builder));
}
