use serde_json::Value;
use std::io;

use super::{flatten, payload};

/// Write output as two-column `field,value` CSV to stdout, nested fields
/// flattened to dotted paths.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let mut rows = Vec::new();
    flatten(payload(value), "", &mut rows);

    let _ = wtr.write_record(["field", "value"]);
    for (field, val) in &rows {
        let _ = wtr.write_record([field.as_str(), val.as_str()]);
    }

    let _ = wtr.flush();
}
