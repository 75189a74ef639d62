use serde_json::Value;

use super::{payload, scalar_text};

/// Key answer for each command, most specific first.
const PRIORITY_POINTERS: [&str; 6] = [
    "/differences/monthly_difference",
    "/year_one/monthly_payment",
    "/monthly_payment",
    "/example_rate",
    "/valid",
    "/three_month_sora",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let result_obj = payload(value);

    for pointer in PRIORITY_POINTERS {
        if let Some(val) = result_obj.pointer(pointer) {
            if !val.is_null() {
                println!("{}", scalar_text(val));
                return;
            }
        }
    }

    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, scalar_text(val));
            return;
        }
    }

    println!("{}", scalar_text(result_obj));
}
