use serde_json::Value;

use super::{format_cell, result_of};

/// The headline figure of each calculation, in priority order.
const PRIORITY_KEYS: [&str; 4] = [
    "total_monthly_payment",
    "max_home_price",
    "monthly_payment",
    "monthly_savings",
];

/// Print just the key answer value from the output, falling back to the
/// first field of the result.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(value));
}

fn minimal_line(value: &Value) -> String {
    let result = result_of(value);

    if let Value::Object(map) = result {
        for key in PRIORITY_KEYS {
            if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
                return format_cell(val);
            }
        }
        if let Some((key, val)) = map.iter().next() {
            return format!("{key}: {}", format_cell(val));
        }
    }

    format_cell(result)
}
