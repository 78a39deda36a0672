pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Render a scalar JSON value for a cell. Objects collapse to
/// `key value` pairs so a break-even of `{"months": 28}` reads `months 28`.
pub fn format_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => arr.iter().map(format_cell).collect::<Vec<_>>().join(", "),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| format!("{k} {}", format_cell(v)))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// The calculation payload: the `result` field of an envelope, or the value
/// itself when it is not wrapped.
pub fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// First array-of-objects field in a result, e.g. `yearly_data`.
pub fn schedule_of(result: &Value) -> Option<(&str, &[Value])> {
    result.as_object()?.iter().find_map(|(k, v)| match v {
        Value::Array(rows) if rows.first().is_some_and(Value::is_object) => {
            Some((k.as_str(), rows.as_slice()))
        }
        _ => None,
    })
}

/// Header order for schedule rows: the period column (`year` or `month`)
/// first, the rest in serialized order.
pub fn columns(row: &Map<String, Value>) -> Vec<&str> {
    let mut cols: Vec<&str> = row.keys().map(String::as_str).collect();
    if let Some(pos) = cols.iter().position(|k| matches!(*k, "year" | "month")) {
        let period = cols.remove(pos);
        cols.insert(0, period);
    }
    cols
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_cell_break_even() {
        assert_eq!(format_cell(&json!({"months": 28})), "months 28");
        assert_eq!(format_cell(&json!("never")), "never");
    }

    #[test]
    fn test_result_of_unwraps_envelope() {
        let v = json!({"result": {"a": 1}, "warnings": []});
        assert_eq!(result_of(&v), &json!({"a": 1}));
        let bare = json!({"a": 1});
        assert_eq!(result_of(&bare), &bare);
    }

    #[test]
    fn test_schedule_of_finds_yearly_rows() {
        let v = json!({
            "monthly_payment": "1000",
            "yearly_data": [{"year": 1, "ending_balance": "0"}]
        });
        let (name, rows) = schedule_of(&v).unwrap();
        assert_eq!(name, "yearly_data");
        assert_eq!(rows.len(), 1);
        assert!(schedule_of(&json!({"warnings": ["x"]})).is_none());
    }

    #[test]
    fn test_columns_put_period_first() {
        let row = json!({"year": 1, "total_principal": "0", "ending_balance": "0"});
        assert_eq!(
            columns(row.as_object().unwrap()),
            vec!["year", "ending_balance", "total_principal"]
        );
        let plain = json!({"b": 1, "a": 2});
        assert_eq!(columns(plain.as_object().unwrap()), vec!["a", "b"]);
    }
}
