use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{columns, format_cell, schedule_of};

/// Format output as tables: scalar result fields as `Field | Value`, any
/// schedule (yearly or monthly rows) as its own table underneath.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => print_envelope(result, map),
            None => println!("{}", field_table(map)),
        },
        Value::Array(arr) => println!("{}", rows_table(arr)),
        _ => println!("{}", format_cell(value)),
    }
}

fn print_envelope(result: &Value, envelope: &Map<String, Value>) {
    if let Value::Object(res_map) = result {
        let scalars: Map<String, Value> = res_map
            .iter()
            .filter(|(_, v)| !v.is_array())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        println!("{}", field_table(&scalars));

        if let Some((name, rows)) = schedule_of(result) {
            println!("\n{name}:");
            println!("{}", rows_table(rows));
        }
    } else {
        println!("{}", format_cell(result));
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {w}");
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {meth}");
    }
}

fn field_table(map: &Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.clone(), format_cell(val)]);
    }
    builder.build()
}

fn rows_table(rows: &[Value]) -> Table {
    let mut builder = Builder::default();
    if let Some(Value::Object(first)) = rows.first() {
        let headers = columns(first);
        builder.push_record(headers.iter().copied());
        for row in rows.iter().filter_map(Value::as_object) {
            builder.push_record(
                headers
                    .iter()
                    .map(|h| row.get(*h).map(format_cell).unwrap_or_default()),
            );
        }
    } else {
        for row in rows {
            builder.push_record([format_cell(row)]);
        }
    }
    builder.build()
}
