use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::display_scalar;

/// Format output as tables using the tabled crate.
///
/// Three shapes come through here: the single-scenario result (summary
/// fields plus a per-cycle series), the scenario-panel envelope, and the
/// flat break-even summary. Series arrays get their own table; everything
/// else renders as field/value rows.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                // Panel envelope: result + warnings + methodology.
                print_panel(result, map);
            } else {
                print_summary(map);
                if let Some(Value::Array(series)) = map.get("per_cycle_series") {
                    println!();
                    print_series(series);
                }
            }
        }
        Value::Array(arr) => print_series(arr),
        _ => println!("{}", value),
    }
}

fn print_panel(result: &Value, envelope: &serde_json::Map<String, Value>) {
    if let Some(Value::Array(scenarios)) = result.get("scenarios") {
        for scenario in scenarios {
            if let Value::Object(s) = scenario {
                if let Some(name) = s.get("name").and_then(Value::as_str) {
                    println!("Scenario: {}", name);
                }
                if let Some(Value::Object(res)) = s.get("result") {
                    print_summary(res);
                    if let Some(Value::Array(series)) = res.get("per_cycle_series") {
                        println!();
                        print_series(series);
                    }
                }
                println!();
            }
        }
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("Warnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        println!("\nMethodology: {}", methodology);
    }
}

fn print_summary(map: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        // The series gets its own table below the summary.
        if matches!(val, Value::Array(_)) {
            continue;
        }
        builder.push_record([key.as_str(), &display_scalar(key, val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_series(series: &[Value]) {
    if series.is_empty() {
        println!("(empty series)");
        return;
    }

    let Some(Value::Object(first)) = series.first() else {
        for item in series {
            println!("{}", display_scalar("", item));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for point in series {
        if let Value::Object(map) = point {
            let row: Vec<String> = headers
                .iter()
                .map(|h| {
                    map.get(h.as_str())
                        .map(|v| display_scalar(h, v))
                        .unwrap_or_default()
                })
                .collect();
            builder.push_record(row);
        }
    }
    println!("{}", Table::from(builder));
}
