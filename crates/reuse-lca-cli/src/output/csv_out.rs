use serde_json::Value;
use std::io;

/// Write output as CSV to stdout.
///
/// The per-cycle series is the natural CSV payload: one row per cycle,
/// `scenario` column added for panel output. Results without a series
/// degrade to two-column field/value rows. A missing break-even becomes
/// an empty cell.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            if let Some(scenarios) = map
                .get("result")
                .and_then(|r| r.get("scenarios"))
                .and_then(Value::as_array)
            {
                write_panel_csv(&mut wtr, scenarios);
            } else if let Some(Value::Array(series)) = map.get("per_cycle_series") {
                write_series_csv(&mut wtr, None, series, true);
            } else {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in map {
                    let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
                }
            }
        }
        Value::Array(arr) => write_series_csv(&mut wtr, None, arr, true),
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_panel_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, scenarios: &[Value]) {
    let mut first = true;
    for scenario in scenarios {
        let name = scenario.get("name").and_then(Value::as_str).unwrap_or("");
        if let Some(Value::Array(series)) = scenario
            .get("result")
            .and_then(|r| r.get("per_cycle_series"))
        {
            write_series_csv(wtr, Some(name), series, first);
            first = false;
        }
    }
}

fn write_series_csv(
    wtr: &mut csv::Writer<io::StdoutLock<'_>>,
    scenario: Option<&str>,
    series: &[Value],
    with_header: bool,
) {
    let Some(Value::Object(first)) = series.first() else {
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    if with_header {
        let mut header_row: Vec<&str> = Vec::new();
        if scenario.is_some() {
            header_row.push("scenario");
        }
        header_row.extend(&headers);
        let _ = wtr.write_record(&header_row);
    }

    for point in series {
        if let Value::Object(map) = point {
            let mut row: Vec<String> = Vec::new();
            if let Some(name) = scenario {
                row.push(name.to_string());
            }
            row.extend(
                headers
                    .iter()
                    .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default()),
            );
            let _ = wtr.write_record(&row);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
