use serde_json::Value;

use super::display_scalar;

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known result fields in order of priority, then
/// fall back to the first field. `break_even_cycle` is listed even when
/// null so an absent break-even prints as `none` rather than being skipped.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // Panel output: one line per scenario.
    if let Some(Value::Array(scenarios)) = result_obj.get("scenarios") {
        for scenario in scenarios {
            let name = scenario.get("name").and_then(Value::as_str).unwrap_or("?");
            let break_even = scenario
                .get("result")
                .and_then(|r| r.get("break_even_cycle"))
                .unwrap_or(&Value::Null);
            println!("{}: {}", name, display_scalar("break_even_cycle", break_even));
        }
        return;
    }

    if let Value::Object(map) = result_obj {
        if let Some(val) = map.get("break_even_cycle") {
            println!("{}", display_scalar("break_even_cycle", val));
            return;
        }
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, display_scalar(key, val));
            return;
        }
    }

    println!("{}", display_scalar("", result_obj));
}
