use napi::Result as NapiResult;
use napi_derive::napi;

use reuse_lca_core::amortization::{compute_amortization, ScenarioParameters};
use reuse_lca_core::constants::PhysicalConstants;
use reuse_lca_core::scenarios::{compute_panel, ScenarioPanelInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Compute the amortization series for one scenario.
///
/// `params_json` holds the scenario parameters; `constants_json` may be an
/// empty string to use the built-in capsule table. The UI re-invokes this
/// wholesale whenever a field or the horizon changes.
#[napi]
pub fn amortization_series(
    params_json: String,
    constants_json: String,
    horizon: u32,
) -> NapiResult<String> {
    let params: ScenarioParameters =
        serde_json::from_str(&params_json).map_err(to_napi_error)?;
    let constants: PhysicalConstants = if constants_json.trim().is_empty() {
        PhysicalConstants::default()
    } else {
        let table: PhysicalConstants =
            serde_json::from_str(&constants_json).map_err(to_napi_error)?;
        table.validate().map_err(to_napi_error)?;
        table
    };
    let output = compute_amortization(&params, &constants, horizon).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Compute a multi-scenario comparison panel.
#[napi]
pub fn scenario_panel(input_json: String) -> NapiResult<String> {
    let input: ScenarioPanelInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = compute_panel(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
