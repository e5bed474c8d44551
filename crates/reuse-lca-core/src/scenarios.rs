//! Multi-scenario comparison panel.
//!
//! Scenario identity (name, chart color, parameter set) is plain data; the
//! panel invokes the single amortization engine once per scenario over a
//! shared horizon and constants table. Scenarios are independent pure
//! computations, so order does not matter.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{compute_amortization, AmortizationResult, ScenarioParameters};
use crate::constants::PhysicalConstants;
use crate::types::{with_metadata, ComputationOutput};
use crate::ReuseLcaResult;

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

/// One named scenario of the panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDefinition {
    /// Display name, e.g. "expected".
    pub name: String,
    /// Chart line color as a CSS color string.
    pub color: String,
    pub params: ScenarioParameters,
}

/// Input for a scenario comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioPanelInput {
    pub scenarios: Vec<ScenarioDefinition>,
    /// Maximum reuse-cycle count, shared by all scenarios.
    pub horizon: u32,
    /// Constants table override; the built-in table when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constants: Option<PhysicalConstants>,
}

/// Result for one scenario, carrying its identity alongside the series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub color: String,
    pub result: AmortizationResult,
}

/// Output of a scenario comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioPanelOutput {
    pub scenarios: Vec<ScenarioResult>,
    pub horizon: u32,
}

// ---------------------------------------------------------------------------
// Core calculation
// ---------------------------------------------------------------------------

/// Run the amortization engine for every scenario of the panel.
///
/// A scenario without a break-even inside the horizon is a normal outcome;
/// it is surfaced as a warning line, never as an error.
pub fn compute_panel(
    input: &ScenarioPanelInput,
) -> ReuseLcaResult<ComputationOutput<ScenarioPanelOutput>> {
    let start = Instant::now();

    let constants = match &input.constants {
        Some(c) => {
            c.validate()?;
            c.clone()
        }
        None => PhysicalConstants::default(),
    };

    let mut scenarios = Vec::with_capacity(input.scenarios.len());
    let mut warnings = Vec::new();

    for definition in &input.scenarios {
        let result = compute_amortization(&definition.params, &constants, input.horizon)?;
        if result.break_even_cycle.is_none() {
            warnings.push(format!(
                "Scenario '{}' does not break even within {} cycles",
                definition.name, input.horizon
            ));
        }
        scenarios.push(ScenarioResult {
            name: definition.name.clone(),
            color: definition.color.clone(),
            result,
        });
    }

    let output = ScenarioPanelOutput {
        scenarios,
        horizon: input.horizon,
    };

    Ok(with_metadata(
        "Amortized lifecycle emissions per scenario with first break-even cycle \
         against the single-use reference",
        input,
        warnings,
        start.elapsed().as_micros() as u64,
        output,
    ))
}

/// Built-in pessimistic/expected/optimistic presets for the capsule
/// reference data set. The expected case matches the published worked
/// example for this system.
pub fn default_panel(horizon: u32) -> ScenarioPanelInput {
    ScenarioPanelInput {
        scenarios: vec![
            ScenarioDefinition {
                name: "pessimistic".into(),
                color: "#d62728".into(),
                params: ScenarioParameters {
                    manufacturing_emissions: dec!(0.0012),
                    one_way_distance_km: dec!(600),
                    return_probability: dec!(0.70),
                    scrap_probability: dec!(0.10),
                    end_of_life_balance: dec!(0.0005),
                },
            },
            ScenarioDefinition {
                name: "expected".into(),
                color: "#1f77b4".into(),
                params: ScenarioParameters {
                    manufacturing_emissions: dec!(0.0008),
                    one_way_distance_km: dec!(300),
                    return_probability: dec!(0.95),
                    scrap_probability: dec!(0.02),
                    end_of_life_balance: dec!(-0.0015),
                },
            },
            ScenarioDefinition {
                name: "optimistic".into(),
                color: "#2ca02c".into(),
                params: ScenarioParameters {
                    manufacturing_emissions: dec!(0.0005),
                    one_way_distance_km: dec!(150),
                    return_probability: dec!(0.99),
                    scrap_probability: dec!(0.005),
                    end_of_life_balance: dec!(-0.002),
                },
            },
        ],
        horizon,
        constants: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
