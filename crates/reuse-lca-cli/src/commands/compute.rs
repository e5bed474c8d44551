use clap::Args;
use serde_json::Value;

use reuse_lca_core::amortization::{compute_amortization, ScenarioParameters};
use reuse_lca_core::constants::PhysicalConstants;
use reuse_lca_core::parse;

use crate::input;

/// Arguments for single-scenario amortization
///
/// Numeric flags are taken as text and parsed leniently: either `.` or `,`
/// works as decimal separator and a cleared value falls back to 0.
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ComputeArgs {
    /// Manufacturing emissions beyond raw material, kg CO2e per unit
    #[arg(long)]
    pub manufacturing: Option<String>,

    /// One-way transport distance in km
    #[arg(long)]
    pub distance: Option<String>,

    /// Probability a unit is returned after use (0-1)
    #[arg(long)]
    pub return_probability: Option<String>,

    /// Probability a returned unit is scrapped (0-1)
    #[arg(long)]
    pub scrap_probability: Option<String>,

    /// Net end-of-life emissions, kg CO2e per unit (negative = recycling credit)
    #[arg(long, default_value = "0")]
    pub end_of_life: String,

    /// Maximum reuse-cycle count; values below 1 are coerced to 1
    #[arg(long, default_value = "50")]
    pub horizon: String,

    /// Path to a JSON or YAML file with scenario parameters (overrides flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Path to a JSON or YAML physical-constants table (overrides the built-in set)
    #[arg(long)]
    pub constants: Option<String>,
}

/// Arguments for the break-even summary
#[derive(Args)]
pub struct BreakEvenArgs {
    #[command(flatten)]
    pub compute: ComputeArgs,
}

fn load_constants(path: &Option<String>) -> Result<PhysicalConstants, Box<dyn std::error::Error>> {
    let constants = match path {
        Some(p) => {
            let table: PhysicalConstants = input::file::read_input(p)?;
            table.validate()?;
            table
        }
        None => PhysicalConstants::default(),
    };
    Ok(constants)
}

fn scenario_from_args(args: &ComputeArgs) -> Result<ScenarioParameters, Box<dyn std::error::Error>> {
    let params: ScenarioParameters = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        ScenarioParameters {
            manufacturing_emissions: parse::lenient_decimal(
                args.manufacturing
                    .as_deref()
                    .ok_or("--manufacturing is required (or provide --input)")?,
            ),
            one_way_distance_km: parse::lenient_decimal(
                args.distance
                    .as_deref()
                    .ok_or("--distance is required (or provide --input)")?,
            ),
            return_probability: parse::lenient_decimal(
                args.return_probability
                    .as_deref()
                    .ok_or("--return-probability is required (or provide --input)")?,
            ),
            scrap_probability: parse::lenient_decimal(
                args.scrap_probability
                    .as_deref()
                    .ok_or("--scrap-probability is required (or provide --input)")?,
            ),
            end_of_life_balance: parse::lenient_decimal(&args.end_of_life),
        }
    };
    Ok(params)
}

pub fn run_compute(args: ComputeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = scenario_from_args(&args)?;
    let constants = load_constants(&args.constants)?;
    let horizon = parse::lenient_horizon(&args.horizon);

    let result = compute_amortization(&params, &constants, horizon)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_break_even(args: BreakEvenArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = scenario_from_args(&args.compute)?;
    let constants = load_constants(&args.compute.constants)?;
    let horizon = parse::lenient_horizon(&args.compute.horizon);

    let result = compute_amortization(&params, &constants, horizon)?;
    // Summary only; the full series stays with `compute`.
    Ok(serde_json::json!({
        "horizon": horizon,
        "survival_probability": result.survival_probability,
        "first_cycle_cost": result.first_cycle_cost,
        "last_cycle_cost": result.last_cycle_cost,
        "single_use_reference": constants.single_use_reference,
        "break_even_cycle": result.break_even_cycle,
    }))
}
