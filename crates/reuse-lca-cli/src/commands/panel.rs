use clap::Args;
use serde_json::Value;

use reuse_lca_core::parse;
use reuse_lca_core::scenarios::{compute_panel, default_panel, ScenarioPanelInput};

use crate::input;

/// Arguments for multi-scenario comparison
#[derive(Args)]
pub struct PanelArgs {
    /// Path to a JSON or YAML file with a scenario panel (name, color, params per scenario)
    #[arg(long)]
    pub input: Option<String>,

    /// Maximum reuse-cycle count; values below 1 are coerced to 1.
    /// Overrides the horizon of a panel loaded from file or stdin.
    #[arg(long)]
    pub horizon: Option<String>,

    /// Path to a JSON or YAML physical-constants table (overrides the built-in set)
    #[arg(long)]
    pub constants: Option<String>,
}

pub fn run_panel(args: PanelArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut panel: ScenarioPanelInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        // Built-in pessimistic/expected/optimistic presets.
        default_panel(50)
    };

    if let Some(ref horizon) = args.horizon {
        panel.horizon = parse::lenient_horizon(horizon);
    }
    panel.horizon = panel.horizon.max(1);

    if let Some(ref path) = args.constants {
        panel.constants = Some(input::file::read_input(path)?);
    }

    let output = compute_panel(&panel)?;
    Ok(serde_json::to_value(output)?)
}
