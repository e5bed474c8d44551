mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::compute::{BreakEvenArgs, ComputeArgs};
use commands::panel::PanelArgs;

/// Lifecycle carbon comparison of reusable vs single-use packaging
#[derive(Parser)]
#[command(
    name = "rlca",
    version,
    about = "Lifecycle carbon amortization and break-even analysis",
    long_about = "A CLI comparing the lifecycle carbon footprint of a reusable unit \
                  against a single-use baseline with decimal precision. Computes the \
                  amortized emissions per use for each reuse-cycle count, the first \
                  break-even cycle, and multi-scenario comparison panels."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the amortization series for one scenario
    Compute(ComputeArgs),
    /// Report only the break-even cycle for one scenario
    BreakEven(BreakEvenArgs),
    /// Compare several scenarios over a shared horizon
    Panel(PanelArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Compute(args) => commands::compute::run_compute(args),
        Commands::BreakEven(args) => commands::compute::run_break_even(args),
        Commands::Panel(args) => commands::panel::run_panel(args),
        Commands::Version => {
            println!("rlca {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
