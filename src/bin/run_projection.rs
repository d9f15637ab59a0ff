//! Run burn rate, runway, ROI or scenario projections from the command line
//!
//! Prints a monthly table and optionally writes CSV/JSON exports

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use startup_projection::calculators::{BurnRateInputs, RoiInputs, RoiSummary, RunwayInputs};
use startup_projection::export::{write_csv, write_json};
use startup_projection::projection::{
    ProjectionResult, DEFAULT_ROI_HORIZON_MONTHS, DEFAULT_RUNWAY_HORIZON_MONTHS,
};
use startup_projection::{ScenarioRunner, ScenarioSet};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "run_projection", about = "Startup cash and ROI projections")]
struct Cli {
    /// Write the projection as CSV to this path
    #[arg(long, global = true)]
    csv: Option<PathBuf>,

    /// Write the projection as JSON to this path
    #[arg(long, global = true)]
    json: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Burn rate from two cash balances, projected forward
    Burn {
        #[arg(long, allow_negative_numbers = true)]
        starting_cash: f64,
        #[arg(long, allow_negative_numbers = true)]
        ending_cash: f64,
        #[arg(long, allow_negative_numbers = true)]
        months: i64,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        monthly_revenue: f64,
        #[arg(long, default_value_t = DEFAULT_RUNWAY_HORIZON_MONTHS, allow_negative_numbers = true)]
        horizon: i64,
    },
    /// Months of runway for a cash balance and monthly burn
    Runway {
        #[arg(long, allow_negative_numbers = true)]
        cash: f64,
        #[arg(long, allow_negative_numbers = true)]
        expenses: f64,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        revenue: f64,
        /// Month-over-month burn growth in percent
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        burn_growth: f64,
        #[arg(long, default_value_t = DEFAULT_RUNWAY_HORIZON_MONTHS, allow_negative_numbers = true)]
        horizon: i64,
    },
    /// Return on an investment with a growing monthly return
    Roi {
        #[arg(long, allow_negative_numbers = true)]
        investment: f64,
        #[arg(long, allow_negative_numbers = true)]
        monthly_return: f64,
        /// Month-over-month return growth in percent
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        growth: f64,
        #[arg(long, default_value_t = DEFAULT_ROI_HORIZON_MONTHS, allow_negative_numbers = true)]
        horizon: i64,
    },
    /// Project every scenario in a JSON scenario file
    Scenarios {
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    match &cli.command {
        Command::Burn { starting_cash, ending_cash, months, monthly_revenue, horizon } => {
            let inputs = BurnRateInputs {
                starting_cash: *starting_cash,
                ending_cash: *ending_cash,
                months: *months,
                monthly_revenue: *monthly_revenue,
                horizon_months: *horizon,
            };
            let (metrics, result) = inputs.run()?;
            println!("Gross burn: ${:.0}/month", metrics.gross_burn);
            println!("Net burn:   ${:.0}/month", metrics.net_burn);
            match metrics.runway_months {
                Some(m) => println!("Runway:     {:.1} months", m),
                None => println!("Runway:     unlimited (not burning cash)"),
            }
            print_table(&result, "Months left");
            export(&cli, &result)?;
        }
        Command::Runway { cash, expenses, revenue, burn_growth, horizon } => {
            let inputs = RunwayInputs {
                cash_balance: *cash,
                monthly_expenses: *expenses,
                monthly_revenue: *revenue,
                burn_growth_percent: *burn_growth,
                horizon_months: *horizon,
            };
            let result = inputs.project()?;
            let summary = inputs.summarize(&result);
            println!("Net burn: ${:.0}/month", summary.net_burn);
            match summary.months_until_depletion {
                Some(m) => println!("Cash runs out in month {}", m),
                None => println!(
                    "Cash lasts the full {} months (${:.0} left)",
                    horizon, summary.ending_cash
                ),
            }
            print_table(&result, "Months left");
            export(&cli, &result)?;
        }
        Command::Roi { investment, monthly_return, growth, horizon } => {
            let inputs = RoiInputs {
                initial_investment: *investment,
                monthly_return: *monthly_return,
                return_growth_percent: *growth,
                horizon_months: *horizon,
            };
            let result = inputs.project()?;
            let summary = RoiSummary::from_result(&result);
            println!("Final value: ${:.0}", summary.final_value);
            println!("Net gain:    ${:.0}", summary.net_gain);
            println!("ROI:         {:.1}%", summary.final_roi_percent);
            print_table(&result, "ROI %");
            export(&cli, &result)?;
        }
        Command::Scenarios { file } => {
            let set = ScenarioSet::from_path(file)
                .with_context(|| format!("Failed to load scenarios from {}", file.display()))?;
            println!("Loaded {} scenarios", set.len());

            let outcomes = ScenarioRunner::new().run(&set);

            println!("\n{:<24} {:>14} {:>14} {:>10}", "Scenario", "Final", "Change", "Depleted");
            for outcome in &outcomes {
                match &outcome.result {
                    Ok(result) => println!(
                        "{:<24} {:>14.0} {:>14.0} {:>10}",
                        outcome.name,
                        result.final_value(),
                        result.total_change(),
                        result
                            .depletion_period()
                            .map(|p| format!("month {}", p))
                            .unwrap_or_else(|| "-".to_string()),
                    ),
                    Err(e) => println!("{:<24} error: {}", outcome.name, e),
                }
            }

            if cli.csv.is_some() || cli.json.is_some() {
                log::warn!(
                    "--csv/--json apply to single projections and are ignored for scenario runs"
                );
            }
        }
    }

    log::info!("Finished in {:?}", start.elapsed());
    Ok(())
}

fn print_table(result: &ProjectionResult, ratio_label: &str) {
    println!("\n{:>6} | {:>14} | {:>12} | {:>12}", "Month", "Balance", "Change", ratio_label);
    for s in &result.snapshots {
        println!(
            "{:>6} | {:>14.2} | {:>12.2} | {:>12.2}",
            s.period, s.cumulative_value, s.period_delta, s.derived_ratio
        );
    }
}

fn export(cli: &Cli, result: &ProjectionResult) -> Result<()> {
    if let Some(path) = &cli.csv {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        write_csv(BufWriter::new(file), result)?;
        println!("CSV written to {}", path.display());
    }
    if let Some(path) = &cli.json {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        write_json(BufWriter::new(file), result)?;
        println!("JSON written to {}", path.display());
    }
    Ok(())
}
