use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use pilot_core::calculations::seasonality::{allocate, uniform};
use pilot_core::calculations::{FinancialPlanProjector, ScenarioSolver, StressTestProjector};
use pilot_core::{PlanMode, PlanSource, StressTestParameters};
use pilot_data::FileWorkspace;
use pilot_data::report::{MonthlyReport, PlanReport, ScenarioReport, StressReport};
use rust_decimal::Decimal;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Financial plan projections for a food business.
///
/// Reads `fiscal.toml`, `brackets.csv` and `ledger.csv` from the workspace
/// directory and prints the requested report.
#[derive(Debug, Parser)]
#[command(name = "pilot-plan")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory holding fiscal.toml, brackets.csv and ledger.csv.
    #[arg(short, long, global = true, default_value = ".")]
    workspace: PathBuf,

    /// Fiscal year to project.
    #[arg(short, long, global = true, default_value = "2025")]
    year: i32,

    /// `budget` for forecasts, `actual` (or `reel`) for recorded figures.
    #[arg(short, long, global = true, default_value = "budget", value_parser = parse_mode)]
    mode: PlanMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the income statement of the year.
    Project,

    /// Revenue needed to reach a target net result at the current
    /// coefficient and expenses.
    Solve {
        #[arg(short, long, allow_hyphen_values = true)]
        target: Decimal,
    },

    /// Revenue at which the net result is zero.
    BreakEven,

    /// Compare the plan with a perturbed one (each variation within ±50 %).
    Stress {
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        revenue_pct: Decimal,

        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        cost_pct: Decimal,

        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        expense_pct: Decimal,
    },

    /// Spread the year's revenue over twelve months.
    Monthly {
        /// Twelve comma-separated seasonality weights; uniform when omitted.
        #[arg(long, value_delimiter = ',')]
        weights: Vec<Decimal>,
    },
}

fn parse_mode(s: &str) -> Result<PlanMode, String> {
    PlanMode::parse(s).ok_or_else(|| format!("unknown mode '{s}', expected budget or actual"))
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let workspace = FileWorkspace::new(&cli.workspace);

    debug!(root = %workspace.root().display(), year = cli.year, mode = %cli.mode, "opening workspace");

    let fiscal = workspace
        .fiscal_parameters(cli.year)
        .with_context(|| format!("Failed to load fiscal settings from {}", cli.workspace.display()))?;
    let inputs = workspace
        .plan_inputs(cli.year, cli.mode)
        .with_context(|| format!("Failed to load ledger from {}", cli.workspace.display()))?;

    let plan = FinancialPlanProjector::new(&fiscal).project_inputs(&inputs);
    info!(year = cli.year, mode = %cli.mode, "projected plan");

    match cli.command {
        Command::Project => {
            print!("{}", PlanReport(&plan));
        }
        Command::Solve { target } => {
            let scenario = ScenarioSolver::new(&fiscal).scenario(
                "Target",
                target,
                plan.cost_coefficient,
                plan.total_expenses,
            );
            print!("{}", ScenarioReport(&scenario));
        }
        Command::BreakEven => {
            let scenario = ScenarioSolver::new(&fiscal).scenario(
                "Break-even",
                Decimal::ZERO,
                plan.cost_coefficient,
                plan.total_expenses,
            );
            print!("{}", ScenarioReport(&scenario));
        }
        Command::Stress {
            revenue_pct,
            cost_pct,
            expense_pct,
        } => {
            let params = StressTestParameters::new(revenue_pct, cost_pct, expense_pct)
                .context("Invalid stress parameters")?;
            let result = StressTestProjector::new(&fiscal).compare(&plan, &params);
            print!("{}", StressReport(&result));
        }
        Command::Monthly { weights } => {
            let weights = if weights.is_empty() {
                uniform()
            } else {
                let count = weights.len();
                match <[Decimal; 12]>::try_from(weights) {
                    Ok(weights) => weights,
                    Err(_) => bail!("expected 12 seasonality weights, got {count}"),
                }
            };
            let months = allocate(plan.revenue, &weights).context("Invalid seasonality weights")?;
            print!("{}", MonthlyReport(&months));
        }
    }

    Ok(())
}
