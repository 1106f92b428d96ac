//! Investment Simulator CLI
//!
//! Runs fixed-rate, historical and batch projections and renders the
//! result as text, CSV or JSON.

use anyhow::{anyhow, Context};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{error, info};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use investment_simulator::market::provider_from_settings;
use investment_simulator::plan::{
    load_plans, DEFAULT_ANNUAL_RATE_PERCENT, DEFAULT_DURATION_YEARS, DEFAULT_INITIAL_AMOUNT,
    DEFAULT_MONTHLY_CONTRIBUTION,
};
use investment_simulator::report::{
    format_currency, CsvPresenter, JsonPresenter, Presenter, TextPresenter,
};
use investment_simulator::returns::{DurationPreset, InstrumentCatalog};
use investment_simulator::settings::{currency_from_env, ProviderKind, ProviderSettings};
use investment_simulator::{
    DateRange, FixedRatePlan, InvestmentPlan, ReturnSource, ScenarioRunner,
    SimulationError, Trajectory,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliFormat {
    Text,
    Csv,
    Json,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliPreset {
    #[value(name = "1y")]
    OneYear,
    #[value(name = "2y")]
    TwoYears,
    #[value(name = "5y")]
    FiveYears,
    #[value(name = "10y")]
    TenYears,
}

impl From<CliPreset> for DurationPreset {
    fn from(value: CliPreset) -> Self {
        match value {
            CliPreset::OneYear => DurationPreset::OneYear,
            CliPreset::TwoYears => DurationPreset::TwoYears,
            CliPreset::FiveYears => DurationPreset::FiveYears,
            CliPreset::TenYears => DurationPreset::TenYears,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "investment_simulator",
    version,
    about = "Capital growth of an initial amount plus monthly contributions"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[arg(long, value_enum, global = true, default_value_t = CliFormat::Text)]
    format: CliFormat,

    #[arg(long, global = true, help = "Include the period table in text output")]
    table: bool,

    #[arg(long, global = true, help = "Write output to a file instead of stdout")]
    output: Option<PathBuf>,

    #[arg(long, global = true, help = "Currency symbol, defaults to SIMULATOR_CURRENCY or €")]
    currency: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project at a constant annual rate
    Fixed {
        #[command(flatten)]
        plan: PlanArgs,
        #[arg(long, default_value_t = DEFAULT_ANNUAL_RATE_PERCENT, help = "Annual rate in percent, 0 to 100")]
        rate: f64,
        #[arg(long, default_value_t = DEFAULT_DURATION_YEARS, help = "Duration in years, 1 to 50")]
        years: u32,
    },
    /// Project using historical monthly prices of a catalog instrument
    Historical {
        #[command(flatten)]
        plan: PlanArgs,
        #[arg(long, help = "Instrument display name or ticker")]
        instrument: String,
        #[arg(long, conflicts_with = "preset", help = "Start date, YYYY-MM-DD")]
        start: Option<NaiveDate>,
        #[arg(long, conflicts_with = "preset", help = "End date, YYYY-MM-DD")]
        end: Option<NaiveDate>,
        #[arg(long, value_enum, help = "Trailing window ending today")]
        preset: Option<CliPreset>,
        #[arg(long, help = "CSV price file or directory; selects the CSV provider")]
        prices: Option<PathBuf>,
        #[arg(long, help = "Per-attempt fetch timeout in seconds")]
        timeout_secs: Option<u64>,
    },
    /// Run every fixed-rate plan from a CSV file
    Batch {
        #[arg(long)]
        plans: PathBuf,
    },
    /// List supported instruments
    Instruments,
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[arg(long, default_value_t = DEFAULT_INITIAL_AMOUNT)]
    initial: f64,
    #[arg(long, default_value_t = DEFAULT_MONTHLY_CONTRIBUTION, help = "Monthly contribution")]
    contribution: f64,
}

impl PlanArgs {
    fn to_plan(&self) -> Result<InvestmentPlan, SimulationError> {
        InvestmentPlan::new(self.initial, self.contribution)
    }
}

/// One summary row per batch plan
#[derive(Serialize)]
struct BatchRow<'a> {
    name: &'a str,
    periods: u32,
    final_capital: f64,
    total_contributions: f64,
    total_interest: f64,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };
    let currency = cli.currency.clone().unwrap_or_else(currency_from_env);

    let outcome = match cli.command {
        Command::Fixed { plan, rate, years } => run_fixed(&plan, rate, years),
        Command::Historical {
            plan,
            instrument,
            start,
            end,
            preset,
            prices,
            timeout_secs,
        } => {
            let mut settings = ProviderSettings::from_env();
            if let Some(path) = prices {
                settings.kind = ProviderKind::Csv;
                settings.prices_path = Some(path);
            }
            if let Some(secs) = timeout_secs {
                settings.timeout = Duration::from_secs(secs);
            }
            let range = match preset {
                Some(p) => Ok(DurationPreset::from(p).range_ending(Local::now().date_naive())),
                None => {
                    let defaults = DateRange::default();
                    DateRange::new(
                        start.unwrap_or(defaults.start()),
                        end.unwrap_or(defaults.end()),
                    )
                }
            };
            run_historical(&plan, &instrument, range, settings).await?
        }
        Command::Batch { plans } => {
            return run_batch(&plans, cli.format, out, &currency);
        }
        Command::Instruments => {
            return list_instruments(out);
        }
    };

    let mut presenter: Box<dyn Presenter> = match cli.format {
        CliFormat::Text => Box::new(TextPresenter::new(out, currency).with_table(cli.table)),
        CliFormat::Csv => Box::new(CsvPresenter::new(out)),
        CliFormat::Json => Box::new(JsonPresenter::new(out)),
    };

    match outcome {
        Ok((title, trajectory)) => {
            presenter.render(&title, &trajectory)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!("Simulation aborted: {}", e);
            presenter.render_error(&e)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_fixed(
    args: &PlanArgs,
    rate: f64,
    years: u32,
) -> Result<(String, Trajectory), SimulationError> {
    let plan = args.to_plan()?;
    let fixed = FixedRatePlan::new("fixed", plan, rate, years)?;
    let trajectory = ScenarioRunner::default().run_fixed(&fixed);
    let title = format!("Growth at {:.2}% per year over {} years", rate, years);
    Ok((title, trajectory))
}

/// Outer error: the provider could not be set up. Inner error: the run aborted.
async fn run_historical(
    args: &PlanArgs,
    instrument: &str,
    range: Result<DateRange, SimulationError>,
    settings: ProviderSettings,
) -> anyhow::Result<Result<(String, Trajectory), SimulationError>> {
    let provider = provider_from_settings(&settings).context("Failed to set up quote provider")?;
    let runner = ScenarioRunner::new(settings);

    let plan = match args.to_plan() {
        Ok(plan) => plan,
        Err(e) => return Ok(Err(e)),
    };
    let source = match range.and_then(|r| runner.historical_request(instrument, r)) {
        Ok(request) => ReturnSource::Historical(request),
        Err(e) => return Ok(Err(e)),
    };

    info!("Using {} quote provider", provider.name());
    let title = format!("Growth of {}", source.describe());
    Ok(runner
        .run(plan, &source, provider.as_ref())
        .await
        .map(|trajectory| (title, trajectory)))
}

fn run_batch(
    path: &Path,
    format: CliFormat,
    mut out: Box<dyn Write>,
    currency: &str,
) -> anyhow::Result<ExitCode> {
    let plans = load_plans(path)
        .map_err(|e| anyhow!("{}", e))
        .with_context(|| format!("Failed to load plans from {}", path.display()))?;
    info!("Loaded {} plans from {}", plans.len(), path.display());

    let results = ScenarioRunner::default().run_batch(&plans);
    let rows: Vec<BatchRow> = plans
        .iter()
        .zip(&results)
        .map(|(plan, trajectory)| {
            let summary = trajectory.summary();
            BatchRow {
                name: &plan.name,
                periods: summary.periods,
                final_capital: summary.final_capital,
                total_contributions: summary.total_contributions,
                total_interest: summary.total_interest,
            }
        })
        .collect();

    match format {
        CliFormat::Text => {
            writeln!(
                out,
                "{:<20} {:>20} {:>20} {:>20}",
                "Plan", "Final capital", "Contributions", "Interest"
            )?;
            writeln!(out, "{}", "-".repeat(83))?;
            for row in &rows {
                writeln!(
                    out,
                    "{:<20} {:>20} {:>20} {:>20}",
                    row.name,
                    format_currency(row.final_capital, currency),
                    format_currency(row.total_contributions, currency),
                    format_currency(row.total_interest, currency),
                )?;
            }
        }
        CliFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            for row in &rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
        CliFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &rows)?;
            writeln!(out)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn list_instruments(mut out: Box<dyn Write>) -> anyhow::Result<ExitCode> {
    let catalog = InstrumentCatalog::default();
    for instrument in catalog.iter() {
        writeln!(out, "{:<40} {}", instrument.name, instrument.symbol)?;
    }
    Ok(ExitCode::SUCCESS)
}
