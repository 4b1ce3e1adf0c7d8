//! Compute an accrual schedule from the command line.
//!
//! Inputs come from flags, from a json request file, or both (flags win).

use accrual_schedule::{
    DayCountConvention, RawDeposit, ScheduleConfig, ScheduleEngine, ScheduleRequest, ScheduleView,
};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::str::FromStr;
use tracing::Level;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Format {
    Table,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum DayCount {
    Actual365,
    Actual360,
}

impl From<DayCount> for DayCountConvention {
    fn from(day_count: DayCount) -> Self {
        match day_count {
            DayCount::Actual365 => DayCountConvention::Actual365,
            DayCount::Actual360 => DayCountConvention::Actual360,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "accrual", version, about = "Compound-interest accrual schedule with mid-period deposits")]
struct Cli {
    /// Starting principal
    #[arg(short = 'p', long)]
    principal: Option<String>,

    /// Annual interest rate in percent (12.5 means 12.5%)
    #[arg(short = 'r', long)]
    rate: Option<String>,

    /// Opening date, YYYY-MM-DD
    #[arg(long = "open")]
    open_date: Option<String>,

    /// Closing date, YYYY-MM-DD (defaults to today)
    #[arg(long = "close")]
    close_date: Option<String>,

    /// Deposit as DATE=AMOUNT, repeatable
    #[arg(short = 'd', long = "deposit")]
    deposits: Vec<String>,

    /// Json request file; flags override its fields
    #[arg(long)]
    request: Option<String>,

    /// Json schedule configuration file
    #[arg(long)]
    config: Option<String>,

    /// Day count convention; overrides the config file
    #[arg(long, value_enum)]
    day_count: Option<DayCount>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    format: Format,

    /// Fail on malformed input instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Log level written to stderr
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn init_logging(log_level: &str) -> Result<()> {
    let level = Level::from_str(log_level).with_context(|| format!("invalid log level {:?}", log_level))?;

    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        // Don't display the event's target (module path)
        .with_target(false)
        .with_max_level(level)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn build_request(cli: &Cli) -> Result<ScheduleRequest> {
    let mut request = match &cli.request {
        Some(path) => {
            let json = std::fs::read_to_string(path).with_context(|| format!("reading request {}", path))?;
            ScheduleRequest::from_json_str(&json).with_context(|| format!("parsing request {}", path))?
        }
        None => ScheduleRequest::default(),
    };

    if cli.principal.is_some() {
        request.principal = cli.principal.clone();
    }
    if cli.rate.is_some() {
        request.rate = cli.rate.clone();
    }
    if cli.open_date.is_some() {
        request.open_date = cli.open_date.clone();
    }
    if cli.close_date.is_some() {
        request.close_date = cli.close_date.clone();
    }
    request.deposits.extend(cli.deposits.iter().map(|arg| parse_deposit_arg(arg)));

    Ok(request)
}

fn parse_deposit_arg(arg: &str) -> RawDeposit {
    match arg.split_once('=') {
        Some((date, amount)) => RawDeposit::new(date, amount),
        None => RawDeposit {
            date: Some(arg.to_string()),
            amount: None,
        },
    }
}

fn build_config(cli: &Cli) -> Result<ScheduleConfig> {
    let mut config = match &cli.config {
        Some(path) => ScheduleConfig::from_path(path).with_context(|| format!("loading config {}", path))?,
        None => ScheduleConfig::default(),
    };
    if let Some(day_count) = cli.day_count {
        config = config.with_day_count(day_count.into());
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let engine = ScheduleEngine::try_new(build_config(&cli)?)?;
    let request = build_request(&cli)?;

    let schedule = if cli.strict {
        engine.compute_strict(&request)?
    } else {
        engine.compute(&request)
    };

    let view = ScheduleView::from_schedule(&schedule, engine.config());
    match cli.format {
        Format::Table => print!("{}", view.to_table()),
        Format::Json => println!("{}", view.to_json_pretty()?),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deposit_arg() {
        assert_eq!(parse_deposit_arg("2024-01-15=20000"), RawDeposit::new("2024-01-15", "20000"));
        assert_eq!(parse_deposit_arg("2024-01-15").amount, None);
    }

    #[test]
    fn test_flags_override_request_file() {
        let cli = Cli::parse_from([
            "accrual",
            "--principal",
            "5000",
            "--rate",
            "7",
            "--open",
            "2024-01-01",
            "-d",
            "2024-01-10=100",
        ]);
        let request = build_request(&cli).unwrap();

        assert_eq!(request.principal.as_deref(), Some("5000"));
        assert_eq!(request.close_date, None);
        assert_eq!(request.deposits.len(), 1);
    }

    #[test]
    fn test_day_count_flag_overrides_default() {
        let cli = Cli::parse_from(["accrual", "--day-count", "actual360"]);
        assert_eq!(build_config(&cli).unwrap().day_count, DayCountConvention::Actual360);

        let cli = Cli::parse_from(["accrual"]);
        assert_eq!(build_config(&cli).unwrap().day_count, DayCountConvention::Actual365);
    }
}
