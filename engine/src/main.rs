// Engine main entry point
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use dashboard_engine::clock::FixedClock;
use dashboard_engine::config::DashboardSettings;
use dashboard_engine::data::{csv_export::write_table, FileSheetSource};
use dashboard_engine::error::EngineError;
use dashboard_engine::services::DashboardService;
use serde::Serialize;
use shared::models::{CalendarDate, Period};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dashboard", about = "Builds dashboard views from exported sales sheets")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Main dashboard: KPIs, payments, series and top lists
    Dashboard(ViewArgs),
    /// Daily revenue report
    Revenue(ViewArgs),
    /// Customer ranking, inactivity and histograms
    Customers(ViewArgs),
    /// Product ranking and categories
    Products(ViewArgs),
}

#[derive(clap::Args, Debug)]
struct ViewArgs {
    /// First day of the period (DD/MM/YYYY)
    #[arg(long)]
    from: String,
    /// Last day of the period (DD/MM/YYYY)
    #[arg(long)]
    to: String,
    /// JSON settings file; DASHBOARD_CONFIG is used when absent
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory holding <sheet id>.csv files
    #[arg(long)]
    source_dir: Option<PathBuf>,
    /// Pretend today is this day (DD/MM/YYYY)
    #[arg(long)]
    today: Option<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum OutputFormat {
    Json,
    Csv,
}

fn parse_day(raw: &str, what: &str) -> Result<CalendarDate, EngineError> {
    raw.parse::<CalendarDate>()
        .map_err(|e| EngineError::InvalidPeriod(format!("{}: {}", what, e)))
}

fn parse_period(args: &ViewArgs) -> Result<Period, EngineError> {
    let start = parse_day(&args.from, "--from")?;
    let end = parse_day(&args.to, "--to")?;
    if start.day_number() > end.day_number() {
        return Err(EngineError::InvalidPeriod(format!("{} is after {}", start, end)));
    }
    Ok(Period::new(start, end))
}

fn load_settings(args: &ViewArgs) -> anyhow::Result<DashboardSettings> {
    let mut settings = match &args.config {
        Some(path) => DashboardSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?
            .with_env_overrides(|key| std::env::var(key).ok()),
        None => DashboardSettings::from_env_or_default().context("loading settings")?,
    };
    if let Some(dir) = &args.source_dir {
        settings.source_dir = dir.clone();
    }
    Ok(settings)
}

fn emit<T: Serialize, R: Serialize>(view: &T, table: &[R], format: OutputFormat) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, view)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => write_table(&mut out, table)?,
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays clean for the view output.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let args = match &cli.command {
        Command::Dashboard(a) | Command::Revenue(a) | Command::Customers(a) | Command::Products(a) => a,
    };

    let period = parse_period(args)?;
    let settings = load_settings(args)?;
    info!(source_dir = %settings.source_dir.display(), "Starting dashboard engine");

    let source = Arc::new(FileSheetSource::new(settings.source_dir.clone()));
    let mut service = DashboardService::new(source, settings);
    if let Some(raw) = &args.today {
        service = service.with_clock(Arc::new(FixedClock(parse_day(raw, "--today")?)));
    }

    match &cli.command {
        Command::Dashboard(_) => {
            let view = service.get_dashboard(period).await.context("building dashboard")?;
            emit(&view, &view.top_products, args.format)
        }
        Command::Revenue(_) => {
            let report = service.get_revenue_report(period).await.context("building revenue report")?;
            emit(&report, &report.days, args.format)
        }
        Command::Customers(_) => {
            let view = service.get_customers(period).await.context("building customer view")?;
            emit(&view, &view.ranking, args.format)
        }
        Command::Products(_) => {
            let view = service.get_products(period).await.context("building product view")?;
            emit(&view, &view.ranking, args.format)
        }
    }
}
