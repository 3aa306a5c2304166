use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

use fraudwatch::backend::{factory, ListResource, MonitoringBackend, ReportKind, ReportRequest};
use fraudwatch::config::Config;
use fraudwatch::constants::NOTICE_NO_DATA_TO_EXPORT;
use fraudwatch::export::{self, ExportError, GridExporter};
use fraudwatch::list::FetchOutcome;
use fraudwatch::logger::Logger;
use fraudwatch::utils::datetime;
use fraudwatch::{pages, ui};

/// Terminal dashboard for the fraud-monitoring API
#[derive(Debug, Parser)]
#[command(name = "fraudwatch", version, about)]
struct Cli {
    /// Configuration file (defaults to ./fraudwatch.toml, then the user config directory)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write a default configuration file and exit
    #[arg(long)]
    init_config: bool,

    /// Export one page of a view to CSV without starting the UI
    #[arg(long, value_name = "VIEW", value_parser = parse_view)]
    export: Option<ListResource>,

    /// Page to export with --export
    #[arg(long, default_value_t = 1, requires = "export")]
    page: u32,

    /// Generate a CD01 report and save it without starting the UI
    #[arg(long, value_name = "TYPE", value_parser = parse_report_kind, conflicts_with = "export")]
    report: Option<ReportKind>,

    /// First day of the report (YYYY-MM-DD; defaults to 30 days before --to)
    #[arg(long, value_name = "DATE", value_parser = parse_day, requires = "report")]
    from: Option<NaiveDate>,

    /// Last day of the report (YYYY-MM-DD; defaults to today)
    #[arg(long, value_name = "DATE", value_parser = parse_day, requires = "report")]
    to: Option<NaiveDate>,
}

fn parse_view(name: &str) -> Result<ListResource, String> {
    ListResource::from_name(name).ok_or_else(|| {
        let views: Vec<&str> = ListResource::ALL.iter().map(|r| r.path()).collect();
        format!("unknown view '{}' (expected one of: {})", name, views.join(", "))
    })
}

fn parse_report_kind(code: &str) -> Result<ReportKind, String> {
    ReportKind::from_code(code).ok_or_else(|| {
        let kinds: Vec<&str> = ReportKind::ALL.iter().map(|k| k.code()).collect();
        format!("unknown report '{}' (expected one of: {})", code, kinds.join(", "))
    })
}

fn parse_day(value: &str) -> Result<NaiveDate, String> {
    datetime::parse_date(value).map_err(|e| format!("'{}' is not a YYYY-MM-DD date: {}", value, e))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.init_config {
        let path = match cli.config {
            Some(path) => path,
            None => Config::get_default_config_path()?,
        };
        return Config::generate_default_config(&path);
    }

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };

    let logger = Logger::from_config(config.logging.enabled)?;
    let headless = cli.export.is_some() || cli.report.is_some();
    let level = if headless { LevelFilter::Warn } else { LevelFilter::Debug };
    logger.install(level)?;

    let backend = factory::create_backend(&config.api)?;

    if let Some(kind) = cli.report {
        return report_headless(&config, backend.as_ref(), kind, cli.from, cli.to).await;
    }
    match cli.export {
        Some(resource) => export_headless(&config, backend.as_ref(), resource, cli.page).await,
        None => ui::run_app(config, backend, logger).await,
    }
}

/// Ask the server for a CD01 report and save it verbatim
async fn report_headless(
    config: &Config,
    backend: &dyn MonitoringBackend,
    kind: ReportKind,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<()> {
    let end = to.unwrap_or_else(datetime::export_date);
    let start = from.unwrap_or_else(|| {
        end.checked_sub_days(Days::new(pages::reports::DEFAULT_RANGE_DAYS))
            .unwrap_or(end)
    });
    let request = ReportRequest::new(kind, start, end)?;

    let bytes = backend
        .generate_report(&request)
        .await
        .with_context(|| format!("Failed to generate the {} report", kind))?;
    let path = export::write_file(&bytes, &request.file_name(), &config.export.directory)
        .context("Failed to save the report")?;
    println!("{}", path.display());
    Ok(())
}

/// Fetch one page and write it through the grid's export pipeline
async fn export_headless(
    config: &Config,
    backend: &dyn MonitoringBackend,
    resource: ListResource,
    page_number: u32,
) -> Result<()> {
    let page = pages::definition(resource);
    let mut controller = page.controller(config.grid.per_page);

    let mut outcome = controller.load(backend).await;
    if page_number > 1 && matches!(outcome, FetchOutcome::Applied { .. }) {
        let ticket = controller
            .go_to_page(page_number)
            .with_context(|| format!("Page {} is out of range (1-{})", page_number, controller.total_pages()))?;
        outcome = controller.run(backend, ticket).await;
    }
    if let FetchOutcome::Failed(message) = outcome {
        anyhow::bail!(message);
    }

    let exporter = GridExporter::new(config.export.directory.clone());
    match exporter.export(Some(controller.rows()), &page.columns, page.export_name) {
        Ok(path) => {
            println!("{}", path.display());
            Ok(())
        }
        Err(ExportError::NoData) => {
            eprintln!("{}", NOTICE_NO_DATA_TO_EXPORT);
            Ok(())
        }
        Err(e) => Err(e).context("Export failed"),
    }
}
