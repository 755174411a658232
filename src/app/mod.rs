//! The CLI application around the core pipeline.
//!
//! The core never reads argv; everything the user decided is parsed here,
//! turned into an [`crate::config::AnalysisConfig`], and the result stream
//! is handed to one of the writers.

use std::fs::File;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::info;

use crate::analyzer::Analyzer;
use crate::app::console::{Console, ConsoleOpts};
use crate::app::output::{csv::CsvOptions, json::JsonOptions, OutputConfig, OutputType};
use crate::generator::VariantGenerator;
use crate::report::Report;
use crate::target::Target;
use crate::Error;

pub mod cli_parser;
pub mod config;
pub mod console;
pub mod logging;
pub mod output;

pub use config::AppConfig;

/// Process exit codes of the CLI.
///
/// `0` means no actionable finding, `1` covers usage errors and runs that
/// produced no candidates, and `2` flags at least one registered candidate
/// in an actionable trust bucket, so scripts can alert on the exit code
/// alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Ok,
    UsageError,
    NoVariants,
    SuspiciousFound,
    Failed,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Ok => 0,
            ExitStatus::UsageError => 1,
            ExitStatus::NoVariants => 1,
            ExitStatus::SuspiciousFound => 2,
            ExitStatus::Failed => 11,
        }
    }
}

pub async fn run() -> ExitStatus {
    let matches = match cli_parser::create_parser().try_get_matches() {
        Ok(matches) => matches,
        Err(err)
            if err.kind() == clap::error::ErrorKind::DisplayHelp
                || err.kind() == clap::error::ErrorKind::DisplayVersion =>
        {
            let _ = err.print();
            return ExitStatus::Ok;
        }
        Err(err) => {
            let _ = err.print();
            return ExitStatus::UsageError;
        }
    };

    let app_config = match AppConfig::try_from(&matches) {
        Ok(app_config) => app_config,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitStatus::UsageError;
        }
    };

    if app_config.no_color {
        output::styles::no_color_mode();
    }
    if let Err(err) = logging::Logging::new(app_config.verbosity).start() {
        eprintln!("error: failed to initialize logging: {}", err);
        return ExitStatus::Failed;
    }

    let console = Console::new(ConsoleOpts::from(&app_config));
    if app_config.list_techniques {
        console.print_techniques();
        return ExitStatus::Ok;
    }

    match run_analysis(&app_config, &console).await {
        Ok(status) => status,
        Err(err @ Error::InvalidTarget { .. }) => {
            console.error(err);
            ExitStatus::UsageError
        }
        Err(err) => {
            console.error(format!("analysis failed: {}", err));
            ExitStatus::Failed
        }
    }
}

async fn run_analysis(app_config: &AppConfig, console: &Console) -> crate::Result<ExitStatus> {
    let raw_target = app_config.target.as_deref().unwrap_or_default();
    let target = Target::parse(raw_target)?;
    let analysis = Arc::new(app_config.analysis_config());
    let started_at = Utc::now();

    console.print_run_header(&target, &analysis);

    let variants = VariantGenerator::new(&analysis, &target).generate();
    if variants.is_empty() {
        console.attention("the enabled techniques produced no candidates");
        return Ok(ExitStatus::NoVariants);
    }
    console.info(format!("Generated {} candidates.", variants.len()));

    let analyzed = if analysis.check_dns() || analysis.check_whois() {
        console.caption("Checking candidates against DNS and WHOIS.");
        let analyzer = Analyzer::new(analysis.clone());
        let run_start = Instant::now();
        let analyzed = analyzer.analyze_all(variants).await;
        console.info(format!(
            "Checked {} candidates in {}.",
            analyzed.len(),
            humantime::format_duration(Duration::from_secs(run_start.elapsed().as_secs()))
        ));
        analyzed
    } else {
        info!("DNS and WHOIS disabled; emitting candidates unanalyzed");
        variants
    };

    let report = Report::new(target.fqdn(), started_at, analyzed);
    write_report(app_config, console, &report)?;

    if report.has_suspicious() {
        Ok(ExitStatus::SuspiciousFound)
    } else {
        Ok(ExitStatus::Ok)
    }
}

fn write_report(app_config: &AppConfig, console: &Console, report: &Report) -> crate::Result<()> {
    let output_config = match app_config.output {
        OutputType::Summary => {
            console.print_report(report)?;
            console.finished();
            return Ok(());
        }
        OutputType::Json => OutputConfig::json(JsonOptions { pretty: true }),
        OutputType::Csv => OutputConfig::csv(CsvOptions {
            include_unregistered: app_config.include_unregistered,
        }),
    };

    match &app_config.output_file {
        Some(path) => {
            let mut file = File::create(path)?;
            output::output(&output_config, &mut file, report)?;
            console.info(format!("Report written to {}.", path.display()));
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            output::output(&output_config, &mut handle, report)?;
        }
    }
    console.finished();
    Ok(())
}
