//! CodeGuard CLI
//!
//! # Usage
//!
//! ```bash
//! # Analyze files, record history, print alerts
//! codeguard analyze app/main.py app/util.py
//!
//! # Same, JSON output and a report file
//! codeguard analyze app/*.py --json --report
//!
//! # Issue-count history of one file
//! codeguard history app/main.py
//!
//! # Statistics without recording history
//! codeguard summary app/*.py --trend
//! ```

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use codeguard_analyzer::config::Validatable;
use codeguard_analyzer::pipeline::{render_lines, write_report};
use codeguard_analyzer::{
    open_history_store, AnalysisOrchestrator, AnalysisSummary, CodeguardConfig, FileReport,
    HistoryBackend, RuleEngine, TrendSeries,
};

#[derive(Parser)]
#[command(name = "codeguard")]
#[command(about = "CodeGuard - Python source linter with issue history", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze files and record their issue counts
    Analyze {
        /// Python files to analyze
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        settings: SettingsArgs,

        /// Print reports as JSON
        #[arg(long)]
        json: bool,

        /// Write a text report into the configured report directory
        #[arg(long)]
        report: bool,

        /// Write a text report into this directory
        #[arg(long)]
        report_dir: Option<PathBuf>,
    },

    /// Show the recorded issue counts of one file
    History {
        /// File identifier as passed to `analyze`
        file_id: String,

        #[command(flatten)]
        settings: SettingsArgs,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize issues without recording history
    Summary {
        /// Files to summarize; non-Python files are skipped
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        settings: SettingsArgs,

        /// Include recorded issue trends
        #[arg(long)]
        trend: bool,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct SettingsArgs {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// History document or database path
    #[arg(long)]
    history: Option<PathBuf>,

    /// History backend (json, sqlite, memory)
    #[arg(long)]
    backend: Option<HistoryBackend>,
}

impl SettingsArgs {
    /// File or defaults, then environment, then flags
    fn load(&self) -> Result<CodeguardConfig, Box<dyn Error>> {
        let config = match &self.config {
            Some(path) => CodeguardConfig::from_yaml(path)?,
            None => CodeguardConfig::default(),
        };
        let mut config = config.with_env_overrides()?;

        if let Some(backend) = self.backend {
            config.history.backend = backend;
        }
        if let Some(path) = &self.history {
            config.history.path = path.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    init_tracing()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            files,
            settings,
            json,
            report,
            report_dir,
        } => {
            let config = settings.load()?;
            let dir = report_dir.or_else(|| report.then(|| config.report.resolved_dir()));
            analyze(&config, &files, json, dir)
        }
        Commands::History {
            file_id,
            settings,
            json,
        } => {
            show_history(&settings.load()?, &file_id, json)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Summary {
            files,
            settings,
            trend,
            json,
        } => {
            summarize(&settings.load()?, &files, trend, json)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_tracing() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("codeguard=info".parse()?))
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// Read every path; unreadable files become error reports at their position
fn read_sources(paths: &[PathBuf]) -> Vec<Result<(String, String), FileReport>> {
    paths
        .iter()
        .map(|path| {
            let file_id = path.to_string_lossy().into_owned();
            fs::read_to_string(path)
                .map(|source| (file_id.clone(), source))
                .map_err(|err| {
                    warn!(file_id = file_id.as_str(), error = %err, "cannot read file");
                    FileReport::error(file_id, format!("cannot read file: {}", err))
                })
        })
        .collect()
}

fn analyze(
    config: &CodeguardConfig,
    paths: &[PathBuf],
    json: bool,
    report_dir: Option<PathBuf>,
) -> Result<ExitCode, Box<dyn Error>> {
    let orchestrator = AnalysisOrchestrator::from_config(config)?;

    let sources = read_sources(paths);
    let readable: Vec<(String, String)> = sources
        .iter()
        .filter_map(|source| source.as_ref().ok().cloned())
        .collect();
    let mut analyzed = orchestrator.analyze_batch(&readable).into_iter();

    let reports: Vec<FileReport> = sources
        .into_iter()
        .filter_map(|source| match source {
            Ok(_) => analyzed.next(),
            Err(unreadable) => Some(unreadable),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for line in render_lines(&reports) {
            println!("{}", line);
        }
    }

    if let Some(dir) = report_dir {
        let path = write_report(&dir, &reports)?;
        eprintln!("report: {}", path.display());
    }

    let failed = reports.iter().any(FileReport::is_error);
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn show_history(config: &CodeguardConfig, file_id: &str, json: bool) -> Result<(), Box<dyn Error>> {
    let store = open_history_store(&config.history)?;
    let records = store.query(file_id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else if records.is_empty() {
        println!("No history data for {}", file_id);
    } else {
        for record in records {
            println!(
                "{}  {}",
                codeguard_storage::format_timestamp(&record.timestamp),
                record.issue_count
            );
        }
    }
    Ok(())
}

fn summarize(
    config: &CodeguardConfig,
    paths: &[PathBuf],
    trend: bool,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let engine = RuleEngine::new(config.rules.clone());
    let files: Vec<(String, String)> = read_sources(paths).into_iter().flatten().collect();
    let summary = AnalysisSummary::from_sources(&engine, &files);

    let trends = if trend {
        let store = open_history_store(&config.history)?;
        let ids: Vec<&str> = files.iter().map(|(file_id, _)| file_id.as_str()).collect();
        TrendSeries::collect(store.as_ref(), &ids)?
    } else {
        Vec::new()
    };

    if json {
        let value = serde_json::json!({ "summary": summary, "trends": trends });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Issues by kind:");
    for (kind, count) in &summary.issues_by_kind {
        println!("  {:<20} {}", kind.as_str(), count);
    }
    println!("Issues by file:");
    for entry in &summary.issues_by_file {
        println!("  {:<40} {}", entry.file, entry.issues);
    }
    if !summary.long_functions.is_empty() {
        println!("Long functions:");
        for func in &summary.long_functions {
            println!("  {}:{} {} lines", func.file, func.function_name, func.line_count);
        }
    }
    for file in &summary.failed_files {
        println!("Failed: {}", file);
    }
    if trend {
        if trends.is_empty() {
            println!("No history data");
        }
        for series in &trends {
            println!("Trend {}:", series.file);
            for point in &series.points {
                println!("  {}  {}", point.timestamp.to_rfc3339(), point.issues);
            }
        }
    }
    Ok(())
}
