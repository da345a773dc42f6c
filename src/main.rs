use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use leaf_import::{
    load_export, HttpTargetClient, MemoryTargetClient, MigrationConfig, MigrationReport,
    Orchestrator, SourceCatalog, TargetClient, DEFAULT_API_KEY, DEFAULT_BASE_URL,
    DEFAULT_QUERY_LIMIT,
};

/// Migrate a Leaf site export into an Automation POS system
#[derive(Parser, Debug)]
#[command(name = "leaf-import")]
#[command(version)]
struct Args {
    /// Leaf site export (JSON)
    source: PathBuf,

    /// Automation API root
    #[arg(long, default_value = DEFAULT_BASE_URL, env = "LEAF_IMPORT_URL")]
    base_url: String,

    /// Value sent in the pos-server-apikey header
    #[arg(long, default_value = DEFAULT_API_KEY, env = "LEAF_IMPORT_API_KEY")]
    api_key: String,

    /// Result-set limit for lookup queries
    #[arg(long, default_value_t = DEFAULT_QUERY_LIMIT, env = "LEAF_IMPORT_QUERY_LIMIT")]
    query_limit: usize,

    /// Run against an in-memory target; nothing is sent to the API
    #[arg(long)]
    dry_run: bool,

    /// Also write the report as JSON to this path
    #[arg(long)]
    report_json: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = MigrationConfig::new(&args.source)
        .with_target(args.base_url, args.api_key)
        .with_query_limit(args.query_limit)
        .with_dry_run(args.dry_run)
        .with_report_json(args.report_json);

    if let Err(e) = config.validate() {
        eprintln!("❌ {}", e);
        eprintln!("   Usage: leaf-import <SOURCE> [--base-url URL] [--api-key KEY] [--dry-run]");
        return Ok(ExitCode::from(2));
    }

    println!("📂 Loading {}...", config.source_path.display());
    let source = load_export(&config.source_path)
        .with_context(|| format!("Failed to load {}", config.source_path.display()))?;

    if config.dry_run {
        println!("🧪 Dry run against an in-memory target");
        let target = MemoryTargetClient::with_defaults();
        migrate(&config, &target, &source)
    } else {
        println!("🔗 Target: {}", config.base_url);
        let target = HttpTargetClient::new(&config.base_url, &config.api_key)
            .context("Failed to build target API client")?;
        migrate(&config, &target, &source)
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "leaf_import=debug" } else { "leaf_import=info" };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn migrate<C: TargetClient>(
    config: &MigrationConfig,
    target: &C,
    source: &SourceCatalog,
) -> Result<ExitCode> {
    let orchestrator = Orchestrator::new(target, config.query_limit);

    match orchestrator.run(source) {
        Ok(report) => {
            print_report(&report);
            write_report(config, &report)?;
            println!("✅ {}", report.summary());
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            print_report(&failure.report);
            write_report(config, &failure.report)?;
            eprintln!("❌ {}", failure.error.format_detailed());
            eprintln!("   Aborted during the {} stage", failure.stage);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_report(report: &MigrationReport) {
    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    print!("{}", report.render());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}

fn write_report(config: &MigrationConfig, report: &MigrationReport) -> Result<()> {
    let Some(path) = &config.report_json else {
        return Ok(());
    };

    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("📝 Report written to {}", path.display());

    Ok(())
}
