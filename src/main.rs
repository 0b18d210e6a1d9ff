//! donorflat - Donor survey profile flattener
//!
//! A CLI tool that reads a batch of donor profiles, flattens each into a
//! fixed record with a derived age and a question-and-answer summary, and
//! writes the records as JSON.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (unreadable or malformed input, unwritable output, config error)

mod analysis;
mod cli;
mod config;
mod error;
mod fields;
mod models;
mod pipeline;
mod profiles;
mod transform;

use analysis::BatchSummary;
use anyhow::{Context, Result};
use chrono::Local;
use cli::Args;
use config::{Config, CONFIG_FILE};
use indicatif::{ProgressBar, ProgressStyle};
use pipeline::BatchPlan;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use transform::TransformOptions;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    info!("donorflat v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run_conversion(&args) {
        error!("Conversion failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .donorflat.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE);
    println!("   Edit it to change the input/output paths or the missing-photo policy.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete conversion workflow.
fn run_conversion(args: &Args) -> Result<()> {
    let mut config = load_config(args)?;
    config.merge_with_args(args);
    config.validate()?;

    let today = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    info!("Processing date: {}", today);

    let plan = BatchPlan {
        input: PathBuf::from(&config.general.input),
        output: PathBuf::from(&config.general.output),
        options: TransformOptions {
            today,
            missing_photo: config.transform.missing_photo,
        },
        pretty: config.output.pretty,
        dry_run: args.dry_run,
    };

    println!("📥 Reading donor profiles: {}", plan.input.display());

    let progress = progress_bar(args.quiet);
    let summary = pipeline::run_batch(&plan, &progress)?;

    print_summary(&summary);

    if plan.dry_run {
        println!("\n✅ Dry run complete. No output was written.");
    } else {
        println!(
            "\n✅ Cleaned donor profiles written to {}",
            plan.output.display()
        );
    }

    Ok(())
}

/// Progress bar over the donor records; hidden in quiet mode.
fn progress_bar(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(0);
    match ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} donors")
    {
        Ok(style) => pb.set_style(style.progress_chars("#>-")),
        Err(e) => debug!("Falling back to default progress style: {}", e),
    }
    pb
}

fn print_summary(summary: &BatchSummary) {
    println!("\n📊 Conversion Summary:");
    println!("   Donors: {}", summary.total);
    println!(
        "   With photo: {} | With bio: {} | With summary answers: {}",
        summary.with_photo, summary.with_bio, summary.with_answers
    );
    if summary.unparsed_birth_dates > 0 {
        println!(
            "   ⚠️  Unparseable dates of birth: {} (age computed from 0001-01-01)",
            summary.unparsed_birth_dates
        );
    }

    let never = summary.never_answered();
    if !never.is_empty() {
        debug!("Fields no donor answered: {}", never.join(", "));
    }
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}
