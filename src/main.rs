//! todo-rollup - cross-project todo summary
//!
//! Scans every project in the selected workspace orgs for markdown todos
//! and prints what needs attention.
//!
//! Exit codes:
//!   0 - Success (including "nothing pending")
//!   1 - Unknown org, bad arguments, or no orgs for --list-orgs

mod cli;

use anyhow::{Context, Result};
use cli::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use todo_rollup::config::ConfigSource;
use todo_rollup::models::total_items;
use todo_rollup::{Formatter, TodoAggregator, WorkspaceConfig};
use tracing::{debug, error};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    init_logging(&args)?;
    debug!("Arguments: {:?}", args);

    match run(args) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            error!("Run failed: {:#}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Logs go to stderr so hook and JSON consumers get a clean stdout.
/// `RUST_LOG` overrides the level picked from the flags.
fn init_logging(args: &Args) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level().as_str()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

/// Aggregate and print. Returns the exit code.
fn run(args: Args) -> Result<i32> {
    let paths = args.paths();
    debug!("Config file: {}", paths.config_file.display());
    debug!("Cache file: {}", paths.cache_file.display());

    let aggregator = TodoAggregator::from_paths(&paths);

    if args.list_orgs {
        return Ok(list_orgs(aggregator.config(), &paths.config_file));
    }

    let format = args.output_format();
    let formatter = Formatter::from_name(format.name(), args.verbose)?;

    let spinner = (format.is_interactive() && !args.quiet).then(scan_spinner);
    let result = aggregator.aggregate(&args.scope(), !args.no_cache);
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let data = match result {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error: {}", e);
            list_org_names(aggregator.config());
            return Ok(1);
        }
    };

    if total_items(&data) == 0 && format.is_interactive() {
        println!("No pending todos found.");
        return Ok(0);
    }

    let output = formatter
        .render(&data)
        .context("Failed to render todo report")?;
    if !output.is_empty() {
        println!("{}", output);
    }

    Ok(0)
}

fn scan_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("Scanning projects...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Print the resolved orgs. Returns 1 when there are none.
fn list_orgs(config: &WorkspaceConfig, config_file: &std::path::Path) -> i32 {
    match config.source {
        ConfigSource::File(ref path) => println!("Config: {}", path.display()),
        ConfigSource::AutoDiscovered => println!("Config: auto-discovered"),
    }
    println!("Workspace: {}", config.workspace.display());
    if let Some(ref warning) = config.warning {
        println!("Warning: {}", warning);
    }

    if config.orgs.is_empty() {
        println!();
        println!("No orgs configured.");
        println!(
            "Create {} or add org directories under {}",
            config_file.display(),
            config.workspace.display()
        );
        return 1;
    }

    println!();
    println!("Configured orgs:");
    for org in &config.orgs {
        let mut line = format!("  {}: {}", org.name, org.path.display());
        if org.default {
            line.push_str(" (default)");
        }
        if org.sensitive {
            line.push_str(" [sensitive]");
        }
        println!("{}", line);
    }

    0
}

fn list_org_names(config: &WorkspaceConfig) {
    if config.orgs.is_empty() {
        return;
    }
    let names: Vec<&str> = config.orgs.iter().map(|o| o.name.as_str()).collect();
    eprintln!("Available orgs: {}", names.join(", "));
}
