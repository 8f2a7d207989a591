use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use receipt_points::output::{self, ScoredReceipt};
use receipt_points::receipt::Receipt;
use receipt_points::scoring::{calculate_points, validate_receipt, PointsResult};
use receipt_points::server::{self, AppState};
use receipt_points::ReceiptService;

const EXIT_SUCCESS: i32 = 0;
const EXIT_SERVER: i32 = 1;
const EXIT_REJECTED: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP service (default if no subcommand)
    Serve,
    /// Score receipt JSON files and print the per-rule breakdown
    Score {
        /// Receipt files or glob patterns (e.g. "receipts/*.json")
        #[arg(required = true)]
        patterns: Vec<String>,

        /// Print "points<TAB>file" lines instead of the breakdown
        #[arg(long)]
        tsv: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "receipt-points")]
#[command(about = "Receipt loyalty points service", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/receipt-points/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Serve);

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let mut config = match receipt_points::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    if let Err(e) = config.apply_env_overrides() {
        eprintln!("Config error: {:#}", e);
        std::process::exit(EXIT_CONFIG);
    }

    // Validate config at startup
    if let Err(errors) = receipt_points::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let level = if cli.verbose { "debug" } else { config.log_level.as_str() };
    receipt_points::config::init_tracing(level);

    match command {
        Commands::Serve => {
            let state = AppState::new(ReceiptService::default());
            if let Err(e) = server::serve(&config.server, state).await {
                let message = format!("{:#}", e);
                tracing::error!(error = %message, "server failed");
                std::process::exit(EXIT_SERVER);
            }
        }
        Commands::Score { patterns, tsv } => {
            let code = score_files(&patterns, tsv);
            std::process::exit(code);
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Score every file matched by `patterns`. Rejected files are reported and
/// turn the exit code non-zero, but do not stop the remaining files.
fn score_files(patterns: &[String], tsv: bool) -> i32 {
    let use_colors = output::should_use_colors();
    let mut scored: Vec<(String, PointsResult)> = Vec::new();
    let mut any_rejected = false;

    for path in expand_patterns(patterns) {
        let source = path.display().to_string();
        match load_receipt(&path).and_then(|r| validate_receipt(r).map_err(Into::into)) {
            Ok(receipt) => {
                let result = calculate_points(&receipt);
                scored.push((source, result));
            }
            Err(e) => {
                any_rejected = true;
                eprintln!(
                    "{}",
                    output::format_rejection(&source, &format!("{:#}", e), use_colors)
                );
            }
        }
    }

    let refs: Vec<ScoredReceipt> = scored
        .iter()
        .map(|(source, result)| ScoredReceipt { source, result })
        .collect();

    if tsv {
        if !refs.is_empty() {
            println!("{}", output::format_tsv(&refs));
        }
    } else {
        for scored in &refs {
            println!("{}", output::format_breakdown(scored, use_colors));
        }
    }

    if any_rejected {
        EXIT_REJECTED
    } else {
        EXIT_SUCCESS
    }
}

/// Expand glob patterns; a pattern matching nothing is kept as a literal path
/// so the missing file is reported when it is loaded.
fn expand_patterns(patterns: &[String]) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for pattern in patterns {
        let matches: Vec<PathBuf> = match glob::glob(pattern) {
            Ok(entries) => entries.filter_map(|entry| entry.ok()).collect(),
            Err(_) => Vec::new(),
        };
        if matches.is_empty() {
            paths.push(PathBuf::from(pattern));
        } else {
            paths.extend(matches);
        }
    }
    paths
}

fn load_receipt(path: &Path) -> Result<Receipt> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).context("malformed receipt payload")
}
