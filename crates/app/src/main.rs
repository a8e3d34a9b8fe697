use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use memolabel_core::{LabelConfig, LedgerTransaction};
use memolabel_import::{parse_labels_json, MatchEngine, MatchSummary};
use memolabel_sync::{plan_updates, UpdateLog};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "memolabel", version, about = "Match purchase labels to ledger transactions")]
struct Cli {
    /// TOML file overriding memo limits, separator and prefix
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Match labels to transactions and print the memo updates as JSON
    Plan {
        /// JSON array of tagged label records (_type = amazon | target | ynab)
        #[arg(long)]
        labels: PathBuf,

        /// JSON array of ledger transactions
        #[arg(long)]
        transactions: PathBuf,

        /// Text placed between the separator and the label
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Print the memo writes that revert a recorded update log
    Undo {
        #[arg(long)]
        log: PathBuf,
    },
}

#[derive(Serialize)]
struct PlanOutput {
    summary: MatchSummary,
    updates: Vec<memolabel_sync::PlannedUpdate>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Plan {
            labels,
            transactions,
            prefix,
        } => {
            let config = match prefix {
                Some(prefix) => config.with_prefix(prefix),
                None => config,
            };
            let labels = parse_labels_json(&read(&labels)?)
                .with_context(|| format!("parse labels {}", labels.display()))?;
            let transactions: Vec<LedgerTransaction> = serde_json::from_str(&read(&transactions)?)
                .with_context(|| format!("parse transactions {}", transactions.display()))?;
            tracing::info!(
                labels = labels.len(),
                transactions = transactions.len(),
                "matching"
            );

            let matches = MatchEngine::from_config(&config).match_labels(&labels, &transactions);
            let updates = plan_updates(&matches, &config).context("compose memos")?;
            let output = PlanOutput {
                summary: MatchSummary::from_matches(&matches),
                updates,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Undo { log } => {
            let log = UpdateLog::from_json(&read(&log)?)
                .with_context(|| format!("parse update log {}", log.display()))?;
            tracing::info!(entries = log.entries.len(), failed = log.failed(), "undoing");
            println!("{}", serde_json::to_string_pretty(&log.undo_requests())?);
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<LabelConfig> {
    let Some(path) = path else {
        return Ok(LabelConfig::default());
    };
    let s = read(path)?;
    LabelConfig::from_toml(&s).with_context(|| format!("parse config {}", path.display()))
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}
