//! Tradelog CLI — operator commands for the trade journal.
//!
//! Commands:
//! - `init` — create the journal file with its header if it is missing
//! - `summary` — print total PnL, trade count and win rate (read-only)
//! - `hash-secret` — produce a salted digest and the `[access]` config block

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::{info, warn};

use tradelog_core::gate::salted_digest;
use tradelog_core::{Config, DashboardView, Summary, TradeStore};

const SALT_LEN: usize = 16;

#[derive(Parser)]
#[command(name = "tradelog", version, about = "Tradelog CLI — trade journal maintenance")]
struct Cli {
    /// Config file (defaults to ./tradelog.toml when present).
    #[arg(long, global = true, env = "TRADELOG_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the journal file with its header row if it does not exist.
    Init,
    /// Print the dashboard metrics for the journal.
    Summary {
        /// Emit JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Hash a secret for the `[access]` section. Reads stdin when no secret is given.
    HashSecret {
        secret: Option<String>,

        /// Salt to use. Defaults to a random one.
        #[arg(long)]
        salt: Option<String>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        // Needs no journal, so a broken config does not block it.
        Commands::HashSecret { secret, salt } => run_hash_secret(secret, salt),
        Commands::Init => {
            let config = load_config(cli.config)?;
            run_init(&config.store())
        }
        Commands::Summary { json } => {
            let config = load_config(cli.config)?;
            run_summary(&config.store(), &config.journal.currency, json)
        }
    }
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config = Config::resolve(path.as_deref()).context("loading configuration")?;
    config.logging.init().context("initializing logging")?;
    if config.uses_default_secret() {
        warn!("journal is protected by the built-in default secret");
    }
    Ok(config)
}

fn run_hash_secret(secret: Option<String>, salt: Option<String>) -> Result<()> {
    let secret = match secret {
        Some(secret) => secret,
        None => read_secret_line(io::stdin().lock())?,
    };
    let salt = salt.unwrap_or_else(random_salt);
    print!("{}", access_snippet(&salt, &secret)?);
    Ok(())
}

fn run_init(store: &TradeStore) -> Result<()> {
    let created = store
        .ensure_initialized()
        .with_context(|| format!("initializing {}", store.path().display()))?;
    if created {
        println!("Created {}", store.path().display());
    } else {
        println!("{} already exists", store.path().display());
    }
    Ok(())
}

fn run_summary(store: &TradeStore, currency: &str, json: bool) -> Result<()> {
    // Read-only: a missing journal is reported as empty, not created.
    let records = if store.path().exists() {
        store
            .read_all()
            .with_context(|| format!("reading {}", store.path().display()))?
    } else {
        info!(path = %store.path().display(), "journal not found, reporting empty");
        Vec::new()
    };

    let summary = Summary::from_records(&records)
        .with_context(|| format!("summarizing {}", store.path().display()))?;
    let mut out = io::stdout().lock();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
    } else {
        write!(out, "{}", render_summary(&summary, currency))?;
    }
    Ok(())
}

fn render_summary(summary: &Summary, currency: &str) -> String {
    if summary.total_trades == 0 {
        return format!("{}\n", DashboardView::EMPTY_MESSAGE);
    }
    format!(
        "Total PnL:    {}\nTotal Trades: {}\nWin Rate:     {}\n",
        summary.total_pnl_display(currency),
        summary.total_trades,
        summary.win_rate_display()
    )
}

fn read_secret_line(reader: impl BufRead) -> Result<String> {
    let line = reader
        .lines()
        .next()
        .transpose()
        .context("reading secret from stdin")?
        .unwrap_or_default();
    let secret = line.trim_end_matches(['\r', '\n']).to_string();
    if secret.is_empty() {
        bail!("no secret given");
    }
    Ok(secret)
}

fn random_salt() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SALT_LEN)
        .map(char::from)
        .collect()
}

fn access_snippet(salt: &str, secret: &str) -> Result<String> {
    if secret.is_empty() {
        bail!("no secret given");
    }
    if salt.contains(['"', '\\']) {
        bail!("salt must not contain quotes or backslashes");
    }
    let digest = salted_digest(salt, secret);
    Ok(format!(
        "[access]\nsecret_hash = \"{}\"\nsalt = \"{}\"\n",
        digest.to_hex(),
        salt
    ))
}
