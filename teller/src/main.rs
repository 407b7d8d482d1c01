//! Tellerbook Teller
//!
//! Opens the account directory, authenticates one account and applies
//! deposit/withdraw requests against it.

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tellerbook_ledger::{FileStore, StoreConfig};

mod bootstrap;
mod session;

use session::{Operation, Summary};

/// Tellerbook teller CLI
#[derive(Parser, Debug)]
#[command(name = "teller")]
#[command(about = "Authenticate an account and record deposits or withdrawals")]
struct Args {
    /// Account number to open
    #[arg(short, long, default_value = bootstrap::DEMO_ACCOUNT_NUMBER)]
    account: String,

    /// PIN for the account
    #[arg(short, long, default_value = bootstrap::DEMO_PIN)]
    pin: String,

    /// Operations to apply in order, e.g. `deposit=500 withdraw=200`
    operations: Vec<Operation>,

    /// Number of recent ledger records and log lines to show
    #[arg(long, default_value = "5")]
    recent: usize,

    /// Accounts file (overrides TELLERBOOK_ACCOUNTS_FILE)
    #[arg(long)]
    accounts_file: Option<PathBuf>,

    /// Transactions file (overrides TELLERBOOK_TRANSACTIONS_FILE)
    #[arg(long)]
    transactions_file: Option<PathBuf>,

    /// Print the session summary as JSON
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
    );

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.json_logs);

    info!("Starting Tellerbook teller");

    // Load configuration
    let mut config = StoreConfig::from_env();
    if let Some(path) = args.accounts_file {
        config.accounts_path = path;
    }
    if let Some(path) = args.transactions_file {
        config.transactions_path = path;
    }
    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return Err(anyhow::anyhow!("Configuration error: {}", e));
    }

    let store = FileStore::new(config);
    let mut directory = bootstrap::load_directory(&store)?;

    let history = store.load_transaction_lines().unwrap_or_else(|e| {
        warn!(error = %e, "Could not read transaction log");
        Vec::new()
    });

    info!(
        accounts = directory.len(),
        log_lines = history.len(),
        "Directory ready"
    );

    let Some(account) = directory.search_mut(&args.account, &args.pin) else {
        error!("Authentication failed");
        anyhow::bail!("account not found or PIN incorrect");
    };

    let outcomes = session::apply_all(account, &args.operations, &store);
    let summary = Summary::new(account, &history, args.recent, outcomes);

    match directory.save_all(&store) {
        Ok(saved) => info!(accounts = saved, "Directory saved"),
        Err(e) => warn!(error = %e, "Directory not saved, session state kept in memory only"),
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", summary);
    }

    Ok(())
}
