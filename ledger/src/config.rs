//! Persistence configuration.

use std::path::PathBuf;

use tellerbook_common::{Result, TellerError};

/// Locations of the two flat files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Accounts snapshot, rewritten on every save.
    pub accounts_path: PathBuf,
    /// Append-only transaction log.
    pub transactions_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            accounts_path: PathBuf::from("users.txt"),
            transactions_path: PathBuf::from("transactions.txt"),
        }
    }
}

impl StoreConfig {
    /// Both files inside `dir`, with the default file names.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let defaults = Self::default();
        Self {
            accounts_path: dir.join(defaults.accounts_path),
            transactions_path: dir.join(defaults.transactions_path),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("TELLERBOOK_ACCOUNTS_FILE") {
            config.accounts_path = PathBuf::from(path);
        }

        if let Ok(path) = std::env::var("TELLERBOOK_TRANSACTIONS_FILE") {
            config.transactions_path = PathBuf::from(path);
        }

        config
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        if self.accounts_path.as_os_str().is_empty() {
            return Err(TellerError::ConfigurationError(
                "Accounts file path cannot be empty".to_string(),
            ));
        }

        if self.transactions_path.as_os_str().is_empty() {
            return Err(TellerError::ConfigurationError(
                "Transactions file path cannot be empty".to_string(),
            ));
        }

        if self.accounts_path == self.transactions_path {
            return Err(TellerError::ConfigurationError(
                "Accounts and transactions files must differ".to_string(),
            ));
        }

        Ok(())
    }
}
