//! Error types for tellerbook operations.

use crate::AccountNumber;
use thiserror::Error;

/// Main error type for directory, ledger and persistence operations.
#[derive(Error, Debug)]
pub enum TellerError {
    /// Non-positive or unparseable amount.
    #[error("Invalid amount: {amount}")]
    InvalidAmount { amount: String },

    /// Withdrawal larger than the current balance.
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds { required: String, available: String },

    /// No account matched both the account number and the PIN.
    #[error("Account not found or PIN incorrect")]
    NotFound,

    /// Insert with an account number already present in the directory.
    #[error("Duplicate account number: {0}")]
    DuplicateKey(AccountNumber),

    /// Account fields that cannot be stored in the accounts file.
    #[error("Invalid account {account_number}: {reason}")]
    InvalidAccount {
        account_number: String,
        reason: String,
    },

    /// A line of a flat file could not be parsed.
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// Underlying file I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl TellerError {
    /// Check if the caller can report this and carry on with the session.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TellerError::InvalidAmount { .. }
                | TellerError::InsufficientFunds { .. }
                | TellerError::NotFound
                | TellerError::DuplicateKey(_)
                | TellerError::InvalidAccount { .. }
        )
    }

    /// Get a stable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            TellerError::InvalidAmount { .. } => "INVALID_AMOUNT",
            TellerError::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            TellerError::NotFound => "NOT_FOUND",
            TellerError::DuplicateKey(_) => "DUPLICATE_KEY",
            TellerError::InvalidAccount { .. } => "INVALID_ACCOUNT",
            TellerError::MalformedRecord { .. } => "MALFORMED_RECORD",
            TellerError::Io(_) => "IO_ERROR",
            TellerError::ConfigurationError(_) => "CONFIGURATION_ERROR",
        }
    }
}

/// Result type alias for tellerbook operations.
pub type Result<T> = std::result::Result<T, TellerError>;
