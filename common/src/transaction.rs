//! Transaction kinds recorded against an account.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of balance movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Funds paid into the account.
    Deposit,
    /// Funds taken out of the account.
    Withdraw,
}

impl TransactionKind {
    /// Literal word used in the transactions file.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdraw => "Withdraw",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Deposit" => Ok(TransactionKind::Deposit),
            "Withdraw" => Ok(TransactionKind::Withdraw),
            other => Err(format!("Unknown transaction kind: {}", other)),
        }
    }
}
