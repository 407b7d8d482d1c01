//! Teller session: operations applied to one authenticated account.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use tellerbook_common::{format_amount, parse_amount, TransactionKind, CURRENCY_CODE};
use tellerbook_ledger::{Account, TransactionJournal};

/// A requested balance movement, written `deposit=500` or `withdraw=200`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub kind: TransactionKind,
    pub amount: Decimal,
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, amount) = s.split_once('=').ok_or_else(|| {
            format!("expected deposit=<amount> or withdraw=<amount>, got {}", s)
        })?;

        let kind = match kind.trim().to_ascii_lowercase().as_str() {
            "deposit" => TransactionKind::Deposit,
            "withdraw" => TransactionKind::Withdraw,
            other => return Err(format!("unknown operation: {}", other)),
        };
        let amount = parse_amount(amount).map_err(|e| e.to_string())?;

        Ok(Self { kind, amount })
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, format_amount(self.amount))
    }
}

/// Result of one operation.
#[derive(Debug, Clone, Serialize)]
pub struct OperationOutcome {
    pub operation: String,
    /// Balance after the operation, when it succeeded.
    pub balance: Option<String>,
    /// Error code and message, when it failed.
    pub error: Option<String>,
}

impl OperationOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Apply each operation in order. A failed operation is reported and the
/// session carries on with the next one.
pub fn apply_all(
    account: &mut Account,
    operations: &[Operation],
    journal: &dyn TransactionJournal,
) -> Vec<OperationOutcome> {
    operations
        .iter()
        .map(|op| {
            let result = match op.kind {
                TransactionKind::Deposit => account.apply_deposit(op.amount, journal),
                TransactionKind::Withdraw => account.apply_withdraw(op.amount, journal),
            };

            match result {
                Ok(balance) => {
                    info!(
                        account = %account.account_number(),
                        operation = %op,
                        balance = %balance,
                        "Operation applied"
                    );
                    OperationOutcome {
                        operation: op.to_string(),
                        balance: Some(format_amount(balance)),
                        error: None,
                    }
                }
                Err(e) => {
                    warn!(
                        account = %account.account_number(),
                        operation = %op,
                        code = e.error_code(),
                        "Operation rejected"
                    );
                    OperationOutcome {
                        operation: op.to_string(),
                        balance: None,
                        error: Some(format!("{}: {}", e.error_code(), e)),
                    }
                }
            }
        })
        .collect()
}

/// What the session shows once all operations ran.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub name: String,
    pub account_number: String,
    pub balance: String,
    pub currency: &'static str,
    /// Most recent ledger records of this session, newest first.
    pub recent: Vec<String>,
    /// Tail of the transactions file as loaded at startup, oldest first.
    pub log_tail: Vec<String>,
    pub outcomes: Vec<OperationOutcome>,
}

impl Summary {
    pub fn new(
        account: &Account,
        history: &[String],
        recent: usize,
        outcomes: Vec<OperationOutcome>,
    ) -> Self {
        let skip = history.len().saturating_sub(recent);

        Self {
            name: account.name().to_string(),
            account_number: account.account_number().to_string(),
            balance: format_amount(account.balance()),
            currency: CURRENCY_CODE,
            recent: account
                .recent_records(recent)
                .into_iter()
                .map(|r| r.describe())
                .collect(),
            log_tail: history[skip..].to_vec(),
            outcomes,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Account: {} ({})", self.name, self.account_number)?;
        writeln!(f, "Balance: {} {}", self.balance, self.currency)?;

        for outcome in &self.outcomes {
            match (&outcome.balance, &outcome.error) {
                (_, Some(error)) => writeln!(f, "  {} -> rejected ({})", outcome.operation, error)?,
                (Some(balance), None) => writeln!(f, "  {} -> {}", outcome.operation, balance)?,
                (None, None) => writeln!(f, "  {}", outcome.operation)?,
            }
        }

        if !self.recent.is_empty() {
            writeln!(f, "Recent transactions:")?;
            for line in &self.recent {
                writeln!(f, "  {}", line)?;
            }
        }

        if !self.log_tail.is_empty() {
            writeln!(f, "Transaction log:")?;
            for line in &self.log_tail {
                writeln!(f, "  {}", line)?;
            }
        }

        Ok(())
    }
}
