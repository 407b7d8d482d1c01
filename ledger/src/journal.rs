//! Per-account transaction ledger.
//!
//! Records are held newest-first: the most recent deposit or withdrawal is
//! always at the head. Nothing reorders or removes a record once written.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use tellerbook_common::{
    ensure_positive, format_amount, AccountNumber, Result, TransactionKind, CURRENCY_CODE,
};

use crate::store::TransactionJournal;

/// A single deposit or withdrawal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Deposit or withdraw.
    pub kind: TransactionKind,
    /// Amount moved, always positive.
    pub amount: Decimal,
    /// When the record was created. Not persisted.
    pub recorded_at: DateTime<Utc>,
}

impl TransactionRecord {
    /// Create a record stamped with the current time.
    pub fn new(kind: TransactionKind, amount: Decimal) -> Self {
        Self {
            kind,
            amount,
            recorded_at: Utc::now(),
        }
    }

    /// Get the effect on the balance (negative for withdrawals).
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Deposit => self.amount,
            TransactionKind::Withdraw => -self.amount,
        }
    }

    /// Human-readable form, e.g. `Deposit: 500 BDT`.
    pub fn describe(&self) -> String {
        format!("{}: {} {}", self.kind, format_amount(self.amount), CURRENCY_CODE)
    }
}

/// Newest-first sequence of transaction records owned by one account.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    records: VecDeque<TransactionRecord>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a transaction at the head of the ledger.
    ///
    /// The record is also appended to `journal`. A journal failure is logged
    /// and otherwise ignored: the in-memory ledger stays authoritative.
    pub fn record(
        &mut self,
        owner: &AccountNumber,
        kind: TransactionKind,
        amount: Decimal,
        journal: &dyn TransactionJournal,
    ) -> Result<&TransactionRecord> {
        let amount = ensure_positive(amount)?;

        self.records.push_front(TransactionRecord::new(kind, amount));

        if let Err(e) = journal.append_transaction(owner, kind, amount) {
            warn!(
                account = %owner,
                kind = %kind,
                amount = %amount,
                error = %e,
                "Transaction not persisted, keeping in-memory record"
            );
        }

        debug!(account = %owner, kind = %kind, amount = %amount, "Transaction recorded");

        Ok(&self.records[0])
    }

    /// Get up to `n` most recent records, most recent first.
    pub fn recent_records(&self, n: usize) -> Vec<&TransactionRecord> {
        self.records.iter().take(n).collect()
    }

    /// Most recent record.
    pub fn head(&self) -> Option<&TransactionRecord> {
        self.records.front()
    }

    /// Iterate newest-first.
    pub fn iter(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of all amounts of one kind.
    pub fn total(&self, kind: TransactionKind) -> Decimal {
        self.records
            .iter()
            .filter(|r| r.kind == kind)
            .map(|r| r.amount)
            .sum()
    }
}
