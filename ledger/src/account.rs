//! Directory accounts.

use rust_decimal::Decimal;

use tellerbook_common::{
    ensure_positive, format_amount, AccountNumber, Pin, Result, TellerError, TransactionKind,
};

use crate::journal::{Ledger, TransactionRecord};
use crate::snapshot::AccountRow;
use crate::store::TransactionJournal;

/// A customer account: identity, credential, balance and ledger.
///
/// Only the balance (and the ledger that explains it) changes after
/// construction, and only through [`Account::apply_deposit`] and
/// [`Account::apply_withdraw`].
#[derive(Debug, Clone)]
pub struct Account {
    name: String,
    account_number: AccountNumber,
    pin: Pin,
    balance: Decimal,
    ledger: Ledger,
}

impl Account {
    /// Create a new account with an empty ledger.
    pub fn new(
        name: impl Into<String>,
        account_number: impl Into<AccountNumber>,
        pin: impl Into<Pin>,
        initial_balance: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            account_number: account_number.into(),
            pin: pin.into(),
            balance: initial_balance,
            ledger: Ledger::new(),
        }
    }

    /// Rebuild an account from a persisted row.
    pub fn from_row(row: AccountRow) -> Self {
        Self::new(row.name, row.account_number, row.pin, row.balance)
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory key.
    pub fn account_number(&self) -> &AccountNumber {
        &self.account_number
    }

    /// Current balance.
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Transaction history, newest first.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Up to `n` most recent transactions, newest first.
    pub fn recent_records(&self, n: usize) -> Vec<&TransactionRecord> {
        self.ledger.recent_records(n)
    }

    /// Exact match on both account number and PIN.
    pub fn matches(&self, account_number: &str, pin: &str) -> bool {
        self.account_number.as_str() == account_number && self.pin.matches(pin)
    }

    /// Pay `amount` into the account. Returns the new balance.
    pub fn apply_deposit(
        &mut self,
        amount: Decimal,
        journal: &dyn TransactionJournal,
    ) -> Result<Decimal> {
        let amount = ensure_positive(amount)?;
        let balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| TellerError::InvalidAmount {
                amount: format!("{} (balance would overflow)", format_amount(amount)),
            })?;

        self.ledger
            .record(&self.account_number, TransactionKind::Deposit, amount, journal)?;
        self.balance = balance;
        Ok(self.balance)
    }

    /// Take `amount` out of the account. Returns the new balance.
    ///
    /// Fails with `InsufficientFunds` when `amount` exceeds the balance; the
    /// balance and ledger are left untouched in that case.
    pub fn apply_withdraw(
        &mut self,
        amount: Decimal,
        journal: &dyn TransactionJournal,
    ) -> Result<Decimal> {
        let amount = ensure_positive(amount)?;
        if amount > self.balance {
            return Err(TellerError::InsufficientFunds {
                required: format_amount(amount),
                available: format_amount(self.balance),
            });
        }

        self.ledger
            .record(&self.account_number, TransactionKind::Withdraw, amount, journal)?;
        self.balance -= amount;
        Ok(self.balance)
    }

    /// Check that every field survives the comma-delimited accounts file.
    ///
    /// Only the name may contain commas; no field may contain a line break.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| TellerError::InvalidAccount {
            account_number: self.account_number.to_string(),
            reason: reason.to_string(),
        };

        if !self.account_number.is_valid() {
            return Err(invalid(
                "account number must be non-empty without commas or line breaks",
            ));
        }
        if !self.pin.is_valid() {
            return Err(invalid("PIN must not contain commas or line breaks"));
        }
        if self.name.contains(['\n', '\r']) {
            return Err(invalid("name must not contain line breaks"));
        }
        Ok(())
    }

    /// Flat-file row for the accounts snapshot.
    pub fn to_row(&self) -> AccountRow {
        AccountRow {
            name: self.name.clone(),
            account_number: self.account_number.clone(),
            pin: self.pin.clone(),
            balance: self.balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::MemoryJournal;
    use rust_decimal_macros::dec;

    fn demo_account() -> Account {
        Account::new("Imam", "12345678", "1234", dec!(50000.0))
    }

    #[test]
    fn test_deposit_increases_balance_and_records() {
        let journal = MemoryJournal::default();
        let mut account = demo_account();

        let balance = account.apply_deposit(dec!(500), &journal).unwrap();

        assert_eq!(balance, dec!(50500.0));
        assert_eq!(account.balance(), dec!(50500));
        let head = account.ledger().head().unwrap();
        assert_eq!(head.kind, TransactionKind::Deposit);
        assert_eq!(head.amount, dec!(500));
        assert_eq!(journal.lines(), vec!["12345678,Deposit: 500 BDT".to_string()]);
    }

    #[test]
    fn test_withdraw_more_than_balance_changes_nothing() {
        let journal = MemoryJournal::default();
        let mut account = demo_account();
        account.apply_deposit(dec!(500), &journal).unwrap();

        let result = account.apply_withdraw(dec!(60000), &journal);

        match result {
            Err(TellerError::InsufficientFunds { required, available }) => {
                assert_eq!(required, "60000");
                assert_eq!(available, "50500");
            }
            other => panic!("expected InsufficientFunds, got {:?}", other),
        }
        assert_eq!(account.balance(), dec!(50500.0));
        assert_eq!(account.ledger().len(), 1);
        assert_eq!(journal.lines().len(), 1);
    }

    #[test]
    fn test_withdraw_entire_balance() {
        let journal = MemoryJournal::default();
        let mut account = Account::new("Rafi", "200", "0000", dec!(75.25));

        assert_eq!(account.apply_withdraw(dec!(75.25), &journal).unwrap(), Decimal::ZERO);
        assert_eq!(account.ledger().head().unwrap().kind, TransactionKind::Withdraw);
    }

    #[test]
    fn test_deposit_then_withdraw_restores_balance() {
        let journal = MemoryJournal::default();
        let mut account = demo_account();

        for amount in [dec!(0.01), dec!(1), dec!(123.45), dec!(99999.99)] {
            let before = account.balance();
            account.apply_deposit(amount, &journal).unwrap();
            account.apply_withdraw(amount, &journal).unwrap();
            assert_eq!(account.balance(), before);
        }
    }

    #[test]
    fn test_invalid_amounts_rejected() {
        let journal = MemoryJournal::default();
        let mut account = demo_account();

        assert!(matches!(
            account.apply_deposit(dec!(0), &journal),
            Err(TellerError::InvalidAmount { .. })
        ));
        assert!(matches!(
            account.apply_withdraw(dec!(-10), &journal),
            Err(TellerError::InvalidAmount { .. })
        ));
        assert_eq!(account.balance(), dec!(50000));
        assert!(account.ledger().is_empty());
        assert!(journal.lines().is_empty());
    }

    #[test]
    fn test_deposit_overflow_leaves_account_untouched() {
        let journal = MemoryJournal::default();
        let mut account = Account::new("Big", "1", "1", Decimal::MAX);

        let result = account.apply_deposit(Decimal::ONE, &journal);

        assert!(matches!(result, Err(TellerError::InvalidAmount { .. })));
        assert_eq!(account.balance(), Decimal::MAX);
        assert!(account.ledger().is_empty());
        assert!(journal.lines().is_empty());
    }

    #[test]
    fn test_validate_rejects_unstorable_fields() {
        assert!(demo_account().validate().is_ok());
        assert!(Account::new("Rahman, Imam", "1", "1", dec!(1)).validate().is_ok());

        for account in [
            Account::new("A", "1", "12,34", dec!(1)),
            Account::new("B\nC", "1", "1", dec!(1)),
            Account::new("A", "1,2", "1", dec!(1)),
            Account::new("A", "", "1", dec!(1)),
            Account::new("A", "1", "12\r", dec!(1)),
        ] {
            assert!(matches!(
                account.validate(),
                Err(TellerError::InvalidAccount { .. })
            ));
        }
    }

    #[test]
    fn test_matches_requires_both_fields() {
        let account = demo_account();

        assert!(account.matches("12345678", "1234"));
        assert!(!account.matches("12345678", "0000"));
        assert!(!account.matches("1234567", "1234"));
        assert!(!account.matches("12345678", ""));
    }

    #[test]
    fn test_row_roundtrip_keeps_identity() {
        let account = demo_account();
        let restored = Account::from_row(account.to_row());

        assert_eq!(restored.name(), "Imam");
        assert!(restored.matches("12345678", "1234"));
        assert_eq!(restored.balance(), dec!(50000));
        assert!(restored.ledger().is_empty());
    }
}
