//! Accounts file rows.

use rust_decimal::Decimal;

use tellerbook_common::{format_amount, parse_amount, AccountNumber, Pin, Result, TellerError};

/// One line of the accounts file: `name,accountNumber,pin,balance`.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountRow {
    pub name: String,
    pub account_number: AccountNumber,
    pub pin: Pin,
    pub balance: Decimal,
}

impl AccountRow {
    /// Render the row without a trailing newline.
    pub fn to_line(&self) -> String {
        format!(
            "{},{},{},{}",
            self.name,
            self.account_number,
            self.pin.expose(),
            format_amount(self.balance)
        )
    }

    /// Parse a row. `line_number` is 1-based and only used for errors.
    ///
    /// The last three fields are split off from the right, so a name may
    /// itself contain commas.
    pub fn parse_line(line: &str, line_number: usize) -> Result<Self> {
        let malformed = |reason: &str| TellerError::MalformedRecord {
            line: line_number,
            reason: reason.to_string(),
        };

        let mut fields = line.trim_end_matches(['\r', '\n']).rsplitn(4, ',');
        let balance = fields.next().ok_or_else(|| malformed("missing balance"))?;
        let pin = fields.next().ok_or_else(|| malformed("missing PIN"))?;
        let account_number = fields
            .next()
            .ok_or_else(|| malformed("missing account number"))?;
        let name = fields.next().ok_or_else(|| malformed("missing name"))?;

        let account_number = AccountNumber::new(account_number);
        if !account_number.is_valid() {
            return Err(malformed("empty account number"));
        }

        let balance = parse_amount(balance).map_err(|e| malformed(&e.to_string()))?;

        Ok(Self {
            name: name.to_string(),
            account_number,
            pin: Pin::new(pin),
            balance,
        })
    }
}
