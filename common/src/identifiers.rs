//! Identifier and credential types for directory accounts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Account number, the unique key of the account directory.
///
/// Ordering is plain byte-wise string comparison, so `"10" < "9"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountNumber(String);

impl AccountNumber {
    /// Create a new account number.
    pub fn new(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    /// Get the number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate the account number format for the flat files.
    pub fn is_valid(&self) -> bool {
        // Commas and line breaks would corrupt the comma-delimited records
        !self.0.is_empty() && !self.0.contains([',', '\n', '\r'])
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountNumber {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AccountNumber {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Plaintext account PIN.
///
/// Never serialized, and redacted in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Pin(String);

impl Pin {
    /// Create a new PIN.
    pub fn new(pin: impl Into<String>) -> Self {
        Self(pin.into())
    }

    /// Exact comparison against a presented PIN.
    pub fn matches(&self, presented: &str) -> bool {
        self.0 == presented
    }

    /// Validate the PIN for the accounts file, where it sits between
    /// comma-delimited fields.
    pub fn is_valid(&self) -> bool {
        !self.0.contains([',', '\n', '\r'])
    }

    /// Expose the secret for persistence.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(****)")
    }
}

impl From<&str> for Pin {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Pin {
    fn from(s: String) -> Self {
        Self(s)
    }
}
