//! Tellerbook Ledger
//!
//! In-memory account directory keyed by account number, with a
//! newest-first transaction ledger per account and flat-file persistence.

pub mod account;
pub mod config;
pub mod directory;
pub mod journal;
pub mod snapshot;
pub mod store;

pub use account::Account;
pub use config::StoreConfig;
pub use directory::Directory;
pub use journal::{Ledger, TransactionRecord};
pub use snapshot::AccountRow;
pub use store::{transaction_line, FileStore, TransactionJournal};
