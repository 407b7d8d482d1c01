//! Tellerbook Common Types
//!
//! This crate contains the value types shared by the account directory and its
//! callers: account identifiers and credentials, transaction kinds, amount
//! helpers and the error taxonomy.

pub mod identifiers;
pub mod monetary;
pub mod transaction;
pub mod error;

pub use identifiers::*;
pub use monetary::*;
pub use transaction::*;
pub use error::*;
