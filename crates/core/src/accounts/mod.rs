//! Accounts module - broker account model.

mod accounts_model;

// Re-export the public interface
pub use accounts_model::{account_key_to_number, Account};
