//! Storage layer for the finance tracker. Provides storage for:
//! - Login credentials shared by all users ([`AccountStore`])
//! - Each user's ordered transaction history ([`LedgerStore`])
//!
//! Both stores load their JSON file when opened and rewrite it in full after
//! every mutation.

mod accounts;
mod ledger;

pub use accounts::AccountStore;
pub use ledger::LedgerStore;
