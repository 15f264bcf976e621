//! Core rules and storage for a private lending ledger: bank accounts,
//! the parties that participate in loans, collateral assets, loan
//! records, and the cash/online transactions that move money between
//! accounts and adjust loan balances.
//!
//! RULES:
//!   - Only the store module talks to SQLite. Everything else goes
//!     through `LedgerStore` methods.
//!   - An account is owned by at most one party, across all party kinds.
//!     Every link passes through the link registry before it is persisted.
//!   - Recording a transaction and adjusting the referenced loan's totals
//!     happen in one database transaction.
//!   - Every operation enters through `Ledger::execute`; no input or
//!     output mechanism leaks into this crate.

pub mod account;
pub mod asset;
pub mod command;
pub mod error;
pub mod ledger;
pub mod link_registry;
pub mod loan;
pub mod party;
pub mod store;
pub mod transaction;
pub mod types;
pub mod validate;
