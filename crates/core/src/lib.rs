//! Core statement engine for Hotelbooks.
//!
//! This crate contains pure business logic with ZERO file, network or
//! database dependencies. Business events go in, balanced postings and
//! the three financial statements come out, together with a reconciliation
//! report proving the statements agree with each other.
//!
//! # Modules
//!
//! - `fiscal` - Year-month reporting periods
//! - `ledger` - Chart of accounts, posting and trial balances
//! - `statements` - Statement extraction, reconciliation and event application

pub mod fiscal;
pub mod ledger;
pub mod statements;
