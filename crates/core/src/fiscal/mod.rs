//! Reporting periods.

pub mod period;

pub use period::Period;
