//! Shared types, errors, and configuration for Hotelbooks.
//!
//! This crate provides common types used across all other crates:
//! - Rounding policy and tolerance helpers for monetary amounts
//! - Typed string IDs for events and entities
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
