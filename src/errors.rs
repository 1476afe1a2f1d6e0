//! Unified application error type.
//! All modules (db, core, cli) return AppError so the error handling
//! stays consistent across the whole tool.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Validation (rejected before any state mutation)
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid hours value: {0}")]
    InvalidHours(String),

    #[error("Invalid hourly rate: {0}")]
    InvalidRate(String),

    #[error("Invalid payment amount: {0}")]
    InvalidAmount(String),

    // ---------------------------
    // Lookup failures
    // ---------------------------
    #[error("No agent found matching '{0}'")]
    AgentNotFound(String),

    #[error("No site found matching '{0}'")]
    SiteNotFound(String),

    #[error("No entry found with id {0}")]
    EntryNotFound(i64),

    #[error("No payment found with id {0}")]
    PaymentNotFound(i64),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
