//! Error handling for ScopeVis-RS
//!
//! This module defines custom error types and a Result alias for use
//! throughout the crate.
//!
//! The paint path never returns errors: invalid numeric input is clamped or
//! drawn as a gap. Errors surface from configuration, container construction
//! and worker control only.

use thiserror::Error;

/// Main error type for ScopeVis-RS operations
#[derive(Error, Debug)]
pub enum ScopeError {
    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors related to channel communication with the update worker
    #[error("Channel error: {0}")]
    Channel(String),

    /// A shared lock was poisoned by a panicking writer
    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),

    /// A row index outside the data container
    #[error("Invalid row {row} (container has {rows} rows)")]
    InvalidRow { row: usize, rows: usize },

    /// Inconsistent input when building containers or series
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ScopeError>,
    },
}

impl ScopeError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ScopeError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Build a poisoned-lock error from any `PoisonError`
    pub fn poisoned<T>(what: &str, _err: std::sync::PoisonError<T>) -> Self {
        ScopeError::LockPoisoned(what.to_string())
    }
}

/// Result type alias for ScopeVis-RS operations
pub type Result<T> = std::result::Result<T, ScopeError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}
