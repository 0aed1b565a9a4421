//! Unified error types and result handling.
//!
//! Every fallible operation in the crate returns [`Result`]. Validation and
//! authentication failures are reported before any write is attempted, so a
//! rejected operation never leaves partial state behind.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading or startup error
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong
        message: String,
    },

    /// A required field was missing, empty, or malformed
    #[error("Validation error: {message}")]
    Validation {
        /// Description of the rejected input
        message: String,
    },

    /// A monetary amount was zero, negative, or not finite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// A pledge would push an item past its price
    #[error("Amount {amount:.2} exceeds remaining balance {remaining:.2}")]
    ExceedsRemaining {
        /// The rejected pledge amount
        amount: f64,
        /// The item's outstanding balance at the time of the attempt
        remaining: f64,
    },

    /// Credentials did not resolve to an account. Deliberately generic:
    /// the caller never learns which part of the credential failed.
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Item id absent from the acting account's scope
    #[error("Item not found: {id}")]
    ItemNotFound {
        /// The id that failed to resolve
        id: String,
    },

    /// Sponsorship id absent from the acting account's scope
    #[error("Sponsorship not found: {id}")]
    SponsorshipNotFound {
        /// The id that failed to resolve
        id: String,
    },

    /// The backing store rejected or failed a read/write
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
