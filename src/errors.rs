//! Unified error types for the catalog admin core.
//!
//! Every fallible operation returns [`Result`]. Validation failures are raised
//! before any database call; backend failures are wrapped from `SeaORM`.

use thiserror::Error;

/// All errors produced by the catalog admin core.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// A required field is missing or malformed; nothing was written
    #[error("Validation failed: {message}")]
    Validation {
        /// Message suitable for showing to the operator
        message: String,
    },

    /// Database error from `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A monetary amount was negative or not a finite number
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// A stock quantity was negative
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity {
        /// The rejected quantity
        quantity: i64,
    },

    /// No variant with this key is present in the matrix
    #[error("Variant '{key}' not found")]
    VariantNotFound {
        /// Display form of the missing key
        key: String,
    },

    /// Product row does not exist
    #[error("Product '{id}' not found")]
    ProductNotFound {
        /// Product identifier
        id: String,
    },

    /// Category row does not exist
    #[error("Category '{id}' not found")]
    CategoryNotFound {
        /// Category identifier
        id: String,
    },

    /// Color row does not exist
    #[error("Color '{id}' not found")]
    ColorNotFound {
        /// Color identifier
        id: String,
    },

    /// Media assignment was requested without any target size
    #[error("Please select at least one size")]
    EmptyMediaTarget,

    /// None of the candidate links for a media URL could be rendered
    #[error("Media could not be loaded from '{url}'")]
    MediaUnreachable {
        /// The link the operator supplied
        url: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
