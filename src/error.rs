//! Defines the application's primary error type `AppError` and a convenience `Result` alias.
//!
//! Uses the `thiserror` crate for ergonomic error definition and provides `From`
//! implementations to convert common external errors into `AppError` variants.
//! Errors that do not implement `Clone` are wrapped in `Arc` to allow `AppError` to be cloneable.

use reqwest::StatusCode;
use std::sync::Arc;
use thiserror::Error;

/// The primary error enumeration for all application-specific errors.
#[derive(Error, Debug, Clone)]
pub enum AppError {
    /// Transport-level failure talking to the expense API (`reqwest`).
    #[error("API Error: {0}")]
    Api(Arc<reqwest::Error>),

    /// The expense API answered with an unexpected status code.
    #[error("{status}: {message}")]
    Status { status: StatusCode, message: String },

    /// The backing file could not be read, parsed or written.
    #[error("Storage Error: {0}")]
    Storage(String),

    /// Error during JSON parsing (`serde_json`). Wrapped in Arc as serde_json::Error is not Clone.
    #[error("JSON Parsing Error: {0}")]
    JsonParse(Arc<serde_json::Error>),

    /// Error related to standard I/O operations.
    #[error("I/O Error: {0}")]
    Io(Arc<std::io::Error>),

    /// User input rejected before any request was sent.
    #[error("{0}")]
    InvalidInput(String),

    /// Error originating from user interaction prompts (`dialoguer`).
    #[error("Dialoguer Error: {0}")]
    Dialoguer(Arc<dialoguer::Error>),

    /// Error related to progress bar style templating (`indicatif`).
    #[error("Progress Style Template Error: {0}")]
    Template(Arc<indicatif::style::TemplateError>),

    /// Invalid configuration value.
    #[error("Configuration Error: {0}")]
    Config(String),
}

/// A specialized `Result` type using the application's `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

// --- From implementations ---

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Api(Arc::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(Arc::new(err))
    }
}

impl From<dialoguer::Error> for AppError {
    fn from(err: dialoguer::Error) -> Self {
        AppError::Dialoguer(Arc::new(err))
    }
}

impl From<indicatif::style::TemplateError> for AppError {
    fn from(err: indicatif::style::TemplateError) -> Self {
        AppError::Template(Arc::new(err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::JsonParse(Arc::new(err))
    }
}
