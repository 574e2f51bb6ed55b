//! Runtime configuration for the server and the CLI client.
//!
//! Both read the environment (after `dotenv` has loaded any `.env` file). The
//! server additionally accepts command-line flags, which take precedence.

use clap::Parser;
use reqwest::Url;
use std::env;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::error::{AppError, Result};

/// Default base URL of the expense API.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Environment variable holding the client's API base URL.
pub const API_URL_ENV: &str = "EXPENSE_API_URL";

/// Expense API server
#[derive(Parser, Debug, Clone)]
#[command(name = "expense-server", author, version, about, long_about = None)]
pub struct ServerConfig {
    /// Host or IP address to bind
    #[arg(long, env = "EXPENSE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "EXPENSE_PORT", default_value_t = 5000)]
    pub port: u16,

    /// JSON file holding the expense collection
    #[arg(long, env = "EXPENSE_DATA_FILE", default_value = "expenses_data.json")]
    pub data_file: PathBuf,
}

impl ServerConfig {
    /// `host:port`, resolved by the listener at bind time.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Settings for the interactive client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    /// Builds a config for `base_url`, trimming any trailing slash.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` unless `base_url` is an absolute http(s) URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let url = Url::parse(trimmed)
            .map_err(|e| AppError::Config(format!("Invalid API URL '{}': {}", base_url, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "API URL must use http or https: {}",
                base_url
            )));
        }

        Ok(Self {
            base_url: trimmed.to_string(),
        })
    }

    /// Reads `EXPENSE_API_URL`, falling back to `http://127.0.0.1:5000`.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(&base_url)
    }
}

/// Loads `dotenv_file` (or `.env` from the working directory) into the
/// environment, then builds the log filter from `RUST_LOG`.
///
/// `default_directive` applies when `RUST_LOG` is unset in both places.
pub fn log_filter(dotenv_file: Option<&Path>, default_directive: &str) -> EnvFilter {
    let _ = match dotenv_file {
        Some(path) => dotenv::from_path(path),
        None => dotenv::dotenv().map(|_| ()),
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}
