//! Expense tracking REST API backed by a JSON file, plus the interactive CLI
//! client that drives it over HTTP.
//!
//! The `expense-server` binary serves the API; `expense-tracker` is the client.

pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod server;
