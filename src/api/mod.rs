//! Provides the HTTP client used by the CLI to talk to the expense API.
//!
//! Includes:
//! - `client`: `ExpenseClient`, one method per API operation.

mod client;
#[cfg(test)]
mod client_test;

pub use client::*;
