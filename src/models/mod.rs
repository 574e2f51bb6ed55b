//! Defines the data structures and models used throughout the application.
//!
//! This covers the expense record persisted by the server, the request bodies
//! accepted by the API, and the validated forms passed to the store.

mod expense;

pub use expense::*;
