//! Provides persistence for the expense collection.
//!
//! Currently, this module stores the collection as a JSON array in a single file
//! via the `json_store` submodule.

mod json_store;

pub use json_store::*;
