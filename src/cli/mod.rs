//! Handles Command Line Interface (CLI) related functionalities.
//!
//! Includes the numbered menu, prompts with local validation, command execution
//! against the expense API, and rendering of results.

mod commands;
mod prompts;
mod render;

pub use commands::*;
pub use prompts::*;
pub use render::*;
