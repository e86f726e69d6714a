//! The line relay: meta-commands, alias substitution, repeat-last-line
//! and forwarding to the child.

pub mod command;
mod engine;
mod error;

pub use engine::RelayEngine;
pub use error::{ExitReason, RelayError};
