//! Child process supervision: spawning the target program behind a pipe
//! and tracking whether it is still running.

mod liveness;
mod session;
mod spawn_config;

use std::io;

use thiserror::Error;

pub use liveness::Liveness;
pub use session::{ChildSession, SpawnError};
pub use spawn_config::SpawnConfig;

/// Failure to deliver a line to the child.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("incomplete send ({sent} of {expected} bytes)")]
    Short { sent: usize, expected: usize },

    #[error("write to child failed: {0}")]
    Io(#[from] io::Error),
}

/// The relay's view of the child: a liveness probe plus a line sink.
pub trait ChildSink {
    /// Name of the program, for diagnostics.
    fn program(&self) -> &str;

    /// Snapshot of the liveness state. Once false, never true again.
    fn is_alive(&mut self) -> bool;

    /// Write `line` in a single write. Anything short of the whole line is
    /// an error; the caller never retries a partial command.
    fn write_line(&mut self, line: &[u8]) -> Result<(), SendError>;
}
