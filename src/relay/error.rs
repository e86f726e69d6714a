use std::fmt;
use std::io;

use thiserror::Error;

use crate::child::SendError;

/// Fatal relay failures. Each one ends the loop with a final diagnostic.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("error reading input: {0}")]
    Read(#[source] io::Error),

    #[error(transparent)]
    Send(#[from] SendError),

    #[error("out of memory defining alias")]
    OutOfMemory,
}

/// Clean ways for the loop to end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitReason {
    /// The interactive source reached end of input.
    EndOfInput,
    /// The child terminated.
    ChildExited { program: String },
    /// The user typed `exit`.
    ExitCommand,
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitReason::EndOfInput => write!(f, "EOF, exiting..."),
            ExitReason::ChildExited { program } => {
                write!(f, "{program} is no longer running, exiting...")
            }
            ExitReason::ExitCommand => write!(f, "exiting..."),
        }
    }
}
