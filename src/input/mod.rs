//! Input front-ends.
//!
//! ```text
//! script file ─┐
//!              ├─ SourceSwitcher ─→ relay engine
//! stdin/editor ┘
//! ```
//!
//! Every front-end implements [`InputSource`]; the relay does not care
//! whether lines come from a raw byte stream or a line editor.

mod assembler;
mod editor;
mod raw;
mod switcher;

use std::io;

pub use assembler::{Assembled, AssemblerState, LineAssembler};
pub use editor::EditorSource;
pub use raw::RawSource;
pub use switcher::{Input, Origin, SourceSwitcher};

/// One step of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceEvent {
    /// A complete, normalised line without its newline.
    Line(Vec<u8>),
    /// The current line exceeded the length limit and is being discarded.
    TooLong,
    /// The blocking read was interrupted by a signal; nothing was consumed.
    Interrupted,
    /// No more input.
    End,
}

impl From<Assembled> for SourceEvent {
    fn from(done: Assembled) -> Self {
        match done {
            Assembled::Line(line) => SourceEvent::Line(line),
            Assembled::TooLong => SourceEvent::TooLong,
        }
    }
}

pub trait InputSource {
    /// Block until the next event. Errors other than interruption are
    /// fatal to the relay.
    fn next_event(&mut self) -> io::Result<SourceEvent>;
}
