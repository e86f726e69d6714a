use std::io;

use crate::input::{InputSource, SourceEvent};

/// Where a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Script,
    Interactive,
}

/// Events as seen by the relay engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Line { text: Vec<u8>, origin: Origin },
    TooLong,
    Interrupted,
    /// The script ran out; input now comes from the interactive source.
    Switched,
    /// The interactive source ran out.
    End,
}

/// Reads the initialisation script first, then the interactive source.
///
/// The switch happens once: after the script reports end of input it is
/// dropped (closing the file) and never consulted again.
pub struct SourceSwitcher {
    script: Option<Box<dyn InputSource>>,
    interactive: Box<dyn InputSource>,
}

impl SourceSwitcher {
    pub fn new(script: Option<Box<dyn InputSource>>, interactive: Box<dyn InputSource>) -> Self {
        Self {
            script,
            interactive,
        }
    }

    pub fn interactive(interactive: Box<dyn InputSource>) -> Self {
        Self::new(None, interactive)
    }

    pub fn origin(&self) -> Origin {
        if self.script.is_some() {
            Origin::Script
        } else {
            Origin::Interactive
        }
    }

    pub fn next(&mut self) -> io::Result<Input> {
        let origin = self.origin();
        let event = match self.script.as_mut() {
            Some(script) => script.next_event()?,
            None => self.interactive.next_event()?,
        };
        Ok(match event {
            SourceEvent::Line(text) => Input::Line { text, origin },
            SourceEvent::TooLong => Input::TooLong,
            SourceEvent::Interrupted => Input::Interrupted,
            SourceEvent::End if origin == Origin::Script => {
                self.script = None;
                Input::Switched
            }
            SourceEvent::End => Input::End,
        })
    }
}
