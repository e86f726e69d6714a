use std::io;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::config::InputConfig;
use crate::input::assembler::LineAssembler;
use crate::input::{InputSource, SourceEvent};

/// Line-editor front-end with history (cursor keys, Ctrl-R and friends).
///
/// Lines are run through the same [`LineAssembler`] as raw input so that
/// normalisation and the length limit behave identically.
pub struct EditorSource {
    editor: DefaultEditor,
    prompt: String,
    assembler: LineAssembler,
}

impl EditorSource {
    pub fn new(config: &InputConfig, max_line_len: usize) -> Result<Self, ReadlineError> {
        let editor_config = rustyline::Config::builder()
            .max_history_size(config.history_size)?
            .auto_add_history(false)
            .build();
        let editor = DefaultEditor::with_config(editor_config)?;
        Ok(Self {
            editor,
            prompt: config.prompt.clone(),
            assembler: LineAssembler::new(max_line_len),
        })
    }
}

impl EditorSource {
    /// Non-empty lines go into history; a failure there only costs recall.
    fn remember(&mut self, event: &SourceEvent) {
        let SourceEvent::Line(text) = event else {
            return;
        };
        if text.is_empty() {
            return;
        }
        let entry = String::from_utf8_lossy(text);
        if let Err(err) = self.editor.add_history_entry(entry.as_ref()) {
            tracing::debug!(error = %err, "cannot add history entry");
        }
    }
}

impl InputSource for EditorSource {
    fn next_event(&mut self) -> io::Result<SourceEvent> {
        match self.editor.readline(&self.prompt) {
            Ok(line) => {
                let event = assemble_line(&mut self.assembler, &line);
                self.remember(&event);
                Ok(event)
            }
            // Ctrl-C drops the line being edited.
            Err(ReadlineError::Interrupted) => Ok(SourceEvent::Interrupted),
            Err(ReadlineError::Eof) => Ok(SourceEvent::End),
            Err(ReadlineError::Io(err)) if err.kind() == io::ErrorKind::Interrupted => {
                Ok(SourceEvent::Interrupted)
            }
            Err(ReadlineError::Io(err)) => Err(err),
            Err(err) => Err(io::Error::new(io::ErrorKind::Other, err.to_string())),
        }
    }
}

/// Feed an edited line plus its newline through the assembler.
fn assemble_line(assembler: &mut LineAssembler, line: &str) -> SourceEvent {
    let mut event: Option<SourceEvent> = None;
    for byte in line.bytes().chain(std::iter::once(b'\n')) {
        if let Some(done) = assembler.push(byte) {
            event.get_or_insert(done.into());
        }
    }
    event.unwrap_or(SourceEvent::Interrupted)
}
