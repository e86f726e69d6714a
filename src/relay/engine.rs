use std::borrow::Cow;

use crate::alias::{AliasTable, Defined};
use crate::child::ChildSink;
use crate::config::RelayConfig;
use crate::console::Console;
use crate::input::{Input, Origin, SourceSwitcher};
use crate::relay::command::{assemble, is_exit, split_command};
use crate::relay::error::{ExitReason, RelayError};

/// The relay loop: turns input lines into commands for the child.
///
/// Owns the alias table and the last forwarded command. Single threaded;
/// the only outside influence is the child's liveness, polled once per
/// iteration.
pub struct RelayEngine<C> {
    child: C,
    aliases: AliasTable,
    console: Console,
    last_sent: Vec<u8>,
    max_line_len: usize,
    repeat: bool,
}

impl<C: ChildSink> RelayEngine<C> {
    pub fn new(config: &RelayConfig, child: C, console: Console) -> Self {
        Self {
            child,
            aliases: AliasTable::new(config.alias_capacity, config.redefine),
            console,
            last_sent: Vec::new(),
            max_line_len: config.max_line_len,
            repeat: config.repeat,
        }
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// The last forwarded command including its newline; empty if none.
    pub fn last_sent(&self) -> &[u8] {
        &self.last_sent
    }

    pub fn into_child(self) -> C {
        self.child
    }

    /// Run until input ends, the child dies, `exit` is typed or a fatal
    /// error occurs. The outcome is reported on the console either way.
    pub fn run(&mut self, input: &mut SourceSwitcher) -> Result<ExitReason, RelayError> {
        let outcome = self.run_loop(input);
        match &outcome {
            Ok(reason) => self.console.say(reason),
            Err(err) => self.console.warn(format_args!("{err}, exiting...")),
        }
        outcome
    }

    fn run_loop(&mut self, input: &mut SourceSwitcher) -> Result<ExitReason, RelayError> {
        loop {
            if let Some(reason) = self.child_exit() {
                return Ok(reason);
            }
            let next = input.next();
            if let Some(reason) = self.child_exit() {
                return Ok(reason);
            }

            match next.map_err(RelayError::Read)? {
                Input::Interrupted => tracing::debug!("read interrupted"),
                Input::TooLong => self.console.warn("line too long, resetting input"),
                Input::Switched => {
                    tracing::debug!("script finished, reading interactive input");
                    self.last_sent.clear();
                }
                Input::End => return Ok(ExitReason::EndOfInput),
                Input::Line { text, .. } if is_exit(&text) => {
                    return Ok(ExitReason::ExitCommand);
                }
                Input::Line { text, origin } => self.dispatch(&text, origin)?,
            }
        }
    }

    fn child_exit(&mut self) -> Option<ExitReason> {
        if self.child.is_alive() {
            return None;
        }
        Some(ExitReason::ChildExited {
            program: self.child.program().to_string(),
        })
    }

    /// Handle one complete line.
    pub fn dispatch(&mut self, line: &[u8], origin: Origin) -> Result<(), RelayError> {
        if line.is_empty() {
            return self.repeat_last();
        }
        if origin == Origin::Script && line.starts_with(b"#") {
            tracing::debug!(line = %lossy(line), "skipping script comment");
            return Ok(());
        }

        let (command, remainder) = split_command(line);
        tracing::debug!(command = %lossy(command), "dispatch");
        let command = match self.aliases.find(command) {
            Some(expansion) => {
                tracing::debug!(
                    command = %lossy(command),
                    expansion = %lossy(expansion),
                    "alias expanded"
                );
                expansion.to_vec()
            }
            None => command.to_vec(),
        };

        match command.as_slice() {
            b"alias" => self.alias(remainder),
            b"unalias" => {
                self.unalias(remainder);
                Ok(())
            }
            _ => self.forward(&command, remainder),
        }
    }

    fn repeat_last(&mut self) -> Result<(), RelayError> {
        if self.last_sent.is_empty() || !self.repeat {
            tracing::debug!("sending newline (1 byte)");
            self.child.write_line(b"\n")?;
        } else {
            tracing::debug!(
                bytes = self.last_sent.len(),
                line = %lossy(&self.last_sent).trim_end(),
                "resending last command"
            );
            self.child.write_line(&self.last_sent)?;
        }
        Ok(())
    }

    fn alias(&mut self, rest: &[u8]) -> Result<(), RelayError> {
        if rest.is_empty() {
            self.list_aliases();
            return Ok(());
        }
        match self.aliases.define(rest) {
            Ok(Defined::Added) => tracing::debug!(definition = %lossy(rest), "alias added"),
            Ok(Defined::Replaced) => tracing::debug!(definition = %lossy(rest), "alias replaced"),
            Err(err) if err.is_fatal() => return Err(RelayError::OutOfMemory),
            Err(err) => self.console.say(err),
        }
        Ok(())
    }

    fn list_aliases(&mut self) {
        if self.aliases.is_empty() {
            self.console.say("no aliases defined");
            return;
        }
        self.console.say("aliases:");
        let mut listing = Vec::new();
        for alias in self.aliases.list() {
            listing.push(b'\t');
            listing.extend_from_slice(&alias.name);
            listing.push(b'=');
            listing.extend_from_slice(&alias.expansion);
            listing.push(b'\n');
        }
        self.console.raw(listing);
    }

    fn unalias(&mut self, rest: &[u8]) {
        match self.aliases.remove(rest) {
            Ok(removed) => self
                .console
                .say(format_args!("removing alias \"{}\"", removed.name_lossy())),
            Err(err) => self.console.say(err),
        }
    }

    fn forward(&mut self, command: &[u8], remainder: &[u8]) -> Result<(), RelayError> {
        let Some(line) = assemble(command, remainder, self.max_line_len) else {
            self.console.say("line too long, skipping...");
            return Ok(());
        };
        tracing::debug!(
            bytes = line.len(),
            line = %lossy(&line).trim_end(),
            "sending"
        );
        self.child.write_line(&line)?;
        self.last_sent = line;
        Ok(())
    }
}

fn lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}
