use std::io::{self, Write};
use std::process::{Child, ChildStdin, ExitStatus};

use thiserror::Error;

use crate::child::liveness::Liveness;
use crate::child::spawn_config::SpawnConfig;
use crate::child::{ChildSink, SendError};

#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("cannot watch for child exit: {0}")]
    Signal(#[source] io::Error),

    #[error("cannot start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} was started without an input pipe")]
    MissingPipe { program: String },
}

/// The running target program.
///
/// Owns the write end of the child's stdin pipe. Liveness is driven by
/// SIGCHLD: a notification is confirmed with `try_wait` so that stop and
/// continue events do not count as death.
pub struct ChildSession {
    program: String,
    child: Child,
    stdin: Option<ChildStdin>,
    liveness: Liveness,
    status: Option<ExitStatus>,
    exited: bool,
}

impl ChildSession {
    pub fn spawn(config: &SpawnConfig) -> Result<Self, SpawnError> {
        let liveness = Liveness::register().map_err(SpawnError::Signal)?;
        let program = config.program().to_string();

        let mut child = config
            .command()
            .spawn()
            .map_err(|source| SpawnError::Spawn {
                program: program.clone(),
                source,
            })?;
        let Some(stdin) = child.stdin.take() else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(SpawnError::MissingPipe { program });
        };

        tracing::debug!(pid = child.id(), %program, "child started");
        Ok(Self {
            program,
            child,
            stdin: Some(stdin),
            liveness,
            status: None,
            exited: false,
        })
    }

    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Exit status, if the child has been observed to exit.
    pub fn status(&self) -> Option<ExitStatus> {
        self.status
    }

    /// Close the pipe so the child sees end-of-input, then reap it.
    pub fn shutdown(mut self) -> io::Result<ExitStatus> {
        self.stdin.take();
        if let Some(status) = self.status {
            return Ok(status);
        }
        let status = self.child.wait()?;
        tracing::debug!(%status, program = %self.program, "child reaped");
        Ok(status)
    }
}

impl ChildSink for ChildSession {
    fn program(&self) -> &str {
        &self.program
    }

    fn is_alive(&mut self) -> bool {
        if self.exited {
            return false;
        }
        if !self.liveness.take() {
            return true;
        }
        match self.child.try_wait() {
            Ok(Some(status)) => {
                tracing::debug!(%status, "child exited");
                self.status = Some(status);
                self.exited = true;
                false
            }
            Ok(None) => true,
            Err(err) => {
                tracing::warn!(error = %err, "cannot query child state, assuming it exited");
                self.exited = true;
                false
            }
        }
    }

    fn write_line(&mut self, line: &[u8]) -> Result<(), SendError> {
        let Some(stdin) = self.stdin.as_mut() else {
            return Err(SendError::Short {
                sent: 0,
                expected: line.len(),
            });
        };
        loop {
            match stdin.write(line) {
                Ok(sent) if sent == line.len() => return Ok(()),
                Ok(sent) => {
                    return Err(SendError::Short {
                        sent,
                        expected: line.len(),
                    })
                }
                // Nothing was written; SIGCHLD woke us up. The relay checks
                // liveness before the next line, so just try again.
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(SendError::Io(err)),
            }
        }
    }
}
