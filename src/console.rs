//! User-facing diagnostics.
//!
//! Everything the relay tells the user (alias listings, malformed input,
//! exit reasons) goes through a [`Console`]. Informational messages go to
//! stdout alongside the child's own output; input and transport errors go
//! to stderr. Internal tracing is separate and handled by `tracing`.

use std::fmt::Display;
use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

const PREFIX: &str = "cmdrelay: ";

pub type CaptureBuffer = Arc<Mutex<Vec<u8>>>;

pub struct Console {
    out: Box<dyn Write + Send>,
    err: Box<dyn Write + Send>,
}

impl Console {
    pub fn new(out: Box<dyn Write + Send>, err: Box<dyn Write + Send>) -> Self {
        Self { out, err }
    }

    pub fn stdio() -> Self {
        Self::new(Box::new(io::stdout()), Box::new(io::stderr()))
    }

    /// A console that records both channels, interleaved, into one shared
    /// buffer.
    pub fn capture() -> (Self, CaptureBuffer) {
        let buffer: CaptureBuffer = Arc::new(Mutex::new(Vec::new()));
        let console = Self::new(
            Box::new(CaptureWriter(Arc::clone(&buffer))),
            Box::new(CaptureWriter(Arc::clone(&buffer))),
        );
        (console, buffer)
    }

    /// Print a prefixed diagnostic line on stdout.
    pub fn say(&mut self, message: impl Display) {
        let line = format!("{PREFIX}{message}\n");
        emit(&mut self.out, line.as_bytes());
    }

    /// Print a prefixed error line on stderr.
    pub fn warn(&mut self, message: impl Display) {
        let line = format!("{PREFIX}{message}\n");
        emit(&mut self.err, line.as_bytes());
    }

    /// Print bytes as-is on stdout.
    pub fn raw(&mut self, bytes: impl AsRef<[u8]>) {
        emit(&mut self.out, bytes.as_ref());
    }
}

// Diagnostics are best effort: a closed stdout must not stop the relay.
fn emit(out: &mut Box<dyn Write + Send>, bytes: &[u8]) {
    let _ = out.write_all(bytes);
    let _ = out.flush();
}

struct CaptureWriter(CaptureBuffer);

impl Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
