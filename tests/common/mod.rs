//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

use cmdrelay::child::{ChildSink, SendError};
use cmdrelay::config::RelayConfig;
use cmdrelay::console::{CaptureBuffer, Console};
use cmdrelay::input::{InputSource, RawSource, SourceEvent, SourceSwitcher};
use cmdrelay::relay::RelayEngine;
use parking_lot::Mutex;
use std::io::{self, Cursor, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub type SpyWrites = Arc<Mutex<Vec<Vec<u8>>>>;

// -- Child mocks --------------------------------------------------------------

/// Child stand-in that records every line written to it.
pub struct SpyChild {
    writes: SpyWrites,
    alive: Arc<AtomicBool>,
    /// Accept only this many bytes per write.
    short_at: Option<usize>,
}

impl ChildSink for SpyChild {
    fn program(&self) -> &str {
        "spy"
    }

    fn is_alive(&mut self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    fn write_line(&mut self, line: &[u8]) -> Result<(), SendError> {
        match self.short_at {
            Some(limit) if line.len() > limit => Err(SendError::Short {
                sent: limit,
                expected: line.len(),
            }),
            _ => {
                self.writes.lock().push(line.to_vec());
                Ok(())
            }
        }
    }
}

/// Handles into a [`SpyChild`] and the captured console.
pub struct Spy {
    pub writes: SpyWrites,
    pub alive: Arc<AtomicBool>,
    pub console: CaptureBuffer,
}

impl Spy {
    /// Everything the child received, concatenated.
    pub fn sent(&self) -> String {
        String::from_utf8(self.writes.lock().concat()).unwrap()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().len()
    }

    pub fn console_text(&self) -> String {
        String::from_utf8(self.console.lock().clone()).unwrap()
    }

    pub fn kill(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}

pub fn engine_with(config: RelayConfig, short_at: Option<usize>) -> (RelayEngine<SpyChild>, Spy) {
    let writes: SpyWrites = Arc::new(Mutex::new(Vec::new()));
    let alive = Arc::new(AtomicBool::new(true));
    let (console, buffer) = Console::capture();
    let child = SpyChild {
        writes: Arc::clone(&writes),
        alive: Arc::clone(&alive),
        short_at,
    };
    let engine = RelayEngine::new(&config, child, console);
    (
        engine,
        Spy {
            writes,
            alive,
            console: buffer,
        },
    )
}

pub fn engine() -> (RelayEngine<SpyChild>, Spy) {
    engine_with(RelayConfig::default(), None)
}

// -- Input helpers ------------------------------------------------------------

pub fn raw(text: &str) -> Box<dyn InputSource> {
    Box::new(RawSource::new(Cursor::new(text.as_bytes().to_vec()), 1024))
}

pub fn interactive(text: &str) -> SourceSwitcher {
    SourceSwitcher::interactive(raw(text))
}

pub fn scripted(script: &str, interactive: &str) -> SourceSwitcher {
    SourceSwitcher::new(Some(raw(script)), raw(interactive))
}

/// Source that marks the child dead after handing out `lines` lines.
pub struct DyingSource {
    inner: Box<dyn InputSource>,
    alive: Arc<AtomicBool>,
    lines: usize,
}

impl DyingSource {
    pub fn new(text: &str, alive: Arc<AtomicBool>, lines: usize) -> Self {
        Self {
            inner: raw(text),
            alive,
            lines,
        }
    }
}

impl InputSource for DyingSource {
    fn next_event(&mut self) -> io::Result<SourceEvent> {
        if self.lines == 0 {
            self.alive.store(false, Ordering::SeqCst);
        }
        let event = self.inner.next_event()?;
        if matches!(event, SourceEvent::Line(_)) {
            self.lines = self.lines.saturating_sub(1);
        }
        Ok(event)
    }
}

/// Reader that fails with `kind` once, then serves `data`.
pub struct HiccupReader {
    kind: Option<io::ErrorKind>,
    data: Cursor<Vec<u8>>,
}

impl HiccupReader {
    pub fn new(kind: io::ErrorKind, data: &str) -> Self {
        Self {
            kind: Some(kind),
            data: Cursor::new(data.as_bytes().to_vec()),
        }
    }
}

impl Read for HiccupReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if let Some(kind) = self.kind.take() {
            return Err(io::Error::new(kind, "hiccup"));
        }
        self.data.read(buf)
    }
}
