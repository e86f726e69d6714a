/// Assembly state of the pending line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblerState {
    /// Buffer empty; leading spaces are dropped.
    AwaitingLine,
    /// At least one byte buffered.
    ProcessingLine,
    /// The current line overflowed; bytes are discarded up to the newline.
    Flushing,
}

/// A finished unit of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assembled {
    /// The bytes of the line exactly as typed, after normalisation.
    Line(Vec<u8>),
    /// The line hit the length limit. Reported once, when the overflow
    /// starts; the rest of the line is swallowed silently.
    TooLong,
}

/// Byte-at-a-time line builder.
///
/// Control bytes are turned into spaces, leading spaces are suppressed and
/// a line may hold at most `max_len - 1` bytes (one slot is kept for the
/// terminator, as the historical fixed buffer did).
#[derive(Debug)]
pub struct LineAssembler {
    buf: Vec<u8>,
    max_len: usize,
    state: AssemblerState,
}

impl LineAssembler {
    pub fn new(max_len: usize) -> Self {
        Self {
            buf: Vec::new(),
            max_len,
            state: AssemblerState::AwaitingLine,
        }
    }

    pub fn state(&self) -> AssemblerState {
        self.state
    }

    pub fn push(&mut self, byte: u8) -> Option<Assembled> {
        if byte == b'\n' {
            if self.state == AssemblerState::Flushing {
                self.reset();
                return None;
            }
            return Some(Assembled::Line(self.take_line()));
        }
        if self.state == AssemblerState::Flushing {
            return None;
        }

        let byte = if byte < b' ' { b' ' } else { byte };
        if byte == b' ' && self.buf.is_empty() {
            return None;
        }
        if self.buf.len() + 1 >= self.max_len {
            self.buf.clear();
            self.state = AssemblerState::Flushing;
            return Some(Assembled::TooLong);
        }
        self.buf.push(byte);
        self.state = AssemblerState::ProcessingLine;
        None
    }

    /// End of input: hand back an unterminated line, if any.
    pub fn finish(&mut self) -> Option<Vec<u8>> {
        let pending = match self.state {
            AssemblerState::ProcessingLine => Some(self.take_line()),
            _ => None,
        };
        self.reset();
        pending
    }

    fn take_line(&mut self) -> Vec<u8> {
        let line = std::mem::take(&mut self.buf);
        self.reset();
        line
    }

    fn reset(&mut self) {
        self.buf.clear();
        self.state = AssemblerState::AwaitingLine;
    }
}
