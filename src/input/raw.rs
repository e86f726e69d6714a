use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use crate::input::assembler::LineAssembler;
use crate::input::{InputSource, SourceEvent};

/// Plain byte stream front-end: stdin in cooked mode, or a script file.
///
/// Reads one byte per call so an interrupted `read` surfaces immediately
/// as [`SourceEvent::Interrupted`].
pub struct RawSource<R> {
    reader: R,
    assembler: LineAssembler,
    eof: bool,
}

impl<R: Read> RawSource<R> {
    pub fn new(reader: R, max_line_len: usize) -> Self {
        Self {
            reader,
            assembler: LineAssembler::new(max_line_len),
            eof: false,
        }
    }
}

impl RawSource<io::Stdin> {
    pub fn stdin(max_line_len: usize) -> Self {
        Self::new(io::stdin(), max_line_len)
    }
}

impl RawSource<BufReader<File>> {
    pub fn open(path: &Path, max_line_len: usize) -> io::Result<Self> {
        Ok(Self::from_file(File::open(path)?, max_line_len))
    }

    pub fn from_file(file: File, max_line_len: usize) -> Self {
        Self::new(BufReader::new(file), max_line_len)
    }
}

impl<R: Read> InputSource for RawSource<R> {
    fn next_event(&mut self) -> io::Result<SourceEvent> {
        if self.eof {
            return Ok(SourceEvent::End);
        }
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(match self.assembler.finish() {
                        Some(line) => SourceEvent::Line(line),
                        None => SourceEvent::End,
                    });
                }
                Ok(_) => {
                    if let Some(done) = self.assembler.push(byte[0]) {
                        return Ok(done.into());
                    }
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {
                    return Ok(SourceEvent::Interrupted);
                }
                Err(err) => return Err(err),
            }
        }
    }
}
