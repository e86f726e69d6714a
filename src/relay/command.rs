//! Pure helpers for taking a line apart and putting it back together.
//!
//! Lines are bytes: whatever the user typed reaches the child unchanged,
//! UTF-8 or not.

/// Keyword that ends the session, checked before alias substitution.
pub const EXIT_COMMAND: &[u8] = b"exit";

/// Split a line at its first space into the command token and the
/// remainder, with the remainder's leading spaces removed.
pub fn split_command(line: &[u8]) -> (&[u8], &[u8]) {
    match line.iter().position(|&b| b == b' ') {
        Some(space) => {
            let rest = &line[space + 1..];
            let start = rest.iter().position(|&b| b != b' ').unwrap_or(rest.len());
            (&line[..space], &rest[start..])
        }
        None => (line, &line[..0]),
    }
}

pub fn is_exit(line: &[u8]) -> bool {
    split_command(line).0 == EXIT_COMMAND
}

/// Build `command [' ' remainder] '\n'`, or `None` if it would not fit in
/// a line of `max_len` bytes. The size check always counts the separator
/// and a terminator byte, matching the historical fixed-size buffer.
pub fn assemble(command: &[u8], remainder: &[u8], max_len: usize) -> Option<Vec<u8>> {
    if command.len() + remainder.len() + 3 > max_len {
        return None;
    }
    let mut out = Vec::with_capacity(command.len() + remainder.len() + 2);
    out.extend_from_slice(command);
    if !remainder.is_empty() {
        out.push(b' ');
        out.extend_from_slice(remainder);
    }
    out.push(b'\n');
    Some(out)
}
