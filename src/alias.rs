//! Alias table: an insertion-ordered list of `NAME=EXPANSION` pairs.
//!
//! Lookups are linear and exact-match. The table is small (bounded by a
//! configurable capacity), so no index is kept.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What `define` does when the name already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedefinePolicy {
    /// Update the existing entry in place, keeping its position.
    #[default]
    Replace,
    /// Append a new entry. Lookup returns the first match, so the new
    /// definition stays hidden behind the old one until it is removed.
    Shadow,
}

/// A single alias. Names and expansions are raw bytes; input is never
/// required to be UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub name: Vec<u8>,
    pub expansion: Vec<u8>,
}

impl Alias {
    pub fn name_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }
}

/// Errors reported by alias table operations.
///
/// All of them are user-facing diagnostics except [`AliasError::OutOfMemory`],
/// which stops the relay.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AliasError {
    #[error("no = found in alias definition\nusage: alias NAME=EXPAND")]
    MissingEquals,

    #[error("no string found before = in alias definition\nusage: alias NAME=EXPAND")]
    EmptyName,

    #[error("no string found after = in alias definition\nusage: alias NAME=EXPAND")]
    EmptyExpansion,

    #[error("alias table is full (max number={capacity})")]
    TableFull { capacity: usize },

    #[error("out of memory defining alias")]
    OutOfMemory,

    #[error("alias table is empty")]
    TableEmpty,

    #[error("usage: unalias NAME")]
    MissingName,

    #[error("no such alias \"{0}\"")]
    NoSuchAlias(String),
}

impl AliasError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, AliasError::OutOfMemory)
    }
}

/// Outcome of a successful `define`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Defined {
    Added,
    Replaced,
}

#[derive(Debug, Clone)]
pub struct AliasTable {
    entries: Vec<Alias>,
    capacity: usize,
    policy: RedefinePolicy,
}

impl AliasTable {
    pub fn new(capacity: usize, policy: RedefinePolicy) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
            policy,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// All entries in insertion order.
    pub fn list(&self) -> &[Alias] {
        &self.entries
    }

    /// Define an alias from the text following the `alias` keyword.
    ///
    /// The name is everything before the first `=` with trailing spaces
    /// removed; the expansion is everything after it with leading spaces
    /// removed. On error the table is left untouched.
    pub fn define(&mut self, definition: &[u8]) -> Result<Defined, AliasError> {
        let (name, expansion) = parse_definition(definition)?;

        if self.policy == RedefinePolicy::Replace {
            if let Some(existing) = self.entries.iter_mut().find(|a| a.name == name) {
                existing.expansion = owned(expansion)?;
                return Ok(Defined::Replaced);
            }
        }

        if self.entries.len() >= self.capacity {
            return Err(AliasError::TableFull {
                capacity: self.capacity,
            });
        }

        let alias = Alias {
            name: owned(name)?,
            expansion: owned(expansion)?,
        };
        self.entries
            .try_reserve(1)
            .map_err(|_| AliasError::OutOfMemory)?;
        self.entries.push(alias);
        Ok(Defined::Added)
    }

    /// Remove the alias named by the first word of `rest`.
    ///
    /// Remaining entries keep their relative order.
    pub fn remove(&mut self, rest: &[u8]) -> Result<Alias, AliasError> {
        if self.entries.is_empty() {
            return Err(AliasError::TableEmpty);
        }
        let name = rest.split(|&b| b == b' ').next().unwrap_or_default();
        if name.is_empty() {
            return Err(AliasError::MissingName);
        }
        match self.entries.iter().position(|a| a.name == name) {
            Some(index) => Ok(self.entries.remove(index)),
            None => Err(AliasError::NoSuchAlias(
                String::from_utf8_lossy(name).into_owned(),
            )),
        }
    }

    /// Expansion of the first alias named exactly `command`.
    pub fn find(&self, command: &[u8]) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|a| a.name == command)
            .map(|a| a.expansion.as_slice())
    }
}

fn parse_definition(definition: &[u8]) -> Result<(&[u8], &[u8]), AliasError> {
    let eq = definition
        .iter()
        .position(|&b| b == b'=')
        .ok_or(AliasError::MissingEquals)?;
    let name = trim_spaces_end(&definition[..eq]);
    if name.is_empty() {
        return Err(AliasError::EmptyName);
    }
    let expansion = trim_spaces_start(&definition[eq + 1..]);
    if expansion.is_empty() {
        return Err(AliasError::EmptyExpansion);
    }
    Ok((name, expansion))
}

fn trim_spaces_start(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != b' ').unwrap_or(bytes.len());
    &bytes[start..]
}

fn trim_spaces_end(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().rposition(|&b| b != b' ').map_or(0, |i| i + 1);
    &bytes[..end]
}

fn owned(bytes: &[u8]) -> Result<Vec<u8>, AliasError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(bytes.len())
        .map_err(|_| AliasError::OutOfMemory)?;
    buf.extend_from_slice(bytes);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_around_equals() {
        assert_eq!(
            parse_definition(b"ll  =  ls -l").unwrap(),
            (&b"ll"[..], &b"ls -l"[..])
        );
    }

    #[test]
    fn parse_keeps_inner_equals_in_expansion() {
        assert_eq!(
            parse_definition(b"e=x=1").unwrap(),
            (&b"e"[..], &b"x=1"[..])
        );
    }

    #[test]
    fn parse_rejects_blank_sides() {
        assert_eq!(parse_definition(b"   =x"), Err(AliasError::EmptyName));
        assert_eq!(parse_definition(b"x=   "), Err(AliasError::EmptyExpansion));
        assert_eq!(parse_definition(b"x"), Err(AliasError::MissingEquals));
    }

    #[test]
    fn space_trimming_handles_all_blank() {
        assert_eq!(trim_spaces_start(b"   "), b"");
        assert_eq!(trim_spaces_end(b"   "), b"");
        assert_eq!(trim_spaces_end(b" a b "), b" a b");
    }

    #[test]
    fn non_utf8_names_are_matched_bytewise() {
        let mut table = AliasTable::new(4, RedefinePolicy::Replace);
        table.define(b"caf\xe9=coffee").unwrap();
        assert_eq!(table.find(b"caf\xe9"), Some(&b"coffee"[..]));
        assert_eq!(table.find("café".as_bytes()), None);
    }

    #[test]
    fn only_out_of_memory_is_fatal() {
        assert!(AliasError::OutOfMemory.is_fatal());
        assert!(!AliasError::TableFull { capacity: 1 }.is_fatal());
        assert!(!AliasError::NoSuchAlias("x".into()).is_fatal());
    }
}
