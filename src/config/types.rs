use serde::{Deserialize, Serialize};

use crate::alias::RedefinePolicy;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub script: ScriptConfig,
}

/// Relay loop settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Maximum line length in bytes, terminator included (default: 1024).
    #[serde(default = "default_max_line_len")]
    pub max_line_len: usize,
    /// Maximum number of aliases (default: 1024).
    #[serde(default = "default_alias_capacity")]
    pub alias_capacity: usize,
    /// ENTER on an empty line resends the last command (default: true).
    #[serde(default = "default_repeat")]
    pub repeat: bool,
    /// Behaviour of `alias` for a name that already exists.
    #[serde(default)]
    pub redefine: RedefinePolicy,
}

/// Which interactive front-end to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditorKind {
    /// Read stdin byte by byte; the terminal does the line editing.
    #[default]
    Raw,
    /// Line editor with history.
    LineEditor,
}

/// Interactive input settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default)]
    pub editor: EditorKind,
    /// Prompt shown by the line editor (default: none).
    #[serde(default)]
    pub prompt: String,
    /// History entries kept by the line editor (default: 1000).
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Initialisation script discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptConfig {
    /// Candidate paths, tried in order. A leading `~/` is the home
    /// directory.
    #[serde(default = "default_search_paths")]
    pub search_paths: Vec<String>,
}

fn default_max_line_len() -> usize {
    1024
}

fn default_alias_capacity() -> usize {
    1024
}

fn default_repeat() -> bool {
    true
}

fn default_history_size() -> usize {
    1000
}

fn default_search_paths() -> Vec<String> {
    vec![
        "./macro.ini".to_string(),
        "~/.macro.ini".to_string(),
        "~/.config/macro/macro.ini".to_string(),
    ]
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            max_line_len: default_max_line_len(),
            alias_capacity: default_alias_capacity(),
            repeat: default_repeat(),
            redefine: RedefinePolicy::default(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            editor: EditorKind::default(),
            prompt: String::new(),
            history_size: default_history_size(),
        }
    }
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            search_paths: default_search_paths(),
        }
    }
}
