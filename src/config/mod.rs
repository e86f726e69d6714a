//! Configuration: `~/.config/cmdrelay/config.toml`, overridden by CLI flags.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, EditorKind, InputConfig, RelayConfig, ScriptConfig};
