//! Command line handling.
//!
//! ```text
//! argv → Cli (clap) → apply onto Config → SpawnConfig + script source
//! ```

mod script;

use std::path::PathBuf;

use clap::Parser;

use crate::child::SpawnConfig;
use crate::config::{Config, EditorKind};

pub use script::{expand_home, find_script, ScriptFile};

#[derive(Debug, Parser)]
#[command(
    name = "cmdrelay",
    version,
    about = "A macro processing front-end to PROGRAM",
    long_about = "A macro processing front-end to PROGRAM.\n\n\
        Lines typed on stdin are forwarded to PROGRAM's standard input. \
        `alias NAME=EXPAND` defines a command alias, `unalias NAME` removes it, \
        an empty line repeats the last command and `exit` quits. \
        Commands are first read from an initialization script (macro.ini)."
)]
pub struct Cli {
    /// Turn off ENTER key repeats last command
    #[arg(short = 'r', long = "no-repeat")]
    pub no_repeat: bool,

    /// Verbose output (debugging aid)
    #[arg(short, long)]
    pub verbose: bool,

    /// Read initialization commands from SCRIPT instead of searching for macro.ini
    #[arg(short, long, value_name = "SCRIPT", conflicts_with = "no_script")]
    pub script: Option<PathBuf>,

    /// Do not read an initialization script
    #[arg(long)]
    pub no_script: bool,

    /// Use a line editor with history for interactive input
    #[arg(short = 'e', long)]
    pub line_editor: bool,

    /// Config file (default: ~/.config/cmdrelay/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Program to run, followed by its arguments
    #[arg(
        value_name = "PROGRAM",
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

impl Cli {
    /// Fold command line overrides into the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if self.no_repeat {
            config.relay.repeat = false;
        }
        if self.line_editor {
            config.input.editor = EditorKind::LineEditor;
        }
    }

    pub fn spawn_config(&self) -> Option<SpawnConfig> {
        SpawnConfig::from_argv(&self.command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("cmdrelay").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn flags_before_program_belong_to_relay() {
        let cli = parse(&["-rv", "python3", "-i"]);
        assert!(cli.no_repeat);
        assert!(cli.verbose);
        assert_eq!(cli.command, ["python3", "-i"]);
    }

    #[test]
    fn flags_after_program_belong_to_child() {
        let cli = parse(&["gdb", "-v", "--script", "x"]);
        assert!(!cli.verbose);
        assert!(cli.script.is_none());
        assert_eq!(cli.command, ["gdb", "-v", "--script", "x"]);
    }

    #[test]
    fn program_is_required() {
        assert!(Cli::try_parse_from(["cmdrelay", "-v"]).is_err());
    }

    #[test]
    fn script_and_no_script_conflict() {
        assert!(Cli::try_parse_from(["cmdrelay", "-s", "a.ini", "--no-script", "cat"]).is_err());
    }

    #[test]
    fn apply_overrides_config() {
        let cli = parse(&["-r", "-e", "cat"]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert!(!config.relay.repeat);
        assert_eq!(config.input.editor, EditorKind::LineEditor);
    }

    #[test]
    fn spawn_config_splits_command() {
        let cli = parse(&["sh", "-c", "cat"]);
        let spawn = cli.spawn_config().unwrap();
        assert_eq!(spawn.program(), "sh");
        assert_eq!(spawn.args(), ["-c", "cat"]);
    }
}
