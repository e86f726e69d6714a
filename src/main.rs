use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use cmdrelay::args::{find_script, Cli, ScriptFile};
use cmdrelay::child::ChildSession;
use cmdrelay::config::{Config, EditorKind};
use cmdrelay::console::Console;
use cmdrelay::input::{EditorSource, InputSource, RawSource, SourceSwitcher};
use cmdrelay::logging::init_tracing;
use cmdrelay::relay::RelayEngine;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("cmdrelay: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    cli.apply(&mut config);
    let spawn = cli
        .spawn_config()
        .ok_or_else(|| anyhow!("no program given"))?;

    let mut console = Console::stdio();
    console.raw(&format!("\ncmdrelay v{}\n\n", env!("CARGO_PKG_VERSION")));
    tracing::debug!(program = spawn.program(), args = ?spawn.args(), "starting");

    let max_line_len = config.relay.max_line_len;
    let script: Option<Box<dyn InputSource>> = match open_script(cli, &config)? {
        Some(script) => {
            console.say(format_args!(
                "reading commands from \"{}\"",
                script.path.display()
            ));
            Some(Box::new(RawSource::from_file(script.file, max_line_len)))
        }
        None => None,
    };
    let interactive: Box<dyn InputSource> = match config.input.editor {
        EditorKind::Raw => Box::new(RawSource::stdin(max_line_len)),
        EditorKind::LineEditor => Box::new(
            EditorSource::new(&config.input, max_line_len).context("cannot start line editor")?,
        ),
    };
    let mut input = SourceSwitcher::new(script, interactive);

    let child = ChildSession::spawn(&spawn)?;
    tracing::debug!(pid = child.id(), "relaying input");

    let mut engine = RelayEngine::new(&config.relay, child, console);
    let outcome = engine.run(&mut input);

    match engine.into_child().shutdown() {
        Ok(status) => tracing::debug!(%status, "child finished"),
        Err(err) => tracing::warn!(error = %err, "cannot reap child"),
    }

    Ok(match outcome {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    })
}

fn open_script(cli: &Cli, config: &Config) -> Result<Option<ScriptFile>> {
    if cli.no_script {
        return Ok(None);
    }
    match &cli.script {
        Some(path) => ScriptFile::open(path)
            .map(Some)
            .with_context(|| format!("cannot open script \"{}\"", path.display())),
        None => Ok(find_script(&config.script.search_paths)),
    }
}
