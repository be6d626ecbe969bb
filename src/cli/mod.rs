// src/cli/mod.rs

//! The `fpcl` command-line shell: flags, settings and rendering around the
//! built-in command registry.

use anyhow::Result;
use clap::Parser;

use crate::core::{
    dispatcher,
    tokenizer::tokenize,
};

pub mod commands;
pub mod render;
pub mod settings;

use render::Rendered;
use settings::{DispatchMode, OutputFormat, Settings};

/// fpcl: parse a command line into a typed command and act on it.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = None,
    styles = clap::builder::Styles::styled()
        .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
        .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Print the outcome as a JSON document.
    #[arg(long)]
    pub json: bool,

    /// How to pick the command: `tag` (default), `ordered` or `parallel`.
    /// Falls back to the FPCL_DISPATCH environment variable.
    #[arg(long, value_name = "MODE")]
    pub dispatch: Option<String>,

    /// Shorthand for `--dispatch parallel`.
    #[arg(long, conflicts_with = "dispatch")]
    pub parallel: bool,

    /// The command line to parse: a command name, its args and `--options`.
    ///
    /// Everything from the first positional token on is taken verbatim,
    /// hyphenated tokens included.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub argv: Vec<String>,
}

/// Resolves settings for `cli` and runs its command line.
pub fn run(cli: &Cli) -> Result<Rendered> {
    let settings = Settings::from_cli(cli)?;
    execute(&cli.argv, &settings)
}

/// Tokenizes `argv`, dispatches it over the built-in commands and renders the outcome.
pub fn execute<S: AsRef<str>>(argv: &[S], settings: &Settings) -> Result<Rendered> {
    let registry = commands::builtin_registry()?;
    let parsed = tokenize(argv);

    let outcome = match settings.dispatch {
        DispatchMode::Tag => registry.dispatch(&parsed),
        DispatchMode::Ordered => dispatcher::dispatch(&parsed, registry.metas()),
        DispatchMode::Parallel => registry.dispatch_parallel(&parsed),
    };

    match settings.output {
        OutputFormat::Text => Ok(render::render_text(outcome)),
        OutputFormat::Json => render::render_json(outcome),
    }
}
