// src/cli/settings.rs

//! Effective configuration of a run, from flags and the environment.

use anyhow::{Result, anyhow};
use std::{env, str::FromStr};

use crate::{cli::Cli, constants::DISPATCH_ENV_VAR};

/// How the binary picks the command for a parsed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchMode {
    /// Direct lookup by tag.
    #[default]
    Tag,
    /// Every command in registration order, stopping at the first match.
    Ordered,
    /// Every command in registration order, evaluated on the rayon pool.
    Parallel,
}

impl FromStr for DispatchMode {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "tag" => Ok(Self::Tag),
            "ordered" | "sequential" => Ok(Self::Ordered),
            "parallel" => Ok(Self::Parallel),
            _ => Err(anyhow!(t!("settings.error.invalid_dispatch"), value = value)),
        }
    }
}

/// How the outcome is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The per-command console action.
    #[default]
    Text,
    /// A JSON document describing the outcome.
    Json,
}

/// Effective configuration of one `fpcl` run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings {
    /// See [`DispatchMode`].
    pub dispatch: DispatchMode,
    /// See [`OutputFormat`].
    pub output: OutputFormat,
}

impl Settings {
    /// Combines the command-line flags with an optional environment value.
    /// A `--parallel` or `--dispatch` flag wins over the environment.
    pub fn resolve(cli: &Cli, env_dispatch: Option<&str>) -> Result<Self> {
        let dispatch = if cli.parallel {
            DispatchMode::Parallel
        } else {
            match cli.dispatch.as_deref().or(env_dispatch) {
                Some(raw) => raw.parse()?,
                None => DispatchMode::default(),
            }
        };
        let output = if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        let settings = Self { dispatch, output };
        log::debug!("Resolved settings: {:?}", settings);
        Ok(settings)
    }

    /// Resolves settings against the process environment.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let env_dispatch = env::var(DISPATCH_ENV_VAR).ok();
        Self::resolve(cli, env_dispatch.as_deref())
    }
}
