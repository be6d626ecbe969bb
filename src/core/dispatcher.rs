// src/core/dispatcher.rs

//! Offering a parsed command to a list of constructors, sequentially, on the
//! rayon pool, or by tag through a [`Registry`].

use rayon::prelude::*;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

use crate::{
    core::{
        constructor::{CommandAbs, CommandMeta},
        tokenizer,
    },
    models::ParsedCommand,
};

/// Offers `parsed` to each constructor in list order and returns the first
/// outcome that is not `Absent`.
///
/// Constructors after the first match are never run, so with duplicate tags the
/// earlier one silently wins.
pub fn dispatch<A>(parsed: &ParsedCommand, constructors: &[CommandMeta<A>]) -> CommandAbs<A> {
    log::debug!(
        "Dispatching '{}' against {} command(s)",
        parsed.name,
        constructors.len()
    );

    let winner = constructors
        .iter()
        .map(|meta| (meta.tag(), meta.construct(parsed)))
        .find(|(_, outcome)| !outcome.is_absent());

    settle(winner)
}

/// Same contract as [`dispatch`], with every constructor evaluated on the rayon pool.
///
/// The winner is the first non-absent outcome in list order, not the first one
/// to finish.
pub fn dispatch_parallel<A: Send>(
    parsed: &ParsedCommand,
    constructors: &[CommandMeta<A>],
) -> CommandAbs<A> {
    log::debug!(
        "Dispatching '{}' in parallel against {} command(s)",
        parsed.name,
        constructors.len()
    );

    let winner = constructors
        .par_iter()
        .map(|meta| (meta.tag(), meta.construct(parsed)))
        .find_first(|(_, outcome)| !outcome.is_absent());

    settle(winner)
}

fn settle<A>(winner: Option<(&str, CommandAbs<A>)>) -> CommandAbs<A> {
    match winner {
        Some((tag, outcome)) => {
            log::debug!(
                "Command '{}' answered ({})",
                tag,
                if outcome.is_valid() { "valid" } else { "invalid" }
            );
            outcome
        }
        None => {
            log::debug!("No command answered");
            CommandAbs::Absent
        }
    }
}

// --- REGISTRY ---

/// Errors raised while building a [`Registry`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two commands were declared with the same tag.
    #[error("A command tagged '{0}' is already registered.")]
    DuplicateTag(String),
}

/// An ordered set of commands with unique tags.
///
/// Registration order is kept for [`Registry::dispatch_ordered`] and
/// [`Registry::dispatch_parallel`]; [`Registry::dispatch`] goes straight to the
/// command by tag.
pub struct Registry<A> {
    metas: Vec<CommandMeta<A>>,
    index: HashMap<String, usize>,
}

impl<A> Registry<A> {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            metas: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Builds a registry from metas in order, failing on the first duplicate tag.
    pub fn from_metas(
        metas: impl IntoIterator<Item = CommandMeta<A>>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for meta in metas {
            registry.register(meta)?;
        }
        Ok(registry)
    }

    /// Adds a command. A tag that is already taken is rejected and the registry
    /// is left unchanged.
    pub fn register(&mut self, meta: CommandMeta<A>) -> Result<(), RegistryError> {
        if self.index.contains_key(meta.tag()) {
            return Err(RegistryError::DuplicateTag(meta.tag().to_string()));
        }
        log::trace!("Registering command '{}'", meta.tag());
        self.index.insert(meta.tag().to_string(), self.metas.len());
        self.metas.push(meta);
        Ok(())
    }

    /// The command registered under `tag`.
    pub fn get(&self, tag: &str) -> Option<&CommandMeta<A>> {
        self.index.get(tag).and_then(|&i| self.metas.get(i))
    }

    /// Tags in registration order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.metas.iter().map(CommandMeta::tag)
    }

    /// All commands in registration order.
    pub fn metas(&self) -> &[CommandMeta<A>] {
        &self.metas
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.metas.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.metas.is_empty()
    }

    /// Looks the command up by name and constructs it.
    pub fn dispatch(&self, parsed: &ParsedCommand) -> CommandAbs<A> {
        match self.get(&parsed.name) {
            Some(meta) => {
                log::debug!("Dispatching '{}' by tag", parsed.name);
                meta.construct(parsed)
            }
            None => {
                log::debug!("No command registered for '{}'", parsed.name);
                CommandAbs::Absent
            }
        }
    }

    /// Tries every command in registration order.
    pub fn dispatch_ordered(&self, parsed: &ParsedCommand) -> CommandAbs<A> {
        dispatch(parsed, &self.metas)
    }

    /// Tokenizes `tokens` and dispatches the result by tag.
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> CommandAbs<A> {
        self.dispatch(&tokenizer::tokenize(tokens))
    }
}

impl<A: Send> Registry<A> {
    /// Tries every command in registration order on the rayon pool.
    pub fn dispatch_parallel(&self, parsed: &ParsedCommand) -> CommandAbs<A> {
        dispatch_parallel(parsed, &self.metas)
    }
}

impl<A> Default for Registry<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for Registry<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("metas", &self.metas)
            .finish()
    }
}
