// src/core/constructor.rs

//! The command-constructor protocol: the three-state outcome, the validation
//! steps and the declarative [`CommandMeta`].

use std::fmt;

use thiserror::Error;

use crate::models::{OptionDict, ParsedCommand};

// --- ERRORS ---

/// Why a matched command could not be constructed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The number of positional args differs from what the command declares.
    #[error("Invalid number of args (expected {expected}, got {actual})")]
    ArityMismatch {
        /// Declared positional arg count.
        expected: usize,
        /// Positional args actually given.
        actual: usize,
    },
    /// A required option was not given.
    #[error("Option {0} is missing")]
    MissingOption(String),
    /// A semantic check inside a command's build function failed.
    #[error("{0}")]
    Build(String),
    /// Several build failures reported together. Always holds two or more errors.
    #[error("{}", join_messages(.0))]
    Aggregate(Vec<CommandError>),
    /// No command answered to this name. Only produced by [`CommandAbs::ok_or_no_match`].
    #[error("Invalid command '{0}'")]
    NoMatch(String),
}

impl CommandError {
    /// Shorthand for [`CommandError::Build`].
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build(message.into())
    }

    /// Folds independent failures into one error.
    ///
    /// Returns `None` when there is nothing to report and the error itself when
    /// there is exactly one. Nested aggregates are flattened.
    pub fn aggregate(errors: impl IntoIterator<Item = Self>) -> Option<Self> {
        let mut flat: Vec<Self> = errors
            .into_iter()
            .flat_map(|error| match error {
                Self::Aggregate(inner) => inner,
                other => vec![other],
            })
            .collect();

        match flat.len() {
            0 | 1 => flat.pop(),
            _ => Some(Self::Aggregate(flat)),
        }
    }

    /// One message per underlying failure.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Aggregate(inner) => inner.iter().flat_map(Self::messages).collect(),
            other => vec![other.to_string()],
        }
    }
}

fn join_messages(errors: &[CommandError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// --- TRI-STATE RESULT ---

/// The outcome of offering a parsed command to one constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandAbs<A> {
    /// The name belongs to some other command. Not an error.
    Absent,
    /// The name matched but validation or the build step failed.
    Invalid(CommandError),
    /// The name matched and the command was built.
    Valid(A),
}

impl<A> CommandAbs<A> {
    /// True for [`CommandAbs::Absent`].
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// True for [`CommandAbs::Invalid`].
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// True for [`CommandAbs::Valid`].
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The error of an invalid outcome.
    pub fn error(&self) -> Option<&CommandError> {
        match self {
            Self::Invalid(error) => Some(error),
            _ => None,
        }
    }

    /// The built command, discarding the distinction between absent and invalid.
    pub fn valid(self) -> Option<A> {
        match self {
            Self::Valid(value) => Some(value),
            _ => None,
        }
    }

    /// Transforms the built command, leaving absent and invalid outcomes untouched.
    pub fn map<B>(self, f: impl FnOnce(A) -> B) -> CommandAbs<B> {
        match self {
            Self::Absent => CommandAbs::Absent,
            Self::Invalid(error) => CommandAbs::Invalid(error),
            Self::Valid(value) => CommandAbs::Valid(f(value)),
        }
    }

    /// Reduces the outcome to a single value, one handler per state.
    pub fn fold<X>(
        self,
        on_absent: impl FnOnce() -> X,
        on_invalid: impl FnOnce(CommandError) -> X,
        on_valid: impl FnOnce(A) -> X,
    ) -> X {
        match self {
            Self::Absent => on_absent(),
            Self::Invalid(error) => on_invalid(error),
            Self::Valid(value) => on_valid(value),
        }
    }

    /// Collapses the outcome into a `Result`, turning `Absent` into
    /// [`CommandError::NoMatch`] for `name`.
    pub fn ok_or_no_match(self, name: &str) -> Result<A, CommandError> {
        self.fold(
            || Err(CommandError::NoMatch(name.to_string())),
            Err,
            Ok,
        )
    }
}

impl<A> From<Result<A, CommandError>> for CommandAbs<A> {
    fn from(result: Result<A, CommandError>) -> Self {
        match result {
            Ok(value) => Self::Valid(value),
            Err(error) => Self::Invalid(error),
        }
    }
}

// --- VALIDATION STEPS ---

/// Gate on the command name: the parsed command itself when it carries `tag`.
pub fn match_name<'a>(tag: &str, parsed: &'a ParsedCommand) -> Option<&'a ParsedCommand> {
    (parsed.name == tag).then_some(parsed)
}

/// Succeeds when exactly `expected` positional args were given.
pub fn ensure_arity(expected: usize, args: &[String]) -> Result<&[String], CommandError> {
    if args.len() == expected {
        Ok(args)
    } else {
        Err(CommandError::ArityMismatch {
            expected,
            actual: args.len(),
        })
    }
}

/// Succeeds when every name in `required` is present in `opts`.
///
/// Names are checked in declaration order and the first missing one is reported.
pub fn ensure_required_options<'a, S: AsRef<str>>(
    required: &[S],
    opts: &'a OptionDict,
) -> Result<&'a OptionDict, CommandError> {
    for name in required {
        let name: &str = name.as_ref();
        if !opts.contains(name) {
            return Err(CommandError::MissingOption(name.to_string()));
        }
    }
    Ok(opts)
}

// --- COMMAND META ---

/// Builds a command from validated positional args and options.
pub type BuildFn<A> = fn(&[String], &OptionDict) -> Result<A, CommandError>;

/// Declarative shape of one command: its tag, how many positional args it
/// takes, which options it cannot do without, and how to build it.
pub struct CommandMeta<A> {
    tag: String,
    arg_count: usize,
    required_options: Vec<String>,
    build: BuildFn<A>,
}

impl<A> CommandMeta<A> {
    /// Declares a command.
    ///
    /// # Panics
    /// If `tag` is empty. A command nobody can name is a programming error.
    pub fn new(
        tag: impl Into<String>,
        arg_count: usize,
        required_options: &[&str],
        build: BuildFn<A>,
    ) -> Self {
        let tag = tag.into();
        assert!(!tag.is_empty(), "a command tag cannot be empty");
        Self {
            tag,
            arg_count,
            required_options: required_options.iter().map(|s| s.to_string()).collect(),
            build,
        }
    }

    /// The name this command answers to.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// How many positional args the command takes.
    pub fn arg_count(&self) -> usize {
        self.arg_count
    }

    /// Options that must be present, in the order they are checked.
    pub fn required_options(&self) -> &[String] {
        &self.required_options
    }

    /// Offers `parsed` to this command.
    ///
    /// # Logic:
    /// 1. A different name yields `Absent`; nothing else runs.
    /// 2. Arity is checked, then required options. The first failure wins.
    /// 3. The build function runs; its error becomes `Invalid`.
    pub fn construct(&self, parsed: &ParsedCommand) -> CommandAbs<A> {
        let Some(parsed) = match_name(&self.tag, parsed) else {
            return CommandAbs::Absent;
        };
        log::trace!("'{}' matched, validating {:?}", self.tag, parsed);

        let result = ensure_arity(self.arg_count, &parsed.args)
            .and_then(|args| {
                ensure_required_options(&self.required_options, &parsed.opts)
                    .map(|opts| (args, opts))
            })
            .and_then(|(args, opts)| (self.build)(args, opts));

        CommandAbs::from(result)
    }
}

impl<A> Clone for CommandMeta<A> {
    fn clone(&self) -> Self {
        Self {
            tag: self.tag.clone(),
            arg_count: self.arg_count,
            required_options: self.required_options.clone(),
            build: self.build,
        }
    }
}

impl<A> fmt::Debug for CommandMeta<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandMeta")
            .field("tag", &self.tag)
            .field("arg_count", &self.arg_count)
            .field("required_options", &self.required_options)
            .finish_non_exhaustive()
    }
}

/// Turns a meta into a standalone constructor function.
pub fn get_constructor<A>(meta: CommandMeta<A>) -> impl Fn(&ParsedCommand) -> CommandAbs<A> {
    move |parsed: &ParsedCommand| meta.construct(parsed)
}
