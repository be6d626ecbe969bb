// src/core/tokenizer.rs

//! Splitting raw tokens into a command name, positional args and options.

use crate::{
    constants::OPTION_PREFIX,
    models::{CommandOption, OptionDict, ParsedCommand},
};

/// True if `token` is an option marker (`--name`).
pub fn is_option(token: &str) -> bool {
    token.starts_with(OPTION_PREFIX)
}

/// Scans every token left to right and collects the options it finds.
///
/// # Logic:
/// - A marker starts a new option named after the token minus its prefix.
/// - Any other token is a value of the most recently started option.
/// - Tokens seen before the first marker belong to the name and positional
///   args and are skipped here.
///
/// Repeated names produce separate entries; merging happens in [`build_option_dict`].
pub fn scan_options<S: AsRef<str>>(tokens: &[S]) -> Vec<CommandOption> {
    let mut options: Vec<CommandOption> = Vec::new();

    for token in tokens {
        let token: &str = token.as_ref();
        if let Some(name) = token.strip_prefix(OPTION_PREFIX) {
            options.push(CommandOption::new(name));
        } else if let Some(current) = options.last_mut() {
            current.values.push(token.to_string());
        }
    }

    options
}

/// Groups scanned options by name, concatenating their values in scan order.
pub fn build_option_dict(options: Vec<CommandOption>) -> OptionDict {
    options.into_iter().collect()
}

/// The tokens after the command name and before the first option marker.
///
/// A bare token that appears after an option is a value of that option,
/// never a positional argument.
pub fn extract_positional_args<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    tokens
        .iter()
        .skip(1)
        .map(|token| token.as_ref())
        .take_while(|token: &&str| !is_option(token))
        .map(str::to_string)
        .collect()
}

/// Splits a raw argument vector into its `(name, args, opts)` triple.
///
/// Never fails. Empty input yields an empty name with no args and no options.
pub fn tokenize<S: AsRef<str>>(tokens: &[S]) -> ParsedCommand {
    let name = tokens
        .first()
        .map(|token| token.as_ref().to_string())
        .unwrap_or_default();

    let parsed = ParsedCommand {
        name,
        args: extract_positional_args(tokens),
        opts: build_option_dict(scan_options(tokens)),
    };

    log::trace!("Tokenized {} token(s) into {:?}", tokens.len(), parsed);
    parsed
}
