//! fpcl: split an argument vector into a name, positional args and options,
//! then hand the result to declarative, typed command constructors.

include!(concat!(env!("OUT_DIR"), "/translations.rs"));

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;

pub use crate::core::constructor::{CommandAbs, CommandError, CommandMeta};
pub use crate::core::dispatcher::{Registry, RegistryError};
pub use crate::core::tokenizer::tokenize;
pub use crate::models::{CommandOption, OptionDict, ParsedCommand};
