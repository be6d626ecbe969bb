// src/constants.rs

//! Crate-wide constants.

/// The prefix that turns a token into an option marker (`--name`).
pub const OPTION_PREFIX: &str = "--";

/// Environment variable selecting how the binary dispatches (`sequential` or `parallel`).
pub const DISPATCH_ENV_VAR: &str = "FPCL_DISPATCH";

/// The console language baked in by `build.rs`.
pub const LANGUAGE: &str = env!("FPCL_LANG_EFFECTIVE");
