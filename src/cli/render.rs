// src/cli/render.rs

//! Turning a dispatch outcome into console text or JSON plus an exit status.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::{
    cli::commands::{self, Comm1, Comm2, Comm3, Command, CommandVisitor, Sum},
    core::constructor::{CommandAbs, CommandError},
};

/// How a dispatch ended, as far as the process exit status is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// A command was built.
    Success,
    /// A command matched but was rejected.
    Invalid,
    /// Nothing matched.
    NoCommand,
}

impl Status {
    /// `0` for success, `1` for a rejected command, `2` when nothing matched.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Invalid => 1,
            Self::NoCommand => 2,
        }
    }
}

/// The text to print plus the status it stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// What to print.
    pub text: String,
    /// How the dispatch ended.
    pub status: Status,
}

impl Rendered {
    fn new(text: impl Into<String>, status: Status) -> Self {
        Self {
            text: text.into(),
            status,
        }
    }
}

/// Console actions for each built-in command.
#[derive(Debug, Default)]
pub struct TextRenderer;

impl CommandVisitor<Rendered> for TextRenderer {
    fn on_absent(&mut self) -> Rendered {
        Rendered::new(t!("cli.outcome.no_command"), Status::NoCommand)
    }

    fn on_invalid(&mut self, error: CommandError) -> Rendered {
        Rendered::new(error.to_string(), Status::Invalid)
    }

    fn on_comm1(&mut self, command: Comm1) -> Rendered {
        Rendered::new(Command::Comm1(command).tag(), Status::Success)
    }

    fn on_comm2(&mut self, command: Comm2) -> Rendered {
        Rendered::new(Command::Comm2(command).tag(), Status::Success)
    }

    fn on_comm3(&mut self, command: Comm3) -> Rendered {
        Rendered::new(command.arg, Status::Success)
    }

    fn on_sum(&mut self, command: Sum) -> Rendered {
        let text = if command.verbose {
            format!(t!("cli.outcome.sum_verbose"), sum = command.total())
        } else {
            format!(t!("cli.outcome.sum"), sum = command.total())
        };
        Rendered::new(text, Status::Success)
    }
}

/// Plain text rendering of an outcome.
pub fn render_text(outcome: CommandAbs<Command>) -> Rendered {
    commands::visit(outcome, &mut TextRenderer)
}

#[derive(Serialize, Debug)]
#[serde(tag = "outcome", rename_all = "lowercase")]
enum JsonOutcome {
    Absent,
    Invalid { messages: Vec<String> },
    Valid { command: Command },
}

/// JSON rendering of an outcome.
pub fn render_json(outcome: CommandAbs<Command>) -> Result<Rendered> {
    let (document, status) = outcome.fold(
        || (JsonOutcome::Absent, Status::NoCommand),
        |error| {
            (
                JsonOutcome::Invalid {
                    messages: error.messages(),
                },
                Status::Invalid,
            )
        },
        |command| (JsonOutcome::Valid { command }, Status::Success),
    );

    let text = serde_json::to_string_pretty(&document).context(t!("cli.error.json"))?;
    Ok(Rendered::new(text, status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cli::commands::builtin_registry, core::tokenizer::tokenize};

    fn outcome(argv: &[&str]) -> CommandAbs<Command> {
        builtin_registry().unwrap().dispatch(&tokenize(argv))
    }

    #[test]
    fn test_render_text_actions() {
        assert_eq!(
            render_text(outcome(&["comm1", "a", "--o1", "x", "--o2", "y"])).text,
            "comm1"
        );
        assert_eq!(
            render_text(outcome(&["comm2", "a", "--o3", "x", "--o4", "y"])).text,
            "comm2"
        );
        assert_eq!(render_text(outcome(&["comm3", "hello", "--req", "x"])).text, "hello");
        assert_eq!(render_text(outcome(&["sum", "2", "4"])).text, "6");
    }

    #[test]
    fn test_render_text_statuses() {
        let absent = render_text(outcome(&["unknown"]));
        assert_eq!(absent.status, Status::NoCommand);
        assert_eq!(absent.status.exit_code(), 2);

        let invalid = render_text(outcome(&["comm1"]));
        assert_eq!(invalid.status, Status::Invalid);
        assert!(invalid.text.starts_with("Invalid number of args"));

        assert_eq!(render_text(outcome(&["sum", "1", "1"])).status.exit_code(), 0);
    }

    #[test]
    fn test_render_json() {
        let rendered = render_json(outcome(&["sum", "a", "b"])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered.text).unwrap();

        assert_eq!(rendered.status, Status::Invalid);
        assert_eq!(
            value,
            serde_json::json!({
                "outcome": "invalid",
                "messages": ["first is not a number", "second is not a number"]
            })
        );

        let rendered = render_json(outcome(&["comm3", "a", "--req", "r"])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered.text).unwrap();
        assert_eq!(value["outcome"], "valid");
        assert_eq!(value["command"]["tag"], "comm3");
        assert_eq!(value["command"]["opt"], serde_json::Value::Null);

        let rendered = render_json(outcome(&[])).unwrap();
        assert_eq!(rendered.text, "{\n  \"outcome\": \"absent\"\n}");
    }
}
