// src/cli/commands.rs

//! The example commands shipped with the `fpcl` binary.

use lazy_static::lazy_static;
use serde::Serialize;

use crate::{
    core::{
        constructor::{CommandAbs, CommandError, CommandMeta},
        dispatcher::{Registry, RegistryError},
    },
    models::OptionDict,
};

// --- COMMAND VALUES ---

/// `comm1 <arg> --o1 <value> --o2 <value>`
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Comm1 {
    /// The single positional arg.
    pub arg: String,
    /// First value of `--o1`.
    pub o1: String,
    /// First value of `--o2`.
    pub o2: String,
}

/// `comm2 <arg> --o3 <value> --o4 <value>`
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Comm2 {
    /// The single positional arg.
    pub arg: String,
    /// First value of `--o3`.
    pub o3: String,
    /// First value of `--o4`.
    pub o4: String,
}

/// `comm3 <arg> --req <value> [--opt <values>...]`
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Comm3 {
    /// The single positional arg.
    pub arg: String,
    /// First value of `--req`.
    pub req: String,
    /// Every value of `--opt`, when given.
    pub opt: Option<Vec<String>>,
}

/// `sum <n1> <n2> [--verbose]`
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Sum {
    /// Left operand.
    pub n1: f64,
    /// Right operand.
    pub n2: f64,
    /// Set by `--verbose`.
    pub verbose: bool,
}

impl Sum {
    /// `n1 + n2`.
    pub fn total(&self) -> f64 {
        self.n1 + self.n2
    }
}

/// Every command the binary understands.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "tag", rename_all = "lowercase")]
pub enum Command {
    /// See [`Comm1`].
    Comm1(Comm1),
    /// See [`Comm2`].
    Comm2(Comm2),
    /// See [`Comm3`].
    Comm3(Comm3),
    /// See [`Sum`].
    Sum(Sum),
}

impl Command {
    /// The tag the command was registered under.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Comm1(_) => "comm1",
            Self::Comm2(_) => "comm2",
            Self::Comm3(_) => "comm3",
            Self::Sum(_) => "sum",
        }
    }

    /// Hands the concrete command to the matching visitor method.
    pub fn accept<X, V: CommandVisitor<X> + ?Sized>(self, visitor: &mut V) -> X {
        match self {
            Self::Comm1(c) => visitor.on_comm1(c),
            Self::Comm2(c) => visitor.on_comm2(c),
            Self::Comm3(c) => visitor.on_comm3(c),
            Self::Sum(c) => visitor.on_sum(c),
        }
    }
}

// --- FOLD ---

/// One handler per outcome state and per concrete command.
pub trait CommandVisitor<X> {
    /// No command answered to the name.
    fn on_absent(&mut self) -> X;
    /// A command matched but could not be built.
    fn on_invalid(&mut self, error: CommandError) -> X;
    /// A valid `comm1`.
    fn on_comm1(&mut self, command: Comm1) -> X;
    /// A valid `comm2`.
    fn on_comm2(&mut self, command: Comm2) -> X;
    /// A valid `comm3`.
    fn on_comm3(&mut self, command: Comm3) -> X;
    /// A valid `sum`.
    fn on_sum(&mut self, command: Sum) -> X;
}

/// Reduces a dispatch outcome with `visitor`.
pub fn visit<X, V: CommandVisitor<X> + ?Sized>(
    outcome: CommandAbs<Command>,
    visitor: &mut V,
) -> X {
    match outcome {
        CommandAbs::Absent => visitor.on_absent(),
        CommandAbs::Invalid(error) => visitor.on_invalid(error),
        CommandAbs::Valid(command) => command.accept(visitor),
    }
}

// --- BUILD FUNCTIONS ---

fn single_arg(args: &[String]) -> Result<String, CommandError> {
    match args {
        [arg] => Ok(arg.clone()),
        _ => Err(CommandError::ArityMismatch {
            expected: 1,
            actual: args.len(),
        }),
    }
}

/// The first value of a required option, which must not be empty.
fn required_value(opts: &OptionDict, name: &str) -> Result<String, CommandError> {
    match opts.first_value(name) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(CommandError::build(format!(
            "Option {} needs a non-empty value",
            name
        ))),
    }
}

/// Operands must be finite: `inf`, `infinity` and `NaN` are rejected.
fn parse_number(raw: &str, message: &str) -> Result<f64, CommandError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| CommandError::build(message))
}

fn build_comm1(args: &[String], opts: &OptionDict) -> Result<Command, CommandError> {
    Ok(Command::Comm1(Comm1 {
        arg: single_arg(args)?,
        o1: required_value(opts, "o1")?,
        o2: required_value(opts, "o2")?,
    }))
}

fn build_comm2(args: &[String], opts: &OptionDict) -> Result<Command, CommandError> {
    Ok(Command::Comm2(Comm2 {
        arg: single_arg(args)?,
        o3: required_value(opts, "o3")?,
        o4: required_value(opts, "o4")?,
    }))
}

fn build_comm3(args: &[String], opts: &OptionDict) -> Result<Command, CommandError> {
    Ok(Command::Comm3(Comm3 {
        arg: single_arg(args)?,
        req: required_value(opts, "req")?,
        opt: opts.values("opt").map(<[String]>::to_vec),
    }))
}

/// Both operands are checked so that two bad numbers are reported together.
fn build_sum(args: &[String], opts: &OptionDict) -> Result<Command, CommandError> {
    let [first, second] = args else {
        return Err(CommandError::ArityMismatch {
            expected: 2,
            actual: args.len(),
        });
    };

    match (
        parse_number(first, "first is not a number"),
        parse_number(second, "second is not a number"),
    ) {
        (Ok(n1), Ok(n2)) => Ok(Command::Sum(Sum {
            n1,
            n2,
            verbose: opts.flag("verbose"),
        })),
        (Err(error), Ok(_)) | (Ok(_), Err(error)) => Err(error),
        (Err(e1), Err(e2)) => Err(CommandError::Aggregate(vec![e1, e2])),
    }
}

// --- REGISTRY ---

/// The metas of every built-in command, in dispatch order.
pub fn builtin_metas() -> Vec<CommandMeta<Command>> {
    vec![
        CommandMeta::new("comm1", 1, &["o1", "o2"], build_comm1),
        CommandMeta::new("comm2", 1, &["o3", "o4"], build_comm2),
        CommandMeta::new("comm3", 1, &["req"], build_comm3),
        CommandMeta::new("sum", 2, &[], build_sum),
    ]
}

lazy_static! {
    static ref BUILTIN_REGISTRY: Result<Registry<Command>, RegistryError> =
        Registry::from_metas(builtin_metas());
}

/// The shared registry of built-in commands.
pub fn builtin_registry() -> Result<&'static Registry<Command>, RegistryError> {
    BUILTIN_REGISTRY.as_ref().map_err(Clone::clone)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tokenizer::tokenize;

    fn parse(argv: &[&str]) -> CommandAbs<Command> {
        builtin_registry().unwrap().dispatch(&tokenize(argv))
    }

    struct TagVisitor;

    impl CommandVisitor<String> for TagVisitor {
        fn on_absent(&mut self) -> String {
            "none".into()
        }
        fn on_invalid(&mut self, error: CommandError) -> String {
            format!("error: {}", error)
        }
        fn on_comm1(&mut self, _: Comm1) -> String {
            "command1".into()
        }
        fn on_comm2(&mut self, _: Comm2) -> String {
            "command2".into()
        }
        fn on_comm3(&mut self, _: Comm3) -> String {
            "command3".into()
        }
        fn on_sum(&mut self, _: Sum) -> String {
            "sum".into()
        }
    }

    #[test]
    fn test_builtin_registry_has_unique_tags() {
        let registry = builtin_registry().unwrap();
        assert_eq!(
            registry.tags().collect::<Vec<_>>(),
            vec!["comm1", "comm2", "comm3", "sum"]
        );
    }

    #[test]
    fn test_comm1_with_options_in_any_order() {
        let outcome = parse(&[
            "comm1",
            "arg2",
            "--o2",
            "someoption22",
            "--o1",
            "someoption11",
        ]);

        assert_eq!(
            outcome,
            CommandAbs::Valid(Command::Comm1(Comm1 {
                arg: "arg2".into(),
                o1: "someoption11".into(),
                o2: "someoption22".into(),
            }))
        );
    }

    #[test]
    fn test_comm1_rejects_empty_option_value() {
        let outcome = parse(&["comm1", "arg", "--o1", "--o2", "x"]);

        assert_eq!(
            outcome.error().map(ToString::to_string),
            Some("Option o1 needs a non-empty value".to_string())
        );
    }

    #[test]
    fn test_comm3_optional_option() {
        let without = parse(&["comm3", "a", "--req", "r"]);
        let with = parse(&["comm3", "a", "--req", "r", "--opt", "x", "y"]);

        assert_eq!(
            without,
            CommandAbs::Valid(Command::Comm3(Comm3 {
                arg: "a".into(),
                req: "r".into(),
                opt: None,
            }))
        );
        assert_eq!(
            with.valid().map(|c| match c {
                Command::Comm3(c) => c.opt,
                _ => None,
            }),
            Some(Some(vec!["x".to_string(), "y".to_string()]))
        );
    }

    #[test]
    fn test_sum() {
        let outcome = parse(&["sum", "2", "4", "--verbose"]);

        assert_eq!(
            outcome,
            CommandAbs::Valid(Command::Sum(Sum {
                n1: 2.0,
                n2: 4.0,
                verbose: true,
            }))
        );
    }

    #[test]
    fn test_sum_reports_both_bad_operands() {
        let outcome = parse(&["sum", "a", "b"]);
        let messages = outcome.error().map(CommandError::messages).unwrap();

        assert_eq!(
            messages,
            vec!["first is not a number", "second is not a number"]
        );

        let outcome = parse(&["sum", "1", "NaN"]);
        assert_eq!(
            outcome,
            CommandAbs::Invalid(CommandError::build("second is not a number"))
        );
    }

    #[test]
    fn test_sum_rejects_non_finite_and_empty_operands() {
        for operand in ["inf", "-inf", "infinity", "", "  "] {
            assert_eq!(
                parse(&["sum", operand, "1"]),
                CommandAbs::Invalid(CommandError::build("first is not a number")),
                "operand {:?}",
                operand
            );
        }

        assert_eq!(
            parse(&["sum", " 1.5 ", "-2"]).valid().map(|c| match c {
                Command::Sum(sum) => sum.total(),
                _ => f64::NAN,
            }),
            Some(-0.5)
        );
    }

    #[test]
    fn test_visit_per_command() {
        let cases = [
            (vec!["comm1", "a", "--o1", "x", "--o2", "y"], "command1"),
            (vec!["comm2", "a", "--o3", "x", "--o4", "y"], "command2"),
            (vec!["comm3", "a", "--req", "x"], "command3"),
            (vec!["sum", "1", "2"], "sum"),
            (vec!["comm9"], "none"),
            (vec!["comm2", "a"], "error: Option o3 is missing"),
        ];

        for (argv, expected) in cases {
            assert_eq!(visit(parse(&argv), &mut TagVisitor), expected);
        }
    }

    #[test]
    fn test_command_serializes_with_tag() {
        let command = Command::Comm1(Comm1 {
            arg: "arg".into(),
            o1: "asd".into(),
            o2: "qewr".into(),
        });

        let json = serde_json::to_value(&command).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"tag": "comm1", "arg": "arg", "o1": "asd", "o2": "qewr"})
        );
        assert_eq!(command.tag(), "comm1");
    }
}
