// src/models.rs

//! Data shapes produced by the tokenizer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// --- TOKENIZER MODELS ---

/// One occurrence of an option marker and the values that followed it.
///
/// `--o1 a b` scans to `CommandOption { name: "o1", values: ["a", "b"] }`,
/// a bare `--verbose` to an option with no values.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOption {
    /// The marker without its `--` prefix.
    pub name: String,
    /// Tokens up to the next marker or the end of input.
    pub values: Vec<String>,
}

impl CommandOption {
    /// Starts an option with no values yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }
}

/// Option name to every value given for it, in the order the values were scanned.
///
/// Repeating an option never fails: `--o1 a --o1 b` yields `o1 => [a, b]`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct OptionDict(BTreeMap<String, Vec<String>>);

impl OptionDict {
    /// Creates an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges one scanned option into the dictionary, appending to an existing entry.
    pub fn merge(&mut self, option: CommandOption) {
        self.0.entry(option.name).or_default().extend(option.values);
    }

    /// Whether the option was given at all, with or without values.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// All values collected for `name`, if the option was given.
    pub fn values(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }

    /// The first value of `name`. `None` when the option is missing or was given bare.
    pub fn first_value(&self, name: &str) -> Option<&str> {
        self.values(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Presence check for boolean flags such as `--verbose`.
    pub fn flag(&self, name: &str) -> bool {
        self.contains(name)
    }

    /// Option names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterates `(name, values)` pairs in sorted name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Number of distinct option names.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no option marker was scanned.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<CommandOption> for OptionDict {
    fn from_iter<I: IntoIterator<Item = CommandOption>>(iter: I) -> Self {
        let mut dict = Self::new();
        for option in iter {
            dict.merge(option);
        }
        dict
    }
}

impl<K, V> FromIterator<(K, Vec<V>)> for OptionDict
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Vec<V>)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(name, values)| CommandOption {
                name: name.into(),
                values: values.into_iter().map(Into::into).collect(),
            })
            .collect()
    }
}

// --- PARSED COMMAND ---

/// The `(name, args, opts)` triple produced by the tokenizer.
///
/// `name` is the first token, `args` the tokens between it and the first option
/// marker, and `opts` every option scanned from the whole input.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    /// The first token, or an empty string for empty input.
    pub name: String,
    /// Positional arguments.
    pub args: Vec<String>,
    /// Scanned options, merged by name.
    pub opts: OptionDict,
}

impl ParsedCommand {
    /// Assembles a triple by hand, mostly useful when testing constructors.
    pub fn new<N, A>(name: N, args: A, opts: OptionDict) -> Self
    where
        N: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
            opts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_appends_values_in_encounter_order() {
        let mut dict = OptionDict::new();
        dict.merge(CommandOption {
            name: "o1".into(),
            values: vec!["a".into()],
        });
        dict.merge(CommandOption::new("o2"));
        dict.merge(CommandOption {
            name: "o1".into(),
            values: vec!["b".into(), "c".into()],
        });

        assert_eq!(dict.len(), 2);
        assert_eq!(
            dict.values("o1"),
            Some(&["a".to_string(), "b".to_string(), "c".to_string()][..])
        );
        assert_eq!(dict.values("o2"), Some(&[][..]));
    }

    #[test]
    fn test_first_value_distinguishes_bare_flag_from_missing_option() {
        let dict: OptionDict = [("verbose", Vec::<&str>::new()), ("out", vec!["x.txt"])]
            .into_iter()
            .collect();

        assert!(dict.flag("verbose"));
        assert_eq!(dict.first_value("verbose"), None);
        assert_eq!(dict.first_value("out"), Some("x.txt"));
        assert!(!dict.contains("missing"));
        assert_eq!(dict.names().collect::<Vec<_>>(), vec!["out", "verbose"]);
    }

    #[test]
    fn test_option_dict_serializes_as_plain_object() {
        let dict: OptionDict = [("o1", vec!["a", "b"])].into_iter().collect();
        let json = serde_json::to_string(&dict).unwrap();
        assert_eq!(json, r#"{"o1":["a","b"]}"#);
    }
}
