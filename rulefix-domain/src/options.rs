//! Splits raw arguments into path tokens and `--name=value` options.
//!
//! Parsing never fails: unknown flags are kept but never consulted, and
//! malformed boolean values fall back to `false`.

use camino::Utf8PathBuf;
use rulefix_types::OrderedSet;
use std::collections::BTreeMap;

/// Tokens starting with this prefix are options, everything else is a path.
pub const FLAG_PREFIX: &str = "--";

/// Option names understood by the validator.
pub mod flags {
    pub const RULES: &str = "rules";
    pub const EXCLUDE_RULES: &str = "excludeRules";
    pub const IGNORE_TEST_FILES: &str = "ignoreTestFiles";
}

/// Positional path tokens, de-duplicated in first-occurrence order.
pub type PathArguments = OrderedSet<Utf8PathBuf>;

/// Raw option values keyed by flag name.
///
/// A bare `--name` is stored without a value. When a flag repeats, the first
/// occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedOptions {
    values: BTreeMap<String, Option<String>>,
}

impl ParsedOptions {
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Raw value of `name`; `None` when the flag is absent or bare.
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(|v| v.as_deref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Comma-separated list value of `name`; empty when absent.
    pub fn list(&self, name: &str) -> OrderedSet<String> {
        self.raw(name).map(split_list).unwrap_or_default()
    }

    /// Boolean value of `name`, or `default` when the flag is absent.
    pub fn boolean(&self, name: &str, default: bool) -> bool {
        match self.values.get(name) {
            Some(value) => parse_permissive_bool(value.as_deref().unwrap_or("")),
            None => default,
        }
    }

    fn insert(&mut self, name: &str, value: Option<&str>) {
        self.values
            .entry(name.to_string())
            .or_insert_with(|| value.map(str::to_string));
    }
}

/// Only a case-insensitive `true` is true. Anything else, empty included, is false.
pub fn parse_permissive_bool(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("true")
}

/// Splits `raw` on commas, dropping empty segments and repeats.
pub fn split_list(raw: &str) -> OrderedSet<String> {
    raw.split(',')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits the argument list into paths and options.
pub fn parse_args<I, S>(args: I) -> (PathArguments, ParsedOptions)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut paths = PathArguments::new();
    let mut options = ParsedOptions::default();

    for arg in args {
        let arg = arg.as_ref();
        match arg.strip_prefix(FLAG_PREFIX) {
            Some(flag) => match flag.split_once('=') {
                Some((name, value)) => options.insert(name, Some(value)),
                None => options.insert(flag, None),
            },
            None => {
                paths.insert(Utf8PathBuf::from(arg));
            }
        }
    }

    (paths, options)
}
