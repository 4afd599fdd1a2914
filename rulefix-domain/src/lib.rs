//! Domain logic: turn a raw command line into a validated execution plan.
//!
//! This crate owns *what* will be dispatched and in which mode. It does not
//! invoke the transformation engine; that's the `rulefix-core` crate.

mod classify;
mod error;
mod options;
mod ports;
mod validate;

pub use classify::{Classification, ProbedPath, classify};
pub use error::{ConfigError, InvalidFileReason};
pub use options::{
    FLAG_PREFIX, ParsedOptions, PathArguments, flags, parse_args, parse_permissive_bool,
    split_list,
};
pub use ports::{FsPathProbe, PathProbe};
pub use validate::{DEFAULT_SOURCE_SUFFIX, Validator, ValidatorConfig, resolve_rule_selection};
