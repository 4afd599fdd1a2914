//! Library half of the rulefix binary.
//!
//! Exposes `rulefix.toml` loading so embedders and the acceptance suite can
//! build the same merged configuration the CLI uses, and the argv routing that
//! lets CLI flags and fix options share one command line.

pub mod argv;
pub mod config;
