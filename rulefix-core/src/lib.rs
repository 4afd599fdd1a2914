//! Embeddable core library for rulefix.
//!
//! Provides a clap-free entry point that takes a validated
//! [`ExecutionPlan`](rulefix_types::ExecutionPlan) and fans it out over an
//! external transformation engine.
//!
//! # Port traits
//!
//! Everything the dispatcher touches is abstracted behind port traits in [`ports`]:
//! - [`FixCapability`](ports::FixCapability): the rule engine entry points
//! - [`ImportCleanup`](ports::ImportCleanup): unused-import removal (legacy mode)
//!
//! The [`adapters`] module provides process-backed, printing and in-memory
//! implementations.
//!
//! # Entry points
//!
//! - [`build_plan`]: parse and validate a raw command line
//! - [`dispatch::Dispatcher::run`]: execute a plan

pub mod adapters;
pub mod dispatch;
pub mod error;
pub mod imports;
pub mod ports;
pub mod settings;

pub use dispatch::Dispatcher;
pub use error::{CapabilityError, CleanupError, DispatchError};
pub use settings::{DispatchSettings, ErrorPolicy};

// Re-export the domain entry types so embedders don't need rulefix-domain directly.
pub use rulefix_domain::{ConfigError, FsPathProbe, PathProbe, Validator, ValidatorConfig};

use rulefix_types::ExecutionPlan;

/// Parses and validates `args` against the filesystem.
pub fn build_plan<I, S>(args: I, config: ValidatorConfig) -> Result<ExecutionPlan, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Validator::new(config).build_plan(args, &FsPathProbe)
}
