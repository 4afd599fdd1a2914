//! Shared DTOs for the rulefix workspace.
//!
//! # Design constraints
//! - Plans and reports are serialized to disk or stdout.
//! - Every value here is built once and never mutated afterwards.
//! - Prefer adding optional fields over changing semantics.

pub mod ordered;
pub mod paths;
pub mod plan;
pub mod report;

pub use ordered::OrderedSet;
pub use paths::{ClassifiedPath, ClassifiedPaths, PathKind};
pub use plan::{DispatchMode, ExecutionPlan, RuleSelection};
pub use report::{CallScope, DispatchReport, PathFailure};

/// Schema identifiers.
pub mod schema {
    pub const RULEFIX_PLAN_V1: &str = "rulefix.plan.v1";
    pub const RULEFIX_REPORT_V1: &str = "rulefix.report.v1";
}
