//! Error types for dispatch.
//!
//! Capability failures (exit code 1) are handled per path according to the
//! configured [`ErrorPolicy`](crate::settings::ErrorPolicy). Cleanup failures
//! are always logged and dropped.

use crate::imports::ImportError;
use camino::Utf8PathBuf;
use rulefix_types::{CallScope, DispatchReport};
use thiserror::Error;

/// A failure reported by the transformation engine.
#[derive(Debug, Error)]
pub enum CapabilityError {
    /// The engine process could not be started.
    #[error("failed to start engine `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The engine ran and reported failure.
    #[error("engine exited with {status}{}", stderr_suffix(.stderr))]
    Failed { status: String, stderr: String },

    #[error("{0:#}")]
    Other(#[from] anyhow::Error),
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

/// A failure of the import-cleanup step.
#[derive(Debug, Error)]
pub enum CleanupError {
    #[error("cleanup i/o on {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot clean imports in {path}: {source}")]
    Format {
        path: Utf8PathBuf,
        #[source]
        source: ImportError,
    },
}

/// Dispatch stopped early under the abort policy.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("{} call for {path} failed: {source}", .scope.as_str())]
    Aborted {
        path: Utf8PathBuf,
        scope: CallScope,
        #[source]
        source: CapabilityError,
        /// Counts up to and including the failing call.
        report: Box<DispatchReport>,
    },
}

impl DispatchError {
    pub fn report(&self) -> &DispatchReport {
        match self {
            DispatchError::Aborted { report, .. } => report,
        }
    }

    pub fn exit_code(&self) -> u8 {
        1
    }
}
