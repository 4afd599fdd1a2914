//! Configuration errors raised before any engine call is made.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Why a file argument was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidFileReason {
    #[error("expected a file ending in `{expected}`")]
    WrongSuffix { expected: String },

    #[error("file is not readable")]
    NotReadable,

    #[error("file is not writable")]
    NotWritable,
}

/// A command line that cannot be turned into an execution plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("no paths given: pass at least one file or directory")]
    NoPaths,

    #[error("path not found: {path}")]
    PathNotFound { path: Utf8PathBuf },

    #[error("invalid file {path}: {reason}")]
    InvalidFile {
        path: Utf8PathBuf,
        reason: InvalidFileReason,
    },

    #[error("mutually exclusive rule options: --rules and --excludeRules cannot both be set")]
    MutuallyExclusiveRules,
}

impl ConfigError {
    /// Configuration errors always exit with code 2.
    pub fn exit_code(&self) -> u8 {
        2
    }
}
