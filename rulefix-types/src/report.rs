use crate::plan::DispatchMode;
use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which kind of entry point a call targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallScope {
    File,
    Directory,
    /// Legacy single entry point; file and directory are not distinguished.
    Path,
}

impl CallScope {
    pub fn as_str(self) -> &'static str {
        match self {
            CallScope::File => "file",
            CallScope::Directory => "directory",
            CallScope::Path => "path",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathFailure {
    pub path: Utf8PathBuf,
    pub scope: CallScope,
    pub message: String,
}

/// Outcome of one dispatch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchReport {
    pub schema: String,
    pub mode: DispatchMode,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,

    pub attempted: u64,
    pub succeeded: u64,
    pub failed: u64,

    /// True when the run stopped before the last path.
    #[serde(default)]
    pub aborted: bool,

    #[serde(default)]
    pub failures: Vec<PathFailure>,

    #[serde(default)]
    pub cleanup_failures: Vec<PathFailure>,
}

impl DispatchReport {
    pub fn new(mode: DispatchMode) -> Self {
        Self {
            schema: crate::schema::RULEFIX_REPORT_V1.to_string(),
            mode,
            started_at: None,
            ended_at: None,
            attempted: 0,
            succeeded: 0,
            failed: 0,
            aborted: false,
            failures: vec![],
            cleanup_failures: vec![],
        }
    }

    pub fn record_success(&mut self) {
        self.attempted += 1;
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self, failure: PathFailure) {
        self.attempted += 1;
        self.failed += 1;
        self.failures.push(failure);
    }

    /// True when at least one call was made and none succeeded.
    pub fn all_failed(&self) -> bool {
        self.attempted > 0 && self.succeeded == 0
    }
}
