//! Clap-free settings for the dispatch engine.

/// What to do when the engine fails on one path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Log the failure and move on to the next path.
    #[default]
    ContinueOnError,
    /// Stop the batch at the first failure.
    AbortOnError,
}

/// Settings for a dispatch run.
#[derive(Debug, Clone)]
pub struct DispatchSettings {
    pub error_policy: ErrorPolicy,

    /// Run import cleanup after each legacy-mode call.
    pub cleanup_imports: bool,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            error_policy: ErrorPolicy::default(),
            cleanup_imports: true,
        }
    }
}
