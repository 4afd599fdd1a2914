//! Default port implementations.

use crate::error::{CapabilityError, CleanupError};
use crate::imports::strip_unused_imports;
use crate::ports::{FixCapability, ImportCleanup};
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::cell::RefCell;
use std::fmt;
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

/// One engine call, as issued by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixCall {
    AllForFile {
        path: Utf8PathBuf,
    },
    AllForDirectory {
        path: Utf8PathBuf,
        ignore_test_files: bool,
    },
    IncludedForFile {
        path: Utf8PathBuf,
        rules: Vec<String>,
    },
    IncludedForDirectory {
        path: Utf8PathBuf,
        rules: Vec<String>,
        ignore_test_files: bool,
    },
    ExcludedForFile {
        path: Utf8PathBuf,
        rules: Vec<String>,
    },
    ExcludedForDirectory {
        path: Utf8PathBuf,
        rules: Vec<String>,
        ignore_test_files: bool,
    },
    Path {
        path: Utf8PathBuf,
    },
}

impl FixCall {
    pub fn path(&self) -> &Utf8Path {
        match self {
            FixCall::AllForFile { path }
            | FixCall::AllForDirectory { path, .. }
            | FixCall::IncludedForFile { path, .. }
            | FixCall::IncludedForDirectory { path, .. }
            | FixCall::ExcludedForFile { path, .. }
            | FixCall::ExcludedForDirectory { path, .. }
            | FixCall::Path { path } => path,
        }
    }

    /// `(scope, mode)` words of the engine command protocol.
    pub fn scope_and_mode(&self) -> (&'static str, &'static str) {
        match self {
            FixCall::AllForFile { .. } => ("file", "all"),
            FixCall::AllForDirectory { .. } => ("directory", "all"),
            FixCall::IncludedForFile { .. } => ("file", "include"),
            FixCall::IncludedForDirectory { .. } => ("directory", "include"),
            FixCall::ExcludedForFile { .. } => ("file", "exclude"),
            FixCall::ExcludedForDirectory { .. } => ("directory", "exclude"),
            FixCall::Path { .. } => ("path", "legacy"),
        }
    }

    fn rules(&self) -> Option<&[String]> {
        match self {
            FixCall::IncludedForFile { rules, .. }
            | FixCall::IncludedForDirectory { rules, .. }
            | FixCall::ExcludedForFile { rules, .. }
            | FixCall::ExcludedForDirectory { rules, .. } => Some(rules),
            _ => None,
        }
    }

    fn ignore_test_files(&self) -> Option<bool> {
        match self {
            FixCall::AllForDirectory {
                ignore_test_files, ..
            }
            | FixCall::IncludedForDirectory {
                ignore_test_files, ..
            }
            | FixCall::ExcludedForDirectory {
                ignore_test_files, ..
            } => Some(*ignore_test_files),
            _ => None,
        }
    }

    /// Arguments appended after the engine program and its leading args.
    ///
    /// `<scope> <mode> <path> [--rules=a,b] [--ignoreTestFiles=bool]`
    pub fn to_args(&self) -> Vec<String> {
        let (scope, mode) = self.scope_and_mode();
        let mut args = vec![scope.to_string(), mode.to_string(), self.path().to_string()];
        if let Some(rules) = self.rules() {
            args.push(format!("--rules={}", rules.join(",")));
        }
        if let Some(ignore) = self.ignore_test_files() {
            args.push(format!("--ignoreTestFiles={ignore}"));
        }
        args
    }
}

impl fmt::Display for FixCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_args().join(" "))
    }
}

/// Receives every [`FixCapability`] entry point as a single [`FixCall`].
///
/// Implementing this is enough to get a `FixCapability`.
pub trait FixCallHandler {
    fn handle(&self, call: FixCall) -> Result<(), CapabilityError>;
}

impl<T: FixCallHandler> FixCapability for T {
    fn fix_all_for_file(&self, path: &Utf8Path) -> Result<(), CapabilityError> {
        self.handle(FixCall::AllForFile {
            path: path.to_path_buf(),
        })
    }

    fn fix_all_for_directory(
        &self,
        path: &Utf8Path,
        ignore_test_files: bool,
    ) -> Result<(), CapabilityError> {
        self.handle(FixCall::AllForDirectory {
            path: path.to_path_buf(),
            ignore_test_files,
        })
    }

    fn fix_included_for_file(
        &self,
        path: &Utf8Path,
        rules: &[String],
    ) -> Result<(), CapabilityError> {
        self.handle(FixCall::IncludedForFile {
            path: path.to_path_buf(),
            rules: rules.to_vec(),
        })
    }

    fn fix_included_for_directory(
        &self,
        path: &Utf8Path,
        rules: &[String],
        ignore_test_files: bool,
    ) -> Result<(), CapabilityError> {
        self.handle(FixCall::IncludedForDirectory {
            path: path.to_path_buf(),
            rules: rules.to_vec(),
            ignore_test_files,
        })
    }

    fn fix_excluded_for_file(
        &self,
        path: &Utf8Path,
        rules: &[String],
    ) -> Result<(), CapabilityError> {
        self.handle(FixCall::ExcludedForFile {
            path: path.to_path_buf(),
            rules: rules.to_vec(),
        })
    }

    fn fix_excluded_for_directory(
        &self,
        path: &Utf8Path,
        rules: &[String],
        ignore_test_files: bool,
    ) -> Result<(), CapabilityError> {
        self.handle(FixCall::ExcludedForDirectory {
            path: path.to_path_buf(),
            rules: rules.to_vec(),
            ignore_test_files,
        })
    }

    fn fix_path(&self, path: &Utf8Path) -> Result<(), CapabilityError> {
        self.handle(FixCall::Path {
            path: path.to_path_buf(),
        })
    }
}

/// Runs an external engine program once per call.
///
/// The engine's stdout is inherited; stderr is captured and attached to the
/// error when the program exits unsuccessfully.
#[derive(Debug, Clone)]
pub struct CommandCapability {
    program: String,
    leading_args: Vec<String>,
}

impl CommandCapability {
    pub fn new(program: impl Into<String>, leading_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            leading_args,
        }
    }

    /// Builds from a `[program, args...]` command line; `None` when empty.
    pub fn from_command_line(command: &[String]) -> Option<Self> {
        let (program, rest) = command.split_first()?;
        Some(Self::new(program.clone(), rest.to_vec()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl FixCallHandler for CommandCapability {
    fn handle(&self, call: FixCall) -> Result<(), CapabilityError> {
        let args = call.to_args();
        debug!(program = %self.program, ?args, "spawning engine");

        let output = Command::new(&self.program)
            .args(&self.leading_args)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| CapabilityError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(CapabilityError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }
}

/// Dry-run engine: prints each call on its own line instead of running it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintCapability;

impl FixCallHandler for PrintCapability {
    fn handle(&self, call: FixCall) -> Result<(), CapabilityError> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{call}").map_err(|e| CapabilityError::Other(e.into()))
    }
}

/// In-memory engine for embedding and testing.
///
/// Records every call in order. Calls for paths registered with
/// [`fail_on`](Self::fail_on) are recorded and then reported as failures.
#[derive(Debug, Default)]
pub struct RecordingCapability {
    calls: RefCell<Vec<FixCall>>,
    failing: Vec<Utf8PathBuf>,
}

impl RecordingCapability {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_on(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.failing.push(path.into());
        self
    }

    pub fn calls(&self) -> Vec<FixCall> {
        self.calls.borrow().clone()
    }
}

impl FixCallHandler for RecordingCapability {
    fn handle(&self, call: FixCall) -> Result<(), CapabilityError> {
        let fails = self.failing.iter().any(|p| p == call.path());
        let path = call.path().to_path_buf();
        self.calls.borrow_mut().push(call);
        if fails {
            Err(CapabilityError::Other(anyhow::anyhow!(
                "simulated failure for {path}"
            )))
        } else {
            Ok(())
        }
    }
}

/// Filesystem-backed import cleanup; rewrites a file only when it changed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceImportCleanup;

impl ImportCleanup for SourceImportCleanup {
    fn clean(&self, path: &Utf8Path) -> Result<bool, CleanupError> {
        let io_err = |source| CleanupError::Io {
            path: path.to_path_buf(),
            source,
        };
        let contents = fs::read_to_string(path).map_err(io_err)?;
        let cleaned = strip_unused_imports(&contents).map_err(|source| CleanupError::Format {
            path: path.to_path_buf(),
            source,
        })?;
        if cleaned == contents {
            return Ok(false);
        }
        fs::write(path, cleaned).map_err(io_err)?;
        Ok(true)
    }
}
