//! Fans an execution plan out over the transformation engine.
//!
//! The mode is picked once from the plan. Directories are dispatched first,
//! then files, each in plan order. Legacy plans make one pass in input order
//! through the single entry point, followed by import cleanup.

use crate::error::{CapabilityError, DispatchError};
use crate::ports::{FixCapability, ImportCleanup};
use crate::settings::{DispatchSettings, ErrorPolicy};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use rulefix_types::{CallScope, DispatchReport, ExecutionPlan, PathFailure, RuleSelection};
use tracing::{debug, info, warn};

pub struct Dispatcher<'a> {
    capability: &'a dyn FixCapability,
    cleanup: &'a dyn ImportCleanup,
    settings: DispatchSettings,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        capability: &'a dyn FixCapability,
        cleanup: &'a dyn ImportCleanup,
        settings: DispatchSettings,
    ) -> Self {
        Self {
            capability,
            cleanup,
            settings,
        }
    }

    /// Runs every call the plan implies.
    ///
    /// Under [`ErrorPolicy::AbortOnError`] the first engine failure stops the
    /// run and is returned with the partial report.
    pub fn run(&self, plan: &ExecutionPlan) -> Result<DispatchReport, DispatchError> {
        let mut report = DispatchReport::new(plan.mode());
        report.started_at = Some(Utc::now());
        info!(
            mode = %plan.mode(),
            paths = plan.paths().len(),
            ignore_test_files = plan.ignore_test_files(),
            "dispatching"
        );

        let result = match plan.rule_selection() {
            Some(selection) => self.run_selection(plan, selection, &mut report),
            None => self.run_legacy(plan, &mut report),
        };

        report.ended_at = Some(Utc::now());
        match result {
            Ok(()) => Ok(report),
            Err(Abort {
                path,
                scope,
                source,
            }) => {
                report.aborted = true;
                Err(DispatchError::Aborted {
                    path,
                    scope,
                    source,
                    report: Box::new(report),
                })
            }
        }
    }

    fn run_selection(
        &self,
        plan: &ExecutionPlan,
        selection: &RuleSelection,
        report: &mut DispatchReport,
    ) -> Result<(), Abort> {
        let cap = self.capability;
        let ignore = plan.ignore_test_files();

        for dir in plan.paths().directories() {
            self.invoke(report, CallScope::Directory, dir, || match selection {
                RuleSelection::AllRules => cap.fix_all_for_directory(dir, ignore),
                RuleSelection::IncludeOnly(rules) => {
                    cap.fix_included_for_directory(dir, rules.as_slice(), ignore)
                }
                RuleSelection::ExcludeOnly(rules) => {
                    cap.fix_excluded_for_directory(dir, rules.as_slice(), ignore)
                }
            })?;
        }

        for file in plan.paths().files() {
            self.invoke(report, CallScope::File, file, || match selection {
                RuleSelection::AllRules => cap.fix_all_for_file(file),
                RuleSelection::IncludeOnly(rules) => {
                    cap.fix_included_for_file(file, rules.as_slice())
                }
                RuleSelection::ExcludeOnly(rules) => {
                    cap.fix_excluded_for_file(file, rules.as_slice())
                }
            })?;
        }

        Ok(())
    }

    fn run_legacy(&self, plan: &ExecutionPlan, report: &mut DispatchReport) -> Result<(), Abort> {
        for entry in plan.paths().entries() {
            let path = entry.path.as_path();
            self.invoke(report, CallScope::Path, path, || {
                self.capability.fix_path(path)
            })?;

            if self.settings.cleanup_imports {
                match self.cleanup.clean(path) {
                    Ok(changed) => debug!(path = path.as_str(), changed, "import cleanup"),
                    Err(err) => {
                        warn!(path = path.as_str(), "import cleanup failed: {err}");
                        report.cleanup_failures.push(PathFailure {
                            path: path.to_path_buf(),
                            scope: CallScope::Path,
                            message: err.to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn invoke(
        &self,
        report: &mut DispatchReport,
        scope: CallScope,
        path: &Utf8Path,
        call: impl FnOnce() -> Result<(), CapabilityError>,
    ) -> Result<(), Abort> {
        debug!(path = path.as_str(), scope = scope.as_str(), "engine call");
        match call() {
            Ok(()) => {
                report.record_success();
                Ok(())
            }
            Err(source) => {
                report.record_failure(PathFailure {
                    path: path.to_path_buf(),
                    scope,
                    message: source.to_string(),
                });
                match self.settings.error_policy {
                    ErrorPolicy::ContinueOnError => {
                        warn!(
                            path = path.as_str(),
                            scope = scope.as_str(),
                            "engine call failed, continuing: {source}"
                        );
                        Ok(())
                    }
                    ErrorPolicy::AbortOnError => Err(Abort {
                        path: path.to_path_buf(),
                        scope,
                        source,
                    }),
                }
            }
        }
    }
}

struct Abort {
    path: Utf8PathBuf,
    scope: CallScope,
    source: CapabilityError,
}
