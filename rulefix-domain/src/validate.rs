use crate::classify::classify;
use crate::error::{ConfigError, InvalidFileReason};
use crate::options::{ParsedOptions, PathArguments, flags, parse_args};
use crate::ports::PathProbe;
use rulefix_types::{ExecutionPlan, RuleSelection};
use tracing::{debug, warn};

pub const DEFAULT_SOURCE_SUFFIX: &str = ".java";

#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Suffix every file argument must carry.
    pub source_suffix: String,
    /// Used when `--ignoreTestFiles` is absent.
    pub ignore_test_files_default: bool,
    /// Build a plan without rule selection (single entry point per path).
    pub legacy: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            source_suffix: DEFAULT_SOURCE_SUFFIX.to_string(),
            ignore_test_files_default: true,
            legacy: false,
        }
    }
}

/// Turns parsed arguments into an `ExecutionPlan`, failing on the first
/// violated check.
pub struct Validator {
    config: ValidatorConfig,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidatorConfig::default())
    }
}

impl Validator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Parses `args` and validates the result.
    pub fn build_plan<I, S>(
        &self,
        args: I,
        probe: &dyn PathProbe,
    ) -> Result<ExecutionPlan, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (paths, options) = parse_args(args);
        self.validate(&paths, &options, probe)
    }

    /// Checks, in order: paths given, paths exist, files are valid sources,
    /// rule options are not both set.
    pub fn validate(
        &self,
        paths: &PathArguments,
        options: &ParsedOptions,
        probe: &dyn PathProbe,
    ) -> Result<ExecutionPlan, ConfigError> {
        if paths.is_empty() {
            return Err(ConfigError::NoPaths);
        }

        let classification = classify(paths, probe);

        if let Some(path) = classification.missing().next() {
            return Err(ConfigError::PathNotFound {
                path: path.to_path_buf(),
            });
        }

        for file in classification.files() {
            let reason = if !file.as_str().ends_with(&self.config.source_suffix) {
                Some(InvalidFileReason::WrongSuffix {
                    expected: self.config.source_suffix.clone(),
                })
            } else if !probe.is_readable(file) {
                Some(InvalidFileReason::NotReadable)
            } else if !probe.is_writable(file) {
                Some(InvalidFileReason::NotWritable)
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(ConfigError::InvalidFile {
                    path: file.to_path_buf(),
                    reason,
                });
            }
        }

        let rule_selection = if self.config.legacy {
            if options.contains(flags::RULES) || options.contains(flags::EXCLUDE_RULES) {
                warn!("rule options are ignored in legacy mode");
            }
            None
        } else {
            Some(resolve_rule_selection(options)?)
        };

        let ignore_test_files = options.boolean(
            flags::IGNORE_TEST_FILES,
            self.config.ignore_test_files_default,
        );

        let classified = classification.to_classified();
        debug!(
            paths = classified.len(),
            ?rule_selection,
            ignore_test_files,
            "built execution plan"
        );
        Ok(ExecutionPlan::new(
            classified,
            rule_selection,
            ignore_test_files,
        ))
    }
}

/// Picks the rule-selection mode; both lists non-empty is an error.
pub fn resolve_rule_selection(options: &ParsedOptions) -> Result<RuleSelection, ConfigError> {
    let include = options.list(flags::RULES);
    let exclude = options.list(flags::EXCLUDE_RULES);
    match (include.is_empty(), exclude.is_empty()) {
        (true, true) => Ok(RuleSelection::AllRules),
        (false, true) => Ok(RuleSelection::IncludeOnly(include)),
        (true, false) => Ok(RuleSelection::ExcludeOnly(exclude)),
        (false, false) => Err(ConfigError::MutuallyExclusiveRules),
    }
}
