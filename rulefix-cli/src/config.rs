//! Configuration file loading for rulefix.
//!
//! Discovers and loads `rulefix.toml` from the working directory.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use rulefix_core::{DispatchSettings, ErrorPolicy, ValidatorConfig};
use rulefix_domain::DEFAULT_SOURCE_SUFFIX;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "rulefix.toml";

/// Top-level configuration from rulefix.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulefixConfig {
    pub engine: EngineConfig,
    pub dispatch: DispatchConfig,
    pub cleanup: CleanupConfig,
}

/// Engine section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Program followed by leading arguments.
    pub command: Vec<String>,
}

/// Dispatch section of the config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatchConfig {
    pub on_error: OnError,

    /// Used when `--ignoreTestFiles` is not given.
    pub ignore_test_files: bool,

    /// Suffix every file argument must carry.
    pub source_suffix: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            on_error: OnError::default(),
            ignore_test_files: true,
            source_suffix: DEFAULT_SOURCE_SUFFIX.to_string(),
        }
    }
}

/// Cleanup section of the config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleanupConfig {
    /// Strip unused imports after each legacy-mode call.
    pub enabled: bool,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Reaction to a failed engine call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OnError {
    #[default]
    Continue,
    Abort,
}

impl From<OnError> for ErrorPolicy {
    fn from(value: OnError) -> Self {
        match value {
            OnError::Continue => ErrorPolicy::ContinueOnError,
            OnError::Abort => ErrorPolicy::AbortOnError,
        }
    }
}

/// Discover the rulefix.toml config file in `dir`.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a rulefix.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<RulefixConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<RulefixConfig> {
    let config: RulefixConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from `dir`, or return default if not found.
pub fn load_or_default(dir: &Utf8Path) -> anyhow::Result<RulefixConfig> {
    match discover_config(dir) {
        Some(path) => load_config(&path),
        None => Ok(RulefixConfig::default()),
    }
}

/// Config file and CLI arguments combined.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    /// Program and leading arguments; empty when no engine is configured.
    pub engine_command: Vec<String>,
    pub error_policy: ErrorPolicy,
    pub ignore_test_files: bool,
    pub source_suffix: String,
    pub cleanup_imports: bool,
}

impl MergedConfig {
    pub fn validator_config(&self, legacy: bool) -> ValidatorConfig {
        ValidatorConfig {
            source_suffix: self.source_suffix.clone(),
            ignore_test_files_default: self.ignore_test_files,
            legacy,
        }
    }

    pub fn dispatch_settings(&self) -> DispatchSettings {
        DispatchSettings {
            error_policy: self.error_policy,
            cleanup_imports: self.cleanup_imports,
        }
    }
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: RulefixConfig,
}

impl ConfigMerger {
    pub fn new(config: RulefixConfig) -> Self {
        Self { config }
    }

    /// A CLI engine replaces the configured command line, leading args included.
    pub fn merge_run_args(
        self,
        cli_engine: Option<&str>,
        cli_on_error: Option<OnError>,
    ) -> MergedConfig {
        let engine_command = match cli_engine {
            Some(program) => vec![program.to_string()],
            None => self.config.engine.command,
        };
        let on_error = cli_on_error.unwrap_or(self.config.dispatch.on_error);

        MergedConfig {
            engine_command,
            error_policy: on_error.into(),
            ignore_test_files: self.config.dispatch.ignore_test_files,
            source_suffix: self.config.dispatch.source_suffix,
            cleanup_imports: self.config.cleanup.enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("").unwrap();
        assert!(config.engine.command.is_empty());
        assert_eq!(config.dispatch.on_error, OnError::Continue);
        assert!(config.dispatch.ignore_test_files);
        assert_eq!(config.dispatch.source_suffix, ".java");
        assert!(config.cleanup.enabled);
    }

    #[test]
    fn test_parse_full_config() {
        let contents = r#"
[engine]
command = ["rjtl-fixer", "--quiet"]

[dispatch]
on_error = "abort"
ignore_test_files = false
source_suffix = ".kt"

[cleanup]
enabled = false
"#;

        let config = parse_config(contents).unwrap();
        assert_eq!(config.engine.command, vec!["rjtl-fixer", "--quiet"]);
        assert_eq!(config.dispatch.on_error, OnError::Abort);
        assert!(!config.dispatch.ignore_test_files);
        assert_eq!(config.dispatch.source_suffix, ".kt");
        assert!(!config.cleanup.enabled);
    }

    #[test]
    fn test_parse_rejects_unknown_policy() {
        let err = parse_config("[dispatch]\non_error = \"retry\"\n").unwrap_err();
        assert!(format!("{err:#}").contains("invalid TOML"));
    }

    #[test]
    fn test_parse_rejects_unknown_key() {
        assert!(parse_config("[engine]\nprogram = \"x\"\n").is_err());
    }

    #[test]
    fn test_merge_cli_engine_replaces_command() {
        let config = RulefixConfig {
            engine: EngineConfig {
                command: vec!["fixer".to_string(), "--quiet".to_string()],
            },
            ..Default::default()
        };

        let merged = ConfigMerger::new(config).merge_run_args(Some("other"), None);
        assert_eq!(merged.engine_command, vec!["other".to_string()]);
    }

    #[test]
    fn test_merge_keeps_config_engine_without_cli() {
        let config = parse_config("[engine]\ncommand = [\"fixer\", \"-q\"]\n").unwrap();
        let merged = ConfigMerger::new(config).merge_run_args(None, None);
        assert_eq!(merged.engine_command, vec!["fixer", "-q"]);
    }

    #[test]
    fn test_merge_cli_on_error_overrides() {
        let config = parse_config("[dispatch]\non_error = \"abort\"\n").unwrap();

        let merged = ConfigMerger::new(config.clone()).merge_run_args(None, None);
        assert_eq!(merged.error_policy, ErrorPolicy::AbortOnError);

        let merged = ConfigMerger::new(config).merge_run_args(None, Some(OnError::Continue));
        assert_eq!(merged.error_policy, ErrorPolicy::ContinueOnError);
    }

    #[test]
    fn test_merged_validator_and_dispatch_settings() {
        let config = parse_config(
            "[dispatch]\nignore_test_files = false\nsource_suffix = \".kt\"\n[cleanup]\nenabled = false\n",
        )
        .unwrap();
        let merged = ConfigMerger::new(config).merge_run_args(None, None);

        let validator = merged.validator_config(true);
        assert_eq!(validator.source_suffix, ".kt");
        assert!(!validator.ignore_test_files_default);
        assert!(validator.legacy);

        let settings = merged.dispatch_settings();
        assert!(!settings.cleanup_imports);
        assert_eq!(settings.error_policy, ErrorPolicy::ContinueOnError);
    }

    #[test]
    fn test_discover_config_some_and_none() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        assert!(discover_config(&root).is_none());

        std::fs::write(root.join(CONFIG_FILE_NAME), "").expect("write config");
        assert!(discover_config(&root).is_some());
    }

    #[test]
    fn test_load_or_default_returns_default_when_missing() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        let cfg = load_or_default(&root).expect("load default");
        assert!(cfg.engine.command.is_empty());
        assert!(cfg.cleanup.enabled);
    }
}
