use crate::ordered::OrderedSet;
use crate::paths::ClassifiedPaths;
use serde::{Deserialize, Serialize};

/// Which rules the transformation engine should run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "rules", rename_all = "snake_case")]
pub enum RuleSelection {
    AllRules,
    IncludeOnly(OrderedSet<String>),
    ExcludeOnly(OrderedSet<String>),
}

impl RuleSelection {
    pub fn mode(&self) -> DispatchMode {
        match self {
            RuleSelection::AllRules => DispatchMode::All,
            RuleSelection::IncludeOnly(_) => DispatchMode::Include,
            RuleSelection::ExcludeOnly(_) => DispatchMode::Exclude,
        }
    }

    /// Rule tokens carried by the selection; empty for `AllRules`.
    pub fn rules(&self) -> &[String] {
        match self {
            RuleSelection::AllRules => &[],
            RuleSelection::IncludeOnly(rules) | RuleSelection::ExcludeOnly(rules) => {
                rules.as_slice()
            }
        }
    }
}

/// Dispatch mode, as reported in logs and run reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchMode {
    All,
    Include,
    Exclude,
    Legacy,
}

impl DispatchMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DispatchMode::All => "all",
            DispatchMode::Include => "include",
            DispatchMode::Exclude => "exclude",
            DispatchMode::Legacy => "legacy",
        }
    }
}

impl std::fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated, immutable result of parsing a command line.
///
/// `rule_selection == None` is the legacy single-transform configuration:
/// every path goes through one entry point regardless of its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionPlan {
    schema: String,
    paths: ClassifiedPaths,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rule_selection: Option<RuleSelection>,
    ignore_test_files: bool,
}

impl ExecutionPlan {
    pub fn new(
        paths: ClassifiedPaths,
        rule_selection: Option<RuleSelection>,
        ignore_test_files: bool,
    ) -> Self {
        Self {
            schema: crate::schema::RULEFIX_PLAN_V1.to_string(),
            paths,
            rule_selection,
            ignore_test_files,
        }
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn paths(&self) -> &ClassifiedPaths {
        &self.paths
    }

    pub fn rule_selection(&self) -> Option<&RuleSelection> {
        self.rule_selection.as_ref()
    }

    pub fn ignore_test_files(&self) -> bool {
        self.ignore_test_files
    }

    pub fn mode(&self) -> DispatchMode {
        self.rule_selection
            .as_ref()
            .map_or(DispatchMode::Legacy, RuleSelection::mode)
    }
}
