use pretty_assertions::assert_eq;
use rulefix_types::{
    CallScope, ClassifiedPath, ClassifiedPaths, DispatchMode, DispatchReport, ExecutionPlan,
    PathFailure, PathKind, RuleSelection,
};

fn plan(selection: Option<RuleSelection>) -> ExecutionPlan {
    let paths = ClassifiedPaths::new([
        ClassifiedPath::new("dirA", PathKind::Directory),
        ClassifiedPath::new("src/A.java", PathKind::File),
    ]);
    ExecutionPlan::new(paths, selection, true)
}

#[test]
fn plan_serializes_schema_paths_and_selection() {
    let rules = ["R1".to_string(), "R2".to_string()].into_iter().collect();
    let value = serde_json::to_value(plan(Some(RuleSelection::ExcludeOnly(rules))))
        .expect("serialize plan");

    assert_eq!(
        value,
        serde_json::json!({
            "schema": "rulefix.plan.v1",
            "paths": [
                { "path": "dirA", "kind": "directory" },
                { "path": "src/A.java", "kind": "file" }
            ],
            "rule_selection": { "mode": "exclude_only", "rules": ["R1", "R2"] },
            "ignore_test_files": true
        })
    );
}

#[test]
fn all_rules_serializes_without_rules() {
    let value = serde_json::to_value(plan(Some(RuleSelection::AllRules))).expect("serialize");
    assert_eq!(
        value["rule_selection"],
        serde_json::json!({ "mode": "all_rules" })
    );
}

#[test]
fn legacy_plan_omits_rule_selection() {
    let value = serde_json::to_value(plan(None)).expect("serialize");
    assert!(value.get("rule_selection").is_none());
}

#[test]
fn plan_json_reads_back_equal() {
    let original = plan(Some(RuleSelection::IncludeOnly(
        ["X".to_string()].into_iter().collect(),
    )));
    let json = serde_json::to_string_pretty(&original).expect("serialize");
    let parsed: ExecutionPlan = serde_json::from_str(&json).expect("parse");
    assert_eq!(parsed, original);
    assert_eq!(parsed.mode(), DispatchMode::Include);
}

#[test]
fn report_counts_and_all_failed() {
    let mut report = DispatchReport::new(DispatchMode::All);
    assert!(!report.all_failed());

    report.record_failure(PathFailure {
        path: "dirA".into(),
        scope: CallScope::Directory,
        message: "engine exited with status 3".to_string(),
    });
    assert!(report.all_failed());

    report.record_success();
    assert!(!report.all_failed());
    assert_eq!(report.attempted, 2);
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed, 1);

    let value = serde_json::to_value(&report).expect("serialize report");
    assert_eq!(value["schema"], "rulefix.report.v1");
    assert_eq!(value["mode"], "all");
    assert_eq!(value["failures"][0]["scope"], "directory");
    assert!(value.get("started_at").is_none());
}
