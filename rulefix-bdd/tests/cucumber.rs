use assert_cmd::Command;
use cucumber::gherkin::Step;
use cucumber::{World, given, then, when};
use rulefix_bdd::SourceTree;
use rulefix_cli::config::parse_config;
use std::process::Output;

#[derive(Debug, Default, World)]
pub struct RulefixWorld {
    tree: Option<SourceTree>,
    output: Option<Output>,
}

fn tree(world: &RulefixWorld) -> &SourceTree {
    world.tree.as_ref().expect("source tree set")
}

fn output(world: &RulefixWorld) -> &Output {
    world.output.as_ref().expect("rulefix was run")
}

fn stdout(world: &RulefixWorld) -> String {
    String::from_utf8_lossy(&output(world).stdout).into_owned()
}

fn stderr(world: &RulefixWorld) -> String {
    String::from_utf8_lossy(&output(world).stderr).into_owned()
}

fn docstring(step: &Step) -> String {
    step.docstring
        .as_deref()
        .expect("step docstring")
        .trim()
        .to_string()
}

fn split_names(names: &str) -> impl Iterator<Item = &str> {
    names.split(',').map(str::trim).filter(|n| !n.is_empty())
}

// ============================================================================
// Source trees
// ============================================================================

#[given("an empty source tree")]
async fn empty_tree(world: &mut RulefixWorld) {
    world.tree = Some(SourceTree::new().expect("source tree"));
}

#[given(expr = "a source tree with directories {string} and files {string}")]
async fn tree_with(world: &mut RulefixWorld, dirs: String, files: String) {
    let tree = SourceTree::new().expect("source tree");
    for dir in split_names(&dirs) {
        tree.add_dir(dir).expect("add dir");
    }
    for file in split_names(&files) {
        tree.add_file(file, "class X {}\n").expect("add file");
    }
    world.tree = Some(tree);
}

#[given(expr = "a source file {string} containing:")]
async fn source_file(world: &mut RulefixWorld, step: &Step, name: String) {
    let contents = format!("{}\n", docstring(step));
    tree(world).add_file(&name, &contents).expect("add file");
}

#[given("a rulefix.toml containing:")]
async fn config_file(world: &mut RulefixWorld, step: &Step) {
    let contents = docstring(step);
    parse_config(&contents).expect("scenario config parses");
    tree(world)
        .add_file("rulefix.toml", &contents)
        .expect("write config");
}

// ============================================================================
// Running the binary
// ============================================================================

#[when(expr = "I run rulefix with {string}")]
async fn run_rulefix(world: &mut RulefixWorld, args: String) {
    let root = tree(world).root().to_owned();
    let mut cmd = Command::cargo_bin("rulefix").expect("rulefix binary");
    let output = cmd
        .current_dir(root.as_str())
        .env_remove("RULEFIX_ENGINE")
        .args(args.split_whitespace())
        .output()
        .expect("run rulefix");
    world.output = Some(output);
}

// ============================================================================
// Outcomes
// ============================================================================

#[then("the command succeeds")]
async fn command_succeeds(world: &mut RulefixWorld) {
    let out = output(world);
    assert!(
        out.status.success(),
        "expected success, got {:?}; stderr: {}",
        out.status,
        stderr(world)
    );
}

#[then(expr = "the command fails with exit code {int}")]
async fn command_fails(world: &mut RulefixWorld, code: i32) {
    assert_eq!(output(world).status.code(), Some(code), "stderr: {}", stderr(world));
}

#[then("the engine calls are:")]
async fn engine_calls(world: &mut RulefixWorld, step: &Step) {
    let expected: Vec<String> = docstring(step)
        .lines()
        .map(|l| l.trim().to_string())
        .collect();
    let actual: Vec<String> = stdout(world).lines().map(str::to_string).collect();
    assert_eq!(actual, expected);
}

#[then("no engine calls are made")]
async fn no_engine_calls(world: &mut RulefixWorld) {
    assert!(stdout(world).is_empty(), "stdout: {}", stdout(world));
}

#[then(expr = "the error mentions {string}")]
async fn error_mentions(world: &mut RulefixWorld, needle: String) {
    let err = stderr(world);
    assert!(err.contains(&needle), "stderr did not mention {needle:?}: {err}");
}

#[then(expr = "the printed plan selects {string}")]
async fn printed_plan_selects(world: &mut RulefixWorld, mode: String) {
    let plan: serde_json::Value = serde_json::from_str(&stdout(world)).expect("plan json");
    assert_eq!(plan["schema"], rulefix_types::schema::RULEFIX_PLAN_V1);
    assert_eq!(plan["rule_selection"]["mode"], mode.as_str());
}

#[then(expr = "the file {string} contains:")]
async fn file_contains(world: &mut RulefixWorld, step: &Step, name: String) {
    let actual = tree(world).read(&name).expect("read file");
    assert_eq!(actual.trim(), docstring(step));
}

#[tokio::main]
async fn main() {
    let features_path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("features");
    RulefixWorld::cucumber()
        .filter_run(features_path, |feature, _, _| {
            cfg!(unix) || !feature.tags.iter().any(|t| t == "unix")
        })
        .await;
}
