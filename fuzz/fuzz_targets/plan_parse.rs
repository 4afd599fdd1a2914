#![no_main]

//! Fuzz target for plan and report JSON parsing.

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    // Round-trip whatever parses; ordered sets must stay duplicate-free.
    if let Ok(plan) = serde_json::from_str::<rulefix_types::ExecutionPlan>(s) {
        if let Some(selection) = plan.rule_selection() {
            let rules = selection.rules();
            for (i, rule) in rules.iter().enumerate() {
                assert!(!rules[i + 1..].contains(rule));
            }
        }
        let _ = serde_json::to_string_pretty(&plan);
    }

    let _ = serde_json::from_str::<rulefix_types::RuleSelection>(s);
    let _ = serde_json::from_str::<rulefix_types::ClassifiedPaths>(s);
    let _ = serde_json::from_str::<rulefix_types::DispatchReport>(s);
});
