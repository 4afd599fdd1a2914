//! Property-based tests for the option parser.
//!
//! These tests verify that:
//! - Path tokens and rule tokens keep first-occurrence order without repeats
//! - Boolean parsing never fails and only accepts `true` in any case

use proptest::prelude::*;
use rulefix_domain::{flags, parse_args, parse_permissive_bool, split_list};

fn arb_tokens() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::string::string_regex(r"[A-Za-z][A-Za-z0-9_]{0,6}").unwrap(),
        0..8,
    )
}

fn first_occurrences(tokens: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for t in tokens {
        if !out.contains(t) {
            out.push(t.clone());
        }
    }
    out
}

proptest! {
    #[test]
    fn rule_list_matches_first_occurrences(tokens in arb_tokens()) {
        let raw = tokens.join(",");
        let parsed = split_list(&raw);
        prop_assert_eq!(parsed.into_vec(), first_occurrences(&tokens));
    }

    #[test]
    fn paths_match_first_occurrences(tokens in arb_tokens()) {
        let (paths, options) = parse_args(&tokens);
        let got: Vec<String> = paths.iter().map(|p| p.to_string()).collect();
        prop_assert_eq!(got, first_occurrences(&tokens));
        prop_assert_eq!(options.names().count(), 0);
    }

    #[test]
    fn flags_never_become_paths(tokens in arb_tokens(), value in "[a-zA-Z,]{0,10}") {
        let mut args: Vec<String> = tokens.clone();
        args.insert(0, format!("--{}={}", flags::RULES, value));
        args.push(format!("--{}={}", flags::IGNORE_TEST_FILES, value));
        let (paths, options) = parse_args(&args);
        prop_assert_eq!(paths.len(), first_occurrences(&tokens).len());
        prop_assert!(options.contains(flags::RULES));
    }

    #[test]
    fn only_true_is_true(raw in ".{0,8}") {
        prop_assert_eq!(parse_permissive_bool(&raw), raw.to_ascii_lowercase() == "true");
    }
}
