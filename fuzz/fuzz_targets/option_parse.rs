#![no_main]

//! Fuzz target for command-line option parsing and validation.
//!
//! Every token lands either in the path list or in the option map, and
//! validation against a synthetic tree never panics.

use arbitrary::Arbitrary;
use camino::Utf8Path;
use libfuzzer_sys::fuzz_target;
use rulefix_domain::{PathProbe, Validator, parse_args};
use rulefix_types::PathKind;

#[derive(Debug, Arbitrary)]
struct Input {
    args: Vec<String>,
    readable: bool,
    writable: bool,
}

/// Names ending in `/` are directories, names starting with `x` are missing.
struct SyntheticProbe {
    readable: bool,
    writable: bool,
}

impl PathProbe for SyntheticProbe {
    fn kind(&self, path: &Utf8Path) -> Option<PathKind> {
        if path.as_str().starts_with('x') {
            None
        } else if path.as_str().ends_with('/') {
            Some(PathKind::Directory)
        } else {
            Some(PathKind::File)
        }
    }

    fn is_readable(&self, _path: &Utf8Path) -> bool {
        self.readable
    }

    fn is_writable(&self, _path: &Utf8Path) -> bool {
        self.writable
    }
}

fuzz_target!(|input: Input| {
    let (paths, options) = parse_args(&input.args);

    for path in paths.iter() {
        assert!(!path.as_str().starts_with("--"));
    }
    assert!(paths.len() + options.names().count() <= input.args.len());

    let probe = SyntheticProbe {
        readable: input.readable,
        writable: input.writable,
    };
    if let Ok(plan) = Validator::default().validate(&paths, &options, &probe) {
        assert_eq!(plan.paths().len(), paths.len());
        let _ = serde_json::to_string(&plan);
    }
});
