#![no_main]

//! Fuzz target for unused-import removal.

use libfuzzer_sys::fuzz_target;
use rulefix_core::imports::strip_unused_imports;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(once) = strip_unused_imports(s) {
        assert!(once.len() <= s.len());
        let twice = strip_unused_imports(&once).expect("cleaned output stays parseable");
        assert_eq!(once, twice);
    }
});
