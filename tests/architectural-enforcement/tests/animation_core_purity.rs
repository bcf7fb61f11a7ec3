//! Integration Test: Animation Core Purity
//!
//! **Policy**: `animation/` and `theme/` only compute frames. They read the
//! clock, but never touch files, the terminal, threads or locks; the host in
//! `app.rs` owns all of that.
//! **Policy**: Production code propagates errors instead of unwrapping.
//! **Exceptions**: test code

use architectural_enforcement::{report, scan_directory, Rule};

const PURITY_RULES: &[Rule] = &[
    Rule::new("std::fs", "file access belongs in config/"),
    Rule::new("fs::", "file access belongs in config/"),
    Rule::new("thread::spawn", "ticks are delivered by the host"),
    Rule::new("tokio::spawn", "ticks are delivered by the host"),
    Rule::new("Mutex", "the animation is owned by one task"),
    Rule::new("RwLock", "the animation is owned by one task"),
    Rule::new("stdout()", "render through ratatui in app.rs"),
    Rule::new("println!", "render through ratatui in app.rs"),
    Rule::new("EventStream", "input handling belongs in app.rs"),
];

const PANIC_RULES: &[Rule] = &[
    Rule::new(".unwrap()", "propagate with ?"),
    Rule::new(".expect(", "propagate with ?"),
    Rule::new("panic!(", "return an error"),
];

#[test]
fn test_animation_core_has_no_side_effects() {
    let mut violations = scan_directory("tui/src/animation", PURITY_RULES);
    violations.extend(scan_directory("tui/src/theme", PURITY_RULES));
    report("Side effects found in the animation core!", &violations);
}

#[test]
fn test_no_unwrap_in_production_code() {
    let violations = scan_directory("tui/src", PANIC_RULES);
    report("Unwraps found in production code!", &violations);
}
