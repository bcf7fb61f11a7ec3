//! Integration Test: Sleep Prohibition
//!
//! **Policy**: Production code MUST NOT call sleep methods. Every delay is a
//! scheduled tick handed to the host's timer queue, which waits with
//! `tokio::time::sleep_until` alongside terminal input.
//! **Exceptions**: test code

use architectural_enforcement::{report, scan_directory, Rule};

const SLEEP_RULES: &[Rule] = &[
    Rule::new("::sleep(", "schedule a Cmd::Tick instead"),
    Rule::new(".sleep(", "schedule a Cmd::Tick instead"),
    Rule::new("thread::park", "never block the event loop"),
];

#[test]
fn test_no_sleep_in_production_code() {
    let violations = scan_directory("tui/src", SLEEP_RULES);
    report("Sleep calls found in production code!", &violations);
}
