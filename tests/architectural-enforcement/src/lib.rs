//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - No sleep() calls in production code
//! - The animation core stays free of I/O, threads and locks
//! - Errors are propagated, not unwrapped, outside of tests
//!
//! The scanning helpers live here so each test file only declares its rules.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// A forbidden pattern and the advice shown when it is found
#[derive(Clone, Copy, Debug)]
pub struct Rule {
    pub pattern: &'static str,
    pub advice: &'static str,
}

impl Rule {
    pub const fn new(pattern: &'static str, advice: &'static str) -> Self {
        Self { pattern, advice }
    }
}

/// One offending line
#[derive(Clone, Debug)]
pub struct Violation {
    pub path: PathBuf,
    pub line_number: usize,
    pub line: String,
    pub rule: Rule,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: `{}` ({})\n      {}",
            self.path.display(),
            self.line_number,
            self.rule.pattern,
            self.rule.advice,
            self.line.trim()
        )
    }
}

/// Workspace root, resolved from this package's manifest directory
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// Scan every `.rs` file under `dir` (relative to the workspace root)
///
/// Comments and everything from the first `#[cfg(test)]` onwards are skipped.
pub fn scan_directory(dir: &str, rules: &[Rule]) -> Vec<Violation> {
    let path = workspace_root().join(dir);
    let mut violations = Vec::new();
    if !path.exists() {
        return violations;
    }

    for entry in walkdir::WalkDir::new(&path)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if entry.path().extension().and_then(|s| s.to_str()) == Some("rs") {
            scan_file(entry.path(), rules, &mut violations);
        }
    }

    violations
}

fn scan_file(path: &Path, rules: &[Rule], violations: &mut Vec<Violation>) {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return,
    };

    for (idx, line) in content.lines().enumerate() {
        if line.trim_start().starts_with("#[cfg(test)]") {
            break;
        }

        // Skip comments
        let code_part = line.split("//").next().unwrap_or(line);

        for rule in rules {
            if code_part.contains(rule.pattern) {
                violations.push(Violation {
                    path: path.to_path_buf(),
                    line_number: idx + 1,
                    line: line.to_string(),
                    rule: *rule,
                });
            }
        }
    }
}

/// Print violations and panic if there are any
pub fn report(title: &str, violations: &[Violation]) {
    if violations.is_empty() {
        return;
    }

    eprintln!("\n❌ {title}\n");
    for violation in violations {
        eprintln!("  ❌ {violation}");
    }

    panic!(
        "\nFound {} violation(s).\nFix these before merging!",
        violations.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_scan_skips_comments_and_test_modules() {
        let dir = std::env::temp_dir().join(format!("arch-scan-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let mut file = fs::File::create(dir.join("sample.rs")).unwrap();
        writeln!(file, "fn a() {{ std::thread::sleep(d); }}").unwrap();
        writeln!(file, "// std::thread::sleep(d) in a comment").unwrap();
        writeln!(file, "#[cfg(test)]").unwrap();
        writeln!(file, "fn b() {{ std::thread::sleep(d); }}").unwrap();
        drop(file);

        let mut violations = Vec::new();
        scan_file(
            &dir.join("sample.rs"),
            &[Rule::new("::sleep(", "no sleeping")],
            &mut violations,
        );
        fs::remove_dir_all(&dir).unwrap();

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line_number, 1);
    }
}
