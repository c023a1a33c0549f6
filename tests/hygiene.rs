//! Hygiene: scans the production sources for antipatterns.
//!
//! Controllers must degrade instead of crashing the page, so anything that can
//! panic or silently swallow an error has a budget of zero. Test files and the
//! shared test fakes are excluded.

use std::fs;
use std::path::Path;

struct Rule {
    pattern: &'static str,
    budget: usize,
    why: &'static str,
}

const RULES: &[Rule] = &[
    Rule { pattern: ".unwrap()", budget: 0, why: "panics" },
    Rule { pattern: ".expect(", budget: 0, why: "panics" },
    Rule { pattern: "panic!(", budget: 0, why: "panics" },
    Rule { pattern: "unreachable!(", budget: 0, why: "panics" },
    Rule { pattern: "todo!(", budget: 0, why: "panics" },
    Rule { pattern: "unimplemented!(", budget: 0, why: "panics" },
    Rule { pattern: "let _ =", budget: 0, why: "discards a value without inspecting it" },
    Rule { pattern: ".ok()", budget: 0, why: "discards an error without logging it" },
    Rule { pattern: "#[allow(dead_code)]", budget: 0, why: "hides unused code" },
];

struct SourceFile {
    path: String,
    content: String,
}

fn is_test_only(path: &str) -> bool {
    path.ends_with("_test.rs") || path.ends_with("test_support.rs")
}

fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(&Path::new(env!("CARGO_MANIFEST_DIR")).join("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
            continue;
        }
        if !path.extension().is_some_and(|ext| ext == "rs") {
            continue;
        }
        let path_str = path.to_string_lossy().to_string();
        if is_test_only(&path_str) {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push(SourceFile { path: path_str, content });
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

#[test]
fn scans_the_source_tree() {
    let files = source_files();
    assert!(files.iter().any(|file| file.path.ends_with("lib.rs")), "src/lib.rs not found");
    assert!(!files.iter().any(|file| is_test_only(&file.path)));
}

#[test]
fn antipattern_budgets() {
    let files = source_files();
    let mut failures = Vec::new();
    for rule in RULES {
        let found = hits(&files, rule.pattern);
        let count: usize = found.iter().map(|(_, count)| count).sum();
        if count > rule.budget {
            let detail = found
                .iter()
                .map(|(path, count)| format!("    {path}: {count}"))
                .collect::<Vec<_>>()
                .join("\n");
            failures.push(format!("`{}` ({}): found {count}, max {}\n{detail}", rule.pattern, rule.why, rule.budget));
        }
    }
    assert!(failures.is_empty(), "hygiene budgets exceeded:\n{}", failures.join("\n"));
}
