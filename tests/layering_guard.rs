//! Layering guardrails for the workspace crates.
//!
//! `sable_syntax` is shared by every consumer of the grammar, so it must stay free of presentation and
//! CLI concerns: its `[dependencies]` may only name the vocabulary crate, `thiserror` and `tracing`.
//! `sable_core` is the bottom of the stack and depends on nothing.

fn dependency_names(manifest: &str) -> Vec<String> {
    let mut in_dependencies = false;
    let mut names = Vec::new();

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }
        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }
        // Strip inline comments for robustness.
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if let Some((name, _)) = line_no_comment.split_once('=') {
            names.push(name.trim().to_string());
        }
    }
    names
}

#[test]
fn syntax_crate_depends_only_on_core_thiserror_and_tracing() {
    let allowed = ["sable_core", "thiserror", "tracing"];
    for name in dependency_names(include_str!("../crates/sable_syntax/Cargo.toml")) {
        assert!(
            allowed.contains(&name.as_str()),
            "`{name}` must not appear in sable_syntax [dependencies]; allowed: {allowed:?}"
        );
    }
}

#[test]
fn core_crate_has_no_dependencies() {
    let names = dependency_names(include_str!("../crates/sable_core/Cargo.toml"));
    assert!(names.is_empty(), "sable_core must not depend on anything, found {names:?}");
}

#[test]
fn compiler_keeps_the_syntax_crate_as_a_regular_dependency() {
    let names = dependency_names(include_str!("../Cargo.toml"));
    assert!(names.iter().any(|n| n == "sable_syntax"));
    assert!(names.iter().any(|n| n == "sable_core"));
}
