use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn docsift_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("docsift");
    path
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let docs_dir = root.join("docs");
    fs::create_dir_all(docs_dir.join("platform")).unwrap();
    fs::write(
        docs_dir.join("architecture.md"),
        "# Architecture\n\nAndroid application with Clean Architecture and MVVM pattern.",
    )
    .unwrap();
    fs::write(
        docs_dir.join("coroutines.md"),
        "# Concurrency\n\nKotlin coroutines for asynchronous operations.",
    )
    .unwrap();
    fs::write(
        docs_dir.join("platform/compose.txt"),
        "Jetpack Compose for modern UI development.",
    )
    .unwrap();
    fs::write(docs_dir.join("logo.svg"), "<svg>architecture</svg>").unwrap();

    let long = "Review checklist: naming, error handling, tests, docs. ".repeat(30);
    fs::write(docs_dir.join("review.md"), long).unwrap();

    let config_path = root.join("docsift.toml");
    fs::write(
        &config_path,
        format!(
            r#"[corpus]
root = "{}/docs"

[retrieval]
top_k = 3
"#,
            root.display()
        ),
    )
    .unwrap();

    (tmp, config_path)
}

fn run_docsift(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = docsift_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run docsift binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

#[test]
fn test_index_reports_counts() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_docsift(&config_path, &["index"]);
    assert!(success, "index failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("documents: 4"), "stdout={}", stdout);
    // review.md is 1650 chars: 1 + ceil(1150 / 450) = 4 fragments.
    assert!(stdout.contains("fragments: 7"), "stdout={}", stdout);
    assert!(stdout.contains("/ 384"));
    assert!(stdout.contains("ok"));
}

#[test]
fn test_search_ranks_relevant_document_first() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) =
        run_docsift(&config_path, &["search", "Android MVVM architecture"]);
    assert!(success, "search failed: stdout={}, stderr={}", stdout, stderr);
    assert!(
        stdout.starts_with("1. ["),
        "unexpected output: {}",
        stdout
    );
    let first_line = stdout.lines().next().unwrap();
    assert!(first_line.contains("architecture.md #0"), "first={}", first_line);
}

#[test]
fn test_search_respects_top_k() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_docsift(&config_path, &["search", "review", "--format", "json"]);
    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 3);

    let (stdout, _, success) = run_docsift(
        &config_path,
        &["search", "review", "--format", "json", "--top-k", "100"],
    );
    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let hits = parsed.as_array().unwrap();
    assert_eq!(hits.len(), 7);
    for (i, hit) in hits.iter().enumerate() {
        assert_eq!(hit["rank"], i + 1);
    }
    for pair in hits.windows(2) {
        assert!(pair[0]["score"].as_f64().unwrap() >= pair[1]["score"].as_f64().unwrap());
    }
}

#[test]
fn test_search_context_format() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_docsift(
        &config_path,
        &["search", "Kotlin coroutines", "--format", "context", "--top-k", "1"],
    );
    assert!(success);
    assert!(stdout.starts_with("[coroutines.md] (similarity: 0."), "stdout={}", stdout);
    assert!(stdout.contains("Kotlin coroutines for asynchronous operations."));
}

#[test]
fn test_search_empty_corpus_no_results() {
    let (tmp, config_path) = setup_test_env();
    let empty = tmp.path().join("empty");
    fs::create_dir_all(&empty).unwrap();

    let (stdout, stderr, success) = run_docsift(
        &config_path,
        &["--root", empty.to_str().unwrap(), "search", "anything"],
    );
    assert!(success, "stderr={}", stderr);
    assert!(stdout.contains("No results."));
}

#[test]
fn test_missing_root_fails() {
    let (tmp, config_path) = setup_test_env();
    let missing = tmp.path().join("does-not-exist");

    let (_, stderr, success) = run_docsift(
        &config_path,
        &["--root", missing.to_str().unwrap(), "index"],
    );
    assert!(!success);
    assert!(stderr.contains("does not exist"), "stderr={}", stderr);
}

#[test]
fn test_stats_lists_terms() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_docsift(&config_path, &["stats", "--terms", "3"]);
    assert!(success, "stats failed: stderr={}", stderr);
    assert!(stdout.contains("Documents:   4"));
    assert!(stdout.contains("Most frequent terms"));
    assert!(stdout.contains("Most discriminative terms"));
}

#[test]
fn test_invalid_config_rejected() {
    let (tmp, _) = setup_test_env();
    let bad = tmp.path().join("bad.toml");
    fs::write(&bad, "[chunking]\nchunk_size = 10\noverlap = 20\n").unwrap();

    let (_, stderr, success) = run_docsift(&bad, &["index"]);
    assert!(!success);
    assert!(stderr.contains("overlap"), "stderr={}", stderr);
}
