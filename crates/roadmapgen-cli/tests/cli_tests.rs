//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn roadmapgen() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("roadmapgen").unwrap();
    cmd.env_remove("ROADMAPGEN_OUTPUT_DIR");
    cmd
}

const TEST_CONFIG: &str = r#"
output_dir = "out"

[[tracks]]
name = "summer"
input_dir = "exports"
output = "summer.json"
month_order = ["June", "July"]
"#;

/// A workspace with a config and two monthly exports.
fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("roadmapgen.toml"), TEST_CONFIG).unwrap();
    let exports = dir.path().join("exports");
    std::fs::create_dir_all(&exports).unwrap();
    std::fs::write(
        exports.join("june.txt"),
        "Time Submitted Question Status Runtime Language\n\
         2 months ago Two Sum Accepted 52 ms python3\n\
         2 months ago Jump Game Wrong Answer N/A python3\n",
    )
    .unwrap();
    std::fs::write(
        exports.join("july.txt"),
        "1. Two Sum Accepted\n2. Two Sum Accepted\n3. Valid Parentheses Accepted\n4. 3Sum Closest Wrong Answer\n",
    )
    .unwrap();
    dir
}

fn generate(dir: &Path) {
    roadmapgen()
        .current_dir(dir)
        .args(["generate", "--config", "roadmapgen.toml"])
        .assert()
        .success();
}

#[test]
fn generate_writes_artifact() {
    let dir = workspace();

    roadmapgen()
        .current_dir(dir.path())
        .args(["generate", "--config", "roadmapgen.toml"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Artifact saved to"))
        .stderr(predicate::str::contains("Month 2"));

    let content = std::fs::read_to_string(dir.path().join("out/summer.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["Month 1"][0]["problems"][0]["name"], "Two Sum");
    assert_eq!(
        json["Month 2"][0]["problems"][1]["url"],
        "https://leetcode.com/problems/valid-parentheses"
    );
    assert_eq!(json["Month 2"].as_array().unwrap().len(), 30);
}

#[test]
fn generate_is_idempotent() {
    let dir = workspace();
    let artifact = dir.path().join("out/summer.json");

    generate(dir.path());
    let first = std::fs::read(&artifact).unwrap();
    generate(dir.path());
    let second = std::fs::read(&artifact).unwrap();

    assert_eq!(first, second);
}

#[test]
fn generate_dry_run_writes_nothing() {
    let dir = workspace();

    roadmapgen()
        .current_dir(dir.path())
        .args(["generate", "--config", "roadmapgen.toml", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Month 2: 2 problems over 1 days"));

    assert!(!dir.path().join("out").exists());
}

#[test]
fn generate_unknown_track() {
    let dir = workspace();

    roadmapgen()
        .current_dir(dir.path())
        .args(["generate", "--config", "roadmapgen.toml", "--track", "winter"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown track: winter"));
}

#[test]
fn generate_missing_input_dir_fails() {
    let dir = workspace();
    std::fs::remove_dir_all(dir.path().join("exports")).unwrap();

    roadmapgen()
        .current_dir(dir.path())
        .args(["generate", "--config", "roadmapgen.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read input directory"));
}

#[test]
fn validate_reports_matchers_and_months() {
    let dir = workspace();
    std::fs::write(
        dir.path().join("exports/december.txt"),
        "1. LRU Cache Accepted\n",
    )
    .unwrap();

    roadmapgen()
        .current_dir(dir.path())
        .args(["validate", "--config", "roadmapgen.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Track: summer (2 months"))
        .stdout(predicate::str::contains("[July -> Month 2]"))
        .stdout(predicate::str::contains("[December -> UNMAPPED]"))
        .stdout(predicate::str::contains("relative-timestamp: 2"))
        .stdout(predicate::str::contains("ordinal-list: 4"))
        .stdout(predicate::str::contains("1 warning(s) found"));

    assert!(!dir.path().join("out").exists());
}

#[test]
fn validate_nonexistent_config() {
    roadmapgen()
        .args(["validate", "--config", "nonexistent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn show_formats() {
    let dir = workspace();
    generate(dir.path());

    roadmapgen()
        .current_dir(dir.path())
        .args(["show", "--artifact", "out/summer.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Month 1: 1 problems over 1 days"))
        .stdout(predicate::str::contains("Total: 3 problems in 2 months"));

    roadmapgen()
        .current_dir(dir.path())
        .args([
            "show",
            "--artifact",
            "out/summer.json",
            "--format",
            "markdown",
            "--month",
            "Month 2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "- [ ] [Valid Parentheses](https://leetcode.com/problems/valid-parentheses)",
        ))
        .stdout(predicate::str::contains("## Month 1").not());

    roadmapgen()
        .current_dir(dir.path())
        .args(["show", "--artifact", "out/summer.json", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"isBonus\": true"));
}

#[test]
fn show_writes_markdown_file() {
    let dir = workspace();
    generate(dir.path());

    roadmapgen()
        .current_dir(dir.path())
        .args([
            "show",
            "--artifact",
            "out/summer.json",
            "--format",
            "markdown",
            "--output",
            "roadmap.md",
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Markdown saved to: roadmap.md"));

    let md = std::fs::read_to_string(dir.path().join("roadmap.md")).unwrap();
    assert!(md.starts_with("# Roadmap\n"));
    assert!(md.contains("## Month 2"));
}

#[test]
fn show_unknown_month_and_format() {
    let dir = workspace();
    generate(dir.path());

    roadmapgen()
        .current_dir(dir.path())
        .args(["show", "--artifact", "out/summer.json", "--month", "Month 9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("month 'Month 9' not found"));

    roadmapgen()
        .current_dir(dir.path())
        .args(["show", "--artifact", "out/summer.json", "--format", "html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn catalog_from_artifacts() {
    let dir = workspace();
    generate(dir.path());

    roadmapgen()
        .current_dir(dir.path())
        .args(["catalog", "--config", "roadmapgen.toml", "--output", "catalog.json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("2 problems"));

    let content = std::fs::read_to_string(dir.path().join("catalog.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    let entries = json.as_array().unwrap();
    // Two Sum appears in both months but is listed once.
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["title"], "Two Sum");
    assert_eq!(entries[0]["source"], "summer-Month 1");
    assert_eq!(entries[1]["id"], 2);
    assert_eq!(entries[1]["source"], "summer-Month 2");
}

#[test]
fn catalog_without_artifacts_fails() {
    let dir = workspace();

    roadmapgen()
        .current_dir(dir.path())
        .args(["catalog", "--config", "roadmapgen.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no track artifacts found"));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();

    roadmapgen()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created roadmapgen.toml"));

    let content = std::fs::read_to_string(dir.path().join("roadmapgen.toml")).unwrap();
    assert!(content.contains("[[tracks]]"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    roadmapgen()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    roadmapgen()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_config_is_loadable() {
    let dir = TempDir::new().unwrap();
    roadmapgen()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    roadmapgen()
        .current_dir(dir.path())
        .args(["validate", "--config", "roadmapgen.toml", "--track", "advanced"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Track: advanced (5 months"));
}

#[test]
fn help_output() {
    roadmapgen()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("study roadmaps"));
}

#[test]
fn version_output() {
    roadmapgen()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("roadmapgen"));
}
