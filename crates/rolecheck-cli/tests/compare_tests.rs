//! Offline comparison flow: config file, XML roles, reconciliation, rendering

use rolecheck_cli::config::OutputFormat;
use rolecheck_cli::pipeline::reconcile_report;
use rolecheck_cli::{Config, Formatter};
use rolecheck_reconciler::{Reconciler, Verdict};
use rolecheck_sources::extract_roles;
use std::fs;
use tempfile::TempDir;

const ROLES_XML: &str = r#"<?xml version="1.0"?>
<organization>
  <position><title>Software Engineer</title></position>
  <position><title>Senior Developer</title></position>
  <position><title>Project Manager</title></position>
</organization>"#;

fn setup(threshold: u32) -> (TempDir, Config) {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("roles.xml"), ROLES_XML).unwrap();
    fs::write(
        dir.path().join("config.toml"),
        format!(
            "role_path = \"//title/text()\"\n\n[reconciler]\nfuzzy_threshold = {}\n",
            threshold
        ),
    )
    .unwrap();

    let config = Config::load(Some(&dir.path().join("config.toml"))).unwrap();
    config.validate().unwrap();
    (dir, config)
}

fn compare(dir: &TempDir, config: &Config, candidates: &[&str]) -> rolecheck_reconciler::RoleReport {
    let authoritative = extract_roles(&dir.path().join("roles.xml"), &config.role_path().unwrap());
    let candidates: Vec<String> = candidates.iter().map(|s| s.to_string()).collect();
    reconcile_report(&Reconciler::new(config.reconciler.clone()), &authoritative, &candidates)
}

#[test]
fn test_compare_all_matching() {
    let (dir, config) = setup(70);
    let report = compare(&dir, &config, &["software engineer!", "Sr. Developer"]);

    assert_eq!(report.verdict, Verdict::Correct);
    assert_eq!(report.authoritative_count, 3);
    assert_eq!(report.matched_roles, vec!["Senior Developer", "Software Engineer"]);
}

#[test]
fn test_compare_strict_threshold_rejects_abbreviation() {
    let (dir, config) = setup(99);
    let report = compare(&dir, &config, &["Sr. Developer"]);

    assert_eq!(report.verdict, Verdict::Incorrect);
    assert_eq!(report.incorrect_roles, vec!["Sr. Developer"]);

    let json = Formatter::new(OutputFormat::Json, false)
        .format_report(&report)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["verdict"], "incorrect");
    assert_eq!(value["incorrect_roles"][0], "Sr. Developer");
}

#[test]
fn test_compare_missing_xml_reports_every_role_incorrect() {
    let (dir, config) = setup(80);
    fs::remove_file(dir.path().join("roles.xml")).unwrap();

    let report = compare(&dir, &config, &["Project Manager"]);
    assert_eq!(report.authoritative_count, 0);
    assert_eq!(report.incorrect_roles, vec!["Project Manager"]);
}
