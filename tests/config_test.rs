// tests/config_test.rs
use release_hooks::classifier::ClassifierRules;
use release_hooks::config::{load_config, Config};
use release_hooks::domain::ReleaseType;
use release_hooks::version::VersionBump;
use serial_test::serial;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_default_config() {
    let config = Config::default();
    let names: Vec<_> = config.labels.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["major", "minor", "patch", "skip-release", "release", "internal", "documentation"]
    );
    assert_eq!(config.conventional_commits.breaking_marker, "BREAKING");
    assert_eq!(config.release.skip_release_labels, vec!["skip-release"]);
    assert_eq!(config.slack.url, None);
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[conventional_commits.types]
feat = "minor"
fix = "patch"
chore = "patch"

[slack]
url = "https://hooks.example/services/x"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(
        config.conventional_commits.types.get("chore"),
        Some(&VersionBump::Patch)
    );
    assert_eq!(config.conventional_commits.types.get("perf"), None);
    assert_eq!(config.conventional_commits.breaking_marker, "BREAKING");
    assert_eq!(
        config.slack.url.as_deref(),
        Some("https://hooks.example/services/x")
    );
    assert_eq!(config.labels.len(), 7);
}

#[test]
#[serial]
fn test_load_fixture_with_custom_labels() {
    let config = load_config(Some("tests/fixtures/releasehooks.toml"))
        .expect("Failed to load test config");

    assert_eq!(config.labels.len(), 4);
    assert_eq!(config.labels[0].name, "breaking");
    assert_eq!(config.labels[0].release_type, ReleaseType::Major);
    assert_eq!(config.labels[1].description, "");
    assert_eq!(config.release.skip_release_labels, vec!["no-release"]);
    assert_eq!(
        config.slack.project_url.as_deref(),
        Some("https://github.com/acme/widgets")
    );

    let rules = ClassifierRules::from_config(&config.conventional_commits, &config.labels).unwrap();
    assert_eq!(rules.breaking_label, "breaking");
    assert_eq!(rules.prefixes.get("feat"), Some(&"feature".to_string()));
    assert_eq!(rules.prefixes.get("refactor"), Some(&"bugfix".to_string()));
}

#[test]
fn test_rules_need_a_label_for_every_bump() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[[labels]]
name = "minor"
release_type = "minor"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert!(ClassifierRules::from_config(&config.conventional_commits, &config.labels).is_err());
}

#[test]
fn test_invalid_toml_is_config_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[conventional_commits.types]\nfeat = \"huge\"\n").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
#[serial]
fn test_missing_explicit_path_is_error() {
    assert!(load_config(Some("tests/fixtures/does-not-exist.toml")).is_err());
}

#[test]
#[serial]
fn test_load_from_working_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("releasehooks.toml"),
        "[release]\nskip_release_labels = [\"wontfix\"]\n",
    )
    .unwrap();

    let original = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let config = load_config(None);
    std::env::set_current_dir(original).unwrap();

    assert_eq!(config.unwrap().release.skip_release_labels, vec!["wontfix"]);
}
