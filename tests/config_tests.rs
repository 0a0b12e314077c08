use std::{collections::HashMap, io::Write};

use sql_antipattern_analyzer::{
    config::{Config, DEFAULT_MAX_STATEMENT_LENGTH, RulesConfig},
    rules::{RuleRegistry, Severity}
};
use tempfile::NamedTempFile;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert!(config.rules.disabled.is_empty());
    assert!(config.rules.enabled.is_empty());
    assert!(config.output.color);
    assert!(!config.output.verbose);
    assert_eq!(config.output.max_statement_length, DEFAULT_MAX_STATEMENT_LENGTH);
}

#[test]
fn test_default_rules_config_enables_everything() {
    let config = RulesConfig::default();
    let registry = RuleRegistry::baseline().unwrap();

    assert!(registry.titles().all(|t| config.is_enabled(t)));
    assert!(config.validate(&registry).is_ok());
}

#[test]
fn test_from_toml() {
    let config = Config::from_toml(
        r#"
[rules]
disabled = ["Foreign Key Exists"]

[rules.severity]
"SELECT *" = "warn"

[output]
min_severity = "error"
"#
    )
    .unwrap();

    assert!(!config.rules.is_enabled("Foreign Key Exists"));
    assert_eq!(config.rules.severity_override("select *"), Some(Severity::Warning));
    assert_eq!(config.output.min_severity().unwrap(), Some(Severity::Error));
    assert!(config.output.color);
}

#[test]
fn test_from_toml_invalid() {
    assert!(Config::from_toml("[rules]\ndisabled = 3").is_err());
}

#[test]
fn test_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[rules]\nenabled = [\"SELECT *\"]").unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.rules.enabled, vec!["SELECT *".to_string()]);
}

#[test]
fn test_from_missing_file() {
    assert!(Config::from_file(std::path::Path::new("/nonexistent/config.toml")).is_err());
}

#[test]
fn test_validate_unknown_title() {
    let registry = RuleRegistry::baseline().unwrap();
    let config = RulesConfig {
        disabled: vec!["Select Star".to_string()],
        ..Default::default()
    };

    assert!(config.validate(&registry).is_err());
}

#[test]
fn test_validate_unknown_severity_key() {
    let registry = RuleRegistry::baseline().unwrap();
    let mut severity = HashMap::new();
    severity.insert("No Such Rule".to_string(), "error".to_string());
    let config = RulesConfig {
        severity,
        ..Default::default()
    };

    assert!(config.validate(&registry).is_err());
}

#[test]
fn test_validate_bad_severity_value() {
    let registry = RuleRegistry::baseline().unwrap();
    let mut severity = HashMap::new();
    severity.insert("SELECT *".to_string(), "critical".to_string());
    let config = RulesConfig {
        severity,
        ..Default::default()
    };

    assert!(config.validate(&registry).is_err());
}

#[test]
fn test_validate_severity_keys_differing_by_case() {
    let registry = RuleRegistry::baseline().unwrap();
    let config = Config::from_toml(
        "[rules.severity]\n\"SELECT *\" = \"warn\"\n\"select *\" = \"error\"\n"
    )
    .unwrap();

    let error = config.rules.validate(&registry).unwrap_err();
    assert_eq!(
        error.render_message(),
        "Rule 'SELECT *' has more than one severity override"
    );
}

#[test]
fn test_validate_case_insensitive() {
    let registry = RuleRegistry::baseline().unwrap();
    let config = RulesConfig {
        disabled: vec!["generic primary key".to_string()],
        enabled: vec!["PRIMARY KEY EXISTS".to_string()],
        ..Default::default()
    };

    assert!(config.validate(&registry).is_ok());
}
