use sql_antipattern_analyzer::{
    config::RulesConfig,
    output::{OutputFormat, OutputOptions, format_report, format_rules},
    rules::{AnalysisReport, RuleRegistry},
    statement::SourceStatement
};

fn sample_report() -> AnalysisReport {
    let registry = RuleRegistry::baseline().unwrap();
    let statements = vec![
        SourceStatement::new("schema.sql", 1, "create table users (id int, name varchar(50))"),
        SourceStatement::new("schema.sql", 4, "select user_id from users"),
        SourceStatement::new("schema.sql", 6, "select * from users")
    ];
    registry.analyze(&RulesConfig::default(), &statements)
}

fn plain(format: OutputFormat, verbose: bool) -> OutputOptions {
    OutputOptions {
        format,
        colored: false,
        verbose
    }
}

#[test]
fn test_output_format_default() {
    let format = OutputFormat::default();
    assert!(matches!(format, OutputFormat::Text));
}

#[test]
fn test_output_options_default() {
    let opts = OutputOptions::default();
    assert!(matches!(opts.format, OutputFormat::Text));
    assert!(opts.colored);
    assert!(!opts.verbose);
}

#[test]
fn test_format_report_text() {
    let output = format_report(&sample_report(), &plain(OutputFormat::Text, false));

    assert!(output.contains("=== SQL Anti-Pattern Analysis ==="));
    assert!(output.contains("schema.sql:1"));
    assert!(output.contains("[WARN] Primary Key Exists (Creation)"));
    assert!(output.contains("[ERROR] Generic Primary Key (Creation)"));
    assert!(output.contains("schema.sql:6"));
    assert!(output.contains("[ERROR] SELECT * (Query)"));
    assert!(!output.contains("schema.sql:4"));
    assert!(output.contains("Summary: 2 errors, 2 warnings, 0 info in 3 statements (7 rules)"));
}

#[test]
fn test_format_report_text_verbose_includes_rationale() {
    let quiet = format_report(&sample_report(), &plain(OutputFormat::Text, false));
    let verbose = format_report(&sample_report(), &plain(OutputFormat::Text, true));

    assert!(!quiet.contains("Consider adding a primary key"));
    assert!(verbose.contains("Consider adding a primary key"));
}

#[test]
fn test_format_report_text_clean() {
    let report = AnalysisReport::new(4, 7);
    let output = format_report(&report, &plain(OutputFormat::Text, false));

    assert!(output.contains("No anti-patterns found in 4 statements (7 rules)"));
}

#[test]
fn test_format_report_json() {
    let output = format_report(&sample_report(), &plain(OutputFormat::Json, false));
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["statements_count"], 3);
    assert_eq!(value["findings"][0]["line"], 1);
    assert_eq!(value["findings"][0]["source"], "schema.sql");
    assert_eq!(value["findings"][1]["diagnostics"][0]["title"], "SELECT *");
}

#[test]
fn test_format_report_yaml() {
    let output = format_report(&sample_report(), &plain(OutputFormat::Yaml, false));

    assert!(output.contains("findings:"));
    assert!(output.contains("title: Generic Primary Key"));
}

#[test]
fn test_format_rules_text() {
    let registry = RuleRegistry::baseline().unwrap();
    let config = RulesConfig {
        disabled: vec!["Foreign Key Exists".to_string()],
        ..Default::default()
    };
    let output = format_rules(&registry, &config, &plain(OutputFormat::Text, false));

    assert!(output.contains("[ERROR] SELECT * (Query)\n"));
    assert!(output.contains("[WARN] Foreign Key Exists (Creation) (disabled)"));
    assert_eq!(output.lines().count(), 7);
}

#[test]
fn test_format_rules_json() {
    let registry = RuleRegistry::baseline().unwrap();
    let output = format_rules(
        &registry,
        &RulesConfig::default(),
        &plain(OutputFormat::Json, true)
    );
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value.as_array().unwrap().len(), 7);
    assert_eq!(value[0]["title"], "SELECT *");
    assert_eq!(value[0]["enabled"], true);
    assert!(value[0]["message"].as_str().unwrap().contains("covering"));
}
