use std::sync::Arc;

use sql_antipattern_analyzer::{
    rules::{AnalysisReport, Diagnostic, Finding, PatternCategory, Severity},
    statement::SqlStatement
};

fn diagnostic(title: &'static str, severity: Severity) -> Diagnostic {
    Diagnostic {
        title,
        severity,
        category: PatternCategory::Creation,
        message: "rationale",
        statement: SqlStatement::from("create table t (id int)")
    }
}

fn finding(line: usize, diagnostics: Vec<Diagnostic>) -> Finding {
    Finding {
        source: Arc::from("t.sql"),
        line,
        statement: SqlStatement::from("create table t (id int)"),
        diagnostics
    }
}

#[test]
fn test_severity_display() {
    assert_eq!(format!("{}", Severity::Info), "INFO");
    assert_eq!(format!("{}", Severity::Warning), "WARN");
    assert_eq!(format!("{}", Severity::Error), "ERROR");
}

#[test]
fn test_severity_ordering() {
    assert!(Severity::Info < Severity::Warning);
    assert!(Severity::Warning < Severity::Error);
}

#[test]
fn test_severity_from_str() {
    assert_eq!("ERROR".parse::<Severity>().unwrap(), Severity::Error);
    assert_eq!("warn".parse::<Severity>().unwrap(), Severity::Warning);
    assert_eq!("Warning".parse::<Severity>().unwrap(), Severity::Warning);
    assert_eq!("info".parse::<Severity>().unwrap(), Severity::Info);
    assert!("fatal".parse::<Severity>().is_err());
}

#[test]
fn test_severity_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Severity::Warning).unwrap(), "\"warning\"");
}

#[test]
fn test_category_display() {
    assert_eq!(format!("{}", PatternCategory::Query), "Query");
    assert_eq!(format!("{}", PatternCategory::Creation), "Creation");
}

#[test]
fn test_report_counts() {
    let mut report = AnalysisReport::new(3, 7);
    report.add_finding(finding(
        1,
        vec![
            diagnostic("Primary Key Exists", Severity::Warning),
            diagnostic("Generic Primary Key", Severity::Error)
        ]
    ));
    report.add_finding(finding(5, vec![diagnostic("Hint", Severity::Info)]));

    assert_eq!(report.error_count(), 1);
    assert_eq!(report.warning_count(), 1);
    assert_eq!(report.info_count(), 1);
    assert_eq!(report.diagnostics().count(), 3);
    assert_eq!(report.highest_severity(), Some(Severity::Error));
}

#[test]
fn test_report_skips_empty_findings() {
    let mut report = AnalysisReport::new(1, 7);
    report.add_finding(finding(1, vec![]));

    assert!(report.findings.is_empty());
    assert_eq!(report.highest_severity(), None);
}

#[test]
fn test_report_filtered() {
    let mut report = AnalysisReport::new(2, 7);
    report.add_finding(finding(1, vec![diagnostic("Foreign Key Exists", Severity::Warning)]));
    report.add_finding(finding(
        2,
        vec![
            diagnostic("Primary Key Exists", Severity::Warning),
            diagnostic("Generic Primary Key", Severity::Error)
        ]
    ));

    let filtered = report.filtered(Severity::Error);
    assert_eq!(filtered.findings.len(), 1);
    assert_eq!(filtered.findings[0].line, 2);
    assert_eq!(filtered.findings[0].diagnostics.len(), 1);
    assert_eq!(filtered.statements_count, 2);
}

#[test]
fn test_diagnostic_serializes() {
    let json = serde_json::to_value(diagnostic("Generic Primary Key", Severity::Error)).unwrap();

    assert_eq!(json["title"], "Generic Primary Key");
    assert_eq!(json["severity"], "error");
    assert_eq!(json["category"], "Creation");
    assert_eq!(json["statement"], "create table t (id int)");
}
