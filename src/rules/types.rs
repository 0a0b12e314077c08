//! Type definitions for the anti-pattern rule system.
//!
//! This module defines the core types used throughout the rule engine:
//! - [`Severity`] - Diagnostic severity levels (Info, Warning, Error)
//! - [`PatternCategory`] - Statement class a rule targets (Query, Creation)
//! - [`Diagnostic`] - One anti-pattern found in one statement
//! - [`AnalysisReport`] - Diagnostics for a whole input, grouped by statement

use std::{fmt, str::FromStr, sync::Arc};

use serde::Serialize;

use crate::statement::SqlStatement;

/// Severity level of a diagnostic.
///
/// Ordered from lowest to highest severity for sorting and filtering.
/// Exit codes are determined by the highest severity diagnostic found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational hint, does not affect exit code
    Info,
    /// Design smell worth reviewing (exit code 1)
    Warning,
    /// Anti-pattern that should be fixed (exit code 2)
    Error
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR")
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warning" | "warn" => Ok(Self::Warning),
            "info" => Ok(Self::Info),
            other => Err(format!(
                "unknown severity '{}' (expected info, warn or error)",
                other
            ))
        }
    }
}

/// Class of statement a rule is written for.
///
/// Used for grouping and filtering output. The engine never gates
/// evaluation on it; each rule decides applicability itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[non_exhaustive]
pub enum PatternCategory {
    /// Rules about data retrieval (`select ...`)
    Query,
    /// Rules about table definitions (`create table ...`)
    Creation
}

impl fmt::Display for PatternCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query => write!(f, "Query"),
            Self::Creation => write!(f, "Creation")
        }
    }
}

/// A single anti-pattern found in a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Title of the rule that fired, unique within a registry
    pub title:     &'static str,
    /// Severity after configuration overrides
    pub severity:  Severity,
    pub category:  PatternCategory,
    /// Rationale explaining why the construct is harmful
    pub message:   &'static str,
    /// The offending statement
    pub statement: SqlStatement
}

/// All diagnostics produced for one located statement.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub source:      Arc<str>,
    pub line:        usize,
    pub statement:   SqlStatement,
    /// In rule registration order
    pub diagnostics: Vec<Diagnostic>
}

/// Complete analysis report.
///
/// Findings keep input order. Statements without diagnostics are counted
/// in [`statements_count`](Self::statements_count) but get no finding.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub findings:         Vec<Finding>,
    /// Number of statements analyzed
    pub statements_count: usize,
    /// Number of enabled rules
    pub rules_count:      usize
}

impl AnalysisReport {
    pub fn new(statements_count: usize, rules_count: usize) -> Self {
        Self {
            findings: Vec::new(),
            statements_count,
            rules_count
        }
    }

    pub fn add_finding(&mut self, finding: Finding) {
        if !finding.diagnostics.is_empty() {
            self.findings.push(finding);
        }
    }

    /// Iterates over every diagnostic in input order.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.findings.iter().flat_map(|f| f.diagnostics.iter())
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn info_count(&self) -> usize {
        self.count(Severity::Info)
    }

    pub fn highest_severity(&self) -> Option<Severity> {
        self.diagnostics().map(|d| d.severity).max()
    }

    /// Drops diagnostics below `min_severity`, and findings left empty.
    pub fn filtered(mut self, min_severity: Severity) -> Self {
        for finding in &mut self.findings {
            finding.diagnostics.retain(|d| d.severity >= min_severity);
        }
        self.findings.retain(|f| !f.diagnostics.is_empty());
        self
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics().filter(|d| d.severity == severity).count()
    }
}
