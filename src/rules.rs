//! Anti-pattern rule engine for raw SQL statements.
//!
//! This module holds an ordered registry of independent rules and evaluates
//! every enabled rule against one statement at a time. Rules are immutable
//! values: a title, a rationale, a severity, a category and a
//! [`Detection`] procedure built from the statement classifier and a
//! [`PatternMatcher`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │ Statements  │────▶│ RuleRegistry │────▶│ Diagnostics │
//! └─────────────┘     └──────────────┘     └─────────────┘
//!                            │
//!                     ┌──────┴──────┐
//!                     │    Rules    │
//!                     │ (in order)  │
//!                     └─────────────┘
//! ```
//!
//! [`RuleRegistry::evaluate`] runs rules in registration order, so the
//! diagnostics for a statement always come back in the same order.
//! [`RuleRegistry::analyze`] fans out across statements in parallel using
//! [`rayon`] and keeps input order.
//!
//! # Built-in Rules
//!
//! | Title | Category | Severity | Fires when |
//! |-------|----------|----------|------------|
//! | SELECT * | Query | Error | `select *` is present |
//! | Multi-Valued Attribute | Creation | Error | an `id` column is typed as text |
//! | Recursive Dependency | Creation | Error | a table references itself |
//! | Primary Key Exists | Creation | Warning | a table has no `primary key` |
//! | Generic Primary Key | Creation | Error | a column is named `id` |
//! | Foreign Key Exists | Creation | Warning | a table has no `foreign key` |
//! | Imprecise Data Type | Creation | Warning | `float`, `real` or `double precision` is used |
//!
//! # Configuration
//!
//! Rules are enabled, disabled and re-labelled by title via [`RulesConfig`]:
//!
//! ```toml
//! [rules]
//! disabled = ["Foreign Key Exists"]
//!
//! [rules.severity]
//! "SELECT *" = "warn"
//! ```
//!
//! # Registering Custom Rules
//!
//! ```
//! use sql_antipattern_analyzer::{
//!     config::RulesConfig,
//!     rules::{Gate, PatternCategory, Rule, RuleInfo, RuleRegistry, Severity, TriggerPolicy},
//!     statement::SqlStatement
//! };
//!
//! let mut registry = RuleRegistry::new();
//! registry.register(Rule::with_pattern(
//!     RuleInfo {
//!         title:    "Truncate",
//!         message:  "Truncating discards every row without logging them.",
//!         severity: Severity::Warning,
//!         category: PatternCategory::Query
//!     },
//!     Gate::Always,
//!     r"truncate\s+table",
//!     TriggerPolicy::MatchMeansViolation
//! )?)?;
//!
//! let diagnostics = registry.evaluate(
//!     &RulesConfig::default(),
//!     &SqlStatement::from("truncate table logs")
//! );
//! assert_eq!(diagnostics[0].title, "Truncate");
//! # Ok::<(), sql_antipattern_analyzer::error::AppError>(())
//! ```

mod creation;
mod matcher;
mod query;
mod types;

use std::{fmt, sync::Arc};

use indexmap::IndexMap;
pub use matcher::{PatternMatcher, TriggerPolicy};
use rayon::prelude::*;
pub use types::{AnalysisReport, Diagnostic, Finding, PatternCategory, Severity};

use crate::{
    config::RulesConfig,
    error::{AppResult, config_error, pattern_error},
    statement::{SourceStatement, SqlStatement, extract_table_name, is_creation_statement}
};

/// Descriptive metadata of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleInfo {
    /// Unique title, used as the rule's identifier in configuration
    pub title:    &'static str,
    /// Multi-paragraph rationale shown with each diagnostic
    pub message:  &'static str,
    /// Default severity
    pub severity: Severity,
    pub category: PatternCategory
}

/// Statement pre-filter applied before a rule's pattern.
///
/// A gated-out statement yields no diagnostic whatever the trigger policy,
/// which keeps absence rules such as "Primary Key Exists" quiet on queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Always,
    /// Only table definitions (`create table`)
    CreationStatement
}

impl Gate {
    pub fn admits(self, sql: &str) -> bool {
        match self {
            Self::Always => true,
            Self::CreationStatement => is_creation_statement(sql)
        }
    }
}

/// Hand-written detection logic for rules a single pattern cannot express.
///
/// Implementations must be pure: the same statement always gives the same
/// answer, and nothing is mutated.
pub trait Detector: Send + Sync {
    /// Returns true if the statement violates the rule.
    fn detect(&self, sql: &str) -> bool;
}

/// How a rule decides whether a statement violates it.
#[derive(Clone)]
pub enum Detection {
    /// Precompiled pattern behind a gate
    Pattern {
        gate:    Gate,
        matcher: PatternMatcher
    },
    /// Precompiled anchor that must be followed by the name of the table
    /// the statement defines. Skipped when no table name can be extracted.
    TableScoped {
        anchor: PatternMatcher
    },
    Custom(Arc<dyn Detector>)
}

impl Detection {
    /// Returns whether the statement violates the rule.
    pub fn detect(&self, sql: &str) -> bool {
        match self {
            Self::Pattern {
                gate,
                matcher
            } => gate.admits(sql) && matcher.is_violation(sql),
            Self::TableScoped {
                anchor
            } => {
                let table = extract_table_name(sql);
                !table.is_empty() && anchor.is_violation_before(sql, table)
            }
            Self::Custom(detector) => detector.detect(sql)
        }
    }
}

impl fmt::Debug for Detection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern {
                gate,
                matcher
            } => f
                .debug_struct("Pattern")
                .field("gate", gate)
                .field("matcher", matcher)
                .finish(),
            Self::TableScoped {
                anchor
            } => f.debug_struct("TableScoped").field("anchor", anchor).finish(),
            Self::Custom(_) => f.write_str("Custom")
        }
    }
}

/// A named, immutable unit of anti-pattern knowledge.
#[derive(Debug, Clone)]
pub struct Rule {
    info:      RuleInfo,
    detection: Detection
}

impl Rule {
    pub fn new(info: RuleInfo, detection: Detection) -> Self {
        Self {
            info,
            detection
        }
    }

    /// Builds a rule around a static pattern.
    ///
    /// # Errors
    ///
    /// Fails if the pattern does not compile.
    pub fn with_pattern(
        info: RuleInfo,
        gate: Gate,
        pattern: &str,
        policy: TriggerPolicy
    ) -> AppResult<Self> {
        let matcher =
            PatternMatcher::new(pattern, policy).map_err(|e| pattern_error(info.title, pattern, e))?;
        Ok(Self::new(
            info,
            Detection::Pattern {
                gate,
                matcher
            }
        ))
    }

    /// Builds a rule that looks for `anchor` directly followed by the name
    /// of the table being defined, as a whole token.
    ///
    /// # Errors
    ///
    /// Fails if the anchor pattern does not compile.
    pub fn with_table_pattern(
        info: RuleInfo,
        anchor: &str,
        policy: TriggerPolicy
    ) -> AppResult<Self> {
        let anchor =
            PatternMatcher::new(anchor, policy).map_err(|e| pattern_error(info.title, anchor, e))?;
        Ok(Self::new(
            info,
            Detection::TableScoped {
                anchor
            }
        ))
    }

    pub fn info(&self) -> RuleInfo {
        self.info
    }

    pub fn title(&self) -> &'static str {
        self.info.title
    }

    pub fn detection(&self) -> &Detection {
        &self.detection
    }

    /// Checks one statement, returning a diagnostic on violation.
    ///
    /// `severity` replaces the rule's default severity on the diagnostic.
    pub fn check(&self, statement: &SqlStatement, severity: Severity) -> Option<Diagnostic> {
        if !self.detection.detect(statement.as_str()) {
            return None;
        }
        Some(Diagnostic {
            title: self.info.title,
            severity,
            category: self.info.category,
            message: self.info.message,
            statement: statement.clone()
        })
    }
}

/// Ordered collection of rules keyed by title.
///
/// Titles are unique ignoring ASCII case. Iteration, evaluation and
/// diagnostics all follow registration order.
///
/// # Example
///
/// ```
/// use sql_antipattern_analyzer::{
///     config::RulesConfig,
///     rules::{RuleRegistry, Severity},
///     statement::SqlStatement
/// };
///
/// let registry = RuleRegistry::baseline()?;
/// let diagnostics =
///     registry.evaluate(&RulesConfig::default(), &SqlStatement::from("select * from users"));
///
/// assert_eq!(diagnostics.len(), 1);
/// assert_eq!(diagnostics[0].title, "SELECT *");
/// assert_eq!(diagnostics[0].severity, Severity::Error);
/// # Ok::<(), sql_antipattern_analyzer::error::AppError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: IndexMap<String, Rule>
}

impl RuleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in rules
    ///
    /// # Notes
    ///
    /// - Query rules come first, then creation rules
    /// - Registration order fixes diagnostic order
    pub fn baseline() -> AppResult<Self> {
        let mut registry = Self::new();
        let rules = [
            query::select_star()?,
            creation::multi_valued_attribute()?,
            creation::recursive_dependency()?,
            creation::primary_key_exists()?,
            creation::generic_primary_key()?,
            creation::foreign_key_exists()?,
            creation::imprecise_data_type()?
        ];
        for rule in rules {
            registry.register(rule)?;
        }
        Ok(registry)
    }

    /// Append a rule.
    ///
    /// # Errors
    ///
    /// Fails if a rule with the same title is already registered.
    pub fn register(&mut self, rule: Rule) -> AppResult<()> {
        let key = rule.title().to_ascii_lowercase();
        if self.rules.contains_key(&key) {
            return Err(config_error(format!(
                "Rule '{}' is already registered",
                rule.title()
            )));
        }
        self.rules.insert(key, rule);
        Ok(())
    }

    /// Look up a rule by title, ignoring ASCII case
    pub fn get(&self, title: &str) -> Option<&Rule> {
        self.rules.get(&title.to_ascii_lowercase())
    }

    pub fn contains(&self, title: &str) -> bool {
        self.get(title).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    pub fn titles(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.values().map(Rule::title)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Number of rules the configuration leaves enabled
    pub fn enabled_count(&self, config: &RulesConfig) -> usize {
        self.iter().filter(|r| config.is_enabled(r.title())).count()
    }

    /// Evaluate every enabled rule against one statement.
    ///
    /// Diagnostics come back in registration order. Statements that trip no
    /// rule give an empty vector. Evaluation never fails, whatever the
    /// statement text.
    pub fn evaluate(&self, config: &RulesConfig, statement: &SqlStatement) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for rule in self.iter().filter(|r| config.is_enabled(r.title())) {
            let severity = config
                .severity_override(rule.title())
                .unwrap_or(rule.info.severity);
            if let Some(diagnostic) = rule.check(statement, severity) {
                tracing::debug!(
                    rule = diagnostic.title,
                    severity = %diagnostic.severity,
                    "rule fired"
                );
                diagnostics.push(diagnostic);
            }
        }
        diagnostics
    }

    /// Evaluate all statements in parallel.
    ///
    /// Findings keep the input order of `statements`.
    pub fn analyze(&self, config: &RulesConfig, statements: &[SourceStatement]) -> AnalysisReport {
        let rules_count = self.enabled_count(config);
        tracing::debug!(statements = statements.len(), rules = rules_count, "analyzing");
        let findings: Vec<Finding> = statements
            .par_iter()
            .map(|s| {
                let diagnostics = self.evaluate(config, &s.statement);
                tracing::debug!(
                    source = %s.source,
                    line = s.line,
                    diagnostics = diagnostics.len(),
                    "statement evaluated"
                );
                Finding {
                    source: Arc::clone(&s.source),
                    line: s.line,
                    statement: s.statement.clone(),
                    diagnostics
                }
            })
            .collect();
        let mut report = AnalysisReport::new(statements.len(), rules_count);
        for finding in findings {
            report.add_finding(finding);
        }
        report
    }
}
