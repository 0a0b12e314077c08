//! Application logic for the SQL Anti-Pattern Analyzer CLI.
//!
//! This module contains the front-end pipeline separated from the main
//! entry point to enable testing: reading inputs, splitting and normalizing
//! statements, running the rule registry, formatting and choosing the exit
//! code.

use std::{
    fs::read_to_string,
    io::{self, Read}
};

use crate::{
    cli::{Format, SeverityArg},
    config::Config,
    error::{AppResult, file_read_error, input_error},
    output::{OutputFormat, OutputOptions, format_report, format_rules},
    rules::{AnalysisReport, RuleRegistry, Severity},
    statement::{SourceStatement, SqlStatement, normalize, split_statements}
};

/// Parameters for the check command
#[derive(Debug, Clone)]
pub struct CheckParams {
    /// File paths; empty or "-" reads stdin
    pub inputs:        Vec<String>,
    pub output_format: Format,
    pub delimiter:     char,
    /// Overrides the configured minimum severity
    pub min_severity:  Option<SeverityArg>,
    /// Rule titles disabled on top of the configuration
    pub disable:       Vec<String>,
    pub verbose:       bool,
    pub no_color:      bool
}

impl Default for CheckParams {
    fn default() -> Self {
        Self {
            inputs:        Vec::new(),
            output_format: Format::Text,
            delimiter:     ';',
            min_severity:  None,
            disable:       Vec::new(),
            verbose:       false,
            no_color:      false
        }
    }
}

/// Result of the check command
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// 0 = clean, 1 = warnings, 2 = errors
    pub exit_code: i32,
    pub output:    String,
    /// Report after severity filtering
    pub report:    AnalysisReport
}

/// Parameters for the rules command
#[derive(Debug, Clone)]
pub struct RulesParams {
    pub output_format: Format,
    pub verbose:       bool,
    pub no_color:      bool
}

/// Convert CLI format to internal OutputFormat
pub fn convert_format(format: Format) -> OutputFormat {
    match format {
        Format::Text => OutputFormat::Text,
        Format::Json => OutputFormat::Json,
        Format::Yaml => OutputFormat::Yaml
    }
}

/// Convert CLI severity to internal Severity
pub fn convert_severity(severity: SeverityArg) -> Severity {
    match severity {
        SeverityArg::Info => Severity::Info,
        SeverityArg::Warn => Severity::Warning,
        SeverityArg::Error => Severity::Error
    }
}

/// Calculate exit code based on diagnostics
///
/// # Example
///
/// ```
/// use sql_antipattern_analyzer::{app::calculate_exit_code, rules::AnalysisReport};
///
/// let report = AnalysisReport::new(1, 7);
/// assert_eq!(calculate_exit_code(&report), 0);
/// ```
pub fn calculate_exit_code(report: &AnalysisReport) -> i32 {
    match report.highest_severity() {
        Some(Severity::Error) => 2,
        Some(Severity::Warning) => 1,
        Some(Severity::Info) | None => 0
    }
}

/// Read SQL from a file, or from stdin when the path is "-"
pub fn read_input(path: &str) -> AppResult<String> {
    if path == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| file_read_error("stdin", e))?;
        Ok(buffer)
    } else {
        read_to_string(path).map_err(|e| file_read_error(path, e))
    }
}

/// Split script text into normalized statements
///
/// # Errors
///
/// Fails on the first statement longer than `max_length` bytes.
pub fn load_statements(
    source: &str,
    sql: &str,
    delimiter: char,
    max_length: usize
) -> AppResult<Vec<SourceStatement>> {
    split_statements(source, sql, delimiter)
        .into_iter()
        .map(|s| {
            if s.statement.len() > max_length {
                tracing::warn!(source, line = s.line, length = s.statement.len(), "statement too long");
                return Err(input_error(format!(
                    "{}:{}: statement is {} bytes, longer than the {} byte limit",
                    source,
                    s.line,
                    s.statement.len(),
                    max_length
                )));
            }
            Ok(SourceStatement {
                statement: SqlStatement::from(normalize(s.statement.as_str())),
                ..s
            })
        })
        .collect()
}

/// Create output options from parameters and configuration
pub fn create_output_options(
    format: Format,
    no_color: bool,
    verbose: bool,
    config: &Config
) -> OutputOptions {
    OutputOptions {
        format:  convert_format(format),
        colored: !no_color && config.output.color,
        verbose: verbose || config.output.verbose
    }
}

/// Run the check command
///
/// Configuration is validated before any input is read, so a bad rule
/// title fails the run without partial output.
pub fn run_check(params: CheckParams, config: Config) -> AppResult<CheckResult> {
    let registry = RuleRegistry::baseline()?;
    let mut rules_config = config.rules.clone();
    rules_config.disabled.extend(params.disable.iter().cloned());
    rules_config.validate(&registry)?;
    let min_severity = match params.min_severity {
        Some(severity) => Some(convert_severity(severity)),
        None => config.output.min_severity()?
    };
    let output_opts =
        create_output_options(params.output_format, params.no_color, params.verbose, &config);

    let inputs = if params.inputs.is_empty() {
        vec!["-".to_string()]
    } else {
        params.inputs
    };
    let mut statements = Vec::new();
    for path in &inputs {
        let sql = read_input(path)?;
        let source = if path == "-" { "stdin" } else { path.as_str() };
        let loaded = load_statements(
            source,
            &sql,
            params.delimiter,
            config.output.max_statement_length
        )?;
        tracing::info!(source, statements = loaded.len(), "loaded statements");
        statements.extend(loaded);
    }

    let report = registry.analyze(&rules_config, &statements);
    let report = match min_severity {
        Some(severity) => report.filtered(severity),
        None => report
    };
    let output = format_report(&report, &output_opts);
    let exit_code = calculate_exit_code(&report);

    Ok(CheckResult {
        exit_code,
        output,
        report
    })
}

/// Run the rules command
pub fn run_rules(params: RulesParams, config: Config) -> AppResult<String> {
    let registry = RuleRegistry::baseline()?;
    config.rules.validate(&registry)?;
    let output_opts =
        create_output_options(params.output_format, params.no_color, params.verbose, &config);
    Ok(format_rules(&registry, &config.rules, &output_opts))
}
