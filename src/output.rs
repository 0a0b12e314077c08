use colored::Colorize;
use serde::Serialize;

use crate::{
    config::RulesConfig,
    rules::{AnalysisReport, Diagnostic, PatternCategory, RuleRegistry, Severity}
};

/// Output format for results
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml
}

/// Output options
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format:  OutputFormat,
    pub colored: bool,
    /// Include rule rationale
    pub verbose: bool
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format:  OutputFormat::Text,
            colored: true,
            verbose: false
        }
    }
}

/// Rule listing entry for serialization
#[derive(Debug, Serialize)]
pub struct RuleSummary {
    pub title:    &'static str,
    pub severity: Severity,
    pub category: PatternCategory,
    pub enabled:  bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message:  Option<&'static str>
}

/// Format an analysis report
pub fn format_report(report: &AnalysisReport, opts: &OutputOptions) -> String {
    match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(report).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(report).unwrap_or_default(),
        OutputFormat::Text => format_text_report(report, opts)
    }
}

/// Format the rule listing, marking rules the configuration disables
pub fn format_rules(registry: &RuleRegistry, config: &RulesConfig, opts: &OutputOptions) -> String {
    let summaries: Vec<RuleSummary> = registry
        .iter()
        .map(|rule| {
            let info = rule.info();
            RuleSummary {
                title:    info.title,
                severity: config.severity_override(info.title).unwrap_or(info.severity),
                category: info.category,
                enabled:  config.is_enabled(info.title),
                message:  opts.verbose.then_some(info.message)
            }
        })
        .collect();
    match opts.format {
        OutputFormat::Json => serde_json::to_string_pretty(&summaries).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(&summaries).unwrap_or_default(),
        OutputFormat::Text => format_text_rules(&summaries, opts)
    }
}

fn format_text_report(report: &AnalysisReport, opts: &OutputOptions) -> String {
    let mut output = String::new();
    let header = "=== SQL Anti-Pattern Analysis ===";
    if opts.colored {
        output.push_str(&header.bold().to_string());
    } else {
        output.push_str(header);
    }
    output.push_str("\n\n");

    for finding in &report.findings {
        let location = format!("{}:{}", finding.source, finding.line);
        if opts.colored {
            output.push_str(&location.cyan().bold().to_string());
        } else {
            output.push_str(&location);
        }
        output.push('\n');
        output.push_str(&format!("  {}\n", finding.statement));
        for diagnostic in &finding.diagnostics {
            output.push_str(&format!("  {}\n", format_diagnostic_line(diagnostic, opts)));
            if opts.verbose {
                for line in diagnostic.message.lines() {
                    output.push_str(&format!("      {}\n", line));
                }
            }
        }
        output.push('\n');
    }

    if report.findings.is_empty() {
        output.push_str(&format!(
            "No anti-patterns found in {} statements ({} rules)\n",
            report.statements_count, report.rules_count
        ));
    } else {
        output.push_str(&format!(
            "Summary: {} errors, {} warnings, {} info in {} statements ({} rules)\n",
            report.error_count(),
            report.warning_count(),
            report.info_count(),
            report.statements_count,
            report.rules_count
        ));
    }
    output
}

fn format_diagnostic_line(diagnostic: &Diagnostic, opts: &OutputOptions) -> String {
    let label = format!("[{}]", diagnostic.severity);
    let label = if opts.colored {
        severity_colored(&label, diagnostic.severity)
    } else {
        label
    };
    format!("{} {} ({})", label, diagnostic.title, diagnostic.category)
}

fn format_text_rules(summaries: &[RuleSummary], opts: &OutputOptions) -> String {
    let mut output = String::new();
    for summary in summaries {
        let label = format!("[{}]", summary.severity);
        let label = if opts.colored {
            severity_colored(&label, summary.severity)
        } else {
            label
        };
        let state = if summary.enabled { "" } else { " (disabled)" };
        output.push_str(&format!(
            "{} {} ({}){}\n",
            label, summary.title, summary.category, state
        ));
        if let Some(message) = summary.message {
            for line in message.lines() {
                output.push_str(&format!("    {}\n", line));
            }
            output.push('\n');
        }
    }
    output
}

fn severity_colored(text: &str, severity: Severity) -> String {
    match severity {
        Severity::Error => text.red().bold().to_string(),
        Severity::Warning => text.yellow().bold().to_string(),
        Severity::Info => text.blue().to_string()
    }
}
