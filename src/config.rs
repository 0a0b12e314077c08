//! Configuration loading and management.
//!
//! Configuration is loaded from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. File passed with `--config`
//! 4. `.sql-antipattern.toml` in current directory
//! 5. `~/.config/sql-antipattern-analyzer/config.toml`
//! 6. Default values
//!
//! # Configuration File Format
//!
//! ```toml
//! [rules]
//! enabled = []                      # empty means every rule
//! disabled = ["Foreign Key Exists"]
//!
//! [rules.severity]
//! "SELECT *" = "warn"
//!
//! [output]
//! verbose = false
//! color = true
//! min_severity = "warn"
//! max_statement_length = 1048576
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `SQL_ANTIPATTERN_DISABLED` | Comma-separated rule titles to disable |
//!
//! Rule titles are matched ignoring ASCII case. Unknown titles and
//! unparseable severities are rejected by [`RulesConfig::validate`] before
//! any statement is evaluated.

use std::{
    collections::HashMap,
    env, fs,
    path::{Path, PathBuf}
};

use serde::Deserialize;

use crate::{
    error::{AppResult, config_error},
    rules::{RuleRegistry, Severity}
};

/// Environment variable holding extra disabled rule titles
pub const DISABLED_ENV: &str = "SQL_ANTIPATTERN_DISABLED";

/// Default upper bound on statement length in bytes
pub const DEFAULT_MAX_STATEMENT_LENGTH: usize = 1024 * 1024;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub rules:  RulesConfig,
    #[serde(default)]
    pub output: OutputConfig
}

/// Rules configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RulesConfig {
    /// Rule titles to run; empty runs every rule
    #[serde(default)]
    pub enabled:  Vec<String>,
    /// Rule titles to skip, applied after `enabled`
    #[serde(default)]
    pub disabled: Vec<String>,
    /// Severity overrides (rule title -> severity)
    #[serde(default)]
    pub severity: HashMap<String, String>
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub verbose:              bool,
    pub color:                bool,
    /// Hide diagnostics below this severity
    pub min_severity:         Option<String>,
    /// Statements longer than this many bytes are rejected
    pub max_statement_length: usize
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            verbose:              false,
            color:                true,
            min_severity:         None,
            max_statement_length: DEFAULT_MAX_STATEMENT_LENGTH
        }
    }
}

impl RulesConfig {
    /// Returns whether the rule with this title should run
    pub fn is_enabled(&self, title: &str) -> bool {
        let listed = |titles: &[String]| titles.iter().any(|t| t.eq_ignore_ascii_case(title));
        (self.enabled.is_empty() || listed(&self.enabled)) && !listed(&self.disabled)
    }

    /// Severity override for the rule, if one is configured and valid
    pub fn severity_override(&self, title: &str) -> Option<Severity> {
        self.severity
            .iter()
            .find(|(t, _)| t.eq_ignore_ascii_case(title))
            .and_then(|(_, s)| s.parse().ok())
    }

    /// Check every title and severity against the registry.
    ///
    /// # Errors
    ///
    /// Fails on the first title no registered rule carries, on two severity
    /// overrides for the same rule, or on a severity that is not `info`,
    /// `warn`, `warning` or `error`.
    pub fn validate(&self, registry: &RuleRegistry) -> AppResult<()> {
        let titles = self
            .enabled
            .iter()
            .chain(self.disabled.iter())
            .chain(self.severity.keys());
        for title in titles {
            if !registry.contains(title) {
                let known: Vec<&str> = registry.titles().collect();
                return Err(config_error(format!(
                    "Unknown rule '{}' (known rules: {})",
                    title,
                    known.join(", ")
                )));
            }
        }
        let mut overridden: Vec<String> =
            self.severity.keys().map(|t| t.to_ascii_lowercase()).collect();
        overridden.sort_unstable();
        if let Some(pair) = overridden.windows(2).find(|pair| pair[0] == pair[1]) {
            let title = registry.get(&pair[0]).map_or(pair[0].as_str(), |r| r.title());
            return Err(config_error(format!(
                "Rule '{}' has more than one severity override",
                title
            )));
        }
        for (title, severity) in &self.severity {
            severity
                .parse::<Severity>()
                .map_err(|e| config_error(format!("Rule '{}': {}", title, e)))?;
        }
        Ok(())
    }
}

impl OutputConfig {
    /// Parsed minimum severity
    ///
    /// # Errors
    ///
    /// Fails if the configured value is not a severity name.
    pub fn min_severity(&self) -> AppResult<Option<Severity>> {
        self.min_severity
            .as_deref()
            .map(|s| s.parse::<Severity>().map_err(config_error))
            .transpose()
    }
}

impl Config {
    /// Load configuration from default files and environment
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. `explicit` file, when given
    /// 3. Config file in current directory (.sql-antipattern.toml)
    /// 4. Config file in home directory
    ///    (~/.config/sql-antipattern-analyzer/config.toml)
    /// 5. Default values
    pub fn load(explicit: Option<&Path>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(home) = env::var_os("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("sql-antipattern-analyzer")
                .join("config.toml");
            if home_config.exists() {
                config = Self::from_file(&home_config)?;
            }
        }

        let local_config = PathBuf::from(".sql-antipattern.toml");
        if local_config.exists() {
            config = Self::from_file(&local_config)?;
        }

        if let Some(path) = explicit {
            config = Self::from_file(path)?;
        }

        if let Ok(disabled) = env::var(DISABLED_ENV) {
            config.rules.disabled.extend(parse_title_list(&disabled));
        }

        Ok(config)
    }

    /// Load configuration from one TOML file
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            config_error(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&content)
            .map_err(|e| config_error(format!("Invalid config file '{}': {}", path.display(), e)))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Split a comma-separated list of rule titles
pub fn parse_title_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}
