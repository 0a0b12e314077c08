use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// SQL Anti-Pattern Analyzer - Flag schema and query design smells in SQL
#[derive(Parser, Debug)]
#[command(name = "sql-antipattern-analyzer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check SQL files for anti-patterns
    Check {
        /// SQL files to check (none or - reads stdin)
        files: Vec<PathBuf>,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        output_format: Format,

        /// Statement delimiter
        #[arg(short, long, default_value_t = ';')]
        delimiter: char,

        /// Hide diagnostics below this severity
        #[arg(long, value_enum)]
        min_severity: Option<SeverityArg>,

        /// Comma-separated rule titles to disable
        #[arg(long, value_delimiter = ',')]
        disable: Vec<String>,

        /// Print rule rationale and debug logs
        #[arg(short, long)]
        verbose: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool
    },
    /// List the registered rules
    Rules {
        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        output_format: Format,

        /// Include rule rationale
        #[arg(short, long)]
        verbose: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Format {
    Text,
    Json,
    Yaml
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SeverityArg {
    Info,
    Warn,
    Error
}
