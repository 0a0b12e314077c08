//! # SQL Anti-Pattern Analyzer
//!
//! Flags database design smells in raw SQL text.
//!
//! # Quick Start
//!
//! ```bash
//! # Check a schema file
//! sql-antipattern-analyzer check schema.sql
//!
//! # Stream statements from stdin, machine readable
//! cat migrations/*.sql | sql-antipattern-analyzer check -f json
//!
//! # Only report errors, with rationale
//! sql-antipattern-analyzer check schema.sql --min-severity error -v
//!
//! # Show the rules and whether they are enabled
//! sql-antipattern-analyzer rules
//! ```
//!
//! # Exit Codes
//!
//! - `0` - No diagnostics, or only informational ones
//! - `1` - Warnings found, or the run failed
//! - `2` - Errors found
//!
//! Set `RUST_LOG` to control log output on stderr; `--verbose` defaults it
//! to `debug`.

use std::process;

use clap::Parser;
use sql_antipattern_analyzer::{
    app::{CheckParams, RulesParams, run_check, run_rules},
    cli::{Cli, Commands},
    config::Config,
    error::AppResult
};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);
    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e.render_message());
            process::exit(1);
        }
    }
}

fn init_tracing(cli: &Cli) {
    let verbose = match &cli.command {
        Commands::Check {
            verbose, ..
        }
        | Commands::Rules {
            verbose, ..
        } => *verbose
    };
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> AppResult<i32> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Check {
            files,
            output_format,
            delimiter,
            min_severity,
            disable,
            verbose,
            no_color
        } => {
            let params = CheckParams {
                inputs: files.iter().map(|p| p.display().to_string()).collect(),
                output_format,
                delimiter,
                min_severity,
                disable,
                verbose,
                no_color
            };
            let result = run_check(params, config)?;
            print!("{}", result.output);
            Ok(result.exit_code)
        }
        Commands::Rules {
            output_format,
            verbose,
            no_color
        } => {
            let output = run_rules(
                RulesParams {
                    output_format,
                    verbose,
                    no_color
                },
                config
            )?;
            print!("{}", output);
            Ok(0)
        }
    }
}
