//! # SQL Anti-Pattern Analyzer Library
//!
//! Static analysis of raw SQL statements for schema and query design
//! anti-patterns: missing keys, wildcard selection, multi-valued
//! attributes, recursive self-references and generic key naming.
//!
//! The core is [`rules::RuleRegistry::evaluate`]: one keyword-normalized
//! statement in, an ordered vector of diagnostics out.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod rules;
pub mod statement;
