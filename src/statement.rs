//! SQL statement text and the light textual analysis rules rely on.
//!
//! The analyzer never builds a syntax tree. A [`SqlStatement`] is the raw
//! text of exactly one statement, and everything rules need to know about
//! its shape comes from plain text inspection:
//!
//! - [`is_creation_statement`] - cheap pre-filter for table definitions
//! - [`extract_table_name`] - the identifier a `create table` defines
//!
//! # Keyword casing
//!
//! Rules match lower-case keywords (`create table`, `primary key`). Input is
//! expected to be keyword-normalized before evaluation; [`normalize`] does
//! that for callers that read statements from files.
//!
//! ```
//! use sql_antipattern_analyzer::statement::{extract_table_name, normalize};
//!
//! let sql = normalize("CREATE TABLE Users (ID INT)");
//! assert_eq!(sql, "create table users (id int)");
//! assert_eq!(extract_table_name(&sql), "users");
//! ```

mod classify;
mod split;

use std::fmt;

use serde::Serialize;

pub use classify::{extract_table_name, is_creation_statement};
pub use split::{SourceStatement, normalize, split_statements};

/// Text of a single SQL statement, without the statement separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SqlStatement(String);

impl SqlStatement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self(sql.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for SqlStatement {
    fn from(sql: &str) -> Self {
        Self(sql.to_string())
    }
}

impl From<String> for SqlStatement {
    fn from(sql: String) -> Self {
        Self(sql)
    }
}

impl AsRef<str> for SqlStatement {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SqlStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
