//! Splitting script text into statements and normalizing keyword casing.

use std::sync::Arc;

use serde::Serialize;

use super::SqlStatement;

/// A statement together with where it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceStatement {
    /// File path, or `stdin`
    pub source:    Arc<str>,
    /// 1-based line the statement starts on
    pub line:      usize,
    pub statement: SqlStatement
}

impl SourceStatement {
    pub fn new(source: impl Into<Arc<str>>, line: usize, statement: impl Into<SqlStatement>) -> Self {
        Self {
            source: source.into(),
            line,
            statement: statement.into()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    Quoted(char),
    LineComment,
    BlockComment
}

/// Statement text collected so far and the line it started on.
#[derive(Default)]
struct Pending {
    text: String,
    line: Option<usize>
}

impl Pending {
    fn push(&mut self, ch: char, line: usize) {
        if self.line.is_none() && !ch.is_whitespace() {
            self.line = Some(line);
        }
        self.text.push(ch);
    }

    fn take(&mut self, source: &Arc<str>, current_line: usize) -> Option<SourceStatement> {
        let text = std::mem::take(&mut self.text);
        let line = self.line.take().unwrap_or(current_line);
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(SourceStatement {
            source: Arc::clone(source),
            line,
            statement: SqlStatement::from(trimmed)
        })
    }
}

/// Splits script text into statements on `delimiter`.
///
/// Delimiters inside quoted literals and identifiers are kept. `--` line
/// comments and `/* */` block comments are dropped. Empty statements are
/// skipped, and a trailing statement without a delimiter is kept.
///
/// # Example
///
/// ```
/// use sql_antipattern_analyzer::statement::split_statements;
///
/// let sql = "select 1;\n-- note\nselect ';' from t;";
/// let statements = split_statements("inline", sql, ';');
///
/// assert_eq!(statements.len(), 2);
/// assert_eq!(statements[1].line, 3);
/// assert_eq!(statements[1].statement.as_str(), "select ';' from t");
/// ```
pub fn split_statements(source: &str, sql: &str, delimiter: char) -> Vec<SourceStatement> {
    let source: Arc<str> = Arc::from(source);
    let mut statements = Vec::new();
    let mut pending = Pending::default();
    let mut state = State::Code;
    let mut line = 1;
    let mut chars = sql.chars().peekable();

    while let Some(ch) = chars.next() {
        match state {
            State::Code if ch == delimiter => {
                statements.extend(pending.take(&source, line));
            }
            State::Code => match ch {
                '-' if chars.peek() == Some(&'-') => {
                    chars.next();
                    state = State::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = State::BlockComment;
                }
                '\'' | '"' | '`' => {
                    state = State::Quoted(ch);
                    pending.push(ch, line);
                }
                _ => pending.push(ch, line)
            },
            State::Quoted(quote) => {
                pending.push(ch, line);
                if ch == quote {
                    state = State::Code;
                }
            }
            State::LineComment => {
                if ch == '\n' {
                    state = State::Code;
                    pending.push(ch, line);
                }
            }
            State::BlockComment => {
                if ch == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = State::Code;
                    pending.push(' ', line);
                }
            }
        }
        if ch == '\n' {
            line += 1;
        }
    }
    statements.extend(pending.take(&source, line));
    statements
}

/// Lower-cases statement text and collapses whitespace runs.
///
/// Text inside quotes is copied unchanged, so string literals and quoted
/// identifiers keep their case and spacing.
///
/// # Example
///
/// ```
/// use sql_antipattern_analyzer::statement::normalize;
///
/// assert_eq!(
///     normalize("SELECT  *\n  FROM Users WHERE name = 'Ann  Lee'"),
///     "select * from users where name = 'Ann  Lee'"
/// );
/// ```
pub fn normalize(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut quote: Option<char> = None;
    let mut pending_space = false;
    for ch in sql.chars() {
        match quote {
            Some(q) => {
                out.push(ch);
                if ch == q {
                    quote = None;
                }
            }
            None if ch.is_whitespace() => pending_space = !out.is_empty(),
            None => {
                if pending_space {
                    out.push(' ');
                    pending_space = false;
                }
                if matches!(ch, '\'' | '"' | '`') {
                    quote = Some(ch);
                }
                out.extend(ch.to_lowercase());
            }
        }
    }
    out
}
