//! Statement shape detection.

/// Keyword sequence that opens a table definition.
const CREATE_TABLE: &str = "create table";

/// Optional guard between `create table` and the table name.
const EXISTENCE_GUARD: [&str; 3] = ["if", "not", "exists"];

/// Returns true if the statement defines a table.
///
/// # Example
///
/// ```
/// use sql_antipattern_analyzer::statement::is_creation_statement;
///
/// assert!(is_creation_statement("create table users (user_id int)"));
/// assert!(!is_creation_statement("select id from users"));
/// ```
pub fn is_creation_statement(sql: &str) -> bool {
    sql.contains(CREATE_TABLE)
}

/// Extracts the name of the table a `create table` statement defines.
///
/// Whitespace after the keywords is skipped, an `if not exists` guard is
/// stepped over, and the name ends at the first whitespace, `(` or `;`.
/// Returns an empty string when the statement is not a table definition or
/// nothing follows the keywords.
///
/// # Example
///
/// ```
/// use sql_antipattern_analyzer::statement::extract_table_name;
///
/// assert_eq!(extract_table_name("create table Users (id int)"), "Users");
/// assert_eq!(extract_table_name("create table Users(id int)"), "Users");
/// assert_eq!(extract_table_name("create table if not exists Users (id int)"), "Users");
/// assert_eq!(extract_table_name("select * from Users"), "");
/// ```
pub fn extract_table_name(sql: &str) -> &str {
    let Some(pos) = sql.find(CREATE_TABLE) else {
        return "";
    };
    let rest = skip_existence_guard(sql[pos + CREATE_TABLE.len()..].trim_start());
    let end = rest
        .find(|c: char| c.is_whitespace() || c == '(' || c == ';')
        .unwrap_or(rest.len());
    &rest[..end]
}

fn skip_existence_guard(rest: &str) -> &str {
    let mut tail = rest;
    for keyword in EXISTENCE_GUARD {
        match tail.strip_prefix(keyword) {
            Some(after) if after.is_empty() || after.starts_with(char::is_whitespace) => {
                tail = after.trim_start();
            }
            _ => return rest
        }
    }
    tail
}
