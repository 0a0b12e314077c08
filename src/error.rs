pub use masterror::{AppError, AppResult};

/// Create file read error
pub fn file_read_error(path: &str, source: std::io::Error) -> AppError {
    AppError::internal(format!("Failed to read file '{}': {}", path, source))
}

/// Create config error
pub fn config_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}

/// Create rule pattern compilation error
///
/// A pattern that fails to compile is a defect in the rule definition, so
/// this is reported as an internal error rather than a bad request.
pub fn pattern_error(title: &str, pattern: &str, source: regex::Error) -> AppError {
    AppError::internal(format!(
        "Rule '{}' has an invalid pattern `{}`: {}",
        title,
        truncate(pattern, 120),
        source
    ))
}

/// Create input error for statements the analyzer refuses to evaluate
pub fn input_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate("select", 10), "select");
    }

    #[test]
    fn test_truncate_long_text() {
        assert_eq!(truncate("abcdef", 3), "abc...");
    }

    #[test]
    fn test_pattern_error_builds() {
        let err = regex::Regex::new("(").unwrap_err();
        let error = pattern_error("SELECT *", "(", err);
        assert!(!error.to_string().is_empty());
    }
}
