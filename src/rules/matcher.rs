//! Pattern matching with an explicit trigger policy.
//!
//! A [`PatternMatcher`] pairs one regular expression with a
//! [`TriggerPolicy`] that says whether finding the pattern or failing to find
//! it is the violation. Matching is an unanchored search over the whole
//! statement. The `regex` crate runs in time linear in the input, so
//! adversarial statement text cannot cause catastrophic backtracking.

use std::fmt;

use regex::Regex;

/// When a rule's pattern counts as a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerPolicy {
    /// The pattern being present is the anti-pattern
    MatchMeansViolation,
    /// The pattern being absent is the anti-pattern (missing keys)
    AbsenceMeansViolation
}

impl TriggerPolicy {
    /// Resolves a search result into a violation decision.
    pub fn resolves(self, found: bool) -> bool {
        match self {
            Self::MatchMeansViolation => found,
            Self::AbsenceMeansViolation => !found
        }
    }
}

/// A compiled pattern and its trigger policy.
///
/// # Example
///
/// ```
/// use sql_antipattern_analyzer::rules::{PatternMatcher, TriggerPolicy};
///
/// let missing_pk = PatternMatcher::new("primary key", TriggerPolicy::AbsenceMeansViolation)?;
/// assert!(missing_pk.is_violation("create table t (a int)"));
/// assert!(!missing_pk.is_violation("create table t (a int primary key)"));
/// # Ok::<(), regex::Error>(())
/// ```
#[derive(Clone)]
pub struct PatternMatcher {
    regex:  Regex,
    policy: TriggerPolicy
}

impl PatternMatcher {
    /// Compiles a static pattern.
    pub fn new(pattern: &str, policy: TriggerPolicy) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            policy
        })
    }

    /// Compiles a pattern built around a literal fragment known only at
    /// evaluation time.
    ///
    /// `literal` is escaped, so identifiers such as `a.b*` match themselves
    /// and cannot inject pattern syntax. `prefix` and `suffix` are pattern
    /// text. The compiled size grows with `literal`, so a very long fragment
    /// can exceed the `regex` size limit and fail;
    /// [`is_found_before`](Self::is_found_before) has no such limit.
    ///
    /// ```
    /// use sql_antipattern_analyzer::rules::{PatternMatcher, TriggerPolicy};
    ///
    /// let m = PatternMatcher::with_literal(
    ///     r"references\s+",
    ///     "a.b*",
    ///     "",
    ///     TriggerPolicy::MatchMeansViolation
    /// )?;
    /// assert!(m.is_found("references a.b*"));
    /// assert!(!m.is_found("references axbbb"));
    /// # Ok::<(), regex::Error>(())
    /// ```
    pub fn with_literal(
        prefix: &str,
        literal: &str,
        suffix: &str,
        policy: TriggerPolicy
    ) -> Result<Self, regex::Error> {
        let pattern = format!("{}{}{}", prefix, regex::escape(literal), suffix);
        Self::new(&pattern, policy)
    }

    /// Returns whether some match of the pattern is directly followed by
    /// `token` as a whole word.
    ///
    /// `token` is compared as plain text, never compiled, so identifiers such
    /// as `a.b*` match themselves and any length is accepted. The token must
    /// end at whitespace, `(`, `)`, `,`, `;` or the end of the statement.
    ///
    /// ```
    /// use sql_antipattern_analyzer::rules::{PatternMatcher, TriggerPolicy};
    ///
    /// let m = PatternMatcher::new(r"references\s+", TriggerPolicy::MatchMeansViolation)?;
    /// assert!(m.is_found_before("references a.b* (id)", "a.b*"));
    /// assert!(!m.is_found_before("references axbbb", "a.b*"));
    /// assert!(!m.is_found_before("references ab", "a"));
    /// # Ok::<(), regex::Error>(())
    /// ```
    pub fn is_found_before(&self, sql: &str, token: &str) -> bool {
        self.regex.find_iter(sql).any(|m| {
            sql[m.end()..]
                .strip_prefix(token)
                .is_some_and(|rest| rest.chars().next().is_none_or(ends_token))
        })
    }

    /// Token-scoped counterpart of [`is_violation`](Self::is_violation).
    pub fn is_violation_before(&self, sql: &str, token: &str) -> bool {
        self.policy.resolves(self.is_found_before(sql, token))
    }

    /// Returns whether the pattern occurs anywhere in the statement.
    pub fn is_found(&self, sql: &str) -> bool {
        self.regex.is_match(sql)
    }

    /// Returns whether the statement violates the rule under this policy.
    pub fn is_violation(&self, sql: &str) -> bool {
        self.policy.resolves(self.is_found(sql))
    }

    pub fn policy(&self) -> TriggerPolicy {
        self.policy
    }

    /// Pattern source text.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

fn ends_token(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | ',' | ';')
}

impl fmt::Debug for PatternMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternMatcher")
            .field("pattern", &self.regex.as_str())
            .field("policy", &self.policy)
            .finish()
    }
}
