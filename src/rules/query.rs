use super::{Gate, PatternCategory, Rule, RuleInfo, Severity, TriggerPolicy};
use crate::error::AppResult;

const SELECT_STAR_MESSAGE: &str = "\
Inefficient data transfer:
Selecting every column usually fetches more than the application needs. The
extra columns travel from the server to the client, add load on both ends and
take longer to cross the network. The cost grows silently as columns that no
consumer asked for are added to the table later.

Index usage:
A query that only reads the columns it needs can be served from a covering
index. With `*` that is impossible, and even an index covering every column
stops covering the query as soon as someone adds a column, so performance can
drop sharply with no change to the query itself.

Binding problems:
Joining two tables with `*` can return two columns of the same name, such as
two `id` columns, and the consumer has no reliable way to tell them apart.
Views defined with `*` may also return stale or misaligned data after the
underlying tables change. List the columns explicitly.
";

/// `select *` instead of an explicit column list
pub fn select_star() -> AppResult<Rule> {
    Rule::with_pattern(
        RuleInfo {
            title:    "SELECT *",
            message:  SELECT_STAR_MESSAGE,
            severity: Severity::Error,
            category: PatternCategory::Query
        },
        Gate::Always,
        r"select\s+\*",
        TriggerPolicy::MatchMeansViolation
    )
}
