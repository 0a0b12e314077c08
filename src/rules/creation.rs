//! Rules about table definitions.
//!
//! Apart from "Multi-Valued Attribute", every rule here only looks at
//! `create table` statements. Absence rules in particular must stay gated,
//! or every query would be reported as missing a key.

use super::{Gate, PatternCategory, Rule, RuleInfo, Severity, TriggerPolicy};
use crate::error::AppResult;

const MULTI_VALUED_ATTRIBUTE_MESSAGE: &str = "\
Store each value in its own column and row:
Keeping a list of identifiers in a VARCHAR or TEXT column hurts both
performance and integrity. Searching it needs pattern matching, joining a
comma-separated list to the rows it names is awkward and slow, and the
database cannot check that each entry is a valid identifier. The length of
the list is also capped by the column size.
Move the values into a separate intersection table with one row per value.
It models the many-to-many relationship directly and makes the identifiers
easy to query, index and validate.
";

const RECURSIVE_DEPENDENCY_MESSAGE: &str = "\
Avoid recursive relationships:
Hierarchical data is common, but a foreign key from a table to itself makes
it awkward to query. Each level of the tree costs another join, and fetching
all ancestors or descendants of a node needs recursive queries.
A closure table that stores every path through the tree, not only direct
parent-child pairs, is one alternative. Path enumeration and nested sets are
others; pick the design that suits how the hierarchy is read and written.
";

const PRIMARY_KEY_EXISTS_MESSAGE: &str = "\
Consider adding a primary key:
A primary key constraint keeps duplicate rows out of a table, lets queries
address individual rows and is what foreign keys in other tables refer to.
Without one, finding and removing duplicates becomes your job. Nearly every
table should declare a primary key; use a compound key where it fits the
data.
";

const GENERIC_PRIMARY_KEY_MESSAGE: &str = "\
Skip the generic primary key (id):
Adding a column named id to every table is an arbitrary convention. It can
produce a redundant key next to the real natural key, or allow duplicate rows
when it takes part in a compound key.
The name itself carries no meaning, which hurts most in joins, where several
tables contribute a column called id. Name the key after what it identifies,
such as user_id or order_id.
";

const FOREIGN_KEY_EXISTS_MESSAGE: &str = "\
Consider adding a foreign key:
Leaving out foreign key constraints can look simpler or faster, but the cost
moves elsewhere: application code becomes responsible for referential
integrity and has to get it right everywhere.
Foreign keys also give you what application code cannot easily mimic:
cascading updates and deletes. With ON UPDATE and ON DELETE clauses the
database keeps child rows consistent when a parent row changes. Let
constraints make the schema mistake-proof.
";

const IMPRECISE_DATA_TYPE_MESSAGE: &str = "\
Use NUMERIC for exact values:
FLOAT, REAL and DOUBLE PRECISION store binary approximations, so many decimal
fractions cannot be represented exactly. Rounding errors accumulate in sums
and make equality comparisons unreliable, which is unacceptable for money and
other quantities that must add up.
Use NUMERIC or DECIMAL with an explicit precision and scale; keep floating
point types for measurements where approximation is acceptable.
";

fn creation_info(title: &'static str, message: &'static str, severity: Severity) -> RuleInfo {
    RuleInfo {
        title,
        message,
        severity,
        category: PatternCategory::Creation
    }
}

/// Identifier column typed as free text, suggesting a packed list of IDs
pub fn multi_valued_attribute() -> AppResult<Rule> {
    Rule::with_pattern(
        creation_info(
            "Multi-Valued Attribute",
            MULTI_VALUED_ATTRIBUTE_MESSAGE,
            Severity::Error
        ),
        Gate::Always,
        r"id\s+varchar|id\s+text|id\s+regexp",
        TriggerPolicy::MatchMeansViolation
    )
}

/// Foreign key referencing the table being defined
pub fn recursive_dependency() -> AppResult<Rule> {
    Rule::with_table_pattern(
        creation_info(
            "Recursive Dependency",
            RECURSIVE_DEPENDENCY_MESSAGE,
            Severity::Error
        ),
        r"references\s+",
        TriggerPolicy::MatchMeansViolation
    )
}

/// Table without a primary key
pub fn primary_key_exists() -> AppResult<Rule> {
    Rule::with_pattern(
        creation_info(
            "Primary Key Exists",
            PRIMARY_KEY_EXISTS_MESSAGE,
            Severity::Warning
        ),
        Gate::CreationStatement,
        "primary key",
        TriggerPolicy::AbsenceMeansViolation
    )
}

/// Column literally named `id`
pub fn generic_primary_key() -> AppResult<Rule> {
    Rule::with_pattern(
        creation_info(
            "Generic Primary Key",
            GENERIC_PRIMARY_KEY_MESSAGE,
            Severity::Error
        ),
        Gate::CreationStatement,
        r"[\s(,]id\s",
        TriggerPolicy::MatchMeansViolation
    )
}

/// Table without a foreign key
pub fn foreign_key_exists() -> AppResult<Rule> {
    Rule::with_pattern(
        creation_info(
            "Foreign Key Exists",
            FOREIGN_KEY_EXISTS_MESSAGE,
            Severity::Warning
        ),
        Gate::CreationStatement,
        "foreign key",
        TriggerPolicy::AbsenceMeansViolation
    )
}

/// Floating point column types
pub fn imprecise_data_type() -> AppResult<Rule> {
    Rule::with_pattern(
        creation_info(
            "Imprecise Data Type",
            IMPRECISE_DATA_TYPE_MESSAGE,
            Severity::Warning
        ),
        Gate::CreationStatement,
        r"\b(?:float|real|double precision)\b",
        TriggerPolicy::MatchMeansViolation
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::SqlStatement;

    fn fires(rule: AppResult<Rule>, sql: &str) -> bool {
        let rule = rule.unwrap();
        rule.check(&SqlStatement::from(sql), rule.info().severity)
            .is_some()
    }

    #[test]
    fn test_multi_valued_attribute() {
        assert!(fires(multi_valued_attribute(), "create table t (tag_id varchar(255))"));
        assert!(fires(multi_valued_attribute(), "create table t (account_id text)"));
        assert!(!fires(multi_valued_attribute(), "create table t (account_id int)"));
    }

    #[test]
    fn test_recursive_dependency() {
        let sql = "create table category (category_id int, parent_id int references category(category_id))";
        assert!(fires(recursive_dependency(), sql));
    }

    #[test]
    fn test_recursive_dependency_other_table() {
        let sql = "create table product (product_id int, category_id int references category)";
        assert!(!fires(recursive_dependency(), sql));
    }

    #[test]
    fn test_recursive_dependency_requires_whole_name() {
        let sql = "create table node (node_id int, kind int references node_kind)";
        assert!(!fires(recursive_dependency(), sql));
    }

    #[test]
    fn test_recursive_dependency_escapes_name() {
        let sql = "create table a.b* (x int, y int references a.b*)";
        assert!(fires(recursive_dependency(), sql));
        let other = "create table a.b* (x int, y int references aabbb)";
        assert!(!fires(recursive_dependency(), other));
    }

    #[test]
    fn test_recursive_dependency_long_name() {
        let name = "n".repeat(400_000);
        let sql = format!("create table {} (a int, b int references {}(a))", name, name);
        assert!(fires(recursive_dependency(), &sql));
        let other = format!("create table {} (a int, b int references {}x(a))", name, name);
        assert!(!fires(recursive_dependency(), &other));
    }

    #[test]
    fn test_primary_key_exists() {
        assert!(fires(primary_key_exists(), "create table t (a int)"));
        assert!(!fires(primary_key_exists(), "create table t (a int primary key)"));
        assert!(!fires(primary_key_exists(), "select a from t"));
    }

    #[test]
    fn test_generic_primary_key_variants() {
        assert!(fires(generic_primary_key(), "create table t (id int)"));
        assert!(fires(generic_primary_key(), "create table t (a int,id int)"));
        assert!(fires(generic_primary_key(), "create table t (a int, id serial)"));
        assert!(!fires(generic_primary_key(), "create table t (user_id int)"));
        assert!(!fires(generic_primary_key(), "select id from t"));
    }

    #[test]
    fn test_foreign_key_exists() {
        assert!(fires(foreign_key_exists(), "create table t (a int)"));
        assert!(!fires(
            foreign_key_exists(),
            "create table t (a int, foreign key (a) references u(a))"
        ));
        assert!(!fires(foreign_key_exists(), "select a from t"));
    }

    #[test]
    fn test_imprecise_data_type() {
        assert!(fires(imprecise_data_type(), "create table t (price float)"));
        assert!(fires(imprecise_data_type(), "create table t (price double precision)"));
        assert!(!fires(imprecise_data_type(), "create table t (price numeric(10, 2))"));
        assert!(!fires(imprecise_data_type(), "create table t (already_paid boolean)"));
    }
}
