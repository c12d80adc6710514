//! Parameterized SQL construction
//!
//! Builds the dynamic statements the repositories need: partial UPDATEs
//! where only the supplied columns appear in the SET clause, and filtered
//! SELECTs combining ILIKE conditions with offset pagination. Values are
//! always bound positionally; only compile-time column and table names
//! ever reach the SQL text.

use sqlx::postgres::PgArguments;
use sqlx::query::{Query, QueryAs};
use sqlx::Postgres;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// An owned value waiting to be bound to a `$n` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlArg {
    Text(String),
    Int(i32),
    BigInt(i64),
}

/// Bind a full argument list onto a query, preserving order.
pub fn bind_all<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    args: &'q [SqlArg],
) -> Query<'q, Postgres, PgArguments> {
    for arg in args {
        query = match arg {
            SqlArg::Text(s) => query.bind(s.as_str()),
            SqlArg::Int(i) => query.bind(*i),
            SqlArg::BigInt(i) => query.bind(*i),
        };
    }
    query
}

/// Same as [`bind_all`] for `query_as` row-mapping queries.
pub fn bind_all_as<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    args: &'q [SqlArg],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for arg in args {
        query = match arg {
            SqlArg::Text(s) => query.bind(s.as_str()),
            SqlArg::Int(i) => query.bind(*i),
            SqlArg::BigInt(i) => query.bind(*i),
        };
    }
    query
}

/// A sanitized pagination window.
///
/// Construct via [`Page::clamped`] so missing or non-positive input falls
/// back to the defaults instead of erroring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
}

impl Page {
    pub fn clamped(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.filter(|p| *p >= 1).unwrap_or(DEFAULT_PAGE),
            limit: limit.filter(|l| *l >= 1).unwrap_or(DEFAULT_LIMIT),
        }
    }

    pub fn offset(&self) -> i64 {
        // page/limit come straight from query strings; extreme values
        // must saturate rather than overflow the multiply.
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::clamped(None, None)
    }
}

/// Builds `UPDATE <table> SET c1 = $1, ... WHERE <key> = $n` from the
/// columns that were actually supplied, in the order they were added.
///
/// An empty builder produces no statement at all - the caller treats that
/// as a successful no-op rather than executing anything.
pub struct UpdateBuilder {
    table: &'static str,
    key: &'static str,
    assignments: Vec<(&'static str, SqlArg)>,
}

impl UpdateBuilder {
    pub fn new(table: &'static str, key: &'static str) -> Self {
        Self {
            table,
            key,
            assignments: Vec::new(),
        }
    }

    /// Add an assignment for a column.
    pub fn set(mut self, column: &'static str, value: SqlArg) -> Self {
        self.assignments.push((column, value));
        self
    }

    /// Add an assignment only when the field was supplied.
    pub fn set_opt(self, column: &'static str, value: Option<SqlArg>) -> Self {
        match value {
            Some(value) => self.set(column, value),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Produce the statement and its bind list, keyed to `key_value`.
    /// Returns `None` when no assignments were added.
    pub fn build(self, key_value: i32) -> Option<(String, Vec<SqlArg>)> {
        if self.assignments.is_empty() {
            return None;
        }

        let mut args = Vec::with_capacity(self.assignments.len() + 1);
        let mut sets = Vec::with_capacity(self.assignments.len());
        for (n, (column, value)) in self.assignments.into_iter().enumerate() {
            sets.push(format!("{} = ${}", column, n + 1));
            args.push(value);
        }

        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ${}",
            self.table,
            sets.join(", "),
            self.key,
            args.len() + 1
        );
        args.push(SqlArg::Int(key_value));

        Some((sql, args))
    }
}

/// Builds a filtered, paginated SELECT.
///
/// Conditions are conjunctive, so every added filter can only narrow the
/// result set. Ordering is always by the given id column ascending, which
/// keeps page windows stable between requests.
pub struct SelectBuilder {
    base: String,
    order_by: &'static str,
    conditions: Vec<String>,
    args: Vec<SqlArg>,
}

impl SelectBuilder {
    /// `base` is the SELECT ... FROM (plus any JOINs); `order_by` the id
    /// column used for deterministic ordering.
    pub fn new(base: &str, order_by: &'static str) -> Self {
        Self {
            base: base.to_string(),
            order_by,
            conditions: Vec::new(),
            args: Vec::new(),
        }
    }

    /// Add a case-insensitive substring condition on a column.
    /// Absent or empty values mean "filter not applied" and are skipped.
    pub fn ilike(mut self, column: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            if !value.is_empty() {
                self.conditions
                    .push(format!("{} ILIKE ${}", column, self.args.len() + 1));
                self.args.push(SqlArg::Text(format!("%{}%", value)));
            }
        }
        self
    }

    /// Produce the statement and its bind list for one page window.
    pub fn build(mut self, page: &Page) -> (String, Vec<SqlArg>) {
        let mut sql = self.base;

        if !self.conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.conditions.join(" AND "));
        }

        sql.push_str(&format!(
            " ORDER BY {} LIMIT ${} OFFSET ${}",
            self.order_by,
            self.args.len() + 1,
            self.args.len() + 2
        ));
        self.args.push(SqlArg::BigInt(page.limit));
        self.args.push(SqlArg::BigInt(page.offset()));

        (sql, self.args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn page_defaults_when_missing() {
        let page = Page::clamped(None, None);
        assert_eq!(page, Page { page: 1, limit: 10 });
    }

    #[test]
    fn page_defaults_when_non_positive() {
        let page = Page::clamped(Some(0), Some(-5));
        assert_eq!(page, Page { page: 1, limit: 10 });
    }

    #[test]
    fn page_keeps_valid_values() {
        let page = Page::clamped(Some(3), Some(25));
        assert_eq!(page, Page { page: 3, limit: 25 });
        assert_eq!(page.offset(), 50);
    }

    #[test]
    fn first_page_has_zero_offset() {
        assert_eq!(Page::default().offset(), 0);
    }

    #[test]
    fn offset_saturates_on_extreme_input() {
        let page = Page::clamped(Some(i64::MAX), Some(10));
        assert_eq!(page.offset(), i64::MAX);

        let page = Page::clamped(Some(i64::MAX), Some(i64::MAX));
        assert_eq!(page.offset(), i64::MAX);
    }

    #[test]
    fn update_builder_orders_assignments_as_declared() {
        let (sql, args) = UpdateBuilder::new("songs", "id")
            .set("name", SqlArg::Text("Enter Sandman".into()))
            .set("group_id", SqlArg::Int(4))
            .build(9)
            .unwrap();

        assert_eq!(sql, "UPDATE songs SET name = $1, group_id = $2 WHERE id = $3");
        assert_eq!(
            args,
            vec![
                SqlArg::Text("Enter Sandman".into()),
                SqlArg::Int(4),
                SqlArg::Int(9),
            ]
        );
    }

    #[test]
    fn update_builder_skips_absent_fields() {
        let (sql, args) = UpdateBuilder::new("songs", "id")
            .set_opt("name", None)
            .set_opt("group_id", Some(SqlArg::Int(2)))
            .build(5)
            .unwrap();

        assert_eq!(sql, "UPDATE songs SET group_id = $1 WHERE id = $2");
        assert_eq!(args, vec![SqlArg::Int(2), SqlArg::Int(5)]);
    }

    #[test]
    fn update_builder_with_no_fields_builds_nothing() {
        let builder = UpdateBuilder::new("groups", "id").set_opt("name", None);
        assert!(builder.is_empty());
        assert_eq!(builder.build(1), None);
    }

    #[test]
    fn select_without_filters_has_no_where_clause() {
        let (sql, args) =
            SelectBuilder::new("SELECT id, name FROM groups", "id").build(&Page::default());

        assert_eq!(sql, "SELECT id, name FROM groups ORDER BY id LIMIT $1 OFFSET $2");
        assert_eq!(args, vec![SqlArg::BigInt(10), SqlArg::BigInt(0)]);
    }

    #[test]
    fn select_combines_filters_conjunctively() {
        let (sql, args) = SelectBuilder::new("SELECT id, name FROM groups", "id")
            .ilike("name", Some("quee"))
            .ilike("link", Some("example.com"))
            .build(&Page::clamped(Some(2), Some(5)));

        assert_eq!(
            sql,
            "SELECT id, name FROM groups WHERE name ILIKE $1 AND link ILIKE $2 \
             ORDER BY id LIMIT $3 OFFSET $4"
        );
        assert_eq!(
            args,
            vec![
                SqlArg::Text("%quee%".into()),
                SqlArg::Text("%example.com%".into()),
                SqlArg::BigInt(5),
                SqlArg::BigInt(5),
            ]
        );
    }

    #[test]
    fn select_skips_empty_and_absent_filter_values() {
        let (sql, _) = SelectBuilder::new("SELECT id, name FROM groups", "id")
            .ilike("name", Some(""))
            .ilike("link", None)
            .build(&Page::default());

        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn filter_values_never_appear_in_sql_text() {
        let hostile = "'; DROP TABLE groups; --";
        let (sql, args) = SelectBuilder::new("SELECT id, name FROM groups", "id")
            .ilike("name", Some(hostile))
            .build(&Page::default());

        assert!(!sql.contains(hostile));
        assert_eq!(args[0], SqlArg::Text(format!("%{}%", hostile)));
    }
}
