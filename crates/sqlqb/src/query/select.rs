use super::Query;
use crate::condition::Filter;
use crate::params::ParamList;
use crate::statement::{
    join_fragments, FieldList, FromStatement, LimitStatement, OrderStatement, SelectStatement,
    Statement, TableMode, UnionStatement, UnionType, WhereStatement,
};

/// `SELECT ... FROM ... WHERE ... GROUP BY ... HAVING ... ORDER BY ... LIMIT ... UNION ...`
///
/// A query whose field list and tables are both empty renders as a bare
/// condition expression, which is what subqueries used inside WHERE produce:
///
/// ```
/// use sqlqb::prelude::*;
///
/// let mut q = SelectQuery::new();
/// q.select_statement_mut().clear_fields();
/// q.where_(("x", 1));
/// assert_eq!(q.to_sql(), "`x` = ?");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    select: SelectStatement,
    from: FromStatement,
    where_clause: WhereStatement,
    group_by: OrderStatement,
    having: WhereStatement,
    order_by: OrderStatement,
    limit: LimitStatement,
    union: UnionStatement,
}

impl SelectQuery {
    /// An empty `SELECT *`.
    pub fn new() -> Self {
        Self {
            select: SelectStatement::new(),
            from: FromStatement::new(TableMode::From),
            where_clause: WhereStatement::new(),
            group_by: OrderStatement::group_by(),
            having: WhereStatement::having(),
            order_by: OrderStatement::new(),
            limit: LimitStatement::new(),
            union: UnionStatement::new(),
        }
    }

    /// Replace the field list.
    pub fn select(&mut self, fields: impl Into<FieldList>) -> &mut Self {
        self.select.clear_fields().add_fields(fields);
        self
    }

    /// Replace the field list with `function(field)`. The function name is
    /// emitted as given.
    pub fn aggregate(&mut self, function: &str, field: &str) -> &mut Self {
        let expr = format!("{function}({field})");
        self.select.clear_fields().add_fields(vec![expr]);
        self
    }

    /// `SELECT COUNT(field)`.
    pub fn count(&mut self, field: &str) -> &mut Self {
        self.aggregate("COUNT", field)
    }

    pub fn sum(&mut self, field: &str) -> &mut Self {
        self.aggregate("SUM", field)
    }

    pub fn average(&mut self, field: &str) -> &mut Self {
        self.aggregate("AVG", field)
    }

    pub fn min(&mut self, field: &str) -> &mut Self {
        self.aggregate("MIN", field)
    }

    pub fn max(&mut self, field: &str) -> &mut Self {
        self.aggregate("MAX", field)
    }

    /// Add tables to the FROM list.
    pub fn from(&mut self, tables: impl Into<FieldList>) -> &mut Self {
        self.from.add_table(tables);
        self
    }

    /// Add a join; `on` is trusted SQL, `using` a comma-separated column list.
    pub fn join(
        &mut self,
        tables: impl Into<FieldList>,
        on: Option<&str>,
        using: Option<&str>,
        join_type: &str,
    ) -> &mut Self {
        self.from.add_join(tables, on, using, join_type);
        self
    }

    pub fn group_by(&mut self, fields: impl Into<FieldList>) -> &mut Self {
        self.group_by.add_fields(fields, None);
        self
    }

    /// Add a HAVING condition, joined with `AND`.
    pub fn having(&mut self, filter: impl Into<Filter>) -> &mut Self {
        self.having.add_condition(filter);
        self
    }

    /// Add a HAVING condition, joined with `OR`.
    pub fn or_having(&mut self, filter: impl Into<Filter>) -> &mut Self {
        self.having.add_or_condition(filter);
        self
    }

    /// Append `UNION [ALL|DISTINCT] <query>`; the query is copied.
    pub fn union(&mut self, query: &SelectQuery, union_type: UnionType) -> &mut Self {
        self.union.add_query(query.clone(), union_type);
        self
    }

    impl_where_methods!(where_clause);
    impl_order_limit_methods!();

    pub fn select_statement(&self) -> &SelectStatement {
        &self.select
    }

    /// Direct access to the field list, e.g. to clear the default `*`.
    pub fn select_statement_mut(&mut self) -> &mut SelectStatement {
        &mut self.select
    }

    pub fn from_statement(&self) -> &FromStatement {
        &self.from
    }

    pub fn group_statement(&self) -> &OrderStatement {
        &self.group_by
    }

    pub fn having_statement(&self) -> &WhereStatement {
        &self.having
    }

    pub fn union_statement(&self) -> &UnionStatement {
        &self.union
    }
}

impl Default for SelectQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl Statement for SelectQuery {
    fn render(&self, params: &mut ParamList) -> String {
        let parts = [
            self.select.render(params),
            self.from.render(params),
            self.where_clause.render(params),
            self.group_by.render(params),
            self.having.render(params),
            self.order_by.render(params),
            self.limit.render(params),
            self.union.render(params),
        ];

        let sql = join_fragments(parts);
        match sql.strip_prefix("WHERE ") {
            Some(rest) => rest.to_string(),
            None => sql,
        }
    }
}

impl Query for SelectQuery {}
