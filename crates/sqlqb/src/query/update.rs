use super::Query;
use crate::params::ParamList;
use crate::statement::{
    join_fragments, FieldList, FromStatement, LimitStatement, OrderStatement, Statement,
    TableMode, ValuesMode, ValuesStatement, WhereStatement,
};
use crate::value::Value;

/// `UPDATE <table> SET ... WHERE ... ORDER BY ... LIMIT ...`
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateQuery {
    table: FromStatement,
    set: ValuesStatement,
    where_clause: WhereStatement,
    order_by: OrderStatement,
    limit: LimitStatement,
}

impl UpdateQuery {
    pub fn new() -> Self {
        Self {
            table: FromStatement::new(TableMode::Update),
            set: ValuesStatement::new(ValuesMode::Set),
            where_clause: WhereStatement::new(),
            order_by: OrderStatement::new(),
            limit: LimitStatement::new(),
        }
    }

    /// Target table.
    pub fn table(&mut self, table: impl Into<FieldList>) -> &mut Self {
        self.table.add_table(table);
        self
    }

    /// Column/value assignments for `SET`.
    pub fn values<I, K, V>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.set.add_values(values);
        self
    }

    impl_where_methods!(where_clause);
    impl_order_limit_methods!();

    pub fn table_statement(&self) -> &FromStatement {
        &self.table
    }

    pub fn set_statement(&self) -> &ValuesStatement {
        &self.set
    }
}

impl Default for UpdateQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl Statement for UpdateQuery {
    fn render(&self, params: &mut ParamList) -> String {
        join_fragments([
            self.table.render(params),
            self.set.render(params),
            self.where_clause.render(params),
            self.order_by.render(params),
            self.limit.render(params),
        ])
    }
}

impl Query for UpdateQuery {}
