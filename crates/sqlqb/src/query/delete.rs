use super::Query;
use crate::params::ParamList;
use crate::statement::{
    join_fragments, FieldList, FromStatement, LimitStatement, OrderStatement, Statement,
    TableMode, WhereStatement,
};

/// `DELETE FROM <table> WHERE ... ORDER BY ... LIMIT ...`
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteQuery {
    table: FromStatement,
    where_clause: WhereStatement,
    order_by: OrderStatement,
    limit: LimitStatement,
}

impl DeleteQuery {
    pub fn new() -> Self {
        Self {
            table: FromStatement::new(TableMode::Delete),
            where_clause: WhereStatement::new(),
            order_by: OrderStatement::new(),
            limit: LimitStatement::new(),
        }
    }

    /// Target table.
    pub fn from(&mut self, table: impl Into<FieldList>) -> &mut Self {
        self.table.add_table(table);
        self
    }

    impl_where_methods!(where_clause);
    impl_order_limit_methods!();

    pub fn table_statement(&self) -> &FromStatement {
        &self.table
    }
}

impl Default for DeleteQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl Statement for DeleteQuery {
    fn render(&self, params: &mut ParamList) -> String {
        join_fragments([
            self.table.render(params),
            self.where_clause.render(params),
            self.order_by.render(params),
            self.limit.render(params),
        ])
    }
}

impl Query for DeleteQuery {}
