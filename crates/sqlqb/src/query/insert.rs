use super::Query;
use crate::params::ParamList;
use crate::statement::{
    join_fragments, FieldList, FromStatement, Statement, TableMode, ValuesMode, ValuesStatement,
};
use crate::value::Value;

/// `INSERT INTO <table> (<cols>) VALUES (<?...>) [ON DUPLICATE KEY UPDATE <sql>]`
#[derive(Debug, Clone, PartialEq)]
pub struct InsertQuery {
    table: FromStatement,
    values: ValuesStatement,
    on_duplicate: Option<String>,
}

impl InsertQuery {
    pub fn new() -> Self {
        Self {
            table: FromStatement::new(TableMode::Insert),
            values: ValuesStatement::new(ValuesMode::Values),
            on_duplicate: None,
        }
    }

    /// Target table.
    pub fn table(&mut self, table: impl Into<FieldList>) -> &mut Self {
        self.table.add_table(table);
        self
    }

    /// Column/value pairs. Repeating a column overwrites its value.
    pub fn values<I, K, V>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.values.add_values(values);
        self
    }

    /// Trusted SQL appended as `ON DUPLICATE KEY UPDATE <sql>`.
    pub fn on_duplicate_key_update(&mut self, sql: impl Into<String>) -> &mut Self {
        self.on_duplicate = Some(sql.into());
        self
    }

    pub fn table_statement(&self) -> &FromStatement {
        &self.table
    }

    pub fn values_statement(&self) -> &ValuesStatement {
        &self.values
    }
}

impl Default for InsertQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl Statement for InsertQuery {
    fn render(&self, params: &mut ParamList) -> String {
        let on_duplicate = match self.on_duplicate.as_deref() {
            Some(sql) if !sql.is_empty() => format!("ON DUPLICATE KEY UPDATE {sql}"),
            _ => String::new(),
        };

        join_fragments([
            self.table.render(params),
            self.values.render(params),
            on_duplicate,
        ])
    }
}

impl Query for InsertQuery {}
