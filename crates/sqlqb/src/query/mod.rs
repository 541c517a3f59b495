//! Statement assemblers.
//!
//! A query owns its clause builders and renders them in a fixed order:
//!
//! | query    | clause order                                                      |
//! |----------|-------------------------------------------------------------------|
//! | `SELECT` | select, from, where, group by, having, order by, limit, union     |
//! | `INSERT` | table, values, on duplicate key update                            |
//! | `UPDATE` | table, set, where, order by, limit                                |
//! | `DELETE` | table, where, order by, limit                                     |
//!
//! ```
//! use sqlqb::prelude::*;
//!
//! let mut q = sqlqb::select("id, name");
//! q.from("users").where_(("status", "active")).limit(10, 0);
//!
//! let built = q.build();
//! assert_eq!(built.sql, "SELECT `id`, `name` FROM `users` WHERE `status` = ? LIMIT 10");
//! assert_eq!(built.values, vec![Value::from("active")]);
//! ```

#[macro_use]
mod macros;

mod delete;
mod insert;
mod raw;
mod select;
mod update;

pub use delete::DeleteQuery;
pub use insert::InsertQuery;
pub use raw::SqlQuery;
pub use select::SelectQuery;
pub use update::UpdateQuery;

use crate::params::ParamList;
use crate::statement::{FieldList, Statement};
use crate::value::Value;

/// Rendered SQL plus its positional values.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub values: Vec<Value>,
}

/// A complete statement that can be rendered on its own.
///
/// Building does not mutate the query; calling [`build`](Query::build)
/// twice yields equal results.
pub trait Query: Statement {
    fn build(&self) -> BuiltQuery {
        let mut params = ParamList::new();
        let sql = self.render(&mut params);
        BuiltQuery {
            sql,
            values: params.into_values(),
        }
    }

    fn to_sql(&self) -> String {
        self.build().sql
    }

    fn to_values(&self) -> Vec<Value> {
        self.build().values
    }
}

/// `SELECT <fields>`.
pub fn select(fields: impl Into<FieldList>) -> SelectQuery {
    let mut query = SelectQuery::new();
    query.select(fields);
    query
}

/// `INSERT INTO <table>`.
pub fn insert_into(table: impl Into<FieldList>) -> InsertQuery {
    let mut query = InsertQuery::new();
    query.table(table);
    query
}

/// `UPDATE <table>`.
pub fn update(table: impl Into<FieldList>) -> UpdateQuery {
    let mut query = UpdateQuery::new();
    query.table(table);
    query
}

/// `DELETE FROM <table>`.
pub fn delete_from(table: impl Into<FieldList>) -> DeleteQuery {
    let mut query = DeleteQuery::new();
    query.from(table);
    query
}

/// A hand-written statement.
pub fn raw(sql: impl Into<String>) -> SqlQuery {
    SqlQuery::new(sql)
}
