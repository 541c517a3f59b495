//! Execution adapter.
//!
//! The builder never talks to a database itself. An [`Executor`] prepares
//! SQL into a [`PreparedStatement`]; queries drive it through the
//! [`Executable`] and [`Fetchable`] traits.
//!
//! Failure is two-level: a statement that cannot be prepared is an `Err`,
//! while a statement that fails to execute yields `Ok(None)`. Nothing is
//! retried.

use crate::error::QbResult;
use crate::query::{BuiltQuery, DeleteQuery, InsertQuery, Query, SelectQuery, SqlQuery, UpdateQuery};
use crate::row::{FromRow, Row};
use crate::value::Value;

/// A prepared statement handle.
pub trait PreparedStatement {
    /// Bind `values` positionally and run. Returns `false` on failure.
    fn execute(&mut self, values: &[Value]) -> bool;

    /// Rows affected by the last execution.
    fn row_count(&self) -> u64;

    /// Next row, if any.
    fn fetch_one(&mut self) -> Option<Row>;

    /// All remaining rows.
    fn fetch_all(&mut self) -> Vec<Row>;

    /// Column `index` of the next row.
    fn fetch_column(&mut self, index: usize) -> Option<Value>;

    /// Column `index` of every remaining row.
    fn fetch_all_column(&mut self, index: usize) -> Vec<Value> {
        self.fetch_all()
            .into_iter()
            .filter_map(|row| row.into_values().into_iter().nth(index))
            .collect()
    }
}

/// Something that can prepare SQL.
pub trait Executor {
    type Statement<'a>: PreparedStatement
    where
        Self: 'a;

    fn prepare(&self, sql: &str) -> QbResult<Self::Statement<'_>>;
}

impl<E: Executor + ?Sized> Executor for &E {
    type Statement<'a>
        = E::Statement<'a>
    where
        Self: 'a;

    fn prepare(&self, sql: &str) -> QbResult<Self::Statement<'_>> {
        (**self).prepare(sql)
    }
}

impl<E: Executor + ?Sized> Executor for std::sync::Arc<E> {
    type Statement<'a>
        = E::Statement<'a>
    where
        Self: 'a;

    fn prepare(&self, sql: &str) -> QbResult<Self::Statement<'_>> {
        (**self).prepare(sql)
    }
}

/// Run a built query against an executor.
pub trait Executable: Query {
    /// Prepare and execute. `Ok(None)` means the statement failed to run.
    fn execute<'c, E: Executor>(&self, conn: &'c E) -> QbResult<Option<E::Statement<'c>>> {
        let BuiltQuery { sql, values } = self.build();

        let mut stmt = match conn.prepare(&sql) {
            Ok(stmt) => stmt,
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(target: "sqlqb.sql", sql = %sql, error = %err, "prepare failed");
                return Err(err);
            }
        };

        if stmt.execute(&values) {
            Ok(Some(stmt))
        } else {
            #[cfg(feature = "tracing")]
            tracing::warn!(target: "sqlqb.sql", sql = %sql, param_count = values.len(), "execute failed");
            Ok(None)
        }
    }
}

/// Fetched data together with the statement's row count.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub data: T,
    /// [`PreparedStatement::row_count`] after the execute.
    pub row_count: u64,
}

impl<T> Fetched<T> {
    /// Drop the count.
    pub fn into_data(self) -> T {
        self.data
    }
}

/// Row-returning helpers on top of [`Executable`].
///
/// The `*_with_count` variants keep the row count the plain helpers discard
/// along with the statement handle.
pub trait Fetchable: Executable {
    /// First row, or `None` when execution failed or nothing matched.
    fn one<E: Executor>(&self, conn: &E) -> QbResult<Option<Row>> {
        Ok(self.one_with_count(conn)?.and_then(Fetched::into_data))
    }

    fn all<E: Executor>(&self, conn: &E) -> QbResult<Option<Vec<Row>>> {
        Ok(self.all_with_count(conn)?.map(Fetched::into_data))
    }

    /// Column `index` of every row.
    fn column<E: Executor>(&self, conn: &E, index: usize) -> QbResult<Option<Vec<Value>>> {
        Ok(self.column_with_count(conn, index)?.map(Fetched::into_data))
    }

    /// First column of the first row.
    fn scalar<E: Executor>(&self, conn: &E) -> QbResult<Option<Value>> {
        Ok(self.scalar_with_count(conn)?.and_then(Fetched::into_data))
    }

    /// Like [`one`](Self::one); `None` only when execution failed.
    fn one_with_count<E: Executor>(&self, conn: &E) -> QbResult<Option<Fetched<Option<Row>>>> {
        Ok(self.execute(conn)?.map(|mut stmt| {
            let row_count = stmt.row_count();
            Fetched {
                data: stmt.fetch_one(),
                row_count,
            }
        }))
    }

    fn all_with_count<E: Executor>(&self, conn: &E) -> QbResult<Option<Fetched<Vec<Row>>>> {
        Ok(self.execute(conn)?.map(|mut stmt| {
            let row_count = stmt.row_count();
            Fetched {
                data: stmt.fetch_all(),
                row_count,
            }
        }))
    }

    fn column_with_count<E: Executor>(
        &self,
        conn: &E,
        index: usize,
    ) -> QbResult<Option<Fetched<Vec<Value>>>> {
        Ok(self.execute(conn)?.map(|mut stmt| {
            let row_count = stmt.row_count();
            Fetched {
                data: stmt.fetch_all_column(index),
                row_count,
            }
        }))
    }

    /// Like [`scalar`](Self::scalar); `None` only when execution failed.
    fn scalar_with_count<E: Executor>(&self, conn: &E) -> QbResult<Option<Fetched<Option<Value>>>> {
        Ok(self.execute(conn)?.map(|mut stmt| {
            let row_count = stmt.row_count();
            Fetched {
                data: stmt.fetch_column(0),
                row_count,
            }
        }))
    }

    fn all_as<T: FromRow, E: Executor>(&self, conn: &E) -> QbResult<Option<Vec<T>>> {
        match self.all(conn)? {
            Some(rows) => rows.iter().map(T::from_row).collect::<QbResult<Vec<_>>>().map(Some),
            None => Ok(None),
        }
    }

    fn one_as<T: FromRow, E: Executor>(&self, conn: &E) -> QbResult<Option<T>> {
        self.one(conn)?.as_ref().map(T::from_row).transpose()
    }
}

impl Executable for SelectQuery {}
impl Executable for InsertQuery {}
impl Executable for UpdateQuery {}
impl Executable for DeleteQuery {}
impl Executable for SqlQuery {}

impl Fetchable for SelectQuery {}
impl Fetchable for SqlQuery {}
