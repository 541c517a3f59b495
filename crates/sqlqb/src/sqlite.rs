//! SQLite executor using `rusqlite`.
//!
//! SQLite accepts `?` placeholders, backtick-quoted identifiers and the
//! `LIMIT offset,count` form, so built queries run unchanged.
//!
//! - In-memory databases via `:memory:`
//! - A single connection behind a `Mutex`
//! - Statements are cached per SQL string; rows are buffered on execute

use crate::connection::{ConnectionConfig, Connector};
use crate::error::{QbError, QbResult};
use crate::exec::{Executor, PreparedStatement};
use crate::row::Row;
use crate::value::Value;
use rusqlite::types::ValueRef;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A SQLite connection.
pub struct SqliteExecutor {
    path: PathBuf,
    conn: Mutex<rusqlite::Connection>,
}

impl SqliteExecutor {
    /// Open a database file, or an in-memory database for `:memory:`.
    pub fn open(path: impl AsRef<Path>) -> QbResult<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = if path.to_str() == Some(":memory:") {
            rusqlite::Connection::open_in_memory()
        } else {
            rusqlite::Connection::open(&path)
        }
        .map_err(|e| QbError::Connection(format!("SQLite open failed: {e}")))?;

        Ok(Self {
            path,
            conn: Mutex::new(conn),
        })
    }

    /// A fresh in-memory database.
    pub fn memory() -> QbResult<Self> {
        Self::open(":memory:")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run one or more statements without parameters (schema setup, pragmas).
    pub fn execute_batch(&self, sql: &str) -> QbResult<()> {
        self.lock()
            .execute_batch(sql)
            .map_err(|e| QbError::Other(e.to_string()))
    }

    fn lock(&self) -> MutexGuard<'_, rusqlite::Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for SqliteExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteExecutor")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl Executor for SqliteExecutor {
    type Statement<'a> = SqliteStatement<'a>;

    fn prepare(&self, sql: &str) -> QbResult<SqliteStatement<'_>> {
        // Compile once up front so syntax errors surface here.
        self.lock().prepare_cached(sql)?;

        Ok(SqliteStatement {
            executor: self,
            sql: sql.to_string(),
            rows: VecDeque::new(),
            row_count: 0,
        })
    }
}

/// A prepared SQLite statement with its buffered result.
///
/// For statements that return rows, `row_count` is the number of rows
/// fetched; otherwise it is the number of rows changed.
#[derive(Debug)]
pub struct SqliteStatement<'a> {
    executor: &'a SqliteExecutor,
    sql: String,
    rows: VecDeque<Row>,
    row_count: u64,
}

impl SqliteStatement<'_> {
    /// The SQL this statement was prepared from.
    pub fn sql(&self) -> &str {
        &self.sql
    }
}

impl PreparedStatement for SqliteStatement<'_> {
    fn execute(&mut self, values: &[Value]) -> bool {
        let conn = self.executor.lock();
        match run(&conn, &self.sql, values) {
            Ok((rows, row_count)) => {
                self.rows = rows;
                self.row_count = row_count;
                true
            }
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(target: "sqlqb.sql", error = %_err, "sqlite execute error");
                self.rows.clear();
                self.row_count = 0;
                false
            }
        }
    }

    fn row_count(&self) -> u64 {
        self.row_count
    }

    fn fetch_one(&mut self) -> Option<Row> {
        self.rows.pop_front()
    }

    fn fetch_all(&mut self) -> Vec<Row> {
        self.rows.drain(..).collect()
    }

    fn fetch_column(&mut self, index: usize) -> Option<Value> {
        self.rows
            .pop_front()
            .and_then(|row| row.into_values().into_iter().nth(index))
    }
}

fn run(
    conn: &rusqlite::Connection,
    sql: &str,
    values: &[Value],
) -> rusqlite::Result<(VecDeque<Row>, u64)> {
    let mut stmt = conn.prepare_cached(sql)?;

    let expected = stmt.parameter_count();
    if expected != values.len() {
        return Err(rusqlite::Error::InvalidParameterCount(values.len(), expected));
    }
    bind_values(&mut stmt, values)?;

    if stmt.column_count() == 0 {
        let changed = stmt.raw_execute()?;
        return Ok((VecDeque::new(), changed as u64));
    }

    let columns: Arc<[String]> = stmt.column_names().into_iter().map(String::from).collect();

    let mut rows = VecDeque::new();
    let mut raw = stmt.raw_query();
    while let Some(row) = raw.next()? {
        rows.push_back(convert_row(row, &columns));
    }

    let count = rows.len() as u64;
    Ok((rows, count))
}

fn bind_values(stmt: &mut rusqlite::Statement<'_>, values: &[Value]) -> rusqlite::Result<()> {
    for (i, value) in values.iter().enumerate() {
        let idx = i + 1;
        match value {
            Value::Null => stmt.raw_bind_parameter(idx, rusqlite::types::Null),
            Value::Bool(b) => stmt.raw_bind_parameter(idx, b),
            Value::Int(v) => stmt.raw_bind_parameter(idx, v),
            Value::Float(v) => stmt.raw_bind_parameter(idx, v),
            Value::Text(s) => stmt.raw_bind_parameter(idx, s.as_str()),
            Value::Bytes(b) => stmt.raw_bind_parameter(idx, b.as_slice()),
            Value::Date(d) => stmt.raw_bind_parameter(idx, d.to_string()),
            Value::DateTime(dt) => stmt.raw_bind_parameter(idx, dt.to_string()),
            Value::DateTimeUtc(dt) => stmt.raw_bind_parameter(idx, dt.to_rfc3339()),
            Value::Uuid(u) => stmt.raw_bind_parameter(idx, u.to_string()),
            Value::Json(j) => stmt.raw_bind_parameter(idx, j.to_string()),
        }?;
    }
    Ok(())
}

fn convert_row(row: &rusqlite::Row<'_>, columns: &Arc<[String]>) -> Row {
    let values = (0..columns.len())
        .map(|i| match row.get_ref(i).unwrap_or(ValueRef::Null) {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(v) => Value::Int(v),
            ValueRef::Real(v) => Value::Float(v),
            ValueRef::Text(b) => Value::Text(String::from_utf8_lossy(b).into_owned()),
            ValueRef::Blob(b) => Value::Bytes(b.to_vec()),
        })
        .collect();

    Row::new(Arc::clone(columns), values)
}

/// Opens [`SqliteExecutor`]s from connection configs.
///
/// Accepts `dsn = "sqlite:<path>"`, or `type = "sqlite"` with the database
/// path in `name` (defaulting to `:memory:`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteConnector;

impl Connector for SqliteConnector {
    type Executor = SqliteExecutor;

    fn connect(&self, config: &ConnectionConfig, id: &str) -> QbResult<SqliteExecutor> {
        if let Some(path) = config.dsn.as_deref().and_then(|dsn| dsn.strip_prefix("sqlite:")) {
            return SqliteExecutor::open(path);
        }

        match config.kind.as_deref() {
            Some(kind) if kind.eq_ignore_ascii_case("sqlite") => {
                SqliteExecutor::open(config.name.as_deref().unwrap_or(":memory:"))
            }
            Some(kind) => Err(QbError::Connection(format!(
                "unsupported connection type \"{kind}\" for \"{id}\""
            ))),
            None => Err(QbError::MissingType(id.to_string())),
        }
    }
}
