//! # sqlqb
//!
//! A composable SQL statement builder with positional `?` placeholders.
//!
//! ## Features
//!
//! - **Values never inline**: every user value becomes a `?` and lands in the
//!   value list in placeholder order
//! - **Permissive identifiers**: table/column names are backtick-quoted;
//!   anything unsafe is dropped instead of failing
//! - **Nested conditions**: OR-joins, BETWEEN, IN, EXISTS and subqueries
//!   render into one flat clause
//! - **Bring your own driver**: queries run through the small
//!   [`Executor`](exec::Executor) trait; a SQLite executor ships behind the
//!   `sqlite` feature
//! - **Query monitoring**: timing and `tracing` events via
//!   [`monitor::InstrumentedExecutor`]
//!
//! ## Query Builders
//!
//! ```
//! use sqlqb::prelude::*;
//!
//! // SELECT
//! let mut q = sqlqb::select("id, name");
//! q.from("users")
//!     .where_(("status", "active"))
//!     .or_where(("role", vec!["admin", "owner"]))
//!     .order_by("created_at", Some(Direction::Desc))
//!     .limit(10, 20);
//! assert_eq!(
//!     q.to_sql(),
//!     "SELECT `id`, `name` FROM `users` WHERE `status` = ? OR `role` IN (?,?) \
//!      ORDER BY `created_at` DESC LIMIT 20,10"
//! );
//!
//! // INSERT
//! let mut q = sqlqb::insert_into("users");
//! q.values(sqlqb::values! { "name" => "alice", "age" => 30 });
//! assert_eq!(q.to_sql(), "INSERT INTO `users` (`name`,`age`) VALUES (?,?)");
//!
//! // UPDATE
//! let mut q = sqlqb::update("users");
//! q.values([("status", "inactive")]).where_(("id", 7));
//! assert_eq!(q.to_sql(), "UPDATE `users` SET `status` = ? WHERE `id` = ?");
//!
//! // DELETE
//! let mut q = sqlqb::delete_from("users");
//! q.where_(("id", 7)).limit(1, 0);
//! assert_eq!(q.to_sql(), "DELETE FROM `users` WHERE `id` = ? LIMIT 1");
//! ```

pub mod condition;
pub mod connection;
pub mod error;
pub mod exec;
pub mod ident;
pub mod monitor;
pub mod params;
pub mod prelude;
pub mod query;
pub mod row;
pub mod statement;
pub mod value;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use condition::{Condition, Filter, Subquery};
pub use connection::{ConnectionConfig, ConnectionManager, Connector};
pub use error::{QbError, QbResult};
pub use exec::{Executable, Executor, Fetchable, Fetched, PreparedStatement};
pub use ident::escape_identifier;
pub use monitor::{
    CompositeMonitor, InstrumentedExecutor, MonitorConfig, NoopMonitor, QueryContext,
    QueryMonitor, QueryResult, QueryStats, QueryType, StatsMonitor,
};
pub use params::ParamList;
pub use query::{
    delete_from, insert_into, raw, select, update, BuiltQuery, DeleteQuery, InsertQuery, Query,
    SelectQuery, SqlQuery, UpdateQuery,
};
pub use row::{FromRow, Row};
pub use statement::{Direction, UnionType};
pub use value::{FromValue, Operand, Value};

#[cfg(feature = "tracing")]
pub use monitor::TracingMonitor;

#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteConnector, SqliteExecutor};

/// Build a `Vec<(String, Value)>` for `values(...)` with mixed value types.
///
/// ```
/// let pairs = sqlqb::values! { "id" => 1, "name" => "alice", "note" => None::<&str> };
/// assert_eq!(pairs.len(), 3);
/// assert!(pairs[2].1.is_null());
/// ```
#[macro_export]
macro_rules! values {
    ($($key:expr => $value:expr),* $(,)?) => {
        vec![$((::std::string::String::from($key), $crate::Value::from($value))),*]
    };
}
