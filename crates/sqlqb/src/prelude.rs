//! Convenient imports for typical `sqlqb` usage.
//!
//! ```
//! use sqlqb::prelude::*;
//! ```

pub use crate::{
    DeleteQuery, Direction, Executable, Executor, Fetchable, Fetched, Filter, FromRow, InsertQuery,
    PreparedStatement, QbError, QbResult, Query, Row, SelectQuery, SqlQuery, UnionType,
    UpdateQuery, Value,
};
