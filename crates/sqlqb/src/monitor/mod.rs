//! Query monitoring for executed statements.
//!
//! - Timing each execute through [`InstrumentedExecutor`]
//! - Counting queries with [`StatsMonitor`]
//! - Emitting `tracing` events with [`TracingMonitor`] (feature `tracing`)
//!
//! # Example
//!
//! ```
//! use sqlqb::monitor::{InstrumentedExecutor, MonitorConfig, StatsMonitor};
//! use sqlqb::prelude::*;
//! use sqlqb::sqlite::SqliteExecutor;
//! use std::sync::Arc;
//!
//! let stats = Arc::new(StatsMonitor::new());
//! let db = InstrumentedExecutor::new(SqliteExecutor::memory().unwrap())
//!     .with_config(MonitorConfig::new().enable_monitoring())
//!     .with_monitor_arc(stats.clone());
//!
//! sqlqb::raw("SELECT 1").scalar(&db).unwrap();
//! assert_eq!(stats.stats().select_count, 1);
//! ```

mod config;
mod instrumented;
mod monitors;
mod types;

#[cfg(feature = "tracing")]
mod tracing_monitor;


pub use config::MonitorConfig;
pub use instrumented::{InstrumentedExecutor, InstrumentedStatement};
pub use monitors::{CompositeMonitor, NoopMonitor, QueryStats, StatsMonitor};
pub use types::{QueryContext, QueryMonitor, QueryResult, QueryType};

#[cfg(feature = "tracing")]
pub use tracing_monitor::TracingMonitor;

pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
