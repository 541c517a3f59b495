use super::truncate_sql_bytes;
use super::types::{QueryContext, QueryMonitor, QueryResult};
use std::time::Duration;
use tracing::Level;

/// A `tracing`-based monitor that emits one event per executed statement.
///
/// Events use target `sqlqb.sql`; slow queries are additionally reported at
/// `WARN`.
///
/// Enable via the crate feature: `sqlqb = { features = ["tracing"] }`.
#[derive(Debug, Clone)]
pub struct TracingMonitor {
    /// Tracing event level for completed queries.
    pub level: Level,
    /// Truncate long SQL strings (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for TracingMonitor {
    fn default() -> Self {
        Self {
            level: Level::DEBUG,
            max_sql_length: Some(200),
        }
    }
}

impl TracingMonitor {
    /// Debug level, SQL truncated to 200 bytes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Level for the per-query event.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Truncate logged SQL to `len` bytes.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Log SQL in full.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    fn truncate_sql(&self, sql: &str) -> String {
        match self.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        }
    }
}

impl QueryMonitor for TracingMonitor {
    fn on_query_complete(&self, ctx: &QueryContext, duration: Duration, result: &QueryResult) {
        macro_rules! emit_at_level {
            ($level:expr, $($field:tt)*) => {
                match $level {
                    Level::ERROR => tracing::error!($($field)*),
                    Level::WARN => tracing::warn!($($field)*),
                    Level::INFO => tracing::info!($($field)*),
                    Level::DEBUG => tracing::debug!($($field)*),
                    Level::TRACE => tracing::trace!($($field)*),
                }
            };
        }

        let sql = self.truncate_sql(&ctx.sql);
        emit_at_level!(
            self.level,
            target: "sqlqb.sql",
            query_type = ?ctx.query_type,
            param_count = ctx.param_count,
            duration_us = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX),
            result = ?result,
            sql = %sql,
            "sqlqb sql"
        );
    }

    fn on_slow_query(&self, ctx: &QueryContext, duration: Duration) {
        tracing::warn!(
            target: "sqlqb.sql",
            query_type = ?ctx.query_type,
            duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            sql = %self.truncate_sql(&ctx.sql),
            "slow query"
        );
    }
}
