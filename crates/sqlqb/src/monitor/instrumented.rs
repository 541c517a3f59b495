use super::config::MonitorConfig;
use super::monitors::NoopMonitor;
use super::types::{QueryContext, QueryMonitor, QueryResult};
use crate::error::QbResult;
use crate::exec::{Executor, PreparedStatement};
use crate::row::Row;
use crate::value::Value;
use std::sync::Arc;
use std::time::Instant;

/// Wraps an executor and reports every execute to a [`QueryMonitor`].
///
/// Monitoring must be enabled via [`MonitorConfig::enable_monitoring`].
pub struct InstrumentedExecutor<E> {
    inner: E,
    monitor: Arc<dyn QueryMonitor>,
    config: MonitorConfig,
}

impl<E: Executor> InstrumentedExecutor<E> {
    /// Wrap `inner` with a no-op monitor and monitoring disabled.
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            monitor: Arc::new(NoopMonitor),
            config: MonitorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: MonitorConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the monitor.
    pub fn with_monitor<M: QueryMonitor + 'static>(mut self, monitor: M) -> Self {
        self.monitor = Arc::new(monitor);
        self
    }

    /// Replace the monitor with a shared one, e.g. to read its stats later.
    pub fn with_monitor_arc(mut self, monitor: Arc<dyn QueryMonitor>) -> Self {
        self.monitor = monitor;
        self
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<E: Executor> Executor for InstrumentedExecutor<E> {
    type Statement<'a>
        = InstrumentedStatement<'a, E::Statement<'a>>
    where
        Self: 'a;

    fn prepare(&self, sql: &str) -> QbResult<Self::Statement<'_>> {
        Ok(InstrumentedStatement {
            inner: self.inner.prepare(sql)?,
            sql: sql.to_string(),
            monitor: self.monitor.as_ref(),
            config: &self.config,
        })
    }
}

/// Statement handle produced by [`InstrumentedExecutor`].
pub struct InstrumentedStatement<'a, S> {
    inner: S,
    sql: String,
    monitor: &'a dyn QueryMonitor,
    config: &'a MonitorConfig,
}

impl<S: PreparedStatement> PreparedStatement for InstrumentedStatement<'_, S> {
    fn execute(&mut self, values: &[Value]) -> bool {
        if !self.config.monitoring_enabled {
            return self.inner.execute(values);
        }

        let ctx = QueryContext::new(&self.sql, values.len());
        self.monitor.on_query_start(&ctx);

        let start = Instant::now();
        let ok = self.inner.execute(values);
        let duration = start.elapsed();

        let result = if ok {
            QueryResult::Success(self.inner.row_count())
        } else {
            QueryResult::Failed
        };
        self.monitor.on_query_complete(&ctx, duration, &result);

        if let Some(threshold) = self.config.slow_query_threshold
            && duration > threshold
        {
            self.monitor.on_slow_query(&ctx, duration);
        }

        ok
    }

    fn row_count(&self) -> u64 {
        self.inner.row_count()
    }

    fn fetch_one(&mut self) -> Option<Row> {
        self.inner.fetch_one()
    }

    fn fetch_all(&mut self) -> Vec<Row> {
        self.inner.fetch_all()
    }

    fn fetch_column(&mut self, index: usize) -> Option<Value> {
        self.inner.fetch_column(index)
    }

    fn fetch_all_column(&mut self, index: usize) -> Vec<Value> {
        self.inner.fetch_all_column(index)
    }
}
