use std::time::Duration;

/// Configuration for query monitoring.
///
/// Monitoring is off by default and must be enabled explicitly.
#[derive(Debug, Clone, Default)]
pub struct MonitorConfig {
    /// Queries slower than this trigger `on_slow_query`.
    pub slow_query_threshold: Option<Duration>,
    pub monitoring_enabled: bool,
}

impl MonitorConfig {
    /// Monitoring disabled, no slow-query threshold.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report queries slower than `threshold` via `on_slow_query`.
    pub fn with_slow_query_threshold(mut self, threshold: Duration) -> Self {
        self.slow_query_threshold = Some(threshold);
        self
    }

    pub fn enable_monitoring(mut self) -> Self {
        self.monitoring_enabled = true;
        self
    }

    pub fn disable_monitoring(mut self) -> Self {
        self.monitoring_enabled = false;
        self
    }
}
