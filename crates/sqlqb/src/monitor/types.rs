use std::time::Duration;

/// Kind of statement, detected from its leading keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryType {
    Select,
    Insert,
    Update,
    Delete,
    /// DDL, pragmas and anything else.
    Other,
}

impl QueryType {
    /// Detect the statement kind. Leading whitespace and opening
    /// parentheses are skipped, so `(SELECT ...) UNION ...` is a select.
    pub fn from_sql(sql: &str) -> Self {
        let trimmed = sql.trim_start_matches(|c: char| c.is_whitespace() || c == '(');
        let keyword: String = trimmed
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .collect();

        match keyword.to_ascii_uppercase().as_str() {
            "SELECT" => QueryType::Select,
            "INSERT" | "REPLACE" => QueryType::Insert,
            "UPDATE" => QueryType::Update,
            "DELETE" => QueryType::Delete,
            _ => QueryType::Other,
        }
    }
}

/// What a monitor gets to see about one execution.
#[derive(Debug, Clone)]
pub struct QueryContext {
    pub sql: String,
    pub param_count: usize,
    pub query_type: QueryType,
}

impl QueryContext {
    /// Context for `sql`, classifying it with [`QueryType::from_sql`].
    pub fn new(sql: &str, param_count: usize) -> Self {
        Self {
            sql: sql.to_string(),
            param_count,
            query_type: QueryType::from_sql(sql),
        }
    }
}

/// Outcome of one execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryResult {
    /// Executed; rows fetched or changed.
    Success(u64),
    Failed,
}

impl QueryResult {
    pub fn is_success(&self) -> bool {
        matches!(self, QueryResult::Success(_))
    }
}

/// Receives execution events.
pub trait QueryMonitor: Send + Sync {
    fn on_query_start(&self, _ctx: &QueryContext) {}

    fn on_query_complete(&self, ctx: &QueryContext, duration: Duration, result: &QueryResult);

    /// Called in addition to `on_query_complete` when the configured
    /// threshold is exceeded.
    fn on_slow_query(&self, _ctx: &QueryContext, _duration: Duration) {}
}
