use super::Query;
use crate::params::ParamList;
use crate::statement::Statement;
use crate::value::Value;

/// Hand-written SQL with positional values.
///
/// The SQL is emitted verbatim; the caller is responsible for matching the
/// number of `?` to the number of values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlQuery {
    sql: String,
    values: Vec<Value>,
}

impl SqlQuery {
    /// Raw SQL with no values bound yet.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            values: Vec::new(),
        }
    }

    /// Replace the SQL text.
    pub fn raw(&mut self, sql: impl Into<String>) -> &mut Self {
        self.sql = sql.into();
        self
    }

    /// Replace the bound values.
    pub fn parameters<I, V>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }
}

impl Statement for SqlQuery {
    fn render(&self, params: &mut ParamList) -> String {
        for value in &self.values {
            params.parameterize(value.clone());
        }
        self.sql.clone()
    }
}

impl Query for SqlQuery {}
