//! Fetched rows and row mapping.

use crate::error::{QbError, QbResult};
use crate::value::{FromValue, Value};
use std::sync::Arc;

/// One fetched row: column names plus values in column order.
///
/// Rows from the same result share their column list.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    /// A row whose values line up with `columns`.
    pub fn new(columns: Arc<[String]>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    /// Column names in result order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at a column position.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Value of a named column.
    pub fn get(&self, column: &str) -> Option<&Value> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.values.get(index)
    }

    /// Decode a named column, returning `QbError::Decode` on failure.
    pub fn try_get<T: FromValue>(&self, column: &str) -> QbResult<T> {
        let value = self
            .get(column)
            .ok_or_else(|| QbError::decode(column, "no such column"))?;
        T::from_value(value).map_err(|e| QbError::decode(column, e.to_string()))
    }
}

/// Trait for types that can be built from a [`Row`].
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> QbResult<Self>;
}

impl FromRow for Row {
    fn from_row(row: &Row) -> QbResult<Self> {
        Ok(row.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> Row {
        Row::new(
            Arc::from(vec!["id".to_string(), "name".to_string(), "note".to_string()]),
            vec![Value::Int(7), Value::from("alice"), Value::Null],
        )
    }

    #[test]
    fn get_by_name_and_index() {
        let row = row();
        assert_eq!(row.get("name"), Some(&Value::from("alice")));
        assert_eq!(row.get_index(0), Some(&Value::Int(7)));
        assert_eq!(row.get("missing"), None);
        assert_eq!(row.len(), 3);
    }

    #[test]
    fn try_get_decodes() {
        let row = row();
        assert_eq!(row.try_get::<i64>("id").unwrap(), 7);
        assert_eq!(row.try_get::<String>("name").unwrap(), "alice");
        assert_eq!(row.try_get::<Option<String>>("note").unwrap(), None);
    }

    #[test]
    fn try_get_reports_column() {
        let err = row().try_get::<i64>("name").unwrap_err();
        assert!(matches!(err, QbError::Decode { ref column, .. } if column == "name"));

        let err = row().try_get::<i64>("missing").unwrap_err();
        assert!(err.to_string().contains("missing"));
    }
}
