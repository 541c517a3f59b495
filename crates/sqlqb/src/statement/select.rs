use super::{FieldList, Statement};
use crate::ident::escape_identifier;
use crate::params::ParamList;

/// The `SELECT` field list.
///
/// Starts out as `*`. Clearing the list makes the statement render nothing,
/// which is how subqueries used as boolean expressions are built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectStatement {
    fields: Vec<String>,
}

impl SelectStatement {
    /// Starts as `SELECT *`.
    pub fn new() -> Self {
        Self {
            fields: vec!["*".to_string()],
        }
    }

    /// Append fields, either `"a, b"` or `["a", "b"]`.
    pub fn add_fields(&mut self, fields: impl Into<FieldList>) -> &mut Self {
        self.fields.extend(fields.into().into_inner());
        self
    }

    /// Drop every field, including the default `*`.
    pub fn clear_fields(&mut self) -> &mut Self {
        self.fields.clear();
        self
    }

    /// Fields in insertion order, unescaped.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

impl Default for SelectStatement {
    fn default() -> Self {
        Self::new()
    }
}

impl Statement for SelectStatement {
    fn render(&self, _params: &mut ParamList) -> String {
        let fields: Vec<String> = self
            .fields
            .iter()
            .map(|f| escape_identifier(f))
            .filter(|f| !f.is_empty())
            .collect();

        if fields.is_empty() {
            return String::new();
        }

        format!("SELECT {}", fields.join(", "))
    }
}
