//! Positional parameter accumulation.

use crate::value::Value;

/// Placeholder token emitted for every bound value.
pub const PLACEHOLDER: &str = "?";

/// Ordered list of values bound while rendering a statement.
///
/// Each push returns the `?` token to splice into the SQL, so the Nth
/// placeholder in the rendered text always lines up with the Nth value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParamList {
    values: Vec<Value>,
}

impl ParamList {
    /// Create a new empty parameter list.
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Bind a value and return its placeholder.
    pub fn parameterize(&mut self, value: impl Into<Value>) -> &'static str {
        self.values.push(value.into());
        PLACEHOLDER
    }

    /// Bind every value in order and return `(?,?,...)`.
    pub fn parameterize_list<I, V>(&mut self, values: I) -> String
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let placeholders: Vec<&str> = values
            .into_iter()
            .map(|v| self.parameterize(v))
            .collect();
        format!("({})", placeholders.join(","))
    }

    /// Get the current parameter count.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bound values in placeholder order.
    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    /// Extend this list with another list's values.
    pub fn extend(&mut self, other: &ParamList) {
        self.values.extend(other.values.iter().cloned());
    }

    /// Consume the list, returning the values in placeholder order.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameterize_returns_placeholder() {
        let mut params = ParamList::new();
        assert_eq!(params.parameterize(10), "?");
        assert_eq!(params.parameterize("a"), "?");
        assert_eq!(params.as_slice(), &[Value::Int(10), Value::from("a")]);
    }

    #[test]
    fn parameterize_list_keeps_order() {
        let mut params = ParamList::new();
        params.parameterize(0);
        assert_eq!(params.parameterize_list(vec![1, 2, 3]), "(?,?,?)");
        assert_eq!(params.len(), 4);
        assert_eq!(
            params.into_values(),
            vec![Value::Int(0), Value::Int(1), Value::Int(2), Value::Int(3)]
        );
    }
}
