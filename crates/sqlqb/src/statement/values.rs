use super::Statement;
use crate::ident::escape_identifier;
use crate::params::ParamList;
use crate::value::Value;

/// Render style of an assignment list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValuesMode {
    /// `(k1,k2) VALUES (?,?)` for INSERT.
    #[default]
    Values,
    /// `SET k1 = ?, k2 = ?` for UPDATE.
    Set,
}

/// Column/value assignments for INSERT and UPDATE.
///
/// Later calls overwrite earlier entries with the same key in place; new
/// keys are appended, so the first-seen order of keys is what renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValuesStatement {
    mode: ValuesMode,
    values: Vec<(String, Value)>,
}

impl ValuesStatement {
    /// An empty list rendered as `VALUES` or `SET`.
    pub fn new(mode: ValuesMode) -> Self {
        Self {
            mode,
            values: Vec::new(),
        }
    }

    pub fn mode(&self) -> ValuesMode {
        self.mode
    }

    /// Add key/value pairs. An existing key keeps its position and takes the new value.
    pub fn add_values<I, K, V>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in values {
            let key = key.into();
            let value = value.into();
            match self.values.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => self.values.push((key, value)),
            }
        }
        self
    }

    /// Pairs in insertion order, keys unescaped.
    pub fn values(&self) -> &[(String, Value)] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Statement for ValuesStatement {
    fn render(&self, params: &mut ParamList) -> String {
        // Keys that do not survive escaping take their value with them.
        let entries: Vec<(String, &Value)> = self
            .values
            .iter()
            .map(|(k, v)| (escape_identifier(k), v))
            .filter(|(k, _)| !k.is_empty())
            .collect();

        if entries.is_empty() {
            return String::new();
        }

        match self.mode {
            ValuesMode::Values => {
                let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
                let placeholders =
                    params.parameterize_list(entries.iter().map(|(_, v)| (*v).clone()));
                format!("({}) VALUES {}", keys.join(","), placeholders)
            }
            ValuesMode::Set => {
                let assignments: Vec<String> = entries
                    .into_iter()
                    .map(|(k, v)| format!("{} = {}", k, params.parameterize(v.clone())))
                    .collect();
                format!("SET {}", assignments.join(", "))
            }
        }
    }
}
