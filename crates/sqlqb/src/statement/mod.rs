//! Clause builders.
//!
//! Each statement owns one fragment of a query (SELECT list, FROM/JOIN,
//! WHERE, ORDER BY, ...) and renders it on demand. Rendering never mutates
//! the statement: values are pushed into the caller's [`ParamList`] as
//! placeholders are emitted, so a query can be rendered any number of times
//! with identical results.
//!
//! A statement that has nothing to say renders as an empty string and the
//! owning query leaves it out.

mod from;
mod limit;
mod order;
mod select;
mod union;
mod values;
mod where_builder;

pub use from::{FromStatement, Join, TableMode};
pub use limit::{LimitArg, LimitStatement};
pub use order::{Direction, OrderStatement};
pub use select::SelectStatement;
pub use union::{UnionStatement, UnionType};
pub use values::{ValuesMode, ValuesStatement};
pub use where_builder::WhereStatement;

use crate::params::ParamList;

/// A renderable SQL fragment.
pub trait Statement {
    /// Render the fragment, binding any values into `params` in placeholder
    /// order.
    fn render(&self, params: &mut ParamList) -> String;
}

/// An ordered list of identifiers.
///
/// Built from a comma-separated string (`"id, name"`) or an explicit list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldList(pub Vec<String>);

impl FieldList {
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl From<&str> for FieldList {
    fn from(s: &str) -> Self {
        FieldList(s.split(',').map(|part| part.trim().to_string()).collect())
    }
}

impl From<String> for FieldList {
    fn from(s: String) -> Self {
        FieldList::from(s.as_str())
    }
}

impl From<&String> for FieldList {
    fn from(s: &String) -> Self {
        FieldList::from(s.as_str())
    }
}

impl From<Vec<String>> for FieldList {
    fn from(v: Vec<String>) -> Self {
        FieldList(v)
    }
}

impl From<Vec<&str>> for FieldList {
    fn from(v: Vec<&str>) -> Self {
        FieldList(v.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for FieldList {
    fn from(v: &[&str]) -> Self {
        FieldList(v.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for FieldList {
    fn from(v: [&str; N]) -> Self {
        FieldList(v.iter().map(|s| s.to_string()).collect())
    }
}

/// Join non-empty fragments with single spaces.
pub(crate) fn join_fragments<I>(parts: I) -> String
where
    I: IntoIterator<Item = String>,
{
    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
