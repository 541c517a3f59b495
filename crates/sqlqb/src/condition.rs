//! Condition inputs and their normalized form.
//!
//! [`Filter`] is what callers hand to `where_`/`having`: one constructor per
//! supported call shape. [`Condition`] is what a
//! [`WhereStatement`](crate::statement::WhereStatement) stores after
//! normalization.
//!
//! ```
//! use sqlqb::{Filter, SelectQuery};
//!
//! let mut query = SelectQuery::new();
//! query
//!     .from("Users")
//!     .where_(("username", "john"))                  // equality
//!     .where_(("balance", 100, ">"))                 // custom operator
//!     .where_(("group", vec!["admin", "owner"]))     // IN (...)
//!     .where_("name LIKE \"%john%\"")                // SQL fragment
//!     .where_(Filter::map([("user_id", 5)]));        // key/value map
//! ```

use crate::query::SelectQuery;
use crate::value::{Operand, Value};
use std::fmt;
use std::sync::Arc;

/// A function that configures a nested SELECT.
///
/// The nested query starts with an empty field list, so
/// `|q| { q.from("t").where_(("x", 1)); }` renders as
/// ``FROM `t` WHERE `x` = ?`` and a bare `|q| { q.where_(("x", 1)); }`
/// renders as the boolean expression `` `x` = ? ``.
#[derive(Clone)]
pub struct Subquery(Arc<dyn Fn(&mut SelectQuery) + Send + Sync>);

impl Subquery {
    /// Wrap a builder function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut SelectQuery) + Send + Sync + 'static,
    {
        Subquery(Arc::new(f))
    }

    /// Apply the builder function to a query.
    pub fn apply(&self, query: &mut SelectQuery) {
        (self.0)(query)
    }
}

impl PartialEq for Subquery {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Subquery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Subquery").field(&"<fn>").finish()
    }
}

/// Left-hand side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Lhs {
    /// Identifier or expression, escaped when rendered.
    Column(String),
    /// Nested SELECT, rendered in parentheses.
    Subquery(Subquery),
}

/// One normalized entry of a WHERE/HAVING list.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Trusted SQL emitted verbatim.
    Fragment(String),
    /// Bare subquery used as a boolean expression.
    Subquery(Subquery),
    Comparison {
        lhs: Lhs,
        operator: String,
        rhs: Operand,
    },
    Between {
        field: String,
        low: Value,
        high: Value,
        negated: bool,
    },
    Exists {
        subquery: Subquery,
        negated: bool,
    },
    /// Joins the next clause with `OR` instead of `AND`.
    Or,
}

impl Condition {
    /// `field = value` (or `IS NULL` / `IN (...)` depending on the value).
    pub fn eq(field: impl Into<String>, value: impl Into<Operand>) -> Self {
        Self::compare(field, "=", value)
    }

    /// `field <operator> value`.
    pub fn compare(
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Operand>,
    ) -> Self {
        Condition::Comparison {
            lhs: Lhs::Column(field.into()),
            operator: operator.into(),
            rhs: value.into(),
        }
    }

    /// Whether this is the `OR` marker.
    pub fn is_or(&self) -> bool {
        matches!(self, Condition::Or)
    }
}

/// A condition as supplied by the caller, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// SQL fragment, e.g. `"notes IS NULL"`.
    Fragment(String),
    /// Bare subquery.
    Subquery(Subquery),
    /// Comparison with an explicit operator.
    Compare {
        lhs: Lhs,
        operator: String,
        rhs: Operand,
    },
    /// Several filters registered in order.
    List(Vec<Filter>),
    /// Equality comparisons, one per key.
    Map(Vec<(String, Operand)>),
}

impl Filter {
    /// Trusted SQL, emitted verbatim.
    pub fn raw(sql: impl Into<String>) -> Self {
        Filter::Fragment(sql.into())
    }

    /// `field = value`, or `IS NULL` / `IN (...)` depending on the value.
    pub fn eq(field: impl Into<String>, value: impl Into<Operand>) -> Self {
        Self::cmp(field, "=", value)
    }

    /// Comparison with an explicit operator.
    pub fn cmp(
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Operand>,
    ) -> Self {
        Filter::Compare {
            lhs: Lhs::Column(field.into()),
            operator: operator.into(),
            rhs: value.into(),
        }
    }

    /// A nested SELECT used as a boolean expression.
    pub fn subquery<F>(f: F) -> Self
    where
        F: Fn(&mut SelectQuery) + Send + Sync + 'static,
    {
        Filter::Subquery(Subquery::new(f))
    }

    /// `(<subquery>) <operator> ?`
    pub fn subquery_cmp<F>(f: F, operator: impl Into<String>, value: impl Into<Operand>) -> Self
    where
        F: Fn(&mut SelectQuery) + Send + Sync + 'static,
    {
        Filter::Compare {
            lhs: Lhs::Subquery(Subquery::new(f)),
            operator: operator.into(),
            rhs: value.into(),
        }
    }

    /// Several filters, registered in order and joined with `AND`.
    pub fn list<I, F>(items: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<Filter>,
    {
        Filter::List(items.into_iter().map(Into::into).collect())
    }

    /// One equality comparison per key, in iteration order.
    ///
    /// ```
    /// use sqlqb::prelude::*;
    ///
    /// let mut q = sqlqb::select("*");
    /// q.from("t").where_(Filter::map([("a", 1), ("b", 2)]));
    /// assert_eq!(q.to_sql(), "SELECT * FROM `t` WHERE `a` = ? AND `b` = ?");
    /// ```
    pub fn map<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Operand>,
    {
        Filter::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Flatten into normalized conditions, appending to `out`.
    pub(crate) fn normalize_into(self, out: &mut Vec<Condition>) {
        match self {
            Filter::Fragment(sql) => out.push(Condition::Fragment(sql)),
            Filter::Subquery(subquery) => out.push(Condition::Subquery(subquery)),
            Filter::Compare { lhs, operator, rhs } => {
                out.push(Condition::Comparison { lhs, operator, rhs })
            }
            Filter::List(items) => {
                for item in items {
                    item.normalize_into(out);
                }
            }
            Filter::Map(pairs) => {
                for (field, value) in pairs {
                    out.push(Condition::eq(field, value));
                }
            }
        }
    }
}

impl From<&str> for Filter {
    fn from(sql: &str) -> Self {
        Filter::raw(sql)
    }
}

impl From<String> for Filter {
    fn from(sql: String) -> Self {
        Filter::raw(sql)
    }
}

impl From<Subquery> for Filter {
    fn from(subquery: Subquery) -> Self {
        Filter::Subquery(subquery)
    }
}

impl<V: Into<Operand>> From<(&str, V)> for Filter {
    fn from((field, value): (&str, V)) -> Self {
        Filter::eq(field, value)
    }
}

impl<V: Into<Operand>> From<(&str, V, &str)> for Filter {
    fn from((field, value, operator): (&str, V, &str)) -> Self {
        Filter::cmp(field, operator, value)
    }
}

impl<F: Into<Filter>> From<Vec<F>> for Filter {
    fn from(items: Vec<F>) -> Self {
        Filter::list(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(filter: impl Into<Filter>) -> Vec<Condition> {
        let mut out = Vec::new();
        filter.into().normalize_into(&mut out);
        out
    }

    #[test]
    fn tuple_shapes() {
        assert_eq!(normalize(("username", "john")), vec![Condition::eq("username", "john")]);
        assert_eq!(
            normalize(("balance", 100, ">")),
            vec![Condition::compare("balance", ">", 100)]
        );
    }

    #[test]
    fn fragment_shape() {
        assert_eq!(
            normalize("notes IS NULL"),
            vec![Condition::Fragment("notes IS NULL".into())]
        );
    }

    #[test]
    fn nested_list_shape() {
        let filter = Filter::list([
            Filter::cmp("balance", ">", 100),
            Filter::eq("user_id", 5),
            Filter::list(["first_name LIKE \"%john%\""]),
        ]);
        assert_eq!(
            normalize(filter),
            vec![
                Condition::compare("balance", ">", 100),
                Condition::eq("user_id", 5),
                Condition::Fragment("first_name LIKE \"%john%\"".into()),
            ]
        );
    }

    #[test]
    fn map_shape_keeps_order() {
        let filter = Filter::map([("username", "john"), ("group", "admin")]);
        assert_eq!(
            normalize(filter),
            vec![Condition::eq("username", "john"), Condition::eq("group", "admin")]
        );
    }

    #[test]
    fn subquery_equality_is_identity() {
        let a = Subquery::new(|_q| {});
        let b = Subquery::new(|_q| {});
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }
}
