use super::Statement;
use crate::condition::{Condition, Filter, Lhs, Subquery};
use crate::ident::escape_identifier;
use crate::params::ParamList;
use crate::query::SelectQuery;
use crate::value::{Operand, Value};

/// A WHERE or HAVING condition list.
///
/// Conditions are joined with `AND`; an `OR` marker (see
/// [`add_or_condition`](Self::add_or_condition)) switches the joiner for the
/// next non-empty clause only:
///
/// ```
/// use sqlqb::params::ParamList;
/// use sqlqb::statement::{Statement, WhereStatement};
///
/// let mut w = WhereStatement::new();
/// w.add_condition(("a", 1))
///     .add_or_condition(("b", 2))
///     .add_condition(("c", 3));
///
/// let mut params = ParamList::new();
/// assert_eq!(w.render(&mut params), "WHERE `a` = ? OR `b` = ? AND `c` = ?");
/// assert_eq!(params.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhereStatement {
    having: bool,
    conditions: Vec<Condition>,
}

impl WhereStatement {
    /// An empty list rendered with `WHERE`.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty list rendered with `HAVING`.
    pub fn having() -> Self {
        Self {
            having: true,
            conditions: Vec::new(),
        }
    }

    pub fn is_having(&self) -> bool {
        self.having
    }

    /// Normalize `filter` and append it, joined with `AND`.
    pub fn add_condition(&mut self, filter: impl Into<Filter>) -> &mut Self {
        filter.into().normalize_into(&mut self.conditions);
        self
    }

    /// Append `filter`, joined with `OR` to the clause before it.
    pub fn add_or_condition(&mut self, filter: impl Into<Filter>) -> &mut Self {
        self.conditions.push(Condition::Or);
        self.add_condition(filter)
    }

    /// `field BETWEEN ? AND ?`.
    pub fn add_between_condition(
        &mut self,
        field: impl Into<String>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> &mut Self {
        self.push_between(field.into(), low.into(), high.into(), false)
    }

    /// `field NOT BETWEEN ? AND ?`.
    pub fn add_not_between_condition(
        &mut self,
        field: impl Into<String>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> &mut Self {
        self.push_between(field.into(), low.into(), high.into(), true)
    }

    /// `EXISTS (<subquery>)`, bound into the outer query.
    pub fn add_exists_condition<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&mut SelectQuery) + Send + Sync + 'static,
    {
        self.conditions.push(Condition::Exists {
            subquery: Subquery::new(f),
            negated: false,
        });
        self
    }

    /// `NOT EXISTS (<subquery>)`.
    pub fn add_not_exists_condition<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&mut SelectQuery) + Send + Sync + 'static,
    {
        self.conditions.push(Condition::Exists {
            subquery: Subquery::new(f),
            negated: true,
        });
        self
    }

    /// Normalized conditions, `OR` markers included.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    fn push_between(&mut self, field: String, low: Value, high: Value, negated: bool) -> &mut Self {
        self.conditions.push(Condition::Between {
            field,
            low,
            high,
            negated,
        });
        self
    }
}

impl Statement for WhereStatement {
    fn render(&self, params: &mut ParamList) -> String {
        let mut sql = String::new();
        let mut or_next = false;

        for condition in &self.conditions {
            if condition.is_or() {
                or_next = true;
                continue;
            }

            let clause = render_condition(condition, params);
            if clause.is_empty() {
                continue;
            }

            if !sql.is_empty() {
                sql.push_str(if or_next { " OR " } else { " AND " });
            }
            sql.push_str(&clause);
            or_next = false;
        }

        if sql.is_empty() {
            return sql;
        }

        let keyword = if self.having { "HAVING" } else { "WHERE" };
        format!("{keyword} {sql}")
    }
}

fn render_condition(condition: &Condition, params: &mut ParamList) -> String {
    match condition {
        Condition::Or => String::new(),
        Condition::Fragment(sql) => sql.clone(),
        Condition::Subquery(subquery) => render_subquery(subquery, params),
        Condition::Exists { subquery, negated } => {
            let not = if *negated { "NOT " } else { "" };
            format!("{not}EXISTS {}", render_subquery(subquery, params))
        }
        Condition::Between {
            field,
            low,
            high,
            negated,
        } => {
            let field = escape_identifier(field);
            if field.is_empty() {
                return String::new();
            }
            let not = if *negated { "NOT " } else { "" };
            let low = params.parameterize(low.clone());
            let high = params.parameterize(high.clone());
            format!("{field} {not}BETWEEN {low} AND {high}")
        }
        Condition::Comparison { lhs, operator, rhs } => {
            let lhs = match lhs {
                Lhs::Column(column) => escape_identifier(column),
                Lhs::Subquery(subquery) => render_subquery(subquery, params),
            };
            if lhs.is_empty() {
                return String::new();
            }
            render_comparison(&lhs, operator, rhs, params)
        }
    }
}

fn render_comparison(lhs: &str, operator: &str, rhs: &Operand, params: &mut ParamList) -> String {
    let negated = match operator {
        "=" => false,
        "<>" => true,
        _ => {
            let rhs = match rhs {
                Operand::Value(value) => params.parameterize(value.clone()).to_string(),
                Operand::List(values) => params.parameterize_list(values.iter().cloned()),
            };
            return format!("{lhs} {operator} {rhs}");
        }
    };

    let not = if negated { "NOT " } else { "" };
    match rhs {
        Operand::Value(Value::Null) => format!("{lhs} IS {not}NULL"),
        Operand::Value(value) => format!("{lhs} {operator} {}", params.parameterize(value.clone())),
        Operand::List(values) => {
            format!("{lhs} {not}IN {}", params.parameterize_list(values.iter().cloned()))
        }
    }
}

/// Render a nested SELECT in parentheses, binding into the outer list.
fn render_subquery(subquery: &Subquery, params: &mut ParamList) -> String {
    let mut query = SelectQuery::new();
    query.select_statement_mut().clear_fields();
    subquery.apply(&mut query);
    format!("({})", query.render(params))
}
