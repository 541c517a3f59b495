use super::Statement;
use crate::params::ParamList;
use crate::query::SelectQuery;

/// Modifier after `UNION`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnionType {
    #[default]
    Plain,
    All,
    Distinct,
}

impl UnionType {
    fn keyword(self) -> &'static str {
        match self {
            UnionType::Plain => "UNION",
            UnionType::All => "UNION ALL",
            UnionType::Distinct => "UNION DISTINCT",
        }
    }
}

/// Trailing `UNION [ALL|DISTINCT] <select>` parts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnionStatement {
    queries: Vec<(SelectQuery, UnionType)>,
}

impl UnionStatement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a query; its values follow those already added.
    pub fn add_query(&mut self, query: SelectQuery, union_type: UnionType) -> &mut Self {
        self.queries.push((query, union_type));
        self
    }

    pub fn queries(&self) -> &[(SelectQuery, UnionType)] {
        &self.queries
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

impl Statement for UnionStatement {
    fn render(&self, params: &mut ParamList) -> String {
        let parts = self.queries.iter().map(|(query, union_type)| {
            let sql = query.render(params);
            if sql.is_empty() {
                String::new()
            } else {
                format!("{} {}", union_type.keyword(), sql)
            }
        });
        super::join_fragments(parts.collect::<Vec<_>>())
    }
}
