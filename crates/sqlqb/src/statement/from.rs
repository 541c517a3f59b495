use super::{FieldList, Statement};
use crate::ident::escape_identifier;
use crate::params::ParamList;

/// Which statement the table list belongs to; picks the leading keyword.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableMode {
    #[default]
    From,
    Insert,
    Update,
    Delete,
}

impl TableMode {
    /// Leading keyword, e.g. `DELETE FROM`.
    pub fn keyword(self) -> &'static str {
        match self {
            TableMode::From => "FROM",
            TableMode::Insert => "INSERT INTO",
            TableMode::Update => "UPDATE",
            TableMode::Delete => "DELETE FROM",
        }
    }
}

/// A single JOIN entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    /// Join keyword, e.g. `JOIN`, `LEFT JOIN`, `CROSS JOIN`.
    pub join_type: String,
    pub tables: Vec<String>,
    /// `ON` expression, emitted verbatim.
    pub on: Option<String>,
    pub using: Vec<String>,
}

impl Join {
    fn render(&self) -> String {
        let tables: Vec<String> = self
            .tables
            .iter()
            .map(|t| escape_identifier(t))
            .filter(|t| !t.is_empty())
            .collect();

        let mut parts = vec![self.join_type.clone(), tables.join(", ")];

        if let Some(on) = self.on.as_deref().filter(|on| !on.is_empty()) {
            parts.push(format!("ON {on}"));
        }

        let using: Vec<String> = self
            .using
            .iter()
            .map(|c| escape_identifier(c))
            .filter(|c| !c.is_empty())
            .collect();
        if !using.is_empty() {
            parts.push(format!("USING ({})", using.join(", ")));
        }

        super::join_fragments(parts)
    }
}

/// Table list plus joins: `FROM`, `INSERT INTO`, `UPDATE` or `DELETE FROM`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FromStatement {
    mode: TableMode,
    tables: Vec<String>,
    joins: Vec<Join>,
}

impl FromStatement {
    /// An empty table list rendered with `mode`'s keyword.
    pub fn new(mode: TableMode) -> Self {
        Self {
            mode,
            tables: Vec::new(),
            joins: Vec::new(),
        }
    }

    pub fn mode(&self) -> TableMode {
        self.mode
    }

    /// Add tables, either `"t1, t2"` or `["t1", "t2"]`.
    pub fn add_table(&mut self, tables: impl Into<FieldList>) -> &mut Self {
        self.tables.extend(tables.into().into_inner());
        self
    }

    /// Add a join.
    ///
    /// `on` is emitted verbatim (never parameterized); `using` is a
    /// comma-separated column list.
    pub fn add_join(
        &mut self,
        tables: impl Into<FieldList>,
        on: Option<&str>,
        using: Option<&str>,
        join_type: &str,
    ) -> &mut Self {
        let using = using
            .map(|cols| FieldList::from(cols).into_inner())
            .unwrap_or_default();

        self.joins.push(Join {
            join_type: join_type.to_string(),
            tables: tables.into().into_inner(),
            on: on.map(str::to_string),
            using,
        });
        self
    }

    /// Tables in insertion order, unescaped.
    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    pub fn joins(&self) -> &[Join] {
        &self.joins
    }
}

impl Statement for FromStatement {
    fn render(&self, _params: &mut ParamList) -> String {
        if self.tables.is_empty() {
            return String::new();
        }

        let tables: Vec<String> = self
            .tables
            .iter()
            .map(|t| escape_identifier(t))
            .filter(|t| !t.is_empty())
            .collect();

        let mut parts = vec![self.mode.keyword().to_string(), tables.join(",")];
        parts.extend(self.joins.iter().map(Join::render));

        super::join_fragments(parts)
    }
}
