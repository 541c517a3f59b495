use super::{FieldList, Statement};
use crate::ident::escape_identifier;
use crate::params::ParamList;
use std::fmt;

/// Sort direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    /// Parse `ASC`/`DESC`, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("asc") {
            Some(Direction::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Some(Direction::Desc)
        } else {
            None
        }
    }

    /// `ASC` or `DESC`.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `ORDER BY` or `GROUP BY` field list.
///
/// In group mode directions are accepted but never rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderStatement {
    keyword: &'static str,
    fields: Vec<(String, Option<Direction>)>,
}

impl OrderStatement {
    /// An empty ORDER BY list.
    pub fn new() -> Self {
        Self {
            keyword: "ORDER BY",
            fields: Vec::new(),
        }
    }

    /// An empty GROUP BY list. Directions are never printed.
    pub fn group_by() -> Self {
        Self {
            keyword: "GROUP BY",
            fields: Vec::new(),
        }
    }

    pub fn is_group_by(&self) -> bool {
        self.keyword == "GROUP BY"
    }

    /// Add fields sharing one direction.
    ///
    /// Without an explicit direction a trailing `ASC`/`DESC` word on a field
    /// (`"created_at DESC"`) is picked up.
    pub fn add_fields(
        &mut self,
        fields: impl Into<FieldList>,
        direction: Option<Direction>,
    ) -> &mut Self {
        for field in fields.into().into_inner() {
            let entry = match direction {
                Some(dir) => (field, Some(dir)),
                None => split_direction(&field),
            };
            self.fields.push(entry);
        }
        self
    }

    /// Fields with their explicit directions.
    pub fn fields(&self) -> &[(String, Option<Direction>)] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for OrderStatement {
    fn default() -> Self {
        Self::new()
    }
}

fn split_direction(field: &str) -> (String, Option<Direction>) {
    if let Some((name, last)) = field.trim().rsplit_once(char::is_whitespace) {
        if let Some(dir) = Direction::parse(last) {
            return (name.trim_end().to_string(), Some(dir));
        }
    }
    (field.to_string(), None)
}

impl Statement for OrderStatement {
    fn render(&self, _params: &mut ParamList) -> String {
        let group = self.is_group_by();
        let items: Vec<String> = self
            .fields
            .iter()
            .filter_map(|(field, dir)| {
                let field = escape_identifier(field);
                if field.is_empty() {
                    return None;
                }
                Some(match dir {
                    Some(dir) if !group => format!("{field} {dir}"),
                    _ => field,
                })
            })
            .collect();

        if items.is_empty() {
            return String::new();
        }

        format!("{} {}", self.keyword, items.join(", "))
    }
}
