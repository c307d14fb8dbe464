use serde::{Deserialize, Serialize};

use crate::{coerce::DEFAULT_DATETIME_FORMAT, query::page::Limit, value::Value};

///
/// Dialect
///
/// SQL syntax family. Affects string escaping and limit/offset syntax;
/// everything else the builder emits is common.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Dialect {
    #[default]
    MySql,
    Postgres,
}

impl Dialect {
    /// Escape the inside of a string literal.
    ///
    /// MySQL family: backslash escaping. PostgreSQL family: quote
    /// doubling.
    #[must_use]
    pub fn escape_str(self, s: &str) -> String {
        match self {
            Self::MySql => {
                let mut out = String::with_capacity(s.len());

                for ch in s.chars() {
                    match ch {
                        '\\' => out.push_str("\\\\"),
                        '\'' => out.push_str("\\'"),
                        '\0' => out.push_str("\\0"),
                        _ => out.push(ch),
                    }
                }

                out
            }
            Self::Postgres => s.replace('\'', "''"),
        }
    }

    /// Render a value as a statement literal.
    #[must_use]
    pub fn escape_value(self, value: &Value) -> String {
        match value {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Text(s) => format!("'{}'", self.escape_str(s)),
            Value::DateTime(dt) => format!("'{}'", dt.format(DEFAULT_DATETIME_FORMAT)),
            Value::Json(j) => format!("'{}'", self.escape_str(&j.to_string())),
            Value::List(_) => format!("'{}'", self.escape_str(&value.to_json().to_string())),
        }
    }

    /// Trailing paging clause.
    #[must_use]
    pub(crate) fn render_limit(self, limit: &Limit) -> String {
        match self {
            Self::MySql => {
                if limit.offset == 0 {
                    format!("LIMIT {}", limit.limit)
                } else {
                    format!("LIMIT {},{}", limit.offset, limit.limit)
                }
            }
            Self::Postgres => {
                if limit.offset == 0 {
                    format!("LIMIT {}", limit.limit)
                } else {
                    format!("LIMIT {} OFFSET {}", limit.limit, limit.offset)
                }
            }
        }
    }

    #[must_use]
    pub(crate) const fn begin_statement(self) -> &'static str {
        match self {
            Self::MySql => "START TRANSACTION",
            Self::Postgres => "BEGIN",
        }
    }
}
