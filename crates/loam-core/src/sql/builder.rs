use std::fmt;

use crate::{query::page::Limit, sql::dialect::Dialect, value::Value};

///
/// SqlBuilder
///
/// Single-statement mutable buffer. Verb methods append clauses in call
/// order; `new_query` resets the buffer for the next statement. Paging
/// is held aside and rendered last in the dialect's syntax.
///

#[derive(Debug)]
pub struct SqlBuilder {
    dialect: Dialect,
    buffer: String,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl SqlBuilder {
    #[must_use]
    pub const fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            buffer: String::new(),
            limit: None,
            offset: None,
        }
    }

    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Reset for the next statement.
    pub fn new_query(&mut self) -> &mut Self {
        self.buffer.clear();
        self.limit = None;
        self.offset = None;
        self
    }

    // ======================================================================
    // Insert
    // ======================================================================

    pub fn insert(&mut self) -> &mut Self {
        self.push("INSERT")
    }

    pub fn into_table(&mut self, table: &str) -> &mut Self {
        self.push("INTO");
        self.push(table)
    }

    pub fn fields(&mut self, columns: &[&str]) -> &mut Self {
        let list = columns.join(", ");

        self.push(&format!("({list})"))
    }

    pub fn values(&mut self, values: &[Value]) -> &mut Self {
        let rendered: Vec<String> = values.iter().map(|v| self.escape_value(v)).collect();

        self.push("VALUES");
        self.push(&format!("({})", rendered.join(", ")))
    }

    // ======================================================================
    // Select
    // ======================================================================

    pub fn select(&mut self, projection: &str) -> &mut Self {
        self.push("SELECT");
        self.push(projection)
    }

    pub fn from(&mut self, table: &str) -> &mut Self {
        self.push("FROM");
        self.push(table)
    }

    pub fn join(&mut self, table: &str) -> &mut Self {
        self.push("JOIN");
        self.push(table)
    }

    pub fn inner_join(&mut self, table: &str) -> &mut Self {
        self.push("INNER JOIN");
        self.push(table)
    }

    pub fn left_join(&mut self, table: &str) -> &mut Self {
        self.push("LEFT JOIN");
        self.push(table)
    }

    pub fn right_join(&mut self, table: &str) -> &mut Self {
        self.push("RIGHT JOIN");
        self.push(table)
    }

    pub fn outer_join(&mut self, table: &str) -> &mut Self {
        self.push("OUTER JOIN");
        self.push(table)
    }

    pub fn left_outer_join(&mut self, table: &str) -> &mut Self {
        self.push("LEFT OUTER JOIN");
        self.push(table)
    }

    pub fn on(&mut self, condition: &str) -> &mut Self {
        self.push("ON");
        self.push(condition)
    }

    /// Append an already-rendered join clause verbatim.
    pub fn raw_join(&mut self, clause: &str) -> &mut Self {
        self.push(clause)
    }

    // ======================================================================
    // Update / delete
    // ======================================================================

    pub fn update(&mut self, table: &str) -> &mut Self {
        self.push("UPDATE");
        self.push(table)
    }

    pub fn set(&mut self, assignments: &[(&str, Value)]) -> &mut Self {
        let rendered: Vec<String> = assignments
            .iter()
            .map(|(column, value)| format!("{column} = {}", self.escape_value(value)))
            .collect();

        self.push("SET");
        self.push(&rendered.join(", "))
    }

    pub fn delete(&mut self) -> &mut Self {
        self.push("DELETE")
    }

    // ======================================================================
    // Clauses
    // ======================================================================

    pub fn where_clause(&mut self, condition: &str) -> &mut Self {
        if condition.is_empty() {
            return self;
        }

        self.push("WHERE");
        self.push(condition)
    }

    pub fn group_by(&mut self, clause: &str) -> &mut Self {
        self.push("GROUP BY");
        self.push(clause)
    }

    pub fn having(&mut self, condition: &str) -> &mut Self {
        self.push("HAVING");
        self.push(condition)
    }

    pub fn order_by(&mut self, clause: &str) -> &mut Self {
        if clause.is_empty() {
            return self;
        }

        self.push("ORDER BY");
        self.push(clause)
    }

    pub fn limit(&mut self, limit: u64) -> &mut Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(&mut self, offset: u64) -> &mut Self {
        self.offset = Some(offset);
        self
    }

    pub fn paged(&mut self, limit: &Limit) -> &mut Self {
        self.limit = Some(limit.limit);
        self.offset = Some(limit.offset);
        self
    }

    // ======================================================================
    // Values
    // ======================================================================

    #[must_use]
    pub fn escape_value(&self, value: &Value) -> String {
        self.dialect.escape_value(value)
    }

    // ======================================================================
    // Dialect-gated helpers
    //
    // Each returns a standalone statement, or `None` where the dialect
    // has no supported form.
    // ======================================================================

    #[must_use]
    pub fn begin_transaction(&self) -> Option<String> {
        Some(self.dialect.begin_statement().to_string())
    }

    #[must_use]
    pub fn commit(&self) -> Option<String> {
        Some("COMMIT".to_string())
    }

    #[must_use]
    pub fn rollback(&self) -> Option<String> {
        Some("ROLLBACK".to_string())
    }

    #[must_use]
    pub fn lock_table(&self, table: &str) -> Option<String> {
        match self.dialect {
            Dialect::MySql => Some(format!("LOCK TABLES {table} WRITE")),
            Dialect::Postgres => None,
        }
    }

    #[must_use]
    pub fn unlock_tables(&self) -> Option<String> {
        match self.dialect {
            Dialect::MySql => Some("UNLOCK TABLES".to_string()),
            Dialect::Postgres => None,
        }
    }

    #[must_use]
    pub fn call_function(&self, name: &str, args: &[Value]) -> Option<String> {
        let rendered: Vec<String> = args.iter().map(|v| self.escape_value(v)).collect();

        match self.dialect {
            Dialect::Postgres => Some(format!("SELECT {name}({})", rendered.join(", "))),
            Dialect::MySql => None,
        }
    }

    // ======================================================================
    // Rendering
    // ======================================================================

    /// Render the statement, appending paging in the dialect's syntax.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let mut out = self.buffer.clone();

        if let Some(limit) = self.limit {
            let paging = self.dialect.render_limit(&Limit {
                offset: self.offset.unwrap_or(0),
                limit,
            });

            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&paging);
        }

        out
    }

    fn push(&mut self, fragment: &str) -> &mut Self {
        if !self.buffer.is_empty() {
            self.buffer.push(' ');
        }
        self.buffer.push_str(fragment);
        self
    }
}

impl fmt::Display for SqlBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}
