//! Join alias allocation and dotted-field resolution.
//!
//! A `JoinScope` lives for exactly one query execution. Aliases are
//! allocated lazily, the first time a query reaches through a join
//! property, and are unique per distinct joined table within the query.

pub mod hydrate;

pub use hydrate::HydrationCache;

use crate::{
    error::{ColumnMatchError, Error},
    metadata::EntityMetadata,
    query::{criteria::Criteria, page::Pageable},
};

///
/// JoinMap
/// One allocated join: target table, alias, and the ON pairing.
///

#[derive(Clone, Debug)]
pub struct JoinMap {
    pub property: String,
    pub table: &'static str,
    pub alias: String,
    /// Owning column on the master table.
    pub own_column: &'static str,
    /// Referenced key column on the joined table.
    pub target_key: &'static str,
}

///
/// JoinScope
///

#[derive(Debug, Default)]
pub struct JoinScope {
    joins: Vec<JoinMap>,
}

impl JoinScope {
    #[must_use]
    pub const fn new() -> Self {
        Self { joins: Vec::new() }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joins.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.joins.len()
    }

    /// Alias for the join property, allocating on first use. Two
    /// properties joining the same table share one alias.
    pub fn alias_for(
        &mut self,
        meta: &EntityMetadata,
        property: &str,
    ) -> Result<String, Error> {
        let join = meta.join(property).ok_or_else(|| ColumnMatchError {
            entity: meta.path,
            field: property.to_string(),
        })?;
        let target = (join.target)();

        if let Some(existing) = self.joins.iter().find(|j| j.table == target.table) {
            return Ok(existing.alias.clone());
        }

        let target_key = target
            .primary_key_column()
            .ok_or(crate::metadata::SchemaError::NoPrimaryKey { path: target.path })?;
        let alias = format!("{}__jn__{}", target.table, self.joins.len() + 1);

        self.joins.push(JoinMap {
            property: property.to_string(),
            table: target.table,
            alias: alias.clone(),
            own_column: join.column,
            target_key,
        });

        Ok(alias)
    }

    /// Rendered LEFT JOIN clauses in allocation order.
    #[must_use]
    pub fn render_clauses(&self, master_table: &str) -> Vec<String> {
        self.joins
            .iter()
            .map(|j| {
                format!(
                    "LEFT JOIN {} {} ON {}.{} = {}.{}",
                    j.table, j.alias, j.alias, j.target_key, master_table, j.own_column
                )
            })
            .collect()
    }

    #[must_use]
    pub fn joins(&self) -> &[JoinMap] {
        &self.joins
    }
}

///
/// FieldResolver
///
/// Maps logical fields to rendered column references for one query,
/// allocating join aliases as dotted fields are encountered.
///

pub struct FieldResolver<'a> {
    meta: &'a EntityMetadata,
    scope: &'a mut JoinScope,
    strict: bool,
}

impl<'a> FieldResolver<'a> {
    /// Lenient resolution: undeclared undotted fields pass through as
    /// literal column names.
    #[must_use]
    pub fn new(meta: &'a EntityMetadata, scope: &'a mut JoinScope) -> Self {
        Self {
            meta,
            scope,
            strict: false,
        }
    }

    /// Strict resolution: undeclared fields raise `ColumnMatchError`.
    #[must_use]
    pub fn strict(meta: &'a EntityMetadata, scope: &'a mut JoinScope) -> Self {
        Self {
            meta,
            scope,
            strict: true,
        }
    }

    pub fn resolve(&mut self, field: &str) -> Result<String, Error> {
        self.resolve_inner(field, self.strict)
    }

    /// Order-by resolution is always lenient, whatever the WHERE mode.
    pub fn resolve_lenient(&mut self, field: &str) -> Result<String, Error> {
        self.resolve_inner(field, false)
    }

    fn resolve_inner(&mut self, field: &str, strict: bool) -> Result<String, Error> {
        // dotted fields must name a declared join property
        if let Some((property, rest)) = field.split_once('.') {
            let join = self.meta.join(property).ok_or_else(|| ColumnMatchError {
                entity: self.meta.path,
                field: field.to_string(),
            })?;
            let alias = self.scope.alias_for(self.meta, property)?;
            let target = (join.target)();
            let column = target.column(rest).map_or(rest, |c| c.column);

            return Ok(format!("{alias}.{column}"));
        }

        if let Some(column) = self.meta.column(field) {
            return Ok(column.column.to_string());
        }

        // a bare join property maps to its owning column
        if let Some(join) = self.meta.join(field) {
            return Ok(join.column.to_string());
        }

        if strict {
            return Err(ColumnMatchError {
                entity: self.meta.path,
                field: field.to_string(),
            }
            .into());
        }

        Ok(field.to_string())
    }
}

/// True iff the query must emit joins: any dotted filter or sort field,
/// or a specification whose own flag is set.
#[must_use]
pub fn requires_join(criteria: &Criteria, pageable: Option<&Pageable>) -> bool {
    criteria.requires_join() || pageable.is_some_and(Pageable::requires_join)
}

#[cfg(test)]
mod tests;
