use std::time::Instant;

use crate::{
    coerce::from_column,
    connector::{Connector, Row},
    engine::{Engine, SessionContext},
    error::{EmptyResultError, Error, FilterError},
    join::{FieldResolver, JoinScope},
    metadata::EntityMetadata,
    query::{builder::Query, criteria::Criteria, page::Pageable},
    response::PageResult,
    traits::Entity,
    value::Value,
};

impl<C: Connector> Engine<C> {
    // ======================================================================
    // Single-row reads (misses propagate as typed errors)
    // ======================================================================

    /// Fetch one entity by primary key. One value per key column, in
    /// declaration order; a `Null` key value matches `is null`.
    pub fn find<E: Entity>(&self, ctx: &mut SessionContext, keys: &[Value]) -> Result<E, Error> {
        let meta = ctx.metadata::<E>()?;
        let key_fields = meta.require_primary_keys()?;

        if keys.len() != key_fields.len() {
            return Err(FilterError::KeyArityMismatch {
                expected: key_fields.len(),
                got: keys.len(),
            }
            .into());
        }

        let where_clause = self.pk_where_values(&meta, key_fields, keys);
        let mut builder = self.builder();

        builder
            .select("*")
            .from(meta.table)
            .where_clause(&where_clause);

        let rows = self.run_query(&builder.to_sql())?;
        let Some(row) = rows.first() else {
            return Err(EmptyResultError { table: meta.table }.into());
        };
        let mut entity = map_row::<E>(&meta, row)?;

        if self.config().hydrate_joins {
            entity.hydrate_joins(self, ctx)?;
        }

        Ok(entity)
    }

    /// Fetch the first entity matching the criteria.
    pub fn find_one_by<E: Entity>(
        &self,
        ctx: &mut SessionContext,
        criteria: impl Into<Criteria>,
    ) -> Result<E, Error> {
        let criteria = criteria.into();
        let meta = ctx.metadata::<E>()?;
        let spec = criteria.to_specification();
        let mut scope = JoinScope::new();
        let where_clause = {
            let mut fields = if criteria.strict() {
                FieldResolver::strict(&meta, &mut scope)
            } else {
                FieldResolver::new(&meta, &mut scope)
            };

            spec.render(&mut fields, self.dialect())?
        };
        let join_clauses = scope.render_clauses(meta.table);
        let mut builder = self.builder();

        builder.select(&projection(&meta, &join_clauses)).from(meta.table);
        for clause in &join_clauses {
            builder.raw_join(clause);
        }
        builder.where_clause(&where_clause).limit(1);

        let rows = self.run_query(&builder.to_sql())?;
        let Some(row) = rows.first() else {
            return Err(EmptyResultError { table: meta.table }.into());
        };
        let mut entity = map_row::<E>(&meta, row)?;

        if self.config().hydrate_joins {
            entity.hydrate_joins(self, ctx)?;
        }

        Ok(entity)
    }

    // ======================================================================
    // Collection reads (misses and connector failures normalize to empty)
    // ======================================================================

    /// Fetch every row, optionally ordered and paged.
    pub fn find_all<E: Entity>(
        &self,
        ctx: &mut SessionContext,
        pageable: Option<&Pageable>,
    ) -> Result<PageResult<E>, Error> {
        self.find_by(ctx, Criteria::Spec(crate::query::Specification::new()), pageable)
    }

    /// Fetch every row matching the criteria, optionally ordered and
    /// paged. Connector failures degrade to an empty result.
    pub fn find_by<E: Entity>(
        &self,
        ctx: &mut SessionContext,
        criteria: impl Into<Criteria>,
        pageable: Option<&Pageable>,
    ) -> Result<PageResult<E>, Error> {
        let criteria = criteria.into();

        match self.run_collection(ctx, &criteria, pageable) {
            Ok(result) => Ok(result),
            Err(Error::Connector(err)) => {
                log::warn!(
                    target: "loam::engine",
                    "collection read on `{}` degraded to empty: {err}",
                    E::MODEL.table
                );

                Ok(PageResult::empty())
            }
            Err(other) => Err(other),
        }
    }

    /// Run a fluent typed query.
    pub fn query<E: Entity>(
        &self,
        ctx: &mut SessionContext,
        query: Query<E>,
    ) -> Result<PageResult<E>, Error> {
        let (criteria, pageable) = query.build();

        self.find_by(ctx, criteria, pageable.as_ref())
    }

    fn run_collection<E: Entity>(
        &self,
        ctx: &mut SessionContext,
        criteria: &Criteria,
        pageable: Option<&Pageable>,
    ) -> Result<PageResult<E>, Error> {
        let started = Instant::now();
        let meta = ctx.metadata::<E>()?;
        let dialect = self.dialect();
        let spec = criteria.to_specification();
        let mut scope = JoinScope::new();

        let where_clause = {
            let mut fields = if criteria.strict() {
                FieldResolver::strict(&meta, &mut scope)
            } else {
                FieldResolver::new(&meta, &mut scope)
            };

            spec.render(&mut fields, dialect)?
        };
        let order_clause = match pageable.and_then(|p| p.sortable.as_ref()) {
            Some(sortable) => {
                let mut fields = FieldResolver::new(&meta, &mut scope);

                sortable.create_order_by(&mut fields)?
            }
            None => String::new(),
        };
        let join_clauses = scope.render_clauses(meta.table);

        // totals first, over the same joins and filter
        let mut builder = self.builder();

        builder.select(&meta.count_projection()).from(meta.table);
        for clause in &join_clauses {
            builder.raw_join(clause);
        }
        builder.where_clause(&where_clause);

        let total = count_from_rows(&self.run_query(&builder.to_sql())?);

        builder.new_query();
        builder.select(&projection(&meta, &join_clauses)).from(meta.table);
        for clause in &join_clauses {
            builder.raw_join(clause);
        }
        builder.where_clause(&where_clause).order_by(&order_clause);
        if let Some(limit) = pageable.and_then(Pageable::limit) {
            builder.paged(&limit);
        }

        let rows = self.run_query(&builder.to_sql())?;
        let mut entities = Vec::with_capacity(rows.len());

        for row in &rows {
            let mut entity = map_row::<E>(&meta, row)?;

            if self.config().hydrate_joins {
                entity.hydrate_joins(self, ctx)?;
            }

            entities.push(entity);
        }

        Ok(PageResult::paged(
            entities,
            total,
            pageable,
            self.config().window_margin,
            started.elapsed(),
        ))
    }

    // ======================================================================
    // Join hydration
    // ======================================================================

    /// Resolve a referenced entity by key, caching per context. A lookup
    /// that finds nothing (or a connector failure) yields `None` rather
    /// than failing the owning row.
    pub fn resolve_join<E: Entity>(
        &self,
        ctx: &mut SessionContext,
        key: &Value,
    ) -> Result<Option<E>, Error> {
        if key.is_null() {
            return Ok(None);
        }

        if let Some(cached) = ctx.hydration().get::<E>(key) {
            return Ok(cached);
        }

        // placeholder breaks reference cycles during nested hydration
        ctx.hydration().put::<E>(key, None);

        let resolved = match self.find::<E>(ctx, std::slice::from_ref(key)) {
            Ok(entity) => Some(entity),
            Err(Error::EmptyResult(_)) => None,
            Err(Error::Connector(err)) => {
                log::warn!(
                    target: "loam::engine",
                    "hydration of `{}` key {key:?} failed: {err}",
                    E::MODEL.table
                );

                None
            }
            Err(other) => return Err(other),
        };

        ctx.hydration().put::<E>(key, resolved.clone());

        Ok(resolved)
    }
}

/// Map one fetched row into an entity through the coercion layer.
fn map_row<E: Entity>(meta: &EntityMetadata, row: &Row) -> Result<E, Error> {
    let mut entity = E::default();

    for (&property, column) in &meta.columns {
        if let Some(value) = row.get(column.column)
            && !value.is_null()
        {
            entity.set(property, from_column(value.clone(), column.kind))?;
        }
    }

    Ok(entity)
}

/// Projection for data reads: a wildcard, qualified to the master table
/// once joins are present so joined columns never shadow master columns.
fn projection(meta: &EntityMetadata, join_clauses: &[String]) -> String {
    if join_clauses.is_empty() {
        "*".to_string()
    } else {
        format!("{}.*", meta.table)
    }
}

/// First column of the first row of a count projection.
pub(super) fn count_from_rows(rows: &[Row]) -> u64 {
    rows.first()
        .and_then(|row| row.first())
        .map_or(0, |(_, value)| match value {
            Value::Int(i) => u64::try_from(*i).unwrap_or(0),
            Value::Text(s) => s.parse().unwrap_or(0),
            _ => 0,
        })
}
