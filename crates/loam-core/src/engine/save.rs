use crate::{
    coerce::{from_column, to_column},
    connector::{Connector, MutationKind},
    engine::{ChangeSet, Engine, SessionContext},
    error::{Error, InsertableColumnError, UpdatableColumnError},
    model::KeyStrategy,
    traits::Entity,
    value::Value,
};

///
/// SaveOutcome
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SaveOutcome {
    Inserted,
    Updated,
}

impl<C: Connector> Engine<C> {
    // ======================================================================
    // Save
    // ======================================================================

    /// Insert-or-update by primary key.
    ///
    /// When a row matches, the fetched server-authoritative values are
    /// copied into every property the caller left unset (and did not mark
    /// null) before the update runs, so an update never blanks columns
    /// the caller did not touch.
    ///
    /// The read-then-write sequence is **not atomic**: two concurrent
    /// callers on the same logical key can race into a duplicate insert
    /// or a lost update. Callers needing atomicity must serialize
    /// externally or use connector transactions.
    pub fn save<E: Entity>(
        &self,
        ctx: &mut SessionContext,
        entity: &mut E,
        include_null: bool,
        changes: &ChangeSet,
    ) -> Result<SaveOutcome, Error> {
        let meta = ctx.metadata::<E>()?;
        let keys = meta.require_primary_keys()?;

        // unset key values cannot match a row
        let all_keys_set = keys.iter().all(|k| entity.get(k).is_some());

        if all_keys_set {
            let where_clause = self.pk_where(&meta, entity)?;
            let mut builder = self.builder();

            builder
                .select("*")
                .from(meta.table)
                .where_clause(&where_clause);

            let rows = self.run_query(&builder.to_sql())?;

            if let Some(row) = rows.first() {
                for (property, column) in &meta.columns {
                    let untouched =
                        entity.get(property).is_none() && !changes.is_nulled(property);

                    if untouched
                        && let Some(value) = row.get(column.column)
                    {
                        entity.set(property, from_column(value.clone(), column.kind))?;
                    }
                }

                self.update(ctx, entity, include_null, changes)?;

                return Ok(SaveOutcome::Updated);
            }
        }

        self.insert(ctx, entity, include_null)?;

        Ok(SaveOutcome::Inserted)
    }

    // ======================================================================
    // Insert
    // ======================================================================

    /// Insert one entity, resolving generated keys in two phases:
    /// pre-generated strategies are assigned before the statement is
    /// built, identity strategies are read back afterwards. A generated
    /// key is assigned at most once.
    pub fn insert<E: Entity>(
        &self,
        ctx: &mut SessionContext,
        entity: &mut E,
        include_null: bool,
    ) -> Result<u64, Error> {
        let meta = ctx.metadata::<E>()?;

        for key in &meta.generated_keys {
            if key.strategy == KeyStrategy::Uuid && entity.get(key.field).is_none() {
                let id = self.connector().generate_new_id();

                entity.set(key.field, Value::Text(id))?;
            }
        }

        let mut columns: Vec<&str> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        for property in &meta.order {
            let Some(column) = meta.column(property) else {
                continue;
            };

            if !column.insertable {
                continue;
            }

            // identity columns without a value stay server-assigned
            let identity_pending = meta
                .generated_keys
                .iter()
                .any(|k| k.field == *property && k.strategy == KeyStrategy::Identity)
                && entity.get(property).is_none();

            if identity_pending {
                continue;
            }

            let value = match entity.get(property) {
                Some(v) => to_column(&v, column),
                None => {
                    if let Some(default) = meta.defaults.get(property) {
                        to_column(default, column)
                    } else if include_null && !meta.not_null.contains(property) {
                        Value::Null
                    } else {
                        continue;
                    }
                }
            };

            columns.push(column.column);
            values.push(value);
        }

        if columns.is_empty() {
            return Err(InsertableColumnError { table: meta.table }.into());
        }

        let mut builder = self.builder();

        builder
            .insert()
            .into_table(meta.table)
            .fields(&columns)
            .values(&values);

        let affected = self.run_mutation(MutationKind::Insert, &builder.to_sql())?;

        for key in &meta.generated_keys {
            if key.strategy == KeyStrategy::Identity && entity.get(key.field).is_none() {
                let id = self.connector().last_insert_id()?;
                let kind = meta
                    .column(key.field)
                    .map_or(crate::model::ColumnKind::Int, |c| c.kind);

                entity.set(key.field, from_column(id, kind))?;
            }
        }

        Ok(affected)
    }

    /// Fail-fast batch insert; non-atomic, partial successes remain.
    pub fn insert_many<'a, E: Entity>(
        &self,
        ctx: &mut SessionContext,
        entities: impl IntoIterator<Item = &'a mut E>,
        include_null: bool,
    ) -> Result<u64, Error> {
        let mut affected = 0;

        for entity in entities {
            affected += self.insert(ctx, entity, include_null)?;
        }

        Ok(affected)
    }

    // ======================================================================
    // Update
    // ======================================================================

    /// Update one entity by primary key.
    ///
    /// SET covers every non-key updatable column that carries a value;
    /// `include_null` widens that to unset nullable columns, and
    /// change-set entries force `column = null` either way.
    pub fn update<E: Entity>(
        &self,
        ctx: &mut SessionContext,
        entity: &E,
        include_null: bool,
        changes: &ChangeSet,
    ) -> Result<u64, Error> {
        let meta = ctx.metadata::<E>()?;
        let mut assignments: Vec<(&str, Value)> = Vec::new();

        for property in &meta.order {
            if meta.primary_keys.contains(property) {
                continue;
            }

            let Some(column) = meta.column(property) else {
                continue;
            };

            if !column.updatable {
                continue;
            }

            if changes.is_nulled(property) {
                assignments.push((column.column, Value::Null));
            } else if let Some(value) = entity.get(property) {
                assignments.push((column.column, to_column(&value, column)));
            } else if include_null && !meta.not_null.contains(property) {
                assignments.push((column.column, Value::Null));
            }
        }

        if assignments.is_empty() {
            return Err(UpdatableColumnError { table: meta.table }.into());
        }

        let where_clause = self.pk_where(&meta, entity)?;
        let mut builder = self.builder();

        builder
            .update(meta.table)
            .set(&assignments)
            .where_clause(&where_clause);

        Ok(self.run_mutation(MutationKind::Update, &builder.to_sql())?)
    }

    /// Fail-fast batch update; non-atomic, partial successes remain.
    pub fn update_many<'a, E: Entity>(
        &self,
        ctx: &mut SessionContext,
        entities: impl IntoIterator<Item = &'a E>,
        include_null: bool,
    ) -> Result<u64, Error> {
        let changes = ChangeSet::new();
        let mut affected = 0;

        for entity in entities {
            affected += self.update(ctx, entity, include_null, &changes)?;
        }

        Ok(affected)
    }
}
