use crate::{
    connector::{Connector, MutationKind},
    engine::{Engine, SessionContext},
    error::{Error, FilterError},
    join::{FieldResolver, JoinScope},
    query::criteria::Criteria,
    traits::Entity,
};

impl<C: Connector> Engine<C> {
    /// Delete one entity by primary key.
    pub fn delete<E: Entity>(&self, ctx: &mut SessionContext, entity: &E) -> Result<u64, Error> {
        let meta = ctx.metadata::<E>()?;
        let where_clause = self.pk_where(&meta, entity)?;
        let mut builder = self.builder();

        builder
            .delete()
            .from(meta.table)
            .where_clause(&where_clause);

        Ok(self.run_mutation(MutationKind::Delete, &builder.to_sql())?)
    }

    /// Delete every row matching the criteria. An empty filter is
    /// refused rather than truncating the table.
    pub fn delete_by<E: Entity>(
        &self,
        ctx: &mut SessionContext,
        criteria: impl Into<Criteria>,
    ) -> Result<u64, Error> {
        let criteria = criteria.into();

        if criteria.is_empty() {
            return Err(FilterError::EmptyWhere.into());
        }

        let meta = ctx.metadata::<E>()?;
        let spec = criteria.to_specification();
        let mut scope = JoinScope::new();
        let mut fields = if criteria.strict() {
            FieldResolver::strict(&meta, &mut scope)
        } else {
            FieldResolver::new(&meta, &mut scope)
        };
        let where_clause = spec.render(&mut fields, self.dialect())?;

        if where_clause.is_empty() {
            return Err(FilterError::EmptyWhere.into());
        }

        // deletes never join; a dotted field here is a caller error
        if !scope.is_empty() {
            return Err(crate::error::ColumnMatchError {
                entity: meta.path,
                field: scope.joins()[0].property.clone(),
            }
            .into());
        }

        let mut builder = self.builder();

        builder
            .delete()
            .from(meta.table)
            .where_clause(&where_clause);

        Ok(self.run_mutation(MutationKind::Delete, &builder.to_sql())?)
    }

    /// Fail-fast batch delete; non-atomic, partial successes remain.
    pub fn delete_many<'a, E: Entity>(
        &self,
        ctx: &mut SessionContext,
        entities: impl IntoIterator<Item = &'a E>,
    ) -> Result<u64, Error> {
        let mut affected = 0;

        for entity in entities {
            affected += self.delete(ctx, entity)?;
        }

        Ok(affected)
    }
}
