use crate::{
    connector::Connector,
    engine::{Engine, SessionContext},
    error::Error,
    join::{FieldResolver, JoinScope},
    query::criteria::Criteria,
    traits::Entity,
};

use super::load::count_from_rows;

impl<C: Connector> Engine<C> {
    /// Count every row. Connector failures degrade to zero.
    pub fn count_all<E: Entity>(&self, ctx: &mut SessionContext) -> Result<u64, Error> {
        self.count_by::<E>(ctx, Criteria::Spec(crate::query::Specification::new()))
    }

    /// Count rows matching the criteria, projecting the primary-key
    /// column when one exists. Connector failures degrade to zero.
    pub fn count_by<E: Entity>(
        &self,
        ctx: &mut SessionContext,
        criteria: impl Into<Criteria>,
    ) -> Result<u64, Error> {
        let criteria = criteria.into();

        match self.run_count::<E>(ctx, &criteria) {
            Ok(total) => Ok(total),
            Err(Error::Connector(err)) => {
                log::warn!(
                    target: "loam::engine",
                    "count on `{}` degraded to zero: {err}",
                    E::MODEL.table
                );

                Ok(0)
            }
            Err(other) => Err(other),
        }
    }

    /// True iff at least one row matches.
    pub fn exists_by<E: Entity>(
        &self,
        ctx: &mut SessionContext,
        criteria: impl Into<Criteria>,
    ) -> Result<bool, Error> {
        Ok(self.count_by::<E>(ctx, criteria)? > 0)
    }

    fn run_count<E: Entity>(
        &self,
        ctx: &mut SessionContext,
        criteria: &Criteria,
    ) -> Result<u64, Error> {
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
        let mut builder = self.builder();

        builder.select(&meta.count_projection()).from(meta.table);
        for clause in scope.render_clauses(meta.table) {
            builder.raw_join(&clause);
        }
        builder.where_clause(&where_clause);

        let rows = self.run_query(&builder.to_sql())?;

        Ok(count_from_rows(&rows))
    }
}
