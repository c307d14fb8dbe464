//! Persistence engine: one synchronous round trip per statement.
//!
//! The engine combines resolved metadata and the query model into SQL,
//! executes through the connector, and maps rows back into entities. All
//! per-request caching lives in the caller's `SessionContext`.

mod changes;
mod context;
mod count;
mod delete;
mod load;
mod save;

pub use changes::ChangeSet;
pub use context::SessionContext;
pub use save::SaveOutcome;

use crate::{
    connector::{Connector, ConnectorError, MutationKind},
    error::{Error, FilterError},
    metadata::EntityMetadata,
    sql::{Dialect, SqlBuilder},
    traits::Entity,
    value::Value,
};

///
/// EngineConfig
///

#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
    /// Pages offered either side of the current page in a result window.
    pub window_margin: u64,
    /// Resolve joined entity properties after mapping rows.
    pub hydrate_joins: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_margin: 5,
            hydrate_joins: true,
        }
    }
}

///
/// Engine
///
/// Central orchestrator. Multiple engines may share one connector; the
/// engine never opens or closes transactions on its own.
///

pub struct Engine<C: Connector> {
    connector: C,
    config: EngineConfig,
}

impl<C: Connector> Engine<C> {
    #[must_use]
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            config: EngineConfig::default(),
        }
    }

    #[must_use]
    pub const fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub const fn connector(&self) -> &C {
        &self.connector
    }

    pub const fn connector_mut(&mut self) -> &mut C {
        &mut self.connector
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub(crate) fn dialect(&self) -> Dialect {
        self.connector.database_type()
    }

    pub(crate) fn builder(&self) -> SqlBuilder {
        SqlBuilder::new(self.dialect())
    }

    // ======================================================================
    // Statement execution
    // ======================================================================

    pub(crate) fn run_query(&self, sql: &str) -> Result<Vec<crate::connector::Row>, ConnectorError> {
        log::debug!(target: "loam::sql", "query {sql}");

        self.connector.execute_query(sql)
    }

    pub(crate) fn run_mutation(
        &self,
        kind: MutationKind,
        sql: &str,
    ) -> Result<u64, ConnectorError> {
        log::debug!(target: "loam::sql", "{kind} {sql}");

        match kind {
            MutationKind::Insert => self.connector.execute_insert(sql),
            MutationKind::Update => self.connector.execute_update(sql),
            MutationKind::Delete => self.connector.execute_delete(sql),
        }
    }

    // ======================================================================
    // Primary-key WHERE construction
    // ======================================================================

    /// Per-key equality over the entity's current key values. Every key
    /// must be set; `FilterError` otherwise.
    pub(crate) fn pk_where<E: Entity>(
        &self,
        meta: &EntityMetadata,
        entity: &E,
    ) -> Result<String, Error> {
        let keys = meta.require_primary_keys()?;
        let mut values = Vec::with_capacity(keys.len());

        for key in keys {
            match entity.get(key) {
                Some(v) => values.push(v),
                None => {
                    return Err(FilterError::MissingPrimaryKeyValue {
                        field: (*key).to_string(),
                    }
                    .into());
                }
            }
        }

        Ok(self.pk_where_values(meta, keys, &values))
    }

    /// Per-key equality for explicit key values; a `Null` key renders
    /// `is null`.
    pub(crate) fn pk_where_values(
        &self,
        meta: &EntityMetadata,
        keys: &[&'static str],
        values: &[Value],
    ) -> String {
        let dialect = self.dialect();
        let parts: Vec<String> = keys
            .iter()
            .zip(values)
            .map(|(key, value)| {
                let column = meta.column(key).map_or(*key, |c| c.column);

                if value.is_null() {
                    format!("{column} is null")
                } else {
                    format!("{column} = {}", dialect.escape_value(value))
                }
            })
            .collect();

        parts.join(" and ")
    }
}
