//! Runtime schema resolution.
//!
//! A static `EntityModel` is resolved once per entity type into an
//! `EntityMetadata` with the lookup maps the engine works from. Resolution
//! is idempotent and the result is immutable; caching lives in the
//! session context, never here.

use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error as ThisError;

use crate::{
    model::{ColumnKind, EntityModel, FieldSpec, KeyStrategy},
    value::Value,
};

///
/// SchemaError
///

#[derive(Debug, ThisError)]
pub enum SchemaError {
    #[error("entity `{path}` declares no table name")]
    MissingTable { path: &'static str },

    #[error("entity `{path}` maps column `{column}` more than once")]
    DuplicateColumn {
        path: &'static str,
        column: &'static str,
    },

    #[error("entity `{path}` has no primary key configured")]
    NoPrimaryKey { path: &'static str },

    #[error("join `{field}` on `{path}` references unmapped owning column `{column}`")]
    InvalidJoin {
        path: &'static str,
        field: &'static str,
        column: &'static str,
    },

    #[error("generated-key strategy on `{path}.{field}` is incompatible with column kind {kind:?}")]
    InvalidKeyStrategy {
        path: &'static str,
        field: &'static str,
        kind: ColumnKind,
    },
}

///
/// ColumnMeta
///

#[derive(Clone, Copy, Debug)]
pub struct ColumnMeta {
    pub column: &'static str,
    pub kind: ColumnKind,
    pub nullable: bool,
    pub insertable: bool,
    pub updatable: bool,
    pub datetime_format: Option<&'static str>,
}

///
/// JoinMeta
///

#[derive(Clone, Copy, Debug)]
pub struct JoinMeta {
    /// Owning column on the master table.
    pub column: &'static str,
    pub target: fn() -> &'static EntityModel,
}

///
/// GeneratedKey
///
/// One resolved generated-key column and its assignment strategy.
///

#[derive(Clone, Copy, Debug)]
pub struct GeneratedKey {
    pub field: &'static str,
    pub strategy: KeyStrategy,
    pub generator: Option<&'static str>,
}

///
/// EntityMetadata
///
/// Resolved per-entity schema. Immutable after resolution; one instance
/// per entity type per session context.
///

#[derive(Debug)]
pub struct EntityMetadata {
    pub path: &'static str,
    pub entity_name: &'static str,
    pub table: &'static str,
    /// Property → column metadata.
    pub columns: BTreeMap<&'static str, ColumnMeta>,
    /// Property → join metadata.
    pub joins: BTreeMap<&'static str, JoinMeta>,
    /// Column properties in declaration order (statement column order).
    pub order: Vec<&'static str>,
    /// Primary-key properties in declaration order.
    pub primary_keys: Vec<&'static str>,
    pub generated_keys: Vec<GeneratedKey>,
    pub defaults: BTreeMap<&'static str, Value>,
    pub not_null: BTreeSet<&'static str>,
}

impl EntityMetadata {
    /// Resolve and validate a static model.
    pub fn resolve(model: &'static EntityModel) -> Result<Self, SchemaError> {
        if model.table.is_empty() {
            return Err(SchemaError::MissingTable { path: model.path });
        }

        let mut columns = BTreeMap::new();
        let mut joins = BTreeMap::new();
        let mut order = Vec::new();
        let mut primary_keys = Vec::new();
        let mut generated_keys = Vec::new();
        let mut defaults = BTreeMap::new();
        let mut not_null = BTreeSet::new();
        let mut seen_columns = BTreeSet::new();

        for field in model.fields {
            match &field.spec {
                FieldSpec::Column(c) => {
                    if !seen_columns.insert(c.column) {
                        return Err(SchemaError::DuplicateColumn {
                            path: model.path,
                            column: c.column,
                        });
                    }

                    columns.insert(
                        field.name,
                        ColumnMeta {
                            column: c.column,
                            kind: c.kind,
                            nullable: c.nullable,
                            insertable: c.insertable,
                            updatable: c.updatable,
                            datetime_format: c.datetime_format,
                        },
                    );
                    order.push(field.name);

                    if c.primary_key {
                        primary_keys.push(field.name);
                    }
                    if c.not_null {
                        not_null.insert(field.name);
                    }
                    if let Some(default) = c.default {
                        defaults.insert(field.name, default.to_value());
                    }
                    if let Some(auto) = c.auto_increment {
                        validate_strategy(model.path, field.name, auto.strategy, c.kind)?;
                        generated_keys.push(GeneratedKey {
                            field: field.name,
                            strategy: auto.strategy,
                            generator: auto.generator,
                        });
                    }
                }
                FieldSpec::Join(j) => {
                    joins.insert(
                        field.name,
                        JoinMeta {
                            column: j.column,
                            target: j.target,
                        },
                    );
                }
            }
        }

        // every join must own a mapped column on the master table
        for (name, join) in &joins {
            let owned = columns.values().any(|c| c.column == join.column);

            if !owned {
                return Err(SchemaError::InvalidJoin {
                    path: model.path,
                    field: name,
                    column: join.column,
                });
            }
        }

        Ok(Self {
            path: model.path,
            entity_name: model.entity_name,
            table: model.table,
            columns,
            joins,
            order,
            primary_keys,
            generated_keys,
            defaults,
            not_null,
        })
    }

    #[must_use]
    pub fn column(&self, property: &str) -> Option<&ColumnMeta> {
        self.columns.get(property)
    }

    #[must_use]
    pub fn join(&self, property: &str) -> Option<&JoinMeta> {
        self.joins.get(property)
    }

    /// Primary-key properties, or `SchemaError` when none are configured.
    pub fn require_primary_keys(&self) -> Result<&[&'static str], SchemaError> {
        if self.primary_keys.is_empty() {
            return Err(SchemaError::NoPrimaryKey { path: self.path });
        }

        Ok(&self.primary_keys)
    }

    /// Column name used for count projections: the first primary-key
    /// column when one exists, else a wildcard.
    #[must_use]
    pub fn count_projection(&self) -> String {
        self.primary_keys
            .first()
            .and_then(|pk| self.columns.get(pk))
            .map_or_else(|| "count(*)".to_string(), |c| format!("count({})", c.column))
    }
}

fn validate_strategy(
    path: &'static str,
    field: &'static str,
    strategy: KeyStrategy,
    kind: ColumnKind,
) -> Result<(), SchemaError> {
    let compatible = match strategy {
        KeyStrategy::Uuid => matches!(kind, ColumnKind::Text),
        KeyStrategy::Identity => matches!(kind, ColumnKind::Int),
    };

    if compatible {
        Ok(())
    } else {
        Err(SchemaError::InvalidKeyStrategy { path, field, kind })
    }
}

#[cfg(test)]
mod tests;
