use super::*;
use crate::{
    model::{ColumnModel, EntityModel, FieldModel, JoinModel},
    test_support::{Role, Ticket, User},
    traits::Entity,
};

#[test]
fn resolve_builds_the_lookup_maps() {
    let meta = EntityMetadata::resolve(User::MODEL).unwrap();

    assert_eq!(meta.table, "users");
    assert_eq!(meta.column("status").map(|c| c.column), Some("user_status"));
    assert_eq!(meta.column("age").map(|c| c.column), Some("user_age"));
    assert_eq!(meta.primary_keys, vec!["id"]);
    assert_eq!(meta.join("role").map(|j| j.column), Some("role_id"));
    assert_eq!(meta.defaults.get("active"), Some(&Value::Bool(true)));
    assert!(meta.not_null.contains("id"));
    assert_eq!(
        meta.order,
        vec!["id", "status", "age", "email", "active", "created_at", "role_id"]
    );
}

#[test]
fn resolve_is_idempotent() {
    let first = EntityMetadata::resolve(User::MODEL).unwrap();
    let second = EntityMetadata::resolve(User::MODEL).unwrap();

    assert_eq!(first.order, second.order);
    assert_eq!(first.primary_keys, second.primary_keys);
    assert_eq!(
        first.columns.keys().collect::<Vec<_>>(),
        second.columns.keys().collect::<Vec<_>>()
    );
    assert_eq!(
        first.joins.keys().collect::<Vec<_>>(),
        second.joins.keys().collect::<Vec<_>>()
    );
}

#[test]
fn generated_key_strategies_resolve() {
    let user_meta = EntityMetadata::resolve(User::MODEL).unwrap();
    let ticket_meta = EntityMetadata::resolve(Ticket::MODEL).unwrap();

    assert_eq!(user_meta.generated_keys.len(), 1);
    assert_eq!(user_meta.generated_keys[0].strategy, KeyStrategy::Identity);
    assert_eq!(ticket_meta.generated_keys[0].strategy, KeyStrategy::Uuid);
}

#[test]
fn count_projection_prefers_the_primary_key() {
    let meta = EntityMetadata::resolve(User::MODEL).unwrap();

    assert_eq!(meta.count_projection(), "count(id)");
}

static NO_TABLE: EntityModel = EntityModel {
    path: "fixtures::NoTable",
    entity_name: "NoTable",
    table: "",
    fields: &[],
};

#[test]
fn empty_table_name_is_a_schema_error() {
    let err = EntityMetadata::resolve(&NO_TABLE).unwrap_err();

    assert!(matches!(err, SchemaError::MissingTable { .. }));
}

static NO_KEY: EntityModel = EntityModel {
    path: "fixtures::NoKey",
    entity_name: "NoKey",
    table: "audit_log",
    fields: &[FieldModel::column(
        "line",
        ColumnModel::new("line", ColumnKind::Text),
    )],
};

#[test]
fn keyless_entities_resolve_but_refuse_key_operations() {
    let meta = EntityMetadata::resolve(&NO_KEY).unwrap();

    assert!(matches!(
        meta.require_primary_keys().unwrap_err(),
        SchemaError::NoPrimaryKey { .. }
    ));
    assert_eq!(meta.count_projection(), "count(*)");
}

static DUPLICATE: EntityModel = EntityModel {
    path: "fixtures::Duplicate",
    entity_name: "Duplicate",
    table: "dup",
    fields: &[
        FieldModel::column("a", ColumnModel::new("x", ColumnKind::Int)),
        FieldModel::column("b", ColumnModel::new("x", ColumnKind::Int)),
    ],
};

#[test]
fn duplicate_columns_are_a_schema_error() {
    let err = EntityMetadata::resolve(&DUPLICATE).unwrap_err();

    assert!(matches!(err, SchemaError::DuplicateColumn { column: "x", .. }));
}

static DANGLING_JOIN: EntityModel = EntityModel {
    path: "fixtures::DanglingJoin",
    entity_name: "DanglingJoin",
    table: "dangling",
    fields: &[
        FieldModel::column(
            "id",
            ColumnModel::new("id", ColumnKind::Int).primary_key(),
        ),
        FieldModel::join(
            "role",
            JoinModel {
                column: "missing_fk",
                target: <Role as Entity>::model,
            },
        ),
    ],
};

#[test]
fn joins_must_own_a_mapped_column() {
    let err = EntityMetadata::resolve(&DANGLING_JOIN).unwrap_err();

    assert!(matches!(err, SchemaError::InvalidJoin { column: "missing_fk", .. }));
}

static BAD_STRATEGY: EntityModel = EntityModel {
    path: "fixtures::BadStrategy",
    entity_name: "BadStrategy",
    table: "bad",
    fields: &[FieldModel::column(
        "id",
        ColumnModel::new("id", ColumnKind::Int).primary_key().auto_uuid(),
    )],
};

#[test]
fn uuid_strategy_requires_a_text_column() {
    let err = EntityMetadata::resolve(&BAD_STRATEGY).unwrap_err();

    assert!(matches!(err, SchemaError::InvalidKeyStrategy { .. }));
}
