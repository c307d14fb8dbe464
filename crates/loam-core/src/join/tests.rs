use super::*;
use crate::{
    error::Error,
    metadata::EntityMetadata,
    query::{Criteria, Direction, Page, Pageable, Sortable, Specification, equals},
    test_support::User,
    traits::Entity,
};

fn meta() -> EntityMetadata {
    EntityMetadata::resolve(User::MODEL).unwrap()
}

#[test]
fn aliases_are_deterministic_and_shared_per_table() {
    let meta = meta();
    let mut scope = JoinScope::new();

    let first = scope.alias_for(&meta, "role").unwrap();
    let second = scope.alias_for(&meta, "role").unwrap();

    assert_eq!(first, "roles__jn__1");
    assert_eq!(second, "roles__jn__1");
    assert_eq!(scope.len(), 1);
}

#[test]
fn join_clauses_pair_target_key_with_owning_column() {
    let meta = meta();
    let mut scope = JoinScope::new();

    scope.alias_for(&meta, "role").unwrap();

    assert_eq!(
        scope.render_clauses("users"),
        vec!["LEFT JOIN roles roles__jn__1 ON roles__jn__1.id = users.role_id"]
    );
}

#[test]
fn unknown_join_property_is_a_column_match_error() {
    let meta = meta();
    let mut scope = JoinScope::new();
    let err = scope.alias_for(&meta, "owner").unwrap_err();

    assert!(matches!(err, Error::ColumnMatch(_)));
}

#[test]
fn resolver_maps_declared_and_dotted_fields() {
    let meta = meta();
    let mut scope = JoinScope::new();
    let mut fields = FieldResolver::new(&meta, &mut scope);

    assert_eq!(fields.resolve("status").unwrap(), "user_status");
    assert_eq!(fields.resolve("role.name").unwrap(), "roles__jn__1.name");
    // a bare join property maps to its owning column
    assert_eq!(fields.resolve("role").unwrap(), "role_id");
    // lenient mode passes unknown fields through
    assert_eq!(fields.resolve("legacy_col").unwrap(), "legacy_col");
}

#[test]
fn dotted_fields_fall_back_to_the_literal_target_column() {
    let meta = meta();
    let mut scope = JoinScope::new();
    let mut fields = FieldResolver::new(&meta, &mut scope);

    // `rank` is not declared on Role; the segment passes through
    assert_eq!(fields.resolve("role.rank").unwrap(), "roles__jn__1.rank");
}

#[test]
fn strict_resolver_rejects_unknown_fields() {
    let meta = meta();
    let mut scope = JoinScope::new();
    let mut fields = FieldResolver::strict(&meta, &mut scope);

    assert!(matches!(
        fields.resolve("legacy_col").unwrap_err(),
        Error::ColumnMatch(_)
    ));
    // order-by resolution stays lenient in strict mode
    assert_eq!(fields.resolve_lenient("legacy_col").unwrap(), "legacy_col");
}

#[test]
fn dotted_fields_require_a_declared_join_in_both_modes() {
    let meta = meta();
    let mut scope = JoinScope::new();
    let mut fields = FieldResolver::new(&meta, &mut scope);

    assert!(matches!(
        fields.resolve("owner.name").unwrap_err(),
        Error::ColumnMatch(_)
    ));
}

#[test]
fn requires_join_considers_filter_and_sort() {
    let flat = Criteria::from(vec![equals("status", "A")]);
    let dotted = Criteria::from(vec![equals("role.name", "admin")]);
    let sorted = Pageable::new(Page::new(1, 10))
        .with_sortable(Sortable::by("role.name", Direction::Asc));

    assert!(!requires_join(&flat, None));
    assert!(requires_join(&dotted, None));
    assert!(requires_join(&flat, Some(&sorted)));
    assert!(!requires_join(
        &Criteria::Spec(Specification::new()),
        Some(&Pageable::new(Page::new(1, 10)))
    ));
}
