use super::*;
use crate::{
    join::JoinScope,
    metadata::EntityMetadata,
    query::predicate::{equals, greater_than, in_list, not_equals},
    test_support::User,
    traits::Entity,
};

fn render(spec: &Specification) -> String {
    let meta = EntityMetadata::resolve(User::MODEL).unwrap();
    let mut scope = JoinScope::new();
    let mut fields = FieldResolver::new(&meta, &mut scope);

    spec.render(&mut fields, Dialect::MySql).unwrap()
}

#[test]
fn and_chain_maps_columns_and_strips_the_leading_connective() {
    let mut spec = Specification::new();

    spec.add(equals("status", "A")).add(greater_than("age", 18));

    assert_eq!(render(&spec), "user_status = 'A' and user_age > 18");
}

#[test]
fn leading_or_is_also_stripped() {
    let mut spec = Specification::new();

    spec.add_or(equals("status", "A")).add_or(equals("status", "B"));

    assert_eq!(render(&spec), "user_status = 'A' or user_status = 'B'");
}

#[test]
fn null_comparisons_use_the_is_form() {
    let mut spec = Specification::new();

    spec.add(equals("email", Value::Null))
        .add(not_equals("status", Value::Null));

    assert_eq!(render(&spec), "email is null and user_status is not null");
}

#[test]
fn nested_groups_are_parenthesized() {
    let mut inner = Specification::new();

    inner.add(equals("age", 1)).add_or(equals("age", 2));

    let mut spec = Specification::new();

    spec.add(equals("status", "A")).add_and(inner);

    assert_eq!(
        render(&spec),
        "user_status = 'A' and (user_age = 1 or user_age = 2)"
    );
}

#[test]
fn empty_groups_are_skipped() {
    let mut spec = Specification::new();

    spec.add(Specification::new()).add(equals("status", "A"));

    assert_eq!(render(&spec), "user_status = 'A'");
}

#[test]
fn in_lists_render_parenthesized_values() {
    let mut spec = Specification::new();

    spec.add(in_list("status", ["A", "B"]));

    assert_eq!(render(&spec), "user_status in ('A', 'B')");
}

#[test]
fn unknown_fields_pass_through_literally() {
    let mut spec = Specification::new();

    spec.add(equals("legacy_col", 5));

    assert_eq!(render(&spec), "legacy_col = 5");
}

#[test]
fn dotted_fields_resolve_through_a_single_join_alias() {
    let meta = EntityMetadata::resolve(User::MODEL).unwrap();
    let mut scope = JoinScope::new();
    let mut fields = FieldResolver::new(&meta, &mut scope);
    let mut spec = Specification::new();

    spec.add(equals("role.name", "admin"))
        .add_or(equals("role.name", "editor"));

    let rendered = spec.render(&mut fields, Dialect::MySql).unwrap();

    assert_eq!(
        rendered,
        "roles__jn__1.name = 'admin' or roles__jn__1.name = 'editor'"
    );
    assert_eq!(scope.len(), 1);
}

#[test]
fn requires_join_flips_on_any_dotted_member() {
    let mut flat = Specification::new();

    flat.add(equals("status", "A"));
    assert!(!flat.requires_join());

    flat.add(equals("role.name", "admin"));
    assert!(flat.requires_join());
}

#[test]
fn nested_join_flag_propagates_upward() {
    let mut inner = Specification::new();

    inner.add(equals("role.name", "admin"));

    let mut outer = Specification::new();

    outer.add(equals("status", "A")).add_and(inner);

    assert!(outer.requires_join());
}

#[test]
fn long_clause_lists_wrap_onto_continuation_lines() {
    let mut spec = Specification::new();

    for i in 0..12 {
        spec.add(equals("email", format!("someone.with.a.long.address{i}@example.com")));
    }

    let rendered = render(&spec);

    assert!(rendered.contains("\n    "));
    // wrapping never breaks inside a clause
    assert!(rendered.lines().all(|line| !line.trim_start().starts_with('=')));
}
