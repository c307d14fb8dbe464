//! Derive macros for Loam entities.
//!
//! `#[derive(Entity)]` turns a struct with `#[loam(...)]` attributes into
//! a mapped entity: it emits the static entity model, the property
//! access glue, and join hydration.

use proc_macro::TokenStream;

mod emit;
mod node;

///
/// Entity
///
/// ```ignore
/// #[derive(Clone, Debug, Default, Entity)]
/// #[loam(table = "users")]
/// struct User {
///     #[loam(column = "id", kind = "int", primary_key, autoincrement = "identity")]
///     id: Option<i64>,
///
///     #[loam(column = "user_status")]
///     status: Option<String>,
///
///     #[loam(column = "role_id", kind = "int")]
///     role_id: Option<i64>,
///
///     #[loam(join(target = Role, column = "role_id"))]
///     role: Option<Role>,
/// }
/// ```
///
#[proc_macro_derive(Entity, attributes(loam))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);

    match node::EntityNode::parse(&input) {
        Ok(node) => emit::entity(&node).into(),
        Err(err) => err.write_errors().into(),
    }
}
