//! Static, macro-generated entity descriptors.
//!
//! These are the declarative metadata surface: one `EntityModel` per
//! entity type, emitted by `#[derive(Entity)]` and resolved into runtime
//! lookup maps by the metadata module.

pub mod entity;
pub mod field;

pub use entity::EntityModel;
pub use field::{
    AutoIncrement, ColumnKind, ColumnModel, DefaultValue, FieldModel, FieldSpec, JoinModel,
    KeyStrategy,
};
