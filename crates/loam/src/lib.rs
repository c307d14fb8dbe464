//! Loam: a declarative object-relational persistence layer.
//!
//! ## Crate layout
//! - `loam-core`: runtime. Entity models, the query model, SQL assembly,
//!   and the persistence engine over pluggable connectors.
//! - `loam-derive`: the `#[derive(Entity)]` macro emitting static entity
//!   models and property access glue.
//!
//! This crate re-exports both so a single dependency is enough.

pub use loam_core::*;
pub use loam_derive::Entity;

/// Workspace version re-export for downstream tooling and tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
/// Domain vocabulary plus the derive macro.
///

pub mod prelude {
    pub use loam_core::prelude::*;
    pub use loam_derive::Entity;
}
