//! Core runtime for Loam: static entity models, the filter/sort/paging
//! query model, dialect-aware SQL assembly, and the persistence engine
//! over pluggable database connectors.

// derive output refers to `loam::`; alias ourselves so in-crate fixtures
// and tests can use the macros without the facade crate
extern crate self as loam;

pub mod coerce;
pub mod connector;
pub mod engine;
pub mod error;
pub mod join;
pub mod metadata;
pub mod model;
pub mod query;
pub mod response;
pub mod sql;
pub mod traits;
pub mod value;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::Error;

///
/// CONSTANTS
///

/// Column budget used when wrapping long WHERE fragments onto
/// continuation lines.
pub const WHERE_WRAP_COLUMN: usize = 120;

///
/// Prelude
///
/// Domain vocabulary only. Builders, connectors, and error types are
/// imported from their modules explicitly.
///

pub mod prelude {
    pub use crate::{
        engine::{ChangeSet, Engine, EngineConfig, SaveOutcome, SessionContext},
        query::{Criteria, Page, Pageable, Predicate, Sort, Sortable, Specification},
        response::PageResult,
        sql::Dialect,
        traits::Entity,
        value::Value,
    };
}
