use thiserror::Error as ThisError;

use crate::{coerce::CoerceError, connector::ConnectorError, metadata::SchemaError};

///
/// FilterError
/// Empty or unusable WHERE construction.
///

#[derive(Debug, ThisError)]
pub enum FilterError {
    #[error("refusing to run with an empty WHERE clause")]
    EmptyWhere,

    #[error("primary key `{field}` has no usable value")]
    MissingPrimaryKeyValue { field: String },

    #[error("expected {expected} primary key value(s), got {got}")]
    KeyArityMismatch { expected: usize, got: usize },
}

///
/// ColumnMatchError
/// A field in an explicit field-list query matched no declared column.
///

#[derive(Debug, ThisError)]
#[error("field `{field}` does not match a column on `{entity}`")]
pub struct ColumnMatchError {
    pub entity: &'static str,
    pub field: String,
}

///
/// InsertableColumnError
///

#[derive(Debug, ThisError)]
#[error("no insertable column carries a value for `{table}`")]
pub struct InsertableColumnError {
    pub table: &'static str,
}

///
/// UpdatableColumnError
///

#[derive(Debug, ThisError)]
#[error("no updatable column carries a value for `{table}`")]
pub struct UpdatableColumnError {
    pub table: &'static str,
}

///
/// EmptyResultError
/// A single-row read matched nothing.
///

#[derive(Debug, ThisError)]
#[error("no row matched on `{table}`")]
pub struct EmptyResultError {
    pub table: &'static str,
}

///
/// Error
///
/// Top-level error surface. Schema and filter errors fail fast and are
/// never retried; connector errors are propagated verbatim.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    ColumnMatch(#[from] ColumnMatchError),

    #[error(transparent)]
    InsertableColumn(#[from] InsertableColumnError),

    #[error(transparent)]
    UpdatableColumn(#[from] UpdatableColumnError),

    #[error(transparent)]
    EmptyResult(#[from] EmptyResultError),

    #[error(transparent)]
    Coerce(#[from] CoerceError),

    #[error(transparent)]
    Connector(#[from] ConnectorError),
}
