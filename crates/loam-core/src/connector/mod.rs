//! External database connector contract.
//!
//! The engine is deliberately narrow at this seam: connection state,
//! statement execution, generated-id support, and transaction primitives.
//! Transaction boundaries are always explicit caller-side calls; the
//! engine itself never begins or commits one.

use derive_more::{Deref, IntoIterator};
use thiserror::Error as ThisError;
use ulid::Ulid;

use crate::{sql::Dialect, value::Value};

///
/// ConnectorError
/// Propagated verbatim through the engine.
///

#[derive(Debug, ThisError)]
pub enum ConnectorError {
    #[error("connector is not connected")]
    NotConnected,

    #[error("connection failed: {message}")]
    Connection { message: String },

    #[error("statement failed: {message}")]
    Execution { message: String },
}

///
/// MutationKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MutationKind {
    Insert,
    Update,
    Delete,
}

impl std::fmt::Display for MutationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
        })
    }
}

/// Caller-supplied observer invoked by connectors for every mutation
/// statement, with the SQL text and the operation kind.
pub type MutationHook = Box<dyn Fn(&str, MutationKind) + Send + Sync>;

///
/// Row
/// Ordered column → value payload returned by a query.
///

#[derive(Clone, Debug, Default, Deref, IntoIterator, PartialEq)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    #[must_use]
    pub const fn new() -> Self {
        Self { columns: Vec::new() }
    }

    pub fn push(&mut self, column: impl Into<String>, value: Value) {
        self.columns.push((column.into(), value));
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

///
/// Connector
///
/// Synchronous statement execution against one database. Errors surface
/// synchronously; nothing is retried at this layer.
///

pub trait Connector {
    fn connect(&mut self) -> Result<bool, ConnectorError>;

    fn is_connected(&self) -> bool;

    fn execute_query(&self, sql: &str) -> Result<Vec<Row>, ConnectorError>;

    /// Execute an INSERT, reporting affected rows. Implementations must
    /// invoke the mutation hook with the SQL and `MutationKind::Insert`.
    fn execute_insert(&self, sql: &str) -> Result<u64, ConnectorError>;

    fn execute_update(&self, sql: &str) -> Result<u64, ConnectorError>;

    fn execute_delete(&self, sql: &str) -> Result<u64, ConnectorError>;

    fn set_mutation_hook(&mut self, hook: Option<MutationHook>);

    /// Identity value assigned by the most recent insert.
    fn last_insert_id(&self) -> Result<Value, ConnectorError>;

    /// Fresh pre-generated key: time-based prefix plus random suffix.
    /// Collision-resistant, not cryptographically unique.
    fn generate_new_id(&self) -> String {
        Ulid::new().to_string()
    }

    fn database_type(&self) -> Dialect;

    fn begin_transaction(&self) -> Result<(), ConnectorError>;

    fn commit(&self) -> Result<(), ConnectorError>;

    fn rollback(&self) -> Result<(), ConnectorError>;
}
