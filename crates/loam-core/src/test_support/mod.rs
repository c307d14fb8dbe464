//! Shared test fixtures: a scripted connector and mapped entities.

pub mod entities;
pub mod scripted;

pub use entities::{Role, Ticket, User};
pub use scripted::ScriptedConnector;

use crate::{connector::Row, value::Value};

/// Build a row from column/value pairs.
pub fn row(pairs: &[(&str, Value)]) -> Row {
    pairs
        .iter()
        .map(|(column, value)| ((*column).to_string(), value.clone()))
        .collect()
}
