use serde::{Deserialize, Serialize};

use crate::value::Value;

///
/// Comparator
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Comparator {
    Eq,
    Ne,
    Like,
    NotLike,
    Lt,
    Gt,
    Lte,
    Gte,
    In,
    NotIn,
}

impl Comparator {
    /// Operator token. A null right-hand side under `Eq`/`Ne` switches to
    /// the `is` form.
    #[must_use]
    pub(crate) const fn sql(self, null_rhs: bool) -> &'static str {
        match (self, null_rhs) {
            (Self::Eq, true) => "is",
            (Self::Ne, true) => "is not",
            (Self::Eq, false) => "=",
            (Self::Ne, false) => "!=",
            (Self::Like, _) => "like",
            (Self::NotLike, _) => "not like",
            (Self::Lt, _) => "<",
            (Self::Gt, _) => ">",
            (Self::Lte, _) => "<=",
            (Self::Gte, _) => ">=",
            (Self::In, _) => "in",
            (Self::NotIn, _) => "not in",
        }
    }
}

///
/// Logic
/// Connective joining a clause to the one before it.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Logic {
    #[default]
    And,
    Or,
}

impl Logic {
    #[must_use]
    pub(crate) const fn sql(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

///
/// Predicate
/// A single field/comparator/value condition.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Predicate {
    pub field: String,
    pub op: Comparator,
    pub value: Value,
    pub logic: Logic,
}

impl Predicate {
    #[must_use]
    pub fn new(field: impl Into<String>, op: Comparator, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
            logic: Logic::And,
        }
    }

    #[must_use]
    pub const fn with_logic(mut self, logic: Logic) -> Self {
        self.logic = logic;
        self
    }

    #[must_use]
    pub const fn or(self) -> Self {
        self.with_logic(Logic::Or)
    }

    /// True iff the field is dotted and therefore reaches through a join.
    #[must_use]
    pub fn requires_join(&self) -> bool {
        self.field.contains('.')
    }
}

///
/// Factories
///

#[must_use]
pub fn equals(field: impl Into<String>, value: impl Into<Value>) -> Predicate {
    Predicate::new(field, Comparator::Eq, value)
}

#[must_use]
pub fn not_equals(field: impl Into<String>, value: impl Into<Value>) -> Predicate {
    Predicate::new(field, Comparator::Ne, value)
}

#[must_use]
pub fn like(field: impl Into<String>, value: impl Into<Value>) -> Predicate {
    Predicate::new(field, Comparator::Like, value)
}

#[must_use]
pub fn not_like(field: impl Into<String>, value: impl Into<Value>) -> Predicate {
    Predicate::new(field, Comparator::NotLike, value)
}

#[must_use]
pub fn less_than(field: impl Into<String>, value: impl Into<Value>) -> Predicate {
    Predicate::new(field, Comparator::Lt, value)
}

#[must_use]
pub fn greater_than(field: impl Into<String>, value: impl Into<Value>) -> Predicate {
    Predicate::new(field, Comparator::Gt, value)
}

#[must_use]
pub fn less_than_or_equals(field: impl Into<String>, value: impl Into<Value>) -> Predicate {
    Predicate::new(field, Comparator::Lte, value)
}

#[must_use]
pub fn greater_than_or_equals(field: impl Into<String>, value: impl Into<Value>) -> Predicate {
    Predicate::new(field, Comparator::Gte, value)
}

#[must_use]
pub fn in_list<V: Into<Value>>(
    field: impl Into<String>,
    values: impl IntoIterator<Item = V>,
) -> Predicate {
    Predicate::new(
        field,
        Comparator::In,
        Value::List(values.into_iter().map(Into::into).collect()),
    )
}

#[must_use]
pub fn not_in_list<V: Into<Value>>(
    field: impl Into<String>,
    values: impl IntoIterator<Item = V>,
) -> Predicate {
    Predicate::new(
        field,
        Comparator::NotIn,
        Value::List(values.into_iter().map(Into::into).collect()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_field_requires_join() {
        assert!(!equals("name", "ice").requires_join());
        assert!(equals("role.name", "admin").requires_join());
    }

    #[test]
    fn null_rhs_switches_to_is_form() {
        assert_eq!(Comparator::Eq.sql(true), "is");
        assert_eq!(Comparator::Ne.sql(true), "is not");
        assert_eq!(Comparator::Eq.sql(false), "=");
    }

    #[test]
    fn in_list_collects_values() {
        let p = in_list("age", [1i64, 2, 3]);

        assert_eq!(p.op, Comparator::In);
        assert_eq!(
            p.value,
            Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
    }

    #[test]
    fn default_logic_is_and() {
        assert_eq!(equals("a", 1).logic, Logic::And);
        assert_eq!(equals("a", 1).or().logic, Logic::Or);
    }
}
