//! Conversion between raw column values and typed entity properties.
//!
//! `from_column` repairs what the wire gives back (stringly timestamps,
//! 0/1 booleans, zero-date sentinels); `to_column` prepares a property
//! value for statement rendering. Both are lossy by design: a value that
//! cannot be repaired degrades to `Null` rather than failing the row.

use chrono::{NaiveDate, NaiveDateTime};
use num_traits::NumCast;
use thiserror::Error as ThisError;

use crate::{
    metadata::ColumnMeta,
    model::ColumnKind,
    value::Value,
};

/// Default output pattern for datetime columns.
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp strings are parsed on at most this many leading characters;
/// fractional seconds and timezone suffixes are discarded.
const DATETIME_PARSE_LEN: usize = 19;

/// All-zero date sentinel some servers return instead of NULL.
const ZERO_DATE_PREFIX: &str = "0000-00-00";

///
/// CoerceError
///
/// Raised by typed property access when a wire value cannot inhabit the
/// declared property type.
///

#[derive(Debug, ThisError)]
pub enum CoerceError {
    #[error("unknown property `{field}`")]
    UnknownField { field: String },

    #[error("value of type {got} cannot inhabit a {want} property")]
    Incompatible {
        want: &'static str,
        got: &'static str,
    },
}

/// Repair a raw column value into the declared logical kind.
///
/// `Null` always stays `Null`; unknown shapes pass through unchanged.
#[must_use]
pub fn from_column(value: Value, kind: ColumnKind) -> Value {
    if value.is_null() {
        return Value::Null;
    }

    match kind {
        ColumnKind::DateTime => from_datetime(value),
        ColumnKind::Bool => from_bool(&value),
        ColumnKind::Int => from_int(value),
        ColumnKind::Float => from_float(value),
        ColumnKind::Text => from_text(value),
        ColumnKind::Json => value,
    }
}

/// Prepare a property value for statement rendering against its column.
///
/// Datetime values are serialized with the column's pattern; everything
/// else passes through and is escaped downstream.
#[must_use]
pub fn to_column(value: &Value, meta: &ColumnMeta) -> Value {
    match value {
        Value::DateTime(dt) => {
            let pattern = meta.datetime_format.unwrap_or(DEFAULT_DATETIME_FORMAT);

            Value::Text(dt.format(pattern).to_string())
        }
        other => other.clone(),
    }
}

fn from_datetime(value: Value) -> Value {
    match value {
        Value::DateTime(_) => value,
        Value::Text(s) => {
            if s.starts_with(ZERO_DATE_PREFIX) {
                return Value::Null;
            }

            let head: String = s.chars().take(DATETIME_PARSE_LEN).collect();

            if let Ok(dt) = NaiveDateTime::parse_from_str(&head, DEFAULT_DATETIME_FORMAT) {
                return Value::DateTime(dt);
            }

            // date-only columns come back without a time component
            NaiveDate::parse_from_str(&head, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map_or(Value::Null, Value::DateTime)
        }
        _ => Value::Null,
    }
}

fn from_bool(value: &Value) -> Value {
    let truthy = match value {
        Value::Bool(b) => *b,
        Value::Int(i) => *i == 1,
        Value::Text(s) => s == "1",
        _ => false,
    };

    Value::Bool(truthy)
}

fn from_int(value: Value) -> Value {
    match value {
        Value::Int(_) => value,
        Value::Float(f) => <i64 as NumCast>::from(f).map_or(Value::Null, Value::Int),
        Value::Bool(b) => Value::Int(<i64 as From<bool>>::from(b)),
        Value::Text(s) => s.trim().parse::<i64>().map_or(Value::Null, Value::Int),
        _ => Value::Null,
    }
}

fn from_float(value: Value) -> Value {
    match value {
        Value::Float(_) => value,
        Value::Int(i) => <f64 as NumCast>::from(i).map_or(Value::Null, Value::Float),
        Value::Text(s) => s.trim().parse::<f64>().map_or(Value::Null, Value::Float),
        _ => Value::Null,
    }
}

fn from_text(value: Value) -> Value {
    match value {
        Value::Text(_) => value,
        Value::Int(i) => Value::Text(i.to_string()),
        Value::Float(f) => Value::Text(f.to_string()),
        Value::Bool(b) => Value::Text(if b { "1" } else { "0" }.to_string()),
        Value::DateTime(dt) => Value::Text(dt.format(DEFAULT_DATETIME_FORMAT).to_string()),
        _ => value,
    }
}

///
/// FromValue / IntoValue
///
/// Typed property conversions used by the generated entity glue.
///

pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, CoerceError>;
}

pub trait IntoValue {
    fn into_value(self) -> Value;
}

impl FromValue for i64 {
    fn from_value(value: Value) -> Result<Self, CoerceError> {
        match from_int(value) {
            Value::Int(i) => Ok(i),
            other => Err(incompatible("int", &other)),
        }
    }
}

macro_rules! impl_narrow_int_from_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: Value) -> Result<Self, CoerceError> {
                    let wide = i64::from_value(value)?;

                    Self::try_from(wide).map_err(|_| CoerceError::Incompatible {
                        want: "narrow int",
                        got: "int",
                    })
                }
            }
        )*
    };
}

impl_narrow_int_from_value!(i8, i16, i32, u8, u16, u32);

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self, CoerceError> {
        match from_float(value) {
            Value::Float(f) => Ok(f),
            other => Err(incompatible("float", &other)),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, CoerceError> {
        match from_bool(&value) {
            Value::Bool(b) => Ok(b),
            other => Err(incompatible("bool", &other)),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, CoerceError> {
        match from_text(value) {
            Value::Text(s) => Ok(s),
            other => Err(incompatible("text", &other)),
        }
    }
}

impl FromValue for NaiveDateTime {
    fn from_value(value: Value) -> Result<Self, CoerceError> {
        match from_datetime(value) {
            Value::DateTime(dt) => Ok(dt),
            other => Err(incompatible("datetime", &other)),
        }
    }
}

impl FromValue for serde_json::Value {
    fn from_value(value: Value) -> Result<Self, CoerceError> {
        match value {
            Value::Json(j) => Ok(j),
            Value::Text(s) => serde_json::from_str(&s).map_err(|_| CoerceError::Incompatible {
                want: "json",
                got: "text",
            }),
            other => Err(incompatible("json", &other)),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, CoerceError> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

impl<T: Into<Value>> IntoValue for T {
    fn into_value(self) -> Value {
        self.into()
    }
}

fn incompatible(want: &'static str, got: &Value) -> CoerceError {
    CoerceError::Incompatible {
        want,
        got: got.type_name(),
    }
}

#[cfg(test)]
mod tests;
