use super::*;
use crate::metadata::ColumnMeta;
use chrono::NaiveDate;

fn dt(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, mi, s))
        .unwrap()
}

#[test]
fn datetime_parse_truncates_to_nineteen_chars() {
    let parsed = from_column(
        Value::Text("2024-03-01 12:30:45.123456".into()),
        ColumnKind::DateTime,
    );

    assert_eq!(parsed, Value::DateTime(dt(2024, 3, 1, 12, 30, 45)));
}

#[test]
fn zero_date_sentinel_becomes_null() {
    let parsed = from_column(Value::Text("0000-00-00 00:00:00".into()), ColumnKind::DateTime);

    assert!(parsed.is_null());
}

#[test]
fn date_only_strings_get_midnight() {
    let parsed = from_column(Value::Text("2024-03-01".into()), ColumnKind::DateTime);

    assert_eq!(parsed, Value::DateTime(dt(2024, 3, 1, 0, 0, 0)));
}

#[test]
fn unparseable_datetime_degrades_to_null() {
    assert!(from_column(Value::Text("soon".into()), ColumnKind::DateTime).is_null());
}

#[test]
fn bool_is_true_only_for_one() {
    assert_eq!(from_column(Value::Int(1), ColumnKind::Bool), Value::Bool(true));
    assert_eq!(
        from_column(Value::Text("1".into()), ColumnKind::Bool),
        Value::Bool(true)
    );
    assert_eq!(from_column(Value::Int(2), ColumnKind::Bool), Value::Bool(false));
    assert_eq!(
        from_column(Value::Text("true".into()), ColumnKind::Bool),
        Value::Bool(false)
    );
}

#[test]
fn numeric_casts_keep_null() {
    assert!(from_column(Value::Null, ColumnKind::Int).is_null());
    assert_eq!(from_column(Value::Text("42".into()), ColumnKind::Int), Value::Int(42));
    assert_eq!(
        from_column(Value::Text("2.5".into()), ColumnKind::Float),
        Value::Float(2.5)
    );
    assert_eq!(from_column(Value::Float(7.0), ColumnKind::Int), Value::Int(7));
}

#[test]
fn to_column_applies_column_pattern() {
    let meta = ColumnMeta {
        column: "created_at",
        kind: ColumnKind::DateTime,
        nullable: true,
        insertable: true,
        updatable: true,
        datetime_format: Some("%Y%m%d"),
    };
    let out = to_column(&Value::DateTime(dt(2024, 3, 1, 12, 0, 0)), &meta);

    assert_eq!(out, Value::Text("20240301".into()));
}

#[test]
fn to_column_default_pattern() {
    let meta = ColumnMeta {
        column: "created_at",
        kind: ColumnKind::DateTime,
        nullable: true,
        insertable: true,
        updatable: true,
        datetime_format: None,
    };
    let out = to_column(&Value::DateTime(dt(2024, 3, 1, 12, 30, 45)), &meta);

    assert_eq!(out, Value::Text("2024-03-01 12:30:45".into()));
}

#[test]
fn option_from_value_maps_null_to_none() {
    let none: Option<i64> = FromValue::from_value(Value::Null).unwrap();
    let some: Option<i64> = FromValue::from_value(Value::Int(3)).unwrap();

    assert_eq!(none, None);
    assert_eq!(some, Some(3));
}
