//! Fixture entities.
//!
//! `User` and `Role` implement the entity contract by hand, spelling out
//! exactly what the derive macro emits; `Ticket` goes through the real
//! derive.

use chrono::NaiveDateTime;

use crate::{
    coerce::{CoerceError, FromValue},
    connector::Connector,
    engine::{Engine, SessionContext},
    error::Error,
    model::{ColumnKind, ColumnModel, DefaultValue, EntityModel, FieldModel, JoinModel},
    traits::Entity,
    value::Value,
};

///
/// Role
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Role {
    pub id: Option<i64>,
    pub name: Option<String>,
}

impl Entity for Role {
    const MODEL: &'static EntityModel = &EntityModel {
        path: "loam::test_support::Role",
        entity_name: "Role",
        table: "roles",
        fields: &[
            FieldModel::column(
                "id",
                ColumnModel::new("id", ColumnKind::Int)
                    .primary_key()
                    .not_null()
                    .auto_identity(),
            ),
            FieldModel::column("name", ColumnModel::new("name", ColumnKind::Text)),
        ],
    };

    fn get(&self, field: &str) -> Option<Value> {
        match field {
            "id" => self.id.map(Value::Int),
            "name" => self.name.clone().map(Value::Text),
            _ => None,
        }
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), CoerceError> {
        match field {
            "id" => self.id = FromValue::from_value(value)?,
            "name" => self.name = FromValue::from_value(value)?,
            _ => {
                return Err(CoerceError::UnknownField {
                    field: field.to_string(),
                });
            }
        }

        Ok(())
    }
}

///
/// User
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct User {
    pub id: Option<i64>,
    pub status: Option<String>,
    pub age: Option<i64>,
    pub email: Option<String>,
    pub active: Option<bool>,
    pub created_at: Option<NaiveDateTime>,
    pub role_id: Option<i64>,
    pub role: Option<Role>,
}

impl Entity for User {
    const MODEL: &'static EntityModel = &EntityModel {
        path: "loam::test_support::User",
        entity_name: "User",
        table: "users",
        fields: &[
            FieldModel::column(
                "id",
                ColumnModel::new("id", ColumnKind::Int)
                    .primary_key()
                    .not_null()
                    .auto_identity(),
            ),
            FieldModel::column("status", ColumnModel::new("user_status", ColumnKind::Text)),
            FieldModel::column("age", ColumnModel::new("user_age", ColumnKind::Int)),
            FieldModel::column("email", ColumnModel::new("email", ColumnKind::Text)),
            FieldModel::column(
                "active",
                ColumnModel::new("active", ColumnKind::Bool)
                    .default_value(DefaultValue::Bool(true)),
            ),
            FieldModel::column(
                "created_at",
                ColumnModel::new("created_at", ColumnKind::DateTime).not_updatable(),
            ),
            FieldModel::column("role_id", ColumnModel::new("role_id", ColumnKind::Int)),
            FieldModel::join(
                "role",
                JoinModel {
                    column: "role_id",
                    target: <Role as Entity>::model,
                },
            ),
        ],
    };

    fn get(&self, field: &str) -> Option<Value> {
        match field {
            "id" => self.id.map(Value::Int),
            "status" => self.status.clone().map(Value::Text),
            "age" => self.age.map(Value::Int),
            "email" => self.email.clone().map(Value::Text),
            "active" => self.active.map(Value::Bool),
            "created_at" => self.created_at.map(Value::DateTime),
            "role_id" => self.role_id.map(Value::Int),
            _ => None,
        }
    }

    fn set(&mut self, field: &str, value: Value) -> Result<(), CoerceError> {
        match field {
            "id" => self.id = FromValue::from_value(value)?,
            "status" => self.status = FromValue::from_value(value)?,
            "age" => self.age = FromValue::from_value(value)?,
            "email" => self.email = FromValue::from_value(value)?,
            "active" => self.active = FromValue::from_value(value)?,
            "created_at" => self.created_at = FromValue::from_value(value)?,
            "role_id" => self.role_id = FromValue::from_value(value)?,
            _ => {
                return Err(CoerceError::UnknownField {
                    field: field.to_string(),
                });
            }
        }

        Ok(())
    }

    fn hydrate_joins<C: Connector>(
        &mut self,
        engine: &Engine<C>,
        ctx: &mut SessionContext,
    ) -> Result<(), Error> {
        let key = Value::from(self.role_id);

        self.role = engine.resolve_join::<Role>(ctx, &key)?;

        Ok(())
    }
}

///
/// Ticket
/// Declared through the derive macro.
///

#[derive(Clone, Debug, Default, loam_derive::Entity)]
#[loam(table = "tickets")]
pub struct Ticket {
    #[loam(column = "id", kind = "text", primary_key, not_null, autoincrement = "uuid")]
    pub id: Option<String>,

    #[loam(column = "subject")]
    pub subject: Option<String>,

    #[loam(column = "opened_by", kind = "int")]
    pub opened_by: Option<i64>,

    #[loam(column = "opened_at", kind = "datetime", updatable = false)]
    pub opened_at: Option<NaiveDateTime>,
}
