use crate::{model::entity::EntityModel, value::Value};

///
/// ColumnKind
///
/// Logical column type driving value coercion between wire scalars and
/// typed properties.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ColumnKind {
    Bool,
    Int,
    Float,
    Text,
    DateTime,
    Json,
}

///
/// KeyStrategy
///
/// Policy for producing a generated key value.
///
/// `Uuid`     → pre-generated by the connector before the insert statement.
/// `Identity` → assigned by the database, read back after execution.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyStrategy {
    Uuid,
    Identity,
}

///
/// AutoIncrement
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AutoIncrement {
    pub strategy: KeyStrategy,
    pub generator: Option<&'static str>,
}

///
/// DefaultValue
///
/// Typed default literal, restricted to shapes that are representable in
/// a const initializer.
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DefaultValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(&'static str),
}

impl DefaultValue {
    #[must_use]
    pub fn to_value(self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(b),
            Self::Int(i) => Value::Int(i),
            Self::Float(f) => Value::Float(f),
            Self::Text(s) => Value::Text(s.to_string()),
        }
    }
}

///
/// JoinModel
///
/// Descriptor for an entity-valued property backed by an owning column on
/// the master table. The target model is reached through a function
/// pointer so mutually-joined entities do not form a const cycle.
///

#[derive(Clone, Copy)]
pub struct JoinModel {
    /// Owning column on the master table holding the referenced key.
    pub column: &'static str,
    pub target: fn() -> &'static EntityModel,
}

impl std::fmt::Debug for JoinModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JoinModel")
            .field("column", &self.column)
            .field("target", &(self.target)().path)
            .finish()
    }
}

///
/// ColumnModel
///

#[derive(Clone, Copy, Debug)]
pub struct ColumnModel {
    pub column: &'static str,
    pub kind: ColumnKind,
    pub nullable: bool,
    pub insertable: bool,
    pub updatable: bool,
    pub primary_key: bool,
    pub not_null: bool,
    pub auto_increment: Option<AutoIncrement>,
    pub default: Option<DefaultValue>,
    /// Output pattern for datetime columns; engine default applies when unset.
    pub datetime_format: Option<&'static str>,
}

impl ColumnModel {
    #[must_use]
    pub const fn new(column: &'static str, kind: ColumnKind) -> Self {
        Self {
            column,
            kind,
            nullable: true,
            insertable: true,
            updatable: true,
            primary_key: false,
            not_null: false,
            auto_increment: None,
            default: None,
            datetime_format: None,
        }
    }

    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.not_null = true;
        self.nullable = false;
        self
    }

    #[must_use]
    pub const fn not_insertable(mut self) -> Self {
        self.insertable = false;
        self
    }

    #[must_use]
    pub const fn not_updatable(mut self) -> Self {
        self.updatable = false;
        self
    }

    #[must_use]
    pub const fn auto_uuid(mut self) -> Self {
        self.auto_increment = Some(AutoIncrement {
            strategy: KeyStrategy::Uuid,
            generator: None,
        });
        self
    }

    #[must_use]
    pub const fn auto_identity(mut self) -> Self {
        self.auto_increment = Some(AutoIncrement {
            strategy: KeyStrategy::Identity,
            generator: None,
        });
        self
    }

    #[must_use]
    pub const fn generator(mut self, name: &'static str) -> Self {
        self.auto_increment = match self.auto_increment {
            Some(auto) => Some(AutoIncrement {
                strategy: auto.strategy,
                generator: Some(name),
            }),
            None => None,
        };
        self
    }

    #[must_use]
    pub const fn default_value(mut self, value: DefaultValue) -> Self {
        self.default = Some(value);
        self
    }

    #[must_use]
    pub const fn datetime_format(mut self, pattern: &'static str) -> Self {
        self.datetime_format = Some(pattern);
        self
    }
}

///
/// FieldSpec
///

#[derive(Clone, Copy, Debug)]
pub enum FieldSpec {
    Column(ColumnModel),
    Join(JoinModel),
}

///
/// FieldModel
///
/// One declared property: either a mapped column or a joined entity
/// reference.
///

#[derive(Clone, Copy, Debug)]
pub struct FieldModel {
    pub name: &'static str,
    pub spec: FieldSpec,
}

impl FieldModel {
    #[must_use]
    pub const fn column(name: &'static str, model: ColumnModel) -> Self {
        Self {
            name,
            spec: FieldSpec::Column(model),
        }
    }

    #[must_use]
    pub const fn join(name: &'static str, model: JoinModel) -> Self {
        Self {
            name,
            spec: FieldSpec::Join(model),
        }
    }

    #[must_use]
    pub const fn as_column(&self) -> Option<&ColumnModel> {
        match &self.spec {
            FieldSpec::Column(c) => Some(c),
            FieldSpec::Join(_) => None,
        }
    }

    #[must_use]
    pub const fn as_join(&self) -> Option<&JoinModel> {
        match &self.spec {
            FieldSpec::Join(j) => Some(j),
            FieldSpec::Column(_) => None,
        }
    }
}
