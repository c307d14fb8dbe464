//! Darling nodes for the `#[loam(...)]` attribute surface.

use darling::{Error as DarlingError, FromDeriveInput, FromField, FromMeta, ast::Data};
use syn::{DeriveInput, Ident, Path, Type};

///
/// ColumnKindArg
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ColumnKindArg {
    Bool,
    Int,
    Float,
    Text,
    DateTime,
    Json,
}

impl FromMeta for ColumnKindArg {
    fn from_string(value: &str) -> Result<Self, DarlingError> {
        match value {
            "bool" => Ok(Self::Bool),
            "int" => Ok(Self::Int),
            "float" => Ok(Self::Float),
            "text" => Ok(Self::Text),
            "datetime" => Ok(Self::DateTime),
            "json" => Ok(Self::Json),
            other => Err(DarlingError::unknown_value(other)),
        }
    }
}

///
/// StrategyArg
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StrategyArg {
    Uuid,
    Identity,
}

impl FromMeta for StrategyArg {
    fn from_string(value: &str) -> Result<Self, DarlingError> {
        match value {
            "uuid" => Ok(Self::Uuid),
            "identity" => Ok(Self::Identity),
            other => Err(DarlingError::unknown_value(other)),
        }
    }
}

///
/// JoinArg
///

#[derive(Clone, Debug, FromMeta)]
pub struct JoinArg {
    pub target: Path,
    pub column: String,
}

///
/// FieldArgs
///

#[derive(Clone, Debug, FromField)]
#[darling(attributes(loam))]
pub struct FieldArgs {
    pub ident: Option<Ident>,
    pub ty: Type,

    #[darling(default)]
    pub column: Option<String>,

    #[darling(default)]
    pub kind: Option<ColumnKindArg>,

    #[darling(default)]
    pub nullable: Option<bool>,

    #[darling(default)]
    pub insertable: Option<bool>,

    #[darling(default)]
    pub updatable: Option<bool>,

    #[darling(default)]
    pub primary_key: bool,

    #[darling(default)]
    pub not_null: bool,

    #[darling(default)]
    pub autoincrement: Option<StrategyArg>,

    #[darling(default)]
    pub generator: Option<String>,

    #[darling(default)]
    pub default: Option<syn::Lit>,

    #[darling(default)]
    pub format: Option<String>,

    #[darling(default)]
    pub join: Option<JoinArg>,

    #[darling(default)]
    pub transient: bool,
}

///
/// EntityArgs
///

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(loam), supports(struct_named))]
pub struct EntityArgs {
    pub ident: Ident,
    pub data: Data<(), FieldArgs>,
    pub table: String,
}

///
/// ColumnField / JoinField / EntityNode
///
/// Classified view of the parsed input, validated and ready to emit.
///

#[derive(Debug)]
pub struct ColumnField {
    pub ident: Ident,
    pub inner_ty: Type,
    pub column: String,
    pub kind: ColumnKindArg,
    pub not_null: bool,
    pub insertable: bool,
    pub updatable: bool,
    pub primary_key: bool,
    pub autoincrement: Option<StrategyArg>,
    pub generator: Option<String>,
    pub default: Option<syn::Lit>,
    pub format: Option<String>,
}

#[derive(Debug)]
pub struct JoinField {
    pub ident: Ident,
    pub target: Path,
    pub column: String,
}

#[derive(Debug)]
pub struct EntityNode {
    pub ident: Ident,
    pub table: String,
    pub columns: Vec<ColumnField>,
    pub joins: Vec<JoinField>,
    /// Declaration order across both field classes.
    pub order: Vec<FieldKind>,
}

#[derive(Clone, Copy, Debug)]
pub enum FieldKind {
    Column(usize),
    Join(usize),
}

impl EntityNode {
    pub fn parse(input: &DeriveInput) -> Result<Self, DarlingError> {
        let args = EntityArgs::from_derive_input(input)?;
        let fields = args
            .data
            .take_struct()
            .ok_or_else(|| DarlingError::custom("Entity derives only named structs"))?;

        if args.table.is_empty() {
            return Err(DarlingError::custom("`table` must not be empty"));
        }

        let mut columns = Vec::new();
        let mut joins = Vec::new();
        let mut order = Vec::new();
        let mut errors = DarlingError::accumulator();

        for field in fields {
            if field.transient {
                continue;
            }

            let Some(ident) = field.ident.clone() else {
                continue;
            };

            if let Some(join) = &field.join {
                joins.push(JoinField {
                    ident,
                    target: join.target.clone(),
                    column: join.column.clone(),
                });
                order.push(FieldKind::Join(joins.len() - 1));
                continue;
            }

            match classify_column(&ident, field) {
                Ok(column) => {
                    columns.push(column);
                    order.push(FieldKind::Column(columns.len() - 1));
                }
                Err(err) => {
                    errors.push(err);
                }
            }
        }

        // every join must reference a mapped sibling column
        for join in &joins {
            if !columns.iter().any(|c| c.column == join.column) {
                errors.push(DarlingError::custom(format!(
                    "join `{}` references unmapped column `{}`",
                    join.ident, join.column
                )));
            }
        }

        errors.finish()?;

        Ok(Self {
            ident: args.ident,
            table: args.table,
            columns,
            joins,
            order,
        })
    }

    /// Column field owning the join's foreign-key column.
    pub fn owning_column(&self, join: &JoinField) -> Option<&ColumnField> {
        self.columns.iter().find(|c| c.column == join.column)
    }
}

fn classify_column(ident: &Ident, field: FieldArgs) -> Result<ColumnField, DarlingError> {
    let inner_ty = option_inner(&field.ty).ok_or_else(|| {
        DarlingError::custom(format!(
            "property `{ident}` must be `Option<...>` so an unset value is representable"
        ))
        .with_span(&field.ty)
    })?;
    let kind = match field.kind {
        Some(kind) => kind,
        None => infer_kind(&inner_ty).ok_or_else(|| {
            DarlingError::custom(format!(
                "cannot infer a column kind for `{ident}`; add `kind = \"...\"`"
            ))
            .with_span(&field.ty)
        })?,
    };

    if field.generator.is_some() && field.autoincrement.is_none() {
        return Err(DarlingError::custom(format!(
            "`generator` on `{ident}` needs an `autoincrement` strategy"
        )));
    }

    // `nullable = false` is the attribute spelling of `not_null`
    let not_null = field.not_null || field.nullable == Some(false);

    Ok(ColumnField {
        ident: ident.clone(),
        inner_ty,
        column: field
            .column
            .unwrap_or_else(|| ident.to_string()),
        kind,
        not_null,
        insertable: field.insertable.unwrap_or(true),
        updatable: field.updatable.unwrap_or(true),
        primary_key: field.primary_key,
        autoincrement: field.autoincrement,
        generator: field.generator,
        default: field.default,
        format: field.format,
    })
}

/// Inner type of `Option<T>`, or `None` for anything else.
fn option_inner(ty: &Type) -> Option<Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;

    if segment.ident != "Option" {
        return None;
    }

    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };

    args.args.iter().find_map(|arg| match arg {
        syn::GenericArgument::Type(inner) => Some(inner.clone()),
        _ => None,
    })
}

fn infer_kind(ty: &Type) -> Option<ColumnKindArg> {
    let Type::Path(path) = ty else {
        return None;
    };
    let name = path.path.segments.last()?.ident.to_string();

    match name.as_str() {
        "bool" => Some(ColumnKindArg::Bool),
        "i8" | "i16" | "i32" | "i64" | "u8" | "u16" | "u32" => Some(ColumnKindArg::Int),
        "f32" | "f64" => Some(ColumnKindArg::Float),
        "String" => Some(ColumnKindArg::Text),
        "NaiveDateTime" => Some(ColumnKindArg::DateTime),
        _ => None,
    }
}
