use crate::model::field::{ColumnModel, FieldModel};

///
/// EntityModel
/// Minimal, macro-generated static model for one entity.
///

#[derive(Debug)]
pub struct EntityModel {
    /// Fully-qualified Rust type path (for diagnostics and caching).
    pub path: &'static str,
    /// Type name as declared.
    pub entity_name: &'static str,
    /// Mapped relational table.
    pub table: &'static str,
    /// Ordered field list (authoritative for statement column order).
    pub fields: &'static [FieldModel],
}

impl EntityModel {
    /// Look up a column field by property name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnModel> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .and_then(FieldModel::as_column)
    }

    /// Primary-key column fields in declaration order.
    pub fn primary_key_fields(&self) -> impl Iterator<Item = (&'static str, &ColumnModel)> {
        self.fields.iter().filter_map(|f| {
            f.as_column()
                .filter(|c| c.primary_key)
                .map(|c| (f.name, c))
        })
    }

    /// Column name of the first primary-key field, if any.
    #[must_use]
    pub fn primary_key_column(&self) -> Option<&'static str> {
        self.primary_key_fields().next().map(|(_, c)| c.column)
    }
}
