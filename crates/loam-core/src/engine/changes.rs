use std::collections::BTreeSet;

///
/// ChangeSet
///
/// Explicit record of properties a caller has deliberately set to SQL
/// NULL. An unset `Option` property says nothing; an entry here forces
/// `column = null` into the next update regardless of the include-null
/// flag.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ChangeSet {
    nulled: BTreeSet<String>,
}

impl ChangeSet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nulled: BTreeSet::new(),
        }
    }

    pub fn mark_null(&mut self, field: impl Into<String>) -> &mut Self {
        self.nulled.insert(field.into());
        self
    }

    #[must_use]
    pub fn with_null(mut self, field: impl Into<String>) -> Self {
        self.nulled.insert(field.into());
        self
    }

    #[must_use]
    pub fn is_nulled(&self, field: &str) -> bool {
        self.nulled.contains(field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nulled.is_empty()
    }

    pub fn clear(&mut self) {
        self.nulled.clear();
    }
}
