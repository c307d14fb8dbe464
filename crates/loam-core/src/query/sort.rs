use derive_more::{Deref, DerefMut, IntoIterator};
use serde::{Deserialize, Serialize};

use crate::{error::Error, join::FieldResolver};

///
/// Direction
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    #[must_use]
    pub(crate) const fn sql(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

///
/// Sort
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Sort {
    pub field: String,
    pub direction: Direction,
}

impl Sort {
    #[must_use]
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    #[must_use]
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }
}

///
/// Sortable
/// Ordered sort list.
///

#[derive(
    Clone, Debug, Default, Deref, DerefMut, Deserialize, Eq, IntoIterator, PartialEq, Serialize,
)]
pub struct Sortable {
    sorts: Vec<Sort>,
}

impl Sortable {
    #[must_use]
    pub const fn new() -> Self {
        Self { sorts: Vec::new() }
    }

    #[must_use]
    pub fn by(field: impl Into<String>, direction: Direction) -> Self {
        Self {
            sorts: vec![Sort {
                field: field.into(),
                direction,
            }],
        }
    }

    #[must_use]
    pub fn then(mut self, sort: Sort) -> Self {
        self.sorts.push(sort);
        self
    }

    pub fn push(&mut self, sort: Sort) {
        self.sorts.push(sort);
    }

    /// True iff any sort field reaches through a join.
    #[must_use]
    pub fn requires_join(&self) -> bool {
        self.sorts.iter().any(|s| s.field.contains('.'))
    }

    /// Render an ORDER BY fragment. Fields map through the column and
    /// join maps when declared, else pass through literally.
    pub(crate) fn create_order_by(&self, fields: &mut FieldResolver<'_>) -> Result<String, Error> {
        let mut parts = Vec::with_capacity(self.sorts.len());

        for sort in &self.sorts {
            let column = fields.resolve_lenient(&sort.field)?;

            parts.push(format!("{column} {}", sort.direction.sql()));
        }

        Ok(parts.join(", "))
    }
}

impl FromIterator<Sort> for Sortable {
    fn from_iter<I: IntoIterator<Item = Sort>>(iter: I) -> Self {
        Self {
            sorts: iter.into_iter().collect(),
        }
    }
}
