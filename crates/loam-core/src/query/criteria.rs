use crate::query::{predicate::Predicate, specification::Specification};

///
/// Criteria
///
/// Filter input for the find/count/delete families.
///
/// `Spec` renders leniently: an undeclared undotted field passes through
/// as a literal column name. `Fields` is the explicit field-list form
/// (the typed replacement for name-derived queries) and is strict: an
/// undeclared field raises `ColumnMatchError` before any round trip.
///

#[derive(Clone, Debug)]
pub enum Criteria {
    Spec(Specification),
    Fields(Vec<Predicate>),
}

impl Criteria {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Spec(s) => s.is_empty(),
            Self::Fields(f) => f.is_empty(),
        }
    }

    #[must_use]
    pub fn requires_join(&self) -> bool {
        match self {
            Self::Spec(s) => s.requires_join(),
            Self::Fields(f) => f.iter().any(Predicate::requires_join),
        }
    }

    /// Whether field resolution must reject undeclared fields.
    #[must_use]
    pub(crate) const fn strict(&self) -> bool {
        matches!(self, Self::Fields(_))
    }

    /// Flatten into a specification for rendering.
    #[must_use]
    pub(crate) fn to_specification(&self) -> Specification {
        match self {
            Self::Spec(s) => s.clone(),
            Self::Fields(preds) => {
                let mut spec = Specification::new();

                for p in preds {
                    spec.add(p.clone());
                }

                spec
            }
        }
    }
}

impl From<Specification> for Criteria {
    fn from(s: Specification) -> Self {
        Self::Spec(s)
    }
}

impl From<Predicate> for Criteria {
    fn from(p: Predicate) -> Self {
        Self::Fields(vec![p])
    }
}

impl From<Vec<Predicate>> for Criteria {
    fn from(preds: Vec<Predicate>) -> Self {
        Self::Fields(preds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::predicate::{equals, greater_than};

    #[test]
    fn field_lists_are_strict() {
        assert!(Criteria::from(vec![equals("a", 1)]).strict());
        assert!(!Criteria::from(Specification::new()).strict());
    }

    #[test]
    fn join_flag_propagates_from_members() {
        let flat = Criteria::from(vec![equals("status", "A"), greater_than("age", 18)]);
        let dotted = Criteria::from(vec![equals("role.name", "admin")]);

        assert!(!flat.requires_join());
        assert!(dotted.requires_join());
    }
}
