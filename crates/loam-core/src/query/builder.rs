use std::marker::PhantomData;

use crate::{
    query::{
        criteria::Criteria,
        page::{Page, Pageable},
        predicate::{Logic, Predicate},
        sort::{Direction, Sort, Sortable},
        specification::Specification,
    },
    traits::Entity,
};

///
/// Query
///
/// Typed, declarative query builder.
///
/// Collects filter, ordering, and paging for one entity type; purely
/// declarative, no metadata access or execution. Field names are plain
/// strings here; resolution against the schema happens when the engine
/// runs the query.
///

pub struct Query<E: Entity> {
    spec: Specification,
    sortable: Sortable,
    page: Option<Page>,
    _marker: PhantomData<E>,
}

impl<E: Entity> Default for Query<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Query<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            spec: Specification::new(),
            sortable: Sortable::new(),
            page: None,
            _marker: PhantomData,
        }
    }

    /// Add a predicate with its own connective.
    #[must_use]
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.spec.add(predicate);
        self
    }

    /// Explicit AND combinator.
    #[must_use]
    pub fn and(mut self, predicate: Predicate) -> Self {
        self.spec.add(predicate.with_logic(Logic::And));
        self
    }

    /// Explicit OR combinator.
    #[must_use]
    pub fn or(mut self, predicate: Predicate) -> Self {
        self.spec.add(predicate.with_logic(Logic::Or));
        self
    }

    /// Append a parenthesized sub-specification.
    #[must_use]
    pub fn group(mut self, spec: Specification) -> Self {
        self.spec.add(spec);
        self
    }

    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.sortable.push(Sort {
            field: field.into(),
            direction,
        });
        self
    }

    #[must_use]
    pub fn page(mut self, number: u64, size: u64) -> Self {
        self.page = Some(Page::new(number, size));
        self
    }

    /// Lower into the engine input pair.
    #[must_use]
    pub fn build(self) -> (Criteria, Option<Pageable>) {
        let pageable = match (self.page, self.sortable.is_empty()) {
            (Some(page), true) => Some(Pageable::new(page)),
            (Some(page), false) => Some(Pageable::new(page).with_sortable(self.sortable)),
            (None, false) => Some(Pageable::sorted(self.sortable)),
            (None, true) => None,
        };

        (Criteria::Spec(self.spec), pageable)
    }
}
