use serde::{Deserialize, Serialize};

use crate::query::sort::Sortable;

///
/// Page
/// One-based page number and a page size, both at least 1.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Page {
    number: u64,
    size: u64,
}

impl Page {
    /// Values below 1 are clamped up.
    #[must_use]
    pub const fn new(number: u64, size: u64) -> Self {
        Self {
            number: if number < 1 { 1 } else { number },
            size: if size < 1 { 1 } else { size },
        }
    }

    #[must_use]
    pub const fn number(&self) -> u64 {
        self.number
    }

    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    #[must_use]
    pub const fn to_limit(&self) -> Limit {
        Limit {
            offset: (self.number - 1) * self.size,
            limit: self.size,
        }
    }
}

///
/// Limit
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Limit {
    pub offset: u64,
    pub limit: u64,
}

///
/// Pageable
/// Optional page window plus optional ordering for a collection read.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Pageable {
    pub page: Option<Page>,
    pub sortable: Option<Sortable>,
}

impl Pageable {
    #[must_use]
    pub const fn new(page: Page) -> Self {
        Self {
            page: Some(page),
            sortable: None,
        }
    }

    /// Ordering without a page window.
    #[must_use]
    pub const fn sorted(sortable: Sortable) -> Self {
        Self {
            page: None,
            sortable: Some(sortable),
        }
    }

    #[must_use]
    pub fn with_sortable(mut self, sortable: Sortable) -> Self {
        self.sortable = Some(sortable);
        self
    }

    #[must_use]
    pub fn limit(&self) -> Option<Limit> {
        self.page.as_ref().map(Page::to_limit)
    }

    /// True iff any sort field reaches through a join.
    #[must_use]
    pub fn requires_join(&self) -> bool {
        self.sortable.as_ref().is_some_and(Sortable::requires_join)
    }
}
