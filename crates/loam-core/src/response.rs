use std::time::Duration;

use crate::query::page::Pageable;

///
/// PageWindow
/// Inclusive page-number range to offer as pagination links: the current
/// page plus/minus the configured margin, clamped to real pages.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PageWindow {
    pub first: u64,
    pub last: u64,
}

///
/// PageResult
/// Hydrated rows plus the totals a paginated caller needs.
///

#[derive(Debug)]
pub struct PageResult<E> {
    pub rows: Vec<E>,
    /// Total matches ignoring the page window.
    pub total: u64,
    pub total_pages: u64,
    pub elapsed: Duration,
    pub window: PageWindow,
}

impl<E> PageResult<E> {
    /// The normal "no rows" signal for collection reads.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            total: 0,
            total_pages: 0,
            elapsed: Duration::ZERO,
            window: PageWindow::default(),
        }
    }

    #[must_use]
    pub(crate) fn paged(
        rows: Vec<E>,
        total: u64,
        pageable: Option<&Pageable>,
        window_margin: u64,
        elapsed: Duration,
    ) -> Self {
        let (current, total_pages) = match pageable.and_then(|p| p.page) {
            Some(page) => (page.number(), total.div_ceil(page.size())),
            None => (1, u64::from(total > 0)),
        };
        let window = if total_pages == 0 {
            PageWindow::default()
        } else {
            let first = current.saturating_sub(window_margin).max(1);
            let last = current.saturating_add(window_margin).min(total_pages).max(first);

            PageWindow { first, last }
        };

        Self {
            rows,
            total,
            total_pages,
            elapsed,
            window,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&E> {
        self.rows.first()
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<E> {
        self.rows
    }
}

impl<E> IntoIterator for PageResult<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
