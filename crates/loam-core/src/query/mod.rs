//! Composable, SQL-independent query model.
//!
//! Predicates, specifications, sorting, and paging are plain value
//! objects; nothing here touches a connector. Lowering into SQL text
//! happens in the sql module against resolved metadata.

pub mod builder;
pub mod criteria;
pub mod page;
pub mod predicate;
pub mod sort;
pub mod specification;

pub use builder::Query;
pub use criteria::Criteria;
pub use page::{Limit, Page, Pageable};
pub use predicate::{
    Comparator, Logic, Predicate, equals, greater_than, greater_than_or_equals, in_list, like,
    less_than, less_than_or_equals, not_equals, not_in_list, not_like,
};
pub use sort::{Direction, Sort, Sortable};
pub use specification::Specification;
