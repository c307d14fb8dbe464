use std::{
    any::{Any, TypeId},
    collections::HashMap,
};

use crate::{traits::Entity, value::Value};

///
/// HydrationCache
///
/// Per-context cache of referenced-entity lookups, keyed by target type
/// and key value. A cached `None` records a lookup that found nothing,
/// so repeated misses cost one round trip per query, not one per row.
///

#[derive(Debug, Default)]
pub struct HydrationCache {
    entries: HashMap<(TypeId, String), Box<dyn Any>>,
}

impl HydrationCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Outer `None` means "not cached yet".
    #[must_use]
    pub fn get<E: Entity>(&self, key: &Value) -> Option<Option<E>> {
        self.entries
            .get(&(TypeId::of::<E>(), key.cache_token()))
            .and_then(|boxed| boxed.downcast_ref::<Option<E>>())
            .cloned()
    }

    pub fn put<E: Entity>(&mut self, key: &Value, entity: Option<E>) {
        self.entries
            .insert((TypeId::of::<E>(), key.cache_token()), Box::new(entity));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
