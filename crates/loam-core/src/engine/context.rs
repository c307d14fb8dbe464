use std::{
    any::TypeId,
    collections::HashMap,
    sync::Arc,
};

use crate::{
    join::HydrationCache,
    metadata::{EntityMetadata, SchemaError},
    traits::Entity,
};

///
/// SessionContext
///
/// Explicit cache scope passed by reference into every engine operation:
/// resolved metadata by entity type, and the hydration cache for
/// referenced-entity lookups. Nothing is invalidated behind the caller's
/// back; schema is assumed immutable while a context is alive.
///

#[derive(Debug, Default)]
pub struct SessionContext {
    metadata: HashMap<TypeId, Arc<EntityMetadata>>,
    hydration: HydrationCache,
}

impl SessionContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolved metadata for an entity type; resolved once, then served
    /// from cache.
    pub fn metadata<E: Entity>(&mut self) -> Result<Arc<EntityMetadata>, SchemaError> {
        let key = TypeId::of::<E>();

        if let Some(meta) = self.metadata.get(&key) {
            return Ok(Arc::clone(meta));
        }

        let meta = Arc::new(EntityMetadata::resolve(E::MODEL)?);
        self.metadata.insert(key, Arc::clone(&meta));

        Ok(meta)
    }

    /// Drop every cached resolution. The hook for the rare caller that
    /// swaps schema between requests.
    pub fn invalidate(&mut self) {
        self.metadata.clear();
        self.hydration.clear();
    }

    #[must_use]
    pub fn cached_types(&self) -> usize {
        self.metadata.len()
    }

    pub(crate) const fn hydration(&mut self) -> &mut HydrationCache {
        &mut self.hydration
    }
}
