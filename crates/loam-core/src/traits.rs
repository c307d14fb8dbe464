use std::fmt::Debug;

use crate::{
    coerce::CoerceError,
    connector::Connector,
    engine::{Engine, SessionContext},
    error::Error,
    model::EntityModel,
    value::Value,
};

///
/// Entity
///
/// An object mapped to one relational table row.
///
/// Implemented by `#[derive(Entity)]`. Properties are `Option`-valued on
/// the struct: `None` is *unset* and is distinct from an explicit SQL
/// NULL, which callers record in a `ChangeSet`.
///

pub trait Entity: Clone + Debug + Default + 'static {
    /// Static declarative model for this type.
    const MODEL: &'static EntityModel;

    /// Read a property as a wire value; `None` when unset or unknown.
    fn get(&self, field: &str) -> Option<Value>;

    /// Write a property from a wire value.
    fn set(&mut self, field: &str, value: Value) -> Result<(), CoerceError>;

    /// Resolve joined entity properties through the engine. Generated
    /// for entities with join fields; the default is a no-op.
    fn hydrate_joins<C: Connector>(
        &mut self,
        engine: &Engine<C>,
        ctx: &mut SessionContext,
    ) -> Result<(), Error> {
        let _ = (engine, ctx);

        Ok(())
    }

    /// Accessor used by generated code to reach the model through the
    /// trait object-free `fn()` indirection in join descriptors.
    #[must_use]
    fn model() -> &'static EntityModel {
        Self::MODEL
    }
}
