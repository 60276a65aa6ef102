//! Incremental construction of a registry.

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use rustc_hash::FxHashSet;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::Registry;
use super::config::CodecConfig;
use super::hint::{SerializationHint, Structural, ValueLayout};
use super::list::{Cons, Entry, Nil, TypeList};
use crate::effect::{Data, Effect};
use crate::error::CodecError;

/// Collects the types of a registry before it is sealed.
///
/// Each `register*` call consumes the builder and returns one whose type
/// records the new type, so the set of registered types is known to the
/// compiler by the time [`seal`](Self::seal) is called.
///
/// # Examples
///
/// ```rust
/// use bijector::effect::Immediate;
/// use bijector::registry::RegistryBuilder;
///
/// let registry = RegistryBuilder::new()
///     .register_value::<u64>()
///     .register_structural::<String>()
///     .seal::<Immediate>()
///     .unwrap();
///
/// let bytes = registry.encode::<String, _>("ready".to_string()).unwrap();
/// assert_eq!(registry.decode::<String, _>(bytes), Ok("ready".to_string()));
/// ```
pub struct RegistryBuilder<L = Nil> {
    entries: L,
    config: CodecConfig,
}

impl RegistryBuilder<Nil> {
    /// Starts an empty registry with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CodecConfig::default())
    }

    /// Starts an empty registry with `config`.
    #[must_use]
    pub const fn with_config(config: CodecConfig) -> Self {
        Self {
            entries: Nil,
            config,
        }
    }
}

impl Default for RegistryBuilder<Nil> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: TypeList> RegistryBuilder<L> {
    /// Registers `T`, encoded by `hint`.
    #[must_use]
    pub fn register<T, H>(self, hint: H) -> RegistryBuilder<Cons<Entry<T>, L>>
    where
        T: Data,
        H: SerializationHint<T>,
    {
        tracing::debug!(type_name = type_name::<T>(), position = L::LEN, "registered type");
        RegistryBuilder {
            entries: Cons {
                head: Entry::new(hint),
                tail: self.entries,
            },
            config: self.config,
        }
    }

    /// Registers a plain `Copy` value type with the fixed-width
    /// [`ValueLayout`] hint.
    #[must_use]
    pub fn register_value<T>(self) -> RegistryBuilder<Cons<Entry<T>, L>>
    where
        T: Copy + Serialize + DeserializeOwned + Data,
    {
        self.register(ValueLayout)
    }

    /// Registers an owned type with the serde-driven [`Structural`] hint.
    #[must_use]
    pub fn register_structural<T>(self) -> RegistryBuilder<Cons<Entry<T>, L>>
    where
        T: Serialize + DeserializeOwned + Data,
    {
        self.register(Structural)
    }

    /// Returns the number of types registered so far.
    #[must_use]
    pub const fn len(&self) -> usize {
        L::LEN
    }

    /// Returns `true` if no type has been registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        L::LEN == 0
    }

    /// Finalizes the registry, binding its codecs to the effect `M`.
    ///
    /// # Errors
    ///
    /// Returns an error if a type was registered more than once.
    pub fn seal<M: Effect>(self) -> Result<Registry<M, L>, CodecError> {
        let mut described = Vec::with_capacity(L::LEN);
        L::describe(&mut described);

        let mut seen = FxHashSet::default();
        if let Some((_, duplicate)) = described.iter().find(|(id, _)| !seen.insert(*id)) {
            tracing::debug!(type_name = duplicate, "duplicate registration");
            return Err(CodecError::new(format!(
                "{duplicate} is registered more than once"
            )));
        }

        tracing::debug!(types = described.len(), effect = M::NAME, "registry sealed");
        Ok(Registry {
            entries: self.entries,
            config: Arc::new(self.config),
            types: described.into_iter().map(|(_, name)| name).collect(),
            _effect: PhantomData,
        })
    }
}

impl<L: TypeList> fmt::Debug for RegistryBuilder<L> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut described = Vec::with_capacity(L::LEN);
        L::describe(&mut described);
        formatter
            .debug_struct("RegistryBuilder")
            .field("types", &described.iter().map(|(_, name)| name).collect::<Vec<_>>())
            .field("config", &self.config)
            .finish()
    }
}
