//! A statically checked registry of binary codecs.
//!
//! The registry maps Rust types to the [`SerializationHint`] that encodes
//! them. The set of registered types is part of the registry's *type*: asking
//! for the codec of a type that was never registered is a compile error, not
//! a `None` at run time.
//!
//! ```text
//! RegistryBuilder::new()            RegistryBuilder<Nil>
//!     .register_value::<Fuel>()     RegistryBuilder<Cons<Entry<Fuel>, Nil>>
//!     .register_structural::<Aircraft>()
//!                                   RegistryBuilder<Cons<Entry<Aircraft>, Cons<Entry<Fuel>, Nil>>>
//!     .seal::<Immediate>()          Result<Registry<Immediate, ...>, CodecError>
//! ```
//!
//! Binary encoding delegates to `bincode` through serde. Every payload is
//! prefixed with an 8-byte [`type_tag`], so bytes produced for one type fail
//! to decode as another whatever the [`CodecConfig`] says.
//!
//! # Examples
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use bijector::effect::Immediate;
//! use bijector::registry::RegistryBuilder;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
//! struct Fuel(u32);
//!
//! #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
//! struct Aircraft {
//!     tail_number: String,
//! }
//!
//! let registry = RegistryBuilder::new()
//!     .register_value::<Fuel>()
//!     .register_structural::<Aircraft>()
//!     .seal::<Immediate>()
//!     .unwrap();
//!
//! let fuel = registry.codec_for::<Fuel, _>();
//! let bytes = fuel.apply::<Immediate>(Fuel(1200)).unwrap();
//! assert_eq!(fuel.unapply::<Immediate>(bytes.clone()), Ok(Fuel(1200)));
//!
//! // Fuel bytes never decode as an Aircraft.
//! assert!(registry.decode::<Aircraft, _>(bytes).is_err());
//! ```
//!
//! A lookup for a type that was not registered does not compile:
//!
//! ```rust,compile_fail
//! use bijector::effect::Immediate;
//! use bijector::registry::RegistryBuilder;
//!
//! let registry = RegistryBuilder::new()
//!     .register_value::<u32>()
//!     .seal::<Immediate>()
//!     .unwrap();
//!
//! let missing = registry.codec_for::<String, _>();
//! ```

mod builder;
mod codec;
mod config;
mod hint;
mod list;

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

pub use builder::RegistryBuilder;
pub use codec::{BinaryBijection, Decoder, Encoder, TYPE_TAG_LEN, type_tag};
pub use config::{CodecConfig, IntegerEncoding, TrailingBytes};
pub use hint::{FunctionHint, SerializationHint, Structural, ValueLayout};
pub use list::{Cons, Contains, Entry, Here, Nil, There, TypeList};

use crate::effect::{Data, Effect};
use crate::error::CodecError;

/// A sealed, immutable registry whose codecs run under the effect `M`.
///
/// `L` is the type-level list of registered types. A registry is `Send +
/// Sync` and every lookup is a pure read, so one registry can serve any
/// number of threads or tasks.
pub struct Registry<M, L> {
    entries: L,
    config: Arc<CodecConfig>,
    types: Vec<&'static str>,
    _effect: PhantomData<fn() -> M>,
}

impl<M: Effect, L: TypeList> Registry<M, L> {
    /// Returns the codec for `T`.
    ///
    /// Compiles only if `T` was registered; the index `I` is inferred and is
    /// written `_`.
    #[must_use]
    pub fn codec_for<T, I>(&self) -> BinaryBijection<T>
    where
        T: Data,
        L: Contains<T, I>,
    {
        let entry = <L as Contains<T, I>>::entry(&self.entries);
        codec::binary_bijection(entry.hint(), Arc::clone(&self.config))
    }

    /// Encodes `value` under the registry's effect.
    pub fn encode<T, I>(&self, value: T) -> M::Of<Result<Vec<u8>, CodecError>>
    where
        T: Data,
        L: Contains<T, I>,
    {
        self.codec_for::<T, I>().apply::<M>(value)
    }

    /// Decodes a `T` from `bytes` under the registry's effect.
    pub fn decode<T, I>(&self, bytes: Vec<u8>) -> M::Of<Result<T, CodecError>>
    where
        T: Data,
        L: Contains<T, I>,
    {
        self.codec_for::<T, I>().unapply::<M>(bytes)
    }

    /// Returns the names of the registered types, in registration order.
    #[must_use]
    pub fn registered_types(&self) -> &[&'static str] {
        &self.types
    }

    /// Returns the number of registered types.
    #[must_use]
    pub const fn len(&self) -> usize {
        L::LEN
    }

    /// Returns `true` if no type is registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        L::LEN == 0
    }

    /// Returns the configuration shared by every codec.
    #[must_use]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }
}

impl<M, L: Clone> Clone for Registry<M, L> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            config: Arc::clone(&self.config),
            types: self.types.clone(),
            _effect: PhantomData,
        }
    }
}

impl<M: Effect, L> fmt::Debug for Registry<M, L> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Registry")
            .field("effect", &M::NAME)
            .field("types", &self.types)
            .field("config", &self.config)
            .finish()
    }
}

static_assertions::assert_impl_all!(
    Registry<crate::effect::Immediate, Cons<Entry<String>, Nil>>: Send, Sync, Clone
);
static_assertions::assert_impl_all!(BinaryBijection<String>: Send, Sync, Clone);
