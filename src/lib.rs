//! # bijector
//!
//! Fallible, effect-polymorphic, composable bidirectional transforms.
//!
//! ## Overview
//!
//! A pipeline is built once out of small transforms and run under whichever
//! execution strategy the caller picks at the call site. It includes:
//!
//! - **Transforms**: [`Func`](func::Func), a unary transform that may fail
//!   with a typed error, with category and arrow-choice composition
//! - **Effects**: [`Immediate`](effect::Immediate),
//!   [`Deferred`](effect::Deferred) and `Asynchronous`, selected per call
//! - **Points**: [`Point`](func::Point), deferred values that can be
//!   evaluated any number of times
//! - **Bijections**: [`Bijection`](bijection::Bijection), a transform paired
//!   with its inverse
//! - **Registry**: a binary codec registry whose set of types is checked at
//!   compile time
//! - **Adapters**: JSON and bit-vector bijections
//!
//! ## Feature Flags
//!
//! - `async`: the `Asynchronous` effect (futures)
//! - `registry`: the codec registry (serde, bincode)
//! - `json`: the JSON adapters (`serde_json`)
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use bijector::prelude::*;
//!
//! let parse = try_lift(|text: String| text.trim().parse::<u32>().map_err(CodecError::wrap));
//! let double = lift(|n: u32| n * 2);
//! let pipeline = parse.compose_before(double);
//!
//! assert_eq!(pipeline.apply::<Immediate>(" 21 ".to_string()), Ok(42));
//! assert_eq!(pipeline.apply::<Deferred>("21".to_string()).run(), Ok(42));
//! assert!(pipeline.apply::<Immediate>("bar".to_string()).is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use bijector::prelude::*;
/// ```
pub mod prelude {
    pub use crate::bijection::{Bijection, from_functions, from_partial, from_points};
    pub use crate::control::Either;
    #[cfg(feature = "async")]
    pub use crate::effect::Asynchronous;
    pub use crate::effect::{Data, Deferred, Effect, Immediate, Suspended};
    pub use crate::error::{CodecError, ConfigError};
    pub use crate::func::{Func, Point, bind, guard, identity, lift, try_lift};

    #[cfg(feature = "registry")]
    pub use crate::registry::{CodecConfig, Registry, RegistryBuilder, SerializationHint};
}

pub mod adapters;
pub mod bijection;
pub mod control;
pub mod effect;
pub mod error;
pub mod func;

#[cfg(feature = "registry")]
pub mod registry;

pub use error::{CodecError, ConfigError};
