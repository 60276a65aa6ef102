//! Format adapters built on [`Bijection`](crate::bijection::Bijection).
//!
//! Adapters only consume the core contract: each one is an ordinary
//! bijection and composes with anything else through
//! [`and_then`](crate::bijection::Bijection::and_then).
//!
//! - [`bits`]: bytes to individual bits
//! - [`json`]: serde values to JSON text, bytes or trees (feature `json`)

pub mod bits;
#[cfg(feature = "json")]
pub mod json;

pub use bits::bit_vector;
#[cfg(feature = "json")]
pub use json::{json_bytes, json_string, json_value};
