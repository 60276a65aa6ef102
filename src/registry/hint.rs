//! Serialization hints: per-type strategies producing a payload.

use std::fmt;
use std::marker::PhantomData;

use bincode::Options;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::config::{CodecConfig, IntegerEncoding, TrailingBytes};
use crate::error::CodecError;

/// Turns a `T` into bytes and back.
///
/// A hint sees the registry's [`CodecConfig`] and is expected to honour the
/// settings that make sense for its format. The type tag is handled by the
/// registry around the hint and never reaches it.
pub trait SerializationHint<T>: Send + Sync + 'static {
    /// Encodes `value`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented, or if it exceeds
    /// the configured payload limit.
    fn serialize(&self, value: &T, config: &CodecConfig) -> Result<Vec<u8>, CodecError>;

    /// Decodes a value from `bytes`.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid encoding of `T`.
    fn deserialize(&self, bytes: &[u8], config: &CodecConfig) -> Result<T, CodecError>;
}

/// Serde-driven binary encoding through bincode.
///
/// Suits owned, reference-like values: strings, collections, nested structs.
/// All [`CodecConfig`] settings apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Structural;

impl<T> SerializationHint<T> for Structural
where
    T: Serialize + DeserializeOwned,
{
    fn serialize(&self, value: &T, config: &CodecConfig) -> Result<Vec<u8>, CodecError> {
        with_options(config, config.integer_encoding, SerializeWith { value })
    }

    fn deserialize(&self, bytes: &[u8], config: &CodecConfig) -> Result<T, CodecError> {
        check_payload_limit(bytes, config)?;
        with_options(config, config.integer_encoding, DeserializeWith::new(bytes))
    }
}

/// Fixed-width binary encoding for plain `Copy` values.
///
/// Integers always take their full width, so every value of a type encodes
/// to the same number of bytes. The configured integer encoding is ignored;
/// the payload limit and trailing-byte policy still apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ValueLayout;

impl<T> SerializationHint<T> for ValueLayout
where
    T: Copy + Serialize + DeserializeOwned,
{
    fn serialize(&self, value: &T, config: &CodecConfig) -> Result<Vec<u8>, CodecError> {
        with_options(config, IntegerEncoding::Fixed, SerializeWith { value })
    }

    fn deserialize(&self, bytes: &[u8], config: &CodecConfig) -> Result<T, CodecError> {
        check_payload_limit(bytes, config)?;
        with_options(config, IntegerEncoding::Fixed, DeserializeWith::new(bytes))
    }
}

/// A hint built from a pair of closures, for plugging in any other format.
///
/// The closures receive the payload without its type tag. The configuration
/// is not passed on.
///
/// # Examples
///
/// ```rust
/// use bijector::CodecError;
/// use bijector::registry::{CodecConfig, FunctionHint, SerializationHint};
///
/// let text = FunctionHint::new(
///     |value: &String| Ok::<_, CodecError>(value.as_bytes().to_vec()),
///     |bytes: &[u8]| String::from_utf8(bytes.to_vec()).map_err(CodecError::from),
/// );
///
/// let config = CodecConfig::default();
/// let bytes = text.serialize(&"hi".to_string(), &config).unwrap();
/// assert_eq!(text.deserialize(&bytes, &config).unwrap(), "hi");
/// ```
pub struct FunctionHint<S, D> {
    serialize: S,
    deserialize: D,
}

impl<S, D> FunctionHint<S, D> {
    /// Pairs an encoding closure with a decoding closure.
    #[must_use]
    pub const fn new(serialize: S, deserialize: D) -> Self {
        Self {
            serialize,
            deserialize,
        }
    }
}

impl<S, D> fmt::Debug for FunctionHint<S, D> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("FunctionHint").finish_non_exhaustive()
    }
}

impl<T, S, D> SerializationHint<T> for FunctionHint<S, D>
where
    S: Fn(&T) -> Result<Vec<u8>, CodecError> + Send + Sync + 'static,
    D: Fn(&[u8]) -> Result<T, CodecError> + Send + Sync + 'static,
{
    fn serialize(&self, value: &T, _config: &CodecConfig) -> Result<Vec<u8>, CodecError> {
        (self.serialize)(value)
    }

    fn deserialize(&self, bytes: &[u8], _config: &CodecConfig) -> Result<T, CodecError> {
        (self.deserialize)(bytes)
    }
}

// bincode encodes each option combination in the options type, so the
// configuration is dispatched to a visitor once per call.
trait WithOptions {
    type Output;

    fn run<O: Options>(self, options: O) -> Self::Output;
}

struct SerializeWith<'a, T> {
    value: &'a T,
}

impl<T: Serialize> WithOptions for SerializeWith<'_, T> {
    type Output = Result<Vec<u8>, CodecError>;

    fn run<O: Options>(self, options: O) -> Self::Output {
        options.serialize(self.value).map_err(CodecError::from)
    }
}

struct DeserializeWith<'a, T> {
    bytes: &'a [u8],
    _target: PhantomData<fn() -> T>,
}

impl<'a, T> DeserializeWith<'a, T> {
    const fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            _target: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> WithOptions for DeserializeWith<'_, T> {
    type Output = Result<T, CodecError>;

    fn run<O: Options>(self, options: O) -> Self::Output {
        options.deserialize(self.bytes).map_err(CodecError::from)
    }
}

// bincode's limit bounds what decoding allocates, not the length of the
// input slice, so oversized input is rejected up front.
fn check_payload_limit(bytes: &[u8], config: &CodecConfig) -> Result<(), CodecError> {
    let Some(limit) = config.max_payload_bytes else {
        return Ok(());
    };
    let length = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
    if length > limit {
        return Err(CodecError::new(format!(
            "payload of {length} bytes exceeds the limit of {limit} bytes"
        )));
    }
    Ok(())
}

fn with_options<V: WithOptions>(
    config: &CodecConfig,
    integers: IntegerEncoding,
    visitor: V,
) -> V::Output {
    let options = bincode::DefaultOptions::new();
    match integers {
        IntegerEncoding::Varint => with_limit(config, options.with_varint_encoding(), visitor),
        IntegerEncoding::Fixed => with_limit(config, options.with_fixint_encoding(), visitor),
    }
}

fn with_limit<O: Options, V: WithOptions>(config: &CodecConfig, options: O, visitor: V) -> V::Output {
    match config.max_payload_bytes {
        Some(limit) => with_trailing(config, options.with_limit(limit), visitor),
        None => with_trailing(config, options.with_no_limit(), visitor),
    }
}

fn with_trailing<O: Options, V: WithOptions>(
    config: &CodecConfig,
    options: O,
    visitor: V,
) -> V::Output {
    match config.trailing_bytes {
        TrailingBytes::Reject => visitor.run(options.reject_trailing_bytes()),
        TrailingBytes::Allow => visitor.run(options.allow_trailing_bytes()),
    }
}
