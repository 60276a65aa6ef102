//! Registry codecs: a hint wrapped with the type tag and exposed as a
//! [`Bijection`].

use std::any::type_name;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rustc_hash::FxHasher;

use super::config::CodecConfig;
use super::hint::SerializationHint;
use crate::bijection::Bijection;
use crate::effect::{Data, Effect};
use crate::error::CodecError;
use crate::func::Func;

/// Width of the type tag prefixed to tagged payloads.
pub const TYPE_TAG_LEN: usize = 8;

/// The codec a registry hands out for `T`: `T <-> Vec<u8>`.
pub type BinaryBijection<T> = Bijection<T, Vec<u8>, Encoder<T>, Decoder<T>>;

/// The tag identifying `T` in payloads.
///
/// The tag is the `FxHash` of the type name. It tells types apart within one
/// build of a program; it is not a stable schema identifier.
#[must_use]
pub fn type_tag<T: ?Sized>() -> u64 {
    let mut hasher = FxHasher::default();
    type_name::<T>().hash(&mut hasher);
    hasher.finish()
}

pub(crate) fn binary_bijection<T: Data>(
    hint: Arc<dyn SerializationHint<T>>,
    config: Arc<CodecConfig>,
) -> BinaryBijection<T> {
    Bijection::new(
        Encoder {
            hint: Arc::clone(&hint),
            config: Arc::clone(&config),
        },
        Decoder { hint, config },
    )
}

/// The encoding half of a registry codec.
pub struct Encoder<T> {
    hint: Arc<dyn SerializationHint<T>>,
    config: Arc<CodecConfig>,
}

impl<T> Clone for Encoder<T> {
    fn clone(&self) -> Self {
        Self {
            hint: Arc::clone(&self.hint),
            config: Arc::clone(&self.config),
        }
    }
}

impl<T> fmt::Debug for Encoder<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Encoder")
            .field("type", &type_name::<T>())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<T: Data> Func<T, Vec<u8>> for Encoder<T> {
    type Error = CodecError;

    fn apply<M: Effect>(&self, input: T) -> M::Of<Result<Vec<u8>, CodecError>> {
        let hint = Arc::clone(&self.hint);
        let config = Arc::clone(&self.config);
        M::suspend(move || encode(hint.as_ref(), &config, &input))
    }
}

fn encode<T: Data>(
    hint: &dyn SerializationHint<T>,
    config: &CodecConfig,
    value: &T,
) -> Result<Vec<u8>, CodecError> {
    let payload = hint.serialize(value, config)?;
    let mut bytes = Vec::with_capacity(TYPE_TAG_LEN + payload.len());
    bytes.extend_from_slice(&type_tag::<T>().to_le_bytes());
    bytes.extend_from_slice(&payload);
    tracing::trace!(type_name = type_name::<T>(), bytes = bytes.len(), "encoded");
    Ok(bytes)
}

/// The decoding half of a registry codec.
pub struct Decoder<T> {
    hint: Arc<dyn SerializationHint<T>>,
    config: Arc<CodecConfig>,
}

impl<T> Clone for Decoder<T> {
    fn clone(&self) -> Self {
        Self {
            hint: Arc::clone(&self.hint),
            config: Arc::clone(&self.config),
        }
    }
}

impl<T> fmt::Debug for Decoder<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Decoder")
            .field("type", &type_name::<T>())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<T: Data> Func<Vec<u8>, T> for Decoder<T> {
    type Error = CodecError;

    fn apply<M: Effect>(&self, input: Vec<u8>) -> M::Of<Result<T, CodecError>> {
        let hint = Arc::clone(&self.hint);
        let config = Arc::clone(&self.config);
        M::suspend(move || decode(hint.as_ref(), &config, &input))
    }
}

fn decode<T: Data>(
    hint: &dyn SerializationHint<T>,
    config: &CodecConfig,
    bytes: &[u8],
) -> Result<T, CodecError> {
    tracing::trace!(type_name = type_name::<T>(), bytes = bytes.len(), "decoding");
    let payload = strip_tag::<T>(bytes)?;
    hint.deserialize(payload, config).inspect_err(|error| {
        tracing::debug!(type_name = type_name::<T>(), %error, "payload rejected");
    })
}

fn strip_tag<T>(bytes: &[u8]) -> Result<&[u8], CodecError> {
    let Some((tag, payload)) = bytes.split_first_chunk::<TYPE_TAG_LEN>() else {
        tracing::debug!(
            type_name = type_name::<T>(),
            bytes = bytes.len(),
            "payload shorter than the type tag"
        );
        return Err(CodecError::new(format!(
            "payload of {} bytes is too short to hold a type tag for {}",
            bytes.len(),
            type_name::<T>()
        )));
    };
    let found = u64::from_le_bytes(*tag);
    let expected = type_tag::<T>();
    if found == expected {
        Ok(payload)
    } else {
        tracing::debug!(
            type_name = type_name::<T>(),
            expected,
            found,
            "type tag mismatch"
        );
        Err(CodecError::new(format!(
            "type tag mismatch: payload was not encoded as {}",
            type_name::<T>()
        )))
    }
}
