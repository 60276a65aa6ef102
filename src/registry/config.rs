//! Codec configuration.
//!
//! [`CodecConfig`] controls how registry codecs lay out their bytes. It can be
//! built in code, deserialized as part of a host application's configuration
//! file, or loaded from environment variables.
//!
//! # Environment Variables
//!
//! | Variable | Values | Default |
//! |----------|--------|---------|
//! | `BIJECTOR_MAX_PAYLOAD_BYTES` | integer | no limit |
//! | `BIJECTOR_TRAILING_BYTES` | `reject` / `allow` | `reject` |
//! | `BIJECTOR_INTEGER_ENCODING` | `varint` / `fixed` | `varint` |
//!
//! Every payload carries the 8-byte type tag; no setting turns it off.

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;

const MAX_PAYLOAD_BYTES: &str = "BIJECTOR_MAX_PAYLOAD_BYTES";
const TRAILING_BYTES: &str = "BIJECTOR_TRAILING_BYTES";
const INTEGER_ENCODING: &str = "BIJECTOR_INTEGER_ENCODING";

/// What decoding does with bytes left over after a complete value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailingBytes {
    /// Leftover bytes are an error.
    #[default]
    Reject,
    /// Leftover bytes are ignored.
    Allow,
}

impl FromStr for TrailingBytes {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "allow" => Ok(Self::Allow),
            _ => Err(format!("expected `reject` or `allow`, got {value:?}")),
        }
    }
}

impl fmt::Display for TrailingBytes {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reject => write!(formatter, "reject"),
            Self::Allow => write!(formatter, "allow"),
        }
    }
}

/// How integers are laid out by [`Structural`](super::Structural) codecs.
///
/// [`ValueLayout`](super::ValueLayout) codecs always use [`Fixed`](Self::Fixed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegerEncoding {
    /// Variable-length integers; small values take fewer bytes.
    #[default]
    Varint,
    /// Integers always take their full width.
    Fixed,
}

impl FromStr for IntegerEncoding {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "varint" => Ok(Self::Varint),
            "fixed" => Ok(Self::Fixed),
            _ => Err(format!("expected `varint` or `fixed`, got {value:?}")),
        }
    }
}

impl fmt::Display for IntegerEncoding {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Varint => write!(formatter, "varint"),
            Self::Fixed => write!(formatter, "fixed"),
        }
    }
}

/// Byte-level settings shared by every codec of a registry.
///
/// # Fields
///
/// - `max_payload_bytes`: upper bound on an encoded value, excluding the type tag
/// - `trailing_bytes`: whether leftover input is an error
/// - `integer_encoding`: integer layout for structural codecs
///
/// # Examples
///
/// ```rust
/// use bijector::registry::{CodecConfig, IntegerEncoding};
///
/// let config = CodecConfig::default()
///     .with_max_payload_bytes(4096)
///     .with_integer_encoding(IntegerEncoding::Fixed);
///
/// assert_eq!(config.max_payload_bytes, Some(4096));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Largest accepted payload in bytes; `None` means unbounded.
    pub max_payload_bytes: Option<u64>,
    /// Handling of leftover bytes when decoding.
    pub trailing_bytes: TrailingBytes,
    /// Integer layout for structural codecs.
    pub integer_encoding: IntegerEncoding,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_payload_bytes: None,
            trailing_bytes: TrailingBytes::Reject,
            integer_encoding: IntegerEncoding::Varint,
        }
    }
}

impl CodecConfig {
    /// Loads the configuration from `BIJECTOR_*` environment variables.
    ///
    /// Unset variables keep their default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is set to a value
    /// that cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads the configuration through `lookup`, which maps a variable name
    /// to its value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a value cannot be parsed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bijector::registry::{CodecConfig, TrailingBytes};
    ///
    /// let config = CodecConfig::from_lookup(|key| {
    ///     (key == "BIJECTOR_TRAILING_BYTES").then(|| "allow".to_string())
    /// })
    /// .unwrap();
    ///
    /// assert_eq!(config.trailing_bytes, TrailingBytes::Allow);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let max_payload_bytes = match lookup(MAX_PAYLOAD_BYTES) {
            Some(value) => Some(parse_value::<u64>(MAX_PAYLOAD_BYTES, &value)?),
            None => defaults.max_payload_bytes,
        };
        let trailing_bytes = parse_optional(&lookup, TRAILING_BYTES, defaults.trailing_bytes)?;
        let integer_encoding =
            parse_optional(&lookup, INTEGER_ENCODING, defaults.integer_encoding)?;

        Ok(Self {
            max_payload_bytes,
            trailing_bytes,
            integer_encoding,
        })
    }

    /// Bounds encoded payloads to `limit` bytes.
    #[must_use]
    pub const fn with_max_payload_bytes(mut self, limit: u64) -> Self {
        self.max_payload_bytes = Some(limit);
        self
    }

    /// Sets the handling of leftover bytes.
    #[must_use]
    pub const fn with_trailing_bytes(mut self, trailing_bytes: TrailingBytes) -> Self {
        self.trailing_bytes = trailing_bytes;
        self
    }

    /// Sets the integer layout for structural codecs.
    #[must_use]
    pub const fn with_integer_encoding(mut self, integer_encoding: IntegerEncoding) -> Self {
        self.integer_encoding = integer_encoding;
        self
    }

}

fn parse_optional<T, F>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).map_or(Ok(default), |value| parse_value(key, &value))
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|error: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: error.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key| values.get(key).cloned()
    }

    #[rstest]
    fn unset_variables_keep_defaults() {
        let config = CodecConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, CodecConfig::default());
    }

    #[rstest]
    fn every_variable_is_read() {
        let config = CodecConfig::from_lookup(lookup_from(&[
            (MAX_PAYLOAD_BYTES, "1024"),
            (TRAILING_BYTES, "allow"),
            (INTEGER_ENCODING, "FIXED"),
        ]))
        .unwrap();

        assert_eq!(
            config,
            CodecConfig::default()
                .with_max_payload_bytes(1024)
                .with_trailing_bytes(TrailingBytes::Allow)
                .with_integer_encoding(IntegerEncoding::Fixed)
        );
    }

    #[rstest]
    #[case(MAX_PAYLOAD_BYTES, "lots")]
    #[case(TRAILING_BYTES, "sometimes")]
    #[case(INTEGER_ENCODING, "zigzag")]
    fn invalid_values_are_reported(#[case] key: &str, #[case] value: &str) {
        let error = CodecConfig::from_lookup(lookup_from(&[(key, value)])).unwrap_err();
        assert!(matches!(error, ConfigError::InvalidValue { key: ref reported, .. } if reported == key));
        assert!(error.to_string().starts_with(&format!("Invalid value for {key}")));
    }

    #[cfg(feature = "json")]
    #[rstest]
    fn deserializes_with_defaults() {
        let config: CodecConfig =
            serde_json::from_str(r#"{ "max_payload_bytes": 64, "trailing_bytes": "allow" }"#)
                .unwrap();
        assert_eq!(config.max_payload_bytes, Some(64));
        assert_eq!(config.trailing_bytes, TrailingBytes::Allow);
        assert_eq!(config.integer_encoding, IntegerEncoding::Varint);
    }

    #[cfg(feature = "json")]
    #[rstest]
    fn type_tag_cannot_be_configured_away() {
        let parsed = serde_json::from_str::<CodecConfig>(r#"{ "type_tag": false }"#);
        assert!(parsed.is_err());
    }

    #[rstest]
    fn type_tag_variable_is_not_read() {
        let config =
            CodecConfig::from_lookup(lookup_from(&[("BIJECTOR_TYPE_TAG", "false")])).unwrap();
        assert_eq!(config, CodecConfig::default());
    }
}
