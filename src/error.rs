//! Error types for transforms and codecs.
//!
//! [`CodecError`] is the single failure type the core produces. It carries a
//! human-readable message and, optionally, the underlying cause that made the
//! step fail (a parse error, a serializer error, ...). Richer error taxonomies
//! are composed in with [`Func::convert_error`](crate::func::Func::convert_error)
//! rather than by widening this type.
//!
//! # Examples
//!
//! ```rust
//! use bijector::CodecError;
//!
//! let cause = "bar".parse::<i64>().unwrap_err();
//! let error = CodecError::with_cause("not an integer", cause);
//!
//! assert_eq!(error.message(), "not an integer");
//! assert!(error.cause().is_some());
//! ```

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

type Cause = Arc<dyn StdError + Send + Sync + 'static>;

/// A typed failure produced by a transform.
///
/// `CodecError` is immutable once created. The optional cause is held behind
/// an `Arc` so the error stays `Clone`, which lets re-evaluable values such as
/// [`raise_error`](crate::func::point::raise_error) hand out the same failure
/// every time they run.
///
/// Two errors are equal when their messages are equal and their causes render
/// to the same text.
#[derive(Clone, Error)]
#[error("{message}")]
pub struct CodecError {
    message: String,
    #[source]
    cause: Option<Cause>,
}

impl CodecError {
    /// Creates an error with a message and no underlying cause.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bijector::CodecError;
    ///
    /// let error = CodecError::new("empty input");
    /// assert_eq!(error.to_string(), "empty input");
    /// ```
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    /// Creates an error wrapping an underlying cause.
    #[must_use]
    pub fn with_cause<C>(message: impl Into<String>, cause: C) -> Self
    where
        C: StdError + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            cause: Some(Arc::new(cause)),
        }
    }

    /// Wraps a cause, reusing its rendering as the message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bijector::CodecError;
    ///
    /// let cause = "x".parse::<u8>().unwrap_err();
    /// let error = CodecError::wrap(cause.clone());
    /// assert_eq!(error.message(), cause.to_string());
    /// ```
    #[must_use]
    pub fn wrap<C>(cause: C) -> Self
    where
        C: StdError + Send + Sync + 'static,
    {
        Self {
            message: cause.to_string(),
            cause: Some(Arc::new(cause)),
        }
    }

    /// Returns the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the wrapped cause, if any.
    #[must_use]
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Returns `true` if the wrapped cause is of type `C`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::num::ParseIntError;
    /// use bijector::CodecError;
    ///
    /// let error = CodecError::wrap("bar".parse::<i32>().unwrap_err());
    /// assert!(error.is_caused_by::<ParseIntError>());
    /// ```
    #[must_use]
    pub fn is_caused_by<C>(&self) -> bool
    where
        C: StdError + 'static,
    {
        self.cause
            .as_ref()
            .is_some_and(|cause| cause.downcast_ref::<C>().is_some())
    }
}

impl fmt::Debug for CodecError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = formatter.debug_struct("CodecError");
        debug.field("message", &self.message);
        match &self.cause {
            Some(cause) => debug.field("cause", &cause.to_string()).finish(),
            None => debug.finish(),
        }
    }
}

impl PartialEq for CodecError {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message
            && self.cause.as_ref().map(ToString::to_string)
                == other.cause.as_ref().map(ToString::to_string)
    }
}

impl Eq for CodecError {}

impl From<std::num::ParseIntError> for CodecError {
    fn from(error: std::num::ParseIntError) -> Self {
        Self::wrap(error)
    }
}

impl From<std::string::FromUtf8Error> for CodecError {
    fn from(error: std::string::FromUtf8Error) -> Self {
        Self::with_cause("invalid UTF-8", error)
    }
}

#[cfg(feature = "registry")]
impl From<bincode::Error> for CodecError {
    fn from(error: bincode::Error) -> Self {
        Self::with_cause(format!("bincode: {error}"), error)
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for CodecError {
    fn from(error: serde_json::Error) -> Self {
        Self::with_cause(format!("json: {error}"), error)
    }
}

/// Errors raised while loading configuration from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An environment variable holds a value that cannot be used.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue {
        /// The name of the environment variable.
        key: String,
        /// Description of why the value is invalid.
        message: String,
    },
}
