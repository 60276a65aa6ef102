//! JSON through `serde_json`.
//!
//! The three adapters differ only in the representation on the right-hand
//! side: text, UTF-8 bytes, or a [`serde_json::Value`] tree. Failures keep
//! the `serde_json::Error` as their cause.
//!
//! # Examples
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use bijector::adapters::json_string;
//! use bijector::effect::Immediate;
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Runway {
//!     designator: String,
//!     length_m: u32,
//! }
//!
//! let codec = json_string::<Runway>();
//! let runway = Runway { designator: "09L".to_string(), length_m: 3902 };
//!
//! let text = codec.apply::<Immediate>(runway).unwrap();
//! assert_eq!(text, r#"{"designator":"09L","length_m":3902}"#);
//! assert!(codec.unapply::<Immediate>("{".to_string()).is_err());
//! ```

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::bijection::{Bijection, from_partial};
use crate::effect::Data;
use crate::error::CodecError;
use crate::func::Func;

/// `T <-> String` as JSON text.
#[must_use]
pub fn json_string<T>() -> Bijection<
    T,
    String,
    impl Func<T, String, Error = CodecError>,
    impl Func<String, T, Error = CodecError>,
>
where
    T: Serialize + DeserializeOwned + Data,
{
    from_partial(
        |value: T| serde_json::to_string(&value).map_err(CodecError::from),
        |text: String| serde_json::from_str(&text).map_err(CodecError::from),
    )
}

/// `T <-> Vec<u8>` as UTF-8 encoded JSON.
#[must_use]
pub fn json_bytes<T>() -> Bijection<
    T,
    Vec<u8>,
    impl Func<T, Vec<u8>, Error = CodecError>,
    impl Func<Vec<u8>, T, Error = CodecError>,
>
where
    T: Serialize + DeserializeOwned + Data,
{
    from_partial(
        |value: T| serde_json::to_vec(&value).map_err(CodecError::from),
        |bytes: Vec<u8>| serde_json::from_slice(&bytes).map_err(CodecError::from),
    )
}

/// `T <-> serde_json::Value`.
#[must_use]
pub fn json_value<T>() -> Bijection<
    T,
    Value,
    impl Func<T, Value, Error = CodecError>,
    impl Func<Value, T, Error = CodecError>,
>
where
    T: Serialize + DeserializeOwned + Data,
{
    from_partial(
        |value: T| serde_json::to_value(&value).map_err(CodecError::from),
        |tree: Value| serde_json::from_value(tree).map_err(CodecError::from),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{Deferred, Immediate};
    use rstest::rstest;
    use serde::Deserialize;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Gate {
        terminal: char,
        number: u16,
    }

    #[rstest]
    fn json_bytes_round_trips() {
        let codec = json_bytes::<Gate>();
        let gate = Gate {
            terminal: 'B',
            number: 12,
        };

        let bytes = codec.apply::<Immediate>(gate.clone()).unwrap();
        assert_eq!(codec.unapply::<Deferred>(bytes).run(), Ok(gate));
    }

    #[rstest]
    fn json_value_builds_a_tree() {
        let codec = json_value::<BTreeMap<String, u8>>();
        let tree = codec
            .apply::<Immediate>(BTreeMap::from([("a".to_string(), 1)]))
            .unwrap();
        assert_eq!(tree, json!({ "a": 1 }));
    }

    #[rstest]
    fn json_errors_keep_their_cause() {
        let error = json_string::<Gate>()
            .unapply::<Immediate>(r#"{"terminal":"B"}"#.to_string())
            .unwrap_err();
        assert!(error.is_caused_by::<serde_json::Error>());
        assert!(error.message().starts_with("json: "));
    }
}
