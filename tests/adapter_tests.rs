#![cfg(feature = "json")]
//! Integration tests for the JSON and bit-vector adapters composed with the
//! standard bijections.

use std::collections::BTreeMap;

use bijector::CodecError;
use bijector::adapters::{bit_vector, json_bytes, json_string, json_value};
use bijector::bijection::standard::utf8;
use bijector::effect::{Deferred, Immediate};
use proptest::prelude::*;
use rstest::{fixture, rstest};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Flight {
    number: String,
    delayed: bool,
    gates: BTreeMap<String, u8>,
}

#[fixture]
fn flight() -> Flight {
    Flight {
        number: "NH106".to_string(),
        delayed: false,
        gates: BTreeMap::from([("departure".to_string(), 61), ("arrival".to_string(), 148)]),
    }
}

// =============================================================================
// JSON
// =============================================================================

#[rstest]
fn json_string_then_utf8_matches_json_bytes(flight: Flight) {
    let through_text = json_string::<Flight>().and_then(utf8());
    let direct = json_bytes::<Flight>();

    let via_text = through_text.apply::<Immediate>(flight.clone()).unwrap();
    assert_eq!(direct.apply::<Immediate>(flight.clone()), Ok(via_text.clone()));
    assert_eq!(direct.unapply::<Deferred>(via_text).run(), Ok(flight));
}

#[rstest]
fn json_value_exposes_the_tree(flight: Flight) {
    let codec = json_value::<Flight>();
    let tree = codec.apply::<Immediate>(flight.clone()).unwrap();

    assert_eq!(tree["number"], Value::from("NH106"));
    assert_eq!(tree["gates"]["arrival"], Value::from(148));
    assert_eq!(codec.unapply::<Immediate>(tree), Ok(flight));
}

#[rstest]
#[case(r#"{"number":"NH106"}"#)]
#[case(r#"{"number":7,"delayed":false,"gates":{}}"#)]
#[case("[]")]
fn json_string_rejects_mismatched_documents(#[case] text: &str) {
    let error = json_string::<Flight>()
        .unapply::<Immediate>(text.to_string())
        .unwrap_err();

    assert!(error.message().starts_with("json: "));
    assert!(error.is_caused_by::<serde_json::Error>());
}

#[rstest]
fn invalid_utf8_fails_before_json_parsing() {
    let codec = json_string::<Flight>().and_then(utf8());
    let error = codec.unapply::<Immediate>(vec![b'{', 0xff]).unwrap_err();
    assert!(error.is_caused_by::<std::string::FromUtf8Error>());
}

// =============================================================================
// Bit Vectors
// =============================================================================

#[rstest]
fn json_bytes_survive_a_bit_vector_hop(flight: Flight) {
    let wire = json_bytes::<Flight>().and_then(bit_vector());

    let bits = wire.apply::<Immediate>(flight.clone()).unwrap();
    assert_eq!(bits.len() % 8, 0);
    assert_eq!(wire.unapply::<Immediate>(bits), Ok(flight));
}

#[rstest]
fn partial_bytes_fail_to_pack() {
    let error: CodecError = bit_vector()
        .unapply::<Immediate>(vec![true; 12])
        .unwrap_err();
    assert_eq!(error.message(), "12 bits do not form whole bytes");
}

proptest! {
    #[test]
    fn prop_bit_vector_round_trips(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let codec = bit_vector();
        let bits = codec.apply::<Immediate>(bytes.clone()).unwrap();
        prop_assert_eq!(bits.len(), bytes.len() * 8);
        prop_assert_eq!(codec.unapply::<Immediate>(bits), Ok(bytes));
    }

    #[test]
    fn prop_json_string_round_trips(values in prop::collection::vec(any::<i64>(), 0..16)) {
        let codec = json_string::<Vec<i64>>();
        let text = codec.apply::<Immediate>(values.clone()).unwrap();
        prop_assert_eq!(codec.unapply::<Immediate>(text), Ok(values));
    }
}
