//! Integration tests for the codec registry.

use std::sync::Arc;

use bijector::CodecError;
use bijector::effect::{Deferred, Immediate};
use bijector::registry::{
    CodecConfig, FunctionHint, IntegerEncoding, RegistryBuilder, TYPE_TAG_LEN, TrailingBytes,
};
use rstest::{fixture, rstest};
use serde::{Deserialize, Serialize};

// =============================================================================
// Fixtures
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Aircraft {
    tail_number: String,
    seats: u16,
    engines: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Fuel(u32);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Altitude(i32);

#[derive(Debug, Clone, PartialEq)]
struct Callsign(String);

#[fixture]
fn aircraft() -> Aircraft {
    Aircraft {
        tail_number: "JA8089".to_string(),
        seats: 416,
        engines: vec!["CF6-80C2".to_string(); 4],
    }
}

fn callsign_hint() -> FunctionHint<
    impl Fn(&Callsign) -> Result<Vec<u8>, CodecError> + Send + Sync + 'static,
    impl Fn(&[u8]) -> Result<Callsign, CodecError> + Send + Sync + 'static,
> {
    FunctionHint::new(
        |callsign: &Callsign| Ok(callsign.0.as_bytes().to_vec()),
        |bytes: &[u8]| {
            String::from_utf8(bytes.to_vec())
                .map(Callsign)
                .map_err(CodecError::from)
        },
    )
}

// =============================================================================
// Round Trips
// =============================================================================

#[rstest]
fn structural_and_value_types_round_trip(aircraft: Aircraft) {
    let registry = RegistryBuilder::new()
        .register_value::<Fuel>()
        .register_structural::<Aircraft>()
        .seal::<Immediate>()
        .unwrap();

    let bytes = registry.encode::<Aircraft, _>(aircraft.clone()).unwrap();
    assert_eq!(registry.decode::<Aircraft, _>(bytes), Ok(aircraft));

    let bytes = registry.encode::<Fuel, _>(Fuel(18_000)).unwrap();
    assert_eq!(bytes.len(), TYPE_TAG_LEN + 4);
    assert_eq!(registry.decode::<Fuel, _>(bytes), Ok(Fuel(18_000)));
}

#[rstest]
fn function_hint_round_trips_under_deferred() {
    let registry = RegistryBuilder::new()
        .register::<Callsign, _>(callsign_hint())
        .seal::<Deferred>()
        .unwrap();

    let codec = registry.codec_for::<Callsign, _>();
    let bytes = codec.apply::<Deferred>(Callsign("SPEEDBIRD".to_string())).run().unwrap();
    assert_eq!(&bytes[TYPE_TAG_LEN..], b"SPEEDBIRD");
    assert_eq!(
        codec.unapply::<Deferred>(bytes).run(),
        Ok(Callsign("SPEEDBIRD".to_string()))
    );
}

// =============================================================================
// Type Safety
// =============================================================================

#[rstest]
fn bytes_of_one_type_do_not_decode_as_another(aircraft: Aircraft) {
    let registry = RegistryBuilder::new()
        .register_value::<Fuel>()
        .register_value::<Altitude>()
        .register_structural::<Aircraft>()
        .seal::<Immediate>()
        .unwrap();

    let fuel = registry.encode::<Fuel, _>(Fuel(1200)).unwrap();
    let error = registry.decode::<Altitude, _>(fuel.clone()).unwrap_err();
    assert!(error.message().starts_with("type tag mismatch"));
    assert!(registry.decode::<Aircraft, _>(fuel).is_err());

    let encoded = registry.encode::<Aircraft, _>(aircraft).unwrap();
    assert!(registry.decode::<Fuel, _>(encoded).is_err());
}

#[rstest]
#[case(CodecConfig::default())]
#[case(CodecConfig::default().with_trailing_bytes(TrailingBytes::Allow))]
#[case(CodecConfig::default().with_integer_encoding(IntegerEncoding::Varint))]
#[case(CodecConfig::default().with_max_payload_bytes(4))]
fn same_width_values_stay_apart_under_every_configuration(#[case] config: CodecConfig) {
    let registry = RegistryBuilder::with_config(config)
        .register_value::<Fuel>()
        .register_value::<Altitude>()
        .seal::<Immediate>()
        .unwrap();

    let fuel = registry.encode::<Fuel, _>(Fuel(4_000_000_000)).unwrap();
    let error = registry.decode::<Altitude, _>(fuel.clone()).unwrap_err();
    assert!(error.message().starts_with("type tag mismatch"));
    assert_eq!(registry.decode::<Fuel, _>(fuel), Ok(Fuel(4_000_000_000)));
}

#[rstest]
fn truncated_payload_is_rejected() {
    let registry = RegistryBuilder::new()
        .register_value::<Fuel>()
        .seal::<Immediate>()
        .unwrap();

    let error = registry.decode::<Fuel, _>(vec![1, 2, 3]).unwrap_err();
    assert!(error.message().contains("too short"));

    let mut bytes = registry.encode::<Fuel, _>(Fuel(7)).unwrap();
    bytes.truncate(TYPE_TAG_LEN + 2);
    assert!(registry.decode::<Fuel, _>(bytes).is_err());
}

#[rstest]
fn duplicate_registration_is_rejected() {
    let error = RegistryBuilder::new()
        .register_value::<Fuel>()
        .register_structural::<Aircraft>()
        .register_structural::<Fuel>()
        .seal::<Immediate>()
        .unwrap_err();

    assert!(error.message().ends_with("is registered more than once"));
    assert!(error.message().contains("Fuel"));
}

// =============================================================================
// Configuration
// =============================================================================

#[rstest]
fn varint_payloads_follow_the_tag() {
    let config = CodecConfig::default().with_integer_encoding(IntegerEncoding::Varint);
    let registry = RegistryBuilder::with_config(config)
        .register_structural::<u64>()
        .seal::<Immediate>()
        .unwrap();

    let bytes = registry.encode::<u64, _>(5).unwrap();
    assert_eq!(&bytes[TYPE_TAG_LEN..], &[5]);
    assert_eq!(registry.decode::<u64, _>(bytes), Ok(5));
    assert!(registry.decode::<u64, _>(vec![5]).is_err());
}

#[rstest]
#[case(TrailingBytes::Reject, false)]
#[case(TrailingBytes::Allow, true)]
fn trailing_bytes_follow_the_configured_policy(
    #[case] policy: TrailingBytes,
    #[case] accepted: bool,
) {
    let registry = RegistryBuilder::with_config(CodecConfig::default().with_trailing_bytes(policy))
        .register_value::<Altitude>()
        .seal::<Immediate>()
        .unwrap();

    let mut bytes = registry.encode::<Altitude, _>(Altitude(-120)).unwrap();
    bytes.push(0);
    assert_eq!(registry.decode::<Altitude, _>(bytes).is_ok(), accepted);
}

#[rstest]
fn payload_limit_rejects_large_values(aircraft: Aircraft) {
    let registry = RegistryBuilder::with_config(CodecConfig::default().with_max_payload_bytes(16))
        .register_structural::<Aircraft>()
        .seal::<Immediate>()
        .unwrap();

    assert!(registry.encode::<Aircraft, _>(aircraft).is_err());
}

#[rstest]
fn payload_limit_applies_when_decoding() {
    let unbounded = RegistryBuilder::new()
        .register_structural::<String>()
        .seal::<Immediate>()
        .unwrap();
    let bounded = RegistryBuilder::with_config(CodecConfig::default().with_max_payload_bytes(4))
        .register_structural::<String>()
        .seal::<Immediate>()
        .unwrap();

    let bytes = unbounded
        .encode::<String, _>("far too long for the limit".to_string())
        .unwrap();
    let error = bounded.decode::<String, _>(bytes).unwrap_err();
    assert!(error.message().contains("exceeds the limit of 4 bytes"));
}

#[rstest]
fn configuration_loads_from_a_lookup() {
    let config = CodecConfig::from_lookup(|key| match key {
        "BIJECTOR_TRAILING_BYTES" => Some("allow".to_string()),
        "BIJECTOR_INTEGER_ENCODING" => Some("fixed".to_string()),
        _ => None,
    })
    .unwrap();

    assert_eq!(config.trailing_bytes, TrailingBytes::Allow);
    assert_eq!(config.integer_encoding, IntegerEncoding::Fixed);
    assert_eq!(config.max_payload_bytes, CodecConfig::default().max_payload_bytes);
}

// =============================================================================
// Concurrency
// =============================================================================

#[rstest]
fn sealed_registry_serves_many_threads(aircraft: Aircraft) {
    let registry = Arc::new(
        RegistryBuilder::new()
            .register_value::<Fuel>()
            .register_structural::<Aircraft>()
            .seal::<Immediate>()
            .unwrap(),
    );

    let handles: Vec<_> = (0..8_u32)
        .map(|index| {
            let registry = Arc::clone(&registry);
            let mut aircraft = aircraft.clone();
            aircraft.seats = u16::try_from(index).unwrap();
            std::thread::spawn(move || {
                let fuel = registry.encode::<Fuel, _>(Fuel(index)).unwrap();
                let encoded = registry.encode::<Aircraft, _>(aircraft.clone()).unwrap();
                (
                    registry.decode::<Fuel, _>(fuel) == Ok(Fuel(index)),
                    registry.decode::<Aircraft, _>(encoded) == Ok(aircraft),
                )
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), (true, true));
    }
}

#[cfg(feature = "async")]
#[tokio::test]
async fn codecs_run_as_spawned_futures() {
    use bijector::effect::Asynchronous;

    let registry = RegistryBuilder::new()
        .register_value::<Altitude>()
        .seal::<Asynchronous>()
        .unwrap();

    let bytes = tokio::spawn(registry.encode::<Altitude, _>(Altitude(3500)))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(registry.decode::<Altitude, _>(bytes).await, Ok(Altitude(3500)));
}
