//! Regression fixtures covering every backend/version pairing.
//!
//! Progressive decode has no format tag to go on. These ids pin which
//! backend accepts each historic shape and what it upgrades to.

use build_id_core::layout;
use build_id_core::{Backend, CodecError, CURRENT_BUILD_VERSION};

use super::helpers::{codec, values, ARMOUR, V3_FIXTURE};

struct Fixture {
    name: &'static str,
    id: &'static str,
    backend: Backend,
    values: Vec<u64>,
    upgraded: &'static str,
    was_upgraded: bool,
}

const UPGRADED_PLAIN: &str = "MqLUgSvUiqhUK0eq9DujhroHTnBbWmgmvAf9L6uWkTTHveKxA-KSWl6";
const UPGRADED_REPEATER: &str = "45FUrQ58kUH14Vl_Ea34VlfV2EG-7mE~wyHxiVqTq1kvBqoNj2VRm";
const UPGRADED_V4: &str = "_1ZMACx9O~CXcyXVUsdziofgP4Hk~WPqoTMKB7PUgOtz5_VZbARD8Pz";
const UPGRADED_V5: &str = "9OpV1Xkwj7QrKWiBzHSC-eKp1YRTAJbSL4lRcUl7ueWgl0KmZxYLpu3G";
const UPGRADED_V3_FIXTURE: &str = "EZ-l0fHsdAZYnNNJCO_IQgMBpWWNj~c9UM~1wjp4i7q6XWY5hth1z7W";
const V8_ID: &str = "jzwkxXvajJQe54jABUBC43r7V_qNSzwZyougjr4iSdqMeaFCOYWuYqh-K";
const V8_REROLLED_ID: &str = "-xaXjbx3oKmaY4Ukw4sc1H4c4e5_hEbeCXDViVM8TBSjEF0y-IfA2flBE5D";

fn fixtures() -> Vec<Fixture> {
    vec![
        Fixture {
            name: "v2",
            id: "LAt61sECw4sOvcPOH6CBXTAFAC3FMZhbCROu3tQCnAcMCQY",
            backend: Backend::Legacy,
            values: values(&[&[2, 67, 15, 96, 75], &ARMOUR, &[1, 123]]),
            upgraded: UPGRADED_PLAIN,
            was_upgraded: false,
        },
        Fixture {
            name: "v2 repeater",
            id: "MMtLT4s6qIY6ckUzCPcotBS6Ugh1FqKHRCRaFEFkCEFrOhjCRmTBtgCQns2Ce2",
            backend: Backend::Legacy,
            values: values(&[&[2, 14, 12, 96, 75, 3, 1, 5, 2, 7, 3, 9, 4], &ARMOUR, &[1, 123]]),
            upgraded: UPGRADED_REPEATER,
            was_upgraded: true,
        },
        Fixture {
            name: "v3",
            id: V3_FIXTURE,
            backend: Backend::Legacy,
            values: values(&[&[3, 67, 15, 96, 75, 4, 1, 0, 0, 0, 0], &ARMOUR, &[1, 123, 0]]),
            upgraded: UPGRADED_V3_FIXTURE,
            was_upgraded: false,
        },
        Fixture {
            name: "v4",
            id: "WjFn4IdC2XC7QtMFwcZTRTPCNTWT7yHaC0RcYFVCaFXxhMCPEU0teCzYcLCpMIn",
            backend: Backend::Legacy,
            values: values(&[&[4, 67, 15, 96, 75, 4, 5, 0, 0, 1, 0, 0], &ARMOUR, &[1, 123, 3]]),
            upgraded: UPGRADED_V4,
            was_upgraded: false,
        },
        Fixture {
            name: "v4 in v5 order",
            id: "npFMOIrCJ4c7ktOFxczTjTKbHoCw4UXFjCkFgwhVC16hKtJCEpTqCwJIP",
            backend: Backend::Legacy,
            values: values(&[&[4, 67, 15, 96, 75, 4, 5, 0, 0], &ARMOUR, &[1, 123, 3]]),
            upgraded: UPGRADED_V4,
            was_upgraded: false,
        },
        Fixture {
            name: "v5",
            id: "pYcajIWCK5FgbcqFocPT8guxaHdCEOSQFzC3FNphZCnvcMt7Cg8cWCZzIz",
            backend: Backend::Legacy,
            values: values(&[&[5, 67, 15, 96, 75, 4, 5, 0, 72], &ARMOUR, &[1, 123, 3]]),
            upgraded: UPGRADED_V5,
            was_upgraded: false,
        },
        Fixture {
            name: "v6",
            id: "NBfdNIxCWzf0XhKFncYTnotJjHYCKkCAFMCoFKZhOCEYUVt7CxLcjCoxI2",
            backend: Backend::Legacy,
            values: values(&[&[6, 67, 15, 96, 75, 4, 5, 0, 72], &ARMOUR, &[1, 123, 3]]),
            upgraded: UPGRADED_V5,
            was_upgraded: false,
        },
        Fixture {
            name: "v7",
            id: "IvjffX.THpPBNsQxBm~BOfL2C8gHADXlAYuV-uwU3dwUxD.Kh!BLURCb",
            backend: Backend::V7,
            values: values(&[&[7, 67, 15, 96, 75, 4, 5, 0, 72], &ARMOUR, &[1, 123, 3]]),
            upgraded: UPGRADED_V5,
            was_upgraded: false,
        },
        Fixture {
            name: "v8",
            id: V8_ID,
            backend: Backend::V8,
            values: values(&[&[8, 67, 115, 96, 75, 4, 5, 0, 72], &ARMOUR, &[1, 123, 3]]),
            upgraded: V8_ID,
            was_upgraded: false,
        },
        // The first sqids candidates for the next two contain blocked words.
        Fixture {
            name: "v7 re-rolled",
            id: "XtACL0~ChVbM1Nag8j8Euuxp3M0mFYoM_7DU2HCX4kLeiyyWIlgewdvq",
            backend: Backend::V7,
            values: vec![
                7, 72, 13, 75, 96, 4, 3, 4, 67, 55, 8, 75, 2, 2, 117, 51, 9, 75, 0, 17, 0, 1, 75, 0,
            ],
            upgraded: "miYDJCJrZvxRNz~LFjFLSxQaw9A3k~XMbRFySXfV-esugxPKoezPuHMr",
            was_upgraded: false,
        },
        Fixture {
            name: "v8 re-rolled",
            id: V8_REROLLED_ID,
            backend: Backend::V8,
            values: vec![
                8, 67, 3, 96, 75, 9, 5, 0, 72, 2, 12, 96, 51, 8, 117, 55, 109, 117, 0, 118, 123, 1,
                117, 3,
            ],
            upgraded: V8_REROLLED_ID,
            was_upgraded: false,
        },
    ]
}

#[test]
fn test_progressive_decode_picks_expected_backend() {
    let codec = codec();
    for fixture in fixtures() {
        let decoded = codec.decode_any(fixture.id).unwrap();
        assert_eq!(decoded.backend, fixture.backend, "{}", fixture.name);
        assert_eq!(decoded.values, fixture.values, "{}", fixture.name);
        assert!(codec.is_valid(fixture.id), "{}", fixture.name);
    }
}

#[test]
fn test_fixtures_reencode_identically() {
    let codec = codec();
    for fixture in fixtures() {
        let id = codec.codecs().encode(&fixture.values, fixture.backend).unwrap();
        assert_eq!(id, fixture.id, "{}", fixture.name);
    }
}

#[test]
fn test_fixtures_upgrade() {
    let codec = codec();
    for fixture in fixtures() {
        let outcome = codec.upgrade_outcome(fixture.id).unwrap();
        assert_eq!(outcome.id, fixture.upgraded, "{}", fixture.name);
        assert_eq!(
            outcome.migrated.was_upgraded, fixture.was_upgraded,
            "{}",
            fixture.name
        );
        assert_eq!(outcome.migrated.version, u64::from(CURRENT_BUILD_VERSION));
    }
}

#[test]
fn test_fixtures_deserialize_cleanly() {
    let codec = codec();
    for fixture in fixtures() {
        let record = codec.deserialize(fixture.id).unwrap();
        assert_eq!(record.schema_version, CURRENT_BUILD_VERSION);
        assert!(!record.is_invalid(), "{}", fixture.name);
        assert_eq!(record.is_upgraded(), fixture.was_upgraded, "{}", fixture.name);
    }
}

#[test]
fn test_rerolled_sequence_decodes_as_current() {
    let id = "zV7dl~ioY-sIrMcNLu~DhMjOhQuQuMARqn_17ndWmKc1LbnXbKdw6ECuYN6ZaObkMBKD";
    let values = vec![
        8, 133, 296, 173, 129, 189, 162, 204, 110, 209, 204, 139, 294, 79, 124, 150, 80, 292, 228,
        93, 38, 44, 231, 42,
    ];

    let codec = codec();
    let decoded = codec.decode_any(id).unwrap();
    assert_eq!(decoded.backend, Backend::V8);
    assert_eq!(decoded.values, values);
    assert_eq!(codec.codecs().encode(&values, Backend::V8).unwrap(), id);
    // Level 296 does not unpack, so no record can be built.
    assert!(matches!(
        codec.deserialize(id),
        Err(CodecError::ValueOutOfRange { value: 296, .. })
    ));
}

#[test]
fn test_v3_fixture_one_step() {
    let codec = codec();
    let outcome = codec.chain().convert_version_3_to_4(V3_FIXTURE).unwrap();
    let values = codec
        .codecs()
        .decode(&outcome.id, Backend::Legacy)
        .unwrap();
    assert_eq!(values[0], 4);
    assert!(!outcome.was_upgraded);
}

#[test]
fn test_v3_fixture_full_chain() {
    let codec = codec();
    let upgraded = codec.upgrade(V3_FIXTURE).unwrap();
    let decoded = codec.decode_any(&upgraded).unwrap();
    assert_eq!(decoded.version(), u64::from(CURRENT_BUILD_VERSION));
    assert!(codec.is_valid(&upgraded));
}

#[test]
fn test_step_by_step_matches_driver() {
    let codec = codec();
    let chain = codec.chain();
    let mut id = "MMtLT4s6qIY6ckUzCPcotBS6Ugh1FqKHRCRaFEFkCEFrOhjCRmTBtgCQns2Ce2".to_string();
    let mut was_upgraded = false;
    for from in 2..CURRENT_BUILD_VERSION {
        let step = chain.convert_version(from, &id).unwrap();
        was_upgraded |= step.was_upgraded;
        id = step.id;
    }
    assert_eq!(id, UPGRADED_REPEATER);
    assert!(was_upgraded);
}

#[test]
fn test_retired_weapon_becomes_successor() {
    let codec = codec();
    let record = codec
        .deserialize("MMtLT4s6qIY6ckUzCPcotBS6Ugh1FqKHRCRaFEFkCEFrOhjCRmTBtgCQns2Ce2")
        .unwrap();
    let named = build_id_core::resolve::describe(&record, codec.registry());
    assert_eq!(named.weapon.name.as_deref(), Some("Ostian Repeaters"));
    assert_eq!(named.weapon.level, 0);
    assert_eq!(named.weapon.cells, [None, None]);
    assert_eq!(
        named.weapon.parts,
        [
            Some("Blaze Barrel".to_string()),
            Some("Hunter's Grip".to_string()),
            Some("Power Surge Mod".to_string()),
        ]
    );
    assert!(named.upgraded);
}

#[test]
fn test_oldest_schema_length_boundary() {
    let codec = codec();
    for len in [18, 19, 20, 26, 27, 28] {
        let mut values = vec![0u64; len];
        values[0] = 2;
        values[1] = 67;
        let id = codec.codecs().encode(&values, Backend::Legacy).unwrap();
        let expected = len == 19 || len == 27;
        assert_eq!(codec.is_valid(&id), expected, "length {}", len);
        assert_eq!(layout::is_valid_length(2, len), expected);
    }
}

#[test]
fn test_invalid_length_is_corrupt() {
    let codec = codec();
    let mut values = vec![0u64; 20];
    values[0] = 2;
    let id = codec.codecs().encode(&values, Backend::Legacy).unwrap();
    let err = codec.deserialize(&id).unwrap_err();
    assert_eq!(err, CodecError::InvalidLength { version: 2, len: 20 });
    assert!(err.is_corrupt_id());
}

#[test]
fn test_future_version_rejected() {
    let codec = codec();
    let values = values(&[&[9, 67, 15, 96, 75, 4, 5, 0, 72], &ARMOUR, &[1, 123, 3]]);
    let id = codec.codecs().encode(&values, Backend::V8).unwrap();
    assert_eq!(
        codec.deserialize(&id),
        Err(CodecError::UnrecognizedVersion(9))
    );
    assert!(!codec.is_valid(&id));
    assert!(codec.upgrade(&id).is_err());
}
