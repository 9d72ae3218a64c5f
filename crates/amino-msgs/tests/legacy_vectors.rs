//! # Legacy Wire Vectors
//!
//! Replays encodings captured from the legacy implementation and checks the
//! codec-wide laws (determinism, omission, flattening, quoting of wide
//! integers, failure on unregistered types) against the full message
//! catalogue.

use std::sync::{Arc, Once};

use amino_core::{sort_json, CodecConfig, EncodingError, LegacyCodec, Message, RegistryError};
use amino_msgs::crypto::{Ed25519PubKey, LegacyAminoPubKey, Secp256k1PubKey};
use amino_msgs::{gov_v1, gov_v1beta1, group, legacy_codec};
use proptest::prelude::*;
use serde_json::Value;

static TRACING: Once = Once::new();

/// Helper: route codec logs to the test harness. `RUST_LOG` selects levels.
fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Helper: codec over the full catalogue with default settings.
fn codec() -> LegacyCodec {
    init_tracing();
    legacy_codec(CodecConfig::default()).unwrap()
}

/// Helper: marshal, then pass through the canonicalizer once more the way
/// legacy callers did before signing.
fn legacy_json(message: &dyn Message) -> String {
    let raw = codec().marshal_json(message).unwrap();
    let sorted = sort_json(&raw).unwrap();
    assert_eq!(sorted.as_bytes(), raw.as_slice(), "marshal output is already canonical");
    String::from_utf8(sorted.into_vec()).unwrap()
}

// -- Captured Vectors ---------------------------------------------------------

#[test]
fn test_group_msg_vote_zero() {
    assert_eq!(
        legacy_json(&group::MsgVote::default()),
        r#"{"type":"cosmos-sdk/group/MsgVote","value":{}}"#
    );
}

#[test]
fn test_gov_v1_msg_vote_zero_keeps_proposal_id() {
    assert_eq!(
        legacy_json(&gov_v1::MsgVote::default()),
        r#"{"type":"cosmos-sdk/v1/MsgVote","value":{"proposal_id":"0"}}"#
    );
}

#[test]
fn test_secp256k1_pub_key_flattens() {
    assert_eq!(
        legacy_json(&Secp256k1PubKey { key: vec![1] }),
        r#"{"type":"tendermint/PubKeySecp256k1","value":"AQ=="}"#
    );
}

#[test]
fn test_ed25519_pub_key_flattens() {
    assert_eq!(
        legacy_json(&Ed25519PubKey { key: vec![1] }),
        r#"{"type":"tendermint/PubKeyEd25519","value":"AQ=="}"#
    );
}

#[test]
fn test_multisig_threshold_as_string() {
    let key = LegacyAminoPubKey {
        threshold: 2,
        public_keys: Vec::new(),
    };
    assert_eq!(
        legacy_json(&key),
        r#"{"type":"tendermint/PubKeyMultisigThreshold","value":{"pubkeys":[],"threshold":"2"}}"#
    );
}

#[test]
fn test_gov_v1beta1_genesis_default() {
    assert_eq!(
        legacy_json(&gov_v1beta1::GenesisState::default()),
        r#"{"deposit_params":{},"deposits":null,"proposals":null,"tally_params":{},"votes":null,"voting_params":{}}"#
    );
}

#[test]
fn test_gov_v1_genesis_default() {
    assert_eq!(legacy_json(&gov_v1::GenesisState::default()), "{}");
}

#[test]
fn test_gov_v1_deposit_params_default() {
    assert_eq!(legacy_json(&gov_v1::DepositParams::default()), "{}");
}

#[test]
fn test_gov_v1_deposit_default() {
    assert_eq!(legacy_json(&gov_v1::Deposit::default()), r#"{"amount":null}"#);
}

// -- Failure Modes ------------------------------------------------------------

#[test]
fn test_unregistered_member_key_fails_without_output() {
    let key = LegacyAminoPubKey {
        threshold: 1,
        public_keys: vec![Box::new(gov_v1::TallyParams::default())],
    };
    let err = codec().marshal_json(&key).unwrap_err();
    match err {
        EncodingError::Registry(RegistryError::UnregisteredType { full_name }) => {
            assert_eq!(full_name, "cosmos.gov.v1.TallyParams");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_marshal_interface_requires_registration() {
    let err = codec()
        .marshal_interface(&gov_v1::DepositParams::default())
        .unwrap_err();
    assert!(matches!(
        err,
        EncodingError::Registry(RegistryError::UnregisteredType { .. })
    ));
}

#[test]
fn test_unregistered_top_level_encodes_bare() {
    let params = gov_v1::TallyParams {
        quorum: "0.334".into(),
        ..gov_v1::TallyParams::default()
    };
    assert_eq!(legacy_json(&params), r#"{"quorum":"0.334"}"#);
}

// -- Configuration ------------------------------------------------------------

#[test]
fn test_codec_from_yaml_config() {
    init_tracing();
    let config = CodecConfig::from_yaml_str("escape_html: false\nmax_depth: 1\n").unwrap();
    let codec = legacy_codec(config).unwrap();

    let params = gov_v1::TallyParams {
        quorum: "<q>".into(),
        ..gov_v1::TallyParams::default()
    };
    assert_eq!(codec.marshal_json(&params).unwrap(), br#"{"quorum":"<q>"}"#.to_vec());

    // An envelope is one more container level than the sorter allows.
    assert!(matches!(
        codec.marshal_json(&gov_v1::MsgVote::default()),
        Err(EncodingError::Canonicalization(_))
    ));

    // The member key sits one message level below the multisig key.
    let nested = LegacyAminoPubKey {
        threshold: 1,
        public_keys: vec![Box::new(Ed25519PubKey { key: vec![1] })],
    };
    assert!(matches!(
        codec.marshal_json(&nested),
        Err(EncodingError::DepthExceeded(1))
    ));
}

// -- Concurrency --------------------------------------------------------------

#[test]
fn test_shared_codec_across_threads() {
    let codec = Arc::new(codec());
    let expected = codec.marshal_json(&gov_v1::MsgVote::default()).unwrap();

    std::thread::scope(|scope| {
        for _ in 0..8 {
            let codec = Arc::clone(&codec);
            let expected = &expected;
            scope.spawn(move || {
                for _ in 0..50 {
                    let out = codec.marshal_json(&gov_v1::MsgVote::default()).unwrap();
                    assert_eq!(&out, expected);
                }
            });
        }
    });
}

// -- Properties ---------------------------------------------------------------

fn vote_option() -> impl Strategy<Value = gov_v1beta1::VoteOption> {
    prop_oneof![
        Just(gov_v1beta1::VoteOption::Unspecified),
        Just(gov_v1beta1::VoteOption::Yes),
        Just(gov_v1beta1::VoteOption::Abstain),
        Just(gov_v1beta1::VoteOption::No),
        Just(gov_v1beta1::VoteOption::NoWithVeto),
    ]
}

proptest! {
    #[test]
    fn prop_encoding_is_deterministic(
        proposal_id in any::<u64>(),
        voter in "[a-z0-9]{0,20}",
        option in vote_option(),
        metadata in ".{0,16}",
    ) {
        let vote = gov_v1::MsgVote { proposal_id, voter, option, metadata };
        let codec = codec();
        let first = codec.marshal_json(&vote).unwrap();
        let second = codec.marshal_json(&vote).unwrap();
        prop_assert_eq!(&first, &second);
        let resorted = sort_json(&first).unwrap();
        prop_assert_eq!(resorted.as_bytes(), first.as_slice());
    }

    #[test]
    fn prop_threshold_is_quoted_decimal(threshold in any::<u32>()) {
        let key = LegacyAminoPubKey { threshold, public_keys: Vec::new() };
        let out: Value = serde_json::from_slice(&codec().marshal_json(&key).unwrap()).unwrap();
        prop_assert_eq!(&out["value"]["threshold"], &Value::String(threshold.to_string()));
    }

    #[test]
    fn prop_single_key_value_is_bare_string(key in proptest::collection::vec(any::<u8>(), 0..64)) {
        let out: Value = serde_json::from_slice(
            &codec().marshal_json(&Secp256k1PubKey { key }).unwrap(),
        ).unwrap();
        prop_assert!(out["value"].is_string());
    }

    #[test]
    fn prop_zero_nullable_params_omitted(
        deposit in any::<bool>(),
        voting in any::<bool>(),
        tally in any::<bool>(),
    ) {
        let genesis = gov_v1::GenesisState {
            deposit_params: deposit.then(gov_v1::DepositParams::default),
            voting_params: voting.then(gov_v1::VotingParams::default),
            tally_params: tally.then(gov_v1::TallyParams::default),
            ..gov_v1::GenesisState::default()
        };
        prop_assert_eq!(legacy_json(&genesis), "{}");
    }

    #[test]
    fn prop_wide_integers_quoted(period in 1i64..i64::MAX) {
        let params = gov_v1::DepositParams {
            min_deposit: Vec::new(),
            max_deposit_period: Some(period),
        };
        let out: Value = serde_json::from_slice(&codec().marshal_json(&params).unwrap()).unwrap();
        prop_assert_eq!(&out["max_deposit_period"], &Value::String(period.to_string()));
    }
}
