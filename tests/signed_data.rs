//! Integration test: signed data via the public API
//!
//! Checks message roots against known answers computed by an independent SSZ
//! implementation, and the copy-on-sign behaviour every kind must have.
//!
//! Run with: `cargo test --features test-utils`

#![cfg(feature = "test-utils")]

use dv_core::signeddata::{
    hash_message_roots, Attestation, SignedVoluntaryExit, VersionedSignedBeaconBlock,
};
use dv_core::test_utils::{fixtures, hex_to_root, FixtureLoader};
use dv_core::types::RawVersionedSignedBeaconBlock;
use dv_core::{AnySignedData, ParSignedData, Signature, SignedData};
use ssz::{Decode, Encode};

fn known_root(fixture: &serde_json::Value, key: &str) -> dv_core::Root {
    hex_to_root(fixture[key].as_str().expect("root is a string")).expect("valid root")
}

#[test]
fn test_phase0_block_known_answer() {
    let fixture = FixtureLoader::default_dir()
        .load_value("phase0_block")
        .expect("Failed to load phase0_block.json");

    let block: VersionedSignedBeaconBlock =
        serde_json::from_value(fixture["block"].clone()).expect("Failed to decode envelope");
    let built =
        VersionedSignedBeaconBlock::new(RawVersionedSignedBeaconBlock::phase0(fixtures::phase0_block(1)))
            .expect("phase0 payload present");
    assert_eq!(block, built);

    let roots = block.message_roots().expect("block has a root");
    assert_eq!(roots, vec![known_root(&fixture, "message_root")]);

    let placeholder = Signature::new(vec![0u8; 96]);
    let signed = block
        .set_signatures(&[placeholder.clone()])
        .expect("one signature fits");
    assert_eq!(signed.signatures(), vec![placeholder]);
    assert_eq!(block, built);

    // Re-encoding yields the fixture's JSON exactly.
    let value = serde_json::to_value(&block).expect("encode");
    assert_eq!(value, fixture["block"]);
}

#[test]
fn test_nested_known_answers() {
    let fixture = FixtureLoader::default_dir()
        .load_value("phase0_block")
        .expect("Failed to load phase0_block.json");

    let att = Attestation::new(fixtures::attestation(1));
    assert_eq!(
        att.message_roots().unwrap(),
        vec![known_root(&fixture, "attestation_data_root")]
    );

    let exit = SignedVoluntaryExit::new(fixtures::voluntary_exit(4, 8));
    assert_eq!(
        exit.message_roots().unwrap(),
        vec![known_root(&fixture, "exit_message_root")]
    );
}

#[test]
fn test_signing_never_touches_original() {
    let share = Signature::new(vec![0x55; 96]);
    for data in fixtures::all_signed_data() {
        let copy = data.clone();
        assert_eq!(copy, data);

        let before = data.signatures();
        let signed = copy.set_signatures(&[share.clone()]).expect("one signature fits");
        assert_eq!(signed.signatures(), vec![share.clone()], "{}", data.kind_name());
        assert_eq!(data.signatures(), before, "{}", data.kind_name());
        assert_eq!(copy, data, "{}", data.kind_name());
    }
}

#[test]
fn test_surplus_signature_strictness() {
    let sigs = [Signature::new(vec![1; 96]), Signature::new(vec![2; 96])];
    let strict = [
        "beacon_committee_selection",
        "aggregate_and_proof",
        "sync_message",
    ];

    for data in fixtures::all_signed_data() {
        let result = data.set_signatures(&sigs);
        if strict.contains(&data.kind_name()) {
            assert!(result.unwrap_err().is_validation(), "{}", data.kind_name());
        } else {
            let signed = result.expect("surplus is ignored");
            assert_eq!(signed.signatures(), vec![sigs[0].clone()], "{}", data.kind_name());
        }
    }
}

#[test]
fn test_block_ssz_frame_round_trip() {
    let block = VersionedSignedBeaconBlock::new(RawVersionedSignedBeaconBlock::phase0(
        fixtures::phase0_block(1),
    ))
    .unwrap();
    let bytes = block.as_ssz_bytes();
    assert_eq!(&bytes[..8], &1u64.to_le_bytes());
    assert_eq!(VersionedSignedBeaconBlock::from_ssz_bytes(&bytes).unwrap(), block);
}

#[test]
fn test_partial_envelope() {
    let par = ParSignedData::new_block(
        RawVersionedSignedBeaconBlock::phase0(fixtures::phase0_block(1)),
        2,
    )
    .expect("phase0 payload present");
    assert_eq!(par.share_idx, 2);
    assert!(matches!(par.signed_data, AnySignedData::Block(_)));
    assert_eq!(
        hash_message_roots(&par.signed_data).unwrap(),
        par.signed_data.message_roots().unwrap()[0]
    );
}
