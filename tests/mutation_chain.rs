//! Integration test: mutation log hashing via the public API
//!
//! The expected hashes in `tests/fixtures/mutation.json` were computed by an
//! independent SSZ implementation.
//!
//! Run with: `cargo test --features test-utils`

#![cfg(feature = "test-utils")]

use chrono::{TimeZone, Utc};
use dv_core::state::verify_chain;
use dv_core::test_utils::fixtures::{self, TestData};
use dv_core::test_utils::{hex_to_root, FixtureLoader};
use dv_core::{Merkleized, Mutation, MutationType, Root, SignedMutation};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct MutationFixture {
    parent: Root,
    #[serde(rename = "type")]
    mutation_type: String,
    timestamp: i64,
    data: TestData,
    data_root: String,
    mutation_hash: String,
    signer: String,
    signature: String,
    signed_mutation_hash: String,
}

fn load() -> MutationFixture {
    FixtureLoader::default_dir()
        .load("mutation")
        .expect("Failed to load mutation.json")
}

fn build(fixture: &MutationFixture) -> Mutation<TestData> {
    Mutation::new(
        fixture.parent,
        MutationType::new(fixture.mutation_type.clone()).expect("type within limit"),
        Utc.timestamp_opt(fixture.timestamp, 0).single().expect("valid timestamp"),
        fixture.data.clone(),
    )
}

fn unhex(s: &str) -> Vec<u8> {
    hex::decode(s.trim_start_matches("0x")).expect("valid hex")
}

#[test]
fn test_mutation_hash_known_answer() {
    let fixture = load();

    assert_eq!(
        fixture.data.hash_tree_root().unwrap(),
        hex_to_root(&fixture.data_root).unwrap()
    );

    // Two independently built, field-equal mutations hash identically.
    let a = build(&fixture);
    let b = build(&load());
    let expected = hex_to_root(&fixture.mutation_hash).unwrap();
    assert_eq!(a.hash().unwrap(), expected);
    assert_eq!(b.hash().unwrap(), expected);
}

#[test]
fn test_signed_mutation_known_answer() {
    let fixture = load();
    let signed = SignedMutation::new(
        build(&fixture),
        unhex(&fixture.signer),
        unhex(&fixture.signature),
    )
    .expect("signer and signature within limits");

    assert_eq!(signed.hash, hex_to_root(&fixture.mutation_hash).unwrap());
    assert!(signed.verify_hash().is_ok());
    assert_eq!(
        signed.hash_tree_root().unwrap(),
        hex_to_root(&fixture.signed_mutation_hash).unwrap()
    );
}

#[test]
fn test_chain_verification() {
    let chain = fixtures::mutation_chain(4);
    verify_chain(&chain, Root::ZERO).expect("chain links from genesis");

    for pair in chain.windows(2) {
        assert_eq!(pair[1].mutation.parent, pair[0].hash);
    }

    let mut broken = chain.clone();
    broken[2].hash = Root::repeat_byte(0xff);
    assert!(verify_chain(&broken, Root::ZERO).is_err());
}

#[test]
fn test_signed_mutation_json_round_trip() {
    let chain = fixtures::mutation_chain(1);
    let json = serde_json::to_string(&chain[0]).unwrap();
    let back: SignedMutation<TestData> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, chain[0]);
    assert!(back.verify_hash().is_ok());
}
