//! # Test Utilities (Unstable)
//!
//! **Warning:** This module is not part of the stable public API.
//! It may change or be removed without notice in any version.
//!
//! Deterministic payload builders for every signed data kind, plus a loader
//! for the known-answer JSON fixtures under `tests/fixtures`.
//!
//! Enable with the `test-utils` feature:
//! ```toml
//! [dev-dependencies]
//! dv-core = { version = "0.1", features = ["test-utils"] }
//! ```

use crate::types::primitives::Root;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Builders for wire payloads and signed data values.
///
/// Every builder fills byte fields with a distinct repeated byte so roots and
/// signatures are easy to tell apart in assertions. Signature slots are never
/// `0x42`-filled.
pub mod fixtures {
    use crate::error::Result;
    use crate::merkle::{Hasher, Merkleized};
    use crate::signeddata::{
        AnySignedData, Attestation, BeaconCommitteeSelection, SignedAggregateAndProof,
        SignedRandao, SignedSyncContributionAndProof, SignedSyncMessage, SignedVoluntaryExit,
        Signature, SyncCommitteeSelection, SyncContributionAndProof, VersionedSignedBeaconBlock,
        VersionedSignedBlindedBeaconBlock, VersionedSignedValidatorRegistration,
    };
    use crate::state::{Mutation, MutationType, SignedMutation};
    use crate::types::primitives::{
        BlsPublicKey, BlsSignature, ExecutionAddress, KzgCommitment, Root, Slot, U256,
    };
    use crate::types::{altair, bellatrix, builder, capella, deneb, phase0, selection};
    use chrono::{TimeZone, Utc};
    use serde::{Deserialize, Serialize};
    use ssz_types::{BitList, BitVector};

    fn root(byte: u8) -> Root {
        Root::repeat_byte(byte)
    }

    /// Attestation at `slot` for committee 3 with bits `1010`.
    pub fn attestation(slot: Slot) -> phase0::Attestation {
        let mut bits = BitList::with_capacity(4).expect("4 bits fit the committee limit");
        bits.set(0, true).expect("bit 0 in range");
        bits.set(2, true).expect("bit 2 in range");

        phase0::Attestation {
            aggregation_bits: bits,
            data: phase0::AttestationData {
                slot,
                index: 3,
                beacon_block_root: root(0x09),
                source: phase0::Checkpoint {
                    epoch: 0,
                    root: root(0x0a),
                },
                target: phase0::Checkpoint {
                    epoch: 0,
                    root: root(0x0b),
                },
            },
            signature: BlsSignature([0x0c; 96]),
        }
    }

    pub fn voluntary_exit(epoch: u64, validator_index: u64) -> phase0::SignedVoluntaryExit {
        phase0::SignedVoluntaryExit {
            message: phase0::VoluntaryExit {
                epoch,
                validator_index,
            },
            signature: BlsSignature([0x0d; 96]),
        }
    }

    pub fn phase0_body() -> phase0::BeaconBlockBody {
        phase0::BeaconBlockBody {
            randao_reveal: BlsSignature([0x03; 96]),
            eth1_data: phase0::Eth1Data {
                deposit_root: root(0x04),
                deposit_count: 5,
                block_hash: root(0x06),
            },
            graffiti: root(0x07),
            attestations: vec![attestation(1)].into(),
            voluntary_exits: vec![voluntary_exit(4, 8)].into(),
            ..Default::default()
        }
    }

    /// Unsigned phase0 block; at slot 1 it matches `tests/fixtures/phase0_block.json`.
    pub fn phase0_block(slot: Slot) -> phase0::SignedBeaconBlock {
        phase0::SignedBeaconBlock {
            message: phase0::BeaconBlock {
                slot,
                proposer_index: 2,
                parent_root: root(0x01),
                state_root: root(0x02),
                body: phase0_body(),
            },
            signature: BlsSignature::zero(),
        }
    }

    fn sync_aggregate() -> altair::SyncAggregate {
        let mut bits = BitVector::new();
        bits.set(0, true).expect("bit 0 in range");
        altair::SyncAggregate {
            sync_committee_bits: bits,
            sync_committee_signature: BlsSignature([0x0e; 96]),
        }
    }

    pub fn altair_block(slot: Slot) -> altair::SignedBeaconBlock {
        let body = phase0_body();
        altair::SignedBeaconBlock {
            message: altair::BeaconBlock {
                slot,
                proposer_index: 2,
                parent_root: root(0x01),
                state_root: root(0x02),
                body: altair::BeaconBlockBody {
                    randao_reveal: body.randao_reveal,
                    eth1_data: body.eth1_data,
                    graffiti: body.graffiti,
                    attestations: body.attestations,
                    voluntary_exits: body.voluntary_exits,
                    sync_aggregate: sync_aggregate(),
                    ..Default::default()
                },
            },
            signature: BlsSignature([0x10; 96]),
        }
    }

    fn bellatrix_payload() -> bellatrix::ExecutionPayload {
        bellatrix::ExecutionPayload {
            parent_hash: root(0x20),
            fee_recipient: ExecutionAddress([0x21; 20]),
            block_number: 100,
            gas_limit: 30_000_000,
            timestamp: 1_700_000_000,
            base_fee_per_gas: U256::from(7u64),
            block_hash: root(0x22),
            transactions: bellatrix::Transactions::from(vec![bellatrix::Transaction::from(vec![
                0x02, 0xf8,
            ])]),
            ..Default::default()
        }
    }

    pub fn bellatrix_block(slot: Slot) -> bellatrix::SignedBeaconBlock {
        bellatrix::SignedBeaconBlock {
            message: bellatrix::BeaconBlock {
                slot,
                proposer_index: 2,
                parent_root: root(0x01),
                body: bellatrix::BeaconBlockBody {
                    randao_reveal: BlsSignature([0x03; 96]),
                    sync_aggregate: sync_aggregate(),
                    execution_payload: bellatrix_payload(),
                    ..Default::default()
                },
                ..Default::default()
            },
            signature: BlsSignature([0x11; 96]),
        }
    }

    pub fn bellatrix_blinded_block(slot: Slot) -> bellatrix::SignedBlindedBeaconBlock {
        bellatrix::SignedBlindedBeaconBlock {
            message: bellatrix::BlindedBeaconBlock {
                slot,
                proposer_index: 2,
                parent_root: root(0x01),
                body: bellatrix::BlindedBeaconBlockBody {
                    randao_reveal: BlsSignature([0x03; 96]),
                    sync_aggregate: sync_aggregate(),
                    execution_payload_header: bellatrix::ExecutionPayloadHeader {
                        block_hash: root(0x22),
                        transactions_root: root(0x23),
                        gas_limit: 30_000_000,
                        ..Default::default()
                    },
                    ..Default::default()
                },
                ..Default::default()
            },
            signature: BlsSignature([0x12; 96]),
        }
    }

    pub fn capella_block(slot: Slot) -> capella::SignedBeaconBlock {
        let withdrawal = capella::Withdrawal {
            index: 1,
            validator_index: 9,
            address: ExecutionAddress([0x24; 20]),
            amount: 32_000_000_000,
        };
        capella::SignedBeaconBlock {
            message: capella::BeaconBlock {
                slot,
                proposer_index: 2,
                parent_root: root(0x01),
                body: capella::BeaconBlockBody {
                    randao_reveal: BlsSignature([0x03; 96]),
                    sync_aggregate: sync_aggregate(),
                    execution_payload: capella::ExecutionPayload {
                        block_hash: root(0x22),
                        withdrawals: vec![withdrawal].into(),
                        ..Default::default()
                    },
                    ..Default::default()
                },
                ..Default::default()
            },
            signature: BlsSignature([0x13; 96]),
        }
    }

    pub fn capella_blinded_block(slot: Slot) -> capella::SignedBlindedBeaconBlock {
        capella::SignedBlindedBeaconBlock {
            message: capella::BlindedBeaconBlock {
                slot,
                proposer_index: 2,
                body: capella::BlindedBeaconBlockBody {
                    sync_aggregate: sync_aggregate(),
                    execution_payload_header: capella::ExecutionPayloadHeader {
                        block_hash: root(0x22),
                        withdrawals_root: root(0x25),
                        ..Default::default()
                    },
                    ..Default::default()
                },
                ..Default::default()
            },
            signature: BlsSignature([0x14; 96]),
        }
    }

    pub fn deneb_block(slot: Slot) -> deneb::SignedBeaconBlock {
        deneb::SignedBeaconBlock {
            message: deneb::BeaconBlock {
                slot,
                proposer_index: 2,
                body: deneb::BeaconBlockBody {
                    sync_aggregate: sync_aggregate(),
                    execution_payload: deneb::ExecutionPayload {
                        block_hash: root(0x22),
                        blob_gas_used: 131_072,
                        ..Default::default()
                    },
                    blob_kzg_commitments: vec![KzgCommitment([0x26; 48])].into(),
                    ..Default::default()
                },
                ..Default::default()
            },
            signature: BlsSignature([0x15; 96]),
        }
    }

    pub fn deneb_blinded_block(slot: Slot) -> deneb::SignedBlindedBeaconBlock {
        deneb::SignedBlindedBeaconBlock {
            message: deneb::BlindedBeaconBlock {
                slot,
                proposer_index: 2,
                body: deneb::BlindedBeaconBlockBody {
                    sync_aggregate: sync_aggregate(),
                    execution_payload_header: deneb::ExecutionPayloadHeader {
                        block_hash: root(0x22),
                        excess_blob_gas: 1,
                        ..Default::default()
                    },
                    ..Default::default()
                },
                ..Default::default()
            },
            signature: BlsSignature([0x16; 96]),
        }
    }

    pub fn registration() -> builder::SignedValidatorRegistration {
        builder::SignedValidatorRegistration {
            message: builder::ValidatorRegistration {
                fee_recipient: ExecutionAddress([0x30; 20]),
                gas_limit: 30_000_000,
                timestamp: 1_700_000_000,
                pubkey: BlsPublicKey([0x31; 48]),
            },
            signature: BlsSignature([0x32; 96]),
        }
    }

    pub fn aggregate_and_proof(slot: Slot) -> phase0::SignedAggregateAndProof {
        phase0::SignedAggregateAndProof {
            message: phase0::AggregateAndProof {
                aggregator_index: 11,
                aggregate: attestation(slot),
                selection_proof: BlsSignature([0x33; 96]),
            },
            signature: BlsSignature([0x34; 96]),
        }
    }

    pub fn beacon_committee_selection(slot: Slot) -> selection::BeaconCommitteeSelection {
        selection::BeaconCommitteeSelection {
            validator_index: 12,
            slot,
            selection_proof: BlsSignature([0x35; 96]),
        }
    }

    pub fn sync_committee_selection(
        slot: Slot,
        subcommittee_index: u64,
    ) -> selection::SyncCommitteeSelection {
        selection::SyncCommitteeSelection {
            validator_index: 13,
            slot,
            subcommittee_index,
            selection_proof: BlsSignature([0x36; 96]),
        }
    }

    pub fn sync_committee_message(slot: Slot) -> altair::SyncCommitteeMessage {
        altair::SyncCommitteeMessage {
            slot,
            beacon_block_root: root(0x37),
            validator_index: 14,
            signature: BlsSignature([0x38; 96]),
        }
    }

    pub fn contribution_and_proof(slot: Slot, subcommittee_index: u64) -> altair::ContributionAndProof {
        let mut bits = BitVector::new();
        bits.set(1, true).expect("bit 1 in range");
        altair::ContributionAndProof {
            aggregator_index: 15,
            contribution: altair::SyncCommitteeContribution {
                slot,
                beacon_block_root: root(0x39),
                subcommittee_index,
                aggregation_bits: bits,
                signature: BlsSignature([0x3a; 96]),
            },
            selection_proof: BlsSignature([0x3b; 96]),
        }
    }

    pub fn signed_contribution_and_proof(
        slot: Slot,
        subcommittee_index: u64,
    ) -> altair::SignedContributionAndProof {
        altair::SignedContributionAndProof {
            message: contribution_and_proof(slot, subcommittee_index),
            signature: BlsSignature([0x3c; 96]),
        }
    }

    /// One value of every kind.
    pub fn all_signed_data() -> Vec<AnySignedData> {
        vec![
            VersionedSignedBeaconBlock::Capella(Box::new(capella_block(4))).into(),
            VersionedSignedBlindedBeaconBlock::Deneb(Box::new(deneb_blinded_block(5))).into(),
            Attestation::new(attestation(1)).into(),
            SignedVoluntaryExit::new(voluntary_exit(4, 8)).into(),
            VersionedSignedValidatorRegistration::V1(registration()).into(),
            SignedRandao::new(2, BlsSignature([0x3d; 96])).into(),
            BeaconCommitteeSelection::new(beacon_committee_selection(16)).into(),
            SyncCommitteeSelection::new(sync_committee_selection(33, 2)).into(),
            SignedAggregateAndProof::new(aggregate_and_proof(9)).into(),
            SignedSyncMessage::new(sync_committee_message(5)).into(),
            SyncContributionAndProof::new(contribution_and_proof(33, 2)).into(),
            SignedSyncContributionAndProof::new(signed_contribution_and_proof(7, 1)).into(),
            Signature::from_eth2(BlsSignature([0x3e; 96])).into(),
        ]
    }

    /// Mutation payload: a container of a root and a counter.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct TestData {
        pub root: Root,
        pub count: u64,
    }

    impl Merkleized for TestData {
        fn hash_tree_root_with(&self, hh: &mut Hasher) -> Result<()> {
            let index = hh.index();
            hh.put_bytes_n(self.root.as_slice(), 32)?;
            hh.put_uint64(self.count);
            hh.merkleize(index);
            Ok(())
        }
    }

    pub fn test_data(count: u64) -> TestData {
        TestData {
            root: root(0x11),
            count,
        }
    }

    /// `len` signed mutations linked from a zero genesis, one second apart.
    pub fn mutation_chain(len: usize) -> Vec<SignedMutation<TestData>> {
        let mut parent = Root::ZERO;
        let mut chain = Vec::with_capacity(len);
        for i in 0..len {
            let timestamp = Utc
                .timestamp_opt(1_700_000_000 + i as i64, 0)
                .single()
                .expect("valid timestamp");
            let mutation = Mutation::new(
                parent,
                MutationType::new("cluster/add_validator").expect("short type"),
                timestamp,
                test_data(i as u64),
            );
            let signed = SignedMutation::new(mutation, vec![0x22; 33], vec![0x33; 65])
                .expect("bounded signer and signature");
            parent = signed.hash;
            chain.push(signed);
        }
        chain
    }
}

/// Loads JSON fixtures from a directory.
///
/// **Unstable:** This API may change without notice.
pub struct FixtureLoader {
    dir: PathBuf,
}

impl FixtureLoader {
    /// Loader for `tests/fixtures` relative to `CARGO_MANIFEST_DIR`.
    pub fn default_dir() -> Self {
        Self {
            dir: Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"),
        }
    }

    /// Create a loader for a custom fixture directory.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self { dir: path.into() }
    }

    /// Load and parse `<name>.json`.
    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Result<T, Box<dyn std::error::Error>> {
        let path = self.dir.join(format!("{}.json", name));
        let contents = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Load `<name>.json` as an untyped JSON value.
    pub fn load_value(&self, name: &str) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
        self.load(name)
    }
}

/// Convert a hex string (with or without 0x prefix) to a 32-byte root.
pub fn hex_to_root(hex: &str) -> Result<Root, Box<dyn std::error::Error>> {
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    let bytes = hex::decode(hex)?;
    if bytes.len() != 32 {
        return Err(format!("Expected 32 bytes, got {}", bytes.len()).into());
    }
    Ok(Root::from_slice(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_reads_known_answers() {
        let loader = FixtureLoader::default_dir();
        let value = loader.load_value("phase0_block").unwrap();
        let root = hex_to_root(value["message_root"].as_str().unwrap()).unwrap();
        assert_ne!(root, Root::ZERO);
        assert!(loader.load_value("missing").is_err());
    }

    #[test]
    fn test_hex_to_root() {
        assert_eq!(hex_to_root(&"00".repeat(32)).unwrap(), Root::ZERO);
        assert!(hex_to_root("0x1234").is_err());
    }
}
