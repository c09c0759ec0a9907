//! Altair containers: sync committee messages, contributions and the altair block.

use crate::types::phase0::{
    Attestation, AttesterSlashing, Deposit, Eth1Data, MaxAttestations, MaxAttesterSlashings,
    MaxDeposits, MaxProposerSlashings, MaxVoluntaryExits, ProposerSlashing, SignedVoluntaryExit,
};
use crate::types::primitives::{BlsSignature, Root, Slot, ValidatorIndex};
use crate::types::serde_utils::quoted_u64;
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use ssz_types::typenum::{U128, U512};
use ssz_types::{BitVector, VariableList};
use tree_hash_derive::TreeHash;

pub type SyncCommitteeSize = U512;
/// `SYNC_COMMITTEE_SIZE / SYNC_COMMITTEE_SUBNET_COUNT`
pub type SyncSubcommitteeSize = U128;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct SyncAggregate {
    pub sync_committee_bits: BitVector<SyncCommitteeSize>,
    pub sync_committee_signature: BlsSignature,
}

impl Default for SyncAggregate {
    fn default() -> Self {
        Self {
            sync_committee_bits: BitVector::new(),
            sync_committee_signature: BlsSignature::zero(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct BeaconBlockBody {
    pub randao_reveal: BlsSignature,
    pub eth1_data: Eth1Data,
    pub graffiti: Root,
    pub proposer_slashings: VariableList<ProposerSlashing, MaxProposerSlashings>,
    pub attester_slashings: VariableList<AttesterSlashing, MaxAttesterSlashings>,
    pub attestations: VariableList<Attestation, MaxAttestations>,
    pub deposits: VariableList<Deposit, MaxDeposits>,
    pub voluntary_exits: VariableList<SignedVoluntaryExit, MaxVoluntaryExits>,
    pub sync_aggregate: SyncAggregate,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct BeaconBlock {
    #[serde(with = "quoted_u64")]
    pub slot: Slot,
    #[serde(with = "quoted_u64")]
    pub proposer_index: ValidatorIndex,
    pub parent_root: Root,
    pub state_root: Root,
    pub body: BeaconBlockBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct SignedBeaconBlock {
    pub message: BeaconBlock,
    pub signature: BlsSignature,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct SyncCommitteeMessage {
    #[serde(with = "quoted_u64")]
    pub slot: Slot,
    pub beacon_block_root: Root,
    #[serde(with = "quoted_u64")]
    pub validator_index: ValidatorIndex,
    pub signature: BlsSignature,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct SyncCommitteeContribution {
    #[serde(with = "quoted_u64")]
    pub slot: Slot,
    pub beacon_block_root: Root,
    #[serde(with = "quoted_u64")]
    pub subcommittee_index: u64,
    pub aggregation_bits: BitVector<SyncSubcommitteeSize>,
    pub signature: BlsSignature,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct ContributionAndProof {
    #[serde(with = "quoted_u64")]
    pub aggregator_index: ValidatorIndex,
    pub contribution: SyncCommitteeContribution,
    pub selection_proof: BlsSignature,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct SignedContributionAndProof {
    pub message: ContributionAndProof,
    pub signature: BlsSignature,
}

/// Object signed by a sync committee member to prove aggregator selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct SyncAggregatorSelectionData {
    #[serde(with = "quoted_u64")]
    pub slot: Slot,
    #[serde(with = "quoted_u64")]
    pub subcommittee_index: u64,
}
