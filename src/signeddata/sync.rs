//! Sync committee duties.

use super::codec::ssz_passthrough;
use super::{single_signature, SignedData, Signature, Surplus};
use crate::domain::{DomainName, DomainNamed, EpochLookup};
use crate::error::Result;
use crate::types::altair::{self, SyncAggregatorSelectionData};
use crate::types::primitives::{Epoch, Root, Slot};
use crate::types::selection;
use serde::{Deserialize, Serialize};
use tree_hash::TreeHash;

fn selection_data_root(slot: Slot, subcommittee_index: u64) -> Root {
    SyncAggregatorSelectionData {
        slot,
        subcommittee_index,
    }
    .tree_hash_root()
}

/// A sync committee member's vote on the head block root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignedSyncMessage(pub altair::SyncCommitteeMessage);

impl SignedSyncMessage {
    pub fn new(msg: altair::SyncCommitteeMessage) -> Self {
        Self(msg)
    }
}

ssz_passthrough!(SignedSyncMessage, altair::SyncCommitteeMessage);

impl SignedData for SignedSyncMessage {
    /// The block root is already a root; it is signed as is.
    fn message_roots(&self) -> Result<Vec<Root>> {
        Ok(vec![self.0.beacon_block_root])
    }

    fn signatures(&self) -> Vec<Signature> {
        vec![Signature::from_eth2(self.0.signature)]
    }

    fn set_signatures(&self, sigs: &[Signature]) -> Result<Self> {
        let sig = single_signature("sync message", sigs, Surplus::Reject)?;
        let mut resp = self.clone();
        resp.0.signature = sig.to_eth2();
        Ok(resp)
    }
}

/// Sync subcommittee aggregator selection proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyncCommitteeSelection(pub selection::SyncCommitteeSelection);

impl SyncCommitteeSelection {
    pub fn new(selection: selection::SyncCommitteeSelection) -> Self {
        Self(selection)
    }
}

impl SignedData for SyncCommitteeSelection {
    fn message_roots(&self) -> Result<Vec<Root>> {
        Ok(vec![selection_data_root(
            self.0.slot,
            self.0.subcommittee_index,
        )])
    }

    fn signatures(&self) -> Vec<Signature> {
        vec![Signature::from_eth2(self.0.selection_proof)]
    }

    fn set_signatures(&self, sigs: &[Signature]) -> Result<Self> {
        let sig = single_signature("sync committee selection", sigs, Surplus::TakeFirst)?;
        let mut resp = self.clone();
        resp.0.selection_proof = sig.to_eth2();
        Ok(resp)
    }
}

/// An unsigned contribution whose signed part is the aggregator's selection
/// proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyncContributionAndProof(pub altair::ContributionAndProof);

impl SyncContributionAndProof {
    pub fn new(proof: altair::ContributionAndProof) -> Self {
        Self(proof)
    }
}

ssz_passthrough!(SyncContributionAndProof, altair::ContributionAndProof);

impl SignedData for SyncContributionAndProof {
    fn message_roots(&self) -> Result<Vec<Root>> {
        let contribution = &self.0.contribution;
        Ok(vec![selection_data_root(
            contribution.slot,
            contribution.subcommittee_index,
        )])
    }

    fn signatures(&self) -> Vec<Signature> {
        vec![Signature::from_eth2(self.0.selection_proof)]
    }

    fn set_signatures(&self, sigs: &[Signature]) -> Result<Self> {
        let sig = single_signature("sync contribution", sigs, Surplus::TakeFirst)?;
        let mut resp = self.clone();
        resp.0.selection_proof = sig.to_eth2();
        Ok(resp)
    }
}

impl DomainNamed for SyncContributionAndProof {
    fn domain_names(&self) -> Vec<DomainName> {
        vec![DomainName::SyncCommitteeSelectionProof]
    }

    fn epoch(&self, lookup: &dyn EpochLookup) -> Result<Epoch> {
        lookup.epoch_from_slot(self.0.contribution.slot)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignedSyncContributionAndProof(pub altair::SignedContributionAndProof);

impl SignedSyncContributionAndProof {
    pub fn new(proof: altair::SignedContributionAndProof) -> Self {
        Self(proof)
    }
}

ssz_passthrough!(
    SignedSyncContributionAndProof,
    altair::SignedContributionAndProof
);

impl SignedData for SignedSyncContributionAndProof {
    fn message_roots(&self) -> Result<Vec<Root>> {
        Ok(vec![self.0.message.tree_hash_root()])
    }

    fn signatures(&self) -> Vec<Signature> {
        vec![Signature::from_eth2(self.0.signature)]
    }

    fn set_signatures(&self, sigs: &[Signature]) -> Result<Self> {
        let sig = single_signature("signed sync contribution", sigs, Surplus::TakeFirst)?;
        let mut resp = self.clone();
        resp.0.signature = sig.to_eth2();
        Ok(resp)
    }
}
