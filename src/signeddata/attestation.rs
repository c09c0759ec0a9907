//! Attester duties: attestations, aggregates and committee aggregator
//! selection proofs.

use super::codec::ssz_passthrough;
use super::{single_signature, SignedData, Signature, Surplus};
use crate::error::Result;
use crate::merkle::uint64_root;
use crate::types::primitives::Root;
use crate::types::{phase0, selection};
use serde::{Deserialize, Serialize};
use tree_hash::TreeHash;

/// An unaggregated attestation. Signs the attestation data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attestation(pub phase0::Attestation);

impl Attestation {
    pub fn new(att: phase0::Attestation) -> Self {
        Self(att)
    }
}

ssz_passthrough!(Attestation, phase0::Attestation);

impl SignedData for Attestation {
    fn message_roots(&self) -> Result<Vec<Root>> {
        Ok(vec![self.0.data.tree_hash_root()])
    }

    fn signatures(&self) -> Vec<Signature> {
        vec![Signature::from_eth2(self.0.signature)]
    }

    fn set_signatures(&self, sigs: &[Signature]) -> Result<Self> {
        let sig = single_signature("attestation", sigs, Surplus::TakeFirst)?;
        let mut resp = self.clone();
        resp.0.signature = sig.to_eth2();
        Ok(resp)
    }
}

/// An aggregate attestation wrapped with the aggregator's proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignedAggregateAndProof(pub phase0::SignedAggregateAndProof);

impl SignedAggregateAndProof {
    pub fn new(agg: phase0::SignedAggregateAndProof) -> Self {
        Self(agg)
    }
}

ssz_passthrough!(SignedAggregateAndProof, phase0::SignedAggregateAndProof);

impl SignedData for SignedAggregateAndProof {
    fn message_roots(&self) -> Result<Vec<Root>> {
        Ok(vec![self.0.message.tree_hash_root()])
    }

    fn signatures(&self) -> Vec<Signature> {
        vec![Signature::from_eth2(self.0.signature)]
    }

    fn set_signatures(&self, sigs: &[Signature]) -> Result<Self> {
        let sig = single_signature("aggregate and proof", sigs, Surplus::Reject)?;
        let mut resp = self.clone();
        resp.0.signature = sig.to_eth2();
        Ok(resp)
    }
}

/// Beacon committee aggregator selection: a signature over the slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BeaconCommitteeSelection(pub selection::BeaconCommitteeSelection);

impl BeaconCommitteeSelection {
    pub fn new(selection: selection::BeaconCommitteeSelection) -> Self {
        Self(selection)
    }
}

impl SignedData for BeaconCommitteeSelection {
    fn message_roots(&self) -> Result<Vec<Root>> {
        Ok(vec![uint64_root(self.0.slot)])
    }

    fn signatures(&self) -> Vec<Signature> {
        vec![Signature::from_eth2(self.0.selection_proof)]
    }

    fn set_signatures(&self, sigs: &[Signature]) -> Result<Self> {
        let sig = single_signature("beacon committee selection", sigs, Surplus::Reject)?;
        let mut resp = self.clone();
        resp.0.selection_proof = sig.to_eth2();
        Ok(resp)
    }
}
