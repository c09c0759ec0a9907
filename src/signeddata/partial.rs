use super::{
    AnySignedData, Attestation, BeaconCommitteeSelection, SignedAggregateAndProof,
    SignedSyncContributionAndProof, SignedSyncMessage, SignedRandao, SignedVoluntaryExit,
    Signature, SyncCommitteeSelection, SyncContributionAndProof, VersionedSignedBeaconBlock,
    VersionedSignedBlindedBeaconBlock, VersionedSignedValidatorRegistration,
};
use crate::error::Result;
use crate::types::primitives::{BlsSignature, Epoch};
use crate::types::versioned::{
    RawVersionedSignedBeaconBlock, RawVersionedSignedBlindedBeaconBlock,
    RawVersionedSignedValidatorRegistration,
};
use crate::types::{altair, phase0, selection};

/// Signed data produced by one key share.
///
/// `share_idx` identifies the cooperating signer; its range is checked by
/// whoever knows the cluster size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParSignedData {
    pub signed_data: AnySignedData,
    pub share_idx: u64,
}

impl ParSignedData {
    pub fn new(signed_data: impl Into<AnySignedData>, share_idx: u64) -> Self {
        Self {
            signed_data: signed_data.into(),
            share_idx,
        }
    }

    pub fn new_block(raw: RawVersionedSignedBeaconBlock, share_idx: u64) -> Result<Self> {
        Ok(Self::new(VersionedSignedBeaconBlock::new(raw)?, share_idx))
    }

    pub fn new_blinded_block(
        raw: RawVersionedSignedBlindedBeaconBlock,
        share_idx: u64,
    ) -> Result<Self> {
        Ok(Self::new(VersionedSignedBlindedBeaconBlock::new(raw)?, share_idx))
    }

    pub fn new_registration(
        raw: RawVersionedSignedValidatorRegistration,
        share_idx: u64,
    ) -> Result<Self> {
        Ok(Self::new(
            VersionedSignedValidatorRegistration::new(raw)?,
            share_idx,
        ))
    }

    pub fn new_attestation(att: phase0::Attestation, share_idx: u64) -> Self {
        Self::new(Attestation::new(att), share_idx)
    }

    pub fn new_voluntary_exit(exit: phase0::SignedVoluntaryExit, share_idx: u64) -> Self {
        Self::new(SignedVoluntaryExit::new(exit), share_idx)
    }

    pub fn new_randao(epoch: Epoch, signature: BlsSignature, share_idx: u64) -> Self {
        Self::new(SignedRandao::new(epoch, signature), share_idx)
    }

    pub fn new_beacon_committee_selection(
        selection: selection::BeaconCommitteeSelection,
        share_idx: u64,
    ) -> Self {
        Self::new(BeaconCommitteeSelection::new(selection), share_idx)
    }

    pub fn new_sync_committee_selection(
        selection: selection::SyncCommitteeSelection,
        share_idx: u64,
    ) -> Self {
        Self::new(SyncCommitteeSelection::new(selection), share_idx)
    }

    pub fn new_aggregate_and_proof(agg: phase0::SignedAggregateAndProof, share_idx: u64) -> Self {
        Self::new(SignedAggregateAndProof::new(agg), share_idx)
    }

    pub fn new_sync_message(msg: altair::SyncCommitteeMessage, share_idx: u64) -> Self {
        Self::new(SignedSyncMessage::new(msg), share_idx)
    }

    pub fn new_sync_contribution_and_proof(
        proof: altair::ContributionAndProof,
        share_idx: u64,
    ) -> Self {
        Self::new(SyncContributionAndProof::new(proof), share_idx)
    }

    pub fn new_signed_sync_contribution_and_proof(
        proof: altair::SignedContributionAndProof,
        share_idx: u64,
    ) -> Self {
        Self::new(SignedSyncContributionAndProof::new(proof), share_idx)
    }

    pub fn new_signature(signature: Signature, share_idx: u64) -> Self {
        Self::new(signature, share_idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signeddata::SignedData;
    use crate::test_utils::fixtures;
    use crate::types::version::DataVersion;

    #[test]
    fn test_constructors_wrap_kind_and_share() {
        let par = ParSignedData::new_attestation(fixtures::attestation(1), 3);
        assert_eq!(par.share_idx, 3);
        assert_eq!(par.signed_data.kind_name(), "attestation");

        let par = ParSignedData::new_randao(2, BlsSignature::zero(), 0);
        assert_eq!(par.signed_data.kind_name(), "randao");

        let par = ParSignedData::new_signature(Signature::new(vec![1; 96]), 7);
        assert_eq!(par.signed_data.signatures(), vec![Signature::new(vec![1; 96])]);
    }

    #[test]
    fn test_versioned_constructors_validate() {
        let raw = RawVersionedSignedBeaconBlock::phase0(fixtures::phase0_block(1));
        assert!(ParSignedData::new_block(raw, 1).is_ok());

        let raw = RawVersionedSignedBeaconBlock {
            version: DataVersion::Altair,
            ..Default::default()
        };
        assert!(ParSignedData::new_block(raw, 1).unwrap_err().is_validation());

        let raw = RawVersionedSignedBlindedBeaconBlock::capella(fixtures::capella_blinded_block(2));
        assert!(ParSignedData::new_blinded_block(raw, 1).is_ok());

        assert!(ParSignedData::new_registration(Default::default(), 1).is_err());
    }

    #[test]
    fn test_share_copy_is_independent() {
        let par = ParSignedData::new_voluntary_exit(fixtures::voluntary_exit(1, 2), 4);
        let mut copy = par.clone();
        copy.signed_data = copy
            .signed_data
            .set_signatures(&[Signature::new(vec![9; 96])])
            .unwrap();
        assert_ne!(copy, par);
        assert_eq!(par.signed_data.signatures()[0].as_bytes(), &[0x0d; 96]);
    }
}
