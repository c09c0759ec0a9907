use super::{
    Attestation, BeaconCommitteeSelection, SignedAggregateAndProof, SignedData,
    SignedSyncContributionAndProof, SignedSyncMessage, SignedRandao, SignedVoluntaryExit,
    Signature, SyncCommitteeSelection, SyncContributionAndProof, VersionedSignedBeaconBlock,
    VersionedSignedBlindedBeaconBlock, VersionedSignedValidatorRegistration,
};
use crate::error::Result;
use crate::types::primitives::Root;

/// Every signed data kind. Dispatch sites match exhaustively, so a new kind
/// must be handled everywhere before it compiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnySignedData {
    Block(VersionedSignedBeaconBlock),
    BlindedBlock(VersionedSignedBlindedBeaconBlock),
    Attestation(Attestation),
    VoluntaryExit(SignedVoluntaryExit),
    Registration(VersionedSignedValidatorRegistration),
    Randao(SignedRandao),
    BeaconCommitteeSelection(BeaconCommitteeSelection),
    SyncCommitteeSelection(SyncCommitteeSelection),
    AggregateAndProof(SignedAggregateAndProof),
    SyncMessage(SignedSyncMessage),
    SyncContributionAndProof(SyncContributionAndProof),
    SignedSyncContributionAndProof(SignedSyncContributionAndProof),
    Signature(Signature),
}

macro_rules! each_kind {
    ($value:expr, $inner:ident => $body:expr) => {
        match $value {
            AnySignedData::Block($inner) => $body,
            AnySignedData::BlindedBlock($inner) => $body,
            AnySignedData::Attestation($inner) => $body,
            AnySignedData::VoluntaryExit($inner) => $body,
            AnySignedData::Registration($inner) => $body,
            AnySignedData::Randao($inner) => $body,
            AnySignedData::BeaconCommitteeSelection($inner) => $body,
            AnySignedData::SyncCommitteeSelection($inner) => $body,
            AnySignedData::AggregateAndProof($inner) => $body,
            AnySignedData::SyncMessage($inner) => $body,
            AnySignedData::SyncContributionAndProof($inner) => $body,
            AnySignedData::SignedSyncContributionAndProof($inner) => $body,
            AnySignedData::Signature($inner) => $body,
        }
    };
}

macro_rules! impl_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for AnySignedData {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from!(
    Block(VersionedSignedBeaconBlock),
    BlindedBlock(VersionedSignedBlindedBeaconBlock),
    Attestation(Attestation),
    VoluntaryExit(SignedVoluntaryExit),
    Registration(VersionedSignedValidatorRegistration),
    Randao(SignedRandao),
    BeaconCommitteeSelection(BeaconCommitteeSelection),
    SyncCommitteeSelection(SyncCommitteeSelection),
    AggregateAndProof(SignedAggregateAndProof),
    SyncMessage(SignedSyncMessage),
    SyncContributionAndProof(SyncContributionAndProof),
    SignedSyncContributionAndProof(SignedSyncContributionAndProof),
    Signature(Signature),
);

impl AnySignedData {
    /// Short stable name of the wrapped kind, for logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Block(_) => "block",
            Self::BlindedBlock(_) => "blinded_block",
            Self::Attestation(_) => "attestation",
            Self::VoluntaryExit(_) => "voluntary_exit",
            Self::Registration(_) => "validator_registration",
            Self::Randao(_) => "randao",
            Self::BeaconCommitteeSelection(_) => "beacon_committee_selection",
            Self::SyncCommitteeSelection(_) => "sync_committee_selection",
            Self::AggregateAndProof(_) => "aggregate_and_proof",
            Self::SyncMessage(_) => "sync_message",
            Self::SyncContributionAndProof(_) => "sync_contribution_and_proof",
            Self::SignedSyncContributionAndProof(_) => "signed_sync_contribution_and_proof",
            Self::Signature(_) => "signature",
        }
    }
}

impl SignedData for AnySignedData {
    fn message_roots(&self) -> Result<Vec<Root>> {
        each_kind!(self, d => d.message_roots())
    }

    fn signatures(&self) -> Vec<Signature> {
        each_kind!(self, d => d.signatures())
    }

    fn set_signatures(&self, sigs: &[Signature]) -> Result<Self> {
        each_kind!(self, d => d.set_signatures(sigs).map(Self::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;
    use crate::types::primitives::BlsSignature;

    #[test]
    fn test_every_kind_sets_one_signature() {
        let sig = Signature::from_eth2(BlsSignature([0x42; 96]));
        for data in fixtures::all_signed_data() {
            let signed = data.set_signatures(&[sig.clone()]).unwrap();
            assert_eq!(signed.signatures(), vec![sig.clone()], "{}", data.kind_name());
            assert_eq!(signed.kind_name(), data.kind_name());
            assert_ne!(data.signatures(), signed.signatures(), "{}", data.kind_name());
            assert!(data.set_signatures(&[]).is_err(), "{}", data.kind_name());
        }
    }

    #[test]
    fn test_roots_for_every_kind_but_signature() {
        for data in fixtures::all_signed_data() {
            let roots = data.message_roots();
            match &data {
                AnySignedData::Signature(_) => assert!(roots.is_err()),
                _ => assert_eq!(roots.unwrap().len(), 1, "{}", data.kind_name()),
            }
        }
    }

    #[test]
    fn test_kind_names_are_distinct() {
        let mut names: Vec<_> = fixtures::all_signed_data()
            .iter()
            .map(AnySignedData::kind_name)
            .collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 13);
    }
}
