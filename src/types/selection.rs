//! Aggregator selection proofs and randao reveals as exchanged between
//! cluster peers. These are not consensus containers; their signing roots are
//! derived from the slot, epoch or sync selection data they carry.

use crate::error::Result;
use crate::merkle::{Hasher, Merkleized};
use crate::types::primitives::{BlsSignature, Epoch, Slot, ValidatorIndex};
use crate::types::serde_utils::quoted_u64;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeaconCommitteeSelection {
    #[serde(with = "quoted_u64")]
    pub validator_index: ValidatorIndex,
    #[serde(with = "quoted_u64")]
    pub slot: Slot,
    pub selection_proof: BlsSignature,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncCommitteeSelection {
    #[serde(with = "quoted_u64")]
    pub validator_index: ValidatorIndex,
    #[serde(with = "quoted_u64")]
    pub slot: Slot,
    #[serde(with = "quoted_u64")]
    pub subcommittee_index: u64,
    pub selection_proof: BlsSignature,
}

/// Randao reveal: a signature over an epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedEpoch {
    #[serde(with = "quoted_u64")]
    pub epoch: Epoch,
    pub signature: BlsSignature,
}

impl Merkleized for SignedEpoch {
    /// Only the epoch is hashed; the signature is over that root.
    fn hash_tree_root_with(&self, hh: &mut Hasher) -> Result<()> {
        let index = hh.index();
        hh.put_uint64(self.epoch);
        hh.merkleize(index);
        Ok(())
    }
}
