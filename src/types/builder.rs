//! Builder API v1 validator registrations.

use crate::types::primitives::{BlsPublicKey, BlsSignature, ExecutionAddress};
use crate::types::serde_utils::quoted_u64;
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use tree_hash_derive::TreeHash;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct ValidatorRegistration {
    pub fee_recipient: ExecutionAddress,
    #[serde(with = "quoted_u64")]
    pub gas_limit: u64,
    /// Unix seconds
    #[serde(with = "quoted_u64")]
    pub timestamp: u64,
    pub pubkey: BlsPublicKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct SignedValidatorRegistration {
    pub message: ValidatorRegistration,
    pub signature: BlsSignature,
}
