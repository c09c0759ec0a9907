use super::{single_signature, SignedData, Surplus};
use crate::error::{Error, Result};
use crate::types::primitives::{BlsSignature, Root};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A BLS12-381 signature as opaque bytes.
///
/// Built from a wire signature it is always [`Signature::LEN`] bytes; an empty
/// value is only a placeholder until a share is injected.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Signature(Vec<u8>);

impl Signature {
    pub const LEN: usize = 96;

    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn from_eth2(sig: BlsSignature) -> Self {
        Self(sig.0.to_vec())
    }

    /// Copies into the fixed wire array; shorter values are zero-filled.
    pub fn to_eth2(&self) -> BlsSignature {
        let mut out = BlsSignature::zero();
        let len = self.0.len().min(Self::LEN);
        out.0[..len].copy_from_slice(&self.0[..len]);
        out
    }

    pub fn from_blst(sig: &blst::min_pk::Signature) -> Self {
        Self(sig.to_bytes().to_vec())
    }

    /// Decodes the compressed point. Subgroup checks are left to verifiers.
    pub fn to_blst(&self) -> Result<blst::min_pk::Signature> {
        blst::min_pk::Signature::from_bytes(&self.0)
            .map_err(|e| Error::crypto(format!("invalid signature encoding: {:?}", e)))
    }
}

impl From<BlsSignature> for Signature {
    fn from(sig: BlsSignature) -> Self {
        Self::from_eth2(sig)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature(0x{})", hex::encode(&self.0))
    }
}

impl Serialize for Signature {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        crate::types::serde_utils::hex_vec::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        crate::types::serde_utils::hex_vec::deserialize(deserializer).map(Self)
    }
}

impl SignedData for Signature {
    fn message_roots(&self) -> Result<Vec<Root>> {
        Err(Error::validation(
            "signed message root not supported by signature type",
        ))
    }

    fn signatures(&self) -> Vec<Signature> {
        vec![self.clone()]
    }

    fn set_signatures(&self, sigs: &[Signature]) -> Result<Self> {
        single_signature("signature", sigs, Surplus::TakeFirst).cloned()
    }
}
