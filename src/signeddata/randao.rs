use super::{single_signature, SignedData, Signature, Surplus};
use crate::error::{Error, Result};
use crate::merkle::Merkleized;
use crate::types::primitives::{BlsSignature, Epoch, Root};
use crate::types::selection::SignedEpoch;
use serde::{Deserialize, Serialize};

/// A randao reveal: the proposer's signature over the epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignedRandao(pub SignedEpoch);

impl SignedRandao {
    pub fn new(epoch: Epoch, signature: BlsSignature) -> Self {
        Self(SignedEpoch { epoch, signature })
    }

    pub fn epoch(&self) -> Epoch {
        self.0.epoch
    }
}

impl SignedData for SignedRandao {
    fn message_roots(&self) -> Result<Vec<Root>> {
        let root = self
            .0
            .hash_tree_root()
            .map_err(|e| Error::hash("randao", e))?;
        Ok(vec![root])
    }

    fn signatures(&self) -> Vec<Signature> {
        vec![Signature::from_eth2(self.0.signature)]
    }

    fn set_signatures(&self, sigs: &[Signature]) -> Result<Self> {
        let sig = single_signature("randao", sigs, Surplus::TakeFirst)?;
        let mut resp = self.clone();
        resp.0.signature = sig.to_eth2();
        Ok(resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merkle::uint64_root;

    #[test]
    fn test_randao_signs_epoch() {
        let randao = SignedRandao::new(3, BlsSignature::zero());
        assert_eq!(randao.message_roots().unwrap(), vec![uint64_root(3)]);

        let sig = Signature::from_eth2(BlsSignature([8; 96]));
        let signed = randao.set_signatures(&[sig.clone()]).unwrap();
        assert_eq!(signed.epoch(), 3);
        assert_eq!(signed.signatures(), vec![sig]);
        assert_eq!(randao.signatures(), vec![Signature::from_eth2(BlsSignature::zero())]);
    }

    #[test]
    fn test_randao_json() {
        let randao = SignedRandao::new(10, BlsSignature([1; 96]));
        let value = serde_json::to_value(&randao).unwrap();
        assert_eq!(value["epoch"], "10");
        assert_eq!(serde_json::from_value::<SignedRandao>(value).unwrap(), randao);
    }
}
