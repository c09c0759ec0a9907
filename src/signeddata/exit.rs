use super::{single_signature, SignedData, Signature, Surplus};
use crate::error::Result;
use crate::types::phase0;
use crate::types::primitives::Root;
use serde::{Deserialize, Serialize};
use tree_hash::TreeHash;

/// A voluntary exit request. JSON only; it has no SSZ form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignedVoluntaryExit(pub phase0::SignedVoluntaryExit);

impl SignedVoluntaryExit {
    pub fn new(exit: phase0::SignedVoluntaryExit) -> Self {
        Self(exit)
    }
}

impl SignedData for SignedVoluntaryExit {
    fn message_roots(&self) -> Result<Vec<Root>> {
        Ok(vec![self.0.message.tree_hash_root()])
    }

    fn signatures(&self) -> Vec<Signature> {
        vec![Signature::from_eth2(self.0.signature)]
    }

    fn set_signatures(&self, sigs: &[Signature]) -> Result<Self> {
        let sig = single_signature("voluntary exit", sigs, Surplus::TakeFirst)?;
        let mut resp = self.clone();
        resp.0.signature = sig.to_eth2();
        Ok(resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;
    use crate::types::primitives::BlsSignature;

    #[test]
    fn test_exit() {
        let exit = SignedVoluntaryExit::new(fixtures::voluntary_exit(4, 8));
        assert_eq!(
            exit.message_roots().unwrap(),
            vec![exit.0.message.tree_hash_root()]
        );

        let sig = Signature::from_eth2(BlsSignature([0xee; 96]));
        let signed = exit
            .set_signatures(&[sig.clone(), Signature::default()])
            .unwrap();
        assert_eq!(signed.signatures(), vec![sig]);
        assert_eq!(signed.0.message, exit.0.message);
    }

    #[test]
    fn test_exit_travels_as_json() {
        let exit = SignedVoluntaryExit::new(fixtures::voluntary_exit(4, 8));
        let value = serde_json::to_value(&exit).unwrap();
        assert_eq!(value["message"]["epoch"], "4");
        assert_eq!(value["message"]["validator_index"], "8");
        let back: SignedVoluntaryExit = serde_json::from_value(value).unwrap();
        assert_eq!(back, exit);
    }
}
