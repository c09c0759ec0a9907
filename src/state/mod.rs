//! Hash-chained, operator-signed log of state mutations.

mod mutation;

pub use mutation::{
    Mutation, MutationType, SignedMutation, MAX_SIGNATURE_LEN, MAX_SIGNER_LEN, MAX_TYPE_LEN,
};

use crate::error::{Error, Result};
use crate::merkle::Merkleized;
use crate::types::primitives::Root;
use tracing::warn;

/// Checks that every entry's stored hash matches its content and that each
/// entry's parent is the previous entry's hash, the first one's being
/// `genesis`.
pub fn verify_chain<D: Merkleized>(entries: &[SignedMutation<D>], genesis: Root) -> Result<()> {
    let mut parent = genesis;
    for (index, entry) in entries.iter().enumerate() {
        if entry.mutation.parent != parent {
            warn!(
                index,
                expected = %parent,
                actual = %entry.mutation.parent,
                "mutation parent mismatch"
            );
            return Err(Error::validation(format!(
                "mutation {} does not reference its predecessor",
                index
            )));
        }

        if let Err(err) = entry.verify_hash() {
            warn!(index, error = %err, "mutation hash mismatch");
            return Err(err);
        }

        parent = entry.hash;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;

    #[test]
    fn test_chain_links() {
        let chain = fixtures::mutation_chain(3);
        assert!(verify_chain(&chain, Root::ZERO).is_ok());
        assert!(verify_chain(&chain[..0], Root::ZERO).is_ok());
        assert!(verify_chain(&chain, Root::repeat_byte(1)).is_err());
    }

    #[test]
    fn test_chain_rejects_reordering() {
        let mut chain = fixtures::mutation_chain(3);
        chain.swap(1, 2);
        assert!(verify_chain(&chain, Root::ZERO).unwrap_err().is_validation());
    }

    #[test]
    fn test_chain_rejects_forged_hash() {
        let mut chain = fixtures::mutation_chain(2);
        chain[0].mutation.data.count = 99;
        assert!(verify_chain(&chain, Root::ZERO).is_err());
    }
}
