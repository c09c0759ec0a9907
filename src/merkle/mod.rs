//! SSZ Merkleization engine.
//!
//! [`Hasher`] absorbs fields chunk by chunk and folds scopes into roots, in the
//! order a container declares them. Hashers are borrowed from a [`HasherPool`]
//! and handed back when the [`PooledHasher`] guard drops.

mod hasher;
mod pool;

pub use hasher::Hasher;
pub use pool::{default_pool, HasherPool, PooledHasher};

use crate::error::Result;
use crate::types::primitives::Root;

/// Types hashed field by field through a [`Hasher`].
pub trait Merkleized {
    /// Absorb this value as one composite field (one chunk) of the enclosing scope.
    fn hash_tree_root_with(&self, hh: &mut Hasher) -> Result<()>;

    /// Hash the object following the SSZ rules and return the root.
    fn hash_tree_root(&self) -> Result<Root> {
        let mut hh = default_pool().get();
        self.hash_tree_root_with(&mut hh)?;
        hh.hash_root()
    }
}

/// Root of a single `uint64` (e.g. a slot or epoch).
pub fn uint64_root(value: u64) -> Root {
    let mut chunk = [0u8; 32];
    chunk[..8].copy_from_slice(&value.to_le_bytes());
    Root::from(chunk)
}

/// Merkleizes an ordered set of roots as the fields of one container.
pub fn hash_roots(roots: &[Root]) -> Result<Root> {
    let mut hh = default_pool().get();
    let index = hh.index();
    for root in roots {
        hh.put_root(root);
    }
    hh.merkleize(index);
    hh.hash_root()
}
