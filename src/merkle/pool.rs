use super::hasher::Hasher;
use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, OnceLock};

const DEFAULT_MAX_IDLE: usize = 64;
const INITIAL_BUFFER: usize = 1024;

/// Pool of reusable [`Hasher`] scratch buffers.
///
/// `get` hands out a [`PooledHasher`] guard; the hasher is reset and returned
/// to the pool when the guard drops, including on early returns via `?`.
#[derive(Debug)]
pub struct HasherPool {
    idle: Mutex<Vec<Hasher>>,
    max_idle: usize,
}

impl HasherPool {
    pub fn new() -> Self {
        Self::with_max_idle(DEFAULT_MAX_IDLE)
    }

    /// Pool that keeps at most `max_idle` hashers between uses.
    pub fn with_max_idle(max_idle: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            max_idle,
        }
    }

    pub fn get(&self) -> PooledHasher<'_> {
        let reused = self
            .idle
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop();

        let hasher = reused.unwrap_or_else(|| {
            tracing::trace!("hasher pool empty, allocating");
            Hasher::with_capacity(INITIAL_BUFFER)
        });

        PooledHasher { pool: self, hasher }
    }

    /// Number of hashers currently parked in the pool.
    pub fn idle(&self) -> usize {
        self.idle
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    fn put(&self, mut hasher: Hasher) {
        hasher.reset();
        let mut idle = self
            .idle
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if idle.len() < self.max_idle {
            idle.push(hasher);
        }
    }
}

impl Default for HasherPool {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped loan of a [`Hasher`] from a [`HasherPool`].
#[derive(Debug)]
pub struct PooledHasher<'a> {
    pool: &'a HasherPool,
    hasher: Hasher,
}

impl Deref for PooledHasher<'_> {
    type Target = Hasher;

    fn deref(&self) -> &Hasher {
        &self.hasher
    }
}

impl DerefMut for PooledHasher<'_> {
    fn deref_mut(&mut self) -> &mut Hasher {
        &mut self.hasher
    }
}

impl Drop for PooledHasher<'_> {
    fn drop(&mut self) {
        self.pool.put(std::mem::take(&mut self.hasher));
    }
}

/// Process-wide pool used by [`crate::merkle::Merkleized::hash_tree_root`].
pub fn default_pool() -> &'static HasherPool {
    static POOL: OnceLock<HasherPool> = OnceLock::new();
    POOL.get_or_init(HasherPool::new)
}
