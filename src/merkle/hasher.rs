use crate::error::{Error, Result};
use crate::types::primitives::Root;
use tree_hash::BYTES_PER_CHUNK;

/// Incremental SSZ hasher over a flat chunk buffer.
///
/// Fields are absorbed in declaration order; `merkleize(index)` folds every
/// chunk written since `index` into a single root chunk. A container hash is
/// therefore: take `index()`, absorb each field, `merkleize(index)`, and read
/// the result with `hash_root()` once the outermost scope is closed.
#[derive(Debug, Default)]
pub struct Hasher {
    buf: Vec<u8>,
}

impl Hasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Start offset of the next field.
    pub fn index(&self) -> usize {
        self.buf.len()
    }

    /// Absorbs raw bytes. Up to one chunk is right-padded into a single chunk;
    /// longer input is chunked and folded into its own root.
    pub fn put_bytes(&mut self, bytes: &[u8]) {
        if bytes.len() <= BYTES_PER_CHUNK {
            self.append_bytes32(bytes);
            if bytes.is_empty() {
                self.buf.extend_from_slice(&[0u8; BYTES_PER_CHUNK]);
            }
            return;
        }

        let index = self.index();
        self.append_bytes32(bytes);
        self.merkleize(index);
    }

    /// Absorbs a little-endian `u64` as one chunk.
    pub fn put_uint64(&mut self, value: u64) {
        self.append_bytes32(&value.to_le_bytes());
    }

    /// Absorbs an already computed 32-byte root as one chunk.
    pub fn put_root(&mut self, root: &Root) {
        self.buf.extend_from_slice(root.as_slice());
    }

    /// Appends bytes and zero-pads to the next chunk boundary.
    pub fn append_bytes32(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
        let rem = bytes.len() % BYTES_PER_CHUNK;
        if rem != 0 {
            self.buf.resize(self.buf.len() + BYTES_PER_CHUNK - rem, 0);
        }
    }

    /// Absorbs `bytes` as an SSZ `Vector[byte, n]`, left-padded with zeros.
    pub fn put_bytes_n(&mut self, bytes: &[u8], n: usize) -> Result<()> {
        if bytes.len() > n {
            return Err(Error::size("fixed bytes", bytes.len(), n));
        }

        if bytes.len() == n {
            self.put_bytes(bytes);
        } else {
            let mut padded = vec![0u8; n - bytes.len()];
            padded.extend_from_slice(bytes);
            self.put_bytes(&padded);
        }
        Ok(())
    }

    /// Absorbs `bytes` as an SSZ `List[byte, limit]`: chunked, folded against
    /// a capacity of `(limit + 31) / 32` chunks and mixed in with the length.
    pub fn put_byte_list(&mut self, bytes: &[u8], limit: usize, field: &str) -> Result<()> {
        if bytes.len() > limit {
            return Err(Error::size(field, bytes.len(), limit));
        }

        let index = self.index();
        self.append_bytes32(bytes);
        self.merkleize_with_mixin(index, bytes.len() as u64, limit.div_ceil(BYTES_PER_CHUNK))
    }

    /// Replaces every chunk written since `index` with their merkle root.
    pub fn merkleize(&mut self, index: usize) {
        let root = tree_hash::merkle_root(&self.buf[index..], 0);
        self.buf.truncate(index);
        self.buf.extend_from_slice(root.as_slice());
    }

    /// Like [`Hasher::merkleize`] with a fixed chunk capacity, then mixes in
    /// `num` as the list length. Fails if more than `limit_chunks` chunks were
    /// written since `index`.
    pub fn merkleize_with_mixin(&mut self, index: usize, num: u64, limit_chunks: usize) -> Result<()> {
        let chunks = (self.buf.len() - index).div_ceil(BYTES_PER_CHUNK);
        if chunks > limit_chunks {
            return Err(Error::size("chunks", chunks, limit_chunks));
        }

        let root = tree_hash::merkle_root(&self.buf[index..], limit_chunks);
        let mixed = tree_hash::mix_in_length(&root, num as usize);
        self.buf.truncate(index);
        self.buf.extend_from_slice(mixed.as_slice());
        Ok(())
    }

    /// The final root. Fails if scopes were left open.
    pub fn hash_root(&self) -> Result<Root> {
        if self.buf.len() != BYTES_PER_CHUNK {
            return Err(Error::hash(
                "hasher",
                format!("expected one 32-byte root, have {} bytes", self.buf.len()),
            ));
        }
        Ok(Root::from_slice(&self.buf))
    }

    pub fn reset(&mut self) {
        self.buf.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssz_types::{typenum::U64, VariableList};
    use tree_hash::TreeHash;

    fn root_of(f: impl FnOnce(&mut Hasher)) -> Root {
        let mut hh = Hasher::new();
        let index = hh.index();
        f(&mut hh);
        hh.merkleize(index);
        hh.hash_root().unwrap()
    }

    #[test]
    fn test_uint64_chunk() {
        let mut hh = Hasher::new();
        hh.put_uint64(0x0102);
        let root = hh.hash_root().unwrap();
        assert_eq!(root, 0x0102u64.tree_hash_root());
    }

    #[test]
    fn test_put_bytes_n_left_pads() {
        let mut hh = Hasher::new();
        hh.put_bytes_n(&[0xff], 32).unwrap();
        let root = hh.hash_root().unwrap();
        assert_eq!(root[31], 0xff);
        assert!(root[..31].iter().all(|b| *b == 0));

        let err = Hasher::new().put_bytes_n(&[0u8; 33], 32).unwrap_err();
        assert!(err.is_size());
    }

    #[test]
    fn test_mixin_rejects_chunks_over_capacity() {
        let mut hh = Hasher::new();
        let index = hh.index();
        hh.append_bytes32(&[1u8; 96]);
        let err = hh.merkleize_with_mixin(index, 96, 1).unwrap_err();
        assert!(matches!(
            err,
            Error::Size { ref field, len: 3, limit: 1 } if field == "chunks"
        ));

        let mut hh = Hasher::new();
        let index = hh.index();
        hh.append_bytes32(&[1u8; 96]);
        assert!(hh.merkleize_with_mixin(index, 96, 3).is_ok());
        assert!(hh.hash_root().is_ok());
    }

    #[test]
    fn test_byte_list_matches_variable_list_root() {
        let bytes = b"cluster/add_validator".to_vec();
        let mut hh = Hasher::new();
        hh.put_byte_list(&bytes, 64, "Type").unwrap();
        let expected = VariableList::<u8, U64>::new(bytes).unwrap().tree_hash_root();
        assert_eq!(hh.hash_root().unwrap(), expected);
    }

    #[test]
    fn test_byte_list_length_is_mixed_in() {
        let mut a = Hasher::new();
        a.put_byte_list(&[1, 2, 3], 64, "a").unwrap();
        let mut b = Hasher::new();
        b.put_byte_list(&[1, 2, 3, 0], 64, "b").unwrap();
        assert_ne!(a.hash_root().unwrap(), b.hash_root().unwrap());
    }

    #[test]
    fn test_byte_list_limit() {
        let mut hh = Hasher::new();
        assert!(hh.put_byte_list(&[0u8; 64], 64, "Type").is_ok());

        let err = Hasher::new()
            .put_byte_list(&[0u8; 65], 64, "Type")
            .unwrap_err();
        assert!(err.is_size());
    }

    #[test]
    fn test_container_order_matters() {
        let ab = root_of(|hh| {
            hh.put_uint64(1);
            hh.put_uint64(2);
        });
        let ba = root_of(|hh| {
            hh.put_uint64(2);
            hh.put_uint64(1);
        });
        assert_ne!(ab, ba);
    }

    #[test]
    fn test_long_bytes_are_folded() {
        let bytes = [7u8; 96];
        let mut hh = Hasher::new();
        hh.put_bytes(&bytes);
        let mut padded = bytes.to_vec();
        padded.resize(128, 0);
        assert_eq!(hh.hash_root().unwrap(), tree_hash::merkle_root(&padded, 0));
    }

    #[test]
    fn test_open_scope_is_an_error() {
        let mut hh = Hasher::new();
        hh.put_uint64(1);
        hh.put_uint64(2);
        assert!(hh.hash_root().is_err());
    }
}
