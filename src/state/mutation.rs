use crate::error::{Error, Result};
use crate::merkle::{Hasher, Merkleized};
use crate::types::primitives::Root;
use crate::types::serde_utils::hex_vec;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_TYPE_LEN: usize = 64;
pub const MAX_SIGNER_LEN: usize = 256;
pub const MAX_SIGNATURE_LEN: usize = 256;

/// Mutation type tag, e.g. `"cluster/add_validator"`. At most
/// [`MAX_TYPE_LEN`] bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MutationType(String);

impl MutationType {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.len() > MAX_TYPE_LEN {
            return Err(Error::size("Type", name.len(), MAX_TYPE_LEN));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MutationType {
    type Error = Error;

    fn try_from(name: String) -> Result<Self> {
        Self::new(name)
    }
}

impl From<MutationType> for String {
    fn from(t: MutationType) -> Self {
        t.0
    }
}

impl fmt::Display for MutationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of the hash-chained state log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mutation<D> {
    /// Hash of the previous entry, or the chain's genesis value.
    pub parent: Root,
    #[serde(rename = "type")]
    pub mutation_type: MutationType,
    /// Hashed as whole Unix seconds.
    pub timestamp: DateTime<Utc>,
    pub data: D,
}

impl<D: Merkleized> Mutation<D> {
    pub fn new(parent: Root, mutation_type: MutationType, timestamp: DateTime<Utc>, data: D) -> Self {
        Self {
            parent,
            mutation_type,
            timestamp,
            data,
        }
    }

    pub fn hash(&self) -> Result<Root> {
        self.hash_tree_root()
    }
}

fn unix_seconds(timestamp: &DateTime<Utc>) -> Result<u64> {
    u64::try_from(timestamp.timestamp())
        .map_err(|_| Error::validation(format!("timestamp before unix epoch: {}", timestamp)))
}

impl<D: Merkleized> Merkleized for Mutation<D> {
    fn hash_tree_root_with(&self, hh: &mut Hasher) -> Result<()> {
        let index = hh.index();

        hh.put_bytes_n(self.parent.as_slice(), 32)?;
        hh.put_byte_list(self.mutation_type.as_str().as_bytes(), MAX_TYPE_LEN, "Type")?;
        hh.put_uint64(unix_seconds(&self.timestamp)?);
        self.data.hash_tree_root_with(hh)?;

        hh.merkleize(index);
        Ok(())
    }
}

/// A mutation with its hash and the operator signature over that hash.
///
/// `hash` is stored, not derived; verifiers call
/// [`SignedMutation::verify_hash`] rather than trusting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedMutation<D> {
    pub mutation: Mutation<D>,
    pub hash: Root,
    #[serde(with = "hex_vec")]
    pub signer: Vec<u8>,
    #[serde(with = "hex_vec")]
    pub signature: Vec<u8>,
}

impl<D: Merkleized> SignedMutation<D> {
    /// Computes the mutation hash and attaches the signer and signature.
    pub fn new(
        mutation: Mutation<D>,
        signer: impl Into<Vec<u8>>,
        signature: impl Into<Vec<u8>>,
    ) -> Result<Self> {
        let signer = signer.into();
        let signature = signature.into();
        if signer.len() > MAX_SIGNER_LEN {
            return Err(Error::size("Signer", signer.len(), MAX_SIGNER_LEN));
        }
        if signature.len() > MAX_SIGNATURE_LEN {
            return Err(Error::size("Signature", signature.len(), MAX_SIGNATURE_LEN));
        }

        let hash = mutation.hash()?;
        Ok(Self {
            mutation,
            hash,
            signer,
            signature,
        })
    }

    /// Recomputes the mutation hash and checks it against the stored one.
    pub fn verify_hash(&self) -> Result<()> {
        let computed = self.mutation.hash()?;
        if computed != self.hash {
            return Err(Error::validation(format!(
                "mutation hash mismatch: stored {}, computed {}",
                self.hash, computed
            )));
        }
        Ok(())
    }
}

impl<D: Merkleized> Merkleized for SignedMutation<D> {
    fn hash_tree_root_with(&self, hh: &mut Hasher) -> Result<()> {
        let index = hh.index();

        self.mutation.hash_tree_root_with(hh)?;
        hh.put_bytes_n(self.hash.as_slice(), 32)?;
        hh.put_byte_list(&self.signer, MAX_SIGNER_LEN, "Signer")?;
        hh.put_byte_list(&self.signature, MAX_SIGNATURE_LEN, "Signature")?;

        hh.merkleize(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::{self, TestData};
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().unwrap()
    }

    fn mutation(type_len: usize) -> Mutation<TestData> {
        Mutation::new(
            Root::ZERO,
            MutationType::new("t".repeat(type_len)).unwrap(),
            at(1_700_000_000),
            fixtures::test_data(1),
        )
    }

    #[test]
    fn test_type_limit() {
        assert!(mutation(MAX_TYPE_LEN).hash().is_ok());
        let err = MutationType::new("t".repeat(MAX_TYPE_LEN + 1)).unwrap_err();
        assert!(err.is_size());
    }

    #[test]
    fn test_signer_and_signature_limits() {
        let ok = SignedMutation::new(mutation(8), vec![1; 256], vec![2; 256]).unwrap();
        assert!(ok.hash_tree_root().is_ok());

        assert!(SignedMutation::new(mutation(8), vec![1; 257], vec![2; 1])
            .unwrap_err()
            .is_size());
        assert!(SignedMutation::new(mutation(8), vec![1; 1], vec![2; 257])
            .unwrap_err()
            .is_size());

        // Bypassing the constructor still fails at hashing time.
        let mut oversized = ok.clone();
        oversized.signature = vec![2; 257];
        assert!(matches!(
            oversized.hash_tree_root(),
            Err(Error::Size { ref field, len: 257, limit: 256 }) if field == "Signature"
        ));
    }

    #[test]
    fn test_hash_is_deterministic() {
        let a = mutation(8);
        let b = mutation(8);
        assert_eq!(a.hash().unwrap(), b.hash().unwrap());
    }

    #[test]
    fn test_sub_second_precision_is_not_hashed() {
        let a = mutation(8);
        let mut b = a.clone();
        b.timestamp = Utc.timestamp_opt(1_700_000_000, 999).single().unwrap();
        assert_eq!(a.hash().unwrap(), b.hash().unwrap());
    }

    #[test]
    fn test_pre_epoch_timestamp_fails() {
        let mut m = mutation(8);
        m.timestamp = at(-1);
        assert!(m.hash().unwrap_err().is_validation());
    }

    #[test]
    fn test_field_order_matters() {
        struct Swapped<'a>(&'a Mutation<TestData>);

        impl Merkleized for Swapped<'_> {
            fn hash_tree_root_with(&self, hh: &mut Hasher) -> Result<()> {
                let index = hh.index();
                hh.put_byte_list(self.0.mutation_type.as_str().as_bytes(), MAX_TYPE_LEN, "Type")?;
                hh.put_bytes_n(self.0.parent.as_slice(), 32)?;
                hh.put_uint64(self.0.timestamp.timestamp() as u64);
                self.0.data.hash_tree_root_with(hh)?;
                hh.merkleize(index);
                Ok(())
            }
        }

        let m = mutation(8);
        assert_ne!(m.hash().unwrap(), Swapped(&m).hash_tree_root().unwrap());
    }

    #[test]
    fn test_verify_hash_detects_tampering() {
        let signed = SignedMutation::new(mutation(8), vec![1; 33], vec![2; 65]).unwrap();
        assert!(signed.verify_hash().is_ok());

        let mut tampered = signed.clone();
        tampered.mutation.data.count += 1;
        assert!(tampered.verify_hash().unwrap_err().is_validation());
    }

    #[test]
    fn test_json_shape() {
        let signed = SignedMutation::new(mutation(3), vec![0xaa], vec![0xbb, 0xcc]).unwrap();
        let value = serde_json::to_value(&signed).unwrap();
        assert_eq!(value["mutation"]["type"], "ttt");
        assert_eq!(value["mutation"]["timestamp"], "2023-11-14T22:13:20Z");
        assert_eq!(value["signer"], "0xaa");
        assert_eq!(value["signature"], "0xbbcc");

        let back: SignedMutation<TestData> = serde_json::from_value(value).unwrap();
        assert_eq!(back, signed);

        let long = serde_json::json!("x".repeat(65));
        assert!(serde_json::from_value::<MutationType>(long).is_err());
    }
}
