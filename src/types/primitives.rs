use serde::{Deserialize, Serialize};
use ssz::{Decode, DecodeError, Encode};
use std::fmt;
use tree_hash::{PackedEncoding, TreeHash, TreeHashType, BYTES_PER_CHUNK};

/// 256-bit unsigned integer
pub use alloy_primitives::U256;

/// 32-byte SSZ root (also used for execution hashes and graffiti)
pub type Root = alloy_primitives::B256;

/// Signing domain for BLS signatures
pub type Domain = alloy_primitives::B256;

/// Beacon chain slot number
pub type Slot = u64;

/// Beacon chain epoch number
pub type Epoch = u64;

/// Validator index in the beacon state
pub type ValidatorIndex = u64;

/// Committee index within a slot
pub type CommitteeIndex = u64;

/// Amount in Gwei
pub type Gwei = u64;

/// Fork version for different beacon chain forks
pub type ForkVersion = [u8; 4];

/// Defines an SSZ `Vector[byte, N]` newtype with tree hashing, SSZ and `0x` hex JSON.
macro_rules! fixed_bytes {
    ($(#[$attr:meta])* $name:ident, $len:expr) => {
        $(#[$attr])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            pub const LEN: usize = $len;

            pub const fn zero() -> Self {
                Self([0u8; $len])
            }

            pub fn as_slice(&self) -> &[u8] {
                &self.0
            }

            /// Copies `bytes` into a new value; fails unless the length is exact.
            pub fn from_slice(bytes: &[u8]) -> crate::error::Result<Self> {
                if bytes.len() != $len {
                    return Err(crate::error::Error::serialization(format!(
                        "{} must be {} bytes, got {}",
                        stringify!($name),
                        $len,
                        bytes.len()
                    )));
                }
                let mut out = [0u8; $len];
                out.copy_from_slice(bytes);
                Ok(Self(out))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::zero()
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}(0x{})", stringify!($name), hex::encode(self.0))
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                format!("0x{}", hex::encode(self.0)).serialize(serializer)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let hex_string: String = String::deserialize(deserializer)?;
                let bytes = hex::decode(hex_string.trim_start_matches("0x"))
                    .map_err(serde::de::Error::custom)?;
                Self::from_slice(&bytes).map_err(serde::de::Error::custom)
            }
        }

        impl Encode for $name {
            fn is_ssz_fixed_len() -> bool {
                true
            }

            fn ssz_fixed_len() -> usize {
                $len
            }

            fn ssz_bytes_len(&self) -> usize {
                $len
            }

            fn ssz_append(&self, buf: &mut Vec<u8>) {
                buf.extend_from_slice(&self.0);
            }
        }

        impl Decode for $name {
            fn is_ssz_fixed_len() -> bool {
                true
            }

            fn ssz_fixed_len() -> usize {
                $len
            }

            fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
                if bytes.len() != $len {
                    return Err(DecodeError::InvalidByteLength {
                        len: bytes.len(),
                        expected: $len,
                    });
                }
                let mut out = [0u8; $len];
                out.copy_from_slice(bytes);
                Ok(Self(out))
            }
        }

        impl TreeHash for $name {
            fn tree_hash_type() -> TreeHashType {
                TreeHashType::Vector
            }

            fn tree_hash_packed_encoding(&self) -> PackedEncoding {
                unreachable!("Vector should never be packed.")
            }

            fn tree_hash_packing_factor() -> usize {
                unreachable!("Vector should never be packed.")
            }

            fn tree_hash_root(&self) -> tree_hash::Hash256 {
                tree_hash::merkle_root(&self.0, ($len as usize).div_ceil(BYTES_PER_CHUNK))
            }
        }
    };
}

fixed_bytes!(
    /// BLS12-381 signature (96 bytes, compressed G2 point)
    BlsSignature,
    96
);

fixed_bytes!(
    /// BLS12-381 public key (48 bytes, compressed G1 point)
    BlsPublicKey,
    48
);

fixed_bytes!(
    /// KZG commitment to a blob (48 bytes)
    KzgCommitment,
    48
);

fixed_bytes!(
    /// Execution layer address (20 bytes)
    ExecutionAddress,
    20
);

fixed_bytes!(
    /// 256-byte bloom filter for logs
    Bloom,
    256
);
