#![doc = include_str!("../README.md")]
// Clippy configuration for release
#![allow(clippy::too_many_arguments)]
#![allow(clippy::large_enum_variant)]

// Public modules
pub mod config;
pub mod domain;
pub mod error;
pub mod merkle;
pub mod signeddata;
pub mod state;
pub mod types;

// Test utilities (unstable, not part of public API)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export main types at crate root for convenience
pub use crate::config::ChainSpec;
pub use crate::error::{Error, Result};
pub use crate::merkle::{Hasher, HasherPool, Merkleized};
pub use crate::signeddata::{AnySignedData, ParSignedData, Signature, SignedData};
pub use crate::state::{Mutation, MutationType, SignedMutation};
pub use crate::types::{
    primitives::{Domain, Epoch, Root, Slot},
    DataVersion,
};

/// Contains the recommended set of types needed for most signing workflows.
/// For the individual kinds (e.g. [`signeddata::Attestation`]), import them
/// from [`crate::signeddata`].
pub mod prelude {
    pub use crate::config::ChainSpec;
    pub use crate::domain::{DomainName, EpochLookup, ForkDomains, SigningDomain};
    pub use crate::error::{Error, Result};
    pub use crate::merkle::Merkleized;
    pub use crate::signeddata::{
        hash_message_roots, AnySignedData, ParSignedData, Signature, SignedData,
        VersionedSignedBeaconBlock,
    };
    pub use crate::state::{verify_chain, Mutation, MutationType, SignedMutation};
    pub use crate::types::{
        primitives::{Root, Slot},
        DataVersion, RawVersionedSignedBeaconBlock,
    };
}
