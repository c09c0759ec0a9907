// Wire payload library: consensus containers per fork
pub mod altair;
pub mod bellatrix;
pub mod builder;
pub mod capella;
pub mod deneb;
pub mod phase0;
pub mod selection;

// Shared building blocks
pub mod primitives;
pub mod serde_utils;
pub mod version;
pub mod versioned;

pub use primitives::*;
pub use version::{BuilderVersion, DataVersion};
pub use versioned::{
    RawVersionedSignedBeaconBlock, RawVersionedSignedBlindedBeaconBlock,
    RawVersionedSignedValidatorRegistration,
};
