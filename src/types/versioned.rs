//! Unvalidated versioned containers as produced by beacon node and builder
//! clients: a version tag plus one optional payload per fork. Exactly the
//! payload matching `version` is expected to be set; the signed-data
//! constructors enforce that.

use crate::types::version::{BuilderVersion, DataVersion};
use crate::types::{altair, bellatrix, builder, capella, deneb, phase0};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawVersionedSignedBeaconBlock {
    pub version: DataVersion,
    pub phase0: Option<Box<phase0::SignedBeaconBlock>>,
    pub altair: Option<Box<altair::SignedBeaconBlock>>,
    pub bellatrix: Option<Box<bellatrix::SignedBeaconBlock>>,
    pub capella: Option<Box<capella::SignedBeaconBlock>>,
    pub deneb: Option<Box<deneb::SignedBeaconBlock>>,
}

impl RawVersionedSignedBeaconBlock {
    pub fn phase0(block: phase0::SignedBeaconBlock) -> Self {
        Self {
            version: DataVersion::Phase0,
            phase0: Some(Box::new(block)),
            ..Default::default()
        }
    }

    pub fn altair(block: altair::SignedBeaconBlock) -> Self {
        Self {
            version: DataVersion::Altair,
            altair: Some(Box::new(block)),
            ..Default::default()
        }
    }

    pub fn bellatrix(block: bellatrix::SignedBeaconBlock) -> Self {
        Self {
            version: DataVersion::Bellatrix,
            bellatrix: Some(Box::new(block)),
            ..Default::default()
        }
    }

    pub fn capella(block: capella::SignedBeaconBlock) -> Self {
        Self {
            version: DataVersion::Capella,
            capella: Some(Box::new(block)),
            ..Default::default()
        }
    }

    pub fn deneb(block: deneb::SignedBeaconBlock) -> Self {
        Self {
            version: DataVersion::Deneb,
            deneb: Some(Box::new(block)),
            ..Default::default()
        }
    }
}

/// Blinded blocks exist from bellatrix onwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawVersionedSignedBlindedBeaconBlock {
    pub version: DataVersion,
    pub bellatrix: Option<Box<bellatrix::SignedBlindedBeaconBlock>>,
    pub capella: Option<Box<capella::SignedBlindedBeaconBlock>>,
    pub deneb: Option<Box<deneb::SignedBlindedBeaconBlock>>,
}

impl RawVersionedSignedBlindedBeaconBlock {
    pub fn bellatrix(block: bellatrix::SignedBlindedBeaconBlock) -> Self {
        Self {
            version: DataVersion::Bellatrix,
            bellatrix: Some(Box::new(block)),
            ..Default::default()
        }
    }

    pub fn capella(block: capella::SignedBlindedBeaconBlock) -> Self {
        Self {
            version: DataVersion::Capella,
            capella: Some(Box::new(block)),
            ..Default::default()
        }
    }

    pub fn deneb(block: deneb::SignedBlindedBeaconBlock) -> Self {
        Self {
            version: DataVersion::Deneb,
            deneb: Some(Box::new(block)),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawVersionedSignedValidatorRegistration {
    pub version: BuilderVersion,
    pub v1: Option<builder::SignedValidatorRegistration>,
}

impl RawVersionedSignedValidatorRegistration {
    pub fn v1(registration: builder::SignedValidatorRegistration) -> Self {
        Self {
            version: BuilderVersion::V1,
            v1: Some(registration),
        }
    }
}
