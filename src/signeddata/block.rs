//! Versioned proposals: full and blinded beacon blocks.
//!
//! Both travel as `{"version": <fork>, "block": <signed block>}` in JSON and
//! as a versioned frame in SSZ (see [`super::codec`]).

use super::codec::{append_frame_header, split_frame, FRAME_HEADER_LEN};
use super::{missing_payload, single_signature, unknown_version, SignedData, Signature, Surplus};
use crate::error::Result;
use crate::types::primitives::{Root, Slot};
use crate::types::version::DataVersion;
use crate::types::versioned::{RawVersionedSignedBeaconBlock, RawVersionedSignedBlindedBeaconBlock};
use crate::types::{altair, bellatrix, capella, deneb, phase0};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ssz::{Decode, DecodeError, Encode};
use tree_hash::TreeHash;

#[derive(Serialize)]
struct BlockEnvelopeRef<'a, T> {
    version: DataVersion,
    block: &'a T,
}

#[derive(Deserialize)]
struct BlockEnvelope {
    version: DataVersion,
    block: serde_json::Value,
}

/// A signed beacon block of any supported fork.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionedSignedBeaconBlock {
    Phase0(Box<phase0::SignedBeaconBlock>),
    Altair(Box<altair::SignedBeaconBlock>),
    Bellatrix(Box<bellatrix::SignedBeaconBlock>),
    Capella(Box<capella::SignedBeaconBlock>),
    Deneb(Box<deneb::SignedBeaconBlock>),
}

macro_rules! each_block {
    ($value:expr, $block:ident => $body:expr) => {
        match $value {
            VersionedSignedBeaconBlock::Phase0($block) => $body,
            VersionedSignedBeaconBlock::Altair($block) => $body,
            VersionedSignedBeaconBlock::Bellatrix($block) => $body,
            VersionedSignedBeaconBlock::Capella($block) => $body,
            VersionedSignedBeaconBlock::Deneb($block) => $body,
        }
    };
}

impl VersionedSignedBeaconBlock {
    /// Accepts `raw` only if the payload for its declared version is present.
    pub fn new(raw: RawVersionedSignedBeaconBlock) -> Result<Self> {
        let version = raw.version;
        let block = match version {
            DataVersion::Phase0 => raw.phase0.map(Self::Phase0),
            DataVersion::Altair => raw.altair.map(Self::Altair),
            DataVersion::Bellatrix => raw.bellatrix.map(Self::Bellatrix),
            DataVersion::Capella => raw.capella.map(Self::Capella),
            DataVersion::Deneb => raw.deneb.map(Self::Deneb),
            DataVersion::Unknown => return Err(unknown_version("block")),
        };
        block.ok_or_else(|| missing_payload("block", version))
    }

    pub fn version(&self) -> DataVersion {
        match self {
            Self::Phase0(_) => DataVersion::Phase0,
            Self::Altair(_) => DataVersion::Altair,
            Self::Bellatrix(_) => DataVersion::Bellatrix,
            Self::Capella(_) => DataVersion::Capella,
            Self::Deneb(_) => DataVersion::Deneb,
        }
    }

    pub fn slot(&self) -> Slot {
        each_block!(self, b => b.message.slot)
    }

    pub fn into_raw(self) -> RawVersionedSignedBeaconBlock {
        match self {
            Self::Phase0(b) => RawVersionedSignedBeaconBlock::phase0(*b),
            Self::Altair(b) => RawVersionedSignedBeaconBlock::altair(*b),
            Self::Bellatrix(b) => RawVersionedSignedBeaconBlock::bellatrix(*b),
            Self::Capella(b) => RawVersionedSignedBeaconBlock::capella(*b),
            Self::Deneb(b) => RawVersionedSignedBeaconBlock::deneb(*b),
        }
    }

    fn from_json(version: DataVersion, block: serde_json::Value) -> serde_json::Result<Self> {
        match version {
            DataVersion::Phase0 => serde_json::from_value(block).map(Self::Phase0),
            DataVersion::Altair => serde_json::from_value(block).map(Self::Altair),
            DataVersion::Bellatrix => serde_json::from_value(block).map(Self::Bellatrix),
            DataVersion::Capella => serde_json::from_value(block).map(Self::Capella),
            DataVersion::Deneb => serde_json::from_value(block).map(Self::Deneb),
            DataVersion::Unknown => Err(serde_json::Error::custom("unknown version")),
        }
    }
}

impl SignedData for VersionedSignedBeaconBlock {
    fn message_roots(&self) -> Result<Vec<Root>> {
        Ok(vec![each_block!(self, b => b.message.tree_hash_root())])
    }

    fn signatures(&self) -> Vec<Signature> {
        vec![each_block!(self, b => Signature::from_eth2(b.signature))]
    }

    fn set_signatures(&self, sigs: &[Signature]) -> Result<Self> {
        let sig = single_signature("block", sigs, Surplus::TakeFirst)?.to_eth2();
        let mut resp = self.clone();
        each_block!(&mut resp, b => b.signature = sig);
        Ok(resp)
    }
}

impl Serialize for VersionedSignedBeaconBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let version = self.version();
        each_block!(self, b => BlockEnvelopeRef { version, block: &**b }.serialize(serializer))
    }
}

impl<'de> Deserialize<'de> for VersionedSignedBeaconBlock {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let envelope = BlockEnvelope::deserialize(deserializer)?;
        Self::from_json(envelope.version, envelope.block).map_err(D::Error::custom)
    }
}

impl Encode for VersionedSignedBeaconBlock {
    fn is_ssz_fixed_len() -> bool {
        false
    }

    fn ssz_bytes_len(&self) -> usize {
        FRAME_HEADER_LEN + each_block!(self, b => b.ssz_bytes_len())
    }

    fn ssz_append(&self, buf: &mut Vec<u8>) {
        append_frame_header(self.version(), buf);
        each_block!(self, b => b.ssz_append(buf))
    }
}

impl Decode for VersionedSignedBeaconBlock {
    fn is_ssz_fixed_len() -> bool {
        false
    }

    fn from_ssz_bytes(bytes: &[u8]) -> std::result::Result<Self, DecodeError> {
        let (version, payload) = split_frame(bytes)?;
        match version {
            DataVersion::Phase0 => {
                phase0::SignedBeaconBlock::from_ssz_bytes(payload).map(|b| Self::Phase0(Box::new(b)))
            }
            DataVersion::Altair => {
                altair::SignedBeaconBlock::from_ssz_bytes(payload).map(|b| Self::Altair(Box::new(b)))
            }
            DataVersion::Bellatrix => bellatrix::SignedBeaconBlock::from_ssz_bytes(payload)
                .map(|b| Self::Bellatrix(Box::new(b))),
            DataVersion::Capella => capella::SignedBeaconBlock::from_ssz_bytes(payload)
                .map(|b| Self::Capella(Box::new(b))),
            DataVersion::Deneb => {
                deneb::SignedBeaconBlock::from_ssz_bytes(payload).map(|b| Self::Deneb(Box::new(b)))
            }
            DataVersion::Unknown => Err(DecodeError::BytesInvalid("unknown version".into())),
        }
    }
}

/// A signed blinded beacon block (bellatrix onwards).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionedSignedBlindedBeaconBlock {
    Bellatrix(Box<bellatrix::SignedBlindedBeaconBlock>),
    Capella(Box<capella::SignedBlindedBeaconBlock>),
    Deneb(Box<deneb::SignedBlindedBeaconBlock>),
}

macro_rules! each_blinded {
    ($value:expr, $block:ident => $body:expr) => {
        match $value {
            VersionedSignedBlindedBeaconBlock::Bellatrix($block) => $body,
            VersionedSignedBlindedBeaconBlock::Capella($block) => $body,
            VersionedSignedBlindedBeaconBlock::Deneb($block) => $body,
        }
    };
}

impl VersionedSignedBlindedBeaconBlock {
    /// Accepts `raw` only if the payload for its declared version is present.
    /// Phase0 and altair have no blinded form.
    pub fn new(raw: RawVersionedSignedBlindedBeaconBlock) -> Result<Self> {
        let version = raw.version;
        let block = match version {
            DataVersion::Bellatrix => raw.bellatrix.map(Self::Bellatrix),
            DataVersion::Capella => raw.capella.map(Self::Capella),
            DataVersion::Deneb => raw.deneb.map(Self::Deneb),
            DataVersion::Phase0 | DataVersion::Altair | DataVersion::Unknown => {
                return Err(unknown_version("blinded block"))
            }
        };
        block.ok_or_else(|| missing_payload("blinded block", version))
    }

    pub fn version(&self) -> DataVersion {
        match self {
            Self::Bellatrix(_) => DataVersion::Bellatrix,
            Self::Capella(_) => DataVersion::Capella,
            Self::Deneb(_) => DataVersion::Deneb,
        }
    }

    pub fn slot(&self) -> Slot {
        each_blinded!(self, b => b.message.slot)
    }

    pub fn into_raw(self) -> RawVersionedSignedBlindedBeaconBlock {
        match self {
            Self::Bellatrix(b) => RawVersionedSignedBlindedBeaconBlock::bellatrix(*b),
            Self::Capella(b) => RawVersionedSignedBlindedBeaconBlock::capella(*b),
            Self::Deneb(b) => RawVersionedSignedBlindedBeaconBlock::deneb(*b),
        }
    }

    fn from_json(version: DataVersion, block: serde_json::Value) -> serde_json::Result<Self> {
        match version {
            DataVersion::Bellatrix => serde_json::from_value(block).map(Self::Bellatrix),
            DataVersion::Capella => serde_json::from_value(block).map(Self::Capella),
            DataVersion::Deneb => serde_json::from_value(block).map(Self::Deneb),
            other => Err(serde_json::Error::custom(format!(
                "no blinded block for version {}",
                other
            ))),
        }
    }
}

impl SignedData for VersionedSignedBlindedBeaconBlock {
    fn message_roots(&self) -> Result<Vec<Root>> {
        Ok(vec![each_blinded!(self, b => b.message.tree_hash_root())])
    }

    fn signatures(&self) -> Vec<Signature> {
        vec![each_blinded!(self, b => Signature::from_eth2(b.signature))]
    }

    fn set_signatures(&self, sigs: &[Signature]) -> Result<Self> {
        let sig = single_signature("blinded block", sigs, Surplus::TakeFirst)?.to_eth2();
        let mut resp = self.clone();
        each_blinded!(&mut resp, b => b.signature = sig);
        Ok(resp)
    }
}

impl Serialize for VersionedSignedBlindedBeaconBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let version = self.version();
        each_blinded!(self, b => BlockEnvelopeRef { version, block: &**b }.serialize(serializer))
    }
}

impl<'de> Deserialize<'de> for VersionedSignedBlindedBeaconBlock {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let envelope = BlockEnvelope::deserialize(deserializer)?;
        Self::from_json(envelope.version, envelope.block).map_err(D::Error::custom)
    }
}

impl Encode for VersionedSignedBlindedBeaconBlock {
    fn is_ssz_fixed_len() -> bool {
        false
    }

    fn ssz_bytes_len(&self) -> usize {
        FRAME_HEADER_LEN + each_blinded!(self, b => b.ssz_bytes_len())
    }

    fn ssz_append(&self, buf: &mut Vec<u8>) {
        append_frame_header(self.version(), buf);
        each_blinded!(self, b => b.ssz_append(buf))
    }
}

impl Decode for VersionedSignedBlindedBeaconBlock {
    fn is_ssz_fixed_len() -> bool {
        false
    }

    fn from_ssz_bytes(bytes: &[u8]) -> std::result::Result<Self, DecodeError> {
        let (version, payload) = split_frame(bytes)?;
        match version {
            DataVersion::Bellatrix => bellatrix::SignedBlindedBeaconBlock::from_ssz_bytes(payload)
                .map(|b| Self::Bellatrix(Box::new(b))),
            DataVersion::Capella => capella::SignedBlindedBeaconBlock::from_ssz_bytes(payload)
                .map(|b| Self::Capella(Box::new(b))),
            DataVersion::Deneb => deneb::SignedBlindedBeaconBlock::from_ssz_bytes(payload)
                .map(|b| Self::Deneb(Box::new(b))),
            other => Err(DecodeError::BytesInvalid(format!(
                "no blinded block for version {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;
    use crate::types::primitives::BlsSignature;

    fn all_blocks() -> Vec<VersionedSignedBeaconBlock> {
        vec![
            VersionedSignedBeaconBlock::Phase0(Box::new(fixtures::phase0_block(1))),
            VersionedSignedBeaconBlock::Altair(Box::new(fixtures::altair_block(2))),
            VersionedSignedBeaconBlock::Bellatrix(Box::new(fixtures::bellatrix_block(3))),
            VersionedSignedBeaconBlock::Capella(Box::new(fixtures::capella_block(4))),
            VersionedSignedBeaconBlock::Deneb(Box::new(fixtures::deneb_block(5))),
        ]
    }

    fn all_blinded() -> Vec<VersionedSignedBlindedBeaconBlock> {
        vec![
            VersionedSignedBlindedBeaconBlock::Bellatrix(Box::new(
                fixtures::bellatrix_blinded_block(3),
            )),
            VersionedSignedBlindedBeaconBlock::Capella(Box::new(fixtures::capella_blinded_block(4))),
            VersionedSignedBlindedBeaconBlock::Deneb(Box::new(fixtures::deneb_blinded_block(5))),
        ]
    }

    #[test]
    fn test_new_requires_declared_payload() {
        let raw = RawVersionedSignedBeaconBlock {
            version: DataVersion::Capella,
            phase0: Some(Box::new(fixtures::phase0_block(1))),
            ..Default::default()
        };
        let err = VersionedSignedBeaconBlock::new(raw).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: no capella block");

        let err = VersionedSignedBeaconBlock::new(RawVersionedSignedBeaconBlock::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "Validation error: unknown version");
    }

    #[test]
    fn test_raw_round_trip() {
        for block in all_blocks() {
            let back = VersionedSignedBeaconBlock::new(block.clone().into_raw()).unwrap();
            assert_eq!(back, block);
        }
        for block in all_blinded() {
            let back = VersionedSignedBlindedBeaconBlock::new(block.clone().into_raw()).unwrap();
            assert_eq!(back, block);
        }
    }

    #[test]
    fn test_blinded_rejects_pre_bellatrix() {
        let raw = RawVersionedSignedBlindedBeaconBlock {
            version: DataVersion::Altair,
            ..Default::default()
        };
        assert!(VersionedSignedBlindedBeaconBlock::new(raw)
            .unwrap_err()
            .is_validation());
        let raw = RawVersionedSignedBlindedBeaconBlock {
            version: DataVersion::Deneb,
            ..Default::default()
        };
        let err = VersionedSignedBlindedBeaconBlock::new(raw).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: no deneb blinded block");
    }

    #[test]
    fn test_message_root_is_block_root() {
        let block = fixtures::capella_block(4);
        let expected = block.message.tree_hash_root();
        let versioned = VersionedSignedBeaconBlock::Capella(Box::new(block));
        assert_eq!(versioned.message_roots().unwrap(), vec![expected]);
    }

    #[test]
    fn test_set_signatures_leaves_original() {
        let sig = Signature::from_eth2(BlsSignature([0x77; 96]));
        for block in all_blocks() {
            let before = block.signatures();
            let signed = block.set_signatures(&[sig.clone()]).unwrap();
            assert_eq!(signed.signatures(), vec![sig.clone()]);
            assert_eq!(block.signatures(), before);
            assert_eq!(signed.message_roots().unwrap(), block.message_roots().unwrap());
            assert!(block.set_signatures(&[]).is_err());
        }
        for block in all_blinded() {
            let signed = block.set_signatures(&[sig.clone(), Signature::default()]).unwrap();
            assert_eq!(signed.signatures(), vec![sig.clone()]);
            assert_ne!(block.signatures(), signed.signatures());
        }
    }

    #[test]
    fn test_json_envelope() {
        for block in all_blocks() {
            let value = serde_json::to_value(&block).unwrap();
            assert_eq!(value["version"], block.version().name().unwrap());
            assert!(value["block"]["message"].is_object());
            let back: VersionedSignedBeaconBlock = serde_json::from_value(value).unwrap();
            assert_eq!(back, block);
        }
        for block in all_blinded() {
            let json = serde_json::to_string(&block).unwrap();
            let back: VersionedSignedBlindedBeaconBlock = serde_json::from_str(&json).unwrap();
            assert_eq!(back, block);
        }
    }

    #[test]
    fn test_json_rejects_unknown_tag() {
        let json = r#"{"version":"electra","block":{}}"#;
        assert!(serde_json::from_str::<VersionedSignedBeaconBlock>(json).is_err());

        let block = serde_json::to_value(fixtures::phase0_block(1)).unwrap();
        let json = serde_json::json!({"version": "phase0", "block": block});
        assert!(serde_json::from_value::<VersionedSignedBlindedBeaconBlock>(json).is_err());
    }

    #[test]
    fn test_ssz_frame() {
        for block in all_blocks() {
            let bytes = block.as_ssz_bytes();
            assert_eq!(&bytes[..8], &block.version().id().to_le_bytes());
            assert_eq!(&bytes[8..12], &12u32.to_le_bytes());
            assert_eq!(bytes.len(), block.ssz_bytes_len());
            assert_eq!(VersionedSignedBeaconBlock::from_ssz_bytes(&bytes).unwrap(), block);
        }
        for block in all_blinded() {
            let bytes = block.as_ssz_bytes();
            assert_eq!(
                VersionedSignedBlindedBeaconBlock::from_ssz_bytes(&bytes).unwrap(),
                block
            );
        }
    }

    #[test]
    fn test_blinded_ssz_rejects_phase0_frame() {
        let bytes = VersionedSignedBeaconBlock::Phase0(Box::new(fixtures::phase0_block(1)))
            .as_ssz_bytes();
        assert!(VersionedSignedBlindedBeaconBlock::from_ssz_bytes(&bytes).is_err());
    }
}
