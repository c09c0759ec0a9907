use super::{missing_payload, single_signature, unknown_version, SignedData, Signature, Surplus};
use crate::error::Result;
use crate::types::builder::SignedValidatorRegistration;
use crate::types::primitives::Root;
use crate::types::version::BuilderVersion;
use crate::types::versioned::RawVersionedSignedValidatorRegistration;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tree_hash::TreeHash;

/// A builder API validator registration. Travels as
/// `{"version": "v1", "registration": <signed registration>}`; it has no SSZ
/// form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionedSignedValidatorRegistration {
    V1(SignedValidatorRegistration),
}

impl VersionedSignedValidatorRegistration {
    pub fn new(raw: RawVersionedSignedValidatorRegistration) -> Result<Self> {
        match raw.version {
            BuilderVersion::V1 => raw
                .v1
                .map(Self::V1)
                .ok_or_else(|| missing_payload("registration", raw.version)),
            BuilderVersion::Unknown => Err(unknown_version("registration")),
        }
    }

    pub fn version(&self) -> BuilderVersion {
        match self {
            Self::V1(_) => BuilderVersion::V1,
        }
    }

    pub fn into_raw(self) -> RawVersionedSignedValidatorRegistration {
        match self {
            Self::V1(r) => RawVersionedSignedValidatorRegistration::v1(r),
        }
    }
}

impl SignedData for VersionedSignedValidatorRegistration {
    fn message_roots(&self) -> Result<Vec<Root>> {
        match self {
            Self::V1(r) => Ok(vec![r.message.tree_hash_root()]),
        }
    }

    fn signatures(&self) -> Vec<Signature> {
        match self {
            Self::V1(r) => vec![Signature::from_eth2(r.signature)],
        }
    }

    fn set_signatures(&self, sigs: &[Signature]) -> Result<Self> {
        let sig = single_signature("registration", sigs, Surplus::TakeFirst)?.to_eth2();
        let mut resp = self.clone();
        match &mut resp {
            Self::V1(r) => r.signature = sig,
        }
        Ok(resp)
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: BuilderVersion,
    registration: &'a SignedValidatorRegistration,
}

#[derive(Deserialize)]
struct Envelope {
    version: BuilderVersion,
    registration: serde_json::Value,
}

impl Serialize for VersionedSignedValidatorRegistration {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::V1(r) => EnvelopeRef {
                version: BuilderVersion::V1,
                registration: r,
            }
            .serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for VersionedSignedValidatorRegistration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let envelope = Envelope::deserialize(deserializer)?;
        match envelope.version {
            BuilderVersion::V1 => serde_json::from_value(envelope.registration)
                .map(Self::V1)
                .map_err(D::Error::custom),
            BuilderVersion::Unknown => Err(D::Error::custom("unknown version")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;
    use crate::types::primitives::BlsSignature;

    #[test]
    fn test_new_requires_v1_payload() {
        let raw = RawVersionedSignedValidatorRegistration {
            version: BuilderVersion::V1,
            v1: None,
        };
        let err = VersionedSignedValidatorRegistration::new(raw).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: no v1 registration");

        let raw = RawVersionedSignedValidatorRegistration::default();
        assert!(VersionedSignedValidatorRegistration::new(raw)
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_root_and_signature() {
        let reg = fixtures::registration();
        let expected = reg.message.tree_hash_root();
        let data = VersionedSignedValidatorRegistration::new(
            RawVersionedSignedValidatorRegistration::v1(reg),
        )
        .unwrap();
        assert_eq!(data.message_roots().unwrap(), vec![expected]);

        let sig = Signature::from_eth2(BlsSignature([4; 96]));
        let signed = data.set_signatures(&[sig.clone()]).unwrap();
        assert_eq!(signed.signatures(), vec![sig]);
        assert_ne!(data, signed);
        assert_eq!(signed.clone().into_raw().version, BuilderVersion::V1);
    }

    #[test]
    fn test_json_envelope() {
        let data = VersionedSignedValidatorRegistration::V1(fixtures::registration());
        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["version"], "v1");
        assert_eq!(value["registration"]["message"]["gas_limit"], "30000000");

        let back: VersionedSignedValidatorRegistration = serde_json::from_value(value).unwrap();
        assert_eq!(back, data);

        let bad = r#"{"version":"v2","registration":{}}"#;
        assert!(serde_json::from_str::<VersionedSignedValidatorRegistration>(bad).is_err());
    }
}
