use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Consensus fork a versioned payload belongs to.
///
/// `Unknown` is the zero value producers may hand over before a fork is
/// picked; it has no tag and is rejected by every validating constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum DataVersion {
    #[default]
    Unknown,
    Phase0,
    Altair,
    Bellatrix,
    Capella,
    Deneb,
}

impl DataVersion {
    pub const ALL: [DataVersion; 5] = [
        DataVersion::Phase0,
        DataVersion::Altair,
        DataVersion::Bellatrix,
        DataVersion::Capella,
        DataVersion::Deneb,
    ];

    /// Stable string tag used in JSON envelopes.
    pub fn name(self) -> Result<&'static str> {
        match self {
            Self::Phase0 => Ok("phase0"),
            Self::Altair => Ok("altair"),
            Self::Bellatrix => Ok("bellatrix"),
            Self::Capella => Ok("capella"),
            Self::Deneb => Ok("deneb"),
            Self::Unknown => Err(Error::validation("unknown version")),
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "phase0" => Ok(Self::Phase0),
            "altair" => Ok(Self::Altair),
            "bellatrix" => Ok(Self::Bellatrix),
            "capella" => Ok(Self::Capella),
            "deneb" => Ok(Self::Deneb),
            other => Err(Error::serialization(format!("unknown version: {}", other))),
        }
    }

    /// Numeric id used by the binary frame.
    pub fn id(self) -> u64 {
        match self {
            Self::Unknown => 0,
            Self::Phase0 => 1,
            Self::Altair => 2,
            Self::Bellatrix => 3,
            Self::Capella => 4,
            Self::Deneb => 5,
        }
    }

    pub fn from_id(id: u64) -> Result<Self> {
        match id {
            1 => Ok(Self::Phase0),
            2 => Ok(Self::Altair),
            3 => Ok(Self::Bellatrix),
            4 => Ok(Self::Capella),
            5 => Ok(Self::Deneb),
            other => Err(Error::serialization(format!("unknown version id: {}", other))),
        }
    }
}

impl fmt::Display for DataVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or("unknown"))
    }
}

impl Serialize for DataVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let name = self.name().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(name)
    }
}

impl<'de> Deserialize<'de> for DataVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::from_name(&name).map_err(serde::de::Error::custom)
    }
}

/// Builder API version of a validator registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BuilderVersion {
    #[default]
    Unknown,
    V1,
}

impl BuilderVersion {
    pub fn name(self) -> Result<&'static str> {
        match self {
            Self::V1 => Ok("v1"),
            Self::Unknown => Err(Error::validation("unknown version")),
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "v1" => Ok(Self::V1),
            other => Err(Error::serialization(format!("unknown version: {}", other))),
        }
    }
}

impl fmt::Display for BuilderVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or("unknown"))
    }
}

impl Serialize for BuilderVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let name = self.name().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(name)
    }
}

impl<'de> Deserialize<'de> for BuilderVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::from_name(&name).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for version in DataVersion::ALL {
            let name = version.name().unwrap();
            assert_eq!(DataVersion::from_name(name).unwrap(), version);
            assert_eq!(DataVersion::from_id(version.id()).unwrap(), version);
        }
        assert_eq!(BuilderVersion::from_name("v1").unwrap(), BuilderVersion::V1);
    }

    #[test]
    fn test_unknown_has_no_tag() {
        assert!(DataVersion::Unknown.name().is_err());
        assert!(DataVersion::from_id(0).is_err());
        assert!(DataVersion::from_name("electra").is_err());
        assert!(BuilderVersion::Unknown.name().is_err());
        assert!(serde_json::to_string(&DataVersion::Unknown).is_err());
    }

    #[test]
    fn test_json_is_plain_tag() {
        assert_eq!(
            serde_json::to_string(&DataVersion::Capella).unwrap(),
            "\"capella\""
        );
        let v: BuilderVersion = serde_json::from_str("\"v1\"").unwrap();
        assert_eq!(v, BuilderVersion::V1);
    }
}
