//! Beacon API JSON conventions: integers are decimal strings, byte lists are
//! `0x`-prefixed hex.

use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum QuotedOrNumber {
    Quoted(String),
    Number(u64),
}

impl QuotedOrNumber {
    fn into_u64<E: serde::de::Error>(self) -> Result<u64, E> {
        match self {
            Self::Quoted(s) => s.parse().map_err(E::custom),
            Self::Number(n) => Ok(n),
        }
    }
}

fn decode_hex<E: serde::de::Error>(s: &str) -> Result<Vec<u8>, E> {
    hex::decode(s.trim_start_matches("0x")).map_err(E::custom)
}

/// `u64` as a decimal string; accepts bare numbers on input.
pub mod quoted_u64 {
    use super::*;

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        QuotedOrNumber::deserialize(deserializer)?.into_u64()
    }
}

/// Bounded list of `u64` as a sequence of decimal strings.
pub mod quoted_u64_list {
    use super::*;
    use serde::ser::SerializeSeq;
    use ssz_types::{typenum::Unsigned, VariableList};

    pub fn serialize<S, N>(list: &VariableList<u64, N>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        N: Unsigned,
    {
        let mut seq = serializer.serialize_seq(Some(list.len()))?;
        for value in list.iter() {
            seq.serialize_element(&value.to_string())?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D, N>(deserializer: D) -> Result<VariableList<u64, N>, D::Error>
    where
        D: Deserializer<'de>,
        N: Unsigned,
    {
        let values = Vec::<QuotedOrNumber>::deserialize(deserializer)?
            .into_iter()
            .map(QuotedOrNumber::into_u64)
            .collect::<Result<Vec<u64>, D::Error>>()?;
        VariableList::new(values).map_err(|e| serde::de::Error::custom(format!("{:?}", e)))
    }
}

/// `U256` as a decimal string.
pub mod quoted_u256 {
    use super::*;
    use alloy_primitives::U256;

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let s = String::deserialize(deserializer)?;
        U256::from_str_radix(&s, 10).map_err(serde::de::Error::custom)
    }
}

/// Bounded byte list as a `0x` hex string.
pub mod hex_byte_list {
    use super::*;
    use ssz_types::{typenum::Unsigned, VariableList};

    pub fn serialize<S, N>(bytes: &VariableList<u8, N>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        N: Unsigned,
    {
        serializer.serialize_str(&format!("0x{}", hex::encode(&bytes[..])))
    }

    pub fn deserialize<'de, D, N>(deserializer: D) -> Result<VariableList<u8, N>, D::Error>
    where
        D: Deserializer<'de>,
        N: Unsigned,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = decode_hex(&s)?;
        VariableList::new(bytes).map_err(|e| serde::de::Error::custom(format!("{:?}", e)))
    }
}

/// Bounded list of bounded byte lists (execution transactions).
pub mod hex_byte_list_list {
    use super::*;
    use serde::ser::SerializeSeq;
    use ssz_types::{typenum::Unsigned, VariableList};

    pub fn serialize<S, N, M>(
        lists: &VariableList<VariableList<u8, M>, N>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        N: Unsigned,
        M: Unsigned,
    {
        let mut seq = serializer.serialize_seq(Some(lists.len()))?;
        for bytes in lists.iter() {
            seq.serialize_element(&format!("0x{}", hex::encode(&bytes[..])))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D, N, M>(
        deserializer: D,
    ) -> Result<VariableList<VariableList<u8, M>, N>, D::Error>
    where
        D: Deserializer<'de>,
        N: Unsigned,
        M: Unsigned,
    {
        let mut lists = Vec::new();
        for s in Vec::<String>::deserialize(deserializer)? {
            let bytes = decode_hex(&s)?;
            lists.push(
                VariableList::new(bytes)
                    .map_err(|e| serde::de::Error::custom(format!("{:?}", e)))?,
            );
        }
        VariableList::new(lists).map_err(|e| serde::de::Error::custom(format!("{:?}", e)))
    }
}

/// `0x` hex for an unbounded byte vector.
pub mod hex_vec {
    use super::*;

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        decode_hex(&s)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use ssz_types::{typenum::U4, VariableList};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        #[serde(with = "super::quoted_u64")]
        slot: u64,
        #[serde(with = "super::quoted_u64_list")]
        indices: VariableList<u64, U4>,
        #[serde(with = "super::hex_byte_list")]
        extra: VariableList<u8, U4>,
    }

    #[test]
    fn test_quoted_fields() {
        let sample = Sample {
            slot: 12,
            indices: VariableList::new(vec![1, 2]).unwrap(),
            extra: VariableList::new(vec![0xde, 0xad]).unwrap(),
        };
        let json = serde_json::to_string(&sample).unwrap();
        assert_eq!(json, r#"{"slot":"12","indices":["1","2"],"extra":"0xdead"}"#);
        assert_eq!(serde_json::from_str::<Sample>(&json).unwrap(), sample);
    }

    #[test]
    fn test_bare_numbers_accepted() {
        let sample: Sample =
            serde_json::from_str(r#"{"slot":7,"indices":[3],"extra":"0x"}"#).unwrap();
        assert_eq!(sample.slot, 7);
        assert_eq!(sample.indices[0], 3);
        assert!(sample.extra.is_empty());
    }

    #[test]
    fn test_list_limit_enforced() {
        let res = serde_json::from_str::<Sample>(r#"{"slot":"1","indices":[],"extra":"0x0102030405"}"#);
        assert!(res.is_err());
    }
}
