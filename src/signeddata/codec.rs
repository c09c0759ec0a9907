//! Shared encoding helpers: the versioned SSZ frame and the SSZ passthrough
//! for single-version kinds.

use crate::types::version::DataVersion;
use ssz::DecodeError;

/// `version: u64` followed by one `u32` offset to the payload.
pub(crate) const FRAME_HEADER_LEN: usize = 8 + ssz::BYTES_PER_LENGTH_OFFSET;

pub(crate) fn append_frame_header(version: DataVersion, buf: &mut Vec<u8>) {
    buf.extend_from_slice(&version.id().to_le_bytes());
    buf.extend_from_slice(&(FRAME_HEADER_LEN as u32).to_le_bytes());
}

/// Splits a versioned frame into its version and payload bytes.
pub(crate) fn split_frame(bytes: &[u8]) -> Result<(DataVersion, &[u8]), DecodeError> {
    if bytes.len() < FRAME_HEADER_LEN {
        return Err(DecodeError::InvalidByteLength {
            len: bytes.len(),
            expected: FRAME_HEADER_LEN,
        });
    }

    let mut id = [0u8; 8];
    id.copy_from_slice(&bytes[..8]);
    let version = DataVersion::from_id(u64::from_le_bytes(id))
        .map_err(|e| DecodeError::BytesInvalid(e.to_string()))?;

    let mut offset = [0u8; 4];
    offset.copy_from_slice(&bytes[8..FRAME_HEADER_LEN]);
    let offset = u32::from_le_bytes(offset) as usize;
    if offset != FRAME_HEADER_LEN {
        return Err(DecodeError::OffsetOutOfBounds(offset));
    }

    Ok((version, &bytes[FRAME_HEADER_LEN..]))
}

/// Implements `ssz::Encode`/`ssz::Decode` for a newtype by delegating to its
/// wrapped payload.
macro_rules! ssz_passthrough {
    ($wrapper:ident, $inner:ty) => {
        impl ssz::Encode for $wrapper {
            fn is_ssz_fixed_len() -> bool {
                <$inner as ssz::Encode>::is_ssz_fixed_len()
            }

            fn ssz_fixed_len() -> usize {
                <$inner as ssz::Encode>::ssz_fixed_len()
            }

            fn ssz_bytes_len(&self) -> usize {
                <$inner as ssz::Encode>::ssz_bytes_len(&self.0)
            }

            fn ssz_append(&self, buf: &mut Vec<u8>) {
                <$inner as ssz::Encode>::ssz_append(&self.0, buf)
            }
        }

        impl ssz::Decode for $wrapper {
            fn is_ssz_fixed_len() -> bool {
                <$inner as ssz::Decode>::is_ssz_fixed_len()
            }

            fn ssz_fixed_len() -> usize {
                <$inner as ssz::Decode>::ssz_fixed_len()
            }

            fn from_ssz_bytes(bytes: &[u8]) -> ::std::result::Result<Self, ssz::DecodeError> {
                <$inner as ssz::Decode>::from_ssz_bytes(bytes).map(Self)
            }
        }
    };
}

pub(crate) use ssz_passthrough;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_header() {
        let mut buf = Vec::new();
        append_frame_header(DataVersion::Capella, &mut buf);
        buf.extend_from_slice(&[0xaa, 0xbb]);

        let (version, payload) = split_frame(&buf).unwrap();
        assert_eq!(version, DataVersion::Capella);
        assert_eq!(payload, &[0xaa, 0xbb]);
    }

    #[test]
    fn test_frame_rejects_unknown_version() {
        let mut buf = 0u64.to_le_bytes().to_vec();
        buf.extend_from_slice(&12u32.to_le_bytes());
        assert!(matches!(split_frame(&buf), Err(DecodeError::BytesInvalid(_))));
    }

    #[test]
    fn test_frame_rejects_bad_offset() {
        let mut buf = 1u64.to_le_bytes().to_vec();
        buf.extend_from_slice(&16u32.to_le_bytes());
        buf.extend_from_slice(&[0u8; 4]);
        assert_eq!(split_frame(&buf), Err(DecodeError::OffsetOutOfBounds(16)));
    }

    #[test]
    fn test_frame_too_short() {
        assert!(split_frame(&[1, 0, 0]).is_err());
    }
}
