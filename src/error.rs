use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Hash error ({context}): {message}")]
    Hash { context: String, message: String },

    #[error("Size error: field {field} has length {len}, limit {limit}")]
    Size {
        field: String,
        len: usize,
        limit: usize,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Cryptographic error: {0}")]
    Crypto(String),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Wraps a root computation failure with the kind/version it came from.
    pub fn hash(context: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Hash {
            context: context.into(),
            message: err.to_string(),
        }
    }

    pub fn size(field: impl Into<String>, len: usize, limit: usize) -> Self {
        Self::Size {
            field: field.into(),
            len,
            limit,
        }
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    pub fn crypto(msg: impl Into<String>) -> Self {
        Self::Crypto(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_size(&self) -> bool {
        matches!(self, Self::Size { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<ssz::DecodeError> for Error {
    fn from(err: ssz::DecodeError) -> Self {
        Self::Serialization(format!("ssz decode: {:?}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_error_carries_context() {
        let err = Error::hash("block capella", "nested list too long");
        assert_eq!(
            err.to_string(),
            "Hash error (block capella): nested list too long"
        );
    }

    #[test]
    fn test_size_error_display() {
        let err = Error::size("Type", 65, 64);
        assert!(err.is_size());
        assert_eq!(
            err.to_string(),
            "Size error: field Type has length 65, limit 64"
        );
    }
}
