use thiserror::Error;

pub type Result<T> = std::result::Result<T, HdkError>;

#[derive(Error, Debug)]
pub enum HdkError {
    #[error("Seed produces an invalid master key")]
    InvalidSeed,

    #[error("Derived key is invalid, try the next index")]
    InvalidDerivedKey,

    #[error("Cannot derive hardened child from public key")]
    CannotDeriveHardenedFromPublic,

    #[error("Depth limit reached, cannot derive past depth 255")]
    DepthOverflow,

    #[error("Invalid path segment: {0:?}")]
    InvalidPathSegment(String),

    #[error("Wrong length: expected {expected} bytes, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("Hash length is wrong: expected 20 bytes, got {0}")]
    InvalidHashLength(usize),

    #[error("Data too short to carry a checksum: {0} bytes")]
    MissingChecksum(usize),

    #[error("Checksum doesn't match")]
    ChecksumMismatch,

    #[error("Invalid character {character:?} at index {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("Value is too large for {0} bytes")]
    ValueTooLarge(usize),

    #[error("Invalid key material: {0}")]
    InvalidKeyMaterial(String),

    #[error("Unknown version bytes: {0}")]
    UnknownVersion(String),

    #[error("Operation requires a private key")]
    MissingPrivateKey,

    #[error("Random number generator failed: {0}")]
    Random(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = HdkError::InvalidCharacter { character: '0', position: 3 };
        assert_eq!(err.to_string(), "Invalid character '0' at index 3");

        let err = HdkError::WrongLength { expected: 82, actual: 81 };
        assert_eq!(err.to_string(), "Wrong length: expected 82 bytes, got 81");

        let err = HdkError::InvalidPathSegment("abc".to_string());
        assert_eq!(err.to_string(), "Invalid path segment: \"abc\"");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: HdkError = io.into();
        assert!(matches!(err, HdkError::Io(_)));
    }
}
