use sha2::Digest;
use sha2::Sha256;
use std::str::FromStr;
use thiserror::Error;

const SHA256_LEN: usize = 32;

/// A SHA-256 digest of some operation text.
///
/// Used as the identity of a descriptor (and of the composed document sent
/// over the wire), so two descriptors carrying byte-identical text always
/// share a hash.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ContentHash([u8; SHA256_LEN]);
impl ContentHash {
    pub fn of(text: &str) -> Self {
        let mut digest = Sha256::new();
        digest.update(text.as_bytes());
        let mut bytes = [0u8; SHA256_LEN];
        bytes.copy_from_slice(digest.finalize().as_slice());
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SHA256_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}
impl std::fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ContentHash({})", self.to_hex())
    }
}
impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}
impl FromStr for ContentHash {
    type Err = ContentHashParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s.trim())
            .map_err(|e| ContentHashParseError::InvalidHex(e.to_string()))?;
        let len = bytes.len();
        let bytes: [u8; SHA256_LEN] = bytes
            .try_into()
            .map_err(|_| ContentHashParseError::WrongLength(len))?;
        Ok(Self(bytes))
    }
}
impl serde::Serialize for ContentHash {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}
impl<'de> serde::Deserialize<'de> for ContentHash {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ContentHashParseError {
    #[error("Content hash is not valid hex: {0}")]
    InvalidHex(String),

    #[error("Content hash must be 32 bytes, found {0}")]
    WrongLength(usize),
}
