//! Caller and owner identities

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Opaque 32-byte identity for owners, grantees, and administrators.
///
/// The all-zeroes value is the "null identity": it is never a valid owner,
/// grantee, or administrator, and every mutating operation rejects it. It
/// exists so a zeroed identity arriving off the wire is caught by input
/// validation rather than by a type-level hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity(pub [u8; 32]);

impl Identity {
    /// The null identity (all zeroes)
    pub const ZERO: Identity = Identity([0u8; 32]);

    /// Create an identity from raw bytes
    pub fn new(bytes: [u8; 32]) -> Self {
        Identity(bytes)
    }

    /// Create an identity from a slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, crate::error::CoreError> {
        if slice.len() != 32 {
            return Err(crate::error::CoreError::invalid("Identity must be 32 bytes"));
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(slice);
        Ok(Identity(bytes))
    }

    /// Parse an identity from a hex string (with or without `0x` prefix)
    pub fn from_hex(s: &str) -> Result<Self, crate::error::CoreError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s)?;
        Self::from_slice(&bytes)
    }

    /// Get the identity as bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to a `0x`-prefixed hex string
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Whether this is the null identity
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Display for Identity {
    // Abbreviated for logs; use `to_hex` for the full value
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", &hex::encode(self.0)[..8])
    }
}

impl FromStr for Identity {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Identity::from_hex(s)
    }
}

impl Serialize for Identity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Identity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Identity::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_from_slice() {
        let bytes = [7u8; 32];
        let id = Identity::from_slice(&bytes).unwrap();
        assert_eq!(id.as_bytes(), &bytes);

        let invalid = [3u8; 16];
        assert!(Identity::from_slice(&invalid).is_err());
    }

    #[test]
    fn test_identity_hex_roundtrip() {
        let id = Identity::new([0xab; 32]);
        let parsed = Identity::from_hex(&id.to_hex()).unwrap();
        assert_eq!(id, parsed);

        // Without the 0x prefix
        let parsed = Identity::from_hex(&hex::encode([0xab; 32])).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_zero_identity() {
        assert!(Identity::ZERO.is_zero());
        assert!(!Identity::new([1u8; 32]).is_zero());
    }

    #[test]
    fn test_identity_serde() {
        let id = Identity::new([0x11; 32]);
        let json = serde_json::to_string(&id).unwrap();
        assert!(json.contains("0x11"));
        let back: Identity = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
