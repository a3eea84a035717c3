//! Resource identifiers

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Stable identifier for a remotely-stored resource (32-byte BLAKE3 digest).
///
/// Derived deterministically from the resource's canonical location string,
/// so two registrations of the same location always collide on the same id.
/// The digest never changes over the resource's lifetime; updating the
/// recorded location string does not re-key the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(pub [u8; 32]);

impl ResourceId {
    /// Create a resource ID from raw bytes
    pub fn new(bytes: [u8; 32]) -> Self {
        ResourceId(bytes)
    }

    /// Derive the resource ID from a canonical location string
    pub fn from_location(location_uri: &str) -> Self {
        let hash = blake3::hash(location_uri.as_bytes());
        ResourceId(*hash.as_bytes())
    }

    /// Create a resource ID from a slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, crate::error::CoreError> {
        if slice.len() != 32 {
            return Err(crate::error::CoreError::invalid(
                "ResourceId must be 32 bytes",
            ));
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(slice);
        Ok(ResourceId(bytes))
    }

    /// Parse a resource ID from a hex string (with or without `0x` prefix)
    pub fn from_hex(s: &str) -> Result<Self, crate::error::CoreError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s)?;
        Self::from_slice(&bytes)
    }

    /// Get the resource ID as bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to a `0x`-prefixed hex string
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", &hex::encode(self.0)[..8])
    }
}

impl FromStr for ResourceId {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceId::from_hex(s)
    }
}

impl Serialize for ResourceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ResourceId::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
