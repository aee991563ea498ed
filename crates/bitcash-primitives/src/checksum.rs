//! Fixed-size hash values

use std::fmt;
use std::str::FromStr;

use crate::PrimitiveError;

/// 256-bit checksum (32 bytes), text form lowercase hex without prefix
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Checksum256([u8; 32]);

impl Checksum256 {
    /// Size in bytes
    pub const LEN: usize = 32;

    /// All-zero checksum
    pub const ZERO: Checksum256 = Checksum256([0u8; 32]);

    /// Create from bytes
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Checksum256(bytes)
    }

    /// Create from slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, PrimitiveError> {
        let bytes: [u8; 32] = slice.try_into().map_err(|_| PrimitiveError::InvalidLength {
            expected: Self::LEN,
            got: slice.len(),
        })?;
        Ok(Checksum256(bytes))
    }

    /// Parse from hex string (an optional `0x` prefix is accepted)
    pub fn from_hex(s: &str) -> Result<Self, PrimitiveError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| PrimitiveError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Get as bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for Checksum256 {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Debug for Checksum256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Checksum256({})", self.to_hex())
    }
}

impl fmt::Display for Checksum256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<[u8; 32]> for Checksum256 {
    fn from(bytes: [u8; 32]) -> Self {
        Checksum256(bytes)
    }
}

impl AsRef<[u8]> for Checksum256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

serde_via_string!(Checksum256, "a 64 character hex string");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let hex_str = "e28174b34639a5ba006265f3641c8ffc1021d65c4cd12fbf242e5c6a6fde6a55";
        let sum: Checksum256 = hex_str.parse().unwrap();
        assert_eq!(sum.to_string(), hex_str);
        assert_eq!(sum.as_bytes()[0], 0xe2);
        assert_eq!(Checksum256::from_hex(&format!("0x{hex_str}")).unwrap(), sum);
    }

    #[test]
    fn test_invalid_length() {
        let err = Checksum256::from_hex("abcd").unwrap_err();
        assert_eq!(err, PrimitiveError::InvalidLength { expected: 32, got: 2 });
        assert!(Checksum256::from_hex("zz").is_err());
    }
}
