//! secp256k1 keys and their text formats

use std::fmt;
use std::str::FromStr;

use bitcash_codec::{CodecError, Decoder, Encoder, Pack, Unpack};
use bitcash_primitives::Checksum256;
use k256::ecdsa::{SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroizing;

use crate::hash::{double_sha_checksum, ripemd_checksum};
use crate::{CryptoError, Signature};

const WIF_VERSION: u8 = 0x80;
const PVT_K1_PREFIX: &str = "PVT_K1_";
const PUB_K1_PREFIX: &str = "PUB_K1_";
const LEGACY_PUB_PREFIX: &str = "EOS";
const K1_SUFFIX: &[u8] = b"K1";

/// Key type byte of K1 keys and signatures in binary form
pub(crate) const KEY_TYPE_K1: u8 = 0;

/// secp256k1 private key
///
/// Parses legacy WIF (`5…`) and `PVT_K1_…` text. `Debug` never prints the
/// key material.
#[derive(Clone)]
pub struct PrivateKey {
    inner: SigningKey,
}

impl PrivateKey {
    /// Generate a new random key
    pub fn random() -> Self {
        PrivateKey { inner: SigningKey::random(&mut OsRng) }
    }

    /// Create from 32 raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let inner = SigningKey::from_slice(bytes)
            .map_err(|_| CryptoError::InvalidPrivateKey("not a valid secp256k1 scalar".into()))?;
        Ok(PrivateKey { inner })
    }

    /// Raw 32 bytes, zeroized on drop
    pub fn to_bytes(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.inner.to_bytes().into())
    }

    /// Corresponding public key
    pub fn public_key(&self) -> PublicKey {
        PublicKey { inner: *self.inner.verifying_key() }
    }

    /// Legacy WIF text (`5…`)
    pub fn to_wif(&self) -> String {
        let mut payload = Zeroizing::new(Vec::with_capacity(37));
        payload.push(WIF_VERSION);
        payload.extend_from_slice(&*self.to_bytes());
        let checksum = double_sha_checksum(&payload);
        payload.extend_from_slice(&checksum);
        bs58::encode(payload.as_slice()).into_string()
    }

    /// Sign a 32-byte digest, producing a canonical signature
    pub fn sign_digest(&self, digest: &Checksum256) -> Result<Signature, CryptoError> {
        crate::signature::sign_canonical(&self.inner, digest)
    }

    fn from_wif(s: &str) -> Result<Self, CryptoError> {
        let raw = Zeroizing::new(
            bs58::decode(s)
                .into_vec()
                .map_err(|e| CryptoError::InvalidPrivateKey(format!("base58: {e}")))?,
        );
        // 0x80 || key || [0x01 compressed flag] || checksum
        if raw.len() != 37 && raw.len() != 38 {
            return Err(CryptoError::InvalidPrivateKey(format!("unexpected length {}", raw.len())));
        }
        let (payload, checksum) = raw.split_at(raw.len() - 4);
        if double_sha_checksum(payload) != checksum {
            return Err(CryptoError::ChecksumMismatch);
        }
        if payload[0] != WIF_VERSION {
            return Err(CryptoError::InvalidPrivateKey(format!("unexpected version byte {:#04x}", payload[0])));
        }
        Self::from_bytes(&payload[1..33])
    }

    fn from_pvt_k1(data: &str) -> Result<Self, CryptoError> {
        let raw = Zeroizing::new(
            bs58::decode(data)
                .into_vec()
                .map_err(|e| CryptoError::InvalidPrivateKey(format!("base58: {e}")))?,
        );
        if raw.len() != 36 {
            return Err(CryptoError::InvalidPrivateKey(format!("unexpected length {}", raw.len())));
        }
        let (key, checksum) = raw.split_at(32);
        if ripemd_checksum(key, K1_SUFFIX) != checksum {
            return Err(CryptoError::ChecksumMismatch);
        }
        Self::from_bytes(key)
    }
}

impl FromStr for PrivateKey {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CryptoError::InvalidPrivateKey("empty key".into()));
        }
        if let Some(data) = s.strip_prefix(PVT_K1_PREFIX) {
            return Self::from_pvt_k1(data);
        }
        if let Some(kind) = s.strip_prefix("PVT_").and_then(|rest| rest.split('_').next()) {
            return Err(CryptoError::UnsupportedKeyType(kind.to_string()));
        }
        Self::from_wif(s)
    }
}

/// `PVT_K1_…` text
impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut raw = Zeroizing::new(Vec::with_capacity(36));
        raw.extend_from_slice(&*self.to_bytes());
        let checksum = ripemd_checksum(&raw, K1_SUFFIX);
        raw.extend_from_slice(&checksum);
        write!(f, "{}{}", PVT_K1_PREFIX, bs58::encode(raw.as_slice()).into_string())
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

/// secp256k1 public key (compressed)
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    inner: VerifyingKey,
}

impl PublicKey {
    /// Parse a 33-byte compressed SEC1 key
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let inner = VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|_| CryptoError::InvalidPublicKey("not a valid secp256k1 point".into()))?;
        Ok(PublicKey { inner })
    }

    /// 33-byte compressed SEC1 encoding
    pub fn to_bytes(&self) -> [u8; 33] {
        let point = self.inner.to_encoded_point(true);
        let mut out = [0u8; 33];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Legacy text with the `EOS` prefix
    pub fn to_legacy_string(&self) -> String {
        let key = self.to_bytes();
        let mut raw = Vec::with_capacity(37);
        raw.extend_from_slice(&key);
        raw.extend_from_slice(&ripemd_checksum(&key, b""));
        format!("{}{}", LEGACY_PUB_PREFIX, bs58::encode(raw).into_string())
    }

    pub(crate) fn verifying_key(&self) -> &VerifyingKey {
        &self.inner
    }

    pub(crate) fn from_verifying_key(inner: VerifyingKey) -> Self {
        PublicKey { inner }
    }

    fn decode_checked(data: &str, suffix: &[u8]) -> Result<Self, CryptoError> {
        let raw = bs58::decode(data)
            .into_vec()
            .map_err(|e| CryptoError::InvalidPublicKey(format!("base58: {e}")))?;
        if raw.len() != 37 {
            return Err(CryptoError::InvalidPublicKey(format!("unexpected length {}", raw.len())));
        }
        let (key, checksum) = raw.split_at(33);
        if ripemd_checksum(key, suffix) != checksum {
            return Err(CryptoError::ChecksumMismatch);
        }
        Self::from_bytes(key)
    }
}

impl FromStr for PublicKey {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(data) = s.strip_prefix(PUB_K1_PREFIX) {
            return Self::decode_checked(data, K1_SUFFIX);
        }
        if let Some(data) = s.strip_prefix(LEGACY_PUB_PREFIX) {
            return Self::decode_checked(data, b"");
        }
        if let Some(kind) = s.strip_prefix("PUB_").and_then(|rest| rest.split('_').next()) {
            return Err(CryptoError::UnsupportedKeyType(kind.to_string()));
        }
        Err(CryptoError::InvalidPublicKey(format!("unrecognized format '{s}'")))
    }
}

/// `PUB_K1_…` text
impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = self.to_bytes();
        let mut raw = Vec::with_capacity(37);
        raw.extend_from_slice(&key);
        raw.extend_from_slice(&ripemd_checksum(&key, K1_SUFFIX));
        write!(f, "{}{}", PUB_K1_PREFIX, bs58::encode(raw).into_string())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self)
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

impl Pack for PublicKey {
    fn pack(&self, enc: &mut Encoder) {
        enc.write_u8(KEY_TYPE_K1);
        enc.write_raw(&self.to_bytes());
    }
}

impl Unpack for PublicKey {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        let kind = dec.read_u8()?;
        if kind != KEY_TYPE_K1 {
            return Err(CodecError::InvalidValue(format!("unsupported public key type {kind}")));
        }
        let bytes: [u8; 33] = dec.read_fixed()?;
        PublicKey::from_bytes(&bytes).map_err(|e| CodecError::InvalidValue(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIF: &str = "5KQwrPbwdL6PhXujxW37FSSQZ1JiwsST4cqQzDeyXtP79zkvFD3";
    const PVT_K1: &str = "PVT_K1_2bfGi9rYsXQSXXTvJbDAPhHLQUojjaNLomdm3cEJ1XTzMqUt3V";
    const LEGACY_PUB: &str = "EOS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV";
    const PUB_K1: &str = "PUB_K1_6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5BoDq63";

    #[test]
    fn test_wif_parsing() {
        let key: PrivateKey = WIF.parse().unwrap();
        assert_eq!(
            hex::encode(*key.to_bytes()),
            "d2653ff7cbb2d8ff129ac27ef5781ce68b2558c41a74af1f2ddca635cbeef07d"
        );
        assert_eq!(key.to_wif(), WIF);
        assert_eq!(key.to_string(), PVT_K1);
    }

    #[test]
    fn test_pvt_k1_parsing() {
        let key: PrivateKey = PVT_K1.parse().unwrap();
        assert_eq!(key.to_wif(), WIF);
    }

    #[test]
    fn test_public_key_formats() {
        let key: PrivateKey = WIF.parse().unwrap();
        let public = key.public_key();
        assert_eq!(
            hex::encode(public.to_bytes()),
            "02c0ded2bc1f1305fb0faac5e6c03ee3a1924234985427b6167ca569d13df435cf"
        );
        assert_eq!(public.to_legacy_string(), LEGACY_PUB);
        assert_eq!(public.to_string(), PUB_K1);
        assert_eq!(LEGACY_PUB.parse::<PublicKey>().unwrap(), public);
        assert_eq!(PUB_K1.parse::<PublicKey>().unwrap(), public);
    }

    #[test]
    fn test_rejects_bad_checksum() {
        // last character changed
        let bad = "5KQwrPbwdL6PhXujxW37FSSQZ1JiwsST4cqQzDeyXtP79zkvFD4";
        assert!(bad.parse::<PrivateKey>().is_err());
        let bad_pub = "EOS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CW";
        assert!(bad_pub.parse::<PublicKey>().is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!("".parse::<PrivateKey>().is_err());
        assert!("not-a-key".parse::<PrivateKey>().is_err());
        assert!(matches!(
            "PVT_R1_abc".parse::<PrivateKey>(),
            Err(CryptoError::UnsupportedKeyType(kind)) if kind == "R1"
        ));
        assert!("hello".parse::<PublicKey>().is_err());
    }

    #[test]
    fn test_debug_hides_secret() {
        let key: PrivateKey = WIF.parse().unwrap();
        let debug = format!("{:?}", key);
        assert!(!debug.contains("d2653ff7"));
        assert!(!debug.contains(WIF));
        assert!(debug.contains("PUB_K1_"));
    }

    #[test]
    fn test_public_key_binary() {
        let public: PublicKey = PUB_K1.parse().unwrap();
        let bytes = bitcash_codec::encode(&public);
        assert_eq!(bytes.len(), 34);
        assert_eq!(bytes[0], KEY_TYPE_K1);
        assert_eq!(bitcash_codec::decode::<PublicKey>(&bytes).unwrap(), public);
    }

    #[test]
    fn test_random_keys_differ() {
        let a = PrivateKey::random();
        let b = PrivateKey::random();
        assert_ne!(a.public_key(), b.public_key());
        let reparsed: PrivateKey = a.to_string().parse().unwrap();
        assert_eq!(reparsed.public_key(), a.public_key());
    }
}
