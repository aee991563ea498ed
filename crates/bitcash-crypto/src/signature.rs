//! Canonical recoverable ECDSA signatures

use std::fmt;
use std::str::FromStr;

use bitcash_codec::{CodecError, Decoder, Encoder, Pack, Unpack};
use bitcash_primitives::Checksum256;
use k256::ecdsa::signature::hazmat::{PrehashVerifier, RandomizedPrehashSigner};
use k256::ecdsa::{RecoveryId, Signature as K256Signature, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::hash::ripemd_checksum;
use crate::keys::KEY_TYPE_K1;
use crate::{CryptoError, PublicKey};

const SIG_K1_PREFIX: &str = "SIG_K1_";

/// Recovery byte offset: 27 plus 4 for compressed keys
const RECOVERY_OFFSET: u8 = 31;

/// Attempts before giving up on finding a canonical signature; each attempt
/// succeeds with probability of roughly one in four.
const MAX_SIGN_ATTEMPTS: usize = 64;

/// Recoverable K1 signature: `recovery byte || r || s`
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; 65]);

impl Signature {
    /// Create from the 65-byte compact form
    pub fn from_bytes(bytes: [u8; 65]) -> Result<Self, CryptoError> {
        let sig = Signature(bytes);
        sig.recovery_id()?;
        Ok(sig)
    }

    /// 65-byte compact form
    pub fn as_bytes(&self) -> &[u8; 65] {
        &self.0
    }

    /// r component
    pub fn r(&self) -> &[u8] {
        &self.0[1..33]
    }

    /// s component
    pub fn s(&self) -> &[u8] {
        &self.0[33..65]
    }

    /// Check the chain's canonical form: r and s are both below 2^255 and
    /// carry no redundant leading zero byte
    pub fn is_canonical(&self) -> bool {
        let c = &self.0;
        c[1] & 0x80 == 0
            && !(c[1] == 0 && c[2] & 0x80 == 0)
            && c[33] & 0x80 == 0
            && !(c[33] == 0 && c[34] & 0x80 == 0)
    }

    fn recovery_id(&self) -> Result<RecoveryId, CryptoError> {
        let byte = self.0[0]
            .checked_sub(RECOVERY_OFFSET)
            .ok_or_else(|| CryptoError::InvalidSignature(format!("recovery byte {}", self.0[0])))?;
        RecoveryId::from_byte(byte)
            .ok_or_else(|| CryptoError::InvalidSignature(format!("recovery byte {}", self.0[0])))
    }

    fn k256(&self) -> Result<K256Signature, CryptoError> {
        K256Signature::from_slice(&self.0[1..])
            .map_err(|e| CryptoError::InvalidSignature(e.to_string()))
    }

    /// Recover the signing public key
    pub fn recover(&self, digest: &Checksum256) -> Result<PublicKey, CryptoError> {
        let key = VerifyingKey::recover_from_prehash(digest.as_bytes(), &self.k256()?, self.recovery_id()?)
            .map_err(|e| CryptoError::RecoveryFailed(e.to_string()))?;
        Ok(PublicKey::from_verifying_key(key))
    }

    /// Verify against a digest and public key
    pub fn verify(&self, digest: &Checksum256, public_key: &PublicKey) -> bool {
        match self.k256() {
            Ok(sig) => public_key.verifying_key().verify_prehash(digest.as_bytes(), &sig).is_ok(),
            Err(_) => false,
        }
    }

    fn from_parts(sig: &K256Signature, recovery_id: RecoveryId) -> Self {
        let mut out = [0u8; 65];
        out[0] = recovery_id.to_byte() + RECOVERY_OFFSET;
        out[1..].copy_from_slice(&sig.to_bytes());
        Signature(out)
    }
}

/// Sign a digest, retrying with fresh nonces until the result is canonical.
///
/// The first attempt is the deterministic RFC 6979 signature, so signing the
/// same digest twice usually yields the same signature.
pub(crate) fn sign_canonical(key: &SigningKey, digest: &Checksum256) -> Result<Signature, CryptoError> {
    let prehash = digest.as_bytes();

    let (sig, recovery_id) = key
        .sign_prehash_recoverable(prehash)
        .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
    let candidate = low_s(sig, recovery_id)?;
    if candidate.is_canonical() {
        return Ok(candidate);
    }

    for _ in 1..MAX_SIGN_ATTEMPTS {
        let sig: K256Signature = key
            .sign_prehash_with_rng(&mut OsRng, prehash)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
        let recovery_id = RecoveryId::trial_recovery_from_prehash(key.verifying_key(), prehash, &sig)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
        let candidate = low_s(sig, recovery_id)?;
        if candidate.is_canonical() {
            return Ok(candidate);
        }
    }

    Err(CryptoError::SigningFailed("no canonical signature found".into()))
}

/// Normalize s to the lower half of the curve order, flipping the recovery id
fn low_s(sig: K256Signature, recovery_id: RecoveryId) -> Result<Signature, CryptoError> {
    match sig.normalize_s() {
        Some(normalized) => {
            let flipped = RecoveryId::from_byte(recovery_id.to_byte() ^ 1)
                .ok_or_else(|| CryptoError::SigningFailed("invalid recovery id after normalization".into()))?;
            Ok(Signature::from_parts(&normalized, flipped))
        }
        None => Ok(Signature::from_parts(&sig, recovery_id)),
    }
}

impl FromStr for Signature {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let data = s.trim().strip_prefix(SIG_K1_PREFIX).ok_or_else(|| {
            match s.strip_prefix("SIG_").and_then(|rest| rest.split('_').next()) {
                Some(kind) => CryptoError::UnsupportedKeyType(kind.to_string()),
                None => CryptoError::InvalidSignature(format!("unrecognized format '{s}'")),
            }
        })?;
        let raw = bs58::decode(data)
            .into_vec()
            .map_err(|e| CryptoError::InvalidSignature(format!("base58: {e}")))?;
        if raw.len() != 69 {
            return Err(CryptoError::InvalidSignature(format!("unexpected length {}", raw.len())));
        }
        let (sig, checksum) = raw.split_at(65);
        if ripemd_checksum(sig, b"K1") != checksum {
            return Err(CryptoError::ChecksumMismatch);
        }
        let mut bytes = [0u8; 65];
        bytes.copy_from_slice(sig);
        Signature::from_bytes(bytes)
    }
}

/// `SIG_K1_…` text
impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut raw = Vec::with_capacity(69);
        raw.extend_from_slice(&self.0);
        raw.extend_from_slice(&ripemd_checksum(&self.0, b"K1"));
        write!(f, "{}{}", SIG_K1_PREFIX, bs58::encode(raw).into_string())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self)
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

impl Pack for Signature {
    fn pack(&self, enc: &mut Encoder) {
        enc.write_u8(KEY_TYPE_K1);
        enc.write_raw(&self.0);
    }
}

impl Unpack for Signature {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        let kind = dec.read_u8()?;
        if kind != KEY_TYPE_K1 {
            return Err(CodecError::InvalidValue(format!("unsupported signature type {kind}")));
        }
        Signature::from_bytes(dec.read_fixed()?).map_err(|e| CodecError::InvalidValue(e.to_string()))
    }
}
