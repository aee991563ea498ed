//! Hash functions

use bitcash_primitives::Checksum256;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Compute SHA-256 hash
pub fn sha256(data: &[u8]) -> Checksum256 {
    Checksum256::from_bytes(Sha256::digest(data).into())
}

/// Compute RIPEMD-160 hash
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(data).into()
}

/// First four bytes of `ripemd160(data || suffix)`
pub(crate) fn ripemd_checksum(data: &[u8], suffix: &[u8]) -> [u8; 4] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    hasher.update(suffix);
    let digest = hasher.finalize();
    [digest[0], digest[1], digest[2], digest[3]]
}

/// First four bytes of `sha256(sha256(data))`
pub(crate) fn double_sha_checksum(data: &[u8]) -> [u8; 4] {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    [second[0], second[1], second[2], second[3]]
}
