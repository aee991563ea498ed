//! # bitcash-crypto
//!
//! Cryptographic primitives for BitCash transactions.
//!
//! - SHA-256 and RIPEMD-160 hashing
//! - secp256k1 ("K1") private and public keys in their text formats:
//!   legacy WIF / `EOS…` and `PVT_K1_…` / `PUB_K1_…`
//! - Canonical recoverable signatures (`SIG_K1_…`)

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod hash;
mod keys;
mod signature;

pub use error::CryptoError;
pub use hash::{ripemd160, sha256};
pub use keys::{PrivateKey, PublicKey};
pub use signature::Signature;
