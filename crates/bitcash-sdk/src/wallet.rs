//! Signing keys

use std::fmt;

use bitcash_crypto::{PrivateKey, PublicKey, Signature};
use bitcash_primitives::Checksum256;
use bitcash_types::{SignedTransaction, Transaction};

use crate::SdkError;

/// Holds a private key and signs transactions
///
/// Clone is intentionally not implemented to prevent accidental key duplication.
pub struct Wallet {
    private_key: PrivateKey,
    public_key: PublicKey,
}

impl Wallet {
    /// Create a new random wallet
    pub fn new_random() -> Self {
        Self::from_private_key(PrivateKey::random())
    }

    /// Create a wallet from a key
    pub fn from_private_key(private_key: PrivateKey) -> Self {
        let public_key = private_key.public_key();
        Self { private_key, public_key }
    }

    /// Create a wallet from WIF or `PVT_K1_…` text
    pub fn from_key_str(text: &str) -> Result<Self, SdkError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SdkError::MissingPrivateKey);
        }
        let private_key: PrivateKey = text.parse().map_err(|e: bitcash_crypto::CryptoError| {
            SdkError::InvalidPrivateKey(e.to_string())
        })?;
        Ok(Self::from_private_key(private_key))
    }

    /// Public key
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Sign a 32-byte digest
    pub fn sign_digest(&self, digest: &Checksum256) -> Result<Signature, SdkError> {
        Ok(self.private_key.sign_digest(digest)?)
    }

    /// Sign a transaction for a chain
    pub fn sign_transaction(&self, trx: Transaction, chain_id: &Checksum256) -> Result<SignedTransaction, SdkError> {
        let digest = trx.signing_digest(chain_id, &[]);
        let signature = self.sign_digest(&digest)?;
        Ok(SignedTransaction { transaction: trx, signatures: vec![signature], context_free_data: Vec::new() })
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet").field("public_key", &self.public_key.to_string()).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIF: &str = "5KQwrPbwdL6PhXujxW37FSSQZ1JiwsST4cqQzDeyXtP79zkvFD3";

    #[test]
    fn test_from_wif() {
        let wallet = Wallet::from_key_str(WIF).unwrap();
        assert!(wallet.public_key().to_string().starts_with("PUB_K1_"));
    }

    #[test]
    fn test_pvt_k1_matches_wif() {
        let key: PrivateKey = WIF.parse().unwrap();
        let wallet = Wallet::from_key_str(&key.to_string()).unwrap();
        assert_eq!(wallet.public_key(), &key.public_key());
    }

    #[test]
    fn test_empty_and_invalid() {
        assert!(matches!(Wallet::from_key_str("  "), Err(SdkError::MissingPrivateKey)));
        assert!(matches!(Wallet::from_key_str("not-a-key"), Err(SdkError::InvalidPrivateKey(_))));
    }

    #[test]
    fn test_debug_hides_key() {
        let wallet = Wallet::from_key_str(WIF).unwrap();
        let text = format!("{wallet:?}");
        assert!(!text.contains(WIF));
        assert!(text.contains("PUB_K1_"));
    }

    #[test]
    fn test_sign_transaction() {
        let wallet = Wallet::new_random();
        let chain_id = Checksum256::from_bytes([7; 32]);
        let signed = wallet.sign_transaction(Transaction::default(), &chain_id).unwrap();
        let digest = signed.transaction.signing_digest(&chain_id, &[]);
        assert_eq!(signed.signatures[0].recover(&digest).unwrap(), *wallet.public_key());
    }
}
