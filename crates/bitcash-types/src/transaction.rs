//! Transaction types

use bitcash_codec::{CodecError, Decoder, Encoder, Pack, Unpack, VarUint32};
use bitcash_crypto::{sha256, Signature};
use bitcash_primitives::{Checksum256, TimePointSec};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::Action;

/// Transaction header
///
/// `ref_block_num`/`ref_block_prefix` reference a recent block so the
/// transaction is only valid on the fork that contains it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransactionHeader {
    /// Time after which the transaction is rejected
    pub expiration: TimePointSec,
    /// Low 16 bits of the referenced block number
    pub ref_block_num: u16,
    /// Bytes 8..12 of the referenced block id, little-endian
    pub ref_block_prefix: u32,
    /// Net usage limit in 8-byte words, 0 for no limit
    pub max_net_usage_words: VarUint32,
    /// CPU usage limit, 0 for no limit
    pub max_cpu_usage_ms: u8,
    /// Delay before execution
    pub delay_sec: VarUint32,
}

impl TransactionHeader {
    /// Header with no resource limits or delay
    pub fn new(expiration: TimePointSec, ref_block_num: u16, ref_block_prefix: u32) -> Self {
        TransactionHeader { expiration, ref_block_num, ref_block_prefix, ..Default::default() }
    }

    /// Derive `ref_block_prefix` from a block id
    pub fn block_prefix(block_id: &Checksum256) -> u32 {
        let b = block_id.as_bytes();
        u32::from_le_bytes([b[8], b[9], b[10], b[11]])
    }
}

impl Pack for TransactionHeader {
    fn pack(&self, enc: &mut Encoder) {
        self.expiration.pack(enc);
        self.ref_block_num.pack(enc);
        self.ref_block_prefix.pack(enc);
        self.max_net_usage_words.pack(enc);
        self.max_cpu_usage_ms.pack(enc);
        self.delay_sec.pack(enc);
    }
}

impl Unpack for TransactionHeader {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Ok(TransactionHeader {
            expiration: TimePointSec::unpack(dec)?,
            ref_block_num: u16::unpack(dec)?,
            ref_block_prefix: u32::unpack(dec)?,
            max_net_usage_words: VarUint32::unpack(dec)?,
            max_cpu_usage_ms: u8::unpack(dec)?,
            delay_sec: VarUint32::unpack(dec)?,
        })
    }
}

/// Tagged transaction extension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionExtension {
    /// Extension type
    #[serde(rename = "type")]
    pub kind: u16,
    /// Extension payload
    #[serde(with = "crate::hex_bytes")]
    pub data: Bytes,
}

impl Pack for TransactionExtension {
    fn pack(&self, enc: &mut Encoder) {
        self.kind.pack(enc);
        self.data.pack(enc);
    }
}

impl Unpack for TransactionExtension {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Ok(TransactionExtension { kind: u16::unpack(dec)?, data: Bytes::unpack(dec)? })
    }
}

/// Unsigned transaction
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Transaction {
    /// Header
    #[serde(flatten)]
    pub header: TransactionHeader,
    /// Actions that run without authorization checks
    #[serde(default)]
    pub context_free_actions: Vec<Action>,
    /// Actions
    pub actions: Vec<Action>,
    /// Extensions
    #[serde(default)]
    pub transaction_extensions: Vec<TransactionExtension>,
}

impl Transaction {
    /// Create a transaction from a header and actions
    pub fn new(header: TransactionHeader, actions: Vec<Action>) -> Self {
        Transaction { header, actions, ..Default::default() }
    }

    /// Binary encoding
    pub fn packed(&self) -> Vec<u8> {
        bitcash_codec::encode(self)
    }

    /// Transaction id: `sha256` of the packed transaction
    pub fn id(&self) -> Checksum256 {
        sha256(&self.packed())
    }

    /// Digest that signatures cover:
    /// `sha256(chain_id || packed trx || cfd hash)`, where the context-free
    /// data hash is 32 zero bytes when there is none.
    pub fn signing_digest(&self, chain_id: &Checksum256, context_free_data: &[Bytes]) -> Checksum256 {
        let mut enc = Encoder::new();
        enc.write_raw(chain_id.as_bytes());
        self.pack(&mut enc);
        if context_free_data.is_empty() {
            enc.write_raw(&[0u8; 32]);
        } else {
            enc.write_raw(sha256(&bitcash_codec::encode(context_free_data)).as_bytes());
        }
        sha256(&enc.finish())
    }
}

impl Pack for Transaction {
    fn pack(&self, enc: &mut Encoder) {
        self.header.pack(enc);
        self.context_free_actions.pack(enc);
        self.actions.pack(enc);
        self.transaction_extensions.pack(enc);
    }
}

impl Unpack for Transaction {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Ok(Transaction {
            header: TransactionHeader::unpack(dec)?,
            context_free_actions: Vec::unpack(dec)?,
            actions: Vec::unpack(dec)?,
            transaction_extensions: Vec::unpack(dec)?,
        })
    }
}

/// Transaction with its signatures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    /// Signed transaction
    #[serde(flatten)]
    pub transaction: Transaction,
    /// Signatures over [`Transaction::signing_digest`]
    pub signatures: Vec<Signature>,
    /// Context-free data
    #[serde(default, with = "crate::hex_bytes::vec")]
    pub context_free_data: Vec<Bytes>,
}

impl SignedTransaction {
    /// Transaction id
    pub fn id(&self) -> Checksum256 {
        self.transaction.id()
    }

    /// Form accepted by `push_transaction`/`send_transaction`
    pub fn to_packed(&self) -> PackedTransaction {
        let packed_context_free_data = if self.context_free_data.is_empty() {
            String::new()
        } else {
            hex::encode(bitcash_codec::encode(&self.context_free_data))
        };
        PackedTransaction {
            signatures: self.signatures.clone(),
            compression: 0,
            packed_context_free_data,
            packed_trx: hex::encode(self.transaction.packed()),
        }
    }
}

/// Signed transaction in its submission form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackedTransaction {
    /// Signatures
    pub signatures: Vec<Signature>,
    /// Compression of the packed fields, 0 for none
    pub compression: u8,
    /// Hex of the packed context-free data, empty when none
    pub packed_context_free_data: String,
    /// Hex of the packed transaction
    pub packed_trx: String,
}

impl PackedTransaction {
    /// Decode the packed transaction
    pub fn transaction(&self) -> Result<Transaction, CodecError> {
        let bytes = hex::decode(&self.packed_trx).map_err(|e| CodecError::InvalidValue(e.to_string()))?;
        bitcash_codec::decode(&bytes)
    }
}
