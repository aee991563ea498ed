//! Codec errors

use thiserror::Error;

/// Encoding/decoding error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Input ended before the value was complete
    #[error("unexpected end of input: needed {needed} bytes, {available} available")]
    UnexpectedEof {
        /// Bytes requested
        needed: usize,
        /// Bytes left in the input
        available: usize,
    },

    /// Bytes left over after decoding a complete value
    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),

    /// varuint32 longer than five bytes or above `u32::MAX`
    #[error("varuint32 overflow")]
    VarintOverflow,

    /// String is not valid UTF-8
    #[error("invalid utf-8 string")]
    InvalidUtf8,

    /// Byte that is not a valid boolean or option flag
    #[error("invalid {kind} byte: {value}")]
    InvalidFlag {
        /// What was being decoded
        kind: &'static str,
        /// Offending byte
        value: u8,
    },

    /// Decoded value rejected by its type
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// Invalid ABI blob
    #[error("invalid abi: {0}")]
    InvalidAbi(String),
}

impl From<bitcash_primitives::PrimitiveError> for CodecError {
    fn from(err: bitcash_primitives::PrimitiveError) -> Self {
        CodecError::InvalidValue(err.to_string())
    }
}
