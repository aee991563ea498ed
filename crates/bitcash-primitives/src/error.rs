//! Common error types for primitives

use thiserror::Error;

/// Primitive parsing error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    /// Invalid account, action or table name
    #[error("invalid name '{0}': {1}")]
    InvalidName(String, &'static str),

    /// Invalid symbol or symbol code
    #[error("invalid symbol '{0}': {1}")]
    InvalidSymbol(String, &'static str),

    /// Invalid asset text
    #[error("invalid asset '{0}': {1}")]
    InvalidAsset(String, &'static str),

    /// Invalid hex string
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    /// Invalid length
    #[error("invalid length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Expected byte count
        expected: usize,
        /// Actual byte count
        got: usize,
    },

    /// Invalid timestamp text
    #[error("invalid time point '{0}'")]
    InvalidTime(String),

    /// Invalid permission level text
    #[error("invalid permission level '{0}'")]
    InvalidPermission(String),

    /// Invalid number text
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
}
