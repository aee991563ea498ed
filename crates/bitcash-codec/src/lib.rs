//! # bitcash-codec
//!
//! Binary serialization of contract actions and table rows.
//!
//! ## Encoding Rules
//!
//! - Fixed-width integers and floats: little-endian
//! - `bool`: one byte, 0 or 1
//! - `varuint32`: LEB128, 7 bits per byte
//! - `string`, `bytes`, `T[]`: varuint32 length prefix, then the items
//! - `T?`: one presence byte, then the value when present
//! - `name`, `symbol`: their packed `u64`; `asset`: `int64` amount then symbol
//!
//! Records are the concatenation of their fields in declaration order.
//! [`abi_struct!`] declares such records together with the field layout they
//! must match in the contract's ABI, and [`AbiDef`] reads the embedded ABI
//! blobs that layout is checked against.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Lets `abi_struct!` name this crate by path from inside it
extern crate self as bitcash_codec;

mod abi;
mod buffer;
mod error;
mod macros;
mod pack;

pub use abi::{AbiAction, AbiDef, AbiField, AbiStructDef, AbiTable, AbiTypeDef};
pub use buffer::{Decoder, Encoder};
pub use error::CodecError;
pub use pack::{AbiStruct, Pack, Unpack, VarUint32};

/// Encode a value to bytes
pub fn encode<T: Pack + ?Sized>(value: &T) -> Vec<u8> {
    let mut enc = Encoder::new();
    value.pack(&mut enc);
    enc.finish()
}

/// Decode a value, requiring that the whole input is consumed
pub fn decode<T: Unpack>(data: &[u8]) -> Result<T, CodecError> {
    let mut dec = Decoder::new(data);
    let value = T::unpack(&mut dec)?;
    if !dec.is_empty() {
        return Err(CodecError::TrailingBytes(dec.remaining()));
    }
    Ok(value)
}

#[doc(hidden)]
pub mod __private {
    pub use serde;
}
