//! `Pack`/`Unpack` traits and implementations for the built-in ABI types

use bitcash_primitives::{
    Asset, Checksum256, ExtendedAsset, ExtendedSymbol, Float64, Int64, Name, PermissionLevel,
    Symbol, SymbolCode, TimePoint, TimePointSec, UInt64,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::{CodecError, Decoder, Encoder};

/// Types with a binary encoding
pub trait Pack {
    /// Append the encoding of `self`
    fn pack(&self, enc: &mut Encoder);
}

/// Types that can be read back from their binary encoding
pub trait Unpack: Sized {
    /// Read one value from the decoder
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, CodecError>;
}

/// Record declared with [`abi_struct!`](crate::abi_struct): its ABI struct
/// name and `(field, type)` layout.
pub trait AbiStruct {
    /// Struct name in the contract ABI
    const ABI_NAME: &'static str;
    /// Fields in encoding order, with their ABI type names
    const FIELDS: &'static [(&'static str, &'static str)];
}

/// ABI `varuint32`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VarUint32(pub u32);

impl From<u32> for VarUint32 {
    fn from(v: u32) -> Self {
        VarUint32(v)
    }
}

impl Pack for VarUint32 {
    fn pack(&self, enc: &mut Encoder) {
        enc.write_varuint32(self.0);
    }
}

impl Unpack for VarUint32 {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        dec.read_varuint32().map(VarUint32)
    }
}

macro_rules! pack_int {
    ($($ty:ty => $write:ident, $read:ident;)*) => {$(
        impl Pack for $ty {
            fn pack(&self, enc: &mut Encoder) {
                enc.$write(*self);
            }
        }

        impl Unpack for $ty {
            fn unpack(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
                dec.$read()
            }
        }
    )*};
}

pack_int! {
    u8 => write_u8, read_u8;
    u16 => write_u16, read_u16;
    u32 => write_u32, read_u32;
    u64 => write_u64, read_u64;
    i64 => write_i64, read_i64;
    f64 => write_f64, read_f64;
}

impl Pack for bool {
    fn pack(&self, enc: &mut Encoder) {
        enc.write_u8(*self as u8);
    }
}

impl Unpack for bool {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        match dec.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(CodecError::InvalidFlag { kind: "bool", value }),
        }
    }
}

impl Pack for str {
    fn pack(&self, enc: &mut Encoder) {
        enc.write_bytes(self.as_bytes());
    }
}

impl Pack for String {
    fn pack(&self, enc: &mut Encoder) {
        self.as_str().pack(enc);
    }
}

impl Unpack for String {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        dec.read_string()
    }
}

/// ABI `bytes`
impl Pack for Bytes {
    fn pack(&self, enc: &mut Encoder) {
        enc.write_bytes(self);
    }
}

impl Unpack for Bytes {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Ok(Bytes::copy_from_slice(dec.read_bytes()?))
    }
}

impl<T: Pack> Pack for [T] {
    fn pack(&self, enc: &mut Encoder) {
        enc.write_len(self.len());
        for item in self {
            item.pack(enc);
        }
    }
}

impl<T: Pack> Pack for Vec<T> {
    fn pack(&self, enc: &mut Encoder) {
        self.as_slice().pack(enc);
    }
}

impl<T: Unpack> Unpack for Vec<T> {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        let len = dec.read_varuint32()? as usize;
        // Every item takes at least one byte
        let mut out = Vec::with_capacity(len.min(dec.remaining()));
        for _ in 0..len {
            out.push(T::unpack(dec)?);
        }
        Ok(out)
    }
}

impl<T: Pack> Pack for Option<T> {
    fn pack(&self, enc: &mut Encoder) {
        match self {
            Some(value) => {
                enc.write_u8(1);
                value.pack(enc);
            }
            None => enc.write_u8(0),
        }
    }
}

impl<T: Unpack> Unpack for Option<T> {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        match dec.read_u8()? {
            0 => Ok(None),
            1 => Ok(Some(T::unpack(dec)?)),
            value => Err(CodecError::InvalidFlag { kind: "option", value }),
        }
    }
}

impl<A: Pack, B: Pack> Pack for (A, B) {
    fn pack(&self, enc: &mut Encoder) {
        self.0.pack(enc);
        self.1.pack(enc);
    }
}

impl<A: Unpack, B: Unpack> Unpack for (A, B) {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Ok((A::unpack(dec)?, B::unpack(dec)?))
    }
}

impl<T: Pack + ?Sized> Pack for &T {
    fn pack(&self, enc: &mut Encoder) {
        (**self).pack(enc);
    }
}

// ==================== Chain primitives ====================

macro_rules! pack_newtype {
    ($($ty:ty => $inner:ty;)*) => {$(
        impl Pack for $ty {
            fn pack(&self, enc: &mut Encoder) {
                <$inner>::from(*self).pack(enc);
            }
        }

        impl Unpack for $ty {
            fn unpack(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
                Ok(<$ty>::from(<$inner>::unpack(dec)?))
            }
        }
    )*};
}

pack_newtype! {
    UInt64 => u64;
    Int64 => i64;
    Float64 => f64;
}

impl Pack for Name {
    fn pack(&self, enc: &mut Encoder) {
        enc.write_u64(self.as_u64());
    }
}

impl Unpack for Name {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Ok(Name::from_u64(dec.read_u64()?))
    }
}

impl Pack for SymbolCode {
    fn pack(&self, enc: &mut Encoder) {
        enc.write_u64(self.as_u64());
    }
}

impl Unpack for SymbolCode {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Ok(SymbolCode::from_u64(dec.read_u64()?))
    }
}

impl Pack for Symbol {
    fn pack(&self, enc: &mut Encoder) {
        enc.write_u64(self.as_u64());
    }
}

impl Unpack for Symbol {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Ok(Symbol::from_u64(dec.read_u64()?)?)
    }
}

impl Pack for Asset {
    fn pack(&self, enc: &mut Encoder) {
        enc.write_i64(self.amount());
        self.symbol().pack(enc);
    }
}

impl Unpack for Asset {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        let amount = dec.read_i64()?;
        let symbol = Symbol::unpack(dec)?;
        Ok(Asset::new(amount, symbol)?)
    }
}

impl Pack for ExtendedSymbol {
    fn pack(&self, enc: &mut Encoder) {
        self.sym.pack(enc);
        self.contract.pack(enc);
    }
}

impl Unpack for ExtendedSymbol {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Ok(ExtendedSymbol { sym: Symbol::unpack(dec)?, contract: Name::unpack(dec)? })
    }
}

impl Pack for ExtendedAsset {
    fn pack(&self, enc: &mut Encoder) {
        self.quantity.pack(enc);
        self.contract.pack(enc);
    }
}

impl Unpack for ExtendedAsset {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Ok(ExtendedAsset { quantity: Asset::unpack(dec)?, contract: Name::unpack(dec)? })
    }
}

impl Pack for Checksum256 {
    fn pack(&self, enc: &mut Encoder) {
        enc.write_raw(self.as_bytes());
    }
}

impl Unpack for Checksum256 {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Ok(Checksum256::from_bytes(dec.read_fixed()?))
    }
}

impl Pack for TimePoint {
    fn pack(&self, enc: &mut Encoder) {
        enc.write_i64(self.micros());
    }
}

impl Unpack for TimePoint {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Ok(TimePoint::from_micros(dec.read_i64()?))
    }
}

impl Pack for TimePointSec {
    fn pack(&self, enc: &mut Encoder) {
        enc.write_u32(self.secs());
    }
}

impl Unpack for TimePointSec {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Ok(TimePointSec::from_secs(dec.read_u32()?))
    }
}

impl Pack for PermissionLevel {
    fn pack(&self, enc: &mut Encoder) {
        self.actor.pack(enc);
        self.permission.pack(enc);
    }
}

impl Unpack for PermissionLevel {
    fn unpack(dec: &mut Decoder<'_>) -> Result<Self, CodecError> {
        Ok(PermissionLevel { actor: Name::unpack(dec)?, permission: Name::unpack(dec)? })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode, encode};

    #[test]
    fn test_asset_layout() {
        let asset: Asset = "1.0000 EOS".parse().unwrap();
        assert_eq!(hex::encode(encode(&asset)), "102700000000000004454f5300000000");
        assert_eq!(decode::<Asset>(&encode(&asset)).unwrap(), asset);
    }

    #[test]
    fn test_name_layout() {
        let name: Name = "eosio.token".parse().unwrap();
        assert_eq!(hex::encode(encode(&name)), "00a6823403ea3055");
    }

    #[test]
    fn test_vec_and_option() {
        let names: Vec<Name> = vec!["alice".parse().unwrap(), "bob".parse().unwrap()];
        let bytes = encode(&names);
        assert_eq!(bytes[0], 2);
        assert_eq!(bytes.len(), 1 + 16);
        assert_eq!(decode::<Vec<Name>>(&bytes).unwrap(), names);

        assert_eq!(encode(&Option::<u32>::None), vec![0]);
        assert_eq!(encode(&Some(7u16)), vec![1, 7, 0]);
        assert!(matches!(
            decode::<Option<u8>>(&[2]),
            Err(CodecError::InvalidFlag { kind: "option", value: 2 })
        ));
    }

    #[test]
    fn test_bool_strict() {
        assert!(decode::<bool>(&[1]).unwrap());
        assert!(decode::<bool>(&[2]).is_err());
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        assert_eq!(decode::<u16>(&[1, 0, 0]), Err(CodecError::TrailingBytes(1)));
    }

    #[test]
    fn test_oversized_length_prefix_fails_cleanly() {
        // claims 1000 names but carries none
        let bytes = [0xe8, 0x07];
        assert!(matches!(decode::<Vec<Name>>(&bytes), Err(CodecError::UnexpectedEof { .. })));
    }

    #[test]
    fn test_time_points() {
        let tp: TimePoint = "2024-01-01T00:00:00.000".parse().unwrap();
        assert_eq!(encode(&tp), 1_704_067_200_000_000i64.to_le_bytes());
        let tps: TimePointSec = "2024-01-01T00:00:00".parse().unwrap();
        assert_eq!(encode(&tps), 1_704_067_200u32.to_le_bytes());
    }
}
