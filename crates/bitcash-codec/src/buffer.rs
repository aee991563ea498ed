//! Byte-level writer and reader

use bytes::{BufMut, Bytes, BytesMut};

use crate::CodecError;

/// Append-only binary writer
#[derive(Debug, Default)]
pub struct Encoder {
    buf: BytesMut,
}

impl Encoder {
    /// Create an empty encoder
    pub fn new() -> Self {
        Encoder { buf: BytesMut::with_capacity(64) }
    }

    /// Write a single byte
    pub fn write_u8(&mut self, v: u8) {
        self.buf.put_u8(v);
    }

    /// Write a little-endian u16
    pub fn write_u16(&mut self, v: u16) {
        self.buf.put_u16_le(v);
    }

    /// Write a little-endian u32
    pub fn write_u32(&mut self, v: u32) {
        self.buf.put_u32_le(v);
    }

    /// Write a little-endian u64
    pub fn write_u64(&mut self, v: u64) {
        self.buf.put_u64_le(v);
    }

    /// Write a little-endian i64
    pub fn write_i64(&mut self, v: i64) {
        self.buf.put_i64_le(v);
    }

    /// Write a little-endian IEEE-754 double
    pub fn write_f64(&mut self, v: f64) {
        self.buf.put_f64_le(v);
    }

    /// Write a LEB128 varuint32
    pub fn write_varuint32(&mut self, mut v: u32) {
        loop {
            let byte = (v & 0x7f) as u8;
            v >>= 7;
            if v == 0 {
                self.buf.put_u8(byte);
                return;
            }
            self.buf.put_u8(byte | 0x80);
        }
    }

    /// Write raw bytes without a length prefix
    pub fn write_raw(&mut self, data: &[u8]) {
        self.buf.put_slice(data);
    }

    /// Write a varuint32 length prefix followed by the bytes
    pub fn write_bytes(&mut self, data: &[u8]) {
        self.write_len(data.len());
        self.write_raw(data);
    }

    /// Write a collection length as varuint32
    pub fn write_len(&mut self, len: usize) {
        // Lengths above u32::MAX cannot be represented on chain
        self.write_varuint32(u32::try_from(len).unwrap_or(u32::MAX));
    }

    /// Bytes written so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if nothing was written
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consume into a byte vector
    pub fn finish(self) -> Vec<u8> {
        self.buf.to_vec()
    }

    /// Consume into shared bytes
    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }
}

/// Cursor over an input buffer
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    /// Start reading at the beginning of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Decoder { data, pos: 0 }
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Check if all input was consumed
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Current read offset
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Read `n` raw bytes
    pub fn read_raw(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        if self.remaining() < n {
            return Err(CodecError::UnexpectedEof { needed: n, available: self.remaining() });
        }
        let out = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_raw(N)?);
        Ok(out)
    }

    /// Read a single byte
    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Read a little-endian u16
    pub fn read_u16(&mut self) -> Result<u16, CodecError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian u32
    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian u64
    pub fn read_u64(&mut self) -> Result<u64, CodecError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian i64
    pub fn read_i64(&mut self) -> Result<i64, CodecError> {
        Ok(i64::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian IEEE-754 double
    pub fn read_f64(&mut self) -> Result<f64, CodecError> {
        Ok(f64::from_le_bytes(self.read_array()?))
    }

    /// Read a fixed-size byte array
    pub fn read_fixed<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        self.read_array()
    }

    /// Read a LEB128 varuint32
    pub fn read_varuint32(&mut self) -> Result<u32, CodecError> {
        let mut value: u64 = 0;
        for shift in (0..35).step_by(7) {
            let byte = self.read_u8()?;
            value |= ((byte & 0x7f) as u64) << shift;
            if byte & 0x80 == 0 {
                return u32::try_from(value).map_err(|_| CodecError::VarintOverflow);
            }
        }
        Err(CodecError::VarintOverflow)
    }

    /// Read a varuint32 length prefix followed by that many bytes
    pub fn read_bytes(&mut self) -> Result<&'a [u8], CodecError> {
        let len = self.read_varuint32()? as usize;
        self.read_raw(len)
    }

    /// Read a length-prefixed UTF-8 string
    pub fn read_string(&mut self) -> Result<String, CodecError> {
        let raw = self.read_bytes()?;
        std::str::from_utf8(raw)
            .map(str::to_owned)
            .map_err(|_| CodecError::InvalidUtf8)
    }
}
