//! Endian-aware primitive reader and writer over in-memory bytes.
//!
//! Byte order is chosen through the type parameter. Tags and region headers
//! are big-endian, which is the default.

use crate::error::CodecError;
use byteorder::{BigEndian, ByteOrder};
use std::marker::PhantomData;

/// Largest length a 16-bit string length field can hold.
pub const MAX_STRING_LENGTH: usize = u16::MAX as usize;

/// Largest length a 32-bit signed count field can hold.
pub const MAX_ARRAY_LENGTH: usize = i32::MAX as usize;

/// Sequential reader over a borrowed byte slice.
///
/// Reads past the end fail with [`CodecError::Truncated`] and leave the
/// position untouched.
#[derive(Debug, Clone)]
pub struct ByteReader<'a, B = BigEndian> {
    buffer: &'a [u8],
    position: usize,
    order: PhantomData<B>,
}

impl<'a, B: ByteOrder> ByteReader<'a, B> {
    pub fn new(buffer: &'a [u8]) -> Self {
        ByteReader {
            buffer,
            position: 0,
            order: PhantomData,
        }
    }

    /// Amount of bytes already consumed.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Amount of bytes left to read.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Consumes `length` bytes and returns them as a slice of the buffer.
    pub fn read_bytes(&mut self, length: usize) -> Result<&'a [u8], CodecError> {
        let remaining = self.remaining();

        if length > remaining {
            return Err(CodecError::Truncated {
                needed: length,
                remaining,
            });
        }

        let start = self.position;
        self.position += length;

        Ok(&self.buffer[start..self.position])
    }

    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8, CodecError> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16, CodecError> {
        Ok(B::read_u16(self.read_bytes(2)?))
    }

    pub fn read_i16(&mut self) -> Result<i16, CodecError> {
        Ok(B::read_i16(self.read_bytes(2)?))
    }

    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        Ok(B::read_u32(self.read_bytes(4)?))
    }

    pub fn read_i32(&mut self) -> Result<i32, CodecError> {
        Ok(B::read_i32(self.read_bytes(4)?))
    }

    pub fn read_i64(&mut self) -> Result<i64, CodecError> {
        Ok(B::read_i64(self.read_bytes(8)?))
    }

    pub fn read_f32(&mut self) -> Result<f32, CodecError> {
        Ok(B::read_f32(self.read_bytes(4)?))
    }

    pub fn read_f64(&mut self) -> Result<f64, CodecError> {
        Ok(B::read_f64(self.read_bytes(8)?))
    }

    /// Reads a 16-bit length followed by that many bytes.
    pub fn read_string_bytes(&mut self) -> Result<&'a [u8], CodecError> {
        let start = self.position;
        let length = self.read_u16()? as usize;

        self.read_bytes(length).map_err(|error| {
            self.position = start;
            error
        })
    }
}

/// Append-only writer into an owned buffer.
#[derive(Debug, Clone)]
pub struct ByteWriter<B = BigEndian> {
    buffer: Vec<u8>,
    order: PhantomData<B>,
}

impl<B: ByteOrder> Default for ByteWriter<B> {
    fn default() -> Self {
        ByteWriter::new()
    }
}

impl<B: ByteOrder> ByteWriter<B> {
    pub fn new() -> Self {
        ByteWriter {
            buffer: Vec::new(),
            order: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    pub fn write_i8(&mut self, value: i8) {
        self.buffer.push(value as u8);
    }

    pub fn write_u16(&mut self, value: u16) {
        let mut bytes = [0; 2];
        B::write_u16(&mut bytes, value);
        self.write_bytes(&bytes);
    }

    pub fn write_i16(&mut self, value: i16) {
        let mut bytes = [0; 2];
        B::write_i16(&mut bytes, value);
        self.write_bytes(&bytes);
    }

    pub fn write_u32(&mut self, value: u32) {
        let mut bytes = [0; 4];
        B::write_u32(&mut bytes, value);
        self.write_bytes(&bytes);
    }

    pub fn write_i32(&mut self, value: i32) {
        let mut bytes = [0; 4];
        B::write_i32(&mut bytes, value);
        self.write_bytes(&bytes);
    }

    pub fn write_i64(&mut self, value: i64) {
        let mut bytes = [0; 8];
        B::write_i64(&mut bytes, value);
        self.write_bytes(&bytes);
    }

    pub fn write_f32(&mut self, value: f32) {
        let mut bytes = [0; 4];
        B::write_f32(&mut bytes, value);
        self.write_bytes(&bytes);
    }

    pub fn write_f64(&mut self, value: f64) {
        let mut bytes = [0; 8];
        B::write_f64(&mut bytes, value);
        self.write_bytes(&bytes);
    }

    /// Writes a 16-bit length followed by the bytes.
    pub fn write_string_bytes(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        if bytes.len() > MAX_STRING_LENGTH {
            return Err(CodecError::Overflow {
                length: bytes.len(),
                maximum: MAX_STRING_LENGTH,
            });
        }

        self.write_u16(bytes.len() as u16);
        self.write_bytes(bytes);

        Ok(())
    }

    /// Writes a 32-bit signed element count.
    pub fn write_array_length(&mut self, length: usize) -> Result<(), CodecError> {
        if length > MAX_ARRAY_LENGTH {
            return Err(CodecError::Overflow {
                length,
                maximum: MAX_ARRAY_LENGTH,
            });
        }

        self.write_i32(length as i32);

        Ok(())
    }
}
