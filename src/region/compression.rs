use crate::region::{GZIP_COMPRESSION_TYPE, ZLIB_COMPRESSION_TYPE};
use flate2::read::{GzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::Compression;
use std::io;
use std::io::{Read, Write};

/// Compression scheme used for chunk.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CompressionScheme {
    Gzip,
    /// In practice, you will only ever encounter chunks compressed using zlib.
    Zlib,
}

impl CompressionScheme {
    pub fn from_id(id: u8) -> Option<CompressionScheme> {
        match id {
            GZIP_COMPRESSION_TYPE => Some(CompressionScheme::Gzip),
            ZLIB_COMPRESSION_TYPE => Some(CompressionScheme::Zlib),
            _ => None,
        }
    }

    pub fn id(self) -> u8 {
        match self {
            CompressionScheme::Gzip => GZIP_COMPRESSION_TYPE,
            CompressionScheme::Zlib => ZLIB_COMPRESSION_TYPE,
        }
    }

    /// Decompresses at most `maximum_length` bytes, failing on longer output.
    pub fn decompress(self, compressed: &[u8], maximum_length: u64) -> Result<Vec<u8>, io::Error> {
        match self {
            CompressionScheme::Gzip => read_limited(GzDecoder::new(compressed), maximum_length),
            CompressionScheme::Zlib => read_limited(ZlibDecoder::new(compressed), maximum_length),
        }
    }

    pub fn compress(self, bytes: &[u8]) -> Result<Vec<u8>, io::Error> {
        match self {
            CompressionScheme::Gzip => {
                let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(bytes)?;
                encoder.finish()
            }
            CompressionScheme::Zlib => {
                let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(bytes)?;
                encoder.finish()
            }
        }
    }
}

fn read_limited<R: Read>(reader: R, maximum_length: u64) -> Result<Vec<u8>, io::Error> {
    let mut buffer = Vec::new();
    reader.take(maximum_length + 1).read_to_end(&mut buffer)?;

    if buffer.len() as u64 > maximum_length {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Decompressed chunk exceeds {} bytes", maximum_length),
        ));
    }

    Ok(buffer)
}
