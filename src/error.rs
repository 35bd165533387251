use crate::position::RegionChunkPosition;
use crate::tag::TagKind;
use std::path::PathBuf;
use std::{error::Error, fmt::Display, io};

/// Possible errors while reading or writing primitives through the byte codec.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum CodecError {
    /// Buffer ended before the expected amount of bytes.
    Truncated {
        /// Bytes the read required.
        needed: usize,
        /// Bytes left in the buffer.
        remaining: usize,
    },
    /// Length does not fit into its wire length field.
    Overflow {
        /// Actual length.
        length: usize,
        /// Largest length the field can hold.
        maximum: usize,
    },
}

impl Error for CodecError {}

impl Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use CodecError::*;
        match self {
            Truncated { needed, remaining } => write!(
                f,
                "Truncated input: {} bytes needed but only {} remaining",
                needed, remaining
            ),
            Overflow { length, maximum } => write!(
                f,
                "Length of {} overflows its length field (maximum {})",
                length, maximum
            ),
        }
    }
}

/// Possible errors while decoding binary data to a tag tree.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum TagDecodeError {
    /// Primitive read failed, usually because the input is truncated.
    Codec { codec_error: CodecError },
    /// Kind byte outside of the known range.
    UnknownTagKind { kind: u8 },
    /// Array or list declared a negative element count.
    NegativeLength { length: i32 },
    /// Array or list declared more elements than the remaining bytes can hold.
    LengthExceedsRemaining {
        /// Declared element count.
        length: i32,
        /// Bytes left in the buffer.
        remaining: usize,
    },
    /// Compounds and lists nested deeper than the decoder allows.
    DepthLimitExceeded { depth: usize },
    /// Root tag must be a compound.
    RootNotCompound { kind: TagKind },
    /// List declared end tags as elements while being non-empty.
    EndTagInList { count: i32 },
    /// String bytes are not valid modified UTF-8.
    InvalidString { length: usize },
}

impl From<CodecError> for TagDecodeError {
    fn from(codec_error: CodecError) -> Self {
        TagDecodeError::Codec { codec_error }
    }
}

impl Error for TagDecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TagDecodeError::Codec { codec_error } => Some(codec_error),
            _ => None,
        }
    }
}

impl Display for TagDecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use TagDecodeError::*;
        match self {
            Codec { codec_error } => write!(f, "Failed to read tag: {}", codec_error),
            UnknownTagKind { kind } => write!(f, "Unknown tag kind: {}", kind),
            NegativeLength { length } => write!(f, "Negative length: {}", length),
            LengthExceedsRemaining { length, remaining } => write!(
                f,
                "Length of {} exceeds remaining {} bytes",
                length, remaining
            ),
            DepthLimitExceeded { depth } => {
                write!(f, "Tag nesting exceeds maximum depth of {}", depth)
            }
            RootNotCompound { kind } => write!(f, "Root tag is {} instead of compound", kind),
            EndTagInList { count } => write!(f, "List of {} end tags", count),
            InvalidString { length } => {
                write!(f, "Invalid modified UTF-8 string of {} bytes", length)
            }
        }
    }
}

/// Possible errors while inserting a tag into a list.
///
/// The list is left unchanged whenever one of these is returned.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ListInsertError {
    /// Tag kind differs from the list element kind.
    TypeMismatch { expected: TagKind, found: TagKind },
    /// Insertion index is past the end of the list.
    IndexOutOfRange { index: usize, len: usize },
}

impl Error for ListInsertError {}

impl Display for ListInsertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ListInsertError::*;
        match self {
            TypeMismatch { expected, found } => {
                write!(f, "List expects {} elements but got {}", expected, found)
            }
            IndexOutOfRange { index, len } => {
                write!(f, "Index {} out of range for list of length {}", index, len)
            }
        }
    }
}

/// Possible errors while getting a typed child of a compound tag.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum CompoundTagError<'a> {
    /// No child with this name.
    TagNotFound { name: &'a str },
    /// Child exists but has another kind.
    TagWrongType { name: &'a str, actual_kind: TagKind },
}

impl<'a> Error for CompoundTagError<'a> {}

impl<'a> Display for CompoundTagError<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use CompoundTagError::*;
        match self {
            TagNotFound { name } => write!(f, "Tag {} not found", name),
            TagWrongType { name, actual_kind } => {
                write!(f, "Tag {} has wrong type {}", name, actual_kind)
            }
        }
    }
}

/// Coordinate outside of the dimension it indexes.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct IndexOutOfRange {
    /// Name of the offending axis or array.
    pub axis: &'static str,
    /// Offending value.
    pub value: i64,
    /// Exclusive upper bound.
    pub bound: usize,
}

impl Error for IndexOutOfRange {}

impl Display for IndexOutOfRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Index {} on {} out of range [0, {})",
            self.value, self.axis, self.bound
        )
    }
}

/// Possible errors while opening a region.
///
/// Any of these makes the whole region unusable.
#[derive(Debug)]
pub enum RegionOpenError {
    /// Source is shorter than the location and timestamp tables.
    MalformedHeader {
        /// Source length.
        length: u64,
    },
    /// File name does not follow `r.<x>.<z>.<ext>`.
    InvalidFileName { path: PathBuf },
    /// I/O Error which happened while were reading region header.
    IOError { io_error: io::Error },
}

impl From<io::Error> for RegionOpenError {
    fn from(io_error: io::Error) -> Self {
        RegionOpenError::IOError { io_error }
    }
}

impl Error for RegionOpenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RegionOpenError::IOError { io_error } => Some(io_error),
            _ => None,
        }
    }
}

impl Display for RegionOpenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use RegionOpenError::*;
        match self {
            MalformedHeader { length } => write!(
                f,
                "Region header is malformed: source has only {} bytes",
                length
            ),
            InvalidFileName { path } => {
                write!(f, "Not a region file name: {}", path.display())
            }
            IOError { io_error } => write!(f, "IO Error: {}", io_error),
        }
    }
}

/// Possible errors while loading the chunk.
///
/// Any of these affects only the chunk it was returned for.
#[derive(Debug)]
pub enum ChunkReadError {
    /// Chunk at specified coordinates inside region not found.
    ChunkNotFound { position: RegionChunkPosition },
    /// Chunk failed to load earlier and was marked unusable.
    ChunkUnusable { position: RegionChunkPosition },
    /// Chunk location points into the header.
    ///
    /// Region file are corrupted.
    SectorOutOfBounds {
        /// Sector index from location table.
        sector: u32,
    },
    /// Chunk length is zero, so there is not even a compression byte.
    ///
    /// Region file are corrupted.
    EmptyPayload,
    /// Chunk length overlaps declared maximum.
    ///
    /// This should not occur under normal conditions.
    ///
    /// Region file are corrupted.
    LengthExceedsMaximum {
        /// Chunk length.
        length: u32,
        /// Chunk maximum expected length.
        maximum_length: u32,
    },
    /// Source ends before the declared chunk length.
    Truncated {
        /// Bytes the chunk requires, including its length field.
        needed: u64,
        /// Bytes available after the chunk start.
        available: u64,
    },
    /// Currently are only 2 types of compression: Gzip and Zlib.
    ///
    /// This should not occur under normal conditions.
    ///
    /// Region file are corrupted or was introduced new compression type.
    UnsupportedCompressionScheme {
        /// Compression scheme type id.
        compression_scheme: u8,
    },
    /// Compressed stream is corrupted.
    DecompressionFailure { io_error: io::Error },
    /// I/O Error which happened while were reading chunk data from region file.
    IOError { io_error: io::Error },
    /// Error while decoding binary data to NBT tag.
    ///
    /// Region file are corrupted.
    TagDecodeError { tag_decode_error: TagDecodeError },
}

impl From<io::Error> for ChunkReadError {
    fn from(io_error: io::Error) -> Self {
        ChunkReadError::IOError { io_error }
    }
}

impl From<TagDecodeError> for ChunkReadError {
    fn from(tag_decode_error: TagDecodeError) -> Self {
        ChunkReadError::TagDecodeError { tag_decode_error }
    }
}

impl Error for ChunkReadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        use ChunkReadError::*;
        match self {
            DecompressionFailure { io_error } => Some(io_error),
            IOError { io_error } => Some(io_error),
            ChunkReadError::TagDecodeError { tag_decode_error } => Some(tag_decode_error),
            _ => None,
        }
    }
}

impl Display for ChunkReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ChunkReadError::*;
        match self {
            ChunkNotFound { position } => {
                write!(f, "Chunk {}, {} not found", position.x, position.z)
            }
            ChunkUnusable { position } => write!(
                f,
                "Chunk {}, {} failed to load earlier",
                position.x, position.z
            ),
            SectorOutOfBounds { sector } => {
                write!(f, "Chunk sector {} points into region header", sector)
            }
            EmptyPayload => write!(f, "Chunk length is zero"),
            LengthExceedsMaximum {
                length,
                maximum_length,
            } => write!(
                f,
                "Chunk length of {} exceeds maximum ({})",
                length, maximum_length
            ),
            Truncated { needed, available } => write!(
                f,
                "Chunk needs {} bytes but only {} available",
                needed, available
            ),
            UnsupportedCompressionScheme { compression_scheme } => {
                write!(f, "Unsupported compression scheme: {}", compression_scheme)
            }
            DecompressionFailure { io_error } => {
                write!(f, "Failed to decompress chunk: {}", io_error)
            }
            IOError { io_error } => write!(f, "IO Error: {}", io_error),
            ChunkReadError::TagDecodeError { tag_decode_error } => {
                write!(f, "Failed to decode nbt: {}", tag_decode_error)
            }
        }
    }
}
