use crate::position::CoordinateSpace;
use nbt::decode::TagDecodeError;
use std::{error::Error, fmt::Display, io};

/// Possible errors while reading the chunk from region.
#[derive(Debug)]
pub enum ChunkReadError {
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
    /// Chunk length prefix is zero, so there is not even a compression byte.
    EmptyPayload,
    /// Known compression schemes are Gzip, Zlib and Uncompressed.
    ///
    /// Scheme 127 is reserved for custom compression and never can be decoded.
    UnknownCompressionSchema {
        /// Compression scheme type id.
        compression_scheme: u8,
    },
    /// Chunk is compressed with gzip while reader was told to reject it.
    GzipChunkData,
    /// I/O Error which happened while were reading chunk data from region.
    IOError { io_error: io::Error },
    /// Error while decoding binary data to NBT tag.
    ///
    /// This should not occur under normal conditions.
    ///
    /// Region file are corrupted or a developer error in the NBT library.
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
            IOError { io_error } => Some(io_error),
            TagDecodeError { tag_decode_error } => Some(tag_decode_error),
            _ => None,
        }
    }
}

impl Display for ChunkReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ChunkReadError::*;
        match self {
            LengthExceedsMaximum {
                length,
                maximum_length,
            } => write!(
                f,
                "Chunk length of {} exceeds maximum ({})",
                length, maximum_length
            ),
            EmptyPayload => write!(f, "Chunk length is zero"),
            UnknownCompressionSchema {
                compression_scheme: 127,
            } => write!(
                f,
                "Encountered unknown compression schema 127 (Id 127 indicates custom compression)"
            ),
            UnknownCompressionSchema { compression_scheme } => write!(
                f,
                "Encountered unknown compression schema {}",
                compression_scheme
            ),
            GzipChunkData => write!(f, "Chunk data is compressed with gzip"),
            IOError { .. } => write!(f, "IO Error"),
            TagDecodeError { .. } => write!(f, "Failed to decode nbt"),
        }
    }
}

/// Possible errors while saving the region.
#[derive(Debug)]
pub enum ChunkWriteError {
    /// Entity property value can't be represented as a tag.
    UnsupportedPropertyType {
        /// Property name.
        name: String,
        /// Debug representation of the offending value.
        value: String,
    },
    /// Chunk needs more sectors than header can address (255).
    ///
    /// This should not occur under normal conditions.
    LengthExceedsMaximum {
        /// Chunk length.
        length: u32,
    },
    /// I/O Error which happened while were writing region data.
    IOError { io_error: io::Error },
}

impl From<io::Error> for ChunkWriteError {
    fn from(io_error: io::Error) -> Self {
        ChunkWriteError::IOError { io_error }
    }
}

impl Error for ChunkWriteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ChunkWriteError::IOError { io_error } => Some(io_error),
            _ => None,
        }
    }
}

impl Display for ChunkWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ChunkWriteError::*;
        match self {
            UnsupportedPropertyType { name, value } => {
                write!(f, "Unsupported property type for {}={}", name, value)
            }
            LengthExceedsMaximum { length } => {
                write!(f, "Chunk length of {} exceeds maximum (1mb)", length)
            }
            IOError { .. } => write!(f, "IO Error"),
        }
    }
}

/// Possible errors while placing chunks, sections or entities.
#[derive(Debug, Eq, PartialEq)]
pub enum PlacementError {
    /// Coordinates are outside of the region or the world height.
    OutOfBoundsCoordinates {
        /// Space in which coordinates are given.
        space: CoordinateSpace,
        x: i32,
        y: i32,
        z: i32,
    },
    /// Chunk already has a section with the same Y and replacing was disabled.
    SectionAlreadyExists { y: i8 },
}

impl Error for PlacementError {}

impl Display for PlacementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use PlacementError::*;
        match self {
            OutOfBoundsCoordinates {
                space: CoordinateSpace::Chunk,
                x,
                z,
                ..
            } => write!(f, "Chunk ({}, {}) is not inside this region", x, z),
            OutOfBoundsCoordinates {
                space: CoordinateSpace::Section,
                y,
                ..
            } => write!(f, "Section (Y={}) is outside of the world height", y),
            OutOfBoundsCoordinates { x, y, z, .. } => {
                write!(f, "Entity ({}, {}, {}) is not inside this region", x, y, z)
            }
            SectionAlreadyExists { y } => {
                write!(f, "Section (Y={}) already exists in this chunk", y)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{ChunkReadError, PlacementError};
    use crate::position::CoordinateSpace;

    #[test]
    fn test_custom_compression_message() {
        let error = ChunkReadError::UnknownCompressionSchema {
            compression_scheme: 127,
        };

        assert!(error.to_string().contains("custom compression"));
    }

    #[test]
    fn test_unknown_compression_message() {
        let error = ChunkReadError::UnknownCompressionSchema {
            compression_scheme: 9,
        };

        let message = error.to_string();

        assert!(message.contains('9'));
        assert!(!message.contains("custom compression"));
    }

    #[test]
    fn test_out_of_bounds_chunk_message() {
        let error = PlacementError::OutOfBoundsCoordinates {
            space: CoordinateSpace::Chunk,
            x: 40,
            y: 0,
            z: -1,
        };

        assert_eq!(error.to_string(), "Chunk (40, -1) is not inside this region");
    }
}
