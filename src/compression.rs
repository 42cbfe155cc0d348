use crate::error::ChunkReadError;
use flate2::read::{GzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::Compression;
use std::io;
use std::io::{Read, Write};

/// Compression scheme used for chunk.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum CompressionScheme {
    Gzip = 1,
    /// In practice, you will only ever encounter chunks compressed using zlib.
    Zlib = 2,
    Uncompressed = 3,
    /// Reserved for custom compression, can't be decoded.
    Custom = 127,
}

impl CompressionScheme {
    /// Resolves compression scheme by the id stored in front of chunk data.
    pub fn from_id(compression_scheme: u8) -> Result<Self, ChunkReadError> {
        match compression_scheme {
            1 => Ok(CompressionScheme::Gzip),
            2 => Ok(CompressionScheme::Zlib),
            3 => Ok(CompressionScheme::Uncompressed),
            127 => Ok(CompressionScheme::Custom),
            _ => Err(ChunkReadError::UnknownCompressionSchema { compression_scheme }),
        }
    }

    pub fn id(&self) -> u8 {
        *self as u8
    }

    pub fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, ChunkReadError> {
        let mut buffer = Vec::new();

        match self {
            CompressionScheme::Gzip => {
                GzDecoder::new(data).read_to_end(&mut buffer)?;
            }
            CompressionScheme::Zlib => {
                ZlibDecoder::new(data).read_to_end(&mut buffer)?;
            }
            CompressionScheme::Uncompressed => buffer.extend_from_slice(data),
            CompressionScheme::Custom => {
                return Err(ChunkReadError::UnknownCompressionSchema {
                    compression_scheme: self.id(),
                })
            }
        }

        Ok(buffer)
    }

    pub fn compress(&self, data: &[u8]) -> Result<Vec<u8>, io::Error> {
        match self {
            CompressionScheme::Gzip => {
                let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(data)?;
                encoder.finish()
            }
            CompressionScheme::Zlib => {
                let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(data)?;
                encoder.finish()
            }
            CompressionScheme::Uncompressed => Ok(data.to_vec()),
            CompressionScheme::Custom => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "custom compression can't be encoded",
            )),
        }
    }
}

/// Decompresses chunk data compressed with scheme of given id.
pub fn decompress(compression_scheme: u8, data: &[u8]) -> Result<Vec<u8>, ChunkReadError> {
    CompressionScheme::from_id(compression_scheme)?.decompress(data)
}
