use crate::compression::CompressionScheme;
use crate::error::ChunkReadError;
use crate::position::RegionChunkPosition;
use byteorder::{BigEndian, ReadBytesExt};
use log::debug;
use nbt::decode::read_compound_tag;
use nbt::CompoundTag;
use std::io;
use std::io::{Cursor, Read, Seek, SeekFrom};

/// Amount of chunks in region.
pub const REGION_CHUNKS: usize = 1024;
/// Length of chunks metadata in region.
const REGION_CHUNKS_METADATA_LENGTH: usize = 2 * REGION_CHUNKS;
/// Region header length in bytes.
pub const REGION_HEADER_BYTES_LENGTH: u64 = 8 * REGION_CHUNKS as u64;
/// Region sector length in bytes.
pub const REGION_SECTOR_BYTES_LENGTH: u32 = 4096;
/// Maximum chunk length in bytes.
const CHUNK_MAXIMUM_BYTES_LENGTH: u32 = REGION_SECTOR_BYTES_LENGTH * 256;

/// Read-only region, 32x32 group of chunks.
pub struct RegionReader<S> {
    /// Source in which region are stored.
    source: S,
    /// Array of chunks metadata.
    chunks_metadata: [ChunkMetadata; REGION_CHUNKS],
    /// Gzip chunks fail with `GzipChunkData` instead of being decoded.
    reject_gzip: bool,
}

/// Byte offset of the chunk location entry in region header.
pub fn header_offset(chunk_x: i32, chunk_z: i32) -> u64 {
    RegionChunkPosition::from_chunk_position(chunk_x, chunk_z).header_offset()
}

impl<S> RegionReader<S> {
    /// Returns chunk offset in 4KiB sectors from the start of the source
    /// and chunk length in sectors.
    ///
    /// `(0, 0)` means chunk was not generated yet.
    pub fn chunk_location(&self, chunk_x: i32, chunk_z: i32) -> (u32, u8) {
        let metadata = self.get_metadata(chunk_x, chunk_z);

        (metadata.start_sector_index, metadata.sectors)
    }

    /// Last time in seconds when chunk was modified.
    pub fn chunk_timestamp(&self, chunk_x: i32, chunk_z: i32) -> u32 {
        self.get_metadata(chunk_x, chunk_z).last_modified_timestamp
    }

    /// Chunks with gzip compression will fail instead of being decoded.
    pub fn reject_gzip(&mut self, reject_gzip: bool) {
        self.reject_gzip = reject_gzip;
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    fn get_metadata(&self, chunk_x: i32, chunk_z: i32) -> ChunkMetadata {
        let position = RegionChunkPosition::from_chunk_position(chunk_x, chunk_z);

        self.chunks_metadata[position.metadata_index()]
    }
}

impl RegionReader<Cursor<Vec<u8>>> {
    /// Reads region from the region file content.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, io::Error> {
        Self::load(Cursor::new(data))
    }
}

impl<S: Read + Seek> RegionReader<S> {
    pub fn load(mut source: S) -> Result<Self, io::Error> {
        let source_len = source.len()?;
        let chunks_metadata = Self::read_header(&mut source, source_len)?;

        let region = RegionReader {
            source,
            chunks_metadata,
            reject_gzip: false,
        };

        Ok(region)
    }

    /// Returns decompressed chunk data, `None` when chunk is absent.
    pub fn chunk_payload(
        &mut self,
        chunk_x: i32,
        chunk_z: i32,
    ) -> Result<Option<Vec<u8>>, ChunkReadError> {
        let metadata = self.get_metadata(chunk_x, chunk_z);

        if metadata.is_empty() {
            return Ok(None);
        }

        let seek_offset = metadata.start_sector_index as u64 * REGION_SECTOR_BYTES_LENGTH as u64;

        self.source.seek(SeekFrom::Start(seek_offset))?;
        let length = self.source.read_u32::<BigEndian>()?;
        let compression_scheme = CompressionScheme::from_id(self.source.read_u8()?)?;

        match compression_scheme {
            CompressionScheme::Custom => {
                return Err(ChunkReadError::UnknownCompressionSchema {
                    compression_scheme: compression_scheme.id(),
                })
            }
            CompressionScheme::Gzip if self.reject_gzip => {
                return Err(ChunkReadError::GzipChunkData)
            }
            _ => {}
        }

        if length == 0 {
            return Err(ChunkReadError::EmptyPayload);
        }

        // Sector count from header is not checked.
        if length > CHUNK_MAXIMUM_BYTES_LENGTH {
            return Err(ChunkReadError::LengthExceedsMaximum {
                length,
                maximum_length: CHUNK_MAXIMUM_BYTES_LENGTH,
            });
        }

        let mut compressed_buffer = vec![0u8; (length - 1) as usize];
        self.source.read_exact(&mut compressed_buffer)?;

        debug!(
            target: "anvil-entity-region",
            "Reading chunk x: {}, z: {} with {} compressed bytes using {:?}",
            chunk_x, chunk_z, length - 1, compression_scheme
        );

        Ok(Some(compression_scheme.decompress(&compressed_buffer)?))
    }

    /// Returns chunk tag, `None` when chunk is absent.
    pub fn chunk_data(
        &mut self,
        chunk_x: i32,
        chunk_z: i32,
    ) -> Result<Option<CompoundTag>, ChunkReadError> {
        match self.chunk_payload(chunk_x, chunk_z)? {
            Some(payload) => Ok(Some(read_compound_tag(&mut Cursor::new(payload))?)),
            None => Ok(None),
        }
    }

    /// First 8KB of source are header of 1024 offsets and 1024 timestamps.
    ///
    /// Source shorter than the offsets table is an empty region, timestamps
    /// are zero when only the offsets table is present.
    fn read_header(
        source: &mut S,
        source_len: u64,
    ) -> Result<[ChunkMetadata; REGION_CHUNKS], io::Error> {
        let mut chunks_metadata = [Default::default(); REGION_CHUNKS];

        if (REGION_SECTOR_BYTES_LENGTH as u64) > source_len {
            return Ok(chunks_metadata);
        }

        source.seek(SeekFrom::Start(0))?;

        let mut values = [0u32; REGION_CHUNKS_METADATA_LENGTH];
        let (offsets, timestamps) = values.split_at_mut(REGION_CHUNKS);
        source.read_u32_into::<BigEndian>(offsets)?;

        if source_len >= REGION_HEADER_BYTES_LENGTH {
            source.read_u32_into::<BigEndian>(timestamps)?;
        }

        for (index, metadata) in chunks_metadata.iter_mut().enumerate() {
            let offset = values[index];
            let last_modified_timestamp = values[REGION_CHUNKS + index];

            let start_sector_index = offset >> 8;
            let sectors = (offset & 0xFF) as u8;

            *metadata = ChunkMetadata::new(start_sector_index, sectors, last_modified_timestamp);
        }

        Ok(chunks_metadata)
    }
}

/// Chunk metadata are stored in header.
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq)]
struct ChunkMetadata {
    /// Sector index from which starts chunk data.
    start_sector_index: u32,
    /// Amount of sectors used to store chunk.
    sectors: u8,
    /// Last time in seconds when chunk was modified.
    last_modified_timestamp: u32,
}

impl ChunkMetadata {
    fn new(start_sector_index: u32, sectors: u8, last_modified_timestamp: u32) -> Self {
        ChunkMetadata {
            start_sector_index,
            sectors,
            last_modified_timestamp,
        }
    }

    fn is_empty(&self) -> bool {
        self.start_sector_index == 0 && self.sectors == 0
    }
}

/// Trait adds additional helper methods for `Seek`.
trait SeekExt {
    fn len(&mut self) -> Result<u64, io::Error>;
}

impl<S: Seek> SeekExt for S {
    fn len(&mut self) -> Result<u64, io::Error> {
        let old_pos = self.seek(SeekFrom::Current(0))?;
        let len = self.seek(SeekFrom::End(0))?;

        if old_pos != len {
            self.seek(SeekFrom::Start(old_pos))?;
        }

        Ok(len)
    }
}
