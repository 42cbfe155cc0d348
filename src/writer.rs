use crate::chunk::Chunk;
use crate::compression::CompressionScheme;
use crate::entity::Properties;
use crate::error::{ChunkWriteError, PlacementError};
use crate::position::{
    CoordinateSpace, RegionChunkPosition, RegionPosition, CHUNK_BLOCKS_SIDE, REGION_BLOCKS_SIDE,
};
use crate::region::{REGION_CHUNKS, REGION_SECTOR_BYTES_LENGTH};
use crate::{YMAX, YMIN};
use byteorder::{BigEndian, WriteBytesExt};
use log::debug;
use nbt::encode::write_compound_tag;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Compression scheme used for every written chunk.
const WRITE_COMPRESSION_SCHEME: CompressionScheme = CompressionScheme::Zlib;
/// Sectors taken by location and timestamp tables.
const REGION_HEADER_SECTORS: u32 = 2;
/// Sector count is stored in a single byte.
const CHUNK_MAXIMUM_SECTORS: u32 = 255;

/// Region assembled in memory, 32x32 group of chunks.
pub struct RegionWriter {
    /// Region coordinates.
    position: RegionPosition,
    /// Chunk slots, z-major.
    chunks: Vec<Option<Chunk>>,
}

/// Place of chunk data in region, in 4KiB sectors from the end of header.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct SectorLocation {
    offset: u32,
    sectors: u8,
}

impl RegionWriter {
    pub fn new(x: i32, z: i32) -> Self {
        RegionWriter {
            position: RegionPosition::new(x, z),
            chunks: (0..REGION_CHUNKS).map(|_| None).collect(),
        }
    }

    pub fn position(&self) -> RegionPosition {
        self.position
    }

    /// Checks that coordinates belong to this region and the world height.
    pub fn inside(&self, x: i32, y: i32, z: i32, space: CoordinateSpace) -> bool {
        let factor = space.region_factor();
        let region_x = x.div_euclid(factor);
        let region_z = z.div_euclid(factor);

        region_x == self.position.x && region_z == self.position.z && y >= YMIN && y <= YMAX
    }

    /// Returns chunk at chunk coordinates, `None` when slot is empty.
    pub fn chunk(&self, chunk_x: i32, chunk_z: i32) -> Result<Option<&Chunk>, PlacementError> {
        let index = self.chunk_index(chunk_x, chunk_z)?;

        Ok(self.chunks[index].as_ref())
    }

    pub fn chunk_mut(
        &mut self,
        chunk_x: i32,
        chunk_z: i32,
    ) -> Result<Option<&mut Chunk>, PlacementError> {
        let index = self.chunk_index(chunk_x, chunk_z)?;

        Ok(self.chunks[index].as_mut())
    }

    /// Puts chunk into its slot, previous chunk in the slot is replaced.
    pub fn add_chunk(&mut self, chunk: Chunk) -> Result<(), PlacementError> {
        let index = self.chunk_index(chunk.x(), chunk.z())?;
        self.chunks[index] = Some(chunk);

        Ok(())
    }

    /// Amount of occupied chunk slots.
    pub fn chunk_count(&self) -> usize {
        self.chunks.iter().filter(|chunk| chunk.is_some()).count()
    }

    /// Adds entity at world coordinates, chunk is created when missing.
    ///
    /// Region membership is checked on the floored world coordinates, not on
    /// coordinates wrapped into the region, so points of neighbour regions fail.
    pub fn add_entity(
        &mut self,
        id: &str,
        x: f64,
        y: f64,
        z: f64,
        properties: Properties,
    ) -> Result<(), PlacementError> {
        let (block_x, block_y, block_z) = (x.floor() as i32, y.floor() as i32, z.floor() as i32);
        let finite = x.is_finite() && y.is_finite() && z.is_finite();

        if !finite || !self.inside(block_x, block_y, block_z, CoordinateSpace::Block) {
            return Err(PlacementError::OutOfBoundsCoordinates {
                space: CoordinateSpace::Block,
                x: block_x,
                y: block_y,
                z: block_z,
            });
        }

        let (origin_x, origin_z) = self.position.origin_chunk();
        let chunk_x = origin_x + block_x.rem_euclid(REGION_BLOCKS_SIDE) / CHUNK_BLOCKS_SIDE;
        let chunk_z = origin_z + block_z.rem_euclid(REGION_BLOCKS_SIDE) / CHUNK_BLOCKS_SIDE;

        let index = self.chunk_index(chunk_x, chunk_z)?;
        let chunk = self.chunks[index].get_or_insert_with(|| Chunk::new(chunk_x, chunk_z));

        chunk.add_entity(id, x, y, z, properties);

        Ok(())
    }

    /// Returns region as bytes in anvil format, aka the final `.mca` file.
    pub fn save(&self) -> Result<Vec<u8>, ChunkWriteError> {
        let mut locations = Vec::with_capacity(REGION_CHUNKS);
        let mut chunks_buffer = Vec::new();

        for (index, chunk) in self.chunks.iter().enumerate() {
            let chunk = match chunk {
                Some(chunk) => chunk,
                None => {
                    locations.push(None);
                    continue;
                }
            };

            let compressed = compress_chunk(chunk)?;
            let location = append_chunk_payload(&mut chunks_buffer, &compressed)?;

            let position = RegionChunkPosition::from_metadata_index(index);

            debug!(
                target: "anvil-entity-region",
                "Region x: {}, z: {} chunk x: {}, z: {} saved to sector {} taking {} sectors",
                self.position.x, self.position.z, position.x, position.z,
                location.offset + REGION_HEADER_SECTORS, location.sectors
            );

            locations.push(Some(location));
        }

        let sector_length = REGION_SECTOR_BYTES_LENGTH as usize;
        let mut buffer = Vec::with_capacity(2 * sector_length + chunks_buffer.len());

        for location in &locations {
            match location {
                Some(location) => {
                    buffer.write_u24::<BigEndian>(location.offset + REGION_HEADER_SECTORS)?;
                    buffer.write_u8(location.sectors)?;
                }
                None => buffer.write_u32::<BigEndian>(0)?,
            }
        }

        // Timestamps are not tracked.
        buffer.resize(2 * sector_length, 0);
        buffer.extend_from_slice(&chunks_buffer);
        pad_to_sector(&mut buffer);

        debug!(
            target: "anvil-entity-region",
            "Region x: {}, z: {} saved with {} chunks in {} bytes",
            self.position.x, self.position.z, self.chunk_count(), buffer.len()
        );

        Ok(buffer)
    }

    /// Saves region and writes it to the writer.
    pub fn save_to<W: Write>(&self, writer: &mut W) -> Result<Vec<u8>, ChunkWriteError> {
        let buffer = self.save()?;
        writer.write_all(&buffer)?;
        writer.flush()?;

        Ok(buffer)
    }

    /// Saves region to the file at path, file is created or truncated.
    ///
    /// File is only touched when region was encoded successfully.
    pub fn save_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<u8>, ChunkWriteError> {
        let buffer = self.save()?;

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;

        file.write_all(&buffer)?;

        Ok(buffer)
    }

    fn chunk_index(&self, chunk_x: i32, chunk_z: i32) -> Result<usize, PlacementError> {
        if !self.inside(chunk_x, 0, chunk_z, CoordinateSpace::Chunk) {
            return Err(PlacementError::OutOfBoundsCoordinates {
                space: CoordinateSpace::Chunk,
                x: chunk_x,
                y: 0,
                z: chunk_z,
            });
        }

        Ok(RegionChunkPosition::from_chunk_position(chunk_x, chunk_z).metadata_index())
    }
}

/// Encodes chunk tag and compresses it with the write compression scheme.
fn compress_chunk(chunk: &Chunk) -> Result<Vec<u8>, ChunkWriteError> {
    let compound_tag = chunk.to_compound_tag()?;

    let mut buffer = Vec::new();
    write_compound_tag(&mut buffer, &compound_tag)?;

    Ok(WRITE_COMPRESSION_SCHEME.compress(&buffer)?)
}

/// Appends length prefixed chunk data to the sector aligned buffer.
fn append_chunk_payload(
    chunks_buffer: &mut Vec<u8>,
    compressed: &[u8],
) -> Result<SectorLocation, ChunkWriteError> {
    // 1 byte for compression scheme.
    let length = compressed.len() as u32 + 1;
    // 4 bytes for data length.
    let sectors = sectors_required(length + 4)?;
    let offset = chunks_buffer.len() as u32 / REGION_SECTOR_BYTES_LENGTH;

    chunks_buffer.write_u32::<BigEndian>(length)?;
    chunks_buffer.write_u8(WRITE_COMPRESSION_SCHEME.id())?;
    chunks_buffer.extend_from_slice(compressed);
    pad_to_sector(chunks_buffer);

    Ok(SectorLocation { offset, sectors })
}

/// Amount of sectors needed for payload, must fit sector count byte.
fn sectors_required(payload_length: u32) -> Result<u8, ChunkWriteError> {
    let sectors = (payload_length + REGION_SECTOR_BYTES_LENGTH - 1) / REGION_SECTOR_BYTES_LENGTH;

    if sectors > CHUNK_MAXIMUM_SECTORS {
        return Err(ChunkWriteError::LengthExceedsMaximum {
            length: payload_length,
        });
    }

    Ok(sectors as u8)
}

/// Pads buffer with zeros up to the sector boundary.
fn pad_to_sector(buffer: &mut Vec<u8>) {
    let sector_length = REGION_SECTOR_BYTES_LENGTH as usize;
    let padding_len = (sector_length - buffer.len() % sector_length) % sector_length;

    buffer.resize(buffer.len() + padding_len, 0);
}
