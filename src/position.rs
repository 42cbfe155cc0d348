/// Chunks along one side of region.
pub const REGION_CHUNKS_SIDE: i32 = 32;
/// Blocks along one side of chunk.
pub const CHUNK_BLOCKS_SIDE: i32 = 16;
/// Blocks along one side of region.
pub const REGION_BLOCKS_SIDE: i32 = REGION_CHUNKS_SIDE * CHUNK_BLOCKS_SIDE;

/// Space in which coordinates are expressed.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum CoordinateSpace {
    /// World block coordinates.
    Block,
    /// World chunk coordinates.
    Chunk,
    /// Section Y index inside chunk.
    Section,
}

impl CoordinateSpace {
    /// How many units of this space fit along one side of region.
    pub(crate) fn region_factor(&self) -> i32 {
        match self {
            CoordinateSpace::Chunk => REGION_CHUNKS_SIDE,
            _ => REGION_BLOCKS_SIDE,
        }
    }
}

#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Copy, Clone)]
pub struct RegionPosition {
    pub x: i32,
    pub z: i32,
}

impl RegionPosition {
    pub fn new(x: i32, z: i32) -> RegionPosition {
        RegionPosition { x, z }
    }

    pub fn from_chunk_position(chunk_x: i32, chunk_z: i32) -> RegionPosition {
        let x = chunk_x >> 5;
        let z = chunk_z >> 5;

        RegionPosition::new(x, z)
    }

    pub fn from_block_position(block_x: i32, block_z: i32) -> RegionPosition {
        let x = block_x >> 9;
        let z = block_z >> 9;

        RegionPosition::new(x, z)
    }

    /// World chunk coordinates of the region north-west corner.
    pub fn origin_chunk(&self) -> (i32, i32) {
        (self.x * REGION_CHUNKS_SIDE, self.z * REGION_CHUNKS_SIDE)
    }
}

#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Copy, Clone)]
pub struct RegionChunkPosition {
    pub x: u8,
    pub z: u8,
}

impl RegionChunkPosition {
    pub fn new(x: u8, z: u8) -> RegionChunkPosition {
        debug_assert!(32 > x, "Region chunk x coordinate out of bounds");
        debug_assert!(32 > z, "Region chunk z coordinate out of bounds");

        RegionChunkPosition { x, z }
    }

    /// Wraps world chunk coordinates into the region, negative ones included.
    pub fn from_chunk_position(chunk_x: i32, chunk_z: i32) -> RegionChunkPosition {
        let x = (chunk_x & 31) as u8;
        let z = (chunk_z & 31) as u8;

        RegionChunkPosition::new(x, z)
    }

    pub(crate) fn from_metadata_index(index: usize) -> RegionChunkPosition {
        RegionChunkPosition::new((index % 32) as u8, (index / 32) as u8)
    }

    /// Slot index inside the 32x32 grid, z-major.
    pub fn metadata_index(&self) -> usize {
        self.x as usize + self.z as usize * 32
    }

    /// Byte offset of the chunk location entry in region header.
    pub fn header_offset(&self) -> u64 {
        4 * self.metadata_index() as u64
    }
}

#[cfg(test)]
mod tests {
    use crate::position::{RegionChunkPosition, RegionPosition};

    #[test]
    fn test_region_from_chunk_position() {
        assert_eq!(RegionPosition::from_chunk_position(31, 32), RegionPosition::new(0, 1));
        assert_eq!(RegionPosition::from_chunk_position(-1, -33), RegionPosition::new(-1, -2));
    }

    #[test]
    fn test_region_from_block_position() {
        assert_eq!(RegionPosition::from_block_position(511, 512), RegionPosition::new(0, 1));
        assert_eq!(RegionPosition::from_block_position(-1, 0), RegionPosition::new(-1, 0));
    }

    #[test]
    fn test_region_chunk_position_wraps_negative() {
        let position = RegionChunkPosition::from_chunk_position(-1, -32);

        assert_eq!(position, RegionChunkPosition::new(31, 0));
    }

    #[test]
    fn test_metadata_index() {
        let position = RegionChunkPosition::from_chunk_position(3, 2);

        assert_eq!(position.metadata_index(), 67);
        assert_eq!(position.header_offset(), 268);
        assert_eq!(RegionChunkPosition::from_metadata_index(67), position);
    }
}
