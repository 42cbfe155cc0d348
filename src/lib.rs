//! Anvil region file format storage for entity chunks.
//!
//! [`RegionWriter`] places entities into chunks of a 32x32 chunks region and packs
//! them into the `.mca` byte layout, [`RegionReader`] reads chunk tags back from
//! any region file.

pub mod chunk;
pub mod compression;
pub mod entity;
pub mod error;
pub mod position;
pub mod region;
pub mod section;
pub mod value;
pub mod writer;

pub use crate::chunk::Chunk;
pub use crate::compression::CompressionScheme;
pub use crate::entity::{Entity, Properties};
pub use crate::error::{ChunkReadError, ChunkWriteError, PlacementError};
pub use crate::position::{CoordinateSpace, RegionChunkPosition, RegionPosition};
pub use crate::region::RegionReader;
pub use crate::section::Section;
pub use crate::value::Value;
pub use crate::writer::RegionWriter;

/// Lowest block Y of the world.
pub const YMIN: i32 = -64;
/// Highest block Y of the world.
pub const YMAX: i32 = 319;
/// Amount of sections in chunk.
pub const NSECTIONS: usize = ((YMAX - YMIN + 1) / 16) as usize;
/// `DataVersion` written for new chunks.
pub const DEFAULT_DATA_VERSION: i32 = 1976;
