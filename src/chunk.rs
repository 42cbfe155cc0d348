use crate::entity::{Entity, Properties};
use crate::error::{ChunkWriteError, PlacementError};
use crate::position::CoordinateSpace;
use crate::section::Section;
use crate::{DEFAULT_DATA_VERSION, NSECTIONS};
use log::debug;
use nbt::CompoundTag;

/// Chunk with entities, 16x16 column of blocks.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// X-axis chunk coordinate.
    x: i32,
    /// Z-axis chunk coordinate.
    z: i32,
    /// Written verbatim as `DataVersion`.
    data_version: i32,
    /// Sections from the bottom of the world up.
    sections: [Option<Section>; NSECTIONS],
    /// Entities in insertion order.
    entities: Vec<Entity>,
}

impl Chunk {
    pub fn new(x: i32, z: i32) -> Self {
        Chunk {
            x,
            z,
            data_version: DEFAULT_DATA_VERSION,
            sections: Default::default(),
            entities: Vec::new(),
        }
    }

    pub fn with_data_version(mut self, data_version: i32) -> Self {
        self.data_version = data_version;
        self
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn z(&self) -> i32 {
        self.z
    }

    pub fn data_version(&self) -> i32 {
        self.data_version
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn section(&self, y: i8) -> Option<&Section> {
        Section::index(y).and_then(|index| self.sections[index].as_ref())
    }

    /// Puts section at its own Y.
    ///
    /// With `replace` disabled an occupied Y is an error.
    pub fn add_section(&mut self, section: Section, replace: bool) -> Result<(), PlacementError> {
        let y = section.y();
        let index = Section::index(y).ok_or(PlacementError::OutOfBoundsCoordinates {
            space: CoordinateSpace::Section,
            x: self.x,
            y: y as i32,
            z: self.z,
        })?;

        if self.sections[index].is_some() && !replace {
            return Err(PlacementError::SectionAlreadyExists { y });
        }

        self.sections[index] = Some(section);

        Ok(())
    }

    /// Appends entity, coordinates are not checked against chunk bounds.
    pub fn add_entity(&mut self, id: &str, x: f64, y: f64, z: f64, properties: Properties) {
        debug!(
            target: "anvil-entity-region",
            "Chunk x: {}, z: {} adding entity {} at {}, {}, {}",
            self.x, self.z, id, x, y, z
        );

        self.entities.push(Entity::new(id, x, y, z, properties));
    }

    /// Root tag of the chunk: `DataVersion`, `Position` and `Entities`.
    pub fn to_compound_tag(&self) -> Result<CompoundTag, ChunkWriteError> {
        let entities = self
            .entities
            .iter()
            .map(Entity::to_compound_tag)
            .collect::<Result<Vec<_>, _>>()?;

        let mut compound_tag = CompoundTag::new();

        compound_tag.insert_i32("DataVersion", self.data_version);
        compound_tag.insert_i32_vec("Position", vec![self.x, self.z]);
        compound_tag.insert_compound_tag_vec("Entities", entities);

        Ok(compound_tag)
    }
}

#[cfg(test)]
mod tests {
    use crate::chunk::Chunk;
    use crate::entity::Properties;
    use crate::error::{ChunkWriteError, PlacementError};
    use crate::section::Section;
    use crate::value::Value;
    use crate::DEFAULT_DATA_VERSION;

    #[test]
    fn test_add_section_replace() {
        let mut chunk = Chunk::new(0, 0);

        chunk.add_section(Section::new(3), true).unwrap();
        chunk.add_section(Section::new(3), true).unwrap();

        assert_eq!(chunk.section(3), Some(&Section::new(3)));
        assert_eq!(chunk.section(4), None);
    }

    #[test]
    fn test_add_section_already_exists() {
        let mut chunk = Chunk::new(0, 0);

        chunk.add_section(Section::new(-2), false).unwrap();
        let error = chunk.add_section(Section::new(-2), false).unwrap_err();

        assert_eq!(error, PlacementError::SectionAlreadyExists { y: -2 });
    }

    #[test]
    fn test_add_section_out_of_bounds() {
        let mut chunk = Chunk::new(0, 0);

        match chunk.add_section(Section::new(20), true) {
            Err(PlacementError::OutOfBoundsCoordinates { y: 20, .. }) => {}
            result => panic!("Expected `OutOfBoundsCoordinates` but got `{:?}`", result),
        }
    }

    #[test]
    fn test_compound_tag() {
        let mut chunk = Chunk::new(3, -7);

        let mut properties = Properties::new();
        properties.insert("Age".to_owned(), Value::Int(-24000));

        chunk.add_entity("minecraft:cow", 48.5, 64.0, -112.0, properties);
        chunk.add_entity("minecraft:pig", 50.0, 64.0, -110.0, Properties::new());

        let compound_tag = chunk.to_compound_tag().unwrap();

        assert_eq!(compound_tag.get_i32("DataVersion").unwrap(), DEFAULT_DATA_VERSION);
        assert_eq!(compound_tag.get_i32_vec("Position").unwrap().to_vec(), vec![3, -7]);

        let entities = compound_tag.get_compound_tag_vec("Entities").unwrap();

        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].get_str("id").unwrap(), "minecraft:cow");
        assert_eq!(entities[0].get_i32("Age").unwrap(), -24000);
        assert_eq!(entities[1].get_str("id").unwrap(), "minecraft:pig");
    }

    #[test]
    fn test_compound_tag_data_version() {
        let chunk = Chunk::new(0, 0).with_data_version(3465);
        let compound_tag = chunk.to_compound_tag().unwrap();

        assert_eq!(compound_tag.get_i32("DataVersion").unwrap(), 3465);
        assert!(compound_tag.get_compound_tag_vec("Entities").unwrap().is_empty());
    }

    #[test]
    fn test_compound_tag_unsupported_property() {
        let mut chunk = Chunk::new(0, 0);

        let mut properties = Properties::new();
        properties.insert("Tags".to_owned(), Value::StringList(Vec::new()));

        chunk.add_entity("minecraft:cow", 1.0, 64.0, 1.0, properties);

        match chunk.to_compound_tag() {
            Err(ChunkWriteError::UnsupportedPropertyType { name, .. }) => assert_eq!(name, "Tags"),
            result => panic!("Expected `UnsupportedPropertyType` but got `{:?}`", result),
        }
    }
}
