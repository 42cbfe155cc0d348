use crate::error::ChunkWriteError;
use crate::value::Value;
use nbt::{CompoundTag, Tag};
use std::collections::BTreeMap;

/// Entity properties by tag name.
pub type Properties = BTreeMap<String, Value>;

/// Minecraft entity, for example `minecraft:villager`.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Entity type id.
    id: String,
    /// World-space position.
    x: f64,
    y: f64,
    z: f64,
    /// Extra tags written next to id and position.
    properties: Properties,
}

impl Entity {
    pub fn new(id: &str, x: f64, y: f64, z: f64, properties: Properties) -> Self {
        Entity {
            id: id.to_owned(),
            x,
            y,
            z,
            properties,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn position(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// `Pos` tag: list of x, y, z doubles.
    pub fn position_tag(&self) -> Tag {
        Tag::List(vec![
            Tag::Double(self.x),
            Tag::Double(self.y),
            Tag::Double(self.z),
        ])
    }

    pub fn to_compound_tag(&self) -> Result<CompoundTag, ChunkWriteError> {
        let mut compound_tag = CompoundTag::new();

        compound_tag.insert_str("id", self.id.as_str());
        compound_tag.insert("Pos", self.position_tag());

        for (name, value) in &self.properties {
            compound_tag.insert(name.as_str(), value.to_tag(name)?);
        }

        Ok(compound_tag)
    }
}

/// Entities are equal when they have the same id and properties, position is ignored.
impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.properties == other.properties
    }
}
