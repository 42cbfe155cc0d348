use crate::error::ChunkWriteError;
use nbt::Tag;

/// Entity property value.
///
/// Only these shapes can be stored as entity tags.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i32),
    Float(f32),
    /// Stored as a byte tag, 0 or 1.
    Bool(bool),
    StringList(Vec<String>),
    FloatList(Vec<f32>),
}

impl Value {
    /// Converts value into tag to be stored under `name`.
    ///
    /// Empty lists have no element type and are rejected.
    pub fn to_tag(&self, name: &str) -> Result<Tag, ChunkWriteError> {
        let tag = match self {
            Value::String(value) => Tag::String(value.clone()),
            Value::Bool(value) => Tag::Byte(*value as i8),
            Value::Int(value) => Tag::Int(*value),
            Value::Float(value) => Tag::Float(*value),
            Value::StringList(values) if !values.is_empty() => {
                Tag::List(values.iter().cloned().map(Tag::String).collect())
            }
            Value::FloatList(values) if !values.is_empty() => {
                Tag::List(values.iter().copied().map(Tag::Float).collect())
            }
            Value::StringList(_) | Value::FloatList(_) => {
                return Err(ChunkWriteError::UnsupportedPropertyType {
                    name: name.to_owned(),
                    value: format!("{:?}", self),
                })
            }
        };

        Ok(tag)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(values: Vec<String>) -> Self {
        Value::StringList(values)
    }
}

impl From<Vec<&str>> for Value {
    fn from(values: Vec<&str>) -> Self {
        Value::StringList(values.into_iter().map(str::to_owned).collect())
    }
}

impl From<Vec<f32>> for Value {
    fn from(values: Vec<f32>) -> Self {
        Value::FloatList(values)
    }
}
