use super::StructSchema;
use crate::protocol::TType;
use std::sync::Arc;

/// The declared type of a struct field or container element.
///
/// Struct types carry their schema so nested values can be encoded and
/// decoded without a separate lookup table.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    Bool,
    Byte,
    I16,
    I32,
    I64,
    Double,
    String,
    Binary,
    Struct(Arc<StructSchema>),
    List(Box<FieldType>),
    Set(Box<FieldType>),
    Map(Box<FieldType>, Box<FieldType>),
}

impl FieldType {
    /// The tag this type is written with on the wire.
    ///
    /// `String` and `Binary` share a tag; they differ only in whether the
    /// payload is checked for UTF-8 on decode.
    pub fn ttype(&self) -> TType {
        match self {
            FieldType::Bool => TType::Bool,
            FieldType::Byte => TType::Byte,
            FieldType::I16 => TType::I16,
            FieldType::I32 => TType::I32,
            FieldType::I64 => TType::I64,
            FieldType::Double => TType::Double,
            FieldType::String | FieldType::Binary => TType::String,
            FieldType::Struct(_) => TType::Struct,
            FieldType::List(_) => TType::List,
            FieldType::Set(_) => TType::Set,
            FieldType::Map(_, _) => TType::Map,
        }
    }

    pub fn list_of(elem: FieldType) -> Self {
        FieldType::List(Box::new(elem))
    }

    pub fn set_of(elem: FieldType) -> Self {
        FieldType::Set(Box::new(elem))
    }

    pub fn map_of(key: FieldType, value: FieldType) -> Self {
        FieldType::Map(Box::new(key), Box::new(value))
    }

    /// Returns the nested schema for struct types.
    pub fn as_struct(&self) -> Option<&Arc<StructSchema>> {
        match self {
            FieldType::Struct(schema) => Some(schema),
            _ => None,
        }
    }
}
