use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("struct `{schema}` declares field id {id} more than once")]
    DuplicateFieldId { schema: String, id: i16 },

    #[error("struct `{schema}` declares field `{name}` more than once")]
    DuplicateFieldName { schema: String, name: String },

    #[error("struct `{schema}` has no field named `{name}`")]
    UnknownField { schema: String, name: String },
}
