use super::TType;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The buffer ended in the middle of a value.
    #[error("unexpected end of input while reading {context}")]
    UnexpectedEof { context: &'static str },

    /// A type byte that is not a known `TType`.
    #[error("invalid type tag {0}")]
    InvalidType(u8),

    /// A length or size prefix was negative or exceeded the configured bound.
    #[error("invalid length prefix {0}")]
    InvalidLength(i64),

    #[error("string field is not valid UTF-8")]
    InvalidUtf8,

    #[error("nesting depth exceeds {0}")]
    DepthLimitExceeded(usize),

    /// A container announced elements of a different type than its schema.
    #[error("container elements expected {expected:?}, found {found:?}")]
    ElementTypeMismatch { expected: TType, found: TType },

    /// A struct value populated an id its schema does not declare.
    #[error("struct `{schema}` has no field with id {id}")]
    UnknownFieldId { schema: String, id: i16 },

    /// A value did not match the type its schema declares.
    #[error("field `{field}` expects {expected:?}, got {found}")]
    TypeMismatch {
        field: String,
        expected: TType,
        found: &'static str,
    },
}
