pub mod constants;
pub mod protocol;
pub mod schema;

pub use protocol::{BinaryProtocol, ProtocolError, TType, WireProtocol};
pub use schema::{Field, FieldType, SchemaError, StructSchema, StructValue, Value};
