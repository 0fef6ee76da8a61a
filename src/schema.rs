mod field_type;
mod schema_error;
mod struct_schema;
mod struct_value;
mod value;

pub use field_type::FieldType;
pub use schema_error::SchemaError;
pub use struct_schema::{Field, StructSchema};
pub use struct_value::StructValue;
pub use value::Value;
