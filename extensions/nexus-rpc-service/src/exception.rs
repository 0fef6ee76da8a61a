use nexus::{SchemaError, StructSchema, StructValue, Value};
use std::fmt;
use std::sync::Arc;

/// An instance of a declared exception struct.
///
/// Handlers return these to signal an expected failure; callers receive an
/// equal instance decoded from the result union. The exception's identity is
/// the name of its struct schema, which is what the server matches against
/// the method's declared exception fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationException {
    schema: Arc<StructSchema>,
    fields: StructValue,
}

impl ApplicationException {
    /// Builds an exception from `(field name, value)` pairs.
    pub fn new<N, I>(schema: Arc<StructSchema>, fields: I) -> Result<Self, SchemaError>
    where
        N: AsRef<str>,
        I: IntoIterator<Item = (N, Value)>,
    {
        let fields = schema.value_from_names(fields)?;
        Ok(Self { schema, fields })
    }

    pub fn from_fields(schema: Arc<StructSchema>, fields: StructValue) -> Self {
        Self { schema, fields }
    }

    pub fn type_name(&self) -> &str {
        self.schema.name()
    }

    pub fn schema(&self) -> &Arc<StructSchema> {
        &self.schema
    }

    pub fn fields(&self) -> &StructValue {
        &self.fields
    }

    pub fn into_fields(self) -> StructValue {
        self.fields
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schema.get(&self.fields, name)
    }
}

impl fmt::Display for ApplicationException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())?;
        if let Some(message) = self.get("message").and_then(Value::as_str) {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApplicationException {}
