//! Mapping between call-site arguments and argument structs.
//!
//! Positional arguments follow ascending field-id order, not the order the
//! fields happen to be written in the interface definition. Keyword arguments
//! are applied afterwards and win over a positional value for the same field.

use crate::error::InvalidArgumentsError;
use nexus::{StructSchema, StructValue, Value};
use std::collections::BTreeMap;

/// Arguments for one call: positional values plus `name = value` pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    pub positional: Vec<Value>,
    pub keyword: Vec<(String, Value)>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a purely positional call.
    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            positional: values.into_iter().map(Into::into).collect(),
            keyword: Vec::new(),
        }
    }

    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keyword.push((name.into(), value.into()));
        self
    }

    /// Builds the argument struct for `schema` from these arguments.
    pub fn into_struct_value(self, schema: &StructSchema) -> Result<StructValue, InvalidArgumentsError> {
        let field_map = to_field_map(schema, self.positional, self.keyword)?;
        to_struct_value(schema, field_map)
    }
}

/// Merges positional and keyword arguments into a `field name -> value` map.
///
/// Extra positional values and unknown keyword names are rejected instead of
/// being dropped.
pub fn to_field_map(
    schema: &StructSchema,
    positional: Vec<Value>,
    keyword: impl IntoIterator<Item = (String, Value)>,
) -> Result<BTreeMap<String, Value>, InvalidArgumentsError> {
    let fields = schema.fields();
    if positional.len() > fields.len() {
        return Err(InvalidArgumentsError::TooManyPositional {
            schema: schema.name().to_string(),
            expected: fields.len(),
            given: positional.len(),
        });
    }

    let mut field_map: BTreeMap<String, Value> = fields
        .iter()
        .zip(positional)
        .map(|(field, value)| (field.name.clone(), value))
        .collect();

    for (name, value) in keyword {
        if schema.field_by_name(&name).is_none() {
            return Err(InvalidArgumentsError::UnknownKeyword {
                schema: schema.name().to_string(),
                name,
            });
        }
        field_map.insert(name, value);
    }

    Ok(field_map)
}

/// Converts a name-keyed field map into an id-keyed struct value.
pub fn to_struct_value(
    schema: &StructSchema,
    field_map: BTreeMap<String, Value>,
) -> Result<StructValue, InvalidArgumentsError> {
    let mut value = StructValue::new();
    for (name, field_value) in field_map {
        let field = schema
            .field_by_name(&name)
            .ok_or_else(|| InvalidArgumentsError::UnknownKeyword {
                schema: schema.name().to_string(),
                name: name.clone(),
            })?;
        value.set(field.id, field_value);
    }
    Ok(value)
}

/// Extracts call arguments in ascending field-id order.
///
/// Unset fields come back as `None` so handlers always receive one slot per
/// declared argument.
pub fn to_positional(schema: &StructSchema, mut value: StructValue) -> Vec<Option<Value>> {
    schema
        .fields()
        .iter()
        .map(|field| value.take(field.id))
        .collect()
}
