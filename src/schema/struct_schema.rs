use super::{FieldType, SchemaError, StructValue, Value};
use std::collections::HashSet;

/// A single field of a struct: its wire id, its name, and its declared type.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub id: i16,
    pub name: String,
    pub ty: FieldType,
}

impl Field {
    pub fn new(id: i16, name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            id,
            name: name.into(),
            ty,
        }
    }
}

/// The layout of a Thrift struct (argument struct, result struct, exception
/// or plain user struct).
///
/// Fields are kept sorted by ascending id regardless of the order they were
/// declared in. Positional call arguments, wire encoding order and result
/// union scanning all rely on that ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct StructSchema {
    name: String,
    fields: Vec<Field>,
}

impl StructSchema {
    pub fn new(
        name: impl Into<String>,
        fields: impl IntoIterator<Item = Field>,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        let mut fields: Vec<Field> = fields.into_iter().collect();
        fields.sort_by_key(|field| field.id);

        let mut names = HashSet::with_capacity(fields.len());
        for (idx, field) in fields.iter().enumerate() {
            if idx > 0 && fields[idx - 1].id == field.id {
                return Err(SchemaError::DuplicateFieldId {
                    schema: name,
                    id: field.id,
                });
            }
            if !names.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateFieldName {
                    schema: name.clone(),
                    name: field.name.clone(),
                });
            }
        }

        Ok(Self { name, fields })
    }

    /// A struct with no fields, e.g. the argument struct of a nullary method.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in ascending id order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field_by_id(&self, id: i16) -> Option<&Field> {
        self.fields
            .binary_search_by_key(&id, |field| field.id)
            .ok()
            .map(|idx| &self.fields[idx])
    }

    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Builds a value from `(field name, value)` pairs.
    ///
    /// Later pairs overwrite earlier ones naming the same field.
    pub fn value_from_names<N, I>(&self, pairs: I) -> Result<StructValue, SchemaError>
    where
        N: AsRef<str>,
        I: IntoIterator<Item = (N, Value)>,
    {
        let mut value = StructValue::new();
        for (name, field_value) in pairs {
            let name = name.as_ref();
            let field = self
                .field_by_name(name)
                .ok_or_else(|| SchemaError::UnknownField {
                    schema: self.name.clone(),
                    name: name.to_string(),
                })?;
            value.set(field.id, field_value);
        }
        Ok(value)
    }

    /// Looks a populated field up by name.
    pub fn get<'v>(&self, value: &'v StructValue, name: &str) -> Option<&'v Value> {
        self.field_by_name(name)
            .and_then(|field| value.get(field.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_sorted_by_id() {
        let schema = StructSchema::new(
            "args",
            [
                Field::new(3, "c", FieldType::I32),
                Field::new(1, "a", FieldType::I32),
                Field::new(2, "b", FieldType::String),
            ],
        )
        .unwrap();

        let names: Vec<_> = schema.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(schema.field_by_id(2).unwrap().name, "b");
        assert!(schema.field_by_id(4).is_none());
    }

    #[test]
    fn duplicate_ids_and_names_are_rejected() {
        let dup_id = StructSchema::new(
            "s",
            [
                Field::new(1, "a", FieldType::I32),
                Field::new(1, "b", FieldType::I32),
            ],
        );
        assert!(matches!(dup_id, Err(SchemaError::DuplicateFieldId { id: 1, .. })));

        let dup_name = StructSchema::new(
            "s",
            [
                Field::new(1, "a", FieldType::I32),
                Field::new(2, "a", FieldType::I64),
            ],
        );
        assert!(matches!(dup_name, Err(SchemaError::DuplicateFieldName { .. })));
    }

    #[test]
    fn value_from_names_rejects_unknown_field() {
        let schema = StructSchema::new("s", [Field::new(1, "a", FieldType::I32)]).unwrap();
        let err = schema
            .value_from_names([("nope", Value::I32(1))])
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownField {
                schema: "s".into(),
                name: "nope".into()
            }
        );
    }
}
