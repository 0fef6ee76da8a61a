use super::Value;
use std::collections::BTreeMap;

/// The populated fields of a struct instance, keyed by field id.
///
/// An id with no entry is an unset field. Iteration is in ascending id order,
/// which is also the order fields are written on the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructValue {
    fields: BTreeMap<i16, Value>,
}

impl StructValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, returning the previous value if it was populated.
    pub fn set(&mut self, id: i16, value: Value) -> Option<Value> {
        self.fields.insert(id, value)
    }

    pub fn with(mut self, id: i16, value: impl Into<Value>) -> Self {
        self.fields.insert(id, value.into());
        self
    }

    pub fn get(&self, id: i16) -> Option<&Value> {
        self.fields.get(&id)
    }

    pub fn take(&mut self, id: i16) -> Option<Value> {
        self.fields.remove(&id)
    }

    pub fn is_set(&self, id: i16) -> bool {
        self.fields.contains_key(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i16, &Value)> {
        self.fields.iter().map(|(id, value)| (*id, value))
    }
}

impl FromIterator<(i16, Value)> for StructValue {
    fn from_iter<I: IntoIterator<Item = (i16, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
