use crate::error::ResultUnionError;
use crate::exception::ApplicationException;
use crate::registry::MethodDescriptor;
use nexus::{StructValue, Value};

/// The outcome of one call, as carried by a method's result struct.
///
/// On the wire the result struct has a `success` slot plus one slot per
/// declared exception, and at most one of them is populated. This enum is the
/// checked form of that convention: building the struct from an `RpcResult`
/// can only ever populate one slot.
#[derive(Debug, Clone, PartialEq)]
pub enum RpcResult {
    Success(Value),
    Declared(ApplicationException),
    /// No slot populated: a void method returned, or a value method returned null.
    Void,
}

impl RpcResult {
    /// Reads a decoded result struct.
    ///
    /// `success` wins if populated; otherwise the first populated exception
    /// slot in field-id order is taken. Anything else is `Void`.
    pub fn from_struct(method: &MethodDescriptor, mut value: StructValue) -> Self {
        if let Some(success) = method.success_field() {
            if let Some(returned) = value.take(success.id) {
                return RpcResult::Success(returned);
            }
        }

        for (field, schema) in method.exception_fields() {
            if let Some(Value::Struct(fields)) = value.take(field.id) {
                return RpcResult::Declared(ApplicationException::from_fields(
                    schema.clone(),
                    fields,
                ));
            }
        }

        RpcResult::Void
    }

    /// Produces the result struct for this outcome.
    ///
    /// An exception is placed in the first declared slot whose struct type
    /// has the same name as the exception's type.
    pub fn into_struct(self, method: &MethodDescriptor) -> Result<StructValue, ResultUnionError> {
        let mut value = StructValue::new();
        match self {
            RpcResult::Success(returned) => {
                let success =
                    method
                        .success_field()
                        .ok_or_else(|| ResultUnionError::UnexpectedReturnValue {
                            method: method.name().to_string(),
                        })?;
                value.set(success.id, returned);
            }
            RpcResult::Declared(exception) => {
                let (field, _) = method
                    .exception_fields()
                    .find(|(_, schema)| schema.name() == exception.type_name())
                    .ok_or_else(|| ResultUnionError::UndeclaredException {
                        method: method.name().to_string(),
                        type_name: exception.type_name().to_string(),
                    })?;
                value.set(field.id, Value::Struct(exception.into_fields()));
            }
            RpcResult::Void => {}
        }
        Ok(value)
    }
}
