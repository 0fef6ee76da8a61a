use nexus::{Field, FieldType, StructSchema, Value};
use nexus_rpc_service::ApplicationException;
use once_cell::sync::Lazy;
use std::sync::Arc;

pub mod operation {
    pub const ADD: i32 = 1;
    pub const SUBTRACT: i32 = 2;
    pub const MULTIPLY: i32 = 3;
    pub const DIVIDE: i32 = 4;
}

pub static WORK: Lazy<Arc<StructSchema>> = Lazy::new(|| {
    Arc::new(
        StructSchema::new(
            "Work",
            [
                Field::new(1, "num1", FieldType::I32),
                Field::new(2, "num2", FieldType::I32),
                Field::new(3, "op", FieldType::I32),
                Field::new(4, "comment", FieldType::String),
            ],
        )
        .expect("Work schema is valid"),
    )
});

pub static INVALID_OPERATION: Lazy<Arc<StructSchema>> = Lazy::new(|| {
    Arc::new(
        StructSchema::new(
            "InvalidOperation",
            [
                Field::new(1, "what_op", FieldType::I32),
                Field::new(2, "why", FieldType::String),
            ],
        )
        .expect("InvalidOperation schema is valid"),
    )
});

pub static DIVISION_BY_ZERO: Lazy<Arc<StructSchema>> = Lazy::new(|| {
    Arc::new(
        StructSchema::new(
            "DivisionByZero",
            [Field::new(1, "message", FieldType::String)],
        )
        .expect("DivisionByZero schema is valid"),
    )
});

pub fn invalid_operation(what_op: i32, why: &str) -> ApplicationException {
    ApplicationException::from_fields(
        INVALID_OPERATION.clone(),
        [(1, Value::I32(what_op)), (2, Value::from(why))]
            .into_iter()
            .collect(),
    )
}

pub fn division_by_zero(message: &str) -> ApplicationException {
    ApplicationException::from_fields(
        DIVISION_BY_ZERO.clone(),
        [(1, Value::from(message))].into_iter().collect(),
    )
}
