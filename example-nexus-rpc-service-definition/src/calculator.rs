use crate::types::{DIVISION_BY_ZERO, INVALID_OPERATION, WORK};
use nexus::constants::SUCCESS_FIELD_ID;
use nexus::{Field, FieldType, StructSchema};
use nexus_rpc_service::{InterfaceDefinition, MethodDeclaration};
use std::sync::Arc;

pub const SERVICE_NAME: &str = "Calculator";

fn schema(name: &str, fields: Vec<Field>) -> Arc<StructSchema> {
    Arc::new(StructSchema::new(name, fields).expect("generated schema is valid"))
}

fn void_result(name: &str) -> Arc<StructSchema> {
    Arc::new(StructSchema::empty(name))
}

fn success(ty: FieldType) -> Field {
    Field::new(SUCCESS_FIELD_ID, "success", ty)
}

pub fn ping() -> MethodDeclaration {
    MethodDeclaration::new("ping")
        .args(Arc::new(StructSchema::empty("ping_args")))
        .result(void_result("ping_result"))
}

pub fn add() -> MethodDeclaration {
    MethodDeclaration::new("add")
        .args(schema(
            "add_args",
            vec![
                Field::new(1, "num1", FieldType::I32),
                Field::new(2, "num2", FieldType::I32),
            ],
        ))
        .result(schema("add_result", vec![success(FieldType::I32)]))
}

pub fn calculate() -> MethodDeclaration {
    MethodDeclaration::new("calculate")
        .args(schema(
            "calculate_args",
            vec![
                Field::new(1, "logid", FieldType::I32),
                Field::new(2, "w", FieldType::Struct(WORK.clone())),
            ],
        ))
        .result(schema(
            "calculate_result",
            vec![
                success(FieldType::I32),
                Field::new(1, "ouch", FieldType::Struct(INVALID_OPERATION.clone())),
            ],
        ))
}

pub fn divide() -> MethodDeclaration {
    MethodDeclaration::new("divide")
        .args(schema(
            "divide_args",
            vec![
                Field::new(1, "dividend", FieldType::Double),
                Field::new(2, "divisor", FieldType::Double),
            ],
        ))
        .result(schema(
            "divide_result",
            vec![
                success(FieldType::Double),
                Field::new(1, "err", FieldType::Struct(DIVISION_BY_ZERO.clone())),
                Field::new(2, "ouch", FieldType::Struct(INVALID_OPERATION.clone())),
            ],
        ))
}

pub fn echo() -> MethodDeclaration {
    MethodDeclaration::new("echo")
        .args(schema(
            "echo_args",
            vec![Field::new(1, "message", FieldType::String)],
        ))
        .result(schema("echo_result", vec![success(FieldType::String)]))
}

pub fn find() -> MethodDeclaration {
    MethodDeclaration::new("find")
        .args(schema("find_args", vec![Field::new(1, "key", FieldType::String)]))
        .result(schema("find_result", vec![success(FieldType::String)]))
}

/// Field ids deliberately differ from declaration order.
pub fn describe() -> MethodDeclaration {
    MethodDeclaration::new("describe")
        .args(schema(
            "describe_args",
            vec![
                Field::new(3, "c", FieldType::String),
                Field::new(1, "a", FieldType::I32),
                Field::new(2, "b", FieldType::I64),
            ],
        ))
        .result(schema("describe_result", vec![success(FieldType::String)]))
}

pub fn zip() -> MethodDeclaration {
    MethodDeclaration::new("zip")
        .args(Arc::new(StructSchema::empty("zip_args")))
        .result(void_result("zip_result"))
        .oneway()
}

/// The full `Calculator` interface.
pub fn interface() -> InterfaceDefinition {
    InterfaceDefinition::new(SERVICE_NAME)
        .method(ping())
        .method(add())
        .method(calculate())
        .method(divide())
        .method(echo())
        .method(find())
        .method(describe())
        .method(zip())
}
