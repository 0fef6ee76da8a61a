use thiserror::Error;

/// Lookup failure in a `SchemaRegistry` or `ServiceDefinition`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("unknown service `{service}`")]
    Service { service: String },

    #[error("service `{service}` has no method `{method}`")]
    Method { service: String, method: String },
}

/// A call whose arguments cannot be mapped onto the argument struct.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidArgumentsError {
    #[error("`{schema}` takes {expected} positional arguments but {given} were given")]
    TooManyPositional {
        schema: String,
        expected: usize,
        given: usize,
    },

    #[error("`{schema}` got an unexpected keyword argument `{name}`")]
    UnknownKeyword { schema: String, name: String },
}

/// A handler outcome that cannot be represented in the method's result struct.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResultUnionError {
    #[error("method `{method}` returns void but a value was produced")]
    UnexpectedReturnValue { method: String },

    #[error("method `{method}` does not declare exception type `{type_name}`")]
    UndeclaredException { method: String, type_name: String },
}
