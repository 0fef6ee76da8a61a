/// Maximum nesting of structs and containers accepted while decoding.
///
/// Bodies arrive from the network, so recursion depth has to be bounded
/// before a crafted payload can exhaust the stack.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Upper bound on a single string, binary or container length prefix.
pub const MAX_LENGTH_PREFIX: usize = 64 * 1024 * 1024;

/// Name of the result-struct field carrying a method's return value.
pub const SUCCESS_FIELD_NAME: &str = "success";

/// Field id Thrift assigns to the `success` slot of a result struct.
pub const SUCCESS_FIELD_ID: i16 = 0;
