use super::ProtocolError;
use crate::schema::{StructSchema, StructValue};

/// A serialization format for argument and result structs.
///
/// Implementations must be symmetric: anything `encode_struct` produces for a
/// schema has to be accepted by `decode_struct` for the same schema. The
/// client and server each hold one as a shared trait object, so the format can
/// be swapped without touching the dispatchers.
pub trait WireProtocol: Send + Sync {
    /// Serializes `value`, validating every populated field against `schema`.
    fn encode_struct(
        &self,
        schema: &StructSchema,
        value: &StructValue,
    ) -> Result<Vec<u8>, ProtocolError>;

    /// Parses a complete body into the fields `schema` knows about.
    fn decode_struct(
        &self,
        schema: &StructSchema,
        bytes: &[u8],
    ) -> Result<StructValue, ProtocolError>;
}
