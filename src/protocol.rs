mod binary_protocol;
mod protocol_error;
mod ttype;
mod wire_protocol;

pub use binary_protocol::BinaryProtocol;
pub use protocol_error::ProtocolError;
pub use ttype::TType;
pub use wire_protocol::WireProtocol;
