use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Type codes of Thrift's `TApplicationException`.
///
/// Transport-level failures are reported to callers with these codes so that
/// code written against other Thrift stacks can keep matching on them.
#[repr(i32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, TryFromPrimitive, IntoPrimitive)]
pub enum ApplicationErrorKind {
    Unknown = 0,
    UnknownMethod = 1,
    InvalidMessageType = 2,
    WrongMethodName = 3,
    BadSequenceId = 4,
    MissingResult = 5,
    InternalError = 6,
    ProtocolError = 7,
}
