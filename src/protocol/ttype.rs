use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Type tags written in front of every field and container element.
///
/// The numeric values are fixed by the Thrift binary protocol and must not
/// change; gaps (5, 7, 9) are unused ids in the reference protocol.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive)]
pub enum TType {
    Stop = 0,
    Void = 1,
    Bool = 2,
    Byte = 3,
    Double = 4,
    I16 = 6,
    I32 = 8,
    I64 = 10,
    String = 11,
    Struct = 12,
    Map = 13,
    Set = 14,
    List = 15,
}
