use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Outcome of routing one request, expressed as the HTTP status it travels as.
///
/// Declared exceptions are `Success`: they are expected application outcomes
/// carried in the body, not transport failures.
#[repr(u16)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, TryFromPrimitive, IntoPrimitive)]
pub enum RpcResultStatus {
    Success = 200,
    MethodNotFound = 404,
    SystemError = 500,
}

impl RpcResultStatus {
    pub fn http_status_code(self) -> u16 {
        self.into()
    }
}
