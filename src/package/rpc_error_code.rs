use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Well-known values for `RpcResponseMeta::error_code`.
///
/// The field itself is a plain `i32`; endpoints are free to send codes that
/// are not listed here.
#[repr(i32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, TryFromPrimitive, IntoPrimitive)]
pub enum RpcErrorCode {
    Success = 0,
    ServiceNotFound = 1001,
    MethodNotFound = 1002,
    AuthFailed = 1003,
    ServerError = 2001,
}
