//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::errors::LinkyError;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字，按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 2000-2099: 认证错误
/// - 3000-3099: 短链接错误
/// - 4000-4099: 页面错误
/// - 5000-5099: 用户错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,

    // 认证错误 2000-2099
    AuthFailed = 2000,
    SessionExpired = 2001,

    // 短链接错误 3000-3099
    LinkNotFound = 3000,
    SlugTaken = 3001,
    InvalidUrl = 3002,
    InvalidSlug = 3003,

    // 页面错误 4000-4099
    PageNotFound = 4000,
    ContentInvalid = 4001,

    // 用户错误 5000-5099
    UserNotFound = 5000,
    UsernameTaken = 5001,
}

impl From<&LinkyError> for ErrorCode {
    fn from(err: &LinkyError) -> Self {
        match err {
            LinkyError::Validation(_) | LinkyError::Serialization(_) => ErrorCode::BadRequest,
            LinkyError::NotFound(_) => ErrorCode::NotFound,
            LinkyError::Unauthorized(_) => ErrorCode::Unauthorized,
            LinkyError::SessionExpired(_) => ErrorCode::SessionExpired,
            LinkyError::Forbidden(_) => ErrorCode::Forbidden,
            LinkyError::AuthFailed(_) => ErrorCode::AuthFailed,
            LinkyError::LinkNotFound(_) => ErrorCode::LinkNotFound,
            LinkyError::SlugTaken(_) => ErrorCode::SlugTaken,
            LinkyError::InvalidUrl(_) => ErrorCode::InvalidUrl,
            LinkyError::InvalidSlug(_) => ErrorCode::InvalidSlug,
            LinkyError::PageNotFound(_) => ErrorCode::PageNotFound,
            LinkyError::ContentInvalid(_) => ErrorCode::ContentInvalid,
            LinkyError::UserNotFound(_) => ErrorCode::UserNotFound,
            LinkyError::UsernameTaken(_) => ErrorCode::UsernameTaken,
            LinkyError::Config(_)
            | LinkyError::DatabaseConfig(_)
            | LinkyError::DatabaseConnection(_)
            | LinkyError::DatabaseOperation(_)
            | LinkyError::FileOperation(_)
            | LinkyError::PasswordHash(_) => ErrorCode::InternalServerError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&ErrorCode::ContentInvalid).unwrap();
        assert_eq!(json, "4001");
        let code: ErrorCode = serde_json::from_str("3001").unwrap();
        assert_eq!(code, ErrorCode::SlugTaken);
    }

    #[test]
    fn test_error_mapping() {
        assert_eq!(
            ErrorCode::from(&LinkyError::session_expired("x")),
            ErrorCode::SessionExpired
        );
        assert_eq!(
            ErrorCode::from(&LinkyError::database_operation("x")),
            ErrorCode::InternalServerError
        );
        assert_eq!(
            ErrorCode::from(&LinkyError::invalid_slug("x")),
            ErrorCode::InvalidSlug
        );
    }
}
