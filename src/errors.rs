use std::fmt;

use crate::content::{ContentError, ListValidationError};

#[derive(Debug, Clone)]
pub enum LinkyError {
    Config(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Validation(String),
    NotFound(String),
    Serialization(String),
    Unauthorized(String),
    SessionExpired(String),
    Forbidden(String),
    AuthFailed(String),
    LinkNotFound(String),
    SlugTaken(String),
    InvalidUrl(String),
    InvalidSlug(String),
    PageNotFound(String),
    /// 页面内容校验失败，携带完整的违规列表
    ContentInvalid(ListValidationError),
    UserNotFound(String),
    UsernameTaken(String),
    PasswordHash(String),
}

impl LinkyError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            LinkyError::Config(_) => "E001",
            LinkyError::DatabaseConfig(_) => "E002",
            LinkyError::DatabaseConnection(_) => "E003",
            LinkyError::DatabaseOperation(_) => "E004",
            LinkyError::FileOperation(_) => "E005",
            LinkyError::Validation(_) => "E006",
            LinkyError::NotFound(_) => "E007",
            LinkyError::Serialization(_) => "E008",
            LinkyError::Unauthorized(_) => "E009",
            LinkyError::SessionExpired(_) => "E010",
            LinkyError::Forbidden(_) => "E011",
            LinkyError::AuthFailed(_) => "E012",
            LinkyError::LinkNotFound(_) => "E013",
            LinkyError::SlugTaken(_) => "E014",
            LinkyError::InvalidUrl(_) => "E015",
            LinkyError::InvalidSlug(_) => "E016",
            LinkyError::PageNotFound(_) => "E017",
            LinkyError::ContentInvalid(_) => "E018",
            LinkyError::UserNotFound(_) => "E019",
            LinkyError::UsernameTaken(_) => "E020",
            LinkyError::PasswordHash(_) => "E021",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LinkyError::Config(_) => "Configuration Error",
            LinkyError::DatabaseConfig(_) => "Database Configuration Error",
            LinkyError::DatabaseConnection(_) => "Database Connection Error",
            LinkyError::DatabaseOperation(_) => "Database Operation Error",
            LinkyError::FileOperation(_) => "File Operation Error",
            LinkyError::Validation(_) => "Validation Error",
            LinkyError::NotFound(_) => "Resource Not Found",
            LinkyError::Serialization(_) => "Serialization Error",
            LinkyError::Unauthorized(_) => "Unauthorized",
            LinkyError::SessionExpired(_) => "Session Expired",
            LinkyError::Forbidden(_) => "Forbidden",
            LinkyError::AuthFailed(_) => "Authentication Failed",
            LinkyError::LinkNotFound(_) => "Link Not Found",
            LinkyError::SlugTaken(_) => "Slug Taken",
            LinkyError::InvalidUrl(_) => "Invalid URL",
            LinkyError::InvalidSlug(_) => "Invalid Slug",
            LinkyError::PageNotFound(_) => "Page Not Found",
            LinkyError::ContentInvalid(_) => "Content Invalid",
            LinkyError::UserNotFound(_) => "User Not Found",
            LinkyError::UsernameTaken(_) => "Username Taken",
            LinkyError::PasswordHash(_) => "Password Hash Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            LinkyError::Config(msg)
            | LinkyError::DatabaseConfig(msg)
            | LinkyError::DatabaseConnection(msg)
            | LinkyError::DatabaseOperation(msg)
            | LinkyError::FileOperation(msg)
            | LinkyError::Validation(msg)
            | LinkyError::NotFound(msg)
            | LinkyError::Serialization(msg)
            | LinkyError::Unauthorized(msg)
            | LinkyError::SessionExpired(msg)
            | LinkyError::Forbidden(msg)
            | LinkyError::AuthFailed(msg)
            | LinkyError::LinkNotFound(msg)
            | LinkyError::SlugTaken(msg)
            | LinkyError::InvalidUrl(msg)
            | LinkyError::InvalidSlug(msg)
            | LinkyError::PageNotFound(msg)
            | LinkyError::UserNotFound(msg)
            | LinkyError::UsernameTaken(msg)
            | LinkyError::PasswordHash(msg) => msg,
            LinkyError::ContentInvalid(_) => "Page content has validation errors",
        }
    }

    /// 对应的 HTTP 状态码
    pub fn http_status(&self) -> u16 {
        match self {
            LinkyError::Validation(_)
            | LinkyError::InvalidUrl(_)
            | LinkyError::InvalidSlug(_)
            | LinkyError::Serialization(_) => 400,
            LinkyError::Unauthorized(_)
            | LinkyError::SessionExpired(_)
            | LinkyError::AuthFailed(_) => 401,
            LinkyError::Forbidden(_) => 403,
            LinkyError::NotFound(_)
            | LinkyError::LinkNotFound(_)
            | LinkyError::PageNotFound(_)
            | LinkyError::UserNotFound(_) => 404,
            LinkyError::SlugTaken(_) | LinkyError::UsernameTaken(_) => 409,
            LinkyError::ContentInvalid(_) => 422,
            LinkyError::Config(_)
            | LinkyError::DatabaseConfig(_)
            | LinkyError::DatabaseConnection(_)
            | LinkyError::DatabaseOperation(_)
            | LinkyError::FileOperation(_)
            | LinkyError::PasswordHash(_) => 500,
        }
    }

    /// 格式化为彩色输出（用于服务启动与 CLI 报错）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LinkyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LinkyError {}

// 便捷的构造函数
impl LinkyError {
    pub fn config<T: Into<String>>(msg: T) -> Self {
        LinkyError::Config(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        LinkyError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        LinkyError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        LinkyError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        LinkyError::FileOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        LinkyError::Validation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LinkyError::Serialization(msg.into())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        LinkyError::Unauthorized(msg.into())
    }

    pub fn session_expired<T: Into<String>>(msg: T) -> Self {
        LinkyError::SessionExpired(msg.into())
    }

    pub fn forbidden<T: Into<String>>(msg: T) -> Self {
        LinkyError::Forbidden(msg.into())
    }

    pub fn auth_failed<T: Into<String>>(msg: T) -> Self {
        LinkyError::AuthFailed(msg.into())
    }

    pub fn link_not_found<T: Into<String>>(msg: T) -> Self {
        LinkyError::LinkNotFound(msg.into())
    }

    pub fn slug_taken<T: Into<String>>(msg: T) -> Self {
        LinkyError::SlugTaken(msg.into())
    }

    pub fn invalid_url<T: Into<String>>(msg: T) -> Self {
        LinkyError::InvalidUrl(msg.into())
    }

    pub fn invalid_slug<T: Into<String>>(msg: T) -> Self {
        LinkyError::InvalidSlug(msg.into())
    }

    pub fn page_not_found<T: Into<String>>(msg: T) -> Self {
        LinkyError::PageNotFound(msg.into())
    }

    pub fn user_not_found<T: Into<String>>(msg: T) -> Self {
        LinkyError::UserNotFound(msg.into())
    }

    pub fn username_taken<T: Into<String>>(msg: T) -> Self {
        LinkyError::UsernameTaken(msg.into())
    }

    pub fn password_hash<T: Into<String>>(msg: T) -> Self {
        LinkyError::PasswordHash(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for LinkyError {
    fn from(err: sea_orm::DbErr) -> Self {
        LinkyError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for LinkyError {
    fn from(err: std::io::Error) -> Self {
        LinkyError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LinkyError {
    fn from(err: serde_json::Error) -> Self {
        LinkyError::Serialization(err.to_string())
    }
}

impl From<crate::utils::password::PasswordError> for LinkyError {
    fn from(err: crate::utils::password::PasswordError) -> Self {
        LinkyError::PasswordHash(err.to_string())
    }
}

impl From<ContentError> for LinkyError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::Validation(violations) => LinkyError::ContentInvalid(violations),
            ContentError::Serialization(msg) => LinkyError::Serialization(msg),
            other => LinkyError::Validation(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, LinkyError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{BlockField, FieldViolation};

    #[test]
    fn test_status_mapping() {
        assert_eq!(LinkyError::auth_failed("x").http_status(), 401);
        assert_eq!(LinkyError::slug_taken("x").http_status(), 409);
        assert_eq!(LinkyError::page_not_found("x").http_status(), 404);
        assert_eq!(LinkyError::database_operation("x").http_status(), 500);
    }

    #[test]
    fn test_content_error_conversion_keeps_violations() {
        let violations = ListValidationError {
            violations: vec![FieldViolation {
                index: 1,
                field: BlockField::Url,
                message: "Invalid URL".to_string(),
            }],
        };
        let err: LinkyError = ContentError::Validation(violations.clone()).into();
        match err {
            LinkyError::ContentInvalid(v) => assert_eq!(v, violations),
            other => panic!("unexpected error: {other:?}"),
        }

        let err: LinkyError = ContentError::IndexOutOfRange { index: 4, len: 2 }.into();
        assert!(matches!(err, LinkyError::Validation(_)));
        assert_eq!(err.http_status(), 400);
    }

    #[test]
    fn test_format_simple() {
        let err = LinkyError::user_not_found("user 7");
        assert_eq!(err.format_simple(), "User Not Found: user 7");
        assert_eq!(err.to_string(), err.format_simple());
    }
}
