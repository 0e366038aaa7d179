//! API 模块常量定义

/// JSON API 前缀
pub const API_V1_PREFIX: &str = "/api/v1";

/// 免认证的登录端点
pub const LOGIN_PATH: &str = "/api/v1/auth/login";

/// 登出端点，会话无效时也要能清除 cookie
pub const LOGOUT_PATH: &str = "/api/v1/auth/logout";

/// 公开页面前缀
pub const PUBLIC_PAGE_PREFIX: &str = "/p";

/// 请求体大小上限
pub const MAX_PAYLOAD_BYTES: usize = 1024 * 1024;
