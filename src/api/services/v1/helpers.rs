//! API 帮助函数

use actix_web::HttpResponse;
use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use actix_web::http::StatusCode;
use serde::Serialize;

use crate::config::SameSitePolicy;
use crate::errors::LinkyError;

use super::error_code::ErrorCode;
use super::types::ApiResponse;

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code: code as i32,
            message: message.into(),
            data,
        })
}

/// 构建成功响应
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(data))
}

/// 构建错误响应
pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, error_code, message, None)
}

/// 从 LinkyError 构建错误响应
///
/// 内容校验失败时把完整的违规列表放在 `data` 里返回。
pub fn error_from_linky(err: &LinkyError) -> HttpResponse {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let code = ErrorCode::from(err);
    match err {
        LinkyError::ContentInvalid(list) => {
            json_response(status, code, err.message(), Some(&list.violations))
        }
        _ => error_response(status, code, err.message()),
    }
}

/// 统一 Result → HttpResponse 转换
pub fn api_result<T, E>(result: Result<T, E>) -> HttpResponse
where
    T: Serialize,
    E: Into<LinkyError>,
{
    match result {
        Ok(data) => success_response(data),
        Err(e) => {
            let err: LinkyError = e.into();
            if err.http_status() >= 500 {
                tracing::error!("API request failed: {}", err);
            }
            error_from_linky(&err)
        }
    }
}

/// 会话 cookie 构建器
pub struct CookieBuilder {
    name: String,
    same_site: SameSite,
    secure: bool,
    ttl_hours: i64,
}

impl CookieBuilder {
    pub fn from_config() -> Self {
        let config = crate::config::get_config();

        let same_site = match config.auth.cookie_same_site {
            SameSitePolicy::Strict => SameSite::Strict,
            SameSitePolicy::None => SameSite::None,
            SameSitePolicy::Lax => SameSite::Lax,
        };

        Self {
            name: config.auth.cookie_name.clone(),
            same_site,
            secure: config.auth.cookie_secure,
            ttl_hours: config.auth.session_ttl_hours.max(1),
        }
    }

    fn build_cookie_base(&self, value: String, max_age: CookieDuration) -> Cookie<'static> {
        let mut cookie = Cookie::new(self.name.clone(), value);
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_secure(self.secure);
        cookie.set_same_site(self.same_site);
        cookie.set_max_age(max_age);
        cookie
    }

    pub fn build_session_cookie(&self, token: String) -> Cookie<'static> {
        self.build_cookie_base(token, CookieDuration::hours(self.ttl_hours))
    }

    pub fn build_expired_session_cookie(&self) -> Cookie<'static> {
        self.build_cookie_base(String::new(), CookieDuration::ZERO)
    }

    pub fn cookie_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{BlockField, FieldViolation, ListValidationError};

    #[test]
    fn test_success_response() {
        let response = success_response("success_data");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_error_from_linky_status() {
        let response = error_from_linky(&LinkyError::slug_taken("taken"));
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = error_from_linky(&LinkyError::session_expired("expired"));
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_content_invalid_is_unprocessable() {
        let err = LinkyError::ContentInvalid(ListValidationError {
            violations: vec![FieldViolation {
                index: 0,
                field: BlockField::Title,
                message: "Title must not be empty".to_string(),
            }],
        });
        let response = error_from_linky(&err);
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_session_cookie_attributes() {
        crate::config::init_config(None);
        let builder = CookieBuilder::from_config();
        let cookie = builder.build_session_cookie("token".to_string());
        assert_eq!(cookie.value(), "token");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));

        let expired = builder.build_expired_session_cookie();
        assert_eq!(expired.value(), "");
        assert_eq!(expired.max_age(), Some(CookieDuration::ZERO));
    }
}
