//! 登录、登出与当前用户

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::{info, warn};

use crate::services::{AuthService, CurrentUser};

use super::error_code::ErrorCode;
use super::helpers::{CookieBuilder, error_from_linky, json_response, success_response};
use super::types::{LoginRequest, LoginResponse};

/// POST /auth/login
pub async fn login(auth: web::Data<AuthService>, body: web::Json<LoginRequest>) -> HttpResponse {
    let body = body.into_inner();
    match auth.login(body.username.trim(), &body.password).await {
        Ok(result) => {
            let cookie = CookieBuilder::from_config().build_session_cookie(result.token);
            let mut response = json_response(
                StatusCode::OK,
                ErrorCode::Success,
                "Login successful",
                Some(LoginResponse {
                    user: result.user,
                    expires_at: result.expires_at,
                }),
            );
            if let Err(e) = response.add_cookie(&cookie) {
                warn!("Failed to set session cookie: {}", e);
            }
            response
        }
        Err(e) => error_from_linky(&e),
    }
}

/// POST /auth/logout
///
/// 无论会话是否仍然有效都会清除 cookie。
pub async fn logout(req: HttpRequest, auth: web::Data<AuthService>) -> HttpResponse {
    let cookies = CookieBuilder::from_config();
    if let Some(token) = req.cookie(cookies.cookie_name()).map(|c| c.value().to_string())
        && !token.is_empty()
        && let Err(e) = auth.logout(&token).await
    {
        warn!("Logout failed to delete session: {}", e);
    }

    let mut response = success_response("Logged out");
    if let Err(e) = response.add_cookie(&cookies.build_expired_session_cookie()) {
        warn!("Failed to clear session cookie: {}", e);
    }
    info!("User logged out");
    response
}

/// GET /auth/me
pub async fn me(user: web::ReqData<CurrentUser>) -> HttpResponse {
    success_response(user.into_inner())
}
