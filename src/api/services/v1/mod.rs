//! JSON API v1
//!
//! 所有端点都返回 `{code, message, data}` 信封，除登录、登出外都需要会话 cookie。

mod auth;
mod dashboard;
pub mod error_code;
mod helpers;
mod links;
mod pages;
pub mod routes;
mod types;
mod users;

pub use error_code::ErrorCode;
pub use helpers::{
    CookieBuilder, api_result, error_from_linky, error_response, json_response, success_response,
};
pub use routes::api_v1_routes;
pub use types::*;
