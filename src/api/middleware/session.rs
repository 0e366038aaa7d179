//! Session cookie authentication middleware
//!
//! 从 cookie 中读取会话令牌并交给 [`AuthService`] 校验。校验通过后把
//! [`CurrentUser`] 放进 request extensions，handler 通过
//! `web::ReqData<CurrentUser>` 取用，同时在响应上续期 cookie。

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, error, trace};

use crate::api::constants;
use crate::api::services::v1::{CookieBuilder, ErrorCode, error_from_linky, error_response};
use crate::errors::LinkyError;
use crate::services::AuthService;

#[derive(Clone, Default)]
pub struct SessionAuth;

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct SessionAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> SessionAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    fn is_public_endpoint(req: &ServiceRequest) -> bool {
        let path = req.path();
        path == constants::LOGIN_PATH || path == constants::LOGOUT_PATH
    }

    fn reject(req: ServiceRequest, err: &LinkyError) -> ServiceResponse<EitherBody<B>> {
        let mut response = error_from_linky(err);
        // 会话已失效，顺便清掉浏览器里的 cookie
        if matches!(err, LinkyError::SessionExpired(_)) {
            let expired = CookieBuilder::from_config().build_expired_session_cookie();
            if let Err(e) = response.add_cookie(&expired) {
                error!("Failed to attach expired session cookie: {}", e);
            }
        }
        req.into_response(response.map_into_right_body())
    }

    fn missing_auth_service(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        error!("AuthService is not registered as app data");
        let response: HttpResponse = error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::InternalServerError,
            "Authentication is not available",
        );
        req.into_response(response.map_into_right_body())
    }
}

impl<S, B> Service<ServiceRequest> for SessionAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();

        Box::pin(async move {
            if Self::is_public_endpoint(&req) {
                trace!("Public auth endpoint {} - bypassing session check", req.path());
                let response = srv.call(req).await?.map_into_left_body();
                return Ok(response);
            }

            let Some(auth) = req.app_data::<web::Data<AuthService>>().cloned() else {
                return Ok(Self::missing_auth_service(req));
            };

            let cookies = CookieBuilder::from_config();
            let token = req
                .cookie(cookies.cookie_name())
                .map(|c| c.value().to_string())
                .filter(|t| !t.is_empty());

            let Some(token) = token else {
                debug!("Request to {} without session cookie", req.path());
                return Ok(Self::reject(req, &LinkyError::unauthorized("Not logged in")));
            };

            let user = match auth.authenticate(&token).await {
                Ok(user) => user,
                Err(e) => return Ok(Self::reject(req, &e)),
            };

            trace!("Session authenticated for user {}", user.username);
            req.extensions_mut().insert(user);

            let mut response = srv.call(req).await?;
            // 滑动续期：会话有效期已在 authenticate 中顺延，cookie 同步刷新
            let renewed = cookies.build_session_cookie(token);
            if let Err(e) = response.response_mut().add_cookie(&renewed) {
                error!("Failed to renew session cookie: {}", e);
            }
            Ok(response.map_into_left_body())
        })
    }
}
