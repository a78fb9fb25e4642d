// Authentication middleware for Actix-web
// Resolves the admin session and attaches the requesting user to the request

use actix_service::forward_ready;
use actix_utils::future::{Ready, ok};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::Method,
    web::Data,
};

use futures::future::LocalBoxFuture;

use omniport_auth::model::{ACCESS_TOKEN, AUTHORIZATION_HEADER, AuthContext, SESSION_COOKIE, TOKEN_PREFIX};
use omniport_auth::service::auth::decode_session_token_cached;

use crate::model::AppState;

// Authentication middleware transformer
pub struct Authentication;

impl<S, B> Transform<S, ServiceRequest> for Authentication
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthenticationMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthenticationMiddleware { service })
    }
}

pub struct AuthenticationMiddleware<S> {
    service: S,
}

/// Extract the session token using 4 sources in priority order:
/// 1. `omniport_session` cookie
/// 2. `accessToken` HTTP header
/// 3. `Authorization: Bearer <token>` header
/// 4. `accessToken` query parameter
pub(crate) fn extract_token(req: &ServiceRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        let value = cookie.value().trim();
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }

    if let Some(header_val) = req.headers().get(ACCESS_TOKEN)
        && let Ok(s) = header_val.to_str()
    {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_string());
        }
    }

    if let Some(header_val) = req.headers().get(AUTHORIZATION_HEADER)
        && let Ok(s) = header_val.to_str()
        && let Some(token) = s.trim().strip_prefix(TOKEN_PREFIX)
    {
        let token = token.trim();
        if !token.is_empty() {
            return Some(token.to_string());
        }
    }

    if let Some(query) = req.uri().query() {
        for pair in query.split('&') {
            if let Some((key, value)) = pair.split_once('=')
                && key == ACCESS_TOKEN
                && !value.is_empty()
            {
                return Some(value.to_string());
            }
        }
    }

    None
}

/// Build the auth context for `token`, falling back to the anonymous user
fn resolve(app_state: &AppState, token: String) -> AuthContext {
    let mut auth_context = AuthContext::default();

    let secret_key = app_state.configuration.token_secret_key();
    let claims = match decode_session_token_cached(&token, &secret_key) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::debug!(error = %err, "Session token rejected");
            return auth_context;
        }
    };

    match app_state.users.find_by_username(&claims.sub) {
        Ok(Some(user)) => auth_context.user = user,
        Ok(None) => {
            tracing::info!(username = %claims.sub, "Session refers to an unknown user");
        }
        Err(e) => {
            tracing::error!(username = %claims.sub, error = %e, "Failed to load session user");
        }
    }
    auth_context.session = Some((token, claims));

    auth_context
}

impl<S, B> Service<ServiceRequest> for AuthenticationMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if Method::OPTIONS != *req.method() {
            let mut auth_context = AuthContext::default();

            if let Some(token) = extract_token(&req) {
                if let Some(app_state) = req.app_data::<Data<AppState>>() {
                    auth_context = resolve(app_state, token);
                } else {
                    tracing::error!("AppState not found in request app_data");
                }
            }

            // Always insert AuthContext so handlers see at least the anonymous user
            req.extensions_mut().insert(auth_context);
        }

        let res = self.service.call(req);

        Box::pin(async move { res.await.map(ServiceResponse::map_into_left_body) })
    }
}
