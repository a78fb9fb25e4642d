//! HTTP surface of the mounted admin site
//!
//! Routes live under `/<site name>/`. Every view except login works against
//! the [`AuthContext`] inserted by the authentication middleware and asks the
//! site whether the request has permission.

use actix_web::{HttpMessage, HttpRequest, HttpResponse, http::header};

use omniport_admin::AdminRequest;
use omniport_auth::model::AuthContext;

use crate::model::AppState;

pub mod auth;
pub mod index;
pub mod route;

pub use route::routes;

pub(crate) const NEXT_PARAM: &str = "next";

/// Auth context of the request, anonymous when the middleware did not run
pub(crate) fn auth_context(req: &HttpRequest) -> AuthContext {
    req.extensions()
        .get::<AuthContext>()
        .cloned()
        .unwrap_or_default()
}

pub(crate) fn admin_request(req: &HttpRequest) -> AdminRequest {
    AdminRequest::new(auth_context(req).user, req.path())
}

pub(crate) fn found(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Redirect to the login page, remembering where the request was headed
pub(crate) fn redirect_to_login(state: &AppState, next: &str) -> HttpResponse {
    let query = serde_urlencoded::to_string([(NEXT_PARAM, next)]).unwrap_or_default();
    found(&format!("{}?{}", state.login_url(), query))
}

/// `next` when it points inside the site, the site index otherwise
pub(crate) fn safe_next(state: &AppState, next: Option<&str>) -> String {
    let root = state.site_root();
    match next {
        Some(next) if next.starts_with(&root) && !next.starts_with("//") => next.to_string(),
        _ => root,
    }
}
