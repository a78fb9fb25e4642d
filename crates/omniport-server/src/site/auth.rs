use actix_web::{
    HttpRequest, HttpResponse,
    cookie::{Cookie, SameSite},
    get, post, web,
};
use serde::{Deserialize, Serialize};

use omniport_admin::Branding;
use omniport_auth::form::{FormField, LOGIN_FIELDS, LoginData};
use omniport_auth::model::SESSION_COOKIE;
use omniport_auth::service::auth::{encode_session_token, revoke_token};
use omniport_common::{ErrorDetail, OmniportError};

use crate::error::{AppError, PARAMETER_VALIDATE_ERROR};
use crate::model::{AppState, response};

use super::{admin_request, auth_context, found, safe_next};

#[derive(Debug, Default, Deserialize)]
pub struct LoginPayload {
    username: Option<String>,
    password: Option<String>,
    next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NextQuery {
    next: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginPage {
    site_name: String,
    branding: Branding,
    fields: Vec<FormField>,
    next: String,
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    pub access_token: String,
    pub token_ttl: i64,
    pub username: String,
    pub redirect: String,
}

fn login_page_body(state: &AppState, next: String, errors: Vec<ErrorDetail>) -> LoginPage {
    LoginPage {
        site_name: state.site_name().to_string(),
        branding: state.site.branding().clone(),
        fields: LOGIN_FIELDS.to_vec(),
        next,
        errors,
    }
}

fn session_cookie(state: &AppState, value: String) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, value)
        .path(state.site_root())
        .http_only(true)
        .same_site(SameSite::Strict)
        .finish()
}

#[get("/login/")]
pub async fn login_page(
    req: HttpRequest,
    data: web::Data<AppState>,
    query: web::Query<NextQuery>,
) -> HttpResponse {
    let next = safe_next(&data, query.next.as_deref());

    // Already logged in with access to the site
    if data.site.has_permission(&admin_request(&req)) {
        return found(&next);
    }

    response::Result::http_success(login_page_body(&data, next, Vec::new()))
}

#[post("/login/")]
pub async fn login(
    data: web::Data<AppState>,
    form: Option<web::Form<LoginPayload>>,
) -> Result<HttpResponse, AppError> {
    let payload = form.map(web::Form::into_inner).unwrap_or_default();
    let next = safe_next(&data, payload.next.as_deref());
    let login_data = LoginData {
        username: payload.username,
        password: payload.password,
    };

    // bcrypt verification is CPU bound
    let state = data.clone();
    let cleaned = web::block(move || {
        state
            .site
            .login_form()
            .clean(state.users.as_ref(), &login_data)
    })
    .await
    .map_err(|e| OmniportError::InternalError(e.to_string()))??;

    let user = match cleaned {
        Ok(user) => user,
        Err(errors) => {
            let message = errors
                .first()
                .map(|e| e.message())
                .unwrap_or_default();
            let details = errors.iter().map(|e| e.to_detail()).collect();
            return Ok(response::Result::http_response(
                200,
                PARAMETER_VALIDATE_ERROR.code,
                message,
                login_page_body(&data, next, details),
            ));
        }
    };

    let token_ttl = data.configuration.token_expire_seconds();
    let access_token = encode_session_token(
        &user.username,
        &data.configuration.token_secret_key(),
        token_ttl,
    )
    .map_err(|e| {
        OmniportError::InternalError(format!("failed to issue session token: {}", e))
    })?;

    tracing::info!(username = %user.username, site = data.site_name(), "Admin login");

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&data, access_token.clone()))
        .json(response::Result::success(LoginResult {
            access_token,
            token_ttl,
            username: user.username,
            redirect: next,
        })))
}

#[post("/logout/")]
pub async fn logout(req: HttpRequest, data: web::Data<AppState>) -> HttpResponse {
    let context = auth_context(&req);
    if let Some((token, claims)) = &context.session {
        revoke_token(token, claims);
    }
    if context.user.is_authenticated() {
        tracing::info!(username = %context.user.username, "Admin logout");
    }

    let mut removal = session_cookie(&data, String::new());
    removal.make_removal();

    HttpResponse::Ok()
        .cookie(removal)
        .json(response::Result::success(data.login_url()))
}
