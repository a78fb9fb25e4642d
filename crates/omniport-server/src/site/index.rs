use actix_web::{HttpRequest, HttpResponse, get, web};
use serde::Serialize;

use omniport_admin::{AppEntry, Branding, ModelKey};
use omniport_common::OmniportError;

use crate::error::AppError;
use crate::model::{AppState, response};

use super::{admin_request, redirect_to_login};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexPage {
    site_name: String,
    branding: Branding,
    app_list: Vec<AppEntry>,
}

fn denied(req: &HttpRequest, data: &AppState) -> Option<HttpResponse> {
    let request = admin_request(req);
    if data.site.has_permission(&request) {
        return None;
    }

    tracing::debug!(
        path = %request.path,
        username = %request.user.username,
        "Admin access denied"
    );
    Some(redirect_to_login(data, &request.path))
}

#[get("/")]
pub async fn index(req: HttpRequest, data: web::Data<AppState>) -> HttpResponse {
    if let Some(resp) = denied(&req, &data) {
        return resp;
    }

    let request = admin_request(&req);
    response::Result::http_success(IndexPage {
        site_name: data.site_name().to_string(),
        branding: data.site.branding().clone(),
        app_list: data.site.app_list(&request, None),
    })
}

#[get("/{app_label}/")]
pub async fn app_index(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    if let Some(resp) = denied(&req, &data) {
        return Ok(resp);
    }

    let app_label = path.into_inner();
    let app_list = data.site.app_list(&admin_request(&req), Some(&app_label));
    if app_list.is_empty() {
        return Err(OmniportError::NotRegistered(format!(
            "The app {} has no registered models",
            app_label
        ))
        .into());
    }

    Ok(response::Result::http_success(IndexPage {
        site_name: data.site_name().to_string(),
        branding: data.site.branding().clone(),
        app_list,
    }))
}

#[get("/{app_label}/{model_name}/")]
pub async fn change_list(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    if let Some(resp) = denied(&req, &data) {
        return Ok(resp);
    }

    let (app_label, model_name) = path.into_inner();
    let key = ModelKey::new(app_label, model_name);
    match data.site.change_list(&key) {
        Some(change_list) => Ok(response::Result::http_success(change_list)),
        None => Err(OmniportError::NotRegistered(format!("The model {} is not registered", key)).into()),
    }
}
