//! HTTP server setup for the admin site.

use std::sync::Arc;

use actix_web::{App, HttpResponse, HttpServer, dev::Server, get, middleware::Logger, web};

use omniport_admin::{AdminSite, BaseAdminSite, DEFAULT_SITE_NAME, OmnipotenceSite};
use omniport_auth::rights::omnipotence_rights;

use crate::{
    middleware::{auth::Authentication, tracing::TracingMiddleware},
    model::{AppState, Configuration},
    site,
};

use super::apps::register_default_models;

/// Build the omnipotence site from the default registrations.
///
/// The default site is populated first, exactly as the framework would, and
/// the omnipotence site then synchronizes itself from its registry.
pub fn build_site(configuration: &Configuration) -> anyhow::Result<OmnipotenceSite> {
    let default_site = BaseAdminSite::new(DEFAULT_SITE_NAME);
    register_default_models(&default_site)?;

    let site = OmnipotenceSite::new(
        configuration.admin_site_name(),
        &configuration.site_settings(),
        omnipotence_rights(),
        &default_site.registry(),
    )?;

    Ok(site)
}

#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "UP" }))
}

/// Creates and binds the admin HTTP server.
pub fn main_server(
    app_state: Arc<AppState>,
    address: String,
    port: u16,
) -> Result<Server, std::io::Error> {
    let site_name = app_state.site_name().to_string();

    Ok(HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Authentication)
            .wrap(TracingMiddleware::new())
            .app_data(web::Data::from(app_state.clone()))
            .service(health)
            .service(site::routes(&site_name))
    })
    .bind((address, port))?
    .run())
}
