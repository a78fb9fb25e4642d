use actix_web::{Scope, web};

/// Routes of the site mounted as `site_name`
pub fn routes(site_name: &str) -> Scope {
    web::scope(&format!("/{}", site_name))
        .service(super::auth::login_page)
        .service(super::auth::login)
        .service(super::auth::logout)
        .service(super::index::index)
        .service(super::index::app_index)
        .service(super::index::change_list)
}
