//! Shared fixtures for the admin HTTP tests

use std::sync::Arc;

use base64::Engine;
use config::Config;

use omniport_auth::model::{
    MAINTAINER_ROLE, OMNIPORT_AUTH_TOKEN_SECRET_KEY, OMNIPOTENCE_RIGHT, RoleAssignment, User,
};
use omniport_auth::service::auth::encode_session_token;
use omniport_auth::service::user::InMemoryUserStore;
use omniport_server::model::{AppState, Configuration};
use omniport_server::startup::build_site;

pub const TEST_PASSWORD: &str = "correct horse battery";

pub const MAINTAINER: &str = "maintainer";
pub const STAFF: &str = "staff";
pub const ROOT: &str = "root";
pub const RETIRED: &str = "retired";

pub fn secret() -> String {
    base64::engine::general_purpose::STANDARD
        .encode("OmniportTestSecretKeyThatIsLongEnough0123456789")
}

pub fn configuration() -> Configuration {
    let config = Config::builder()
        .set_override(OMNIPORT_AUTH_TOKEN_SECRET_KEY, secret())
        .unwrap()
        .build()
        .unwrap();
    Configuration::from_config(config)
}

fn users() -> InMemoryUserStore {
    let hash = bcrypt::hash(TEST_PASSWORD, 4).unwrap();
    InMemoryUserStore::with_users([
        User::new(1, MAINTAINER)
            .with_password_hash(hash.clone())
            .with_role(RoleAssignment::new(MAINTAINER_ROLE).with_right(OMNIPOTENCE_RIGHT)),
        User::new(2, STAFF)
            .with_password_hash(hash.clone())
            .staff(true),
        User::new(3, ROOT)
            .with_password_hash(hash.clone())
            .superuser(true),
        User::new(4, RETIRED)
            .with_password_hash(hash)
            .superuser(true)
            .active(false),
    ])
}

pub fn app_state() -> Arc<AppState> {
    let configuration = configuration();
    let site = build_site(&configuration).unwrap();
    Arc::new(AppState {
        configuration,
        site: Arc::new(site),
        users: Arc::new(users()),
    })
}

pub fn token_for(username: &str) -> String {
    encode_session_token(username, &secret(), 3600).unwrap()
}

/// Build the admin service the same way the server does
macro_rules! admin_app {
    ($state:expr) => {{
        let state = $state;
        let site_name = state.site_name().to_string();
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(omniport_server::middleware::auth::Authentication)
                .app_data(actix_web::web::Data::from(state))
                .service(omniport_server::startup::http::health)
                .service(omniport_server::site::routes(&site_name)),
        )
        .await
    }};
}
