//! Main entry point for the Omniport admin server.

use std::sync::Arc;

use omniport_auth::service::user::InMemoryUserStore;
use omniport_server::{
    model::{AppState, Configuration},
    startup,
};
use tracing::info;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let configuration = Configuration::new()?;

    let logging_config = configuration.logging_config();
    let _logging_guard = startup::init_logging(&logging_config)?;

    configuration.validate()?;

    let site = startup::build_site(&configuration)?;
    let users = InMemoryUserStore::with_users(configuration.seed_users());
    info!(users = users.len(), "User store seeded");

    let server_address = configuration.server_address();
    let server_port = configuration.server_port();

    let app_state = Arc::new(AppState {
        configuration,
        site: Arc::new(site),
        users: Arc::new(users),
    });

    info!(
        "Admin site '{}' listening on {}:{}",
        app_state.site_name(),
        server_address,
        server_port
    );

    startup::main_server(app_state, server_address, server_port)?.await?;

    Ok(())
}
