//! Application state management
//!
//! This module defines the central application state shared across all handlers.

use std::sync::Arc;

use omniport_admin::AdminSite;
use omniport_auth::service::user::UserStore;

use super::config::Configuration;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub configuration: Configuration,
    /// The mounted admin site
    pub site: Arc<dyn AdminSite>,
    /// Users that can log in to the site
    pub users: Arc<dyn UserStore>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("configuration", &self.configuration)
            .field("site", &self.site.name())
            .field("users", &"<dyn UserStore>")
            .finish()
    }
}

impl AppState {
    pub fn site_name(&self) -> &str {
        self.site.name()
    }

    /// Path prefix the site is mounted at, e.g. `/omnipotence/`
    pub fn site_root(&self) -> String {
        format!("/{}/", self.site.name())
    }

    pub fn login_url(&self) -> String {
        format!("{}login/", self.site_root())
    }
}
