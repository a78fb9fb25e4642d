// Data models and types for the admin server

pub mod app_state;
pub mod config;
pub mod response;

pub use app_state::AppState;
pub use config::Configuration;
