//! Application startup utilities module.

pub mod apps;
pub mod http;
pub mod logging;

pub use apps::register_default_models;
pub use http::{build_site, main_server};
pub use logging::{LoggingConfig, LoggingGuard, init_logging};
