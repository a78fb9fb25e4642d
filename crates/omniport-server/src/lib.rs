// Omniport admin server
//
// Mounts the omnipotence admin site over HTTP:
// - Configuration (config file, environment, CLI overrides)
// - AppState (site, user store, configuration)
// - Middleware (session authentication, request tracing)
// - Site handlers (login, logout, index, app index, change list)
// - Startup (logging, default model registrations)

pub mod error; // Error handling and types
pub mod middleware; // HTTP middleware
pub mod model; // Configuration, state and response types
pub mod site; // Admin site HTTP handlers
pub mod startup; // Application startup utilities

pub use model::{AppState, Configuration};
