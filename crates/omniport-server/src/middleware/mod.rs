// HTTP middleware implementations

pub mod auth; // Session authentication
pub mod tracing; // Per-request tracing spans
