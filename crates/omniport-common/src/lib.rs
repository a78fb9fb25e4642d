//! Omniport Common - Shared error types and codes
//!
//! This crate provides the foundational types used across all Omniport components:
//! - `OmniportError`: application error enum
//! - `ErrorCode`: structured error codes for API responses
//! - `ValidationError`: form validation failures with parameterized messages

pub mod error;
pub mod validation;

// Re-exports for convenience
pub use error::{ErrorCode, OmniportError};
pub use validation::{ErrorDetail, ValidationError};

/// Name of the username field on login forms
pub const PARAM_USERNAME: &str = "username";
/// Name of the password field on login forms
pub const PARAM_PASSWORD: &str = "password";
