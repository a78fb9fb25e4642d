//! Error types and error codes for Omniport
//!
//! This module defines:
//! - `OmniportError`: Application-specific error enum
//! - `ErrorCode`: Structured error codes for API responses

use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// Application-specific error types
#[derive(thiserror::Error, Debug)]
pub enum OmniportError {
    #[error("{0}")]
    Validation(ValidationError),

    #[error("{0}")]
    AlreadyRegistered(String),

    #[error("{0}")]
    NotRegistered(String),

    #[error("{0}")]
    ImproperlyConfigured(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl From<ValidationError> for OmniportError {
    fn from(value: ValidationError) -> Self {
        OmniportError::Validation(value)
    }
}

/// Error code structure for API responses
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ErrorCode<'a> {
    pub code: i32,
    pub message: &'a str,
}

pub const SUCCESS: ErrorCode<'static> = ErrorCode {
    code: 0,
    message: "success",
};

pub const PARAMETER_VALIDATE_ERROR: ErrorCode<'static> = ErrorCode {
    code: 20002,
    message: "parameter validate error",
};

pub const RESOURCE_NOT_FOUND: ErrorCode<'static> = ErrorCode {
    code: 20004,
    message: "resource not found",
};

pub const RESOURCE_CONFLICT: ErrorCode<'static> = ErrorCode {
    code: 20005,
    message: "resource conflict",
};

pub const SERVER_ERROR: ErrorCode<'static> = ErrorCode {
    code: 30000,
    message: "server error",
};
