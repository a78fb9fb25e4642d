// Error handling for the admin HTTP layer
// Maps domain errors onto actix-web responses

use std::fmt::{Display, Formatter};

use actix_web::HttpResponse;

pub use omniport_common::error::{
    PARAMETER_VALIDATE_ERROR, RESOURCE_CONFLICT, RESOURCE_NOT_FOUND, SERVER_ERROR,
};
pub use omniport_common::{ErrorCode, OmniportError};

use crate::model::response as common;

// Local wrapper for application errors to implement actix-web error handling
// (Cannot impl foreign trait for foreign type due to orphan rules)
#[derive(Debug)]
pub struct AppError {
    inner: anyhow::Error,
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(value: anyhow::Error) -> Self {
        AppError { inner: value }
    }
}

impl From<OmniportError> for AppError {
    fn from(value: OmniportError) -> Self {
        AppError {
            inner: value.into(),
        }
    }
}

impl AppError {
    pub fn inner(&self) -> &anyhow::Error {
        &self.inner
    }

    pub fn downcast_ref<E: std::error::Error + Send + Sync + 'static>(&self) -> Option<&E> {
        self.inner.downcast_ref::<E>()
    }
}

impl actix_web::error::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        if let Some(e) = self.downcast_ref::<OmniportError>() {
            match e {
                OmniportError::Validation(error) => common::Result::http_response(
                    400,
                    PARAMETER_VALIDATE_ERROR.code,
                    error.message(),
                    vec![error.to_detail()],
                ),
                OmniportError::AlreadyRegistered(message) => {
                    common::Result::<String>::http_response(
                        409,
                        RESOURCE_CONFLICT.code,
                        message.to_string(),
                        String::new(),
                    )
                }
                OmniportError::NotRegistered(message) => common::Result::<String>::http_response(
                    404,
                    RESOURCE_NOT_FOUND.code,
                    message.to_string(),
                    String::new(),
                ),
                OmniportError::ImproperlyConfigured(message)
                | OmniportError::ConfigError(message) => common::Result::<String>::http_response(
                    400,
                    PARAMETER_VALIDATE_ERROR.code,
                    message.to_string(),
                    String::new(),
                ),
                OmniportError::InternalError(message) => common::Result::<String>::http_response(
                    500,
                    SERVER_ERROR.code,
                    message.to_string(),
                    String::new(),
                ),
            }
        } else {
            tracing::error!(error = %self.inner, "Unhandled error");
            common::Result::<String>::http_response(
                500,
                SERVER_ERROR.code,
                self.inner.to_string(),
                String::new(),
            )
        }
    }
}
