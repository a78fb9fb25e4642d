//! HTTP response types for the admin server
//!
//! This module provides common response structures for API responses.

use actix_web::{HttpResponse, HttpResponseBuilder, http::StatusCode};
use serde::{Deserialize, Serialize};

use omniport_common::error::SUCCESS;

/// Generic result wrapper for API responses
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Result<T> {
    pub code: i32,
    pub message: String,
    pub data: T,
}

impl<T> Result<T> {
    pub fn new(code: i32, message: String, data: T) -> Self {
        Result::<T> {
            code,
            message,
            data,
        }
    }

    pub fn success(data: T) -> Result<T> {
        Result::<T> {
            code: SUCCESS.code,
            message: SUCCESS.message.to_string(),
            data,
        }
    }

    pub fn http_success(data: T) -> HttpResponse
    where
        T: Serialize,
    {
        HttpResponse::Ok().json(Result::success(data))
    }

    pub fn http_response(
        status: u16,
        code: i32,
        message: String,
        data: T,
    ) -> HttpResponse
    where
        T: Serialize,
    {
        HttpResponseBuilder::new(StatusCode::from_u16(status).unwrap_or_default())
            .json(Result::new(code, message, data))
    }
}
