//! Result envelope handed to the presentation layer.
//!
//! No error ever crosses the service boundary as a panic or a bare `Err`;
//! callers get a uniform `{success, data, error}` shape they can serialize
//! directly.

use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// One of `validation`, `not_found`, `inconsistent_state`, `storage`.
    pub kind: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: &DomainError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                kind: error.kind().to_string(),
                message: error.to_string(),
            }),
        }
    }
}

impl<T> From<DomainResult<T>> for ApiResponse<T> {
    fn from(result: DomainResult<T>) -> Self {
        match result {
            Ok(data) => ApiResponse::ok(data),
            Err(e) => ApiResponse::err(&e),
        }
    }
}
