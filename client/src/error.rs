//! Errors returned by `TodoClient` parse methods.
//!
//! # Design
//! The backend names its error kind in `error.name`. `ValidationError` and
//! `ResourceNotFoundError` get their own variants carrying the decoded
//! payload; every other non-200 response lands in `HttpError` with the raw
//! status and body.

use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 400: the backend rejected one or more input fields.
    #[error("validation failed: {invalid_fields:?}")]
    Validation {
        invalid_fields: BTreeMap<String, String>,
    },

    /// 404: the referenced resource does not exist.
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Any other unexpected status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "name")]
enum ErrorBody {
    ValidationError {
        #[serde(rename = "invalidFields")]
        invalid_fields: BTreeMap<String, String>,
    },
    ResourceNotFoundError {
        resource: String,
    },
}

impl ApiError {
    /// Decode an error response, falling back to `HttpError` when the body
    /// is not one of the backend's typed errors.
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(ErrorEnvelope {
                error: ErrorBody::ValidationError { invalid_fields },
            }) if status == 400 => ApiError::Validation { invalid_fields },
            Ok(ErrorEnvelope {
                error: ErrorBody::ResourceNotFoundError { resource },
            }) if status == 404 => ApiError::NotFound { resource },
            _ => ApiError::HttpError {
                status,
                body: body.to_string(),
            },
        }
    }
}
