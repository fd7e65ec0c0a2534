//! Shared validation helpers for inbound HTTP adapters.
//!
//! Path identifiers and malformed JSON bodies are rejected here, before any
//! domain port is called, with the same error envelope the domain uses.

use actix_web::HttpRequest;
use actix_web::error::JsonPayloadError;
use actix_web::web::JsonConfig;
use serde_json::json;
use tracing::debug;

use crate::domain::{Error, StudentId, StudentIdError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidId,
    InvalidJson,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::InvalidJson => "invalid_json",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) const ID_FIELD: FieldName = FieldName::new("id");

pub(crate) fn invalid_id_error(field: FieldName, value: &str, cause: &StudentIdError) -> Error {
    ValidationError::new(field.as_str(), cause.to_string()).with_value(ErrorCode::InvalidId, value)
}

/// Parse a `{id}` path segment into a [`StudentId`].
pub(crate) fn parse_student_id(value: &str, field: FieldName) -> Result<StudentId, Error> {
    value
        .parse::<StudentId>()
        .map_err(|err| invalid_id_error(field, value, &err))
}

fn invalid_json_error(err: &JsonPayloadError) -> Error {
    Error::invalid_request("request body must be valid JSON").with_details(json!({
        "code": ErrorCode::InvalidJson.as_str(),
        "reason": err.to_string(),
    }))
}

/// JSON extractor configuration that reports payload errors in the domain
/// error envelope rather than Actix's plain-text default.
pub fn json_config() -> JsonConfig {
    JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        debug!(error = %err, "rejected JSON payload");
        invalid_json_error(&err).into()
    })
}
