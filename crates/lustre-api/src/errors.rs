// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ApiErrorCode {
    ValidationFailed,
    InvalidFormBody,
    InvalidJsonBody,
    PayloadTooLarge,
    StorageUnavailable,
    Internal,
}

impl ApiErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValidationFailed => "ValidationFailed",
            Self::InvalidFormBody => "InvalidFormBody",
            Self::InvalidJsonBody => "InvalidJsonBody",
            Self::PayloadTooLarge => "PayloadTooLarge",
            Self::StorageUnavailable => "StorageUnavailable",
            Self::Internal => "Internal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub details: Value,
    pub request_id: String,
}

impl ApiError {
    #[must_use]
    pub fn new(
        code: ApiErrorCode,
        message: impl Into<String>,
        details: Value,
        request_id: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            request_id: request_id.into(),
        }
    }

    #[must_use]
    pub fn missing_files(field: &str) -> Self {
        Self::new(
            ApiErrorCode::ValidationFailed,
            "at least one file part is required",
            json!({"field_errors":[{"field": field, "reason": "missing"}]}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn invalid_form_body(reason: &str) -> Self {
        Self::new(
            ApiErrorCode::InvalidFormBody,
            "malformed form body",
            json!({"reason": reason}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn invalid_json_body(reason: &str) -> Self {
        Self::new(
            ApiErrorCode::InvalidJsonBody,
            "malformed json body",
            json!({"reason": reason}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn payload_too_large(limit_bytes: usize) -> Self {
        Self::new(
            ApiErrorCode::PayloadTooLarge,
            "request body exceeds configured limit",
            json!({"limit_bytes": limit_bytes}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn storage_unavailable(reason: &str) -> Self {
        Self::new(
            ApiErrorCode::StorageUnavailable,
            "upload storage unavailable",
            json!({"reason": reason}),
            "req-unknown",
        )
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: &str) -> Self {
        self.request_id = request_id.to_string();
        self
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}

const _: fn() = || {
    fn assert_traits<T: Serialize + for<'de> Deserialize<'de>>() {}
    assert_traits::<ApiErrorCode>();
};
