// SPDX-License-Identifier: Apache-2.0

use crate::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lustre_api::error_mapping::map_error;
use lustre_api::ApiError;
use serde_json::json;

pub(crate) fn api_error_response(err: ApiError) -> Response {
    let status = StatusCode::from_u16(map_error(&err).status_code)
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({"error": err}))).into_response()
}

pub(crate) fn store_error_response(err: &StoreError, request_id: &str) -> Response {
    api_error_response(ApiError::storage_unavailable(&err.to_string()).with_request_id(request_id))
}
