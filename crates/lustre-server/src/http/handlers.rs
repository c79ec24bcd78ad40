// SPDX-License-Identifier: Apache-2.0

use crate::http::form::{
    read_form, CLIENT_NAME_FIELD, FILES_FIELD, NOTES_FIELD, REFINE_TEXT_FIELD, UPLOAD_ID_FIELD,
};
use crate::http::request_tracing::RequestTrace;
use crate::http::response_contract::{api_error_response, store_error_response};
use crate::{services, AppState};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use lustre_api::{ApiError, HealthDto, SelectRequestDto, UploadResponseDto};
use tracing::{error, warn};

pub(crate) async fn health_handler() -> Json<HealthDto> {
    Json(HealthDto::live())
}

pub(crate) async fn upload_handler(
    State(state): State<AppState>,
    Extension(trace): Extension<RequestTrace>,
    request: Request,
) -> Response {
    let form = match read_form(request, state.api.max_upload_bytes).await {
        Ok(form) => form,
        Err(e) => {
            warn!(error = %e, "upload form rejected");
            return api_error_response(e.with_request_id(&trace.request_id));
        }
    };
    if form.files.is_empty() {
        return api_error_response(
            ApiError::missing_files(FILES_FIELD).with_request_id(&trace.request_id),
        );
    }
    match services::accept_upload(
        &state,
        &form.files,
        form.owned_text(CLIENT_NAME_FIELD),
        form.owned_text(NOTES_FIELD),
    )
    .await
    {
        Ok(upload_id) => Json(UploadResponseDto::received(&upload_id)).into_response(),
        Err(e) => {
            error!(error = %e, "upload persistence failed");
            store_error_response(&e, &trace.request_id)
        }
    }
}

pub(crate) async fn recommend_handler(
    State(state): State<AppState>,
    Extension(trace): Extension<RequestTrace>,
    Path(upload_id): Path<String>,
    request: Request,
) -> Response {
    let form = match read_form(request, state.api.max_upload_bytes).await {
        Ok(form) => form,
        Err(e) => return api_error_response(e.with_request_id(&trace.request_id)),
    };
    match services::recommend_for_upload(&state, &upload_id, form.text(REFINE_TEXT_FIELD)).await {
        Ok(body) => Json(body).into_response(),
        Err(e) => {
            error!(error = %e, "recommend lookup failed");
            store_error_response(&e, &trace.request_id)
        }
    }
}

pub(crate) async fn recommend_fallback_handler(
    State(state): State<AppState>,
    Extension(trace): Extension<RequestTrace>,
    request: Request,
) -> Response {
    let form = match read_form(request, state.api.max_upload_bytes).await {
        Ok(form) => form,
        Err(e) => return api_error_response(e.with_request_id(&trace.request_id)),
    };
    match services::recommend_or_upload(
        &state,
        &form.files,
        form.text(REFINE_TEXT_FIELD),
        form.text(UPLOAD_ID_FIELD),
    )
    .await
    {
        Ok(body) => Json(body).into_response(),
        Err(e) => {
            error!(error = %e, "recommend fallback failed");
            store_error_response(&e, &trace.request_id)
        }
    }
}

pub(crate) async fn select_handler(
    State(state): State<AppState>,
    Extension(trace): Extension<RequestTrace>,
    payload: Result<Json<SelectRequestDto>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(req) => req,
        Err(rej) => {
            let err = if rej.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::payload_too_large(state.api.max_upload_bytes)
            } else {
                ApiError::invalid_json_body(&rej.body_text())
            };
            return api_error_response(err.with_request_id(&trace.request_id));
        }
    };
    match services::select_product(&state, &req.product_id).await {
        Ok(body) => Json(body).into_response(),
        Err(e) => {
            error!(error = %e, "selection append failed");
            store_error_response(&e, &trace.request_id)
        }
    }
}

pub(crate) async fn cart_handler(
    State(state): State<AppState>,
    Extension(trace): Extension<RequestTrace>,
) -> Response {
    match services::cart(&state).await {
        Ok(items) => Json(items).into_response(),
        Err(e) => {
            error!(error = %e, "cart snapshot failed");
            store_error_response(&e, &trace.request_id)
        }
    }
}
