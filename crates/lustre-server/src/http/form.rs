// SPDX-License-Identifier: Apache-2.0

use crate::IncomingFile;
use axum::extract::multipart::MultipartError;
use axum::extract::{Form, FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use lustre_api::ApiError;
use std::collections::HashMap;

pub(crate) const FILES_FIELD: &str = "files";
pub(crate) const CLIENT_NAME_FIELD: &str = "client_name";
pub(crate) const NOTES_FIELD: &str = "notes";
pub(crate) const REFINE_TEXT_FIELD: &str = "refine_text";
pub(crate) const UPLOAD_ID_FIELD: &str = "upload_id";

/// Text fields plus file parts from a form submission. Duplicate text
/// fields keep their first value for both multipart and urlencoded bodies.
#[derive(Debug, Default)]
pub(crate) struct FormPayload {
    fields: HashMap<String, String>,
    pub files: Vec<IncomingFile>,
}

impl FormPayload {
    /// Blank values read as absent.
    pub(crate) fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    pub(crate) fn owned_text(&self, name: &str) -> Option<String> {
        self.text(name).map(|v| v.trim().to_string())
    }
}

fn multipart_error(err: &MultipartError, limit_bytes: usize) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::payload_too_large(limit_bytes)
    } else {
        ApiError::invalid_form_body(&err.body_text())
    }
}

/// Accepts `multipart/form-data`, `application/x-www-form-urlencoded`, or
/// no body at all. Other content types are read as an empty form.
pub(crate) async fn read_form(request: Request, limit_bytes: usize) -> Result<FormPayload, ApiError> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let mut payload = FormPayload::default();
    if content_type.starts_with("multipart/form-data") {
        let mut multipart = Multipart::from_request(request, &())
            .await
            .map_err(|rej| ApiError::invalid_form_body(&rej.body_text()))?;
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(&e, limit_bytes))?
        {
            let name = field.name().unwrap_or_default().to_string();
            if name == FILES_FIELD {
                let filename = field.file_name().map(ToString::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(&e, limit_bytes))?;
                // An empty file input still submits one nameless, empty part.
                if bytes.is_empty() && filename.as_deref().map_or(true, str::is_empty) {
                    continue;
                }
                payload.files.push(IncomingFile::new(filename.as_deref(), bytes));
            } else {
                let text = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(&e, limit_bytes))?;
                payload.fields.entry(name).or_insert(text);
            }
        }
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(request, &())
            .await
            .map_err(|rej| {
                if rej.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    ApiError::payload_too_large(limit_bytes)
                } else {
                    ApiError::invalid_form_body(&rej.body_text())
                }
            })?;
        for (name, value) in pairs {
            payload.fields.entry(name).or_insert(value);
        }
    }
    Ok(payload)
}
