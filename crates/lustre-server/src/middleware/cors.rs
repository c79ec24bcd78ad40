// SPDX-License-Identifier: Apache-2.0

use crate::AppState;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

const ALLOW_METHODS: &str = "DELETE, GET, HEAD, OPTIONS, PATCH, POST, PUT";
const PREFLIGHT_MAX_AGE_SECS: &str = "600";

fn allowed_origin(headers: &HeaderMap, state: &AppState) -> Option<HeaderValue> {
    let origin = headers
        .get("origin")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty() && v.len() <= 256)?;
    if !state.api.cors_allowed_origins.iter().any(|x| x == origin) {
        return None;
    }
    HeaderValue::from_str(origin).ok()
}

fn put_origin_headers(headers: &mut HeaderMap, origin: HeaderValue) {
    headers.insert("access-control-allow-origin", origin);
    headers.insert(
        "access-control-allow-credentials",
        HeaderValue::from_static("true"),
    );
    headers.insert("vary", HeaderValue::from_static("Origin"));
}

/// Credentialed CORS for the configured front-end origins. Any method and
/// any requested header is allowed; requested headers are mirrored since a
/// wildcard is not honoured with credentials.
pub(crate) async fn cors_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let origin = allowed_origin(req.headers(), &state);
    let is_preflight =
        req.method() == Method::OPTIONS && req.headers().contains_key("access-control-request-method");
    if is_preflight {
        let mut resp = StatusCode::NO_CONTENT.into_response();
        if let Some(origin_value) = origin {
            let requested_headers = req
                .headers()
                .get("access-control-request-headers")
                .cloned();
            let headers = resp.headers_mut();
            put_origin_headers(headers, origin_value);
            headers.insert(
                "access-control-allow-methods",
                HeaderValue::from_static(ALLOW_METHODS),
            );
            if let Some(requested) = requested_headers {
                headers.insert("access-control-allow-headers", requested);
            }
            headers.insert(
                "access-control-max-age",
                HeaderValue::from_static(PREFLIGHT_MAX_AGE_SECS),
            );
        }
        return resp;
    }

    let mut resp = next.run(req).await;
    if let Some(origin_value) = origin {
        put_origin_headers(resp.headers_mut(), origin_value);
    }
    resp
}
