// SPDX-License-Identifier: Apache-2.0

//! Request flows shared by the HTTP handlers. Everything here is
//! transport-agnostic: no headers, no status codes.

use crate::{AppState, IncomingFile, StoreError};
use lustre_api::{
    selection_added_message, CartItemDto, RecommendResponseDto, SelectResponseDto,
    MSG_PRODUCT_NOT_FOUND,
};
use lustre_model::{
    build_candidates, refine_candidates, Candidate, ProductId, RefineHint, UploadId,
    UploadRecord,
};
use tracing::{debug, info};

/// Saves the batch under a fresh id, then records it. The id is only
/// visible to callers once both steps succeed.
pub async fn accept_upload(
    state: &AppState,
    files: &[IncomingFile],
    client_name: Option<String>,
    notes: Option<String>,
) -> Result<UploadId, StoreError> {
    let upload_id = UploadId::generate();
    let saved = state.uploads.save_batch(&upload_id, files).await?;
    let file_count = saved.len();
    state
        .store
        .put_upload(UploadRecord::new(
            upload_id.clone(),
            saved,
            client_name,
            notes,
        ))
        .await?;
    info!(upload_id = %upload_id, file_count, "upload recorded");
    Ok(upload_id)
}

async fn current_candidates(state: &AppState) -> Vec<Candidate> {
    let samples = state.samples.list_or_empty().await;
    build_candidates(
        &state.catalog,
        &state.image_rules,
        &samples,
        &state.api.samples_url_prefix,
    )
}

async fn refined_response(state: &AppState, refine_text: Option<&str>) -> RecommendResponseDto {
    let hint = RefineHint::new(refine_text);
    let results = refine_candidates(current_candidates(state).await, &hint);
    debug!(
        branch = hint.branch().as_str(),
        result_count = results.len(),
        "candidates refined"
    );
    RecommendResponseDto::ready(results)
}

/// Unknown or malformed ids are a soft miss, never an error.
pub async fn recommend_for_upload(
    state: &AppState,
    upload_id: &str,
    refine_text: Option<&str>,
) -> Result<RecommendResponseDto, StoreError> {
    let known = match UploadId::parse(upload_id) {
        Ok(id) => state.store.contains_upload(&id).await?,
        Err(_) => false,
    };
    if !known {
        info!(upload_id, "recommend for unknown upload id");
        return Ok(RecommendResponseDto::upload_not_found());
    }
    if !state.api.recommend_delay.is_zero() {
        tokio::time::sleep(state.api.recommend_delay).await;
    }
    Ok(refined_response(state, refine_text).await)
}

/// Saves any supplied files as a new upload first. The supplied id is
/// only logged: the filter does not depend on it.
pub async fn recommend_or_upload(
    state: &AppState,
    files: &[IncomingFile],
    refine_text: Option<&str>,
    upload_id: Option<&str>,
) -> Result<RecommendResponseDto, StoreError> {
    let effective = if files.is_empty() {
        upload_id.and_then(|raw| UploadId::parse(raw).ok())
    } else {
        Some(accept_upload(state, files, None, None).await?)
    };
    info!(
        upload_id = effective.as_ref().map(UploadId::as_str).unwrap_or(""),
        file_count = files.len(),
        "fallback recommend"
    );
    Ok(refined_response(state, refine_text).await)
}

pub async fn select_product(
    state: &AppState,
    product_id: &str,
) -> Result<SelectResponseDto, StoreError> {
    let product = ProductId::parse(product_id)
        .ok()
        .and_then(|id| state.catalog.find(id.as_str()));
    let Some(product) = product else {
        info!(product_id, "selection for unknown product");
        return Ok(SelectResponseDto {
            ok: false,
            message: MSG_PRODUCT_NOT_FOUND.to_string(),
        });
    };
    let cart_len = state.store.append_selection(product.clone()).await?;
    info!(product_id, cart_len, "product selected");
    Ok(SelectResponseDto {
        ok: true,
        message: selection_added_message(&product.name),
    })
}

pub async fn cart(state: &AppState) -> Result<Vec<CartItemDto>, StoreError> {
    Ok(state
        .store
        .cart_snapshot()
        .await?
        .into_iter()
        .map(CartItemDto::from)
        .collect())
}
