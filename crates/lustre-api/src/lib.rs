#![forbid(unsafe_code)]

mod dto;
pub mod error_mapping;
mod errors;

pub use dto::{
    CartItemDto, HealthDto, RecommendResponseDto, RecommendationDto, SelectRequestDto,
    SelectResponseDto, UploadResponseDto,
};
pub use errors::{ApiError, ApiErrorCode};

pub const CRATE_NAME: &str = "lustre-api";

pub const MSG_UPLOAD_RECEIVED: &str = "Upload received. Call /recommend to get suggestions.";
pub const MSG_UPLOAD_NOT_FOUND: &str = "Upload id not found.";
pub const MSG_RECOMMENDATIONS_READY: &str = "Recommendations ready.";
pub const MSG_PRODUCT_NOT_FOUND: &str = "Product not found.";

#[must_use]
pub fn selection_added_message(product_name: &str) -> String {
    format!("Added {product_name} to selection.")
}
