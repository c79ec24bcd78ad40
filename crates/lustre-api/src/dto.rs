// SPDX-License-Identifier: Apache-2.0

use crate::{MSG_RECOMMENDATIONS_READY, MSG_UPLOAD_NOT_FOUND, MSG_UPLOAD_RECEIVED};
use lustre_model::{Candidate, Product, UploadId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UploadResponseDto {
    pub upload_id: String,
    pub message: String,
}

impl UploadResponseDto {
    #[must_use]
    pub fn received(upload_id: &UploadId) -> Self {
        Self {
            upload_id: upload_id.to_string(),
            message: MSG_UPLOAD_RECEIVED.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecommendationDto {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub price: Option<f64>,
    pub image_url: Option<String>,
}

impl From<Candidate> for RecommendationDto {
    fn from(c: Candidate) -> Self {
        Self {
            id: c.product.id.to_string(),
            name: c.product.name,
            desc: c.product.desc,
            price: c.product.price,
            image_url: c.image_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecommendResponseDto {
    pub recommendations: Vec<RecommendationDto>,
    pub message: String,
}

impl RecommendResponseDto {
    #[must_use]
    pub fn ready(candidates: Vec<Candidate>) -> Self {
        Self {
            recommendations: candidates.into_iter().map(RecommendationDto::from).collect(),
            message: MSG_RECOMMENDATIONS_READY.to_string(),
        }
    }

    #[must_use]
    pub fn upload_not_found() -> Self {
        Self {
            recommendations: Vec::new(),
            message: MSG_UPLOAD_NOT_FOUND.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectRequestDto {
    pub product_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectResponseDto {
    pub ok: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CartItemDto {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub price: Option<f64>,
}

impl From<Product> for CartItemDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name,
            desc: p.desc,
            price: p.price,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HealthDto {
    pub ok: bool,
}

impl HealthDto {
    #[must_use]
    pub const fn live() -> Self {
        Self { ok: true }
    }
}
