// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}

pub const PRODUCT_ID_MAX_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Input is kept verbatim: catalog lookup is exact, so padding is part
    /// of the id.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if input.is_empty() {
            return Err(ValidationError("product id must not be empty".to_string()));
        }
        if input.len() > PRODUCT_ID_MAX_LEN {
            return Err(ValidationError(format!(
                "product id exceeds max length {PRODUCT_ID_MAX_LEN}"
            )));
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub desc: String,
    pub price: Option<f64>,
}

impl Product {
    fn fixed(id: &str, name: &str, desc: &str, price: f64) -> Self {
        Self {
            id: ProductId(id.to_string()),
            name: name.to_string(),
            desc: desc.to_string(),
            price: Some(price),
        }
    }
}

/// Immutable product list. Order is part of the contract: the generic
/// refine branch returns a prefix of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    #[must_use]
    pub fn fixed() -> Self {
        Self {
            products: vec![
                Product::fixed("p1", "Floral Silver Ring", "Elegant floral engraving", 59.0),
                Product::fixed(
                    "p2",
                    "Cubic Charm Bracelet",
                    "Set with zirconia stones",
                    79.0,
                ),
                Product::fixed("p3", "Minimal Band", "Matte sterling silver finish", 29.0),
                Product::fixed("p4", "Heart Pendant", "Delicate silver heart charm", 49.0),
            ],
        }
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Exact, case-sensitive identifier match.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::fixed()
    }
}
