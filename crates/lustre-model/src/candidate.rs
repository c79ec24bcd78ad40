// SPDX-License-Identifier: Apache-2.0

use crate::{Catalog, Product};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SAMPLES_URL_PREFIX: &str = "/samples";
pub const REFINE_TRUNCATE_LEN: usize = 3;

/// One name-substring rule. Patterns are case-sensitive against the product
/// display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRule {
    pub pattern: String,
    pub asset: String,
}

impl ImageRule {
    #[must_use]
    pub fn new(pattern: &str, asset: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            asset: asset.to_string(),
        }
    }
}

/// Ordered rule table, first match wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRuleTable {
    rules: Vec<ImageRule>,
}

impl ImageRuleTable {
    #[must_use]
    pub fn new(rules: Vec<ImageRule>) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &[ImageRule] {
        &self.rules
    }

    #[must_use]
    pub fn asset_for(&self, product_name: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| product_name.contains(r.pattern.as_str()))
            .map(|r| r.asset.as_str())
    }
}

impl Default for ImageRuleTable {
    fn default() -> Self {
        Self::new(vec![
            ImageRule::new(
                "Ring",
                "Tourmaline-sapphire-cluster-ring_Unique-jewellery_Fairina-Cheng_8ecd2611-d1f6-4a6c-8ce0-3703d85d3ddf.jpg",
            ),
            ImageRule::new("Bracelet", "TinyJewellery_MelanieKate-48.webp"),
        ])
    }
}

/// Sample asset file names as observed in the samples directory, sorted so
/// the positional fallback is stable for a given directory listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleSet {
    files: Vec<String>,
}

impl SampleSet {
    #[must_use]
    pub fn new(mut files: Vec<String>) -> Self {
        files.sort();
        files.dedup();
        Self { files }
    }

    #[must_use]
    pub fn files(&self) -> &[String] {
        &self.files
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Rotating fallback: `index % len`, `None` for an empty set.
    #[must_use]
    pub fn positional(&self, index: usize) -> Option<&str> {
        if self.files.is_empty() {
            return None;
        }
        Some(self.files[index % self.files.len()].as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(flatten)]
    pub product: Product,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefineHint(String);

impl RefineHint {
    #[must_use]
    pub fn new(raw: Option<&str>) -> Self {
        Self(raw.unwrap_or_default().to_lowercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn branch(&self) -> RefineBranch {
        if self.0.contains("ring") {
            RefineBranch::Ring
        } else if self.0.contains("bracelet") {
            RefineBranch::Bracelet
        } else {
            RefineBranch::Generic
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefineBranch {
    Ring,
    Bracelet,
    Generic,
}

impl RefineBranch {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ring => "ring",
            Self::Bracelet => "bracelet",
            Self::Generic => "generic",
        }
    }
}

#[must_use]
pub fn build_candidates(
    catalog: &Catalog,
    rules: &ImageRuleTable,
    samples: &SampleSet,
    url_prefix: &str,
) -> Vec<Candidate> {
    let prefix = url_prefix.trim_end_matches('/');
    catalog
        .products()
        .iter()
        .enumerate()
        .map(|(idx, product)| {
            let asset = rules
                .asset_for(&product.name)
                .or_else(|| samples.positional(idx));
            Candidate {
                product: product.clone(),
                image_url: asset.map(|a| format!("{prefix}/{a}")),
            }
        })
        .collect()
}

/// Priority chain: ring beats bracelet beats truncation. Empty and
/// unmatched hints both take the truncation branch.
#[must_use]
pub fn refine_candidates(candidates: Vec<Candidate>, hint: &RefineHint) -> Vec<Candidate> {
    match hint.branch() {
        RefineBranch::Ring => candidates
            .into_iter()
            .filter(|c| c.product.name.contains("Ring") || c.product.name.contains("Band"))
            .collect(),
        RefineBranch::Bracelet => candidates
            .into_iter()
            .filter(|c| c.product.name.contains("Bracelet"))
            .collect(),
        RefineBranch::Generic => candidates.into_iter().take(REFINE_TRUNCATE_LEN).collect(),
    }
}
