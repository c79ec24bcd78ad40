#![forbid(unsafe_code)]
//! Lustre model SSOT.
//!
//! The catalog is fixed at process start; candidates are derived per request
//! and never stored.

mod candidate;
mod catalog;
mod upload;

pub use candidate::{
    build_candidates, refine_candidates, Candidate, ImageRule, ImageRuleTable, RefineBranch,
    RefineHint, SampleSet, DEFAULT_SAMPLES_URL_PREFIX, REFINE_TRUNCATE_LEN,
};
pub use catalog::{Catalog, Product, ProductId, ValidationError, PRODUCT_ID_MAX_LEN};
pub use upload::{
    stored_file_name, UploadId, UploadRecord, DEFAULT_FILE_EXTENSION, EXTENSION_MAX_LEN,
    UPLOAD_ID_LEN,
};

pub const CRATE_NAME: &str = "lustre-model";
