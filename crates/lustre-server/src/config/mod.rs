// SPDX-License-Identifier: Apache-2.0

use lustre_model::DEFAULT_SAMPLES_URL_PREFIX;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

pub const CONFIG_SCHEMA_VERSION: &str = "1";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_upload_bytes must be > 0")]
    ZeroUploadLimit,
    #[error("cors origin entries must be non-empty")]
    EmptyCorsOrigin,
    #[error("cors origin `*` cannot be combined with credentials")]
    WildcardCorsOrigin,
    #[error("upload_root and samples_root must be different directories")]
    SharedStorageRoot,
    #[error("samples_url_prefix must start with '/'")]
    InvalidSamplesPrefix,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiConfig {
    pub max_upload_bytes: usize,
    pub recommend_delay: Duration,
    pub samples_url_prefix: String,
    pub cors_allowed_origins: Vec<String>,
    pub enable_audit_log: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: 32 * 1024 * 1024,
            recommend_delay: Duration::from_millis(1000),
            samples_url_prefix: DEFAULT_SAMPLES_URL_PREFIX.to_string(),
            cors_allowed_origins: vec!["http://localhost:3000".to_string()],
            enable_audit_log: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StorageConfig {
    pub upload_root: PathBuf,
    pub samples_root: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_root: PathBuf::from("app/storage"),
            samples_root: PathBuf::from("app/sampleimage"),
        }
    }
}

pub fn validate_startup_config_contract(
    api: &ApiConfig,
    storage: &StorageConfig,
) -> Result<(), ConfigError> {
    if api.max_upload_bytes == 0 {
        return Err(ConfigError::ZeroUploadLimit);
    }
    if api.cors_allowed_origins.iter().any(|o| o.trim().is_empty()) {
        return Err(ConfigError::EmptyCorsOrigin);
    }
    if api.cors_allowed_origins.iter().any(|o| o.trim() == "*") {
        return Err(ConfigError::WildcardCorsOrigin);
    }
    if !api.samples_url_prefix.starts_with('/') {
        return Err(ConfigError::InvalidSamplesPrefix);
    }
    if storage.upload_root == storage.samples_root {
        return Err(ConfigError::SharedStorageRoot);
    }
    Ok(())
}
