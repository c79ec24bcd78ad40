#![forbid(unsafe_code)]

mod config;
mod http;
mod middleware;
mod runtime;
pub mod services;
mod store;

pub const CRATE_NAME: &str = "lustre-server";

pub use config::{
    validate_startup_config_contract, ApiConfig, ConfigError, StorageConfig,
    CONFIG_SCHEMA_VERSION,
};
pub use runtime::server_runtime_app::{build_router, AppState};
pub use store::memory::InMemoryStore;
pub use store::samples::SampleAssets;
pub use store::uploads::{IncomingFile, UploadStorage};
pub use store::{SessionStore, StoreError};
