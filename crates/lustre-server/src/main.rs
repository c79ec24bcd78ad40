#![forbid(unsafe_code)]

use lustre_server::{
    build_router, validate_startup_config_contract, ApiConfig, AppState, StorageConfig,
    CONFIG_SCHEMA_VERSION,
};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_duration_ms(name: &str, default_ms: u64) -> Duration {
    Duration::from_millis(env_u64(name, default_ms))
}

fn env_path(name: &str, default: PathBuf) -> PathBuf {
    env::var(name).map(PathBuf::from).unwrap_or(default)
}

fn env_list(name: &str, default: Vec<String>) -> Vec<String> {
    match env::var(name) {
        Ok(raw) => raw.split(',').map(|s| s.trim().to_string()).collect(),
        Err(_) => default,
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool("LUSTRE_LOG_JSON", true) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();

    let bind_addr = env::var("LUSTRE_BIND").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    let storage_defaults = StorageConfig::default();
    let storage = StorageConfig {
        upload_root: env_path("LUSTRE_UPLOAD_ROOT", storage_defaults.upload_root),
        samples_root: env_path("LUSTRE_SAMPLES_ROOT", storage_defaults.samples_root),
    };
    let api_defaults = ApiConfig::default();
    let api = ApiConfig {
        max_upload_bytes: env_usize("LUSTRE_MAX_UPLOAD_BYTES", api_defaults.max_upload_bytes),
        recommend_delay: env_duration_ms("LUSTRE_RECOMMEND_DELAY_MS", 1000),
        cors_allowed_origins: env_list("LUSTRE_CORS_ORIGINS", api_defaults.cors_allowed_origins),
        enable_audit_log: env_bool("LUSTRE_ENABLE_AUDIT_LOG", false),
        ..ApiConfig::default()
    };
    validate_startup_config_contract(&api, &storage).map_err(|e| format!("invalid config: {e}"))?;

    tokio::fs::create_dir_all(&storage.samples_root)
        .await
        .map_err(|e| format!("create {} failed: {e}", storage.samples_root.display()))?;

    let state = AppState::with_config(storage, api);
    state
        .uploads
        .ensure_root()
        .await
        .map_err(|e| format!("upload root unavailable: {e}"))?;
    info!(
        config_schema_version = CONFIG_SCHEMA_VERSION,
        store = state.store.backend_tag(),
        catalog_size = state.catalog.len(),
        upload_root = %state.uploads.root().display(),
        "startup config validated"
    );
    match state.samples.list().await {
        Ok(set) if set.is_empty() => warn!(
            root = %state.samples.root().display(),
            "samples directory is empty; fallback image urls will be null"
        ),
        Ok(set) => info!(sample_count = set.files().len(), "sample assets found"),
        Err(e) => warn!(error = %e, "samples directory unreadable"),
    }
    let app = build_router(state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| format!("bind {bind_addr} failed: {e}"))?;
    info!("lustre-server listening on {bind_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            wait_for_shutdown_signal().await;
            info!("shutdown signal received");
            let drain_ms = env_u64("LUSTRE_SHUTDOWN_DRAIN_MS", 0);
            if drain_ms > 0 {
                tokio::time::sleep(Duration::from_millis(drain_ms)).await;
            }
        })
        .await
        .map_err(|e| format!("server failed: {e}"))
}
