// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use lustre_model::{Product, UploadId, UploadRecord};
use std::path::PathBuf;

pub(crate) mod memory;
pub(crate) mod samples;
pub(crate) mod uploads;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io failure at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("upload id already recorded: {0}")]
    DuplicateUpload(UploadId),
    #[error("store backend unavailable: {0}")]
    Backend(String),
}

/// Process-wide session state: upload records and the selection ledger.
///
/// Implementations own their synchronization; callers never lock.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    fn backend_tag(&self) -> &'static str {
        "unknown"
    }

    /// Insert-only. A second record for the same id is rejected.
    async fn put_upload(&self, record: UploadRecord) -> Result<(), StoreError>;
    async fn get_upload(&self, id: &UploadId) -> Result<Option<UploadRecord>, StoreError>;

    async fn contains_upload(&self, id: &UploadId) -> Result<bool, StoreError> {
        Ok(self.get_upload(id).await?.is_some())
    }

    async fn upload_count(&self) -> Result<usize, StoreError>;

    /// Appends without deduplication and returns the new ledger length.
    async fn append_selection(&self, product: Product) -> Result<usize, StoreError>;
    async fn cart_snapshot(&self) -> Result<Vec<Product>, StoreError>;
}
