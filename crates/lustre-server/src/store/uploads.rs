// SPDX-License-Identifier: Apache-2.0

use crate::StoreError;
use axum::body::Bytes;
use lustre_model::{stored_file_name, UploadId};
use std::path::{Path, PathBuf};

/// One file part as received from the client.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub filename: Option<String>,
    pub bytes: Bytes,
}

impl IncomingFile {
    #[must_use]
    pub fn new(filename: Option<&str>, bytes: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.map(ToString::to_string),
            bytes: bytes.into(),
        }
    }
}

/// Local disk layout: `{root}/{upload_id}/{token}{ext}`. Nothing is ever
/// deleted.
pub struct UploadStorage {
    root: PathBuf,
}

impl UploadStorage {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn upload_dir(&self, upload_id: &UploadId) -> PathBuf {
        self.root.join(upload_id.as_str())
    }

    pub async fn ensure_root(&self) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|source| StoreError::Io {
                path: self.root.clone(),
                source,
            })
    }

    /// Writes every file in order and returns the stored paths in the same
    /// order. Stops at the first write failure.
    pub async fn save_batch(
        &self,
        upload_id: &UploadId,
        files: &[IncomingFile],
    ) -> Result<Vec<PathBuf>, StoreError> {
        let dir = self.upload_dir(upload_id);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| StoreError::Io {
                path: dir.clone(),
                source,
            })?;
        let mut saved = Vec::with_capacity(files.len());
        for file in files {
            let token = uuid::Uuid::new_v4().simple().to_string();
            let path = dir.join(stored_file_name(file.filename.as_deref(), &token));
            tokio::fs::write(&path, &file.bytes)
                .await
                .map_err(|source| StoreError::Io {
                    path: path.clone(),
                    source,
                })?;
            saved.push(path);
        }
        Ok(saved)
    }
}
