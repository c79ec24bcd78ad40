// SPDX-License-Identifier: Apache-2.0

use crate::StoreError;
use lustre_model::SampleSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Read-only directory of sample product images, listed on every request.
pub struct SampleAssets {
    root: PathBuf,
}

impl SampleAssets {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Regular, non-hidden files only. A missing directory lists as empty.
    pub async fn list(&self) -> Result<SampleSet, StoreError> {
        let mut dir = match tokio::fs::read_dir(&self.root).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(root = %self.root.display(), "samples directory missing");
                return Ok(SampleSet::default());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.root.clone(),
                    source,
                })
            }
        };
        let mut files = Vec::new();
        loop {
            let entry = match dir.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(source) => {
                    return Err(StoreError::Io {
                        path: self.root.clone(),
                        source,
                    })
                }
            };
            let is_file = entry
                .file_type()
                .await
                .map(|t| t.is_file())
                .unwrap_or(false);
            if !is_file {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) if !name.starts_with('.') => files.push(name),
                Ok(_) => {}
                Err(raw) => warn!(name = ?raw, "skipping non-utf8 sample file name"),
            }
        }
        Ok(SampleSet::new(files))
    }

    /// Same as [`SampleAssets::list`] but degrades to an empty set, which
    /// turns positional fallback URLs into `null`.
    pub async fn list_or_empty(&self) -> SampleSet {
        match self.list().await {
            Ok(set) => set,
            Err(e) => {
                warn!(error = %e, "sample listing failed; using empty sample set");
                SampleSet::default()
            }
        }
    }
}
