// SPDX-License-Identifier: Apache-2.0

use crate::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const UPLOAD_ID_LEN: usize = 32;
pub const DEFAULT_FILE_EXTENSION: &str = ".bin";
pub const EXTENSION_MAX_LEN: usize = 16;

/// Server-generated upload handle: UUID v4 in 32-char lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct UploadId(String);

impl UploadId {
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let s = input.trim();
        if s.len() != UPLOAD_ID_LEN {
            return Err(ValidationError(format!(
                "upload id must be {UPLOAD_ID_LEN} hex characters"
            )));
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        {
            return Err(ValidationError(
                "upload id must be lowercase hex".to_string(),
            ));
        }
        Ok(Self(s.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UploadId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRecord {
    pub upload_id: UploadId,
    pub files: Vec<PathBuf>,
    pub client_name: Option<String>,
    pub notes: Option<String>,
}

impl UploadRecord {
    #[must_use]
    pub fn new(
        upload_id: UploadId,
        files: Vec<PathBuf>,
        client_name: Option<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            upload_id,
            files,
            client_name,
            notes,
        }
    }
}

/// Filesystem-safe name for a stored blob: `{token}{ext}`.
///
/// Only the final path component of the client filename is considered, and
/// an extension that is not short ASCII alphanumeric falls back to `.bin`.
#[must_use]
pub fn stored_file_name(original: Option<&str>, token: &str) -> String {
    let ext = original
        .and_then(|name| name.rsplit(|c: char| c == '/' || c == '\\').next())
        .map(Path::new)
        .and_then(Path::extension)
        .and_then(|e| e.to_str())
        .filter(|e| {
            !e.is_empty()
                && e.len() <= EXTENSION_MAX_LEN
                && e.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map(|e| format!(".{e}"))
        .unwrap_or_else(|| DEFAULT_FILE_EXTENSION.to_string());
    format!("{token}{ext}")
}
