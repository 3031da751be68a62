// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Uploaded file storage on the local filesystem.

use hmhy_api::ApiError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::UploadSettings;

/// Largest accepted request body: the video ceiling plus room for the
/// multipart framing.
pub const UPLOAD_BODY_LIMIT: usize = 51 * 1024 * 1024;

/// Writes uploads under a directory and addresses them by URL.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
    mount_path: String,
    url_prefix: String,
}

/// Extension of `original_name` including the dot, or empty.
fn extension(original_name: &str) -> String {
    Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}

impl LocalFileStore {
    /// # Arguments
    ///
    /// * `root` - Directory receiving the files
    /// * `settings` - Base URL and upload directory name used in locators
    #[must_use]
    pub fn new(root: PathBuf, settings: &UploadSettings) -> Self {
        Self {
            root,
            mount_path: format!("/{}", settings.upload_dir),
            url_prefix: format!("{}/{}/", settings.base_url, settings.upload_dir),
        }
    }

    /// Directory holding the stored files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Route prefix the stored files are served under, `/{upload_dir}`.
    #[must_use]
    pub fn mount_path(&self) -> &str {
        &self.mount_path
    }

    /// Creates the upload directory if it is missing.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be created.
    pub async fn ensure_root(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Stores `bytes` under a fresh name and returns its locator,
    /// `{base_url}/{upload_dir}/{uuid}{ext}`.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the file cannot be written.
    pub async fn write(&self, bytes: &[u8], original_name: &str) -> Result<String, ApiError> {
        let file_name: String = format!("{}{}", Uuid::new_v4(), extension(original_name));
        let path: PathBuf = self.root.join(&file_name);

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| ApiError::Internal {
                message: format!("File write error: {e}"),
            })?;

        info!(file = %file_name, size = bytes.len(), "Stored upload");
        Ok(format!("{}{file_name}", self.url_prefix))
    }

    /// Removes the file a locator points to.
    ///
    /// Locators from another origin, names that would escape the upload
    /// directory and already missing files are ignored.
    ///
    /// # Errors
    ///
    /// Returns an internal error if an existing file cannot be removed.
    pub async fn delete(&self, locator: &str) -> Result<(), ApiError> {
        let Some(file_name) = self.file_name(locator) else {
            debug!(%locator, "Ignoring foreign file locator");
            return Ok(());
        };

        match tokio::fs::remove_file(self.root.join(file_name)).await {
            Ok(()) => {
                info!(file = %file_name, "Deleted upload");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(file = %file_name, "Upload already gone");
                Ok(())
            }
            Err(e) => Err(ApiError::Internal {
                message: format!("File deletion error: {e}"),
            }),
        }
    }

    /// The file name a locator refers to, if it is one of ours.
    fn file_name<'a>(&self, locator: &'a str) -> Option<&'a str> {
        locator
            .strip_prefix(self.url_prefix.as_str())
            .filter(|name| {
                !name.is_empty() && !name.contains(['/', '\\']) && !name.starts_with('.')
            })
    }
}
