// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transient invoice files.
//!
//! An artifact exists only between rendering and dispatch. Each write gets
//! its own path so a regenerated invoice never collides with one that a
//! pipeline worker is still mailing for the same order.

use crate::error::ArtifactError;
use pillora_domain::OrderNumber;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

static ARTIFACT_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Returns the filename presented to recipients for an order's invoice.
#[must_use]
pub fn attachment_filename(order_number: &OrderNumber) -> String {
    format!("invoice-{order_number}.txt")
}

/// Directory that holds transient artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    #[must_use]
    pub const fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes an invoice document, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    pub async fn write(
        &self,
        order_number: &OrderNumber,
        contents: &str,
    ) -> Result<InvoiceArtifact, ArtifactError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| ArtifactError::CreateDir {
                path: self.dir.display().to_string(),
                source,
            })?;

        let sequence: u64 = ARTIFACT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        let path: PathBuf = self
            .dir
            .join(format!("invoice-{order_number}-{sequence}.txt"));

        tokio::fs::write(&path, contents)
            .await
            .map_err(|source| ArtifactError::Write {
                path: path.display().to_string(),
                source,
            })?;
        debug!(path = %path.display(), "Wrote invoice artifact");

        Ok(InvoiceArtifact {
            path,
            filename: attachment_filename(order_number),
            removed: false,
        })
    }
}

/// A written invoice file. Removed on `remove`, or on drop as a fallback.
#[derive(Debug)]
pub struct InvoiceArtifact {
    path: PathBuf,
    filename: String,
    removed: bool,
}

impl InvoiceArtifact {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The filename presented to recipients.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Reads the artifact back.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub async fn read(&self) -> Result<Vec<u8>, ArtifactError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|source| ArtifactError::Read {
                path: self.path.display().to_string(),
                source,
            })
    }

    /// Deletes the artifact. A file that is already gone counts as removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists and cannot be deleted.
    pub async fn remove(mut self) -> Result<(), ArtifactError> {
        self.removed = true;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(ArtifactError::Remove {
                path: self.path.display().to_string(),
                source,
            }),
        }
    }
}

impl Drop for InvoiceArtifact {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        if let Err(e) = std::fs::remove_file(&self.path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            warn!(path = %self.path.display(), error = %e, "Failed to remove invoice artifact");
        }
    }
}
