//! Manifest discovery and access.
//!
//! A manifest is the JSON file that anchors a project directory
//! (`package.json` by default). Discovery walks from a starting directory
//! toward the filesystem root and stops at the first directory that
//! contains one. Nothing is cached: every lookup probes the filesystem
//! again, so edits made between lookups are honored.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// File name probed during discovery when the caller does not override it.
pub const DEFAULT_MANIFEST_NAME: &str = "package.json";

/// A parsed manifest together with the place it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestRecord {
    fields: Map<String, Value>,
    dir: PathBuf,
    path: PathBuf,
}

impl ManifestRecord {
    /// Walk from `start_dir` toward the root and load the nearest manifest.
    ///
    /// Returns `Ok(None)` when no ancestor directory contains one. A
    /// manifest that exists but cannot be read or parsed is an error, not
    /// a miss: a broken manifest should surface, not silently widen the
    /// search to an outer project.
    pub fn locate(start_dir: impl AsRef<Path>, manifest_name: &str) -> Result<Option<Self>> {
        let start = absolute_start(start_dir.as_ref())?;
        for dir in start.ancestors() {
            let candidate = dir.join(manifest_name);
            if candidate.is_file() {
                tracing::debug!(path = ?candidate, "Found manifest");
                return Self::read(&candidate, dir).map(Some);
            }
        }
        tracing::debug!(?start, manifest_name, "No manifest in any ancestor");
        Ok(None)
    }

    /// Async twin of [`locate`](Self::locate).
    pub async fn locate_async(
        start_dir: impl AsRef<Path>,
        manifest_name: &str,
    ) -> Result<Option<Self>> {
        let start = absolute_start(start_dir.as_ref())?;
        for dir in start.ancestors() {
            let candidate = dir.join(manifest_name);
            let found = tokio::fs::metadata(&candidate)
                .await
                .map(|meta| meta.is_file())
                .unwrap_or(false);
            if found {
                tracing::debug!(path = ?candidate, "Found manifest");
                let text = tokio::fs::read_to_string(&candidate).await.map_err(|source| {
                    Error::ManifestRead {
                        path: candidate.clone(),
                        source,
                    }
                })?;
                return Self::parse(&text, &candidate, dir).map(Some);
            }
        }
        tracing::debug!(?start, manifest_name, "No manifest in any ancestor");
        Ok(None)
    }

    fn read(path: &Path, dir: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path, dir)
    }

    fn parse(text: &str, path: &Path, dir: &Path) -> Result<Self> {
        let fields: Map<String, Value> =
            serde_json::from_str(text).map_err(|e| Error::ManifestParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Self {
            fields,
            dir: dir.to_path_buf(),
            path: path.to_path_buf(),
        })
    }

    /// Directory the manifest sits in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the manifest file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Top-level entry for `name`, if the manifest has one.
    pub fn value_for(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

fn absolute_start(start_dir: &Path) -> Result<PathBuf> {
    std::path::absolute(start_dir).map_err(|source| Error::io(start_dir, source))
}
