//! Transform configuration resolution.
//!
//! A [`ConfigResolver`] is built once per transform and asked for
//! configuration per file. Resolution walks the file's directory
//! ancestry for a manifest and follows one level of file indirection,
//! unless configuration was supplied directly, in which case the
//! filesystem is never touched.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::indirect;
use crate::manifest::{DEFAULT_MANIFEST_NAME, ManifestRecord};

/// Resolved configuration handed to a transform.
///
/// `config_dir` is the directory relative paths inside the configuration
/// should be resolved against: the manifest's directory for inline
/// configuration, or the indirected file's directory when the manifest
/// pointed elsewhere.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigData {
    pub config: Option<Value>,
    pub config_dir: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
}

impl ConfigData {
    /// Whether any configuration value was found.
    pub fn has_config(&self) -> bool {
        self.config.is_some()
    }

    /// Deserialize the configuration value into a concrete type.
    ///
    /// Returns `Ok(None)` when there is no configuration at all; a value
    /// that exists but does not fit `T` is a deserialization error.
    pub fn typed_config<T: DeserializeOwned>(&self) -> serde_json::Result<Option<T>> {
        self.config.clone().map(serde_json::from_value).transpose()
    }
}

/// Options accepted when supplying configuration directly.
#[derive(Debug, Clone, Default)]
pub struct ConfigureOptions {
    /// Path the supplied configuration nominally came from.
    pub config_file: Option<PathBuf>,
    /// Base directory for relative paths; wins over the directory
    /// derived from `config_file`.
    pub config_dir: Option<PathBuf>,
}

/// Per-transform configuration resolver.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    transform_name: String,
    manifest_name: String,
    supplied: Option<ConfigData>,
}

impl ConfigResolver {
    /// Create a resolver for the named transform, using the default
    /// manifest file name.
    pub fn new(transform_name: impl Into<String>) -> Self {
        Self {
            transform_name: transform_name.into(),
            manifest_name: DEFAULT_MANIFEST_NAME.to_string(),
            supplied: None,
        }
    }

    /// Use a different manifest file name during discovery.
    pub fn with_manifest_name(mut self, manifest_name: impl Into<String>) -> Self {
        self.manifest_name = manifest_name.into();
        self
    }

    /// Name of the transform this resolver serves.
    pub fn transform_name(&self) -> &str {
        &self.transform_name
    }

    /// Manifest file name probed during discovery.
    pub fn manifest_name(&self) -> &str {
        &self.manifest_name
    }

    /// Resolve configuration for `file`, the file being transformed.
    ///
    /// Directly supplied configuration short-circuits the lookup. With
    /// no supplied configuration, the nearest manifest decides; having
    /// no manifest at all yields empty [`ConfigData`], not an error.
    pub fn load(&self, file: impl AsRef<Path>) -> Result<ConfigData> {
        if let Some(supplied) = &self.supplied {
            tracing::debug!(transform = %self.transform_name, "Using supplied config");
            return Ok(supplied.clone());
        }
        let start = start_dir(file.as_ref())?;
        match ManifestRecord::locate(&start, &self.manifest_name)? {
            Some(record) => indirect::resolve(&record, &self.transform_name),
            None => Ok(ConfigData::default()),
        }
    }

    /// Async twin of [`load`](Self::load).
    pub async fn load_async(&self, file: impl AsRef<Path>) -> Result<ConfigData> {
        if let Some(supplied) = &self.supplied {
            tracing::debug!(transform = %self.transform_name, "Using supplied config");
            return Ok(supplied.clone());
        }
        let start = start_dir(file.as_ref())?;
        match ManifestRecord::locate_async(&start, &self.manifest_name).await? {
            Some(record) => indirect::resolve_async(&record, &self.transform_name).await,
            None => Ok(ConfigData::default()),
        }
    }

    /// Return a new resolver that always answers with `config`.
    ///
    /// The receiver is left untouched and keeps its manifest-driven
    /// behavior.
    pub fn configure(&self, config: Value, options: ConfigureOptions) -> Self {
        Self {
            transform_name: self.transform_name.clone(),
            manifest_name: self.manifest_name.clone(),
            supplied: Some(supplied_data(config, options)),
        }
    }

    /// Replace this resolver's stored configuration in place.
    pub fn set_config(&mut self, config: Value, options: ConfigureOptions) {
        self.supplied = Some(supplied_data(config, options));
    }
}

fn supplied_data(config: Value, options: ConfigureOptions) -> ConfigData {
    let config_dir = options.config_dir.or_else(|| {
        options
            .config_file
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
    });
    ConfigData {
        config: Some(config),
        config_dir,
        config_file: options.config_file,
    }
}

fn start_dir(file: &Path) -> Result<PathBuf> {
    let file = std::path::absolute(file).map_err(|source| Error::io(file, source))?;
    Ok(match file.parent() {
        Some(parent) => parent.to_path_buf(),
        None => file,
    })
}
