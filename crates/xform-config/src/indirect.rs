//! Config indirection.
//!
//! A manifest entry for a transform is either the configuration itself
//! (inline JSON) or a string naming a file to load it from, relative to
//! the manifest's directory. An indirected file holds JSON, or is an
//! executable program whose stdout is JSON. When configuration comes
//! from an indirected file, relative paths inside it are meant to be
//! resolved against that file's directory, so the resolved data carries
//! the file's directory rather than the manifest's.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{Error, Result};
use crate::manifest::ManifestRecord;
use crate::resolver::ConfigData;

enum Indirection {
    Inline(Option<Value>),
    File(PathBuf),
}

enum Loaded {
    Parsed(Value),
    NeedsExec,
}

/// Resolve the manifest's entry for `name` into configuration data,
/// following one level of file indirection if the entry is a string.
pub fn resolve(record: &ManifestRecord, name: &str) -> Result<ConfigData> {
    match classify(record, name)? {
        Indirection::Inline(config) => Ok(inline_data(record, config)),
        Indirection::File(path) => load_config_file(path),
    }
}

/// Async twin of [`resolve`].
pub async fn resolve_async(record: &ManifestRecord, name: &str) -> Result<ConfigData> {
    match classify(record, name)? {
        Indirection::Inline(config) => Ok(inline_data(record, config)),
        Indirection::File(path) => load_config_file_async(path).await,
    }
}

/// Load configuration from a file directly.
///
/// Files with a `.json` extension must parse as JSON. Anything else is
/// first tried as JSON and otherwise run as a program whose stdout is
/// taken as the configuration.
pub fn load_config_file(path: impl AsRef<Path>) -> Result<ConfigData> {
    let path = absolute_config_path(path.as_ref())?;
    if !path.is_file() {
        return Err(Error::ConfigMissing { path });
    }
    let text = fs::read_to_string(&path).map_err(|source| Error::ConfigRead {
        path: path.clone(),
        source,
    })?;
    let value = match parse_loaded(&path, &text)? {
        Loaded::Parsed(value) => value,
        Loaded::NeedsExec => run_config_script(&path)?,
    };
    Ok(file_data(path, value))
}

/// Async twin of [`load_config_file`].
pub async fn load_config_file_async(path: impl AsRef<Path>) -> Result<ConfigData> {
    let path = absolute_config_path(path.as_ref())?;
    let is_file = tokio::fs::metadata(&path)
        .await
        .map(|meta| meta.is_file())
        .unwrap_or(false);
    if !is_file {
        return Err(Error::ConfigMissing { path });
    }
    let text = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| Error::ConfigRead {
            path: path.clone(),
            source,
        })?;
    let value = match parse_loaded(&path, &text)? {
        Loaded::Parsed(value) => value,
        Loaded::NeedsExec => run_config_script_async(&path).await?,
    };
    Ok(file_data(path, value))
}

fn classify(record: &ManifestRecord, name: &str) -> Result<Indirection> {
    match record.value_for(name) {
        None | Some(Value::Null) => Ok(Indirection::Inline(None)),
        Some(value @ (Value::Object(_) | Value::Array(_))) => {
            Ok(Indirection::Inline(Some(value.clone())))
        }
        Some(Value::String(rel)) => Ok(Indirection::File(record.dir().join(rel))),
        Some(other) => Err(Error::ConfigShape {
            name: name.to_string(),
            path: record.path().to_path_buf(),
            found: json_kind(other),
        }),
    }
}

fn inline_data(record: &ManifestRecord, config: Option<Value>) -> ConfigData {
    ConfigData {
        config,
        config_dir: Some(record.dir().to_path_buf()),
        config_file: None,
    }
}

fn file_data(path: PathBuf, value: Value) -> ConfigData {
    ConfigData {
        config: Some(value),
        config_dir: path.parent().map(Path::to_path_buf),
        config_file: Some(path),
    }
}

fn parse_loaded(path: &Path, text: &str) -> Result<Loaded> {
    if has_json_extension(path) {
        let value = serde_json::from_str(text).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::debug!(?path, "Loaded JSON config");
        return Ok(Loaded::Parsed(value));
    }
    match serde_json::from_str(text) {
        Ok(value) => {
            tracing::debug!(?path, "Loaded JSON config");
            Ok(Loaded::Parsed(value))
        }
        Err(_) => {
            tracing::debug!(?path, "Config is not JSON, running as a script");
            Ok(Loaded::NeedsExec)
        }
    }
}

fn run_config_script(path: &Path) -> Result<Value> {
    let output = std::process::Command::new(path)
        .current_dir(script_dir(path))
        .output()
        .map_err(|source| Error::ConfigExec {
            path: path.to_path_buf(),
            detail: source.to_string(),
        })?;
    script_output(path, output.status.success(), &output.stdout, &output.stderr)
}

async fn run_config_script_async(path: &Path) -> Result<Value> {
    let output = tokio::process::Command::new(path)
        .current_dir(script_dir(path))
        .output()
        .await
        .map_err(|source| Error::ConfigExec {
            path: path.to_path_buf(),
            detail: source.to_string(),
        })?;
    script_output(path, output.status.success(), &output.stdout, &output.stderr)
}

fn script_output(path: &Path, success: bool, stdout: &[u8], stderr: &[u8]) -> Result<Value> {
    if !success {
        return Err(Error::ConfigExec {
            path: path.to_path_buf(),
            detail: String::from_utf8_lossy(stderr).trim().to_string(),
        });
    }
    serde_json::from_slice(stdout).map_err(|e| Error::ConfigExec {
        path: path.to_path_buf(),
        detail: format!("output is not JSON: {e}"),
    })
}

fn script_dir(path: &Path) -> &Path {
    path.parent().unwrap_or(Path::new("."))
}

fn absolute_config_path(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|source| Error::io(path, source))
}

fn has_json_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
