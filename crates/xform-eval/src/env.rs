//! The fixed bindings available while reducing an argument.

use std::path::Path;

/// Ambient bindings for one evaluation: the two current-file strings and
/// the identifier recognized as the path-join namespace.
///
/// Constant for the lifetime of an evaluation call. Building one is cheap
/// and done once per transformed file.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalEnv {
    file: String,
    dir: String,
    join_alias: String,
}

impl EvalEnv {
    /// Identifier bound to the path of the file being transformed.
    pub const FILE_BINDING: &'static str = "__filename";
    /// Identifier bound to the directory of the file being transformed.
    pub const DIR_BINDING: &'static str = "__dirname";
    /// Default name of the path-join namespace.
    pub const DEFAULT_JOIN_ALIAS: &'static str = "path";

    /// Environment for the file currently being transformed.
    ///
    /// `file` should be absolute so the ambient bindings are; the
    /// directory binding is its parent component (`"."` for a bare file
    /// name).
    pub fn for_file(file: impl AsRef<Path>) -> Self {
        let file = file.as_ref();
        let dir = match file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                parent.to_string_lossy().into_owned()
            }
            _ => ".".to_string(),
        };
        Self {
            file: file.to_string_lossy().into_owned(),
            dir,
            join_alias: Self::DEFAULT_JOIN_ALIAS.to_string(),
        }
    }

    /// Recognize `alias.join(..)` instead of `path.join(..)`, for sources
    /// that bind the join helper under another name.
    pub fn with_join_alias(mut self, alias: impl Into<String>) -> Self {
        self.join_alias = alias.into();
        self
    }

    /// Value of the current-file binding.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Value of the current-directory binding.
    pub fn dir(&self) -> &str {
        &self.dir
    }

    /// Identifier recognized as the path-join namespace.
    pub fn join_alias(&self) -> &str {
        &self.join_alias
    }
}
