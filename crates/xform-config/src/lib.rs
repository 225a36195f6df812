//! Transform configuration discovery and loading
//!
//! Build-pipeline transforms are configured through the project manifest:
//! the nearest `package.json` above the file being transformed carries an
//! entry named after the transform, holding either the configuration
//! itself or the path of a file to load it from. This crate implements
//! that contract:
//!
//! - **Manifest discovery**: walk a file's directory ancestry for the
//!   nearest manifest, re-reading on every call
//! - **Indirection**: follow a string entry to a JSON file or an
//!   executable that prints JSON
//! - **Direct configuration**: `configure`/`set_config` overrides that
//!   bypass the filesystem entirely
//!
//! # Example
//!
//! ```ignore
//! use xform_config::ConfigResolver;
//!
//! fn example() -> xform_config::Result<()> {
//!     let resolver = ConfigResolver::new("inlinify");
//!     let data = resolver.load("src/index.js")?;
//!     if let Some(config) = &data.config {
//!         println!("configured: {config}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod indirect;
pub mod manifest;
pub mod resolver;

pub use error::{Error, Result};
pub use indirect::{load_config_file, load_config_file_async};
pub use manifest::{DEFAULT_MANIFEST_NAME, ManifestRecord};
pub use resolver::{ConfigData, ConfigResolver, ConfigureOptions};
