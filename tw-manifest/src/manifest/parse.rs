//! Manifest parsing from files and strings.

use std::{path::Path, str::FromStr};

use super::{Manifest, ManifestFile, lower::lower_manifest};
use crate::{Error, Result, validate::ParseContext};

/// Filename used in diagnostics when parsing from a string.
pub const DEFAULT_FILENAME: &str = "types.toml";

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, DEFAULT_FILENAME)
    }
}

impl Manifest {
    /// Parse a types.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a types.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse and validate a manifest with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let ctx = ParseContext::new(content, filename);
    let file: ManifestFile =
        toml::from_str(content).map_err(|e| ctx.source_context().parse_error(e))?;
    lower_manifest(&file, &ctx)
}
