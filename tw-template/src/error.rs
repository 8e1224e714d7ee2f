use std::path::PathBuf;

use thiserror::Error;
use typewriter_core::Language;

use crate::fragment::FragmentName;

/// Result type for rendering operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a render call.
///
/// Output already written to the sink is left in place; callers decide
/// whether to discard a partial declaration.
#[derive(Debug, Error)]
pub enum Error {
    #[error("fragment '{fragment}' not found for language '{language}'")]
    FragmentNotFound {
        language: Language,
        fragment: FragmentName,
    },

    #[error("failed to read fragment file '{path}'")]
    FragmentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse fragment '{fragment}' for language '{language}'")]
    FragmentParse {
        language: Language,
        fragment: FragmentName,
        #[source]
        source: tera::Error,
    },

    #[error("failed to execute fragment '{fragment}' for language '{language}'")]
    FragmentExecute {
        language: Language,
        fragment: FragmentName,
        #[source]
        source: tera::Error,
    },

    #[error("type not stored in declaration '{name}'")]
    MissingType { name: String },

    #[error("failed to parse raw fragment")]
    RawFragmentParse(#[source] tera::Error),

    #[error("failed to execute raw fragment")]
    RawFragmentExecute(#[source] tera::Error),

    #[error("failed to write rendered output")]
    Write(#[from] std::io::Error),
}

impl Error {
    /// Whether this error means a fragment could not be located.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::FragmentNotFound { .. })
    }
}
