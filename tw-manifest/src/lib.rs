//! types.toml parsing and validation for typewriter.
//!
//! A manifest lists package level type declarations, either as a Go type
//! expression or as a struct with fields. Parsing validates names and type
//! expressions and produces [`PackageType`](typewriter_template::PackageType)
//! trees ready to render.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod go_type;
mod manifest;
mod validate;

pub use error::{Error, Result, SourceContext};
pub use go_type::{TypeExprError, parse_go_type};
pub use manifest::{
    DEFAULT_FILENAME, FieldDef, Manifest, ManifestFile, TypeDef, parse_manifest,
};
pub use validate::ParseContext;
