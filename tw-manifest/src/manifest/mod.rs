//! Manifest types and parsing for types.toml files.

mod lower;
mod parse;

use indexmap::IndexMap;
pub use parse::{DEFAULT_FILENAME, parse_manifest};
use serde::Deserialize;
use toml::Spanned;
use typewriter_template::PackageType;

/// Root of a types.toml file as written on disk.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestFile {
    #[serde(default)]
    pub types: Vec<TypeDef>,
}

/// One `[[types]]` entry.
///
/// Exactly one of `ty` and `fields` must be set.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDef {
    pub name: Spanned<String>,
    #[serde(default)]
    pub comment: String,
    /// A Go type expression such as `[]string` or `map[string]int`
    #[serde(rename = "type")]
    pub ty: Option<Spanned<String>>,
    pub fields: Option<Vec<FieldDef>>,
    /// Exact object type (Flow)
    #[serde(default)]
    pub strict: bool,
    /// Named types spread into this struct
    #[serde(default)]
    pub embedded: Vec<Spanned<String>>,
    #[serde(default)]
    pub tag: String,
}

/// One `[[types.fields]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDef {
    pub name: Spanned<String>,
    /// Optional when the tag carries a `tw` type override
    #[serde(rename = "type")]
    pub ty: Option<Spanned<String>>,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub comment: String,
}

/// A validated set of package type declarations, in file order.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    types: IndexMap<String, PackageType>,
}

impl Manifest {
    pub fn get(&self, name: &str) -> Option<&PackageType> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Declarations in file order.
    pub fn types(&self) -> impl Iterator<Item = &PackageType> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn into_package_types(self) -> Vec<PackageType> {
        self.types.into_values().collect()
    }
}
