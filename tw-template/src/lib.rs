//! Fragment-based type declaration renderer for typewriter.
//!
//! A type tree ([`PackageType`] at the root, built from [`TypeNode`]s) is
//! rendered by walking it depth first and executing a small per-language
//! template fragment at each step. Fragments come from a
//! [`FragmentResolver`]: the built-in set, a directory on disk, or an
//! in-memory [`FragmentSet`].
//!
//! ```ignore
//! use typewriter_core::Language;
//! use typewriter_template::{Basic, BuiltinFragments, Field, PackageType, Struct, render_to_string};
//!
//! let person = PackageType::new(
//!     "Person",
//!     Struct::new(vec![Field::new("Name", Basic::new("string")).tag(r#"json:"name""#)]),
//! );
//! let flow = render_to_string(&person, &BuiltinFragments, &Language::Flow)?;
//! ```
//!
//! # Module Organization
//!
//! - [`node`] - The type tree
//! - [`fragment`] - Fragment names and parsed fragments
//! - [`resolver`] - Fragment lookup (directory, in-memory, overlay)
//! - [`render`] - The recursive renderer and the header/raw helpers

mod builtin;
mod document;
mod error;
mod filters;

pub mod fragment;
pub mod node;
pub mod render;
pub mod resolver;

pub use builtin::{BuiltinFragments, builtin_text};
pub use document::{document_to_string, render_document};
pub use error::{Error, Result};
pub use fragment::{Fragment, FragmentName};
pub use node::{Array, Basic, Field, FieldView, Map, PackageType, Struct, TypeNode};
pub use render::{Render, RenderContext, render, render_header, render_raw, render_to_string};
pub use resolver::{FragmentDir, FragmentResolver, FragmentSet, Overlay};
