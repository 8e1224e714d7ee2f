//! Core utilities and types for the typewriter type generator.
//!
//! This crate provides fundamental types used across the typewriter
//! crates: target languages, struct tag parsing and type mapping.

mod file;
mod language;
pub mod tag;
mod type_mapper;

// File operations
pub use file::{File, Overwrite, WriteResult};
// Fundamental types
pub use language::Language;
pub use tag::{Tag, TagError, TypeOverride, get_tag};
pub use type_mapper::{BasicType, FlowTypeMapper, TypeMapper, TypeScriptTypeMapper};
