//! Type mapping between Go basic types and language-specific types.

use crate::language::Language;

/// Go basic types that have a known spelling in every target language.
///
/// Anything else (user-defined types, qualified names other than
/// `time.Time`) is passed through unchanged by the mappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicType {
    String,
    Bool,
    Int,
    Float,
    Byte,
    Rune,
    Any,
    Time,
}

impl BasicType {
    /// Recognize a Go type name.
    pub fn from_go(name: &str) -> Option<Self> {
        let ty = match name {
            "string" => BasicType::String,
            "bool" => BasicType::Bool,
            "int" | "int8" | "int16" | "int32" | "int64" | "uint" | "uint8" | "uint16"
            | "uint32" | "uint64" | "uintptr" => BasicType::Int,
            "float32" | "float64" => BasicType::Float,
            "byte" => BasicType::Byte,
            "rune" => BasicType::Rune,
            "interface{}" | "any" => BasicType::Any,
            "time.Time" => BasicType::Time,
            _ => return None,
        };
        Some(ty)
    }
}

/// Trait for mapping Go types to language-specific type strings.
///
/// Implement this trait for each target language to provide type mappings.
pub trait TypeMapper: Sync {
    /// The target language
    fn language(&self) -> Language;

    /// Map a recognized basic type to a language-specific type string
    fn map_basic(&self, ty: BasicType) -> &'static str;

    /// Map any Go type name, passing unknown names through unchanged
    fn map_type<'a>(&self, go_type: &'a str) -> &'a str {
        match BasicType::from_go(go_type) {
            Some(ty) => self.map_basic(ty),
            None => go_type,
        }
    }
}

/// Flow type mapper implementation
pub struct FlowTypeMapper;

impl TypeMapper for FlowTypeMapper {
    fn language(&self) -> Language {
        Language::Flow
    }

    fn map_basic(&self, ty: BasicType) -> &'static str {
        match ty {
            BasicType::String => "string",
            BasicType::Bool => "boolean",
            BasicType::Int | BasicType::Float | BasicType::Byte | BasicType::Rune => "number",
            BasicType::Any => "any",
            BasicType::Time => "string",
        }
    }
}

/// TypeScript type mapper implementation
pub struct TypeScriptTypeMapper;

impl TypeMapper for TypeScriptTypeMapper {
    fn language(&self) -> Language {
        Language::TypeScript
    }

    fn map_basic(&self, ty: BasicType) -> &'static str {
        match ty {
            BasicType::String => "string",
            BasicType::Bool => "boolean",
            BasicType::Int | BasicType::Float | BasicType::Byte | BasicType::Rune => "number",
            BasicType::Any => "unknown",
            BasicType::Time => "string",
        }
    }
}
