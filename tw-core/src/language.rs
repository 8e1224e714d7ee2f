//! Target languages for type generation.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::type_mapper::{FlowTypeMapper, TypeMapper, TypeScriptTypeMapper};

/// Target languages.
///
/// Flow and TypeScript ship with built-in fragments. Any other language is
/// [`Language::Custom`] and renders only from a fragment directory holding
/// a `{identifier}/` subdirectory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    /// Flow type annotations for JavaScript
    Flow,
    /// TypeScript
    TypeScript,
    /// A language without built-in fragments, named by its fragment directory
    Custom(String),
}

impl Language {
    /// Every built-in language, in display order.
    pub const ALL: [Language; 2] = [Language::Flow, Language::TypeScript];

    /// Returns the language identifier.
    ///
    /// This is also the directory name fragments are looked up under.
    pub fn as_str(&self) -> &str {
        match self {
            Language::Flow => "flow",
            Language::TypeScript => "typescript",
            Language::Custom(id) => id,
        }
    }

    /// File extension for generated files, without the dot.
    ///
    /// A custom language uses its identifier.
    pub fn extension(&self) -> &str {
        match self {
            Language::Flow => "js",
            Language::TypeScript => "ts",
            Language::Custom(id) => id,
        }
    }

    pub fn is_builtin(&self) -> bool {
        !matches!(self, Language::Custom(_))
    }

    /// Type mapper translating Go basic types into this language, if it has one.
    pub fn type_mapper(&self) -> Option<&'static dyn TypeMapper> {
        match self {
            Language::Flow => Some(&FlowTypeMapper),
            Language::TypeScript => Some(&TypeScriptTypeMapper),
            Language::Custom(_) => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    /// Built-in names and their extensions match case-insensitively. Anything
    /// else made of ASCII letters, digits, `_` and `-` names a custom language.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "flow" | "js" => Ok(Language::Flow),
            "typescript" | "ts" => Ok(Language::TypeScript),
            _ if is_identifier(s) => Ok(Language::Custom(s.to_string())),
            _ => Err(format!(
                "invalid language '{}', expected 'flow', 'typescript' or a fragment directory name",
                s
            )),
        }
    }
}

impl TryFrom<String> for Language {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        match language {
            Language::Custom(id) => id,
            builtin => builtin.as_str().to_string(),
        }
    }
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
