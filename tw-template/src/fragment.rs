//! Named, per-language template fragments.
//!
//! A fragment is a small Tera template. Fragments are parsed on every
//! resolution and hold no state between executions.

use std::{fmt, io::Write};

use serde::Serialize;
use tera::{Context, Tera};
use typewriter_core::Language;

use crate::{Error, Result, filters};

/// Name the single template is registered under inside a fragment's engine.
const TEMPLATE: &str = "fragment";

/// The closed set of fragment names every language provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentName {
    Header,
    Declaration,
    Basic,
    MapKey,
    MapValue,
    MapClose,
    ArrayOpen,
    ArrayClose,
    StructOpen,
    StructClose,
    FieldName,
    FieldClose,
    Comment,
}

impl FragmentName {
    pub const ALL: [FragmentName; 13] = [
        FragmentName::Header,
        FragmentName::Declaration,
        FragmentName::Basic,
        FragmentName::MapKey,
        FragmentName::MapValue,
        FragmentName::MapClose,
        FragmentName::ArrayOpen,
        FragmentName::ArrayClose,
        FragmentName::StructOpen,
        FragmentName::StructClose,
        FragmentName::FieldName,
        FragmentName::FieldClose,
        FragmentName::Comment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FragmentName::Header => "header",
            FragmentName::Declaration => "declaration",
            FragmentName::Basic => "basic",
            FragmentName::MapKey => "map_key",
            FragmentName::MapValue => "map_value",
            FragmentName::MapClose => "map_close",
            FragmentName::ArrayOpen => "array_open",
            FragmentName::ArrayClose => "array_close",
            FragmentName::StructOpen => "struct_open",
            FragmentName::StructClose => "struct_close",
            FragmentName::FieldName => "field_name",
            FragmentName::FieldClose => "field_close",
            FragmentName::Comment => "comment",
        }
    }

    /// File name of this fragment inside a language directory.
    pub fn file_name(&self) -> String {
        format!("{}.tmpl", self.as_str())
    }
}

impl fmt::Display for FragmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Build a template engine with the typewriter filters and no autoescaping.
pub(crate) fn engine() -> Tera {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    filters::register(&mut tera);
    tera
}

/// A parsed fragment, ready to execute against a context.
pub struct Fragment {
    language: Language,
    name: FragmentName,
    tera: Tera,
}

impl Fragment {
    /// Parse fragment text for the given language and name.
    pub fn parse(language: &Language, name: FragmentName, text: &str) -> Result<Self> {
        let mut tera = engine();
        tera.add_raw_template(TEMPLATE, text)
            .map_err(|source| Error::FragmentParse {
                language: language.clone(),
                fragment: name,
                source,
            })?;

        Ok(Self {
            language: language.clone(),
            name,
            tera,
        })
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn name(&self) -> FragmentName {
        self.name
    }

    /// Execute with a serializable node as the context, writing to `out`.
    ///
    /// The context must serialize to a map; its keys become template variables.
    pub fn execute<C: Serialize + ?Sized>(&self, context: &C, out: &mut dyn Write) -> Result<()> {
        let context = Context::from_serialize(context).map_err(|e| self.execute_error(e))?;
        self.write(&context, out)
    }

    /// Execute with an empty context.
    pub fn execute_bare(&self, out: &mut dyn Write) -> Result<()> {
        self.write(&Context::new(), out)
    }

    fn write(&self, context: &Context, out: &mut dyn Write) -> Result<()> {
        self.tera
            .render_to(TEMPLATE, context, out)
            .map_err(|e| self.execute_error(e))
    }

    fn execute_error(&self, source: tera::Error) -> Error {
        Error::FragmentExecute {
            language: self.language.clone(),
            fragment: self.name,
            source,
        }
    }
}

impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fragment")
            .field("language", &self.language)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn run(text: &str, context: serde_json::Value) -> String {
        let fragment = Fragment::parse(&Language::Flow, FragmentName::Basic, text).unwrap();
        let mut out = Vec::new();
        fragment.execute(&context, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_substitution() {
        assert_eq!(run("{{ Type }}", json!({"Type": "string"})), "string");
    }

    #[test]
    fn test_no_html_escaping() {
        assert_eq!(
            run("{{ Type }}", json!({"Type": "Array<string>"})),
            "Array<string>"
        );
    }

    #[test]
    fn test_conditionals() {
        let text = "{% if Pointer %}?{% endif %}{{ Type }}";
        assert_eq!(run(text, json!({"Type": "T", "Pointer": true})), "?T");
        assert_eq!(run(text, json!({"Type": "T", "Pointer": false})), "T");
    }

    #[test]
    fn test_execute_bare() {
        let fragment = Fragment::parse(&Language::Flow, FragmentName::FieldClose, ", ").unwrap();
        let mut out = Vec::new();
        fragment.execute_bare(&mut out).unwrap();
        assert_eq!(out, b", ");
    }

    #[test]
    fn test_parse_error() {
        let err =
            Fragment::parse(&Language::TypeScript, FragmentName::Comment, "{% if %}").unwrap_err();
        assert!(matches!(
            err,
            Error::FragmentParse {
                language: Language::TypeScript,
                fragment: FragmentName::Comment,
                ..
            }
        ));
    }

    #[test]
    fn test_execute_error_on_undefined_variable() {
        let fragment =
            Fragment::parse(&Language::Flow, FragmentName::Basic, "{{ Missing }}").unwrap();
        let mut out = Vec::new();
        let err = fragment.execute(&json!({}), &mut out).unwrap_err();
        assert!(matches!(err, Error::FragmentExecute { .. }));
    }

    #[test]
    fn test_file_names() {
        assert_eq!(FragmentName::MapKey.file_name(), "map_key.tmpl");
        assert_eq!(FragmentName::ALL.len(), 13);
    }
}
