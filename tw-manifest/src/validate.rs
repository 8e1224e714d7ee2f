//! Validation context and utilities for manifest parsing.

use std::{ops::Range, sync::Arc};

use miette::SourceSpan;
use typewriter_template::TypeNode;

use crate::{
    Result,
    error::SourceContext,
    go_type::{TypeExprError, parse_go_type},
};

/// Parsing and validation context that carries source information.
///
/// Holds the source and the path through the manifest (`["Person",
/// "Name"]`) so nested validation can describe where a problem is.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "types.toml");
/// ctx.validate_name("Person", "type", span)?;
///
/// let nested = ctx.push("Person");
/// nested.validate_name("Name", "field", span)?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    source: Arc<SourceContext>,
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    pub fn src(&self) -> &str {
        self.source.src()
    }

    pub fn filename(&self) -> &str {
        self.source.filename()
    }

    /// Get the source context for error creation.
    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut path = self.path.clone();
        path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Get a context description for error messages.
    ///
    /// For example: "field in 'Person'" or just "type" if no path.
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Validate that a name is a usable identifier.
    pub fn validate_name(&self, name: &str, kind: &str, span: Range<usize>) -> Result<()> {
        let span = string_body(self.src(), span);

        if is_go_keyword(name) {
            return Err(self.source.reserved_keyword_error(
                name,
                self.context_for(kind),
                Some(span),
            ));
        }

        if let Some(reason) = validate_identifier(name) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                Some(span),
            ));
        }

        Ok(())
    }

    /// Parse a Go type expression, pointing diagnostics into the TOML string.
    pub fn parse_type(&self, expr: &str, span: Range<usize>) -> Result<TypeNode> {
        parse_go_type(expr).map_err(|TypeExprError { message, offset, len }| {
            let start = string_body(self.src(), span).offset() + offset;
            self.source
                .type_expr_error(expr, message, SourceSpan::from((start, len)))
        })
    }
}

/// Go reserved keywords that cannot name a type or field
/// Source: https://go.dev/ref/spec#Keywords
pub(crate) const GO_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

pub(crate) fn is_go_keyword(name: &str) -> bool {
    GO_KEYWORDS.contains(&name)
}

/// Span of the text inside a quoted TOML string, given the span of the
/// whole string token.
pub(crate) fn string_body(src: &str, span: Range<usize>) -> SourceSpan {
    let token = src.get(span.clone()).unwrap_or_default();
    let quote = if token.starts_with("\"\"\"") || token.starts_with("'''") {
        3
    } else if token.starts_with(['"', '\'']) {
        1
    } else {
        0
    };
    let len = span.len().saturating_sub(2 * quote);
    SourceSpan::from((span.start + quote, len))
}

/// Validate that a name is an identifier.
/// Returns None if valid, Some(reason) if invalid
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if chars.any(|c| !(c.is_ascii_alphanumeric() || c == '_')) {
        return Some("name must contain only letters, numbers, and underscores");
    }

    None
}
