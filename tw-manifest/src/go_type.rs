//! Parser for the Go type expressions accepted in `types.toml`.
//!
//! Supported forms: `Name`, `pkg.Name`, `*T`, `[]T`, `[N]T`, `map[K]V` and
//! `interface{}`. Whitespace between tokens is allowed.

use thiserror::Error;
use typewriter_template::{Array, Basic, Map, TypeNode};

/// A malformed type expression. `offset` and `len` are byte positions in
/// the parsed text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TypeExprError {
    pub message: String,
    pub offset: usize,
    pub len: usize,
}

/// Parse a Go type expression into a type tree.
///
/// A pointer marks a basic type as nullable. On composite types the pointer
/// has no representation and is dropped.
pub fn parse_go_type(src: &str) -> Result<TypeNode, TypeExprError> {
    let mut parser = Parser { src, pos: 0 };
    let ty = parser.parse_type()?;
    parser.skip_ws();
    if parser.pos < src.len() {
        return Err(TypeExprError {
            message: "unexpected trailing input".to_string(),
            offset: parser.pos,
            len: src.len() - parser.pos,
        });
    }
    Ok(ty)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn skip_ws(&mut self) {
        self.pos = self.src.len() - self.rest().trim_start().len();
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_ws();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> Result<(), TypeExprError> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(format!("expected '{token}'")))
        }
    }

    /// An error pointing at the next character.
    fn error(&self, message: impl Into<String>) -> TypeExprError {
        TypeExprError {
            message: message.into(),
            offset: self.pos,
            len: self.rest().chars().next().map_or(0, char::len_utf8),
        }
    }

    fn ident(&mut self) -> Option<&'a str> {
        self.skip_ws();
        let rest = self.rest();
        let mut chars = rest.char_indices();
        match chars.next() {
            Some((_, c)) if c == '_' || c.is_alphabetic() => {}
            _ => return None,
        }
        let end = chars
            .find(|&(_, c)| !(c == '_' || c.is_alphanumeric()))
            .map_or(rest.len(), |(i, _)| i);
        self.pos += end;
        Some(&rest[..end])
    }

    fn parse_type(&mut self) -> Result<TypeNode, TypeExprError> {
        if self.eat("*") {
            return Ok(match self.parse_type()? {
                TypeNode::Basic(basic) => basic.pointer().into(),
                other => other,
            });
        }

        if self.eat("[") {
            if !self.eat("]") {
                self.array_len()?;
                self.expect("]")?;
            }
            return Ok(Array::new(self.parse_type()?).into());
        }

        self.skip_ws();
        let start = self.pos;
        let Some(name) = self.ident() else {
            return Err(self.error("expected a type"));
        };

        match name {
            "map" => {
                self.expect("[")?;
                let key = self.parse_type()?;
                self.expect("]")?;
                let value = self.parse_type()?;
                Ok(Map::new(key, value).into())
            }
            "interface" => {
                self.expect("{")?;
                self.expect("}")?;
                Ok(Basic::new("interface{}").into())
            }
            "struct" | "func" | "chan" => Err(TypeExprError {
                message: format!("{name} types are not supported, declare a named type instead"),
                offset: start,
                len: name.len(),
            }),
            _ if self.rest().starts_with('.') => {
                self.pos += 1;
                match self.ident() {
                    Some(selector) => Ok(Basic::new(format!("{name}.{selector}")).into()),
                    None => Err(self.error("expected a name after '.'")),
                }
            }
            _ => Ok(Basic::new(name).into()),
        }
    }

    /// Array length: a decimal literal or a named constant.
    fn array_len(&mut self) -> Result<(), TypeExprError> {
        self.skip_ws();
        let digits = self
            .rest()
            .bytes()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits > 0 {
            self.pos += digits;
            return Ok(());
        }
        match self.ident() {
            Some(_) => Ok(()),
            None => Err(self.error("expected an array length")),
        }
    }
}
