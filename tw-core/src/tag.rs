//! Struct tag parsing.
//!
//! A tag is a string of `key:"value"` pairs, e.g.
//! `json:"name,omitempty" tw:"int64,true"`. Pairs need no separator, and
//! any text between them that is not itself a pair (commas, semicolons, a
//! stray `json "x"`) is skipped. A key is the run of characters right before
//! `:"`, bounded by whitespace, quotes, colons, commas, semicolons or control
//! characters. Quotes inside values cannot be escaped: a value ends at the
//! first `"` after its opening quote, and a value with no closing quote ends
//! the scan.
//!
//! When a key appears more than once, the first occurrence wins.

use thiserror::Error;

/// Tag key carrying the serialized field name.
pub const JSON_KEY: &str = "json";

/// Tag key carrying a type override, `type[,pointer]`.
pub const TYPE_OVERRIDE_KEY: &str = "tw";

/// Errors produced while interpreting tag values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("invalid boolean '{value}' in tag key '{key}'")]
    InvalidBool { key: String, value: String },
}

/// A borrowed, lazily parsed struct tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tag<'a> {
    raw: &'a str,
}

impl<'a> Tag<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self { raw }
    }

    /// The unparsed tag text.
    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Iterate over the well-formed `key:"value"` pairs, in order.
    pub fn pairs(&self) -> Pairs<'a> {
        Pairs { rest: self.raw }
    }

    /// Look up the value of `key`. The first occurrence wins.
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.pairs().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// The display name from the `json` key: everything before the first comma.
    ///
    /// Returns `None` when the key is absent or the name part is empty
    /// (e.g. `json:",omitempty"`).
    pub fn json_name(&self) -> Option<&'a str> {
        self.get(JSON_KEY)
            .and_then(|value| value.split(',').next())
            .filter(|name| !name.is_empty())
    }

    /// The type override from the `tw` key.
    pub fn type_override(&self) -> TypeOverride<'a> {
        let Some(value) = self.get(TYPE_OVERRIDE_KEY) else {
            return TypeOverride::None;
        };

        let parts: Vec<&'a str> = value.split(',').collect();
        match parts[..] {
            [""] => TypeOverride::None,
            [ty] => TypeOverride::Type(ty),
            ["", _] => TypeOverride::Ignored(value),
            [ty, pointer] => TypeOverride::TypeWithPointer { ty, pointer },
            _ => TypeOverride::Ignored(value),
        }
    }
}

/// Iterator over the pairs of a [`Tag`].
#[derive(Debug, Clone)]
pub struct Pairs<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Pairs<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        match parse_pair(self.rest) {
            Some((pair, rest)) => {
                self.rest = rest;
                Some(pair)
            }
            None => {
                self.rest = "";
                None
            }
        }
    }
}

/// Find the next `key:"value"` pair in `s`, returning it with the text after
/// its closing quote.
fn parse_pair(s: &str) -> Option<((&str, &str), &str)> {
    let mut from = 0;
    loop {
        let sep = from + s[from..].find(":\"")?;
        let head = &s[from..sep];
        let key_start = head
            .char_indices()
            .rev()
            .take_while(|&(_, c)| is_key_char(c))
            .last()
            .map_or(head.len(), |(i, _)| i);
        let key = &head[key_start..];

        if key.is_empty() {
            from = sep + 2;
            continue;
        }

        let body = &s[sep + 2..];
        let end = body.find('"')?;
        return Some(((key, &body[..end]), &body[end + 1..]));
    }
}

fn is_key_char(c: char) -> bool {
    !(c.is_whitespace() || c.is_control() || matches!(c, '"' | ':' | ',' | ';'))
}

/// A type override parsed from a `tw` tag value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeOverride<'a> {
    /// No `tw` key, or an empty value.
    None,
    /// `tw:"type"`
    Type(&'a str),
    /// `tw:"type,pointer"`; the pointer flag is not yet validated.
    TypeWithPointer { ty: &'a str, pointer: &'a str },
    /// A value that cannot be applied: too many parts, or an empty type with
    /// a flag (`tw:",true"`). The empty-type case is not turned into a basic
    /// type with an empty name, since a basic type name is never empty; the
    /// field keeps its declared type instead.
    Ignored(&'a str),
}

impl<'a> TypeOverride<'a> {
    /// The overriding type name, if the override applies.
    pub fn ty(&self) -> Option<&'a str> {
        match *self {
            TypeOverride::Type(ty) | TypeOverride::TypeWithPointer { ty, .. } => Some(ty),
            TypeOverride::None | TypeOverride::Ignored(_) => None,
        }
    }

    /// The pointer flag. A missing flag means `false`.
    pub fn pointer(&self) -> Result<bool, TagError> {
        match *self {
            TypeOverride::TypeWithPointer { pointer, .. } => {
                parse_bool(pointer).ok_or_else(|| TagError::InvalidBool {
                    key: TYPE_OVERRIDE_KEY.to_string(),
                    value: pointer.to_string(),
                })
            }
            _ => Ok(false),
        }
    }
}

/// Look up `key` in a raw tag string, returning an empty string when absent.
pub fn get_tag<'a>(key: &str, tags: &'a str) -> &'a str {
    Tag::new(tags).get(key).unwrap_or("")
}

/// Parse a boolean using the spellings Go's `strconv.ParseBool` accepts.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAGS: &str = "json:\"name,omitempty\" tw:\"string\"";

    #[test]
    fn test_get_tag() {
        assert_eq!(get_tag("json", TAGS), "name,omitempty");
        assert_eq!(get_tag("tw", TAGS), "string");
        assert_eq!(get_tag("xyz", TAGS), "");
    }

    #[test]
    fn test_first_key_wins() {
        let tag = Tag::new(r#"json:"first" json:"second""#);
        assert_eq!(tag.get("json"), Some("first"));
    }

    #[test]
    fn test_key_must_match_exactly() {
        let tag = Tag::new(r#"xjson:"nope" json:"yes""#);
        assert_eq!(tag.get("json"), Some("yes"));
        assert_eq!(tag.get("son"), None);
    }

    #[test]
    fn test_pairs_without_separator() {
        let pairs: Vec<_> = Tag::new(r#"a:"1"b:"2""#).pairs().collect();
        assert_eq!(pairs, vec![("a", "1"), ("b", "2")]);
    }

    #[test]
    fn test_unterminated_value_stops_scan() {
        let tag = Tag::new(r#"json:"name tw:"int""#);
        // The json value swallows up to the next quote; the scan then fails.
        assert_eq!(tag.get("json"), Some("name tw:"));
        assert_eq!(tag.get("tw"), None);

        assert_eq!(Tag::new(r#"json:"open"#).get("json"), None);
    }

    #[test]
    fn test_malformed_pair_is_skipped() {
        let tag = Tag::new(r#"json "x" tw:"int64""#);
        assert_eq!(tag.pairs().collect::<Vec<_>>(), vec![("tw", "int64")]);
        assert_eq!(get_tag("tw", r#"json "x" tw:"int64""#), "int64");

        // A colon-quote with no key in front of it is not a pair
        let tag = Tag::new(r#" :"x" tw:"int""#);
        assert_eq!(tag.get("tw"), Some("int"));
    }

    #[test]
    fn test_comma_separated_pairs() {
        let tags = r#"json:"alias",tw:"int64""#;
        assert_eq!(get_tag("json", tags), "alias");
        assert_eq!(get_tag("tw", tags), "int64");
        assert_eq!(
            Tag::new(tags).type_override(),
            TypeOverride::Type("int64")
        );
    }

    #[test]
    fn test_semicolon_separated_pairs() {
        let tags = r#"json:"a";tw:"int64,true""#;
        assert_eq!(get_tag("json", tags), "a");
        assert_eq!(get_tag("tw", tags), "int64,true");

        let pairs: Vec<_> = Tag::new(r#"a:"1"; b:"2" ;c:"3""#).pairs().collect();
        assert_eq!(pairs, vec![("a", "1"), ("b", "2"), ("c", "3")]);
    }

    #[test]
    fn test_empty_tag() {
        assert_eq!(Tag::new("").pairs().count(), 0);
        assert_eq!(Tag::new("   ").get("json"), None);
    }

    #[test]
    fn test_json_name() {
        assert_eq!(
            Tag::new(r#"json:"alias,omitempty""#).json_name(),
            Some("alias")
        );
        assert_eq!(Tag::new(r#"json:"alias""#).json_name(), Some("alias"));
        assert_eq!(Tag::new(r#"json:",omitempty""#).json_name(), None);
        assert_eq!(Tag::new(r#"json:"""#).json_name(), None);
        assert_eq!(Tag::new(r#"tw:"int""#).json_name(), None);
    }

    #[test]
    fn test_type_override_variants() {
        assert_eq!(Tag::new("").type_override(), TypeOverride::None);
        assert_eq!(Tag::new(r#"tw:"""#).type_override(), TypeOverride::None);
        assert_eq!(
            Tag::new(r#"tw:"int64""#).type_override(),
            TypeOverride::Type("int64")
        );
        assert_eq!(
            Tag::new(r#"tw:"int64,true""#).type_override(),
            TypeOverride::TypeWithPointer {
                ty: "int64",
                pointer: "true"
            }
        );
        assert_eq!(
            Tag::new(r#"tw:",true""#).type_override(),
            TypeOverride::Ignored(",true")
        );
        assert_eq!(
            Tag::new(r#"tw:"a,b,c""#).type_override(),
            TypeOverride::Ignored("a,b,c")
        );
    }

    #[test]
    fn test_override_pointer() {
        let ov = Tag::new(r#"tw:"int64,true""#).type_override();
        assert_eq!(ov.ty(), Some("int64"));
        assert_eq!(ov.pointer(), Ok(true));

        let ov = Tag::new(r#"tw:"int64""#).type_override();
        assert_eq!(ov.pointer(), Ok(false));

        let ov = Tag::new(r#"tw:"int64,notabool""#).type_override();
        assert_eq!(ov.ty(), Some("int64"));
        assert_eq!(
            ov.pointer(),
            Err(TagError::InvalidBool {
                key: "tw".to_string(),
                value: "notabool".to_string()
            })
        );

        // An empty flag is not a boolean either
        let ov = Tag::new(r#"tw:"int64,""#).type_override();
        assert!(ov.pointer().is_err());
    }

    #[test]
    fn test_parse_bool() {
        for s in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(parse_bool(s), Some(true), "{s}");
        }
        for s in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(parse_bool(s), Some(false), "{s}");
        }
        for s in ["", "yes", "tRUE", " true"] {
            assert_eq!(parse_bool(s), None, "{s}");
        }
    }
}
