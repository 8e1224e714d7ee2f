//! The type tree.
//!
//! Every node serializes with PascalCase keys; those keys are the variables
//! fragments see (`Name`, `Type`, `Pointer`, `Fields`, ...).

use std::borrow::Cow;

use serde::Serialize;
use typewriter_core::{Tag, TypeOverride};

/// A node that can appear in a type position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "Kind")]
pub enum TypeNode {
    Basic(Basic),
    Map(Map),
    Array(Array),
    Struct(Struct),
}

impl From<Basic> for TypeNode {
    fn from(value: Basic) -> Self {
        TypeNode::Basic(value)
    }
}

impl From<Map> for TypeNode {
    fn from(value: Map) -> Self {
        TypeNode::Map(value)
    }
}

impl From<Array> for TypeNode {
    fn from(value: Array) -> Self {
        TypeNode::Array(value)
    }
}

impl From<Struct> for TypeNode {
    fn from(value: Struct) -> Self {
        TypeNode::Struct(value)
    }
}

/// A basic type: ints, strings, bools, or a named custom type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Basic {
    #[serde(rename = "Type")]
    pub ty: String,
    pub pointer: bool,
}

impl Basic {
    pub fn new(ty: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            pointer: false,
        }
    }

    /// Mark the type as a pointer (nullable in most targets).
    pub fn pointer(mut self) -> Self {
        self.pointer = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Map {
    pub key: Box<TypeNode>,
    pub value: Box<TypeNode>,
}

impl Map {
    pub fn new(key: impl Into<TypeNode>, value: impl Into<TypeNode>) -> Self {
        Self {
            key: Box::new(key.into()),
            value: Box::new(value.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Array {
    #[serde(rename = "Type")]
    pub ty: Box<TypeNode>,
}

impl Array {
    pub fn new(ty: impl Into<TypeNode>) -> Self {
        Self {
            ty: Box::new(ty.into()),
        }
    }
}

/// A struct: an ordered list of fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Struct {
    pub fields: Vec<Field>,
    /// Exact object types; only Flow distinguishes them.
    pub strict: bool,
    /// Names of embedded types, spread into the struct.
    pub embedded: Vec<String>,
}

impl Struct {
    pub fn new(fields: Vec<Field>) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    pub fn embed(mut self, name: impl Into<String>) -> Self {
        self.embedded.push(name.into());
        self
    }
}

/// A struct field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Field {
    pub name: String,
    #[serde(rename = "Type")]
    pub ty: Option<TypeNode>,
    pub comment: String,
    pub tag: String,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeNode>) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty.into()),
            comment: String::new(),
            tag: String::new(),
        }
    }

    /// A field without a declared type; it needs a `tw` override to render.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            comment: String::new(),
            tag: String::new(),
        }
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// The name fragments see: the `json` tag name if present, else the field name.
    pub fn display_name(&self) -> &str {
        Tag::new(&self.tag).json_name().unwrap_or(&self.name)
    }

    /// The fragment context for this field, carrying its effective type.
    pub fn view(&self) -> FieldView<'_> {
        FieldView {
            name: self.display_name(),
            comment: &self.comment,
            ty: self.effective_type(),
            tag: &self.tag,
        }
    }

    /// The type to render: the `tw` override if one applies, else the declared type.
    ///
    /// A malformed pointer flag is logged and read as `false`; the type
    /// override still applies.
    pub fn effective_type(&self) -> Option<Cow<'_, TypeNode>> {
        let ov = Tag::new(&self.tag).type_override();

        if let Some(ty) = ov.ty() {
            let pointer = ov.pointer().unwrap_or_else(|err| {
                tracing::error!(field = %self.name, error = %err, "error parsing bool for type override");
                false
            });
            return Some(Cow::Owned(TypeNode::Basic(Basic {
                ty: ty.to_string(),
                pointer,
            })));
        }

        if let TypeOverride::Ignored(value) = ov {
            tracing::warn!(field = %self.name, value, "ignoring malformed type override");
        }
        self.ty.as_ref().map(Cow::Borrowed)
    }
}

/// The effective, read-only view of a field passed to fragments.
///
/// `ty` is the type after any `tw` override, or `None` for an untyped field
/// without one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FieldView<'a> {
    pub name: &'a str,
    pub comment: &'a str,
    #[serde(rename = "Type")]
    pub ty: Option<Cow<'a, TypeNode>>,
    pub tag: &'a str,
}

/// A package-level type declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PackageType {
    pub name: String,
    pub comment: String,
    #[serde(rename = "Type")]
    pub ty: Option<TypeNode>,
    pub tag: String,
}

impl PackageType {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeNode>) -> Self {
        Self {
            name: name.into(),
            comment: String::new(),
            ty: Some(ty.into()),
            tag: String::new(),
        }
    }

    /// A declaration with no type attached; rendering it fails.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment: String::new(),
            ty: None,
            tag: String::new(),
        }
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_display_name() {
        let field = Field::new("Name", Basic::new("string"));
        assert_eq!(field.display_name(), "Name");

        let field = field.tag(r#"json:"alias,omitempty""#);
        assert_eq!(field.display_name(), "alias");
        assert_eq!(field.name, "Name");

        let field = Field::new("Name", Basic::new("string")).tag(r#"json:",omitempty""#);
        assert_eq!(field.display_name(), "Name");
    }

    #[test]
    fn test_effective_type_without_override() {
        let field = Field::new("Age", Basic::new("int"));
        assert_eq!(
            field.effective_type().as_deref(),
            Some(&TypeNode::Basic(Basic::new("int")))
        );
        assert!(Field::untyped("Age").effective_type().is_none());
    }

    #[test]
    fn test_effective_type_override() {
        let field = Field::new("Age", Map::new(Basic::new("string"), Basic::new("int")))
            .tag(r#"tw:"int64,true""#);
        assert_eq!(
            field.effective_type().as_deref(),
            Some(&TypeNode::Basic(Basic::new("int64").pointer()))
        );
        // The declared type is left untouched
        assert!(matches!(field.ty, Some(TypeNode::Map(_))));
    }

    #[test]
    fn test_effective_type_bad_pointer_flag() {
        let field = Field::untyped("Age").tag(r#"tw:"int64,notabool""#);
        assert_eq!(
            field.effective_type().as_deref(),
            Some(&TypeNode::Basic(Basic::new("int64")))
        );
    }

    #[test]
    fn test_effective_type_ignored_override() {
        let field = Field::new("Age", Basic::new("int")).tag(r#"tw:"a,b,c""#);
        assert_eq!(
            field.effective_type().as_deref(),
            Some(&TypeNode::Basic(Basic::new("int")))
        );
    }

    #[test]
    fn test_view_carries_overridden_type() {
        let field = Field::new("Age", Basic::new("int")).tag(r#"json:"age",tw:"int64,true""#);
        let view = field.view();
        assert_eq!(view.name, "age");
        assert_eq!(
            view.ty.as_deref(),
            Some(&TypeNode::Basic(Basic::new("int64").pointer()))
        );
    }

    #[test]
    fn test_effective_type_empty_override_type() {
        let field = Field::new("Age", Basic::new("int")).tag(r#"tw:",true""#);
        assert_eq!(
            field.effective_type().as_deref(),
            Some(&TypeNode::Basic(Basic::new("int")))
        );
    }

    #[test]
    fn test_serialized_keys() {
        let node = TypeNode::from(Basic::new("string").pointer());
        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({"Kind": "Basic", "Type": "string", "Pointer": true})
        );

        let field = Field::new("Name", Basic::new("string")).tag(r#"json:"name""#);
        assert_eq!(
            serde_json::to_value(field.view()).unwrap(),
            json!({
                "Name": "name",
                "Comment": "",
                "Type": {"Kind": "Basic", "Type": "string", "Pointer": false},
                "Tag": "json:\"name\""
            })
        );

        let field = Field::untyped("Ghost");
        assert_eq!(serde_json::to_value(field.view()).unwrap()["Type"], json!(null));

        let strukt = Struct::new(vec![]).strict().embed("Base");
        assert_eq!(
            serde_json::to_value(&strukt).unwrap(),
            json!({"Fields": [], "Strict": true, "Embedded": ["Base"]})
        );
    }
}
