//! Recursive rendering of the type tree.
//!
//! Each node writes its fragments to the sink in a fixed order, depth first
//! and left to right. The first error aborts the walk; whatever was already
//! written stays in the sink.

use std::io::Write;

use serde::Serialize;
use tera::Context;
use typewriter_core::Language;

use crate::{
    Error, Result,
    fragment::{FragmentName, engine},
    node::{Array, Basic, Field, FieldView, Map, PackageType, Struct, TypeNode},
    resolver::FragmentResolver,
};

/// Literal written after the last field of a struct.
const FIELD_TERMINATOR: &[u8] = b"\n";

const RAW_TEMPLATE: &str = "raw";

/// Shared state for one render call.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    resolver: &'a dyn FragmentResolver,
    language: &'a Language,
}

impl<'a> RenderContext<'a> {
    pub fn new(resolver: &'a dyn FragmentResolver, language: &'a Language) -> Self {
        Self { resolver, language }
    }

    pub fn language(&self) -> &'a Language {
        self.language
    }

    /// Resolve a fragment and execute it with `context`.
    pub fn emit<C: Serialize + ?Sized>(
        &self,
        name: FragmentName,
        context: &C,
        out: &mut dyn Write,
    ) -> Result<()> {
        self.resolver
            .resolve(self.language, name)?
            .execute(context, out)
    }

    /// Resolve a fragment and execute it with no context.
    pub fn emit_bare(&self, name: FragmentName, out: &mut dyn Write) -> Result<()> {
        self.resolver.resolve(self.language, name)?.execute_bare(out)
    }
}

/// Trait for type tree nodes that render through fragments.
pub trait Render {
    fn render(&self, out: &mut dyn Write, cx: &RenderContext<'_>) -> Result<()>;
}

impl<T: Render + ?Sized> Render for &T {
    fn render(&self, out: &mut dyn Write, cx: &RenderContext<'_>) -> Result<()> {
        (**self).render(out, cx)
    }
}

impl<T: Render + ?Sized> Render for Box<T> {
    fn render(&self, out: &mut dyn Write, cx: &RenderContext<'_>) -> Result<()> {
        self.as_ref().render(out, cx)
    }
}

impl Render for TypeNode {
    fn render(&self, out: &mut dyn Write, cx: &RenderContext<'_>) -> Result<()> {
        match self {
            TypeNode::Basic(node) => node.render(out, cx),
            TypeNode::Map(node) => node.render(out, cx),
            TypeNode::Array(node) => node.render(out, cx),
            TypeNode::Struct(node) => node.render(out, cx),
        }
    }
}

impl Render for Basic {
    fn render(&self, out: &mut dyn Write, cx: &RenderContext<'_>) -> Result<()> {
        cx.emit(FragmentName::Basic, self, out)
    }
}

impl Render for Map {
    fn render(&self, out: &mut dyn Write, cx: &RenderContext<'_>) -> Result<()> {
        cx.emit(FragmentName::MapKey, self, out)?;
        self.key.render(out, cx)?;
        cx.emit(FragmentName::MapValue, self, out)?;
        self.value.render(out, cx)?;
        cx.emit(FragmentName::MapClose, self, out)
    }
}

impl Render for Array {
    fn render(&self, out: &mut dyn Write, cx: &RenderContext<'_>) -> Result<()> {
        cx.emit(FragmentName::ArrayOpen, self, out)?;
        self.ty.render(out, cx)?;
        cx.emit(FragmentName::ArrayClose, self, out)
    }
}

impl Render for Struct {
    fn render(&self, out: &mut dyn Write, cx: &RenderContext<'_>) -> Result<()> {
        cx.emit(FragmentName::StructOpen, self, out)?;

        let last = self.fields.len().saturating_sub(1);
        for (i, field) in self.fields.iter().enumerate() {
            let view = field.view();
            render_field(field, &view, out, cx)?;
            if i < last {
                cx.emit_bare(FragmentName::FieldClose, out)?;
                cx.emit(FragmentName::Comment, &view, out)?;
            } else {
                cx.emit(FragmentName::Comment, &view, out)?;
                out.write_all(FIELD_TERMINATOR)?;
            }
        }

        cx.emit(FragmentName::StructClose, self, out)
    }
}

impl Render for Field {
    fn render(&self, out: &mut dyn Write, cx: &RenderContext<'_>) -> Result<()> {
        render_field(self, &self.view(), out, cx)
    }
}

/// Write a field's name and type. `view` is built once per field and shared
/// with the comment fragment.
fn render_field(
    field: &Field,
    view: &FieldView<'_>,
    out: &mut dyn Write,
    cx: &RenderContext<'_>,
) -> Result<()> {
    cx.emit(FragmentName::FieldName, view, out)?;

    match &view.ty {
        Some(ty) => ty.render(out, cx),
        None => {
            tracing::error!(name = %field.name, "field has no type");
            Err(Error::MissingType {
                name: field.name.clone(),
            })
        }
    }
}

impl Render for PackageType {
    fn render(&self, out: &mut dyn Write, cx: &RenderContext<'_>) -> Result<()> {
        cx.emit(FragmentName::Declaration, self, out)?;

        match &self.ty {
            Some(ty) => ty.render(out, cx),
            None => {
                tracing::error!(
                    name = %self.name,
                    "type not stored in package level type declaration"
                );
                Err(Error::MissingType {
                    name: self.name.clone(),
                })
            }
        }
    }
}

/// Render a node for `language`, writing to `out`.
pub fn render(
    node: &(impl Render + ?Sized),
    resolver: &dyn FragmentResolver,
    language: &Language,
    out: &mut dyn Write,
) -> Result<()> {
    node.render(out, &RenderContext::new(resolver, language))
}

/// Render a node into a string.
pub fn render_to_string(
    node: &(impl Render + ?Sized),
    resolver: &dyn FragmentResolver,
    language: &Language,
) -> Result<String> {
    let mut buf = Vec::new();
    render(node, resolver, language, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Write the file prologue for `language`.
pub fn render_header(
    resolver: &dyn FragmentResolver,
    language: &Language,
    out: &mut dyn Write,
) -> Result<()> {
    RenderContext::new(resolver, language).emit_bare(FragmentName::Header, out)
}

/// Parse literal template text and execute it with no context.
pub fn render_raw(text: &str, out: &mut dyn Write) -> Result<()> {
    let mut tera = engine();
    tera.add_raw_template(RAW_TEMPLATE, text)
        .map_err(Error::RawFragmentParse)?;
    tera.render_to(RAW_TEMPLATE, &Context::new(), out)
        .map_err(Error::RawFragmentExecute)
}
