//! Validation and conversion of the on-disk manifest into the type tree.

use std::ops::Range;

use indexmap::IndexMap;
use typewriter_core::Tag;
use typewriter_template::{Field, PackageType, Struct};

use super::{FieldDef, Manifest, ManifestFile, TypeDef};
use crate::{
    Error, Result,
    validate::{ParseContext, string_body},
};

/// Validate every declaration and build the manifest.
pub(super) fn lower_manifest(file: &ManifestFile, ctx: &ParseContext<'_>) -> Result<Manifest> {
    let mut types = IndexMap::with_capacity(file.types.len());
    let mut spans: IndexMap<&str, Range<usize>> = IndexMap::with_capacity(file.types.len());

    for def in &file.types {
        let name = def.name.get_ref().as_str();
        ctx.validate_name(name, "type", def.name.span())?;

        if let Some(first) = spans.get(name) {
            return Err(duplicate(ctx, name, "type", first, def.name.span()));
        }
        spans.insert(name, def.name.span());

        types.insert(name.to_string(), lower_type(def, ctx)?);
    }

    Ok(Manifest { types })
}

fn lower_type(def: &TypeDef, ctx: &ParseContext<'_>) -> Result<PackageType> {
    let name = def.name.get_ref().as_str();
    let name_span = || Some(string_body(ctx.src(), def.name.span()));

    let ty = match (&def.ty, &def.fields) {
        (Some(ty), None) => {
            if def.strict || !def.embedded.is_empty() {
                return Err(ctx.source_context().validation_error(
                    format!("type '{name}' uses 'strict' or 'embedded' but is not a struct"),
                    name_span(),
                ));
            }
            ctx.parse_type(ty.get_ref(), ty.span())?
        }
        (None, Some(fields)) => lower_struct(def, fields, &ctx.push(name))?.into(),
        (Some(_), Some(_)) => {
            return Err(ctx.source_context().validation_error(
                format!("type '{name}' has both 'type' and 'fields'"),
                name_span(),
            ));
        }
        (None, None) => {
            return Err(ctx.source_context().validation_error(
                format!("type '{name}' needs either 'type' or 'fields'"),
                name_span(),
            ));
        }
    };

    Ok(PackageType::new(name, ty)
        .comment(def.comment.as_str())
        .tag(def.tag.as_str()))
}

fn lower_struct(def: &TypeDef, fields: &[FieldDef], ctx: &ParseContext<'_>) -> Result<Struct> {
    let mut strukt = Struct::default();
    if def.strict {
        strukt = strukt.strict();
    }

    for embed in &def.embedded {
        ctx.validate_name(embed.get_ref(), "embedded type", embed.span())?;
        strukt = strukt.embed(embed.get_ref().as_str());
    }

    let mut spans: IndexMap<&str, Range<usize>> = IndexMap::with_capacity(fields.len());
    for field in fields {
        let name = field.name.get_ref().as_str();
        ctx.validate_name(name, "field", field.name.span())?;

        if let Some(first) = spans.get(name) {
            return Err(duplicate(ctx, name, "field", first, field.name.span()));
        }
        spans.insert(name, field.name.span());

        strukt = strukt.field(lower_field(field, ctx)?);
    }

    Ok(strukt)
}

fn lower_field(def: &FieldDef, ctx: &ParseContext<'_>) -> Result<Field> {
    let name = def.name.get_ref().as_str();

    let field = match &def.ty {
        Some(ty) => Field::new(name, ctx.parse_type(ty.get_ref(), ty.span())?),
        None if Tag::new(&def.tag).type_override().ty().is_some() => Field::untyped(name),
        None => {
            return Err(ctx.source_context().validation_error(
                format!(
                    "field '{name}' of '{}' needs a 'type' or a tw:\"...\" tag override",
                    ctx.path_string()
                ),
                Some(string_body(ctx.src(), def.name.span())),
            ));
        }
    };

    Ok(field.comment(def.comment.as_str()).tag(def.tag.as_str()))
}

fn duplicate(
    ctx: &ParseContext<'_>,
    name: &str,
    context: &str,
    first: &Range<usize>,
    second: Range<usize>,
) -> Box<Error> {
    ctx.source_context().duplicate_error(
        name,
        context,
        string_body(ctx.src(), first.clone()),
        string_body(ctx.src(), second),
    )
}
