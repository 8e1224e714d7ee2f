//! Whole-file rendering: a header followed by every declaration.

use std::io::Write;

use typewriter_core::Language;

use crate::{
    Result,
    node::PackageType,
    render::{render, render_header, render_raw},
    resolver::FragmentResolver,
};

/// Text written after every declaration.
const DECLARATION_SEPARATOR: &str = "\n\n";

/// Render the header and then each declaration in order.
///
/// Stops at the first failing declaration; the header and any earlier
/// declarations remain in `out`.
pub fn render_document(
    types: &[PackageType],
    resolver: &dyn FragmentResolver,
    language: &Language,
    out: &mut dyn Write,
) -> Result<()> {
    render_header(resolver, language, out)?;
    for ty in types {
        tracing::debug!(name = %ty.name, %language, "rendering declaration");
        render(ty, resolver, language, out)?;
        render_raw(DECLARATION_SEPARATOR, out)?;
    }
    Ok(())
}

/// Render a whole document into a string.
pub fn document_to_string(
    types: &[PackageType],
    resolver: &dyn FragmentResolver,
    language: &Language,
) -> Result<String> {
    let mut buf = Vec::new();
    render_document(types, resolver, language, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
