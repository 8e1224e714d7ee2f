//! Template filters available to every fragment.

use std::collections::HashMap;

use tera::{Result as TeraResult, Tera, Value};
use typewriter_core::Language;

pub(crate) fn register(tera: &mut Tera) {
    tera.register_filter("type_name", type_name);
    tera.register_filter("comment", comment);
}

/// Map a Go type name into a target language
///
/// # Example
/// ```tera
/// {{ Type | type_name(lang="flow") }}
/// ```
/// `int64` becomes `number`; unknown names pass through.
pub fn type_name(value: &Value, args: &HashMap<String, Value>) -> TeraResult<Value> {
    let ty = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("type_name filter requires a string"))?;
    let lang = args
        .get("lang")
        .and_then(|v| v.as_str())
        .ok_or_else(|| tera::Error::msg("type_name filter requires a 'lang' parameter"))?;
    let language: Language = lang.parse().map_err(tera::Error::msg)?;
    let mapper = language.type_mapper().ok_or_else(|| {
        tera::Error::msg(format!("no type mapping for language '{language}'"))
    })?;

    Ok(Value::String(mapper.map_type(ty).to_string()))
}

/// Prefix every line of a string
///
/// # Example
/// ```tera
/// {{ Comment | comment(prefix="// ") }}
/// ```
/// Lines left empty after prefixing lose their trailing whitespace.
pub fn comment(value: &Value, args: &HashMap<String, Value>) -> TeraResult<Value> {
    let text = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("comment filter requires a string"))?;
    let prefix = args.get("prefix").and_then(|v| v.as_str()).unwrap_or("// ");

    let lines: Vec<String> = text
        .lines()
        .map(|line| format!("{prefix}{line}").trim_end().to_string())
        .collect();
    Ok(Value::String(lines.join("\n")))
}
