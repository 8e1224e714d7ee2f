//! Parsing, validation and rendering of whole types.toml manifests.

use std::{fs, str::FromStr};

use tempfile::TempDir;
use typewriter_core::Language;
use typewriter_manifest::{Error, Manifest};
use typewriter_template::{BuiltinFragments, document_to_string};

const MODELS: &str = r#"
[[types]]
name = "Person"
comment = "Person is a person"

[[types.fields]]
name = "Name"
type = "string"
tag = 'json:"name"'

[[types.fields]]
name = "Age"
type = "*int"
tag = 'json:"age,omitempty"'
comment = "years"

[[types]]
name = "Names"
type = "[]string"

[[types]]
name = "Event"
strict = true

[[types.fields]]
name = "Payload"
tag = 'json:"payload" tw:"interface{}"'

[[types.fields]]
name = "At"
type = "time.Time"
tag = 'json:"at"'
"#;

fn parse_err(src: &str) -> Box<Error> {
    Manifest::from_str(src).unwrap_err()
}

#[test]
fn test_declarations_keep_file_order() {
    let manifest = Manifest::from_str(MODELS).unwrap();
    let names: Vec<_> = manifest.types().map(|ty| ty.name.as_str()).collect();
    assert_eq!(names, ["Person", "Names", "Event"]);
}

#[test]
fn test_render_manifest_as_flow() {
    let types = Manifest::from_str(MODELS).unwrap().into_package_types();
    let output = document_to_string(&types, &BuiltinFragments, &Language::Flow).unwrap();

    let expected = "\
// @flow
// Automatically generated by typewriter. Do not edit.
// http://www.github.com/natdm/typewriter

// Person is a person
export type Person = {
\tname: string,
\tage: ?number // years

}

export type Names = Array<string>

export type Event = {|
\tpayload: any,
\tat: string
|}

";
    assert_eq!(output, expected);
}

#[test]
fn test_from_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("types.toml");
    fs::write(&path, MODELS).unwrap();

    let manifest = Manifest::from_file(&path).unwrap();
    assert_eq!(manifest.len(), 3);
    assert!(manifest.contains("Event"));
}

#[test]
fn test_duplicate_type_points_at_both_names() {
    let src = r#"
[[types]]
name = "Person"
type = "string"

[[types]]
name = "Person"
type = "int"
"#;
    let err = parse_err(src);
    insta::assert_snapshot!(err.to_string(), @"duplicate type 'Person'");

    let Error::Duplicate {
        first_span,
        second_span,
        ..
    } = *err
    else {
        panic!("expected a duplicate error");
    };
    assert_eq!(first_span.offset(), src.find("Person").unwrap());
    assert_eq!(second_span.offset(), src.rfind("Person").unwrap());
    assert_eq!(second_span.len(), "Person".len());
}

#[test]
fn test_duplicate_field() {
    let err = parse_err(
        r#"
[[types]]
name = "Person"

[[types.fields]]
name = "Name"
type = "string"

[[types.fields]]
name = "Name"
type = "int"
"#,
    );
    insta::assert_snapshot!(err.to_string(), @"duplicate field 'Name'");
}

#[test]
fn test_type_and_fields_are_exclusive() {
    let err = parse_err(
        r#"
[[types]]
name = "Person"
type = "string"

[[types.fields]]
name = "Name"
type = "string"
"#,
    );
    insta::assert_snapshot!(err.to_string(), @"type 'Person' has both 'type' and 'fields'");

    let err = parse_err(
        r#"
[[types]]
name = "Person"
"#,
    );
    insta::assert_snapshot!(err.to_string(), @"type 'Person' needs either 'type' or 'fields'");
}

#[test]
fn test_field_without_type_needs_override() {
    let err = parse_err(
        r#"
[[types]]
name = "Person"

[[types.fields]]
name = "Name"
tag = 'json:"name"'
"#,
    );
    assert!(matches!(*err, Error::Validation { span: Some(_), .. }));
    assert!(err.to_string().contains("field 'Name' of 'Person'"));
}

#[test]
fn test_strict_needs_a_struct() {
    let err = parse_err(
        r#"
[[types]]
name = "Names"
type = "[]string"
strict = true
"#,
    );
    assert!(matches!(*err, Error::Validation { .. }));
}

#[test]
fn test_invalid_type_expression_span() {
    let src = r#"
[[types]]
name = "Lookup"
type = "map[string"
"#;
    let err = parse_err(src);
    insta::assert_snapshot!(err.to_string(), @"invalid type expression 'map[string'");

    let Error::InvalidTypeExpr { span, message, .. } = *err else {
        panic!("expected a type expression error");
    };
    assert_eq!(message, "expected ']'");
    // Just past the end of the expression, inside the quotes
    assert_eq!(span.offset(), src.find("map[string").unwrap() + "map[string".len());
}

#[test]
fn test_names_must_be_identifiers() {
    let err = parse_err(
        r#"
[[types]]
name = "my-type"
type = "string"
"#,
    );
    assert!(matches!(*err, Error::InvalidIdentifier { .. }));

    let err = parse_err(
        r#"
[[types]]
name = "type"
type = "string"
"#,
    );
    assert!(matches!(*err, Error::ReservedKeyword { .. }));
}

#[test]
fn test_toml_syntax_error() {
    let err = parse_err("[[types]\nname = ");
    assert!(matches!(*err, Error::Parse { .. }));
}
