//! Fragments shipped with typewriter for every built-in language.

use std::borrow::Cow;

use typewriter_core::Language;

use crate::{
    Error, Result,
    fragment::FragmentName::{self, *},
    resolver::FragmentResolver,
};

const FLOW: &[(FragmentName, &str)] = &[
    (
        Header,
        "// @flow\n// Automatically generated by typewriter. Do not edit.\n// http://www.github.com/natdm/typewriter\n\n",
    ),
    (
        Declaration,
        "{% if Comment %}{{ Comment | comment(prefix=\"// \") }}\n{% endif %}export type {{ Name }} = ",
    ),
    (
        Basic,
        "{% if Pointer %}?{% endif %}{{ Type | type_name(lang=\"flow\") }}",
    ),
    (MapKey, "{ [key: "),
    (MapValue, "]: "),
    (MapClose, " }"),
    (ArrayOpen, "Array<"),
    (ArrayClose, ">"),
    (
        StructOpen,
        "{{ \"{\" }}{% if Strict %}|{% endif %}{% for embed in Embedded %}\n\t...{{ embed }},{% endfor %}",
    ),
    (StructClose, "{% if Strict %}|{% endif %}}"),
    (FieldName, "\n\t{{ Name }}: "),
    (FieldClose, ","),
    (Comment, "{% if Comment %} // {{ Comment }}\n{% endif %}"),
];

const TYPESCRIPT: &[(FragmentName, &str)] = &[
    (
        Header,
        "// Automatically generated by typewriter. Do not edit.\n// http://www.github.com/natdm/typewriter\n\n",
    ),
    (
        Declaration,
        "{% if Comment %}{{ Comment | comment(prefix=\"// \") }}\n{% endif %}export type {{ Name }} = ",
    ),
    (
        Basic,
        "{{ Type | type_name(lang=\"typescript\") }}{% if Pointer %} | null{% endif %}",
    ),
    (MapKey, "{ [key: "),
    (MapValue, "]: "),
    (MapClose, " }"),
    (ArrayOpen, "Array<"),
    (ArrayClose, ">"),
    (
        StructOpen,
        "{% for embed in Embedded %}{{ embed }} & {% endfor %}{{ \"{\" }}",
    ),
    (StructClose, "}"),
    (FieldName, "\n\t{{ Name }}: "),
    (FieldClose, ";"),
    (Comment, "{% if Comment %} // {{ Comment }}\n{% endif %}"),
];

fn table(language: &Language) -> Option<&'static [(FragmentName, &'static str)]> {
    match language {
        Language::Flow => Some(FLOW),
        Language::TypeScript => Some(TYPESCRIPT),
        Language::Custom(_) => None,
    }
}

/// Text of a built-in fragment. Custom languages have none.
pub fn builtin_text(language: &Language, name: FragmentName) -> Option<&'static str> {
    table(language)?
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, text)| *text)
}

/// The fragments compiled into typewriter.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinFragments;

impl FragmentResolver for BuiltinFragments {
    fn load(&self, language: &Language, name: FragmentName) -> Result<Cow<'_, str>> {
        builtin_text(language, name)
            .map(Cow::Borrowed)
            .ok_or_else(|| Error::FragmentNotFound {
                language: language.clone(),
                fragment: name,
            })
    }
}
