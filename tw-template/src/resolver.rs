//! Fragment resolution.
//!
//! A resolver locates the text of a fragment for a `(language, name)` pair.
//! Resolution is never cached: every call loads and parses the fragment
//! again, so a resolver must be free of side effects.

use std::{
    borrow::Cow,
    collections::HashMap,
    io,
    path::{Path, PathBuf},
};

use typewriter_core::Language;

use crate::{
    Error, Result,
    fragment::{Fragment, FragmentName},
};

/// Trait for locating per-language fragment text.
pub trait FragmentResolver: Send + Sync {
    /// Load the raw text of a fragment.
    fn load(&self, language: &Language, name: FragmentName) -> Result<Cow<'_, str>>;

    /// Load and parse a fragment.
    fn resolve(&self, language: &Language, name: FragmentName) -> Result<Fragment> {
        let text = self.load(language, name)?;
        tracing::debug!(%language, fragment = %name, "resolved fragment");
        Fragment::parse(language, name, &text)
    }
}

/// Blanket implementation for references.
impl<T: FragmentResolver + ?Sized> FragmentResolver for &T {
    fn load(&self, language: &Language, name: FragmentName) -> Result<Cow<'_, str>> {
        (**self).load(language, name)
    }
}

/// Blanket implementation for Box.
impl<T: FragmentResolver + ?Sized> FragmentResolver for Box<T> {
    fn load(&self, language: &Language, name: FragmentName) -> Result<Cow<'_, str>> {
        self.as_ref().load(language, name)
    }
}

/// Fragments stored on disk as `{root}/{language}/{name}.tmpl`.
#[derive(Debug, Clone)]
pub struct FragmentDir {
    root: PathBuf,
}

impl FragmentDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a fragment file under this directory.
    pub fn path_for(&self, language: &Language, name: FragmentName) -> PathBuf {
        self.root.join(language.as_str()).join(name.file_name())
    }
}

impl FragmentResolver for FragmentDir {
    fn load(&self, language: &Language, name: FragmentName) -> Result<Cow<'_, str>> {
        let path = self.path_for(language, name);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Cow::Owned(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(Error::FragmentNotFound {
                language: language.clone(),
                fragment: name,
            }),
            Err(source) => Err(Error::FragmentRead { path, source }),
        }
    }
}

/// An in-memory set of fragments.
#[derive(Debug, Clone, Default)]
pub struct FragmentSet {
    fragments: HashMap<(Language, FragmentName), String>,
}

impl FragmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fragment, replacing any previous text for the same key.
    pub fn with(mut self, language: Language, name: FragmentName, text: impl Into<String>) -> Self {
        self.insert(language, name, text);
        self
    }

    pub fn insert(&mut self, language: Language, name: FragmentName, text: impl Into<String>) {
        self.fragments.insert((language, name), text.into());
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

impl FragmentResolver for FragmentSet {
    fn load(&self, language: &Language, name: FragmentName) -> Result<Cow<'_, str>> {
        self.fragments
            .get(&(language.clone(), name))
            .map(|text| Cow::Borrowed(text.as_str()))
            .ok_or_else(|| Error::FragmentNotFound {
                language: language.clone(),
                fragment: name,
            })
    }
}

/// Tries `primary` first and falls back to `fallback` for missing fragments.
///
/// Any error other than [`Error::FragmentNotFound`] from the primary is
/// returned as is.
#[derive(Debug, Clone)]
pub struct Overlay<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> Overlay<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: FragmentResolver, F: FragmentResolver> FragmentResolver for Overlay<P, F> {
    fn load(&self, language: &Language, name: FragmentName) -> Result<Cow<'_, str>> {
        match self.primary.load(language, name) {
            Err(e) if e.is_not_found() => self.fallback.load(language, name),
            result => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_fragment_dir_loads_file() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("flow");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("basic.tmpl"), "{{ Type }}").unwrap();

        let resolver = FragmentDir::new(temp.path());
        let text = resolver.load(&Language::Flow, FragmentName::Basic).unwrap();
        assert_eq!(text, "{{ Type }}");
    }

    #[test]
    fn test_fragment_dir_custom_language() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("go");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("map_key.tmpl"), "map[").unwrap();

        let go = Language::Custom("go".to_string());
        let overlay = Overlay::new(FragmentDir::new(temp.path()), crate::BuiltinFragments);
        assert_eq!(overlay.load(&go, FragmentName::MapKey).unwrap(), "map[");

        // Built-ins cannot fill the gaps of a custom language
        let err = overlay.load(&go, FragmentName::Basic).unwrap_err();
        assert!(matches!(
            err,
            Error::FragmentNotFound { ref language, fragment: FragmentName::Basic } if *language == go
        ));
    }

    #[test]
    fn test_fragment_dir_missing_file() {
        let temp = TempDir::new().unwrap();
        let resolver = FragmentDir::new(temp.path());

        let err = resolver
            .load(&Language::TypeScript, FragmentName::MapKey)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_fragment_dir_unreadable_path() {
        let temp = TempDir::new().unwrap();
        // A directory where the file should be
        fs::create_dir_all(temp.path().join("flow").join("basic.tmpl")).unwrap();

        let resolver = FragmentDir::new(temp.path());
        let err = resolver.load(&Language::Flow, FragmentName::Basic).unwrap_err();
        assert!(matches!(err, Error::FragmentRead { .. }));
    }

    #[test]
    fn test_resolve_parses() {
        let set = FragmentSet::new().with(Language::Flow, FragmentName::Basic, "{% if %}");
        let err = set.resolve(&Language::Flow, FragmentName::Basic).unwrap_err();
        assert!(matches!(err, Error::FragmentParse { .. }));
    }

    #[test]
    fn test_resolve_is_repeatable() {
        let set = FragmentSet::new().with(Language::Flow, FragmentName::Header, "// hi");
        for _ in 0..3 {
            let fragment = set.resolve(&Language::Flow, FragmentName::Header).unwrap();
            assert_eq!(fragment.name(), FragmentName::Header);
        }
    }

    #[test]
    fn test_overlay_falls_back_only_when_missing() {
        let primary = FragmentSet::new().with(Language::Flow, FragmentName::Basic, "primary");
        let fallback = FragmentSet::new()
            .with(Language::Flow, FragmentName::Basic, "fallback")
            .with(Language::Flow, FragmentName::Header, "header");
        let overlay = Overlay::new(primary, fallback);

        assert_eq!(
            overlay.load(&Language::Flow, FragmentName::Basic).unwrap(),
            "primary"
        );
        assert_eq!(
            overlay.load(&Language::Flow, FragmentName::Header).unwrap(),
            "header"
        );
        assert!(
            overlay
                .load(&Language::Flow, FragmentName::Comment)
                .unwrap_err()
                .is_not_found()
        );
    }

    #[test]
    fn test_overlay_propagates_other_errors() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("flow").join("basic.tmpl")).unwrap();

        let fallback = FragmentSet::new().with(Language::Flow, FragmentName::Basic, "fallback");
        let overlay = Overlay::new(FragmentDir::new(temp.path()), fallback);

        let err = overlay.load(&Language::Flow, FragmentName::Basic).unwrap_err();
        assert!(matches!(err, Error::FragmentRead { .. }));
    }
}
