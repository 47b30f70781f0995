//! Reusable content blocks and their placeholders
//!
//! A definition block starts with a `## #{{name}}` heading and runs until the next
//! definition heading. Anywhere else in the document, `{{name}}` marks a use that must
//! resolve to a definition. Resolution only checks existence; nothing is expanded.

mod extraction;
mod resolution;

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

pub use extraction::extract_references;
pub use resolution::{
    find_placeholders, placeholder_names, resolve_references, unused_references,
    MissingReference, PlaceholderUse,
};

static DEFINITION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*##\s+#\{\{([A-Za-z0-9_.-]+)\}\}\s*$").expect("definition pattern compiles")
});

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([A-Za-z0-9_.-]+)\}\}").expect("placeholder pattern compiles")
});

/// Name declared by a definition header line, if the line is one
pub fn definition_name(line: &str) -> Option<&str> {
    DEFINITION_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// A named block of reusable lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub name: String,
    /// 1-based line of the definition header
    pub line: usize,
    pub content_lines: Vec<String>,
}

/// Name → definition mapping built once per run.
///
/// When a name is defined twice the later block wins; the earlier ones are kept in
/// `shadowed` so callers can report them.
#[derive(Debug, Clone, Default)]
pub struct ReferenceMap {
    definitions: HashMap<String, Reference>,
    shadowed: Vec<Reference>,
}

impl ReferenceMap {
    pub fn get(&self, name: &str) -> Option<&Reference> {
        self.definitions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Definitions in document order
    pub fn iter(&self) -> impl Iterator<Item = &Reference> {
        let mut refs: Vec<&Reference> = self.definitions.values().collect();
        refs.sort_by_key(|r| r.line);
        refs.into_iter()
    }

    /// Earlier definitions replaced by a later one with the same name
    pub fn shadowed(&self) -> &[Reference] {
        &self.shadowed
    }

    fn insert(&mut self, reference: Reference) {
        if let Some(previous) = self.definitions.insert(reference.name.clone(), reference) {
            self.shadowed.push(previous);
        }
    }
}
