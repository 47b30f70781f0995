use std::collections::HashSet;

use super::{definition_name, Reference, ReferenceMap, PLACEHOLDER_RE};
use crate::document::Document;

/// One `{{name}}` occurrence outside a definition header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderUse {
    pub name: String,
    /// 1-based line number
    pub line: usize,
}

/// A placeholder with no matching definition anywhere in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingReference {
    pub name: String,
    pub line: usize,
}

impl std::fmt::Display for MissingReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Missing reference definition for '{}' used at line {}",
            self.name, self.line
        )
    }
}

/// Placeholder names used in a slice of lines, in order of appearance
pub fn placeholder_names(lines: &[String]) -> impl Iterator<Item = &str> {
    lines
        .iter()
        .filter(|line| definition_name(line).is_none())
        .flat_map(|line| PLACEHOLDER_RE.captures_iter(line))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
}

/// Every placeholder use in the document, in document order
pub fn find_placeholders(doc: &Document) -> Vec<PlaceholderUse> {
    let mut uses = Vec::new();
    for (idx, line) in doc.lines().iter().enumerate() {
        if definition_name(line).is_some() {
            continue;
        }
        for caps in PLACEHOLDER_RE.captures_iter(line) {
            uses.push(PlaceholderUse {
                name: caps[1].to_string(),
                line: idx + 1,
            });
        }
    }
    uses
}

/// Confirm each placeholder has a definition.
///
/// Definitions may appear before or after their use. All misses are returned, not just
/// the first.
pub fn resolve_references(doc: &Document, map: &ReferenceMap) -> Result<(), Vec<MissingReference>> {
    let missing: Vec<MissingReference> = find_placeholders(doc)
        .into_iter()
        .filter(|usage| !map.contains(&usage.name))
        .map(|usage| MissingReference {
            name: usage.name,
            line: usage.line,
        })
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(missing)
    }
}

/// Definitions that no placeholder refers to
pub fn unused_references<'a>(doc: &Document, map: &'a ReferenceMap) -> Vec<&'a Reference> {
    let used: HashSet<String> = find_placeholders(doc).into_iter().map(|u| u.name).collect();
    map.iter().filter(|r| !used.contains(&r.name)).collect()
}
