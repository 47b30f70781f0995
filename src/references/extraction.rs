use super::{definition_name, Reference, ReferenceMap};
use crate::document::Document;

/// Collect every definition block in the document.
///
/// A block's content is every line after its header up to, but excluding, the next
/// definition header or the end of the document.
pub fn extract_references(doc: &Document) -> ReferenceMap {
    let mut map = ReferenceMap::default();
    let mut current: Option<Reference> = None;

    for (idx, line) in doc.lines().iter().enumerate() {
        if let Some(name) = definition_name(line) {
            if let Some(done) = current.take() {
                map.insert(done);
            }
            current = Some(Reference {
                name: name.to_string(),
                line: idx + 1,
                content_lines: Vec::new(),
            });
        } else if let Some(reference) = current.as_mut() {
            reference.content_lines.push(line.clone());
        }
    }

    if let Some(done) = current {
        map.insert(done);
    }

    tracing::debug!(
        definitions = map.len(),
        shadowed = map.shadowed().len(),
        "extracted reference definitions"
    );
    map
}
