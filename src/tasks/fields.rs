//! `**Label**: value` field lookup

/// A field value and the offset of the line it was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    pub value: String,
    pub offset: usize,
}

fn strip_bullet(line: &str) -> &str {
    let trimmed = line.trim();
    trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
        .unwrap_or(trimmed)
        .trim()
}

/// Find the first `**label**` field in `lines` and read its value.
///
/// The value is the text after the marker (and an optional colon) on the same line or,
/// when that is empty, the next non-blank line, provided that line is not itself a
/// field or heading. A present marker with no value yields an empty string.
pub fn field_value(lines: &[String], label: &str) -> Option<FieldValue> {
    let marker = format!("**{label}**");

    for (idx, line) in lines.iter().enumerate() {
        let stripped = strip_bullet(line);
        let Some(rest) = stripped.strip_prefix(&marker) else {
            continue;
        };
        let rest = rest.trim_start();
        let inline = rest.strip_prefix(':').unwrap_or(rest).trim();
        if !inline.is_empty() {
            return Some(FieldValue {
                value: inline.to_string(),
                offset: idx,
            });
        }

        let next = lines
            .iter()
            .enumerate()
            .skip(idx + 1)
            .find(|(_, l)| !l.trim().is_empty());
        return match next {
            Some((next_idx, next_line))
                if !strip_bullet(next_line).starts_with("**")
                    && crate::document::heading_level(next_line).is_none() =>
            {
                Some(FieldValue {
                    value: strip_bullet(next_line).to_string(),
                    offset: next_idx,
                })
            }
            _ => Some(FieldValue {
                value: String::new(),
                offset: idx,
            }),
        };
    }

    None
}
