//! Line-oriented view over a task-list document

/// A task-list document held as an ordered sequence of lines.
///
/// Every extractor works on this view; nothing mutates it after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    pub fn parse(content: &str) -> Self {
        let lines = content
            .lines()
            .map(|line| line.trim_end_matches('\r').to_string())
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Heading level of a markdown ATX heading (`#` count), if the line is one.
///
/// Requires a space after the hashes so `#{{name}}` tokens are not headings.
pub fn heading_level(line: &str) -> Option<usize> {
    let trimmed = line.trim_start();
    let level = trimmed.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    match trimmed[level..].chars().next() {
        Some(c) if c.is_whitespace() => Some(level),
        None => Some(level),
        _ => None,
    }
}
