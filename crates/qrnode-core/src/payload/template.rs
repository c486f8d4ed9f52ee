//! Free-text templates with `{{name}}` placeholders.
//!
//! A template is compiled once into literal and placeholder segments, then
//! rendered per invocation against shared state. Rendering is a single pass
//! over the compiled segments, so a substituted value that itself looks like
//! `{{...}}` is emitted as-is and never expanded again.

use qrnode_types::error::NodeError;

use super::StateLookup;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// One piece of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    /// Shared-state key between `{{` and `}}`, untrimmed.
    Placeholder(String),
}

/// A compiled free-text template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Compile `source` into segments.
    ///
    /// A placeholder is `{{` followed by the shortest run of characters that
    /// reaches `}}` without crossing a line terminator. When that run would
    /// cross one, no placeholder starts there and scanning resumes one byte
    /// later, so `{{{a}}` yields the name `{a`.
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal_start = 0;
        let mut cursor = 0;

        while let Some(offset) = source[cursor..].find(OPEN) {
            let open = cursor + offset;
            let name_start = open + OPEN.len();
            let Some(len) = source[name_start..].find(CLOSE) else {
                break;
            };
            let name = &source[name_start..name_start + len];
            if name.contains(is_line_terminator) {
                cursor = open + 1;
                continue;
            }

            if literal_start < open {
                segments.push(Segment::Literal(source[literal_start..open].to_string()));
            }
            segments.push(Segment::Placeholder(name.to_string()));
            cursor = name_start + len + CLOSE.len();
            literal_start = cursor;
        }

        if literal_start < source.len() {
            segments.push(Segment::Literal(source[literal_start..].to_string()));
        }

        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholder names in order of appearance, repeats included.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Substitute every placeholder from `lookup`.
    ///
    /// Each occurrence is looked up on its own, even when a name repeats.
    /// The first undefined reference aborts rendering.
    pub fn render(&self, lookup: &dyn StateLookup) -> Result<String, NodeError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => out.push_str(&lookup.lookup(name)?),
            }
        }
        Ok(out)
    }
}

/// Characters a placeholder name may not span.
fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{0085}' | '\u{2028}' | '\u{2029}')
}
