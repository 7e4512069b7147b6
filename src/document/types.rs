//! Core document types.

use std::ops::Range;

/// What a display line (or a part of it) shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    Heading,
    Toggle,
    Source,
    Translation,
    Paragraph,
    BlockLabel,
    Commentary,
    Apparatus,
    Error,
    Empty,
}

/// A styled run inside a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSpan {
    pub text: String,
    pub kind: LineType,
}

impl LineSpan {
    pub fn new(text: impl Into<String>, kind: LineType) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// One display line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    spans: Vec<LineSpan>,
    line_type: LineType,
}

impl RenderedLine {
    pub fn new(content: impl Into<String>, line_type: LineType) -> Self {
        Self {
            spans: vec![LineSpan::new(content, line_type)],
            line_type,
        }
    }

    pub const fn from_spans(spans: Vec<LineSpan>, line_type: LineType) -> Self {
        Self { spans, line_type }
    }

    pub fn empty() -> Self {
        Self::from_spans(Vec::new(), LineType::Empty)
    }

    pub fn spans(&self) -> &[LineSpan] {
        &self.spans
    }

    pub const fn line_type(&self) -> LineType {
        self.line_type
    }

    /// Plain text of the line.
    pub fn content(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// A laid-out page: display lines plus the line range of every section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<RenderedLine>,
    sections: Vec<Range<usize>>,
}

impl Document {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) const fn from_parts(lines: Vec<RenderedLine>, sections: Vec<Range<usize>>) -> Self {
        Self { lines, sections }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line_at(&self, index: usize) -> Option<&RenderedLine> {
        self.lines.get(index)
    }

    /// Lines from `offset` to `offset + count`.
    pub fn visible_lines(&self, offset: usize, count: usize) -> Vec<&RenderedLine> {
        self.lines.iter().skip(offset).take(count).collect()
    }

    /// Line ranges of the sections, in document order.
    pub fn sections(&self) -> &[Range<usize>] {
        &self.sections
    }

    pub fn section_range(&self, index: usize) -> Option<Range<usize>> {
        self.sections.get(index).cloned()
    }

    /// Section containing `line`, if any.
    pub fn section_at_line(&self, line: usize) -> Option<usize> {
        self.sections.iter().position(|range| range.contains(&line))
    }
}
