//! Element tree to display lines.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::annotations::{EXPANDED_CLASS, TOGGLE_CLASS};
use crate::markup::{Element, Node};
use crate::render::Page;

use super::{Document, LineSpan, LineType, RenderedLine};

/// Blank columns between the source and translation columns.
pub const COLUMN_GAP: usize = 3;

const MIN_LAYOUT_WIDTH: usize = 8;

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "section", "header", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol",
    "li", "dl", "dt", "dd", "blockquote", "table", "tr",
];

/// Lay out the main area of `page` for a pane `width` columns wide.
pub fn layout_page(page: &Page, width: u16) -> Document {
    let width = usize::from(width).max(MIN_LAYOUT_WIDTH);
    let mut lines = Vec::new();
    let mut sections = Vec::new();

    for el in page.main.child_elements() {
        if el.tag == "section" {
            let start = lines.len();
            layout_section(el, width, &mut lines);
            lines.push(RenderedLine::empty());
            sections.push(start..lines.len());
        } else {
            let kind = if el.has_class("load-error") {
                LineType::Error
            } else {
                LineType::Paragraph
            };
            push_blocks(el, kind, width, &mut lines);
            lines.push(RenderedLine::empty());
        }
    }

    crate::perf::log_event(
        "layout.page",
        format!("width={width} lines={} sections={}", lines.len(), sections.len()),
    );
    Document::from_parts(lines, sections)
}

fn layout_section(section: &Element, width: usize, lines: &mut Vec<RenderedLine>) {
    let expanded = section.has_class(EXPANDED_CLASS);
    for child in section.child_elements() {
        if child.has_class("division-head") {
            if let Some(heading) = child.find(&|el| el.tag == "h2") {
                for line in wrap_text(&heading.text_content(), width) {
                    lines.push(RenderedLine::new(line, LineType::Heading));
                }
            }
            if let Some(button) = child.find(&|el| el.has_class(TOGGLE_CLASS)) {
                let marker = if expanded { "[-]" } else { "[+]" };
                lines.push(RenderedLine::new(
                    format!("{marker} {}", button.text_content().trim()),
                    LineType::Toggle,
                ));
            }
            lines.push(RenderedLine::empty());
        } else if child.has_class("division-body") {
            for body in child.child_elements() {
                if body.has_class("bilingual") {
                    layout_columns(body, width, lines);
                } else {
                    push_blocks(body, LineType::Paragraph, width, lines);
                }
            }
        } else if child.has_class("annotations") && expanded {
            for block in child.child_elements() {
                let kind = if block.has_class("apparatus") {
                    LineType::Apparatus
                } else {
                    LineType::Commentary
                };
                lines.push(RenderedLine::empty());
                for part in block.child_elements() {
                    if part.has_class("block-label") {
                        lines.push(RenderedLine::new(
                            part.text_content().trim().to_string(),
                            LineType::BlockLabel,
                        ));
                    } else {
                        push_blocks(part, kind, width, lines);
                    }
                }
            }
        }
    }
}

fn layout_columns(row: &Element, width: usize, lines: &mut Vec<RenderedLine>) {
    let col_width = (width.saturating_sub(COLUMN_GAP) / 2).max(1);
    let column_lines = |class: &str| -> Vec<String> {
        let Some(col) = row.child_elements().find(|el| el.has_class(class)) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        for (i, block) in text_blocks(col).iter().enumerate() {
            if i > 0 {
                out.push(String::new());
            }
            out.extend(block.iter().flat_map(|line| wrap_text(line, col_width)));
        }
        out
    };
    let left = column_lines("col-grc");
    let right = column_lines("col-en");

    for i in 0..left.len().max(right.len()) {
        let l = left.get(i).map_or("", String::as_str);
        let r = right.get(i).map_or("", String::as_str);
        lines.push(RenderedLine::from_spans(
            vec![
                LineSpan::new(pad_to_width(l, col_width), LineType::Source),
                LineSpan::new(" ".repeat(COLUMN_GAP), LineType::Empty),
                LineSpan::new(r, LineType::Translation),
            ],
            LineType::Source,
        ));
    }
}

fn push_blocks(el: &Element, kind: LineType, width: usize, lines: &mut Vec<RenderedLine>) {
    for (i, block) in text_blocks(el).iter().enumerate() {
        if i > 0 {
            lines.push(RenderedLine::empty());
        }
        for line in block.iter().flat_map(|line| wrap_text(line, width)) {
            lines.push(RenderedLine::new(line, kind));
        }
    }
}

/// Whitespace-normalized text of `el`, as blocks of lines. Block elements
/// start a new block; `br` and TEI line-break markers start a new line.
fn text_blocks(el: &Element) -> Vec<Vec<String>> {
    let mut blocks = Blocks::default();
    blocks.collect(el);
    blocks.break_block();
    blocks.done
}

#[derive(Default)]
struct Blocks {
    done: Vec<Vec<String>>,
    lines: Vec<String>,
    current: String,
}

impl Blocks {
    fn collect(&mut self, el: &Element) {
        for child in &el.children {
            match child {
                Node::Text(text) => self.current.push_str(text),
                Node::Element(child) if child.tag == "br" || child.has_class("lb") => {
                    self.break_line();
                }
                Node::Element(child) if BLOCK_TAGS.contains(&child.tag.as_str()) => {
                    self.break_block();
                    self.collect(child);
                    self.break_block();
                }
                Node::Element(child) => self.collect(child),
            }
        }
    }

    fn break_line(&mut self) {
        let text = self.current.split_whitespace().collect::<Vec<_>>().join(" ");
        if !text.is_empty() {
            self.lines.push(text);
        }
        self.current.clear();
    }

    fn break_block(&mut self) {
        self.break_line();
        if !self.lines.is_empty() {
            self.done.push(std::mem::take(&mut self.lines));
        }
    }
}

/// Word-wrap `text` to `width` display columns. Words wider than the
/// line are split by character.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for word in text.split_whitespace() {
        let word_width = UnicodeWidthStr::width(word);
        if word_width > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current_width = 0;
            for ch in word.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if current_width + ch_width > width && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += ch_width;
            }
            continue;
        }
        let needed = if current.is_empty() {
            word_width
        } else {
            current_width + 1 + word_width
        };
        if needed > width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_width = needed;
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn pad_to_width(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    format!("{text}{}", " ".repeat(width.saturating_sub(used)))
}
