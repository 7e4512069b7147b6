//! Scroll state of the document pane.

use std::ops::Range;

/// The window of display lines currently on screen.
///
/// ```
/// use lectio::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(100, 30, 120);
/// vp.scroll_down(15);
/// assert_eq!(vp.visible_range(), 15..45);
/// assert_eq!(vp.line_at_row(2), Some(17));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    offset: usize,
    total_lines: usize,
}

impl Viewport {
    /// `width` is the full terminal width; `height` the rows available to
    /// the document pane.
    pub const fn new(width: u16, height: u16, total_lines: usize) -> Self {
        Self {
            width,
            height,
            offset: 0,
            total_lines,
        }
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    pub const fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// Lines on screen, clamped to the document.
    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.offset + self.height as usize).min(self.total_lines);
        self.offset.min(end)..end
    }

    /// Document line shown at pane row `row`.
    pub fn line_at_row(&self, row: u16) -> Option<usize> {
        let line = self.offset + row as usize;
        (row < self.height && line < self.total_lines).then_some(line)
    }

    /// How far through the document, 0-100.
    pub fn scroll_percent(&self) -> u8 {
        let max_offset = self.max_offset();
        if max_offset == 0 {
            return 100;
        }
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        {
            ((self.offset as f64 / max_offset as f64) * 100.0).round() as u8
        }
    }

    pub const fn can_scroll_up(&self) -> bool {
        self.offset > 0
    }

    pub const fn can_scroll_down(&self) -> bool {
        self.offset < self.max_offset()
    }

    pub const fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.offset = (self.offset + n).min(self.max_offset());
    }

    pub const fn page_up(&mut self) {
        self.scroll_up(self.height as usize);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.height as usize);
    }

    pub const fn half_page_up(&mut self) {
        self.scroll_up(self.height as usize / 2);
    }

    pub fn half_page_down(&mut self) {
        self.scroll_down(self.height as usize / 2);
    }

    pub const fn go_to_top(&mut self) {
        self.offset = 0;
    }

    pub const fn go_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Put `line` at the top of the pane, or as close as the document
    /// length allows.
    pub fn go_to_line(&mut self, line: usize) {
        self.offset = line.min(self.max_offset());
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Relayout changed the document length.
    pub fn set_total_lines(&mut self, total: usize) {
        self.total_lines = total;
        self.offset = self.offset.min(self.max_offset());
    }

    const fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.height as usize)
    }
}
