//! Colors for the terminal viewer.
//!
//! With no stored theme the palette uses plain ANSI colors so the
//! terminal's own scheme shows through; an explicit light or dark choice
//! paints the background as well.

use ratatui::style::{Color, Modifier, Style};

use crate::document::LineType;
use crate::theme::ThemeMode;

/// Colors for one theme mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub heading: Color,
    pub source: Color,
    pub translation: Color,
    pub accent: Color,
    pub muted: Color,
    pub error: Color,
    pub status_bg: Color,
    pub status_fg: Color,
}

impl Palette {
    pub const fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Unset => Self {
                background: Color::Reset,
                text: Color::Reset,
                heading: Color::Cyan,
                source: Color::Reset,
                translation: Color::Green,
                accent: Color::Yellow,
                muted: Color::Indexed(245),
                error: Color::Red,
                status_bg: Color::DarkGray,
                status_fg: Color::White,
            },
            ThemeMode::Dark => Self {
                background: Color::Indexed(234),
                text: Color::Indexed(252),
                heading: Color::Indexed(117),
                source: Color::Indexed(230),
                translation: Color::Indexed(151),
                accent: Color::Indexed(221),
                muted: Color::Indexed(244),
                error: Color::Indexed(203),
                status_bg: Color::Indexed(237),
                status_fg: Color::Indexed(252),
            },
            ThemeMode::Light => Self {
                background: Color::Indexed(255),
                text: Color::Indexed(235),
                heading: Color::Indexed(24),
                source: Color::Indexed(52),
                translation: Color::Indexed(22),
                accent: Color::Indexed(130),
                muted: Color::Indexed(242),
                error: Color::Indexed(124),
                status_bg: Color::Indexed(252),
                status_fg: Color::Indexed(235),
            },
        }
    }

    /// Base style of the panes.
    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn status(&self) -> Style {
        Style::default().fg(self.status_fg).bg(self.status_bg)
    }
}

/// Style of a line or span of kind `line_type` under `mode`.
pub fn style_for_line_type(line_type: LineType, mode: ThemeMode) -> Style {
    let palette = Palette::for_mode(mode);
    let base = palette.base();
    match line_type {
        LineType::Heading => base
            .fg(palette.heading)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        LineType::Toggle => base.fg(palette.accent),
        LineType::Source => base.fg(palette.source),
        LineType::Translation => base.fg(palette.translation),
        LineType::BlockLabel => base.fg(palette.muted).add_modifier(Modifier::BOLD),
        LineType::Commentary => base.add_modifier(Modifier::ITALIC),
        LineType::Apparatus => base.fg(palette.muted),
        LineType::Error => base.fg(palette.error).add_modifier(Modifier::BOLD),
        LineType::Paragraph | LineType::Empty => base,
    }
}
