//! TUI color theme.

use ratatui::style::Color;

/// TUI color theme
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub panel_background: Color,
    pub text: Color,
    pub text_muted: Color,
    pub border: Color,
    pub accent: Color,
    pub user_label: Color,
    pub assistant_label: Color,
    pub star: Color,
    pub danger: Color,
    pub selection_bg: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(30, 30, 30),
            panel_background: Color::Rgb(37, 37, 38),
            text: Color::Rgb(212, 212, 212),
            text_muted: Color::Rgb(128, 128, 128),
            border: Color::Rgb(60, 60, 60),
            accent: Color::Rgb(0, 122, 204),
            user_label: Color::Cyan,
            assistant_label: Color::Rgb(114, 185, 118),
            star: Color::Rgb(255, 193, 7),
            danger: Color::Rgb(244, 67, 54),
            selection_bg: Color::Rgb(55, 55, 58),
            highlight_bg: Color::Rgb(187, 170, 64),
            highlight_fg: Color::Rgb(20, 20, 20),
        }
    }
}
