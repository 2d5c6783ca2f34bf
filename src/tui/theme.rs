//! TUI theme and styles
//!
//! A dark, Darcula-like palette. Syntax colors follow the token classes
//! produced by [`crate::core::highlight`].

use ratatui::style::{Color, Modifier, Style};

use crate::core::content::{ContentNode, DocumentFormat};
use crate::core::highlight::TokenKind;

/// Application color theme
pub struct Theme;

impl Theme {
    pub const BACKGROUND: Color = Color::Rgb(0x1E, 0x1E, 0x1E);
    pub const SURFACE: Color = Color::Rgb(0x25, 0x25, 0x26);
    pub const SURFACE_VARIANT: Color = Color::Rgb(0x2D, 0x2D, 0x30);

    pub const ON_BACKGROUND: Color = Color::Rgb(0xD4, 0xD4, 0xD4);
    pub const ON_SURFACE: Color = Color::Rgb(0xCC, 0xCC, 0xCC);

    pub const KEYWORD: Color = Color::Rgb(0x56, 0x9C, 0xD6);
    pub const STRING: Color = Color::Rgb(0xCE, 0x91, 0x78);
    pub const COMMENT: Color = Color::Rgb(0x6A, 0x99, 0x55);
    pub const NUMBER: Color = Color::Rgb(0xB5, 0xCE, 0xA8);
    pub const TYPE: Color = Color::Rgb(0x4E, 0xC9, 0xB0);

    /// Primary accent color
    pub const PRIMARY: Color = Color::Rgb(0x00, 0x7A, 0xCC);
    pub const SECONDARY: Color = Color::Rgb(0x37, 0x37, 0x3D);
    pub const TAB_BORDER: Color = Color::Rgb(0x3E, 0x3E, 0x42);

    pub const FOLDER_ICON: Color = Color::Rgb(0xDC, 0xB6, 0x7A);
    pub const SOURCE_ICON: Color = Color::Rgb(0x7F, 0x52, 0xFF);
    pub const MARKDOWN_ICON: Color = Color::Rgb(0x03, 0x66, 0xD6);

    /// Muted text color
    pub const MUTED: Color = Color::Rgb(0x85, 0x85, 0x85);

    /// Header bars (explorer title, file header, compact header)
    pub fn header() -> Style {
        Style::default()
            .bg(Self::SURFACE_VARIANT)
            .fg(Self::ON_SURFACE)
            .add_modifier(Modifier::BOLD)
    }

    /// Status bar style
    pub fn status_bar() -> Style {
        Style::default().bg(Self::PRIMARY).fg(Color::White)
    }

    /// Selected item style
    pub fn selected() -> Style {
        Style::default().bg(Self::SECONDARY).fg(Color::White)
    }

    /// Selected item style while its pane has focus
    pub fn selected_focused() -> Style {
        Style::default().bg(Self::PRIMARY).fg(Color::White)
    }

    /// Normal text style
    pub fn normal() -> Style {
        Style::default().fg(Self::ON_BACKGROUND)
    }

    /// Muted text style
    pub fn muted() -> Style {
        Style::default().fg(Self::MUTED)
    }

    pub fn border(focused: bool) -> Style {
        if focused {
            Style::default().fg(Self::PRIMARY)
        } else {
            Style::default().fg(Self::TAB_BORDER)
        }
    }

    pub fn tab(active: bool) -> Style {
        if active {
            Style::default()
                .bg(Self::BACKGROUND)
                .fg(Self::ON_SURFACE)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().bg(Self::SURFACE_VARIANT).fg(Self::MUTED)
        }
    }

    pub fn run_button() -> Style {
        Style::default()
            .bg(Self::PRIMARY)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    /// Syntax color for a token class
    pub fn token(kind: TokenKind) -> Style {
        let base = Style::default();
        match kind {
            TokenKind::Comment => base.fg(Self::COMMENT).add_modifier(Modifier::ITALIC),
            TokenKind::Keyword => base.fg(Self::KEYWORD).add_modifier(Modifier::BOLD),
            TokenKind::String => base.fg(Self::STRING),
            TokenKind::Number => base.fg(Self::NUMBER),
            TokenKind::Type => base.fg(Self::TYPE),
            TokenKind::Punctuation | TokenKind::Whitespace | TokenKind::Plain => {
                base.fg(Self::ON_BACKGROUND)
            }
        }
    }

    /// Icon glyph and color for a node
    pub fn icon(node: &ContentNode) -> (&'static str, Color) {
        if node.is_folder() {
            let glyph = if node.is_expanded() {
                icons::FOLDER_OPEN
            } else {
                icons::FOLDER
            };
            return (glyph, Self::FOLDER_ICON);
        }

        match node.format() {
            DocumentFormat::Source => (icons::SOURCE, Self::SOURCE_ICON),
            DocumentFormat::Markdown => (icons::MARKDOWN, Self::MARKDOWN_ICON),
            DocumentFormat::Plain => (icons::PLAIN, Self::ON_SURFACE),
        }
    }
}

pub mod icons {
    pub const EXPANDED: &str = "▾";
    pub const COLLAPSED: &str = "▸";
    pub const FOLDER: &str = "□";
    pub const FOLDER_OPEN: &str = "■";
    pub const SOURCE: &str = "λ";
    pub const MARKDOWN: &str = "¶";
    pub const PLAIN: &str = "·";
    pub const CLOSE: &str = "×";
    pub const RUN: &str = "▶";
    pub const MENU: &str = "≡";
}
