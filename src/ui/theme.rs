//! Marquee theme for omdbtui
//!
//! Color palette and style helpers for the TUI: warm marquee amber on a
//! dark auditorium background.

use ratatui::style::{Color, Modifier, Style};

/// Marquee color palette
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #101014 (auditorium dark)
    pub const BACKGROUND: Color = Color::Rgb(0x10, 0x10, 0x14);

    /// Primary: #ffc53d (marquee amber)
    pub const PRIMARY: Color = Color::Rgb(0xff, 0xc5, 0x3d);

    /// Secondary: #e5484d (curtain red)
    pub const SECONDARY: Color = Color::Rgb(0xe5, 0x48, 0x4d);

    /// Accent: #70e1f5 (projector blue)
    pub const ACCENT: Color = Color::Rgb(0x70, 0xe1, 0xf5);

    /// Text: #ececec
    pub const TEXT: Color = Color::Rgb(0xec, 0xec, 0xec);

    /// Dim: #6e6e7a
    pub const DIM: Color = Color::Rgb(0x6e, 0x6e, 0x7a);

    /// Error: #ff4d4f
    pub const ERROR: Color = Color::Rgb(0xff, 0x4d, 0x4f);

    /// Slightly lighter background for panels and the search box
    pub const BACKGROUND_LIGHT: Color = Color::Rgb(0x1c, 0x1c, 0x24);

    /// Border color (dim amber)
    pub const BORDER: Color = Color::Rgb(0x80, 0x62, 0x1e);

    /// Border color when focused
    pub const BORDER_FOCUSED: Color = Self::PRIMARY;

    /// Poster placeholder fill
    pub const PLACEHOLDER: Color = Color::Rgb(0x3a, 0x3a, 0x44);

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    /// Selected row (inverted with primary color)
    pub fn highlighted() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::ERROR).add_modifier(Modifier::BOLD)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn secondary() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    pub fn accent() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    pub fn border_focused() -> Style {
        Style::default()
            .fg(Self::BORDER_FOCUSED)
            .add_modifier(Modifier::BOLD)
    }

    pub fn input() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    pub fn keybind() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    pub fn loading() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Year metadata
    pub fn year() -> Style {
        Style::default().fg(Self::DIM)
    }

    /// Media type tag ("Movie", "Series")
    pub fn media_type() -> Style {
        Style::default().fg(Self::SECONDARY)
    }
}
