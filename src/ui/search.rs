//! Search box
//!
//! Logo on the left, query input with cursor on the right.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::{App, InputMode};
use crate::ui::Theme;

pub const PLACEHOLDER: &str = "Search or enter movie name";

/// Text shown in the search box for the current query and mode
pub fn display_text(app: &App) -> String {
    if app.input_mode == InputMode::Editing {
        let (before, after) = app.search_box.split_at_cursor();
        format!("⌕ {}│{}", before, after)
    } else if app.search_box.query.is_empty() {
        format!("⌕ {}", PLACEHOLDER)
    } else {
        format!("⌕ {}", app.search_box.query)
    }
}

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(14), Constraint::Min(1)])
        .split(area);

    let logo = Paragraph::new(Line::from(vec![
        Span::styled("OMDb", Theme::title()),
        Span::styled("TUI", Theme::secondary().add_modifier(Modifier::BOLD)),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(logo, chunks[0]);

    let editing = app.input_mode == InputMode::Editing;
    let text_style = if editing {
        Theme::input().fg(Theme::PRIMARY)
    } else if app.search_box.query.is_empty() {
        Theme::input().fg(Theme::DIM)
    } else {
        Theme::input()
    };

    let search_box = Paragraph::new(display_text(app)).style(text_style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if editing {
                Theme::border_focused()
            } else {
                Theme::border()
            })
            .title(Span::styled(" SEARCH ", Theme::title())),
    );
    frame.render_widget(search_box, chunks[1]);
}
