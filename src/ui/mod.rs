//! Terminal UI components
//!
//! Built with ratatui. One screen: search box on top, results list with a
//! poster preview beside it, status bar at the bottom.

pub mod poster;
pub mod results;
pub mod search;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    prelude::*,
    widgets::{Block, Clear, Paragraph},
};

use std::sync::Arc;

use crate::app::{App, InputMode};

/// Below this width the poster panel is hidden
pub const POSTER_MIN_TERMINAL_WIDTH: u16 = 70;
const POSTER_PANEL_WIDTH: u16 = 26;

/// Main render function
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Style::default().bg(Theme::BACKGROUND)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search box
            Constraint::Min(1),    // Results
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    search::render(frame, chunks[0], app);
    render_content(frame, chunks[1], app);
    render_status_bar(frame, chunks[2], app);
}

fn render_content(frame: &mut Frame, area: Rect, app: &mut App) {
    if area.width < POSTER_MIN_TERMINAL_WIDTH {
        results::render(frame, area, app);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(POSTER_PANEL_WIDTH)])
        .split(area);

    results::render(frame, columns[0], app);

    let (title, poster) = match app.selected_result() {
        Some(result) => (
            result.title.clone(),
            result
                .poster()
                .zip(app.thumbnail(result))
                .map(|(url, image)| (url.to_string(), Arc::clone(image))),
        ),
        None => (String::new(), None),
    };
    let poster = poster.as_ref().map(|(url, image)| (url.as_str(), image.as_ref()));
    poster::render(frame, columns[1], &title, poster, &mut app.poster_lines);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode_indicator = match app.input_mode {
        InputMode::Normal => Span::styled(
            " NORMAL ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::PRIMARY),
        ),
        InputMode::Editing => Span::styled(
            " INSERT ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::ACCENT),
        ),
    };

    let help = match app.input_mode {
        InputMode::Normal => " q:quit  /:search  ↑↓:move  ↵:search ",
        InputMode::Editing => " ESC:browse  ↵:search now  ^C:quit ",
    };

    let status_line = Line::from(vec![
        mode_indicator,
        Span::raw(" "),
        Span::styled(help, Theme::dimmed()),
    ]);

    frame.render_widget(Paragraph::new(status_line).style(Theme::status_bar()), area);
}
