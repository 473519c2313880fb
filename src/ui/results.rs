//! Results list
//!
//! One row per search hit: poster indicator, title, year, media type.
//! Also draws the non-success states (welcome, loading, error) in the
//! same panel.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

use crate::app::App;
use crate::models::SearchResult;
use crate::search::SearchState;
use crate::ui::Theme;

/// Poster loaded / placeholder markers
const POSTER_LOADED: &str = "▣";
const POSTER_PENDING: &str = "□";

/// Render the results panel for the current search state
pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let count = app.results().len();
    let title = if count > 0 {
        format!(" RESULTS ({}/{}) ", app.list.selected + 1, count)
    } else {
        " RESULTS ".to_string()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(title, Theme::title()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let message = match app.state() {
        SearchState::Idle => {
            render_welcome(frame, inner, app.search.min_query_len() + 1);
            return;
        }
        SearchState::Loading => Some(("⟳ Searching...".to_string(), Theme::loading())),
        SearchState::Error(e) => Some((e.to_string(), Theme::error())),
        SearchState::Success(_) if count == 0 => {
            Some(("No movies found".to_string(), Theme::error()))
        }
        SearchState::Success(_) => None,
    };

    match message {
        Some((text, style)) => render_centered(frame, inner, &text, style),
        None => render_list(frame, inner, app),
    }
}

fn render_list(frame: &mut Frame, area: Rect, app: &mut App) {
    let visible_height = area.height as usize;
    app.list.scroll_into_view(visible_height);

    let selected = app.list.selected;
    let items: Vec<ListItem> = app
        .results()
        .iter()
        .enumerate()
        .skip(app.list.offset)
        .take(visible_height)
        .map(|(i, result)| row(result, i == selected, app.thumbnail(result).is_some()))
        .collect();

    frame.render_widget(List::new(items).style(Theme::text()), area);
}

/// Format: ▸ ▣ Title (Year) [Movie]
fn row(result: &SearchResult, is_selected: bool, has_poster: bool) -> ListItem<'static> {
    let marker = if is_selected { "▸ " } else { "  " };
    let poster = if has_poster { POSTER_LOADED } else { POSTER_PENDING };

    let line = Line::from(vec![
        Span::styled(
            marker,
            if is_selected { Theme::accent() } else { Theme::dimmed() },
        ),
        Span::styled(
            format!("{} ", poster),
            if has_poster { Theme::accent() } else { Theme::dimmed() },
        ),
        Span::styled(
            result.title.clone(),
            if is_selected { Theme::highlighted() } else { Theme::text() },
        ),
        Span::styled(format!(" ({})", result.year), Theme::year()),
        Span::raw(" "),
        Span::styled(format!("[{}]", result.media_type_label()), Theme::media_type()),
    ]);

    ListItem::new(line)
}

fn render_welcome(frame: &mut Frame, area: Rect, min_chars: usize) {
    let welcome = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("🍿", Theme::title())),
        Line::from(""),
        Line::from(Span::styled("OMDb Movies", Theme::title())),
        Line::from(Span::styled("Search for your favorite movies!", Theme::text())),
        Line::from(""),
        Line::from(vec![
            Span::styled(" type ", Theme::keybind()),
            Span::styled(format!("at least {} characters", min_chars), Theme::dimmed()),
        ]),
    ])
    .alignment(Alignment::Center);

    frame.render_widget(welcome, area);
}

fn render_centered(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let top = area.height.saturating_sub(1) / 2;
    let line_area = Rect {
        y: area.y + top,
        height: area.height.min(1),
        ..area
    };
    frame.render_widget(
        Paragraph::new(Span::styled(text.to_string(), style)).alignment(Alignment::Center),
        line_area,
    );
}
