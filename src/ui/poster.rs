//! Poster preview
//!
//! Draws a decoded poster with upper-half-block cells: each terminal cell
//! carries two vertically stacked pixels (foreground = top, background =
//! bottom).

use image::{imageops::FilterType, DynamicImage};
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::ui::Theme;

const HALF_BLOCK: &str = "▀";

/// Rasterize an image into at most `width` x `height` cells, keeping aspect
pub fn poster_lines(image: &DynamicImage, width: u16, height: u16) -> Vec<Line<'static>> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let scaled = image
        .resize(width as u32, height as u32 * 2, FilterType::Triangle)
        .to_rgb8();
    let (w, h) = scaled.dimensions();

    (0..h)
        .step_by(2)
        .map(|y| {
            let spans: Vec<Span<'static>> = (0..w)
                .map(|x| {
                    let top = scaled.get_pixel(x, y);
                    let bottom = if y + 1 < h {
                        let p = scaled.get_pixel(x, y + 1);
                        Color::Rgb(p[0], p[1], p[2])
                    } else {
                        Theme::BACKGROUND
                    };
                    Span::styled(
                        HALF_BLOCK,
                        Style::default()
                            .fg(Color::Rgb(top[0], top[1], top[2]))
                            .bg(bottom),
                    )
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// Scaled lines for the poster on screen, rebuilt only when the poster URL
/// or the panel size changes
#[derive(Debug, Default)]
pub struct PosterLines {
    key: Option<(String, u16, u16)>,
    lines: Vec<Line<'static>>,
}

impl PosterLines {
    pub fn get(
        &mut self,
        url: &str,
        image: &DynamicImage,
        width: u16,
        height: u16,
    ) -> &[Line<'static>] {
        let fresh = matches!(&self.key, Some((u, w, h)) if u == url && *w == width && *h == height);
        if !fresh {
            self.lines = poster_lines(image, width, height);
            self.key = Some((url.to_string(), width, height));
        }
        &self.lines
    }
}

/// Render the poster panel for the selected result
pub fn render(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    poster: Option<(&str, &DynamicImage)>,
    cache: &mut PosterLines,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(" POSTER ", Theme::title()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Leave one line for the caption
    let art = Rect {
        height: inner.height.saturating_sub(1),
        ..inner
    };
    let caption = Rect {
        y: inner.y + art.height,
        height: inner.height.min(1),
        ..inner
    };

    match poster {
        Some((url, image)) => {
            let lines = cache.get(url, image, art.width, art.height).to_vec();
            frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), art);
        }
        None => {
            let placeholder = Paragraph::new(vec![Line::from(""), Line::from("🎬")])
                .alignment(Alignment::Center)
                .style(Style::default().fg(Theme::DIM).bg(Theme::PLACEHOLDER));
            frame.render_widget(placeholder, art);
        }
    }

    frame.render_widget(
        Paragraph::new(Span::styled(title.to_string(), Theme::dimmed())).alignment(Alignment::Center),
        caption,
    );
}
