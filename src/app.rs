//! App state and core application logic
//!
//! Owns the search box, the results list selection, the search state machine
//! and the poster thumbnails for the current result set. Everything here runs
//! on the UI task; network work is spawned and reported back through channels.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use image::DynamicImage;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

use crate::images::ImageCache;
use crate::models::SearchResult;
use crate::search::{SearchMachine, SearchState};
use crate::ui::poster::PosterLines;

// =============================================================================
// Input Mode
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputMode {
    /// List navigation mode
    Normal,
    /// Text input mode (search box focused)
    #[default]
    Editing,
}

// =============================================================================
// Selection State
// =============================================================================

/// Selection state for the results list
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Scroll offset for viewport
    pub offset: usize,
    /// Total number of items
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self {
            selected: 0,
            offset: 0,
            len,
        }
    }

    /// Move selection up
    pub fn up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            if self.selected < self.offset {
                self.offset = self.selected;
            }
        }
    }

    /// Move selection down
    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    pub fn page_up(&mut self, page_size: usize) {
        self.selected = self.selected.saturating_sub(page_size);
        if self.selected < self.offset {
            self.offset = self.selected;
        }
    }

    pub fn page_down(&mut self, page_size: usize) {
        if self.len > 0 {
            self.selected = (self.selected + page_size).min(self.len - 1);
        }
    }

    pub fn first(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    pub fn last(&mut self) {
        if self.len > 0 {
            self.selected = self.len - 1;
        }
    }

    /// Update offset to keep selected item visible
    pub fn scroll_into_view(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + visible_height {
            self.offset = self.selected + 1 - visible_height;
        }
    }

    /// Replace the list contents, resetting selection
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.selected = 0;
        self.offset = 0;
    }
}

// =============================================================================
// Search Box
// =============================================================================

/// Editable query text with a cursor (cursor counts chars, not bytes)
#[derive(Debug, Clone, Default)]
pub struct SearchBox {
    pub query: String,
    pub cursor: usize,
}

impl SearchBox {
    fn byte_index(&self, char_idx: usize) -> usize {
        self.query
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.query.len())
    }

    fn char_len(&self) -> usize {
        self.query.chars().count()
    }

    /// Insert character at cursor
    pub fn insert(&mut self, c: char) {
        let idx = self.byte_index(self.cursor);
        self.query.insert(idx, c);
        self.cursor += 1;
    }

    /// Delete character before cursor. Returns true if the text changed.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let idx = self.byte_index(self.cursor);
        self.query.remove(idx);
        true
    }

    /// Delete character at cursor. Returns true if the text changed.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        let idx = self.byte_index(self.cursor);
        self.query.remove(idx);
        true
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Clear query. Returns true if there was anything to clear.
    pub fn clear(&mut self) -> bool {
        let changed = !self.query.is_empty();
        self.query.clear();
        self.cursor = 0;
        changed
    }

    /// Query split at the cursor, for rendering
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.query.split_at(self.byte_index(self.cursor))
    }
}

// =============================================================================
// Main Application State
// =============================================================================

/// A finished poster load: URL and the image, if it loaded
type PosterLoad = (String, Option<Arc<DynamicImage>>);

pub struct App {
    /// Whether the app is running
    pub running: bool,
    pub input_mode: InputMode,
    pub search_box: SearchBox,
    pub list: ListState,
    pub search: SearchMachine,
    /// Scaled art for the poster panel
    pub poster_lines: PosterLines,

    images: Arc<ImageCache>,
    /// Posters delivered for the current result set, keyed by URL
    thumbnails: HashMap<String, Arc<DynamicImage>>,
    requested: HashSet<String>,
    poster_tx: mpsc::UnboundedSender<PosterLoad>,
    poster_rx: mpsc::UnboundedReceiver<PosterLoad>,
}

impl App {
    pub fn new(search: SearchMachine, images: Arc<ImageCache>) -> Self {
        let (poster_tx, poster_rx) = mpsc::unbounded_channel();
        Self {
            running: true,
            input_mode: InputMode::Editing,
            search_box: SearchBox::default(),
            list: ListState::default(),
            search,
            poster_lines: PosterLines::default(),
            images,
            thumbnails: HashMap::new(),
            requested: HashSet::new(),
            poster_tx,
            poster_rx,
        }
    }

    pub fn state(&self) -> &SearchState {
        self.search.state()
    }

    pub fn results(&self) -> &[SearchResult] {
        self.search.state().results()
    }

    /// Get currently selected result
    pub fn selected_result(&self) -> Option<&SearchResult> {
        self.results().get(self.list.selected)
    }

    /// Poster delivered for a result, if any
    pub fn thumbnail(&self, result: &SearchResult) -> Option<&Arc<DynamicImage>> {
        result.poster().and_then(|url| self.thumbnails.get(url))
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }

    // -------------------------------------------------------------------------
    // Async Progress
    // -------------------------------------------------------------------------

    /// Advance debounce, apply finished searches and posters.
    /// Returns true if anything visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = self.search.tick(now);
        changed |= self.search.poll();
        if changed {
            self.on_state_change();
        }
        changed | self.poll_posters()
    }

    /// Submit the current query immediately (Enter)
    pub fn submit(&mut self) {
        if self.search.submit(&self.search_box.query) {
            self.on_state_change();
        }
    }

    fn on_state_change(&mut self) {
        let len = self.results().len();
        self.list.reset(len);
        self.thumbnails.clear();
        self.requested.clear();
        self.request_posters();
    }

    /// Start a cache-checked poster load for every result row
    fn request_posters(&mut self) {
        let urls: Vec<String> = self
            .results()
            .iter()
            .filter_map(|r| r.poster().map(String::from))
            .collect();

        for url in urls {
            if !self.requested.insert(url.clone()) {
                continue;
            }

            if let Some(image) = self.images.get_cached(&url) {
                self.thumbnails.insert(url, image);
                continue;
            }

            let images = Arc::clone(&self.images);
            let tx = self.poster_tx.clone();
            tokio::spawn(async move {
                let image = images.load(&url, true).await;
                let _ = tx.send((url, image));
            });
        }
    }

    fn poll_posters(&mut self) -> bool {
        let mut changed = false;
        while let Ok((url, image)) = self.poster_rx.try_recv() {
            // Loads for a previous result set arrive after `requested` was reset
            if let (true, Some(image)) = (self.requested.contains(&url), image) {
                self.thumbnails.insert(url, image);
                changed = true;
            }
        }
        changed
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returns true if event was consumed
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        if self.input_mode == InputMode::Editing {
            self.handle_editing_key(key, now)
        } else {
            self.handle_normal_key(key)
        }
    }

    /// Handle keys in editing (text input) mode
    fn handle_editing_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        let edited = match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                return true;
            }
            KeyCode::Enter => {
                self.submit();
                return true;
            }
            KeyCode::Up => {
                self.list.up();
                return true;
            }
            KeyCode::Down => {
                self.list.down();
                return true;
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search_box.clear()
            }
            KeyCode::Char(c) => {
                self.search_box.insert(c);
                true
            }
            KeyCode::Backspace => self.search_box.backspace(),
            KeyCode::Delete => self.search_box.delete(),
            KeyCode::Left => {
                self.search_box.cursor_left();
                return true;
            }
            KeyCode::Right => {
                self.search_box.cursor_right();
                return true;
            }
            KeyCode::Home => {
                self.search_box.cursor_home();
                return true;
            }
            KeyCode::End => {
                self.search_box.cursor_end();
                return true;
            }
            _ => return false,
        };

        if edited {
            self.search.input(&self.search_box.query, now);
        }
        true
    }

    /// Handle keys in normal navigation mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('/') | KeyCode::Char('i') | KeyCode::Esc => {
                self.input_mode = InputMode::Editing;
            }
            KeyCode::Up | KeyCode::Char('k') => self.list.up(),
            KeyCode::Down | KeyCode::Char('j') => self.list.down(),
            KeyCode::PageUp => self.list.page_up(10),
            KeyCode::PageDown => self.list.page_down(10),
            KeyCode::Home | KeyCode::Char('g') => self.list.first(),
            KeyCode::End | KeyCode::Char('G') => self.list.last(),
            KeyCode::Enter => self.submit(),
            _ => return false,
        }
        true
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("running", &self.running)
            .field("input_mode", &self.input_mode)
            .field("search_box", &self.search_box)
            .field("list", &self.list)
            .field("search", &self.search)
            .field("thumbnails", &self.thumbnails.len())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
