//! omdbtui - search the OMDb movie database from your terminal
//!
//! Type a title, browse matching movies and series, preview posters.
//!
//! # Modules
//!
//! - `models` - Search results, the OMDb envelope, error kinds
//! - `api` - OMDb client and poster transport
//! - `search` - Debounced search state machine
//! - `images` - LRU poster cache
//! - `app` - Application state and key handling
//! - `ui` - TUI components
//! - `cli` / `commands` - Scriptable subcommands
//! - `config` / `logging` - Ambient setup

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod images;
pub mod logging;
pub mod models;
pub mod search;
pub mod ui;

// Re-export commonly used types
pub use api::{HttpImageFetcher, ImageFetcher, MovieService, OmdbClient};
pub use app::{App, InputMode};
pub use config::Config;
pub use images::ImageCache;
pub use models::{SearchError, SearchResponse, SearchResult};
pub use search::{SearchMachine, SearchState};
