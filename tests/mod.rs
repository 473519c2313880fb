//! Integration tests for omdbtui
//!
//! Tests are organized by component:
//! - omdb_test: OMDb client over HTTP (mockito)
//! - search_test: Search state machine driven by a mock service
//! - image_cache_test: Poster cache over HTTP (mockito)
//! - ui_test: Rendering with ratatui's TestBackend
//! - cli_test: Argument parsing and command handlers

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
