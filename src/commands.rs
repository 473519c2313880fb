//! CLI Command Handlers
//!
//! Each handler takes CLI args and Output, returns ExitCode.

use serde::Serialize;
use std::sync::Arc;

use crate::api::{HttpImageFetcher, MovieService, OmdbClient};
use crate::cli::{ExitCode, Output, PosterCmd, SearchCmd};
use crate::config::Config;
use crate::images::ImageCache;
use crate::models::SearchResponse;

// =============================================================================
// Search Command
// =============================================================================

pub async fn search_cmd(cmd: SearchCmd, config: &Config, output: &Output) -> ExitCode {
    let client = OmdbClient::with_base_url(config.api_key(), config.base_url());
    search_with(&client, cmd, output).await
}

/// Run a search against any service; split out so tests can inject one
pub async fn search_with(service: &dyn MovieService, cmd: SearchCmd, output: &Output) -> ExitCode {
    output.info(format!("Searching for: {}", cmd.title));

    match service.search(&cmd.title).await.and_then(SearchResponse::into_result) {
        Ok(response) => {
            let mut results = response.results;
            results.truncate(cmd.limit);

            let lines: Vec<String> = results.iter().map(|r| format!("{}  {}", r.id, r)).collect();
            if let Err(e) = output.print_lines(&results, &lines) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(e) => output.error(e.to_string(), e.into()),
    }
}

// =============================================================================
// Poster Command
// =============================================================================

#[derive(Debug, Serialize)]
struct PosterInfo<'a> {
    url: &'a str,
    width: u32,
    height: u32,
}

pub async fn poster_cmd(cmd: PosterCmd, config: &Config, output: &Output) -> ExitCode {
    let cache = ImageCache::new(
        Arc::new(HttpImageFetcher::new()),
        config.image_cache_capacity(),
    );
    poster_with(&cache, cmd, output).await
}

pub async fn poster_with(cache: &ImageCache, cmd: PosterCmd, output: &Output) -> ExitCode {
    output.info(format!("Fetching poster: {}", cmd.url));

    match cache.load(&cmd.url, true).await {
        Some(image) => {
            let info = PosterInfo {
                url: &cmd.url,
                width: image.width(),
                height: image.height(),
            };
            let lines = vec![format!("{}x{}", info.width, info.height)];
            if let Err(e) = output.print_lines(&info, &lines) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        None => output.error("Could not load poster image", ExitCode::NetworkError),
    }
}
