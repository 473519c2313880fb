//! API clients for external services
//!
//! - OMDb: title search
//! - Poster: plain HTTP fetch of thumbnail images

pub mod omdb;
pub mod poster;

pub use omdb::{MovieService, OmdbClient};
pub use poster::{FetchError, Fetched, HttpImageFetcher, ImageFetcher};
