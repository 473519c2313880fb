//! Poster image cache
//!
//! An explicitly constructed, LRU-bounded map from absolute URL to decoded
//! image. Share it behind an `Arc`; every component that shows posters gets
//! the same instance handed to it.

use image::DynamicImage;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

use crate::api::{Fetched, ImageFetcher};

/// Default number of decoded posters kept in memory
pub const DEFAULT_CAPACITY: usize = 256;

pub struct ImageCache {
    fetcher: Arc<dyn ImageFetcher>,
    entries: Mutex<LruCache<String, Arc<DynamicImage>>>,
}

impl ImageCache {
    pub fn new(fetcher: Arc<dyn ImageFetcher>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            fetcher,
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Load an image, from the cache when allowed, otherwise over the network.
    ///
    /// Failures of any kind yield `None`; callers keep their placeholder.
    pub async fn load(&self, url: &str, use_cache: bool) -> Option<Arc<DynamicImage>> {
        let key = absolute_url(url)?;

        if use_cache {
            let hit = self.lock().get(&key).cloned();
            if hit.is_some() {
                return hit;
            }
        }

        let fetched = match self.fetcher.fetch(&key).await {
            Ok(fetched) => fetched,
            Err(e) => {
                debug!(url = %key, error = %e, "poster fetch failed");
                return None;
            }
        };

        let image = Arc::new(decode(&key, fetched)?);
        self.lock().put(key, Arc::clone(&image));
        Some(image)
    }

    /// Cache lookup without fetching, for render paths
    pub fn get_cached(&self, url: &str) -> Option<Arc<DynamicImage>> {
        let key = absolute_url(url)?;
        self.lock().get(&key).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<String, Arc<DynamicImage>>> {
        // A poisoned cache still holds valid images
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for ImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

/// Normalized absolute form of a URL, or `None` if it isn't one
fn absolute_url(url: &str) -> Option<String> {
    match reqwest::Url::parse(url.trim()) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Some(parsed.to_string()),
        _ => None,
    }
}

/// Accept only 200 + image/* + decodable bytes
fn decode(url: &str, fetched: Fetched) -> Option<DynamicImage> {
    if fetched.status != 200 {
        debug!(url, status = fetched.status, "poster fetch non-200");
        return None;
    }

    let is_image = fetched
        .content_type
        .as_deref()
        .map(|mime| mime.trim().to_ascii_lowercase().starts_with("image"))
        .unwrap_or(false);
    if !is_image {
        debug!(url, content_type = ?fetched.content_type, "poster is not an image");
        return None;
    }

    match image::load_from_memory(&fetched.bytes) {
        Ok(img) => Some(img),
        Err(e) => {
            debug!(url, error = %e, "poster decode failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FetchError;
    use async_trait::async_trait;
    use image::{ImageBuffer, ImageFormat, Rgb};
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn png_bytes() -> Vec<u8> {
        let img = ImageBuffer::from_pixel(2, 3, Rgb([200u8, 10, 10]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    struct FakeFetcher {
        response: Fetched,
        calls: AtomicUsize,
    }

    impl FakeFetcher {
        fn new(status: u16, content_type: Option<&str>, bytes: Vec<u8>) -> Arc<Self> {
            Arc::new(Self {
                response: Fetched {
                    status,
                    content_type: content_type.map(String::from),
                    bytes,
                },
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ImageFetcher for FakeFetcher {
        async fn fetch(&self, _url: &str) -> Result<Fetched, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }
    }

    #[tokio::test]
    async fn test_second_load_hits_cache() {
        let fetcher = FakeFetcher::new(200, Some("image/png"), png_bytes());
        let cache = ImageCache::new(fetcher.clone(), 8);

        let first = cache.load("https://img.example/a.png", true).await.unwrap();
        let second = cache.load("https://img.example/a.png", true).await.unwrap();

        assert_eq!(fetcher.calls(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!((first.width(), first.height()), (2, 3));
    }

    #[tokio::test]
    async fn test_bypass_cache_refetches() {
        let fetcher = FakeFetcher::new(200, Some("image/png"), png_bytes());
        let cache = ImageCache::new(fetcher.clone(), 8);

        cache.load("https://img.example/a.png", true).await.unwrap();
        cache.load("https://img.example/a.png", false).await.unwrap();
        assert_eq!(fetcher.calls(), 2);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_rejects_non_200() {
        let fetcher = FakeFetcher::new(404, Some("image/png"), png_bytes());
        let cache = ImageCache::new(fetcher, 8);
        assert!(cache.load("https://img.example/a.png", true).await.is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_rejects_wrong_mime() {
        let fetcher = FakeFetcher::new(200, Some("text/html"), png_bytes());
        let cache = ImageCache::new(fetcher, 8);
        assert!(cache.load("https://img.example/a.png", true).await.is_none());

        let fetcher = FakeFetcher::new(200, None, png_bytes());
        let cache = ImageCache::new(fetcher, 8);
        assert!(cache.load("https://img.example/a.png", true).await.is_none());
    }

    #[tokio::test]
    async fn test_rejects_undecodable_bytes() {
        let fetcher = FakeFetcher::new(200, Some("image/jpeg"), b"not an image".to_vec());
        let cache = ImageCache::new(fetcher, 8);
        assert!(cache.load("https://img.example/a.jpg", true).await.is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_non_url_is_not_fetched() {
        let fetcher = FakeFetcher::new(200, Some("image/png"), png_bytes());
        let cache = ImageCache::new(fetcher.clone(), 8);
        assert!(cache.load("N/A", true).await.is_none());
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_lru_evicts_oldest() {
        let fetcher = FakeFetcher::new(200, Some("image/png"), png_bytes());
        let cache = ImageCache::new(fetcher.clone(), 2);

        cache.load("https://img.example/1.png", true).await.unwrap();
        cache.load("https://img.example/2.png", true).await.unwrap();
        // touch 1 so 2 becomes least recently used
        assert!(cache.get_cached("https://img.example/1.png").is_some());
        cache.load("https://img.example/3.png", true).await.unwrap();

        assert_eq!(cache.len(), 2);
        assert!(cache.get_cached("https://img.example/1.png").is_some());
        assert!(cache.get_cached("https://img.example/2.png").is_none());
        assert!(cache.get_cached("https://img.example/3.png").is_some());
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let fetcher = FakeFetcher::new(200, Some("image/png"), png_bytes());
        let cache = ImageCache::new(fetcher, 0);
        assert_eq!(cache.capacity(), 1);
    }

    #[test]
    fn test_absolute_url_normalizes() {
        assert_eq!(
            absolute_url("HTTPS://Img.Example/a.png").as_deref(),
            Some("https://img.example/a.png")
        );
        assert_eq!(absolute_url("N/A"), None);
        assert_eq!(absolute_url("ftp://img.example/a.png"), None);
    }
}
