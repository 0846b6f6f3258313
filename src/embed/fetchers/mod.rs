pub mod vimeo;
pub mod youtube;

use crate::cache::{ThumbnailCache, CACHE_TTL_SECS};
use crate::embed::hooks::Hooks;
use crate::embed::types::{Provider, VideoId};
use crate::transport::Transport;
use std::sync::Arc;

/// Remote lookup of a thumbnail url for one provider.
pub trait ThumbnailFetcher: Send + Sync {
    /// Resolve a thumbnail url on cache miss.
    /// Returns None when nothing usable came back; that result is not cached.
    fn fetch(&self, id: &VideoId, transport: &dyn Transport) -> Option<String>;

    fn provider(&self) -> Provider;

    /// Get the name of this fetcher for logging/debugging
    fn name(&self) -> &'static str;
}

/// `bcve_<provider>_<id>`
pub fn cache_key(provider: Provider, id: &VideoId) -> String {
    format!("bcve_{}_{}", provider.slug(), id)
}

/// Cache-first thumbnail lookup across the supported providers.
pub struct ThumbnailResolver {
    fetchers: Vec<Box<dyn ThumbnailFetcher>>,
    transport: Arc<dyn Transport>,
    cache: Arc<dyn ThumbnailCache>,
    hooks: Arc<Hooks>,
}

impl ThumbnailResolver {
    pub fn new(
        transport: Arc<dyn Transport>,
        cache: Arc<dyn ThumbnailCache>,
        hooks: Arc<Hooks>,
    ) -> Self {
        let fetchers: Vec<Box<dyn ThumbnailFetcher>> = vec![
            Box::new(youtube::YouTubeFetcher::new()),
            Box::new(vimeo::VimeoFetcher::new()),
        ];

        Self {
            fetchers,
            transport,
            cache,
            hooks,
        }
    }

    /// Thumbnail url for a video, or None when the embed should stay as is.
    ///
    /// Performs at most one remote call, and only on a cache miss. Remote and
    /// cache failures never surface as errors.
    pub fn resolve(&self, provider: Provider, id: &VideoId) -> Option<String> {
        let fetcher = self.fetchers.iter().find(|f| f.provider() == provider)?;
        let key = cache_key(provider, id);
        let name = fetcher.name();

        let cached = match self.cache.get(&key) {
            Ok(cached) => cached,
            Err(e) => {
                log::warn!("fetcher={name} key={key} cache read failed, treating as miss: {e}");
                None
            }
        };

        let url = match cached {
            Some(url) => {
                log::debug!("fetcher={name} key={key} outcome=hit");
                url
            }
            None => {
                log::debug!("fetcher={name} key={key} outcome=miss");
                let url = fetcher.fetch(id, self.transport.as_ref())?;

                if let Err(e) = self.cache.set(&key, &url, CACHE_TTL_SECS) {
                    log::warn!("fetcher={name} key={key} cache write failed: {e}");
                }

                log::info!("fetcher={name} id={id} outcome=resolved url={url}");
                url
            }
        };

        let url = self.hooks.thumbnail_url(provider, url, id);
        if url.is_empty() {
            return None;
        }

        Some(url)
    }
}
