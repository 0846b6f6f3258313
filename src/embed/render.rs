use super::fetchers::ThumbnailResolver;
use super::hooks::Hooks;
use super::resolve::resolve;
use super::types::{BlockAttributes, EmbedFragment, ResolvedVideo};
use crate::cache::{FileCache, MemoryCache, ThumbnailCache};
use crate::config::{CacheBackend, Config};
use crate::transport::{ReqwestTransport, Transport};
use anyhow::{Context, Result};
use std::borrow::Cow;
use std::sync::Arc;

/// Classes every placeholder wrapper starts with.
pub const BASE_CLASSES: [&str; 2] = ["wp-block-image", "hd-bcve-wrapper"];

/// Wrapper classes before the class hook runs: base classes, then the
/// block's `className` split on single spaces, then `align<value>`.
pub fn wrapper_classes(attrs: &BlockAttributes) -> Vec<String> {
    let mut classes: Vec<String> = BASE_CLASSES.iter().map(|c| c.to_string()).collect();

    if let Some(class_name) = attrs.class_name.as_deref().filter(|c| !c.is_empty()) {
        classes.extend(class_name.split(' ').map(str::to_string));
    }

    if let Some(align) = attrs.align.as_deref().filter(|a| !a.is_empty()) {
        classes.push(format!("align{align}"));
    }

    classes
}

/// True when at least one block would be picked up by the rewriter, i.e.
/// the page needs the activation script.
pub fn contains_embed_block<'a>(blocks: impl IntoIterator<Item = &'a BlockAttributes>) -> bool {
    blocks.into_iter().any(BlockAttributes::is_recognized_embed)
}

/// Swaps provider embeds for a lazy placeholder.
pub struct EmbedRewriter {
    thumbnails: ThumbnailResolver,
    hooks: Arc<Hooks>,
}

impl EmbedRewriter {
    pub fn new(
        transport: Arc<dyn Transport>,
        cache: Arc<dyn ThumbnailCache>,
        hooks: Hooks,
    ) -> Self {
        let hooks = Arc::new(hooks);
        Self {
            thumbnails: ThumbnailResolver::new(transport, cache, hooks.clone()),
            hooks,
        }
    }

    pub fn from_config(config: &Config, hooks: Hooks) -> Result<Self> {
        let transport = ReqwestTransport::from_config(config)?;

        let cache: Arc<dyn ThumbnailCache> = match config.cache {
            CacheBackend::Memory => Arc::new(MemoryCache::new()),
            CacheBackend::File => {
                let dir = config.cache_dir();
                Arc::new(
                    FileCache::new(&dir)
                        .with_context(|| format!("failed to open cache directory {dir}"))?,
                )
            }
        };

        Ok(Self::new(Arc::new(transport), cache, hooks))
    }

    /// Builds the placeholder for a block, or None when the block must be
    /// left untouched.
    pub fn rewrite(&self, attrs: &BlockAttributes, original: &str) -> Option<EmbedFragment> {
        let slug = attrs.provider_name_slug.as_deref().unwrap_or_default();
        if !attrs.provider().is_known() {
            log::debug!("skip block: provider slug {slug:?} not supported");
            return None;
        }

        let Some(url) = attrs.url() else {
            log::debug!("skip block: {slug} embed has no url");
            return None;
        };

        let ResolvedVideo { provider, video_id } = match resolve(url) {
            Ok(resolved) => resolved,
            Err(e) => {
                log::debug!("skip block: url={url}: {e}");
                return None;
            }
        };

        let Some(thumbnail_url) = self.thumbnails.resolve(provider, &video_id) else {
            log::debug!("skip block: no thumbnail for provider={provider} id={video_id}");
            return None;
        };

        let classes = self.hooks.wrapper_classes(wrapper_classes(attrs), attrs);

        Some(EmbedFragment::new(
            classes,
            video_id,
            thumbnail_url,
            original.to_string(),
        ))
    }

    /// Rendered placeholder, or `original` unchanged.
    pub fn render_block<'a>(&self, attrs: &BlockAttributes, original: &'a str) -> Cow<'a, str> {
        match self.rewrite(attrs, original) {
            Some(fragment) => Cow::Owned(fragment.to_string()),
            None => Cow::Borrowed(original),
        }
    }

    /// Provider, id and thumbnail for a bare provider url.
    pub fn thumbnail_for(&self, url: &str) -> Option<(ResolvedVideo, String)> {
        let resolved = resolve(url).ok()?;
        let thumbnail_url = self.thumbnails.resolve(resolved.provider, &resolved.video_id)?;
        Some((resolved, thumbnail_url))
    }
}
