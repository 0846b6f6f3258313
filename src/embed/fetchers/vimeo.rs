use crate::embed::fetchers::ThumbnailFetcher;
use crate::embed::types::{Provider, VideoId};
use crate::transport::Transport;
use serde::Deserialize;

const API_BASE: &str = "https://vimeo.com/api/v2/video";

/// One element of the simple API's `video/<id>.json` array.
#[derive(Debug, Clone, Deserialize)]
struct VimeoVideo {
    thumbnail_large: Option<String>,
}

pub struct VimeoFetcher;

impl VimeoFetcher {
    pub fn new() -> Self {
        Self
    }

    pub fn api_url(id: &VideoId) -> String {
        format!("{API_BASE}/{}.json", urlencoding::encode(id.as_str()))
    }

    fn parse_thumbnail(body: &[u8]) -> anyhow::Result<Option<String>> {
        let videos: Vec<VimeoVideo> = serde_json::from_slice(body)?;

        Ok(videos
            .into_iter()
            .next()
            .and_then(|video| video.thumbnail_large)
            .filter(|url| !url.is_empty()))
    }
}

impl Default for VimeoFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ThumbnailFetcher for VimeoFetcher {
    fn fetch(&self, id: &VideoId, transport: &dyn Transport) -> Option<String> {
        let resp = match transport.get(&Self::api_url(id)) {
            Ok(resp) => resp,
            Err(e) => {
                log::warn!("fetcher=Vimeo id={id} outcome=error err={e}");
                return None;
            }
        };

        if !resp.status.is_success() {
            log::warn!("fetcher=Vimeo id={id} outcome=error status={}", resp.status);
            return None;
        }

        match Self::parse_thumbnail(&resp.body) {
            Ok(Some(url)) => Some(url),
            Ok(None) => {
                log::info!("fetcher=Vimeo id={id} outcome=skip reason=no thumbnail_large");
                None
            }
            Err(e) => {
                log::warn!("fetcher=Vimeo id={id} outcome=error err=malformed body: {e}");
                None
            }
        }
    }

    fn provider(&self) -> Provider {
        Provider::Vimeo
    }

    fn name(&self) -> &'static str {
        "Vimeo"
    }
}
