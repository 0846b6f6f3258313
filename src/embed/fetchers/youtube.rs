use crate::embed::fetchers::ThumbnailFetcher;
use crate::embed::types::{Provider, VideoId};
use crate::transport::Transport;
use reqwest::StatusCode;

const IMAGE_BASE: &str = "https://img.youtube.com/vi";

pub struct YouTubeFetcher;

impl YouTubeFetcher {
    pub fn new() -> Self {
        Self
    }

    /// Medium resolution image, always published by YouTube.
    pub fn default_image_url(id: &VideoId) -> String {
        format!("{IMAGE_BASE}/{}/mqdefault.jpg", urlencoding::encode(id.as_str()))
    }

    /// Only exists for videos uploaded in HD.
    pub fn max_res_image_url(id: &VideoId) -> String {
        format!("{IMAGE_BASE}/{}/maxresdefault.jpg", urlencoding::encode(id.as_str()))
    }
}

impl Default for YouTubeFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ThumbnailFetcher for YouTubeFetcher {
    fn fetch(&self, id: &VideoId, transport: &dyn Transport) -> Option<String> {
        let default_url = Self::default_image_url(id);
        let max_res_url = Self::max_res_image_url(id);

        match transport.head(&max_res_url) {
            Ok(resp) if resp.status == StatusCode::OK => Some(max_res_url),
            Ok(resp) => {
                log::debug!("id={id} maxres check returned {}, using default", resp.status);
                Some(default_url)
            }
            Err(e) => {
                log::debug!("id={id} maxres check failed, using default: {e}");
                Some(default_url)
            }
        }
    }

    fn provider(&self) -> Provider {
        Provider::YouTube
    }

    fn name(&self) -> &'static str {
        "YouTube"
    }
}
