use super::types::{Provider, ResolveError, ResolvedVideo, VideoId};
use url::Url;

const YOUTUBE_DOMAIN: &str = "youtube.com";
const YOUTUBE_SHORT_DOMAIN: &str = "youtu.be";
const VIMEO_DOMAIN: &str = "vimeo.com";

/// Where the video id lives in a provider url.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdLocation {
    /// `?v=<id>`
    QueryV,
    /// `/<id>`
    Path,
}

fn classify_host(host: &str) -> Option<(Provider, IdLocation)> {
    if host == YOUTUBE_DOMAIN || host.ends_with(".youtube.com") {
        Some((Provider::YouTube, IdLocation::QueryV))
    } else if host == YOUTUBE_SHORT_DOMAIN {
        Some((Provider::YouTube, IdLocation::Path))
    } else if host == VIMEO_DOMAIN {
        Some((Provider::Vimeo, IdLocation::Path))
    } else {
        None
    }
}

/// Parses a provider embed url into provider and video id.
///
/// Pure: no network access. Hosts other than `*.youtube.com`, `youtu.be`
/// and `vimeo.com` are rejected.
pub fn resolve(url: &str) -> Result<ResolvedVideo, ResolveError> {
    let parsed = Url::parse(url).map_err(|err| ResolveError::InvalidUrl(err.to_string()))?;
    let host = parsed.host_str().ok_or(ResolveError::MissingHost)?;

    let (provider, location) =
        classify_host(host).ok_or_else(|| ResolveError::UnsupportedHost(host.to_string()))?;

    let raw_id = match location {
        IdLocation::QueryV => parsed
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default(),
        // decoded the same lossy way query_pairs decodes `v`
        IdLocation::Path => {
            let path = parsed.path();
            let path = path.strip_prefix('/').unwrap_or(path);
            let decoded = urlencoding::decode_binary(path.trim_end_matches('/').as_bytes());
            String::from_utf8_lossy(&decoded).into_owned()
        }
    };

    let video_id = VideoId::new(raw_id).ok_or(ResolveError::MissingVideoId(provider))?;

    log::debug!("resolved url={url} provider={provider} id={video_id}");

    Ok(ResolvedVideo { provider, video_id })
}
