use html_escape::encode_double_quoted_attribute;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    YouTube,
    Vimeo,
    Unknown,
}

impl Provider {
    /// Maps a CMS provider slug (`providerNameSlug`) to a provider.
    pub fn from_slug(slug: &str) -> Self {
        match slug {
            "youtube" => Provider::YouTube,
            "vimeo" => Provider::Vimeo,
            _ => Provider::Unknown,
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Provider::YouTube => "youtube",
            Provider::Vimeo => "vimeo",
            Provider::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Provider::Unknown)
    }
}

impl Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// Provider-scoped video id. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of [`crate::embed::resolve::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVideo {
    pub provider: Provider,
    pub video_id: VideoId,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("url has no host")]
    MissingHost,

    #[error("host {0} is not a supported video provider")]
    UnsupportedHost(String),

    #[error("no video id in {0} url")]
    MissingVideoId(Provider),
}

/// Attributes of an embed block as the CMS hands them over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockAttributes {
    #[serde(rename = "providerNameSlug", default, skip_serializing_if = "Option::is_none")]
    pub provider_name_slug: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(rename = "className", default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<String>,
}

impl BlockAttributes {
    pub fn provider(&self) -> Provider {
        self.provider_name_slug
            .as_deref()
            .map(Provider::from_slug)
            .unwrap_or(Provider::Unknown)
    }

    /// The embed url, if present and non-empty.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }

    /// Known provider slug plus a non-empty url.
    pub fn is_recognized_embed(&self) -> bool {
        self.provider().is_known() && self.url().is_some()
    }
}

/// Placeholder markup that replaces a full embed until activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedFragment {
    classes: Vec<String>,
    video_id: VideoId,
    thumbnail_url: String,
    original_markup: String,
}

impl EmbedFragment {
    pub fn new(
        classes: Vec<String>,
        video_id: VideoId,
        thumbnail_url: String,
        original_markup: String,
    ) -> Self {
        Self {
            classes,
            video_id,
            thumbnail_url,
            original_markup,
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn video_id(&self) -> &VideoId {
        &self.video_id
    }

    pub fn thumbnail_url(&self) -> &str {
        &self.thumbnail_url
    }

    pub fn original_markup(&self) -> &str {
        &self.original_markup
    }
}

impl Display for EmbedFragment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let id = encode_double_quoted_attribute(self.video_id.as_str());

        writeln!(
            f,
            r#"<figure class="{}" data-id="{id}">"#,
            encode_double_quoted_attribute(&self.classes.join(" "))
        )?;
        writeln!(f, r#"    <div class="play-button"></div>"#)?;
        writeln!(
            f,
            r#"    <img loading="lazy" class="hd-bcve-thumbnail" src="{}" />"#,
            encode_double_quoted_attribute(&self.thumbnail_url)
        )?;
        writeln!(f, "</figure>")?;
        writeln!(f, r#"<template id="hd-bcve-embed-html-{id}">"#)?;
        writeln!(f, "{}", self.original_markup)?;
        write!(f, "</template>")
    }
}
