//! Extension points for embedding applications.
//!
//! Each hook takes the computed value plus its context and returns the value
//! to use instead. Unset hooks pass the value through.

use super::types::{BlockAttributes, Provider, VideoId};

pub type ThumbnailHook = Box<dyn Fn(String, &VideoId) -> String + Send + Sync>;
pub type ClassesHook = Box<dyn Fn(Vec<String>, &BlockAttributes) -> Vec<String> + Send + Sync>;

#[derive(Default)]
pub struct Hooks {
    youtube_thumbnail: Option<ThumbnailHook>,
    vimeo_thumbnail: Option<ThumbnailHook>,
    wrapper_classes: Option<ClassesHook>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_youtube_thumbnail(
        mut self,
        hook: impl Fn(String, &VideoId) -> String + Send + Sync + 'static,
    ) -> Self {
        self.youtube_thumbnail = Some(Box::new(hook));
        self
    }

    pub fn on_vimeo_thumbnail(
        mut self,
        hook: impl Fn(String, &VideoId) -> String + Send + Sync + 'static,
    ) -> Self {
        self.vimeo_thumbnail = Some(Box::new(hook));
        self
    }

    pub fn on_wrapper_classes(
        mut self,
        hook: impl Fn(Vec<String>, &BlockAttributes) -> Vec<String> + Send + Sync + 'static,
    ) -> Self {
        self.wrapper_classes = Some(Box::new(hook));
        self
    }

    pub fn thumbnail_url(&self, provider: Provider, url: String, id: &VideoId) -> String {
        let hook = match provider {
            Provider::YouTube => self.youtube_thumbnail.as_ref(),
            Provider::Vimeo => self.vimeo_thumbnail.as_ref(),
            Provider::Unknown => None,
        };

        match hook {
            Some(hook) => hook(url, id),
            None => url,
        }
    }

    pub fn wrapper_classes(&self, classes: Vec<String>, attrs: &BlockAttributes) -> Vec<String> {
        match &self.wrapper_classes {
            Some(hook) => hook(classes, attrs),
            None => classes,
        }
    }
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("youtube_thumbnail", &self.youtube_thumbnail.is_some())
            .field("vimeo_thumbnail", &self.vimeo_thumbnail.is_some())
            .field("wrapper_classes", &self.wrapper_classes.is_some())
            .finish()
    }
}
