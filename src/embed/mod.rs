pub mod fetchers;
pub mod hooks;
pub mod render;
pub mod resolve;
pub mod types;

pub use fetchers::{cache_key, ThumbnailResolver};
pub use hooks::Hooks;
pub use render::{contains_embed_block, wrapper_classes, EmbedRewriter};
pub use resolve::resolve;
pub use types::{BlockAttributes, EmbedFragment, Provider, ResolveError, ResolvedVideo, VideoId};
