//! Post pipeline: raw post payloads to [`NormalizedPost`].

mod media;
mod transform;
mod types;
mod urls;

pub use media::{ExtractedMedia, best_variant, extract_media};
pub use transform::{transform_json, transform_post, transform_post_with};
pub use types::{Author, AuthorStats, NormalizedPost, PostKind, PostStats, TextEncoding};
pub use urls::expand_urls;
