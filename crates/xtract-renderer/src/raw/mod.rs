//! Serde model of the platform's post payloads.

mod content_state;
pub(crate) mod lenient;
mod post;

pub use content_state::{RawBlock, RawContentState};
pub use post::{
    ArticleEnvelope, ArticlePost, ArticleResult, ArticleResults, CoverMedia, HashtagEntity,
    LegacyEntities, LegacyPost, MediaEntity, MediaType, NoteEntitySet, NoteTweet,
    NoteTweetResult, NoteTweetResults, PostBase, PostCore, PostResponse, PostResponseData,
    PostResultSlot, RawMediaEntity, RawMediaInfo, RawPost, RawUser, StandardPost, UrlEntity,
    UserLegacy, UserNames, UserResults, VideoInfo, VideoVariant, Views, parse_json,
};
