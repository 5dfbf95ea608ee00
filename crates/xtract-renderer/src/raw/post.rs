use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use smol_str::SmolStr;

use super::RawContentState;
use super::lenient::{or_none, skip_invalid};
use crate::error::TransformError;

/// Parse JSON text without a nesting limit.
///
/// Quote chains nest deeper than the parser's default limit allows. The
/// stack grows on demand instead, leaving the quote depth bound as the
/// only limit on a chain.
pub fn parse_json(json: &str) -> Result<Value, TransformError> {
    let mut de = serde_json::Deserializer::from_str(json);
    de.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut de))
        .map_err(TransformError::InvalidJson)?;
    de.end().map_err(TransformError::InvalidJson)?;
    Ok(value)
}

/// A post as returned by the platform, after schema validation.
///
/// The two shapes are told apart by a non-null `article` field.
#[derive(Debug, Clone)]
pub enum RawPost {
    Standard(StandardPost),
    Article(ArticlePost),
}

impl RawPost {
    pub fn from_json(json: &str) -> Result<Self, TransformError> {
        Self::from_value(parse_json(json)?)
    }

    /// Read a post from a parsed payload.
    ///
    /// The quoted post is detached as raw JSON before the typed fields are
    /// read.
    pub fn from_value(mut value: Value) -> Result<Self, TransformError> {
        let quoted = value
            .get_mut("quoted_status_result")
            .and_then(|slot| slot.get_mut("result"))
            .map(Value::take)
            .filter(|result| !result.is_null());

        let mut post = Self::from_shape(value).map_err(TransformError::MalformedPost)?;
        post.base_mut().quoted = quoted;
        Ok(post)
    }

    fn from_shape(value: Value) -> Result<Self, serde_json::Error> {
        let is_article = value.get("article").is_some_and(|article| !article.is_null());
        if is_article {
            ArticlePost::deserialize(value).map(RawPost::Article)
        } else {
            StandardPost::deserialize(value).map(RawPost::Standard)
        }
    }

    pub fn base(&self) -> &PostBase {
        match self {
            RawPost::Standard(post) => &post.base,
            RawPost::Article(post) => &post.base,
        }
    }

    fn base_mut(&mut self) -> &mut PostBase {
        match self {
            RawPost::Standard(post) => &mut post.base,
            RawPost::Article(post) => &mut post.base,
        }
    }

    pub fn id(&self) -> &str {
        &self.base().rest_id
    }
}

impl<'de> Deserialize<'de> for RawPost {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(D::Error::custom)
    }
}

/// Fields shared by every post shape.
#[derive(Debug, Clone, Deserialize)]
pub struct PostBase {
    pub rest_id: String,
    pub core: PostCore,
    #[serde(default)]
    pub views: Option<Views>,
    /// Raw result of `quoted_status_result`. Kept untyped and only parsed
    /// when the quote is followed, so a broken quote cannot invalidate the
    /// post quoting it.
    #[serde(skip)]
    pub quoted: Option<Value>,
    pub legacy: LegacyPost,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StandardPost {
    #[serde(flatten)]
    pub base: PostBase,
    #[serde(default)]
    pub note_tweet: Option<NoteTweet>,
}

impl StandardPost {
    fn note(&self) -> Option<&NoteTweetResult> {
        self.note_tweet.as_ref()?.note_tweet_results.result.as_ref()
    }

    /// Long-form body when present and non-empty, else the short body.
    pub fn text(&self) -> &str {
        self.note()
            .and_then(|note| note.text.as_deref())
            .filter(|text| !text.is_empty())
            .unwrap_or(&self.base.legacy.full_text)
    }

    /// Link entities matching [`Self::text`]: the long-form set when it has
    /// any, else the legacy ones.
    pub fn url_entities(&self) -> &[UrlEntity] {
        let note_urls = self
            .note()
            .and_then(|note| note.entity_set.as_ref())
            .map(|set| set.urls.as_slice())
            .unwrap_or_default();
        if note_urls.is_empty() {
            self.base.legacy.url_entities()
        } else {
            note_urls
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArticlePost {
    #[serde(flatten)]
    pub base: PostBase,
    pub article: ArticleEnvelope,
}

impl ArticlePost {
    pub fn result(&self) -> &ArticleResult {
        &self.article.article_results.result
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostCore {
    pub user_results: UserResults,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserResults {
    pub result: RawUser,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawUser {
    #[serde(default)]
    pub is_blue_verified: Option<bool>,
    #[serde(default)]
    pub legacy: Option<UserLegacy>,
    pub core: UserNames,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserNames {
    pub name: String,
    pub screen_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserLegacy {
    pub profile_image_url_https: Option<String>,
    pub profile_banner_url: Option<String>,
    pub followers_count: Option<u64>,
    pub friends_count: Option<u64>,
    pub statuses_count: Option<u64>,
    pub listed_count: Option<u64>,
    pub media_count: Option<u64>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub location: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Views {
    #[serde(default)]
    pub count: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyPost {
    pub full_text: String,
    pub created_at: String,
    pub favorite_count: u64,
    pub retweet_count: u64,
    pub reply_count: u64,
    #[serde(default)]
    pub entities: Option<LegacyEntities>,
}

impl LegacyPost {
    pub fn url_entities(&self) -> &[UrlEntity] {
        self.entities
            .as_ref()
            .map(|e| e.urls.as_slice())
            .unwrap_or_default()
    }

    pub fn media_entities(&self) -> &[MediaEntity] {
        self.entities
            .as_ref()
            .map(|e| e.media.as_slice())
            .unwrap_or_default()
    }

    pub fn hashtags(&self) -> impl Iterator<Item = &str> {
        self.entities
            .iter()
            .flat_map(|e| e.hashtags.iter())
            .map(|tag| tag.text.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyEntities {
    #[serde(default)]
    pub media: Vec<MediaEntity>,
    #[serde(default)]
    pub urls: Vec<UrlEntity>,
    #[serde(default)]
    pub hashtags: Vec<HashtagEntity>,
}

/// A shortened link and the target it stands for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UrlEntity {
    pub url: String,
    pub expanded_url: String,
    #[serde(default)]
    pub display_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HashtagEntity {
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Photo,
    Video,
    AnimatedGif,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaEntity {
    #[serde(rename = "type")]
    pub media_type: MediaType,
    #[serde(default)]
    pub media_url_https: Option<String>,
    /// Short link to the media placed in the post text.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub video_info: Option<VideoInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoInfo {
    #[serde(default)]
    pub variants: Vec<VideoVariant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VideoVariant {
    #[serde(default, alias = "bit_rate")]
    pub bitrate: Option<u64>,
    #[serde(default)]
    pub content_type: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NoteTweet {
    pub note_tweet_results: NoteTweetResults,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NoteTweetResults {
    #[serde(default)]
    pub result: Option<NoteTweetResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NoteTweetResult {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub entity_set: Option<NoteEntitySet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteEntitySet {
    #[serde(default)]
    pub urls: Vec<UrlEntity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArticleEnvelope {
    pub article_results: ArticleResults,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArticleResults {
    pub result: ArticleResult,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleResult {
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "or_none")]
    pub content_state: Option<RawContentState>,
    #[serde(default, deserialize_with = "or_none")]
    pub cover_media: Option<CoverMedia>,
    #[serde(default, deserialize_with = "skip_invalid")]
    pub media_entities: Vec<RawMediaEntity>,
}

impl ArticleResult {
    pub fn cover_image(&self) -> Option<&str> {
        self.cover_media
            .as_ref()?
            .media_info
            .as_ref()?
            .original_img_url
            .as_deref()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoverMedia {
    #[serde(default)]
    pub media_info: Option<RawMediaInfo>,
}

/// Entry of an article's flat media table.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMediaEntity {
    pub media_id: SmolStr,
    #[serde(default)]
    pub media_info: Option<RawMediaInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMediaInfo {
    #[serde(default)]
    pub original_img_url: Option<String>,
    #[serde(default)]
    pub variants: Vec<VideoVariant>,
}

/// API envelope around a single post lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct PostResponse {
    pub data: PostResponseData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostResponseData {
    #[serde(rename = "tweetResult")]
    pub post_result: PostResultSlot,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostResultSlot {
    /// Detached by [`PostResponse::from_value`] like a quoted post.
    #[serde(skip)]
    pub result: Option<Value>,
}

impl PostResponse {
    pub fn from_json(json: &str) -> Result<Self, TransformError> {
        Self::from_value(parse_json(json)?)
    }

    pub fn from_value(mut value: Value) -> Result<Self, TransformError> {
        let post = value
            .pointer_mut("/data/tweetResult/result")
            .map(Value::take)
            .filter(|result| !result.is_null());

        let mut response = Self::deserialize(value).map_err(TransformError::MalformedPost)?;
        response.data.post_result.result = post;
        Ok(response)
    }

    /// The enveloped post, or `None` when the lookup found nothing.
    pub fn into_post(self) -> Result<Option<RawPost>, TransformError> {
        self.data
            .post_result
            .result
            .map(RawPost::from_value)
            .transpose()
    }
}
