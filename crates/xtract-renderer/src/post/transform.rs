use serde_json::Value;

use super::media::extract_media;
use super::types::{Author, AuthorStats, NormalizedPost, PostKind, PostStats, TextEncoding};
use super::urls::expand_urls;
use crate::article::{
    MediaTable, collect_images, collect_videos, parse_article, render_document, resolve_media,
};
use crate::config::TransformConfig;
use crate::error::TransformError;
use crate::raw::{ArticlePost, PostBase, RawPost, RawUser, StandardPost};

/// Text and media produced by either post shape.
struct Content {
    text: String,
    images: Vec<String>,
    videos: Vec<String>,
}

pub fn transform_post(post: &RawPost) -> NormalizedPost {
    transform_post_with(post, &TransformConfig::default())
}

/// Normalize a post and, recursively, the post it quotes.
///
/// A quote that cannot be transformed, or that sits deeper than
/// `config.max_quote_depth`, is logged and left out.
pub fn transform_post_with(post: &RawPost, config: &TransformConfig) -> NormalizedPost {
    transform_at_depth(post, config, 0)
}

/// Parse and transform a JSON post in one step.
pub fn transform_json(json: &str, config: &TransformConfig) -> Result<NormalizedPost, TransformError> {
    let post = RawPost::from_json(json)?;
    Ok(transform_post_with(&post, config))
}

#[tracing::instrument(level = "debug", skip_all, fields(id = %post.id(), depth = depth))]
fn transform_at_depth(post: &RawPost, config: &TransformConfig, depth: usize) -> NormalizedPost {
    let base = post.base();
    let (kind, text_encoding, content) = match post {
        RawPost::Standard(standard) => (
            PostKind::Post,
            TextEncoding::Plain,
            standard_content(standard, config),
        ),
        RawPost::Article(article) => (
            PostKind::Article,
            TextEncoding::Markdown,
            article_content(article, config),
        ),
    };

    NormalizedPost {
        id: base.rest_id.clone(),
        kind,
        text_encoding,
        text: content.text,
        created_at: base.legacy.created_at.clone(),
        author: author(&base.core.user_results.result),
        stats: stats(base),
        images: content.images,
        videos: content.videos,
        hashtags: base.legacy.hashtags().map(str::to_owned).collect(),
        quoted_post: quoted_post(base, config, depth),
    }
}

fn standard_content(post: &StandardPost, config: &TransformConfig) -> Content {
    let legacy = &post.base.legacy;
    let mut text = post.text().to_owned();
    if config.expand_urls {
        text = expand_urls(&text, post.url_entities(), legacy.media_entities());
    }

    let media = extract_media(legacy.media_entities());
    Content {
        text,
        images: media.images,
        videos: media.videos,
    }
}

fn article_content(post: &ArticlePost, config: &TransformConfig) -> Content {
    let result = post.result();
    let media = MediaTable::from_entities(&result.media_entities);
    let doc = resolve_media(parse_article(result), &media);

    let mut text = render_document(&doc);
    if config.expand_urls {
        let legacy = &post.base.legacy;
        text = expand_urls(&text, legacy.url_entities(), legacy.media_entities());
    }

    Content {
        text,
        images: collect_images(&doc),
        videos: collect_videos(&doc),
    }
}

fn quoted_post(
    base: &PostBase,
    config: &TransformConfig,
    depth: usize,
) -> Option<Box<NormalizedPost>> {
    let value = base.quoted.as_ref()?;
    // unavailable quotes carry no id and are skipped silently
    let quoted_id = value.get("rest_id").and_then(Value::as_str)?;

    match transform_quoted(value, quoted_id, config, depth + 1) {
        Ok(quoted) => Some(Box::new(quoted)),
        Err(error) => {
            tracing::warn!(
                post_id = %base.rest_id,
                quoted_id,
                %error,
                "failed to transform quoted post, omitting it"
            );
            None
        }
    }
}

fn transform_quoted(
    value: &Value,
    quoted_id: &str,
    config: &TransformConfig,
    depth: usize,
) -> Result<NormalizedPost, TransformError> {
    if depth > config.max_quote_depth {
        return Err(TransformError::QuoteDepthExceeded {
            id: quoted_id.to_owned(),
            limit: config.max_quote_depth,
        });
    }
    let post = RawPost::from_value(value.clone())?;
    Ok(transform_at_depth(&post, config, depth))
}

fn author(user: &RawUser) -> Author {
    let legacy = user.legacy.clone().unwrap_or_default();
    Author {
        name: user.core.name.clone(),
        screen_name: user.core.screen_name.clone(),
        avatar: legacy.profile_image_url_https,
        banner: legacy.profile_banner_url,
        is_blue_verified: user.is_blue_verified,
        description: legacy.description,
        location: legacy.location,
        url: legacy.url,
        joined: legacy.created_at,
        stats: AuthorStats {
            followers: legacy.followers_count.unwrap_or_default(),
            following: legacy.friends_count.unwrap_or_default(),
            posts: legacy.statuses_count.unwrap_or_default(),
            listed: legacy.listed_count.unwrap_or_default(),
            media: legacy.media_count.unwrap_or_default(),
        },
    }
}

fn stats(base: &PostBase) -> PostStats {
    PostStats {
        likes: base.legacy.favorite_count,
        reposts: base.legacy.retweet_count,
        replies: base.legacy.reply_count,
        views: base
            .views
            .as_ref()
            .and_then(|views| views.count.as_deref())
            .and_then(|count| count.parse().ok()),
    }
}
