use serde_json::Value;
use smol_str::SmolStr;

use super::document::{Block, BlockContent, BlockStyle, Document, MediaBlock, TextBlock};
use super::entity::{Entity, EntityKind, EntityTable};
use crate::raw::{ArticleResult, RawBlock, RawContentState};

const IMAGE_CATEGORY: &str = "DraftTweetImage";
const VIDEO_CATEGORIES: &[&str] = &["DraftTweetGif", "DraftTweetVideo"];

/// Parse an article result into a [`Document`].
///
/// A missing content state yields a document with the title and cover only.
pub fn parse_article(result: &ArticleResult) -> Document {
    let cover_image = result.cover_image().map(str::to_owned);
    match &result.content_state {
        Some(state) => parse_content_state(&result.title, state, cover_image),
        None => Document {
            title: result.title.clone(),
            cover_image,
            ..Default::default()
        },
    }
}

pub fn parse_content_state(
    title: &str,
    state: &RawContentState,
    cover_image: Option<String>,
) -> Document {
    let blocks = state
        .blocks
        .iter()
        .filter_map(|block| parse_block(block, &state.entity_map))
        .collect();

    Document {
        title: title.to_owned(),
        blocks,
        cover_image,
        entities: state.entity_map.clone(),
    }
}

/// Classify one raw block.
///
/// Atomic blocks are governed by the entity of their first entity range;
/// when that range or entity is missing the block is dropped.
pub fn parse_block(block: &RawBlock, entities: &EntityTable) -> Option<Block> {
    if !block.is_atomic() {
        return Some(Block::new(
            &block.key,
            BlockContent::Text(TextBlock {
                text: block.text.clone(),
                style: BlockStyle::from_tag(&block.block_type),
                inline_style_ranges: block.inline_style_ranges.clone(),
                entity_ranges: block.entity_ranges.clone(),
            }),
        ));
    }

    let Some(entity) = block
        .entity_ranges
        .first()
        .and_then(|range| entities.get(&range.key))
    else {
        tracing::debug!("dropping atomic block {} without a resolvable entity", block.key);
        return None;
    };

    Some(Block::new(&block.key, parse_atomic_entity(entity)))
}

fn parse_atomic_entity(entity: &Entity) -> BlockContent {
    let content = match entity.kind() {
        EntityKind::Media => parse_media_entity(entity),
        EntityKind::Twemoji => entity
            .data_str("url")
            .map(|url| BlockContent::Image(MediaBlock::resolved(url))),
        EntityKind::Divider => Some(BlockContent::Divider),
        EntityKind::Tweet => entity
            .data
            .get("tweetId")
            .and_then(scalar_id)
            .map(|post_id| BlockContent::EmbeddedPost { post_id }),
        EntityKind::Link | EntityKind::Other => None,
    };

    content.unwrap_or_else(|| {
        tracing::debug!("unrenderable atomic entity of type {}", entity.entity_type);
        BlockContent::Unknown
    })
}

fn parse_media_entity(entity: &Entity) -> Option<BlockContent> {
    let item = entity.data.get("mediaItems")?.as_array()?.first()?;
    let category = item.get("mediaCategory").and_then(Value::as_str)?;
    // without an id the block still renders as an unresolved placeholder
    let media = MediaBlock {
        url: None,
        media_id: item.get("mediaId").and_then(scalar_id),
    };
    if category == IMAGE_CATEGORY {
        Some(BlockContent::Image(media))
    } else if VIDEO_CATEGORIES.contains(&category) {
        Some(BlockContent::Video(media))
    } else {
        None
    }
}

/// Identifiers arrive as strings or bare numbers.
fn scalar_id(value: &Value) -> Option<SmolStr> {
    match value {
        Value::String(s) => Some(SmolStr::new(s)),
        Value::Number(n) => Some(SmolStr::new(n.to_string())),
        _ => None,
    }
}
