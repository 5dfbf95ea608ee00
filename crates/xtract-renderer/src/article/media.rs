use std::collections::HashMap;

use smol_str::SmolStr;

use super::document::{Block, BlockContent, Document, MediaBlock};
use crate::post::best_variant;
use crate::raw::RawMediaEntity;

/// One row of an article's media table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRecord {
    pub media_id: SmolStr,
    pub resolved_url: Option<String>,
}

impl From<&RawMediaEntity> for MediaRecord {
    /// Videos resolve to their best playable variant, everything else to
    /// the original image.
    fn from(entity: &RawMediaEntity) -> Self {
        let resolved_url = entity.media_info.as_ref().and_then(|info| {
            best_variant(&info.variants)
                .map(|variant| variant.url.clone())
                .or_else(|| info.original_img_url.clone())
        });
        Self {
            media_id: entity.media_id.clone(),
            resolved_url,
        }
    }
}

/// Lookup from media id to resolved URL. The first record carrying a URL
/// for an id wins.
#[derive(Debug, Clone, Default)]
pub struct MediaTable {
    urls: HashMap<SmolStr, String>,
}

impl MediaTable {
    pub fn from_entities(entities: &[RawMediaEntity]) -> Self {
        entities.iter().map(MediaRecord::from).collect()
    }

    pub fn get(&self, media_id: &str) -> Option<&str> {
        self.urls.get(media_id).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

impl FromIterator<MediaRecord> for MediaTable {
    fn from_iter<I: IntoIterator<Item = MediaRecord>>(iter: I) -> Self {
        let mut urls = HashMap::new();
        for record in iter {
            if let Some(url) = record.resolved_url {
                urls.entry(record.media_id).or_insert(url);
            }
        }
        Self { urls }
    }
}

/// Fill in media block URLs from `media`, yielding a new document.
///
/// Blocks without a match keep no URL. `media_id` is left in place.
pub fn resolve_media(doc: Document, media: &MediaTable) -> Document {
    if media.is_empty() {
        return doc;
    }

    let blocks = doc
        .blocks
        .into_iter()
        .map(|block| {
            let content = match block.content {
                BlockContent::Image(m) => BlockContent::Image(resolve_block(m, media)),
                BlockContent::Video(m) => BlockContent::Video(resolve_block(m, media)),
                other => other,
            };
            Block { content, ..block }
        })
        .collect();

    Document { blocks, ..doc }
}

fn resolve_block(block: MediaBlock, media: &MediaTable) -> MediaBlock {
    let url = block
        .media_id
        .as_deref()
        .and_then(|id| media.get(id))
        .map(str::to_owned);
    match url {
        Some(url) => MediaBlock {
            url: Some(url),
            ..block
        },
        None => block,
    }
}
