use smol_str::SmolStr;

use super::EntityTable;
use crate::richtext::{EntityRange, StyleRange};

/// A parsed article.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub title: String,
    pub blocks: Vec<Block>,
    pub cover_image: Option<String>,
    pub entities: EntityTable,
}

impl Document {
    pub fn resolved_images(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|block| match &block.content {
            BlockContent::Image(media) => media.resolved_url(),
            _ => None,
        })
    }

    pub fn resolved_videos(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|block| match &block.content {
            BlockContent::Video(media) => media.resolved_url(),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Source block key, kept for traceability.
    pub key: SmolStr,
    pub content: BlockContent,
}

impl Block {
    pub fn new(key: impl AsRef<str>, content: BlockContent) -> Self {
        Self {
            key: SmolStr::new(key.as_ref()),
            content,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockContent {
    Text(TextBlock),
    Image(MediaBlock),
    Video(MediaBlock),
    EmbeddedPost { post_id: SmolStr },
    Divider,
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextBlock {
    pub text: String,
    pub style: Option<BlockStyle>,
    pub inline_style_ranges: Vec<StyleRange>,
    pub entity_ranges: Vec<EntityRange>,
}

/// Image or video reference. Media blocks start out with only a `media_id`;
/// the URL is filled in from the article's media table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaBlock {
    pub url: Option<String>,
    pub media_id: Option<SmolStr>,
}

impl MediaBlock {
    pub fn unresolved(media_id: impl AsRef<str>) -> Self {
        Self {
            url: None,
            media_id: Some(SmolStr::new(media_id.as_ref())),
        }
    }

    pub fn resolved(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            media_id: None,
        }
    }

    pub fn resolved_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }
}

/// Block-level formatting of a text block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockStyle {
    Heading(u8),
    Blockquote,
    UnorderedListItem,
    OrderedListItem,
    CodeBlock,
    /// Any other non-default tag; rendered like plain text.
    Other(SmolStr),
}

impl BlockStyle {
    /// Style for a raw block type tag. `unstyled` has none.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "unstyled" => return None,
            "header-one" => Self::Heading(1),
            "header-two" => Self::Heading(2),
            "header-three" => Self::Heading(3),
            "header-four" => Self::Heading(4),
            "header-five" => Self::Heading(5),
            "header-six" => Self::Heading(6),
            "blockquote" => Self::Blockquote,
            "unordered-list-item" => Self::UnorderedListItem,
            "ordered-list-item" => Self::OrderedListItem,
            "code-block" => Self::CodeBlock,
            other => Self::Other(SmolStr::new(other)),
        })
    }
}
