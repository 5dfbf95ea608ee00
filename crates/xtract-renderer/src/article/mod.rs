//! Long-form articles: block parsing, media resolution and markdown rendering.

mod document;
mod entity;
mod media;
mod parser;
mod renderer;

pub use document::{Block, BlockContent, BlockStyle, Document, MediaBlock, TextBlock};
pub use entity::{Entity, EntityKind, EntityTable, Mutability};
pub use media::{MediaRecord, MediaTable, resolve_media};
pub use parser::{parse_article, parse_block, parse_content_state};
pub use renderer::{collect_images, collect_videos, render_block, render_document};
