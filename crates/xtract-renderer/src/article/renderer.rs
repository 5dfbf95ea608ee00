use super::EntityTable;
use super::document::{Block, BlockContent, BlockStyle, Document, MediaBlock, TextBlock};
use crate::richtext::render_markdown;

const UNRESOLVED: &str = "Unresolved";
const BLOCK_SEPARATOR: &str = "\n\n";

/// Render a document as markdown: the title, a blank line, then every
/// block in order separated by blank lines.
pub fn render_document(doc: &Document) -> String {
    let mut md = String::new();
    md.push_str(&doc.title);
    md.push_str(BLOCK_SEPARATOR);

    for (i, block) in doc.blocks.iter().enumerate() {
        if i > 0 {
            md.push_str(BLOCK_SEPARATOR);
        }
        md.push_str(&render_block(block, &doc.entities));
    }

    md
}

pub fn render_block(block: &Block, entities: &EntityTable) -> String {
    let mut md = String::new();

    match &block.content {
        BlockContent::Text(text) => {
            render_text_block(&mut md, text, entities);
        }
        BlockContent::Image(image) => {
            render_image_block(&mut md, image);
        }
        BlockContent::Video(video) => {
            render_video_block(&mut md, video);
        }
        BlockContent::EmbeddedPost { post_id } => {
            md.push_str("[Post: ");
            md.push_str(post_id);
            md.push(']');
        }
        BlockContent::Divider => {
            md.push_str("---");
        }
        BlockContent::Unknown => {}
    }

    md
}

fn render_text_block(md: &mut String, block: &TextBlock, entities: &EntityTable) {
    let text = render_markdown(
        &block.text,
        &block.inline_style_ranges,
        &block.entity_ranges,
        entities,
    )
    .unwrap_or_else(|_| block.text.clone());

    match &block.style {
        Some(BlockStyle::Heading(level)) => {
            for _ in 0..(*level).clamp(1, 6) {
                md.push('#');
            }
            md.push(' ');
            md.push_str(&text);
        }
        Some(BlockStyle::Blockquote) => {
            md.push_str("> ");
            md.push_str(&text);
        }
        Some(BlockStyle::UnorderedListItem) => {
            md.push_str("- ");
            md.push_str(&text);
        }
        // items are not numbered; every one renders as `1.`
        Some(BlockStyle::OrderedListItem) => {
            md.push_str("1. ");
            md.push_str(&text);
        }
        Some(BlockStyle::CodeBlock) => {
            md.push_str("```\n");
            md.push_str(&text);
            md.push_str("\n```");
        }
        Some(BlockStyle::Other(_)) | None => md.push_str(&text),
    }
}

fn render_image_block(md: &mut String, image: &MediaBlock) {
    md.push_str("![Image](");
    md.push_str(image.resolved_url().unwrap_or(UNRESOLVED));
    md.push(')');
}

fn render_video_block(md: &mut String, video: &MediaBlock) {
    md.push_str("[Video: ");
    md.push_str(video.resolved_url().unwrap_or(UNRESOLVED));
    md.push(']');
}

/// Image URLs of a document: the cover first, then every resolved image
/// block in order. Unresolved images are left out.
pub fn collect_images(doc: &Document) -> Vec<String> {
    doc.cover_image
        .iter()
        .map(String::as_str)
        .chain(doc.resolved_images())
        .map(str::to_owned)
        .collect()
}

pub fn collect_videos(doc: &Document) -> Vec<String> {
    doc.resolved_videos().map(str::to_owned).collect()
}
