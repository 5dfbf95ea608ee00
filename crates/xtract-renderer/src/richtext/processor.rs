use super::MarkupOutput;
use super::types::{EntityKey, EntityRange, InlineStyles, Markup, StyleRange};
use crate::article::EntityTable;

/// Link covering a code unit. Compared by entity key, never by URL.
#[derive(Debug, Clone, Copy)]
struct LinkTarget<'a> {
    key: &'a EntityKey,
    url: &'a str,
}

#[derive(Debug, Clone, Copy, Default)]
struct Annotation<'a> {
    styles: InlineStyles,
    link: Option<LinkTarget<'a>>,
}

impl Annotation<'_> {
    fn same_link(&self, other: &Self) -> bool {
        match (self.link, other.link) {
            (None, None) => true,
            (Some(a), Some(b)) => a.key == b.key,
            _ => false,
        }
    }

    fn emphasis(&self) -> InlineStyles {
        self.styles & InlineStyles::EMPHASIS
    }
}

/// Per-code-unit annotations for a text of `len` UTF-16 units.
///
/// Ranges reaching past `len` are clipped. When several link ranges cover
/// the same unit the last one applied wins.
fn annotate<'a>(
    len: usize,
    style_ranges: &[StyleRange],
    entity_ranges: &'a [EntityRange],
    entities: &'a EntityTable,
) -> Vec<Annotation<'a>> {
    let mut units = vec![Annotation::default(); len];

    for range in style_ranges {
        let Some(style) = InlineStyles::from_style(&range.style) else {
            tracing::trace!("ignoring unrecognized inline style {}", range.style);
            continue;
        };
        let span = range.span();
        for unit in units.iter_mut().take(span.end).skip(span.start) {
            unit.styles |= style;
        }
    }

    for range in entity_ranges {
        let Some(url) = entities.get(&range.key).and_then(|e| e.link_url()) else {
            continue;
        };
        let target = LinkTarget {
            key: &range.key,
            url,
        };
        let span = range.span();
        for unit in units.iter_mut().take(span.end).skip(span.start) {
            unit.link = Some(target);
        }
    }

    units
}

fn close_emphasis<O: MarkupOutput>(
    was: InlineStyles,
    is: InlineStyles,
    output: &mut O,
) -> Result<(), O::Error> {
    if was.contains(InlineStyles::BOLD) && !is.contains(InlineStyles::BOLD) {
        output.end_markup(&Markup::Bold)?;
    }
    if was.contains(InlineStyles::ITALIC) && !is.contains(InlineStyles::ITALIC) {
        output.end_markup(&Markup::Italic)?;
    }
    Ok(())
}

fn open_emphasis<O: MarkupOutput>(
    was: InlineStyles,
    is: InlineStyles,
    output: &mut O,
) -> Result<(), O::Error> {
    if !was.contains(InlineStyles::ITALIC) && is.contains(InlineStyles::ITALIC) {
        output.start_markup(&Markup::Italic)?;
    }
    if !was.contains(InlineStyles::BOLD) && is.contains(InlineStyles::BOLD) {
        output.start_markup(&Markup::Bold)?;
    }
    Ok(())
}

/// Render `text` with its style and entity ranges through `output`.
///
/// Walks the text once. Before each character whose annotation differs
/// from the previous one, emphasis transitions are emitted in the order
/// bold-close, italic-close, italic-open, bold-open. When the link changes
/// too, every open emphasis closes before the link closes and reopens
/// after the next link opens, so emphasis always nests inside the link.
/// Whatever is still open at the end closes as bold, italic, then link.
///
/// Offsets count UTF-16 code units. A character takes the annotation of
/// its first code unit, so markup never lands inside a surrogate pair.
pub fn process_ranged_text<O: MarkupOutput>(
    text: &str,
    style_ranges: &[StyleRange],
    entity_ranges: &[EntityRange],
    entities: &EntityTable,
    output: &mut O,
) -> Result<(), O::Error> {
    let len = text.encode_utf16().count();
    let units = annotate(len, style_ranges, entity_ranges, entities);

    let mut current = Annotation::default();
    let mut run_start = 0;
    let mut unit_pos = 0;

    for (byte_pos, ch) in text.char_indices() {
        let next = units[unit_pos];
        unit_pos += ch.len_utf16();

        let link_changed = !current.same_link(&next);
        let (was, is) = (current.emphasis(), next.emphasis());
        if !link_changed && was == is {
            current = next;
            continue;
        }

        if byte_pos > run_start {
            output.write_text(&text[run_start..byte_pos])?;
            run_start = byte_pos;
        }

        if link_changed {
            close_emphasis(was, InlineStyles::empty(), output)?;
            if let Some(link) = current.link {
                output.end_markup(&Markup::Link { url: link.url })?;
            }
            if let Some(link) = next.link {
                output.start_markup(&Markup::Link { url: link.url })?;
            }
            open_emphasis(InlineStyles::empty(), is, output)?;
        } else {
            close_emphasis(was, is, output)?;
            open_emphasis(was, is, output)?;
        }

        current = next;
    }

    if run_start < text.len() {
        output.write_text(&text[run_start..])?;
    }

    close_emphasis(current.emphasis(), InlineStyles::empty(), output)?;
    if let Some(link) = current.link {
        output.end_markup(&Markup::Link { url: link.url })?;
    }

    Ok(())
}
