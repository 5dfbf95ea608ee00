use super::{EntityRange, Markup, MarkupOutput, StyleRange};
use crate::article::EntityTable;
use std::fmt::Write;

pub struct MarkdownOutput<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MarkupOutput for MarkdownOutput<W> {
    type Error = std::fmt::Error;

    fn write_text(&mut self, text: &str) -> Result<(), Self::Error> {
        self.writer.write_str(text)
    }

    fn start_markup(&mut self, markup: &Markup<'_>) -> Result<(), Self::Error> {
        match markup {
            Markup::Bold => write!(self.writer, "**"),
            Markup::Italic => write!(self.writer, "*"),
            Markup::Link { .. } => write!(self.writer, "["),
        }
    }

    fn end_markup(&mut self, markup: &Markup<'_>) -> Result<(), Self::Error> {
        match markup {
            Markup::Bold => write!(self.writer, "**"),
            Markup::Italic => write!(self.writer, "*"),
            Markup::Link { url } => write!(self.writer, "]({})", url),
        }
    }
}

pub fn render_markdown(
    text: &str,
    style_ranges: &[StyleRange],
    entity_ranges: &[EntityRange],
    entities: &EntityTable,
) -> Result<String, std::fmt::Error> {
    let mut output = MarkdownOutput::new(String::new());
    super::process_ranged_text(text, style_ranges, entity_ranges, entities, &mut output)?;
    Ok(output.into_inner())
}
