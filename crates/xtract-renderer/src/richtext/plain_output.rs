use super::{EntityRange, Markup, MarkupOutput, StyleRange};
use crate::article::EntityTable;

/// Output that keeps the characters and drops every piece of markup.
#[derive(Debug, Default)]
pub struct PlainTextOutput {
    buffer: String,
}

impl PlainTextOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_inner(self) -> String {
        self.buffer
    }
}

impl MarkupOutput for PlainTextOutput {
    type Error = std::convert::Infallible;

    fn write_text(&mut self, text: &str) -> Result<(), Self::Error> {
        self.buffer.push_str(text);
        Ok(())
    }

    fn start_markup(&mut self, _markup: &Markup<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn end_markup(&mut self, _markup: &Markup<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

pub fn render_plain_text(
    text: &str,
    style_ranges: &[StyleRange],
    entity_ranges: &[EntityRange],
    entities: &EntityTable,
) -> String {
    let mut output = PlainTextOutput::new();
    match super::process_ranged_text(text, style_ranges, entity_ranges, entities, &mut output) {
        Ok(()) => output.into_inner(),
        Err(never) => match never {},
    }
}
