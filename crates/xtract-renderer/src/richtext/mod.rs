//! Inline rich text: style ranges and link entities rendered over a string.

mod markdown_output;
mod plain_output;
mod processor;
mod types;

pub use markdown_output::{MarkdownOutput, render_markdown};
pub use plain_output::{PlainTextOutput, render_plain_text};
pub use processor::process_ranged_text;
pub use types::{EntityKey, EntityRange, InlineStyles, Markup, StyleRange};

pub trait MarkupOutput {
    type Error;

    fn write_text(&mut self, text: &str) -> Result<(), Self::Error>;
    fn start_markup(&mut self, markup: &Markup<'_>) -> Result<(), Self::Error>;
    fn end_markup(&mut self, markup: &Markup<'_>) -> Result<(), Self::Error>;
}
