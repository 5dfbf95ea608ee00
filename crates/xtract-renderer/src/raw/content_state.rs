use serde::Deserialize;
use smol_str::SmolStr;

use super::lenient::skip_invalid;
use crate::article::EntityTable;
use crate::richtext::{EntityRange, StyleRange};

/// Block-structured article body as emitted by the platform editor.
///
/// Malformed blocks, ranges and entity entries are skipped rather than
/// failing the post.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawContentState {
    #[serde(default, deserialize_with = "skip_invalid")]
    pub blocks: Vec<RawBlock>,
    #[serde(default, rename = "entityMap")]
    pub entity_map: EntityTable,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBlock {
    pub key: SmolStr,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type")]
    pub block_type: SmolStr,
    #[serde(default, deserialize_with = "skip_invalid")]
    pub inline_style_ranges: Vec<StyleRange>,
    #[serde(default, deserialize_with = "skip_invalid")]
    pub entity_ranges: Vec<EntityRange>,
}

impl RawBlock {
    pub const ATOMIC: &'static str = "atomic";
    pub const UNSTYLED: &'static str = "unstyled";

    pub fn is_atomic(&self) -> bool {
        self.block_type == Self::ATOMIC
    }
}
