use serde::{Deserialize, Serialize};

/// Knobs for [`crate::post::transform_post_with`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransformConfig {
    /// How many levels of quoted posts are followed. A quote nested deeper
    /// than this is omitted from the output, the same as a quote that
    /// fails to transform.
    pub max_quote_depth: usize,
    /// Replace shortened links with their expanded targets.
    pub expand_urls: bool,
}

impl TransformConfig {
    pub const DEFAULT_MAX_QUOTE_DEPTH: usize = 16;

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            max_quote_depth: Self::DEFAULT_MAX_QUOTE_DEPTH,
            expand_urls: true,
        }
    }
}
