use std::fmt;
use std::ops::Range;

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize};
use smol_str::{SmolStr, ToSmolStr};

/// Clip an `(offset, length)` pair to a non-negative half-open span.
///
/// Offsets are UTF-16 code units. Negative values clamp to zero, and a
/// negative length yields an empty span. The upper bound is not checked
/// here; callers intersect with the text length.
pub(crate) fn clamped_span(offset: i64, length: i64) -> Range<usize> {
    let start = offset.max(0);
    let end = offset.saturating_add(length.max(0)).max(start);
    start as usize..end as usize
}

/// Key of an entry in the entity table.
///
/// Producers emit keys both as strings and as bare numbers; both forms
/// normalize to the same string so `0` and `"0"` name the same entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityKey(SmolStr);

impl EntityKey {
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(SmolStr::new(key.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for EntityKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<i64> for EntityKey {
    fn from(key: i64) -> Self {
        Self(key.to_smolstr())
    }
}

impl From<i32> for EntityKey {
    fn from(key: i32) -> Self {
        Self(key.to_smolstr())
    }
}

impl<'de> Deserialize<'de> for EntityKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Str(SmolStr),
            Int(i64),
            Uint(u64),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Str(s) => Self(s),
            Repr::Int(n) => Self(n.to_smolstr()),
            Repr::Uint(n) => Self(n.to_smolstr()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRange {
    pub offset: i64,
    pub length: i64,
    pub style: SmolStr,
}

impl StyleRange {
    pub fn new(offset: i64, length: i64, style: impl AsRef<str>) -> Self {
        Self {
            offset,
            length,
            style: SmolStr::new(style.as_ref()),
        }
    }

    pub fn span(&self) -> Range<usize> {
        clamped_span(self.offset, self.length)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRange {
    pub offset: i64,
    pub length: i64,
    pub key: EntityKey,
}

impl EntityRange {
    pub fn new(offset: i64, length: i64, key: impl Into<EntityKey>) -> Self {
        Self {
            offset,
            length,
            key: key.into(),
        }
    }

    pub fn span(&self) -> Range<usize> {
        clamped_span(self.offset, self.length)
    }
}

bitflags! {
    /// Inline styles active on a single code unit.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct InlineStyles: u8 {
        const BOLD = 1 << 0;
        const ITALIC = 1 << 1;
        const UNDERLINE = 1 << 2;
        const STRIKETHROUGH = 1 << 3;
        const CODE = 1 << 4;
    }
}

impl InlineStyles {
    /// Styles that produce markup. The rest are tracked but render bare.
    pub const EMPHASIS: Self = Self::BOLD.union(Self::ITALIC);

    pub fn from_style(style: &str) -> Option<Self> {
        match style {
            "BOLD" => Some(Self::BOLD),
            "ITALIC" => Some(Self::ITALIC),
            "UNDERLINE" => Some(Self::UNDERLINE),
            "STRIKETHROUGH" => Some(Self::STRIKETHROUGH),
            "CODE" => Some(Self::CODE),
            _ => None,
        }
    }
}

/// A unit of markup wrapped around a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup<'a> {
    Bold,
    Italic,
    Link { url: &'a str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_span() {
        assert_eq!(clamped_span(2, 3), 2..5);
        assert_eq!(clamped_span(-2, 5), 0..3);
        assert_eq!(clamped_span(4, -1), 4..4);
        assert_eq!(clamped_span(-10, 3), 0..0);
    }

    #[test]
    fn test_deserialize_numeric_and_string_keys() {
        let json = r#"[
            {"offset": 0, "length": 4, "key": 3},
            {"offset": 5, "length": 2, "key": "3"}
        ]"#;

        let ranges: Vec<EntityRange> = serde_json::from_str(json).unwrap();
        assert_eq!(ranges[0].key, ranges[1].key);
        assert_eq!(ranges[0].key.as_str(), "3");
    }

    #[test]
    fn test_style_names() {
        assert_eq!(InlineStyles::from_style("BOLD"), Some(InlineStyles::BOLD));
        assert_eq!(InlineStyles::from_style("ITALIC"), Some(InlineStyles::ITALIC));
        assert_eq!(InlineStyles::from_style("bold"), None);
        assert_eq!(InlineStyles::from_style("SPARKLE"), None);
    }
}
