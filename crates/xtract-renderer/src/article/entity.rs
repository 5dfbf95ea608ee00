use std::collections::HashMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use smol_str::SmolStr;

use crate::raw::lenient::{element, or_none};
use crate::richtext::EntityKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mutability {
    Mutable,
    Immutable,
    Segmented,
    #[serde(other)]
    Unknown,
}

/// Entity types the renderer acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Link,
    Media,
    Twemoji,
    Divider,
    Tweet,
    Other,
}

impl EntityKind {
    fn from_tag(tag: &str) -> Self {
        match tag {
            "LINK" => Self::Link,
            "MEDIA" => Self::Media,
            "TWEMOJI" => Self::Twemoji,
            "DIVIDER" => Self::Divider,
            "TWEET" => Self::Tweet,
            _ => Self::Other,
        }
    }
}

/// An annotation payload referenced from block ranges.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub entity_type: SmolStr,
    #[serde(default, deserialize_with = "or_none")]
    pub mutability: Option<Mutability>,
    #[serde(default)]
    pub data: Value,
}

impl Entity {
    pub fn new(entity_type: impl AsRef<str>, data: Value) -> Self {
        Self {
            entity_type: SmolStr::new(entity_type.as_ref()),
            mutability: None,
            data,
        }
    }

    pub fn kind(&self) -> EntityKind {
        EntityKind::from_tag(&self.entity_type)
    }

    /// String field of the payload, if present and a string.
    pub fn data_str(&self, field: &str) -> Option<&str> {
        self.data.get(field).and_then(Value::as_str)
    }

    /// Target of a `LINK` entity. Other kinds never have one.
    pub fn link_url(&self) -> Option<&str> {
        match self.kind() {
            EntityKind::Link => self.data_str("url"),
            _ => None,
        }
    }
}

/// Entity lookup keyed by normalized entity key.
///
/// The wire form is either a list of `{key, value}` pairs or an object keyed
/// by entity key. Both collapse into this one map when deserialized; with
/// the list form the first pair for a key wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityTable {
    entries: HashMap<EntityKey, Entity>,
}

impl EntityTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &EntityKey) -> Option<&Entity> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(EntityKey, Entity)> for EntityTable {
    fn from_iter<I: IntoIterator<Item = (EntityKey, Entity)>>(iter: I) -> Self {
        let mut entries = HashMap::new();
        for (key, entity) in iter {
            entries.entry(key).or_insert(entity);
        }
        Self { entries }
    }
}

#[derive(Deserialize)]
struct EntityPair {
    key: EntityKey,
    value: Entity,
}

impl<'de> Deserialize<'de> for EntityTable {
    /// Entries that fail to parse, including entities without a `type`,
    /// are skipped and so look the same as missing ones.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(pairs) => pairs
                .into_iter()
                .filter_map(element::<EntityPair>)
                .map(|pair| (pair.key, pair.value))
                .collect(),
            Value::Object(map) => map
                .into_iter()
                .filter_map(|(key, entity)| {
                    Some((EntityKey::new(key), element::<Entity>(entity)?))
                })
                .collect(),
            Value::Null => Self::default(),
            _ => {
                tracing::debug!("entity map is neither a list nor an object, ignoring it");
                Self::default()
            }
        })
    }
}
