use std::fmt;

use serde::{Deserialize, Deserializer};

/// Item `type` tag. Unknown tags are kept verbatim in [`ItemKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ItemKind {
    Frame,
    Image,
    Stamp,
    Other(String),
}

impl ItemKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Frame => "frame",
            Self::Image => "image",
            Self::Stamp => "stamp",
            Self::Other(tag) => tag,
        }
    }

    pub fn is_frame(&self) -> bool {
        matches!(self, Self::Frame)
    }
}

impl Default for ItemKind {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for ItemKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "frame" => Self::Frame,
            "image" => Self::Image,
            "stamp" => Self::Stamp,
            _ => Self::Other(tag),
        }
    }
}

impl From<&str> for ItemKind {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_string())
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-specific fields of an item. Only the textual ones are modelled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemData {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A board item as returned by the items collection endpoint.
///
/// `id` and `type` read as empty when missing or null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Item {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: ItemKind,
    #[serde(default)]
    pub data: Option<ItemData>,
}

impl Item {
    pub fn title(&self) -> Option<&str> {
        self.field(|data| data.title.as_deref())
    }

    pub fn content(&self) -> Option<&str> {
        self.field(|data| data.content.as_deref())
    }

    pub fn image_url(&self) -> Option<&str> {
        self.field(|data| data.image_url.as_deref())
    }

    fn field<'a>(&'a self, get: impl Fn(&'a ItemData) -> Option<&'a str>) -> Option<&'a str> {
        self.data.as_ref().and_then(get).filter(|s| !s.is_empty())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Pagination links attached to a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub next: Option<String>,
}

/// One page of the items collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub data: Vec<Item>,
    #[serde(default)]
    pub links: Option<Links>,
}

impl Page {
    /// The cursor URL for the following page; empty links end pagination.
    pub fn next_link(&self) -> Option<&str> {
        self.links
            .as_ref()
            .and_then(|links| links.next.as_deref())
            .filter(|next| !next.is_empty())
    }
}
