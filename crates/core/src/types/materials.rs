//! Normalized artisan materials.
//!
//! Remote profiles record materials as a single string ("clay, natural
//! glaze") while the demo catalog records them as a list. Both are resolved
//! here into one value exposing a canonical item list. The ingestion shape is
//! remembered because the suggestion filter only looks at text-shaped
//! materials and the category filter only looks at list-shaped ones.

use serde::{Deserialize, Deserializer, Serialize};

/// Materials an artisan works with.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Materials {
    items: Vec<String>,
    /// Original text when ingested from a string; `None` for list input.
    text: Option<String>,
}

impl Materials {
    /// Materials given as free text. Items are split on commas.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let items = text
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        Self {
            items,
            text: Some(text.to_string()),
        }
    }

    /// Materials given as a list of entries.
    #[must_use]
    pub fn from_list<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: entries
                .into_iter()
                .map(Into::into)
                .map(|s: String| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            text: None,
        }
    }

    /// Canonical item list, regardless of the ingestion shape.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Original text, if the materials arrived as a string.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Whether the materials arrived as a list.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        self.text.is_none()
    }

    /// Whether no materials were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items joined for display.
    #[must_use]
    pub fn joined(&self) -> String {
        self.items.join(", ")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMaterials {
    Text(String),
    List(Vec<serde_json::Value>),
    Other(serde_json::Value),
}

impl<'de> Deserialize<'de> for Materials {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawMaterials::deserialize(deserializer)? {
            RawMaterials::Text(text) => Self::from_text(&text),
            // Non-string list entries (numbers, nested objects) are dropped
            RawMaterials::List(values) => Self::from_list(
                values
                    .into_iter()
                    .filter_map(|v| v.as_str().map(String::from)),
            ),
            RawMaterials::Other(_) => Self::from_list(Vec::<String>::new()),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_split_and_remembered() {
        let m = Materials::from_text("clay, natural glaze ,");
        assert_eq!(m.items(), ["clay", "natural glaze"]);
        assert_eq!(m.as_text(), Some("clay, natural glaze ,"));
        assert!(!m.is_list());
    }

    #[test]
    fn test_list_has_no_text() {
        let m = Materials::from_list(["Cotton", " Silk "]);
        assert_eq!(m.items(), ["Cotton", "Silk"]);
        assert_eq!(m.as_text(), None);
        assert!(m.is_list());
        assert_eq!(m.joined(), "Cotton, Silk");
    }

    #[test]
    fn test_deserialize_either_shape() {
        let text: Materials = serde_json::from_str("\"wood, lacquer\"").unwrap();
        assert_eq!(text.items(), ["wood", "lacquer"]);
        assert!(!text.is_list());

        let list: Materials = serde_json::from_str("[\"brass\", 3, \"copper\"]").unwrap();
        assert_eq!(list.items(), ["brass", "copper"]);
        assert!(list.is_list());

        let other: Materials = serde_json::from_str("{\"a\": 1}").unwrap();
        assert!(other.is_empty());
    }
}
