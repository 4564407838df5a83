use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::costume::Costume;
use crate::error::GalleryError;

/// One gallery entry as returned by `/api/gallery`. Only the fields the
/// client consumes are kept; empty strings are treated as missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GalleryItem {
    #[serde(default, deserialize_with = "non_empty_string")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub data_url: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub disfraz: Option<String>,
    #[serde(default, deserialize_with = "string_lines")]
    pub poem_lines: Vec<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub suggested_name: Option<String>,
}

impl GalleryItem {
    /// The source used to display the item, `data_url` first.
    pub fn image_src(&self) -> Option<&str> {
        self.data_url.as_deref().or(self.image_url.as_deref())
    }

    pub fn is_renderable(&self) -> bool {
        self.image_src().is_some()
    }

    pub fn costume(&self) -> Option<Costume> {
        self.disfraz.as_deref().and_then(Costume::from_tag)
    }
}

/// Presence of an optional response field. `Present(None)` means the key was
/// sent but held null or a value of the wrong type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Field<T> {
    #[default]
    Absent,
    Present(Option<T>),
}

impl<T> Field<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Present(Some(value)) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GalleryPage {
    /// Raw entries in response order. Entries that are not objects decode to
    /// `None` but still count toward the number of items returned.
    pub items: Vec<Option<GalleryItem>>,
    pub next_cursor: Field<String>,
    pub next_offset: Field<u64>,
}

impl GalleryPage {
    pub fn from_json(body: &str) -> Result<Self, GalleryError> {
        let value: Value =
            serde_json::from_str(body).map_err(|err| GalleryError::Decode(err.to_string()))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, GalleryError> {
        let Value::Object(mut object) = value else {
            return Err(GalleryError::Decode("expected a JSON object".to_string()));
        };
        let items = match object.remove("items") {
            Some(Value::Array(entries)) => entries
                .into_iter()
                .map(|entry| match entry {
                    Value::Object(_) => serde_json::from_value(entry).ok(),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        };
        let next_cursor = match object.get("next_cursor") {
            None => Field::Absent,
            Some(Value::String(cursor)) => Field::Present(Some(cursor.clone())),
            Some(_) => Field::Present(None),
        };
        let next_offset = match object.get("next_offset") {
            None => Field::Absent,
            Some(value) => Field::Present(value.as_u64().or_else(|| {
                value
                    .as_f64()
                    .filter(|offset| offset.is_finite() && *offset >= 0.0)
                    .map(|offset| offset as u64)
            })),
        };
        Ok(Self {
            items,
            next_cursor,
            next_offset,
        })
    }

    /// Number of entries the backend sent, renderable or not.
    pub fn returned(&self) -> usize {
        self.items.len()
    }

    pub fn renderable(&self) -> impl Iterator<Item = &GalleryItem> {
        self.items
            .iter()
            .flatten()
            .filter(|item| item.is_renderable())
    }
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) if !text.is_empty() => Some(text),
        _ => None,
    })
}

fn string_lines<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(lines)) => lines
            .into_iter()
            .filter_map(|line| match line {
                Value::String(text) => Some(text),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}
