use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A podcast as served by the backend's `/api/podcasts/` endpoint.
///
/// Only the fields the catalog looks at are typed; everything else the backend
/// sends (audio url, tags, plays, ...) is carried along untouched in `extra`.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct PodcastRecord {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(
        default,
        rename = "publishDate",
        alias = "publish_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub publish_date: Option<String>,
    #[serde(default, alias = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PodcastRecord {
    pub fn sort_date(&self) -> Option<&str> {
        self.publish_date
            .as_deref()
            .or_else(|| self.created_at.as_deref())
    }

    // comma separated string or JSON array
    pub fn tags(&self) -> Vec<String> {
        match self.extra.get("tags") {
            Some(Value::String(s)) => s
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect(),
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect(),
            _ => vec![],
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a backend response body leniently.
///
/// A body that is not an array counts as an empty list, and elements that do
/// not decode as a [`PodcastRecord`] are skipped, so one broken record never
/// hides the others.
pub fn records_from_value(body: Value) -> Vec<PodcastRecord> {
    let items = match body {
        Value::Array(items) => items,
        other => {
            log::warn!("podcast list is not an array, treating as empty: {}", kind_of(&other));
            return vec![];
        }
    };
    items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value::<PodcastRecord>(item) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("skipping undecodable podcast at index {}: {}", i, e);
                None
            }
        })
        .collect()
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
