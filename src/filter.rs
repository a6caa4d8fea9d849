use crate::bucket::CategoryBucket;
use crate::entity::PodcastRecord;
use serde::Deserialize;

/// Search box and type selector of the podcast page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PodcastFilter {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl PodcastFilter {
    pub fn matches(&self, record: &PodcastRecord) -> bool {
        self.matches_kind(record) && self.matches_search(record)
    }

    fn matches_kind(&self, record: &PodcastRecord) -> bool {
        match self.kind.as_deref().map(str::trim) {
            None | Some("") | Some("all") => true,
            Some(kind) => record
                .kind
                .as_deref()
                .map_or(false, |k| k.eq_ignore_ascii_case(kind)),
        }
    }

    fn matches_search(&self, record: &PodcastRecord) -> bool {
        let term = match self.search.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_lowercase(),
            _ => return true,
        };
        let hit = |s: &str| s.to_lowercase().contains(&term);
        hit(&record.title)
            || record.host.as_deref().map_or(false, hit)
            || record.description.as_deref().map_or(false, hit)
            || record.tags().iter().any(|t| hit(t))
    }

    pub fn is_empty(&self) -> bool {
        *self == PodcastFilter::default()
    }
}

/// Filter the episodes of every bucket, keeping bucket order and episode order.
pub fn apply_filter(buckets: &[CategoryBucket], filter: &PodcastFilter) -> Vec<CategoryBucket> {
    buckets
        .iter()
        .map(|b| CategoryBucket {
            episodes: b.episodes.iter().filter(|r| filter.matches(r)).cloned().collect(),
            ..b.clone()
        })
        .collect()
}
