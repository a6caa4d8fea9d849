use crate::category::CanonicalCategory;
use crate::entity::PodcastRecord;
use std::collections::HashMap;

pub const COVER_DIR: &str = "/images/podcasts";

/// Used for every category id the static table does not know.
pub const DEFAULT_COVER: &str = "/images/podcasts/wisdom keys.jpeg";

fn bundled_cover(category: CanonicalCategory) -> &'static str {
    match category {
        CanonicalCategory::SpiritualDevelopment => "/images/podcasts/spiritual development.jpeg",
        CanonicalCategory::Relationships => "/images/podcasts/relationships.jpeg",
        CanonicalCategory::PersonalDevelopment => "/images/podcasts/personal development.jpeg",
        CanonicalCategory::WisdomKeys => DEFAULT_COVER,
        CanonicalCategory::BeyondDatingGame => "/images/podcasts/Beyond the dating Game.jpeg",
        CanonicalCategory::WisdomForLadies => "/images/podcasts/wisdom for ladies.jpeg",
        CanonicalCategory::Teens => "/images/podcasts/wisdom for teenagers.jpeg",
        CanonicalCategory::UniversityStudents => "/images/podcasts/university students.jpeg",
    }
}

/// Bundled cover for a canonical category id, the default for anything else.
pub fn resolve_category_cover(category_id: &str) -> &'static str {
    CanonicalCategory::from_id(category_id)
        .map(bundled_cover)
        .unwrap_or(DEFAULT_COVER)
}

#[derive(Debug, Clone, Default)]
pub struct CoverTable {
    overrides: HashMap<CanonicalCategory, String>,
}

impl CoverTable {
    pub fn with_override(mut self, category: CanonicalCategory, cover: impl Into<String>) -> Self {
        let cover = cover.into();
        if cover.trim().is_empty() {
            log::warn!("ignoring empty cover override for {}", category);
        } else {
            self.overrides.insert(category, cover);
        }
        self
    }

    pub fn resolve(&self, category: CanonicalCategory) -> String {
        self.overrides
            .get(&category)
            .cloned()
            .unwrap_or_else(|| bundled_cover(category).to_string())
    }
}

pub fn episode_cover<'a>(record: &'a PodcastRecord, category_cover: &'a str) -> &'a str {
    match record.cover.as_deref().map(str::trim) {
        Some(cover) if !cover.is_empty() => cover,
        _ => category_cover,
    }
}
