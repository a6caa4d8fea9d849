use crate::entity::PodcastRecord;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;

// "Episode 3", "Ep. 04", "Esp.4", "eps-#12"
static EPISODE_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:episode|eps|esp|ep)[.\-\s]*#?(\d+)").expect("episode marker regex")
});

static LEADING_EPISODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^episode\s+(\d+)").expect("leading episode regex"));

/// Episode number embedded in a title, if any.
pub fn episode_number(title: &str) -> Option<u32> {
    EPISODE_MARKER
        .captures(title)
        .or_else(|| LEADING_EPISODE.captures(title))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Parse the date formats the backend and the seed data use.
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeKey {
    pub number: Option<u32>,
    pub date: Option<NaiveDateTime>,
    pub id: i64,
}

impl EpisodeKey {
    pub fn of(record: &PodcastRecord) -> Self {
        EpisodeKey {
            number: episode_number(&record.title),
            date: record.sort_date().and_then(parse_date),
            id: record.id,
        }
    }
}

pub type Comparator<T> = fn(&T, &T) -> Ordering;

/// Combine comparators so the first one that is not `Equal` decides.
pub fn first_decisive<'a, T: 'a>(
    comparators: &'a [Comparator<T>],
) -> impl Fn(&T, &T) -> Ordering + 'a {
    move |a: &T, b: &T| {
        comparators
            .iter()
            .map(|cmp| cmp(a, b))
            .find(|o| *o != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

pub fn by_episode_number(a: &EpisodeKey, b: &EpisodeKey) -> Ordering {
    match (a.number, b.number) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// dated before undated, so the chain stays a total order
pub fn by_date(a: &EpisodeKey, b: &EpisodeKey) -> Ordering {
    match (a.date, b.date) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn by_id(a: &EpisodeKey, b: &EpisodeKey) -> Ordering {
    a.id.cmp(&b.id)
}

pub static EPISODE_ORDER: [Comparator<EpisodeKey>; 3] = [by_episode_number, by_date, by_id];

/// Episodes in display order. The input is left untouched.
pub fn sort_episodes(records: &[PodcastRecord]) -> Vec<PodcastRecord> {
    let mut keyed: Vec<(EpisodeKey, &PodcastRecord)> =
        records.iter().map(|r| (EpisodeKey::of(r), r)).collect();
    let order = first_decisive(&EPISODE_ORDER[..]);
    // stable
    keyed.sort_by(|(a, _), (b, _)| order(a, b));
    keyed.into_iter().map(|(_, r)| r.clone()).collect()
}
