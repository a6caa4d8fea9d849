use crate::category::{AliasTable, CanonicalCategory, Classification};
use crate::cover::CoverTable;
use crate::entity::PodcastRecord;
use crate::sort::sort_episodes;
use serde::Serialize;

/// Episodes of one canonical category, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBucket {
    pub id: CanonicalCategory,
    pub display_name: String,
    pub cover_image: String,
    pub episodes: Vec<PodcastRecord>,
}

impl CategoryBucket {
    fn empty(id: CanonicalCategory, covers: &CoverTable) -> Self {
        CategoryBucket {
            id,
            display_name: id.display_name().to_string(),
            cover_image: covers.resolve(id),
            episodes: vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Unmapped {
    UnknownCategory { id: i64, title: String, raw: String },
    MissingCategory { id: i64, title: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bucketing {
    pub buckets: Vec<CategoryBucket>,
    pub unmapped: Vec<Unmapped>,
}

/// Group records into the fixed category buckets.
///
/// Every canonical category gets a bucket, in [`CanonicalCategory::ALL`] order,
/// whether or not it has episodes. Records whose category does not classify are
/// logged and reported in [`Bucketing::unmapped`] instead of being bucketed.
pub fn bucket_records(records: &[PodcastRecord], aliases: &AliasTable, covers: &CoverTable) -> Bucketing {
    let mut buckets: Vec<CategoryBucket> = CanonicalCategory::ALL
        .iter()
        .map(|c| CategoryBucket::empty(*c, covers))
        .collect();
    let mut unmapped = vec![];

    for record in records {
        match aliases.classify(record.category.as_deref()) {
            Classification::Known(c) => {
                let mut episode = record.clone();
                episode.category = Some(c.id().to_string());
                if let Some(bucket) = buckets.iter_mut().find(|b| b.id == c) {
                    bucket.episodes.push(episode);
                }
            }
            Classification::Unknown(raw) => {
                log::warn!(
                    "podcast {} {:?} has unmapped category {:?}, excluded",
                    record.id,
                    record.title,
                    record.category.as_deref().unwrap_or_default()
                );
                unmapped.push(Unmapped::UnknownCategory {
                    id: record.id,
                    title: record.title.clone(),
                    raw,
                });
            }
            Classification::Missing => {
                log::warn!("podcast {} {:?} has no category, excluded", record.id, record.title);
                unmapped.push(Unmapped::MissingCategory {
                    id: record.id,
                    title: record.title.clone(),
                });
            }
        }
    }

    for bucket in buckets.iter_mut() {
        bucket.episodes = sort_episodes(&bucket.episodes);
    }
    log::debug!(
        "bucketed {} of {} podcasts",
        records.len() - unmapped.len(),
        records.len()
    );
    Bucketing { buckets, unmapped }
}

pub fn build_category_buckets(records: &[PodcastRecord]) -> Vec<CategoryBucket> {
    bucket_records(records, &AliasTable::default(), &CoverTable::default()).buckets
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
    pub count: usize,
}

pub const ALL_CATEGORIES_ID: &str = "all";

// "all" first, then one per bucket
pub fn category_summaries(buckets: &[CategoryBucket]) -> Vec<CategorySummary> {
    let total = buckets.iter().map(|b| b.episodes.len()).sum();
    let mut out = vec![CategorySummary {
        id: ALL_CATEGORIES_ID.to_string(),
        name: "All Categories".to_string(),
        count: total,
    }];
    out.extend(buckets.iter().map(|b| CategorySummary {
        id: b.id.id().to_string(),
        name: b.display_name.clone(),
        count: b.episodes.len(),
    }));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cover::resolve_category_cover;
    use crate::util::init_log;

    fn podcast(id: i64, title: &str, category: &str) -> PodcastRecord {
        PodcastRecord {
            id,
            title: title.to_string(),
            category: Some(category.to_string()),
            ..Default::default()
        }
    }

    fn bucket<'a>(buckets: &'a [CategoryBucket], c: CanonicalCategory) -> &'a CategoryBucket {
        buckets.iter().find(|b| b.id == c).expect("bucket missing")
    }

    #[test]
    fn empty_input_has_all_buckets() {
        let buckets = build_category_buckets(&[]);
        assert_eq!(buckets.len(), 8);
        let order: Vec<CanonicalCategory> = buckets.iter().map(|b| b.id).collect();
        assert_eq!(order, CanonicalCategory::ALL.to_vec());
        for b in &buckets {
            assert!(b.episodes.is_empty());
            assert_eq!(b.cover_image, resolve_category_cover(b.id.id()));
            assert_eq!(b.display_name, b.id.display_name());
        }
    }

    #[test]
    fn teens_end_to_end() {
        init_log();
        let buckets = build_category_buckets(&[
            podcast(1, "Episode 2", "Wisdom-For-Teenagers"),
            podcast(2, "Episode 1", "teens"),
        ]);
        let teens = bucket(&buckets, CanonicalCategory::Teens);
        let ids: Vec<i64> = teens.episodes.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert!(teens
            .episodes
            .iter()
            .all(|r| r.category.as_deref() == Some("teens")));
    }

    #[test]
    fn unmapped_and_missing_are_excluded() {
        init_log();
        let records = vec![
            podcast(1, "Episode 1", "test"),
            PodcastRecord {
                id: 2,
                title: "Episode 2".to_string(),
                ..Default::default()
            },
            podcast(3, "Episode 3", ""),
            podcast(4, "Episode 4", "Relationships"),
        ];
        let result = bucket_records(&records, &AliasTable::default(), &CoverTable::default());
        assert_eq!(result.buckets.len(), 8);
        let placed: Vec<i64> = result
            .buckets
            .iter()
            .flat_map(|b| b.episodes.iter().map(|r| r.id))
            .collect();
        assert_eq!(placed, vec![4]);
        assert_eq!(
            result.unmapped,
            vec![
                Unmapped::UnknownCategory {
                    id: 1,
                    title: "Episode 1".to_string(),
                    raw: "test".to_string()
                },
                Unmapped::MissingCategory {
                    id: 2,
                    title: "Episode 2".to_string()
                },
                Unmapped::MissingCategory {
                    id: 3,
                    title: "Episode 3".to_string()
                },
            ]
        );
    }

    #[test]
    fn input_is_not_rewritten() {
        let records = vec![podcast(1, "Episode 1", "Wisdom For Teenagers")];
        let buckets = build_category_buckets(&records);
        assert_eq!(records[0].category.as_deref(), Some("Wisdom For Teenagers"));
        assert_eq!(
            bucket(&buckets, CanonicalCategory::Teens).episodes[0]
                .category
                .as_deref(),
            Some("teens")
        );
    }

    #[test]
    fn arrival_order_does_not_matter() {
        let a = vec![
            podcast(10, "Ep 3", "beyond-dating-game"),
            podcast(11, "Ep 1", "dating"),
            podcast(12, "Episode 2", "Beyond The Dating Game"),
            podcast(13, "Episode 1", "ladies"),
        ];
        let mut b = a.clone();
        b.reverse();
        assert_eq!(build_category_buckets(&a), build_category_buckets(&b));
    }

    #[test]
    fn dated_and_undated_arrival_order() {
        let dated = |id: i64, date: &str| PodcastRecord {
            publish_date: Some(date.to_string()),
            ..podcast(id, "Sunday talk", "relationships")
        };
        let records = vec![
            dated(3, "2024-01-01"),
            podcast(2, "Sunday talk", "relationships"),
            dated(1, "2024-01-02"),
        ];
        let expected = build_category_buckets(&records);
        let orders = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];
        for order in orders.iter() {
            let shuffled: Vec<PodcastRecord> = order.iter().map(|i| records[*i].clone()).collect();
            assert_eq!(build_category_buckets(&shuffled), expected);
        }
        let ids: Vec<i64> = bucket(&expected, CanonicalCategory::Relationships)
            .episodes
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn covers_follow_table() {
        let covers = CoverTable::default().with_override(CanonicalCategory::WisdomKeys, "/covers/keys.png");
        let result = bucket_records(&[], &AliasTable::default(), &covers);
        assert_eq!(
            bucket(&result.buckets, CanonicalCategory::WisdomKeys).cover_image,
            "/covers/keys.png"
        );
    }

    #[test]
    fn summaries_count_episodes() {
        let buckets = build_category_buckets(&[
            podcast(1, "Episode 1", "teens"),
            podcast(2, "Episode 2", "teens"),
            podcast(3, "Episode 1", "wisdom-keys"),
            podcast(4, "Episode 1", "unknown"),
        ]);
        let summaries = category_summaries(&buckets);
        assert_eq!(summaries.len(), 9);
        assert_eq!(summaries[0].id, ALL_CATEGORIES_ID);
        assert_eq!(summaries[0].count, 3);
        let teens = summaries.iter().find(|s| s.id == "teens").expect("teens summary");
        assert_eq!(teens.count, 2);
        assert_eq!(teens.name, "Teens Podcasts");
    }

    #[test]
    fn serializes_for_the_page() {
        let buckets = build_category_buckets(&[podcast(1, "Episode 1", "teens")]);
        let json = serde_json::to_value(&buckets[6]).expect("serialize failed");
        assert_eq!(json["id"], "teens");
        assert_eq!(json["displayName"], "Teens Podcasts");
        assert_eq!(json["coverImage"], "/images/podcasts/wisdom for teenagers.jpeg");
        assert_eq!(json["episodes"][0]["category"], "teens");
    }
}
