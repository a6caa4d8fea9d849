use crate::bucket::{bucket_records, category_summaries, CategoryBucket, CategorySummary};
use crate::category::{AliasTable, CanonicalCategory};
use crate::client::{PodcastQuery, PodcastSource};
use crate::cover::CoverTable;
use crate::entity::PodcastRecord;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Result of one fetch, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogView {
    pub buckets: Vec<CategoryBucket>,
    /// Set when the fetch failed; the buckets are then all empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub unmapped: usize,
}

impl CatalogView {
    pub fn from_records(records: &[PodcastRecord], aliases: &AliasTable, covers: &CoverTable) -> Self {
        let bucketing = bucket_records(records, aliases, covers);
        CatalogView {
            buckets: bucketing.buckets,
            error: None,
            unmapped: bucketing.unmapped.len(),
        }
    }

    pub fn failed(error: String, covers: &CoverTable) -> Self {
        CatalogView {
            error: Some(error),
            ..CatalogView::from_records(&[], &AliasTable::default(), covers)
        }
    }

    pub fn episodes(&self, category_id: &str) -> &[PodcastRecord] {
        CanonicalCategory::from_id(category_id)
            .and_then(|c| self.buckets.iter().find(|b| b.id == c))
            .map(|b| b.episodes.as_slice())
            .unwrap_or(&[])
    }

    pub fn summaries(&self) -> Vec<CategorySummary> {
        category_summaries(&self.buckets)
    }
}

/// Identifies one fetch; a view from an older fetch never replaces a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

#[derive(Debug, Default)]
pub struct FetchSequence {
    issued: AtomicU64,
}

impl FetchSequence {
    pub fn begin(&self) -> FetchTicket {
        FetchTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }
}

pub struct Catalog<S> {
    source: S,
    aliases: AliasTable,
    covers: CoverTable,
    sequence: FetchSequence,
    current: Mutex<Option<(FetchTicket, CatalogView)>>,
}

impl<S: PodcastSource> Catalog<S> {
    pub fn new(source: S) -> Self {
        Catalog::with_tables(source, AliasTable::default(), CoverTable::default())
    }

    pub fn with_tables(source: S, aliases: AliasTable, covers: CoverTable) -> Self {
        Catalog {
            source,
            aliases,
            covers,
            sequence: FetchSequence::default(),
            current: Mutex::new(None),
        }
    }

    /// Fetch and build a view. A fetch error gives empty buckets plus the
    /// error message rather than an `Err`.
    pub fn load(&self, query: &PodcastQuery) -> CatalogView {
        match self.source.get_podcasts(query) {
            Ok(records) => CatalogView::from_records(&records, &self.aliases, &self.covers),
            Err(e) => {
                log::error!("fetching podcasts failed: {}", e);
                CatalogView::failed(e.to_string(), &self.covers)
            }
        }
    }

    pub fn begin(&self) -> FetchTicket {
        self.sequence.begin()
    }

    pub fn publish(&self, ticket: FetchTicket, view: CatalogView) -> bool {
        let mut current = match self.current.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some((published, _)) = current.as_ref() {
            if *published > ticket {
                log::debug!("dropping stale podcast fetch {:?}, {:?} already published", ticket, published);
                return false;
            }
        }
        *current = Some((ticket, view));
        true
    }

    pub fn refresh(&self, query: &PodcastQuery) -> CatalogView {
        let ticket = self.begin();
        let view = self.load(query);
        self.publish(ticket, view.clone());
        view
    }

    pub fn current(&self) -> Option<CatalogView> {
        let guard = match self.current.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.as_ref().map(|(_, view)| view.clone())
    }
}
