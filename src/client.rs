use crate::{config::Config, entity::records_from_value, FetchResult};
use serde_json::Value;
use std::time::Duration;

pub const PODCASTS_PATH: &str = "/api/podcasts/";

/// Optional server side filters of `GET /api/podcasts/`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PodcastQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    pub category: Option<String>,
    pub type_filter: Option<String>,
    pub is_live: Option<bool>,
    pub search: Option<String>,
}

impl PodcastQuery {
    // "all" means no filter to the backend, so it is not sent
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![];
        if let Some(skip) = self.skip {
            pairs.push(("skip", skip.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(c) = meaningful(&self.category) {
            pairs.push(("category", c.to_string()));
        }
        if let Some(t) = meaningful(&self.type_filter) {
            pairs.push(("type_filter", t.to_string()));
        }
        if let Some(live) = self.is_live {
            pairs.push(("is_live", live.to_string()));
        }
        if let Some(s) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("search", s.to_string()));
        }
        pairs
    }
}

fn meaningful(v: &Option<String>) -> Option<&str> {
    v.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "all")
}

pub trait PodcastSource {
    fn get_podcasts(&self, query: &PodcastQuery) -> FetchResult;
}

pub struct Client {
    base_url: String,
    agent: ureq::Agent,
}

impl Client {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Client {
            base_url,
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Client::new(cfg.api_base_url.clone(), cfg.timeout)
    }

    pub fn podcasts_url(&self) -> String {
        format!("{}{}", self.base_url, PODCASTS_PATH)
    }
}

impl PodcastSource for Client {
    fn get_podcasts(&self, query: &PodcastQuery) -> FetchResult {
        let url = self.podcasts_url();
        let mut req = self.agent.get(&url);
        for (k, v) in query.pairs() {
            req = req.query(k, &v);
        }
        log::debug!("fetching podcasts from {} {:?}", url, query);
        let body: Value = req.call()?.into_json()?;
        let records = records_from_value(body);
        log::debug!("received {} podcasts", records.len());
        Ok(records)
    }
}
