pub mod bucket;
pub mod catalog;
pub mod category;
pub mod client;
pub mod config;
pub mod cover;
pub mod entity;
pub mod filter;
pub mod sort;
pub mod util;

use entity::PodcastRecord;
use std::error::Error;
pub type FetchResult = Result<Vec<PodcastRecord>, Box<dyn Error>>;

pub use bucket::{build_category_buckets, CategoryBucket};
pub use category::{normalize_category, CanonicalCategory};
pub use cover::resolve_category_cover;
pub use sort::sort_episodes;
