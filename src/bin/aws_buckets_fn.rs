use fog_podcasts::{
    bucket::CategorySummary,
    catalog::{Catalog, CatalogView},
    client::{Client, PodcastQuery},
    config::Config,
    entity::PodcastRecord,
    filter::{apply_filter, PodcastFilter},
    util, CategoryBucket,
};
use std::sync::Arc;
use lambda_runtime::{handler_fn, Context, Error};
use serde::{Deserialize, Serialize};
use simple_error::{SimpleError, SimpleResult};

#[derive(Deserialize)]
struct Request {
    #[serde(default)]
    category: Option<String>,
    #[serde(flatten)]
    filter: PodcastFilter,
    #[serde(default)]
    limit: Option<u32>,
}

#[derive(Serialize)]
struct Response {
    request_id: String,
    categories: Vec<CategorySummary>,
    buckets: Vec<CategoryBucket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    episodes: Option<Vec<PodcastRecord>>,
    unmapped: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cfg = Config::from_env()?;
    util::init_log_with(&cfg.log_spec);
    log::info!("serving podcast buckets from {}", cfg.api_base_url);

    // one catalog per warm container, so overlapping invocations share the fetch sequence
    let catalog = Arc::new(Catalog::new(Client::from_config(&cfg)));
    lambda_runtime::run(handler_fn(move |req, ctx| serve_buckets(Arc::clone(&catalog), req, ctx))).await?;
    Ok(())
}

async fn serve_buckets(
    catalog: Arc<Catalog<Client>>,
    Request {
        category,
        filter,
        limit,
    }: Request,
    ctx: Context,
) -> SimpleResult<Response> {
    let query = PodcastQuery {
        limit,
        ..Default::default()
    };
    let view: CatalogView = tokio::task::spawn_blocking(move || {
        let own = catalog.refresh(&query);
        // a newer fetch may have completed meanwhile
        catalog.current().unwrap_or(own)
    })
    .await
    .map_err(|e| SimpleError::new(format!("podcast fetch task failed: {}", e)))?;

    let filtered = if filter.is_empty() {
        view
    } else {
        CatalogView {
            buckets: apply_filter(&view.buckets, &filter),
            ..view
        }
    };
    let episodes = category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty() && *c != "all")
        .map(|c| filtered.episodes(&c.to_lowercase()).to_vec());

    Ok(Response {
        request_id: ctx.request_id,
        categories: filtered.summaries(),
        episodes,
        unmapped: filtered.unmapped,
        error: filtered.error,
        buckets: filtered.buckets,
    })
}
