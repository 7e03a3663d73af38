use street_imagery::StreetImageSelector;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    pub limit: Option<usize>,
    pub quality_threshold: Option<f64>,
    pub count: usize,
}

/// Runs `count` independent selections for `city` and returns the URLs that
/// were found, in order. Failed runs are skipped.
pub async fn run_batch(
    selector: &StreetImageSelector,
    city: &str,
    options: &BatchOptions,
) -> Vec<String> {
    let search = &selector.config().search;
    let limit = options.limit.unwrap_or(search.default_limit);
    let quality_threshold = options
        .quality_threshold
        .unwrap_or(search.default_quality_threshold);

    let mut urls = Vec::with_capacity(options.count);
    for run in 1..=options.count {
        if let Some(url) = selector
            .get_street_image_url(city, limit, quality_threshold)
            .await
        {
            urls.push(url);
        }
        info!("Run {run}/{}: {} images so far", options.count, urls.len());
    }
    urls
}
