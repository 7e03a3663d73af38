use crate::candidate::ImageCandidate;
use crate::catalog::{ImageQuery, ImageryCatalog};
use crate::coordinate::{BoundingBox, Coordinate};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// Fetches up to `fetch_count` candidates within `radius_km` of `center`.
///
/// Any catalog failure yields an empty batch: no images is an outcome, not an
/// error, at this stage.
pub async fn fetch_candidates(
    catalog: &dyn ImageryCatalog,
    center: Coordinate,
    radius_km: f64,
    since: Option<DateTime<Utc>>,
    fetch_count: usize,
    object_values: &[String],
) -> Vec<ImageCandidate> {
    let query = ImageQuery {
        bbox: BoundingBox::around(center, radius_km),
        limit: fetch_count,
        since,
        object_values: object_values.to_vec(),
    };

    match catalog.search_images(&query).await {
        Ok(candidates) => {
            info!("Fetched {} candidates near {center}", candidates.len());
            candidates
        }
        Err(e) => {
            warn!("Image search near {center} failed: {e}");
            Vec::new()
        }
    }
}
