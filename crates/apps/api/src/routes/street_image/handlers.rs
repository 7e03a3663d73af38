use crate::api_state::ApiContext;
use crate::street_image::error::StreetImageError;
use crate::street_image::interfaces::{StreetImageRequest, StreetImageResponse};
use axum::Json;
use axum::extract::State;
use tracing::{info, instrument};

/// Pick a street image for a city.
///
/// Geocodes the city, scores nearby street-level images on driving relevance
/// and returns one of the best. `image_url` is `null` when nothing suitable was
/// found.
#[utoipa::path(
    post,
    path = "/street-image",
    tag = "Street image",
    request_body = StreetImageRequest,
    responses(
        (
            status = 200,
            description = "Selection finished, possibly without an image.",
            body = StreetImageResponse
        ),
        (status = 400, description = "Empty city or invalid threshold."),
    )
)]
#[instrument(skip(context))]
pub async fn street_image_handler(
    State(context): State<ApiContext>,
    Json(payload): Json<StreetImageRequest>,
) -> Result<Json<StreetImageResponse>, StreetImageError> {
    let city = payload.city.trim();
    if city.is_empty() {
        return Err(StreetImageError::EmptyCity);
    }
    let defaults = &context.selector.config().search;
    let quality_threshold = payload
        .quality_threshold
        .unwrap_or(defaults.default_quality_threshold);
    if !quality_threshold.is_finite() {
        return Err(StreetImageError::InvalidThreshold(quality_threshold));
    }
    let limit = payload.limit.unwrap_or(defaults.default_limit);

    let image_url = context
        .selector
        .get_street_image_url(city, limit, quality_threshold)
        .await;
    info!(found = image_url.is_some(), "Street image request for {city:?} done");
    Ok(Json(StreetImageResponse { image_url }))
}
