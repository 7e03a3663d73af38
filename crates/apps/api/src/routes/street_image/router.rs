use crate::api_state::ApiContext;
use crate::street_image::handlers::street_image_handler;
use axum::{Router, routing::post};

pub fn street_image_router() -> Router<ApiContext> {
    Router::new().route("/street-image", post(street_image_handler))
}
