use crate::routes::{root, street_image};
use crate::street_image::interfaces::{StreetImageRequest, StreetImageResponse};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        root::handlers::health_check,
        street_image::handlers::street_image_handler,
    ),
    components(
        schemas(StreetImageRequest, StreetImageResponse),
    ),
    servers((url = "/api/v1")),
    tags(
        (name = "Street image", description = "Representative driving scenes per city"),
        (name = "System", description = "Health check"),
    )
)]
pub struct ApiDoc;
