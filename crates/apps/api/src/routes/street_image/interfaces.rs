use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn default_city() -> String {
    "Paris".to_string()
}

#[derive(Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StreetImageRequest {
    #[serde(default = "default_city")]
    #[schema(default = "Paris")]
    pub city: String,
    /// Size of the ranked pool to choose from. Falls back to the configured default.
    pub limit: Option<usize>,
    /// Minimal composite score in `[0, 1]`. Falls back to the configured default.
    #[serde(alias = "quality_threshold")]
    pub quality_threshold: Option<f64>,
}

/// Field names are snake_case: existing chat clients read `image_url`.
#[derive(Serialize, Deserialize, ToSchema, Debug, PartialEq, Eq)]
pub struct StreetImageResponse {
    /// `null` when no suitable image was found.
    pub image_url: Option<String>,
}
