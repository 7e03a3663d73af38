mod client;
mod error;
mod interfaces;

pub use client::MapillaryClient;
pub use error::ImageryError;
pub use interfaces::*;

use crate::candidate::ImageCandidate;
use crate::coordinate::BoundingBox;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Search for candidate images inside a bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageQuery {
    pub bbox: BoundingBox,
    pub limit: usize,
    /// Lower bound on the capture date.
    pub since: Option<DateTime<Utc>>,
    /// Optional map feature categories the images must be associated with.
    pub object_values: Vec<String>,
}

/// Search for map features of the given categories inside a bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureQuery {
    pub bbox: BoundingBox,
    pub object_values: Vec<String>,
    pub limit: usize,
}

/// Street imagery catalog with image and map feature search.
///
/// Ordering of returned images carries no meaning.
#[async_trait]
pub trait ImageryCatalog: Send + Sync {
    async fn search_images(&self, query: &ImageQuery) -> Result<Vec<ImageCandidate>, ImageryError>;

    /// Union of the ids of all images the matched features were observed in.
    async fn search_map_features(
        &self,
        query: &FeatureQuery,
    ) -> Result<HashSet<String>, ImageryError>;
}
