//! In-memory geocoder and catalog for exercising the pipeline without network.

use crate::candidate::ImageCandidate;
use crate::catalog::{FeatureQuery, ImageQuery, ImageryCatalog, ImageryError};
use crate::coordinate::Coordinate;
use crate::geocoder::Geocoder;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

pub struct FakeGeocoder(pub Option<Coordinate>);

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn resolve(&self, _city: &str) -> Option<Coordinate> {
        self.0
    }
}

fn api_error() -> ImageryError {
    ImageryError::Api {
        status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
        body: "unavailable".to_string(),
    }
}

/// Feature answers are keyed by the comma-joined category list of the query.
#[derive(Default)]
pub struct FakeCatalog {
    images: Option<Vec<ImageCandidate>>,
    features: HashMap<String, Option<HashSet<String>>>,
    image_queries: Mutex<Vec<ImageQuery>>,
    feature_queries: Mutex<Vec<FeatureQuery>>,
}

impl FakeCatalog {
    pub fn with_images(mut self, images: Vec<ImageCandidate>) -> Self {
        self.images = Some(images);
        self
    }

    pub fn with_features(mut self, categories: &[String], ids: &[&str]) -> Self {
        let ids = ids.iter().map(ToString::to_string).collect();
        self.features.insert(categories.join(","), Some(ids));
        self
    }

    pub fn failing_features(mut self, categories: &[String]) -> Self {
        self.features.insert(categories.join(","), None);
        self
    }

    pub fn image_queries(&self) -> Vec<ImageQuery> {
        self.image_queries.lock().expect("lock").clone()
    }

    pub fn feature_queries(&self) -> Vec<FeatureQuery> {
        self.feature_queries.lock().expect("lock").clone()
    }
}

#[async_trait]
impl ImageryCatalog for FakeCatalog {
    async fn search_images(&self, query: &ImageQuery) -> Result<Vec<ImageCandidate>, ImageryError> {
        self.image_queries.lock().expect("lock").push(query.clone());
        self.images.clone().ok_or_else(api_error)
    }

    async fn search_map_features(
        &self,
        query: &FeatureQuery,
    ) -> Result<HashSet<String>, ImageryError> {
        self.feature_queries.lock().expect("lock").push(query.clone());
        match self.features.get(&query.object_values.join(",")) {
            Some(Some(ids)) => Ok(ids.clone()),
            Some(None) => Err(api_error()),
            None => Ok(HashSet::new()),
        }
    }
}
