use crate::config::{EndpointSettings, TimeoutSettings};
use crate::coordinate::Coordinate;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Resolves a free-text place name to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Best match for `city`, or `None` when nothing could be resolved.
    /// Never fails: every transport or lookup problem maps to `None`.
    async fn resolve(&self, city: &str) -> Option<Coordinate>;
}

#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Geocoder returned status {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("No place matches {0:?}")]
    NoMatch(String),
    #[error("Invalid coordinate in geocoder response: {0}")]
    InvalidCoordinate(String),
}

#[derive(Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

/// Geocoder backed by a Nominatim-compatible search endpoint.
#[derive(Clone)]
pub struct NominatimGeocoder {
    http: Client,
    url: String,
    user_agent: String,
    timeout: Duration,
}

impl NominatimGeocoder {
    #[must_use]
    pub fn new(http: Client, endpoints: &EndpointSettings, timeouts: &TimeoutSettings) -> Self {
        Self {
            http,
            url: endpoints.geocoder_url.clone(),
            user_agent: endpoints.user_agent.clone(),
            timeout: timeouts.geocoder(),
        }
    }

    /// Single best-effort lookup asking for exactly one result.
    pub async fn lookup(&self, city: &str) -> Result<Coordinate, GeocodeError> {
        let response = self
            .http
            .get(&self.url)
            .query(&[("q", city), ("format", "json"), ("limit", "1")])
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GeocodeError::Api {
                status: response.status(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let places: Vec<Place> = response.json().await?;
        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NoMatch(city.to_string()))?;

        let latitude = parse_degrees(&place.lat)?;
        let longitude = parse_degrees(&place.lon)?;
        Ok(Coordinate::new(latitude, longitude))
    }
}

fn parse_degrees(value: &str) -> Result<f64, GeocodeError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| GeocodeError::InvalidCoordinate(value.to_string()))
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    #[instrument(skip(self))]
    async fn resolve(&self, city: &str) -> Option<Coordinate> {
        match self.lookup(city).await {
            Ok(coordinate) => {
                debug!("Resolved {city:?} to {coordinate}");
                Some(coordinate)
            }
            Err(e) => {
                warn!("Geocoding {city:?} failed: {e}");
                None
            }
        }
    }
}
