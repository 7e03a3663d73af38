#![deny(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

mod candidate;
pub mod catalog;
mod config;
mod coordinate;
mod detectors;
mod error;
mod fetcher;
mod geocoder;
mod perspective;
mod pipeline;
mod quality_filter;
mod scoring;
mod selector;
#[cfg(test)]
mod test_support;

pub use candidate::{ImageCandidate, Signals};
pub use catalog::{ImageryCatalog, ImageryError, MapillaryClient};
pub use config::*;
pub use coordinate::{BoundingBox, Coordinate};
pub use error::SelectionError;
pub use geocoder::{GeocodeError, Geocoder, NominatimGeocoder};
pub use pipeline::StreetImageSelector;
pub use scoring::composite_score;
