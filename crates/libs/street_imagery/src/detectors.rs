use crate::candidate::ImageCandidate;
use crate::catalog::{FeatureQuery, ImageryCatalog};
use crate::config::{DetectorSettings, SelectorConfig};
use crate::coordinate::{BoundingBox, Coordinate};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorKind {
    TrafficSign,
    RoadInfrastructure,
    VehicleContent,
    RoadValidation,
}

impl DetectorKind {
    #[must_use]
    pub fn categories(self, settings: &DetectorSettings) -> &[String] {
        match self {
            Self::TrafficSign => &settings.traffic_sign_types,
            Self::RoadInfrastructure => &settings.road_infrastructure_types,
            Self::VehicleContent => &settings.vehicle_related_types,
            Self::RoadValidation => &settings.mandatory_road_features,
        }
    }
}

impl fmt::Display for DetectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TrafficSign => "traffic sign",
            Self::RoadInfrastructure => "road infrastructure",
            Self::VehicleContent => "vehicle content",
            Self::RoadValidation => "road validation",
        };
        f.write_str(name)
    }
}

/// Outcome of one feature detector query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// Ids of images spatially associated with the detector's categories.
    Matched(HashSet<String>),
    /// The query failed, so nothing is known about any image.
    Degraded,
}

impl Detection {
    /// Matched images score `matched_score`, unconfirmed ones the lower
    /// `baseline_score`, and every image gets the neutral `degraded_score`
    /// when the detector failed.
    #[must_use]
    pub fn score_for(&self, image_id: &str, settings: &DetectorSettings) -> f64 {
        match self {
            Self::Matched(ids) if ids.contains(image_id) => settings.matched_score,
            Self::Matched(_) => settings.baseline_score,
            Self::Degraded => settings.degraded_score,
        }
    }

    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded)
    }
}

/// Queries the catalog for features of the detector's categories around
/// `center`. Failures are absorbed into [`Detection::Degraded`].
pub async fn detect(
    catalog: &dyn ImageryCatalog,
    kind: DetectorKind,
    center: Coordinate,
    radius_km: f64,
    categories: &[String],
    limit: usize,
) -> Detection {
    if categories.is_empty() {
        warn!("No categories configured for the {kind} detector");
        return Detection::Degraded;
    }

    let query = FeatureQuery {
        bbox: BoundingBox::around(center, radius_km),
        object_values: categories.to_vec(),
        limit,
    };
    match catalog.search_map_features(&query).await {
        Ok(ids) => {
            debug!("{kind} detector matched {} images", ids.len());
            Detection::Matched(ids)
        }
        Err(e) => {
            warn!("{kind} detector degraded: {e}");
            Detection::Degraded
        }
    }
}

/// Results of the three content detectors for one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detections {
    pub traffic_signs: Detection,
    pub road_infrastructure: Detection,
    pub vehicle_content: Detection,
}

impl Detections {
    /// Runs the traffic sign, road infrastructure and vehicle content
    /// detectors concurrently. One failing does not cancel the others.
    pub async fn run(
        catalog: &dyn ImageryCatalog,
        center: Coordinate,
        config: &SelectorConfig,
    ) -> Self {
        let radius = config.search.detector_radius_km;
        let limit = config.search.feature_search_limit;
        let settings = &config.detectors;
        let run_one = |kind: DetectorKind| {
            detect(catalog, kind, center, radius, kind.categories(settings), limit)
        };

        let (traffic_signs, road_infrastructure, vehicle_content) = tokio::join!(
            run_one(DetectorKind::TrafficSign),
            run_one(DetectorKind::RoadInfrastructure),
            run_one(DetectorKind::VehicleContent),
        );

        Self {
            traffic_signs,
            road_infrastructure,
            vehicle_content,
        }
    }

    #[must_use]
    pub fn degraded_count(&self) -> usize {
        [
            &self.traffic_signs,
            &self.road_infrastructure,
            &self.vehicle_content,
        ]
        .into_iter()
        .filter(|d| d.is_degraded())
        .count()
    }

    /// Writes the educational, road infrastructure and vehicle content
    /// signals of every candidate.
    pub fn tag(&self, candidates: &mut [ImageCandidate], settings: &DetectorSettings) {
        for candidate in candidates {
            let id = candidate.id.as_str();
            candidate.signals.educational_score = self.traffic_signs.score_for(id, settings);
            candidate.signals.road_infrastructure_score =
                self.road_infrastructure.score_for(id, settings);
            candidate.signals.vehicle_content_score = self.vehicle_content.score_for(id, settings);
        }
    }
}
