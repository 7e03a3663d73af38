use crate::candidate::ImageCandidate;
use crate::catalog::ImageryCatalog;
use crate::config::{PerspectiveSettings, SelectorConfig};
use crate::coordinate::Coordinate;
use crate::detectors::{Detection, DetectorKind, detect};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Estimates how likely each image was taken from a moving vehicle.
///
/// Several candidates sharing a capture sequence point to a vehicle-mounted
/// camera; candidates without a sequence id each count as their own group.
pub fn assign_vehicle_likelihood(
    candidates: &mut [ImageCandidate],
    settings: &PerspectiveSettings,
) {
    let mut group_sizes: HashMap<String, usize> = HashMap::new();
    for sequence_id in candidates.iter().filter_map(|c| c.sequence_id.as_ref()) {
        *group_sizes.entry(sequence_id.clone()).or_default() += 1;
    }

    for candidate in candidates.iter_mut() {
        let group_size = candidate
            .sequence_id
            .as_ref()
            .and_then(|id| group_sizes.get(id))
            .copied()
            .unwrap_or(1);
        candidate.signals.vehicle_likelihood = if group_size >= 2 {
            settings.sequence_likelihood
        } else {
            settings.singleton_likelihood
        };
    }
    debug!(sequences = group_sizes.len(), "Assigned vehicle likelihood");
}

/// Marks candidates as road validated when they appear near a mandatory road
/// feature or their vehicle likelihood reaches the threshold.
///
/// A failed validation query validates everything: an incomplete feature
/// catalog must not discard legitimate street images.
pub fn apply_road_validation(
    candidates: &mut [ImageCandidate],
    road_features: &Detection,
    settings: &PerspectiveSettings,
) {
    for candidate in candidates.iter_mut() {
        candidate.signals.road_validated = match road_features {
            Detection::Degraded => true,
            Detection::Matched(ids) => {
                ids.contains(&candidate.id)
                    || candidate.signals.vehicle_likelihood >= settings.validation_threshold
            }
        };
    }
}

/// Queries mandatory road features in a tight radius and applies the result.
/// Expects vehicle likelihood to be assigned already.
pub async fn validate_road_context(
    catalog: &dyn ImageryCatalog,
    center: Coordinate,
    candidates: &mut [ImageCandidate],
    config: &SelectorConfig,
) {
    let road_features = detect(
        catalog,
        DetectorKind::RoadValidation,
        center,
        config.search.road_validation_radius_km,
        DetectorKind::RoadValidation.categories(&config.detectors),
        config.search.road_validation_limit,
    )
    .await;

    if road_features.is_degraded() {
        warn!("Road validation unavailable, accepting all {} candidates", candidates.len());
    }
    apply_road_validation(candidates, &road_features, &config.perspective);

    let validated = candidates.iter().filter(|c| c.signals.road_validated).count();
    debug!(validated, total = candidates.len(), "Road validation applied");
}
