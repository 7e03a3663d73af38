use crate::candidate::{ImageCandidate, Signals};
use crate::config::{RecencySettings, ScoreWeights, ScoringSettings};
use chrono::{DateTime, Utc};

/// Higher score for makes known to produce sharp street imagery.
#[must_use]
pub fn camera_quality_score(make: &str, settings: &ScoringSettings) -> f64 {
    let preferred = settings
        .preferred_camera_makes
        .iter()
        .any(|p| !p.is_empty() && make.contains(p.as_str()));
    if preferred {
        settings.preferred_make_score
    } else {
        settings.other_make_score
    }
}

/// Step function of the image age. Unknown (zero or negative) capture times
/// score 0, images from the future count as recent.
#[must_use]
pub fn recency_score(captured_at_ms: i64, now: DateTime<Utc>, settings: &RecencySettings) -> f64 {
    if captured_at_ms <= 0 {
        return 0.0;
    }
    let Some(captured) = DateTime::<Utc>::from_timestamp_millis(captured_at_ms) else {
        return 0.0;
    };

    let days_ago = (now - captured).num_days();
    if days_ago < settings.recent_days {
        settings.recent_score
    } else if days_ago < settings.medium_days {
        settings.medium_score
    } else if days_ago < settings.old_days {
        settings.old_score
    } else {
        settings.very_old_score
    }
}

/// Fills the signals that depend only on the candidate's own metadata.
pub fn assign_intrinsic_scores(
    candidates: &mut [ImageCandidate],
    settings: &ScoringSettings,
    now: DateTime<Utc>,
) {
    for candidate in candidates {
        candidate.signals.quality_score = camera_quality_score(&candidate.camera_make, settings);
        candidate.signals.recency_score =
            recency_score(candidate.captured_at, now, &settings.recency);
    }
}

/// Weighted sum of all signals. Pure and deterministic.
#[must_use]
pub fn composite_score(signals: &Signals, weights: &ScoreWeights) -> f64 {
    let validated = if signals.road_validated { 1.0 } else { 0.0 };
    weights.educational * signals.educational_score
        + weights.road_infrastructure * signals.road_infrastructure_score
        + weights.vehicle_content * signals.vehicle_content_score
        + weights.vehicle_perspective * signals.vehicle_likelihood
        + weights.road_validation * validated
        + weights.quality * signals.quality_score
        + weights.recency * signals.recency_score
}
