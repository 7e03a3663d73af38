use crate::candidate::ImageCandidate;
use crate::config::FilterSettings;
use std::collections::HashMap;
use tracing::debug;

/// Why a candidate was structurally unsuitable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    Blacklisted,
    Panoramic,
    SphericalCameraType,
    SphericalCameraModel,
    ExtremeAspectRatio,
}

/// First rule the candidate violates, checked in a fixed order.
#[must_use]
pub fn rejection_reason(
    candidate: &ImageCandidate,
    settings: &FilterSettings,
) -> Option<Rejection> {
    if settings
        .blacklisted_identifiers
        .iter()
        .any(|identifier| !identifier.is_empty() && candidate.url.contains(identifier.as_str()))
    {
        return Some(Rejection::Blacklisted);
    }

    if candidate.is_pano {
        return Some(Rejection::Panoramic);
    }

    if contains_any_ignore_case(&candidate.camera_type, &settings.excluded_camera_types) {
        return Some(Rejection::SphericalCameraType);
    }

    if contains_any_ignore_case(candidate.camera_model.trim(), &settings.excluded_camera_models) {
        return Some(Rejection::SphericalCameraModel);
    }

    if let Some(ratio) = candidate.aspect_ratio()
        && !(settings.min_aspect_ratio..=settings.max_aspect_ratio).contains(&ratio)
    {
        return Some(Rejection::ExtremeAspectRatio);
    }

    None
}

/// Drops every unsuitable candidate, keeping the survivors in input order.
#[must_use]
pub fn filter_candidates(
    candidates: Vec<ImageCandidate>,
    settings: &FilterSettings,
) -> Vec<ImageCandidate> {
    let mut rejected: HashMap<Rejection, usize> = HashMap::new();
    let kept: Vec<ImageCandidate> = candidates
        .into_iter()
        .filter(|candidate| match rejection_reason(candidate, settings) {
            Some(reason) => {
                *rejected.entry(reason).or_default() += 1;
                false
            }
            None => true,
        })
        .collect();

    if !rejected.is_empty() {
        debug!(kept = kept.len(), ?rejected, "Quality filter rejected candidates");
    }
    kept
}

fn contains_any_ignore_case(haystack: &str, needles: &[String]) -> bool {
    if haystack.is_empty() {
        return false;
    }
    let haystack = haystack.to_lowercase();
    needles
        .iter()
        .filter(|needle| !needle.is_empty())
        .any(|needle| haystack.contains(&needle.to_lowercase()))
}
