use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Every tunable of the street image selection pipeline.
///
/// Deserialized from the `imagery` section of `config/settings.yaml`. Missing
/// keys fall back to [`SelectorConfig::default`], which is the canonical
/// configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub endpoints: EndpointSettings,
    pub timeouts: TimeoutSettings,
    pub search: SearchSettings,
    pub filter: FilterSettings,
    pub detectors: DetectorSettings,
    pub perspective: PerspectiveSettings,
    pub scoring: ScoringSettings,
    pub selection: SelectionSettings,
}

impl SelectorConfig {
    /// Logs a warning for every setting that is out of its sensible range.
    /// Returns `true` if nothing was flagged.
    pub fn validate(&self) -> bool {
        let mut ok = true;
        let total = self.scoring.weights.total();
        if (total - 1.0).abs() > 0.01 {
            warn!("Composite score weights sum to {total:.3}, expected 1.0");
            ok = false;
        }
        if self.selection.top_k == 0 {
            warn!("selection.top_k is 0, a single top candidate will be used");
            ok = false;
        }
        if self.search.fetch_multiplier == 0 {
            warn!("search.fetch_multiplier is 0, no images will be requested");
            ok = false;
        }
        if self.filter.min_aspect_ratio >= self.filter.max_aspect_ratio {
            warn!(
                "filter.min_aspect_ratio ({}) is not below max_aspect_ratio ({})",
                self.filter.min_aspect_ratio, self.filter.max_aspect_ratio
            );
            ok = false;
        }
        ok
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointSettings {
    pub geocoder_url: String,
    pub images_url: String,
    pub map_features_url: String,
    /// Nominatim rejects requests without an identifying user agent.
    pub user_agent: String,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            geocoder_url: "https://nominatim.openstreetmap.org/search".to_string(),
            images_url: "https://graph.mapillary.com/images".to_string(),
            map_features_url: "https://graph.mapillary.com/map_features".to_string(),
            user_agent: "roadbuddy/1.0".to_string(),
        }
    }
}

/// Per-call timeouts plus the wall-clock budget of one selection, in seconds.
/// A budget of 0 disables the overall limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutSettings {
    pub geocoder_secs: u64,
    pub image_search_secs: u64,
    pub feature_search_secs: u64,
    pub pipeline_budget_secs: u64,
}

impl TimeoutSettings {
    #[must_use]
    pub const fn geocoder(&self) -> Duration {
        Duration::from_secs(self.geocoder_secs)
    }

    #[must_use]
    pub const fn image_search(&self) -> Duration {
        Duration::from_secs(self.image_search_secs)
    }

    #[must_use]
    pub const fn feature_search(&self) -> Duration {
        Duration::from_secs(self.feature_search_secs)
    }

    #[must_use]
    pub const fn pipeline_budget(&self) -> Duration {
        Duration::from_secs(self.pipeline_budget_secs)
    }
}

impl Default for TimeoutSettings {
    fn default() -> Self {
        Self {
            geocoder_secs: 5,
            image_search_secs: 10,
            feature_search_secs: 8,
            pipeline_budget_secs: 30,
        }
    }
}

/// Which thumbnail the catalog should return as the direct image URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageResolution {
    #[serde(rename = "thumb_256_url")]
    Thumb256,
    #[serde(rename = "thumb_1024_url")]
    Thumb1024,
    #[serde(rename = "thumb_2048_url")]
    Thumb2048,
}

impl ImageResolution {
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Thumb256 => "thumb_256_url",
            Self::Thumb1024 => "thumb_1024_url",
            Self::Thumb2048 => "thumb_2048_url",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Radius of the main image search around the city centre.
    pub radius_km: f64,
    /// Radius of the three feature detector queries.
    pub detector_radius_km: f64,
    /// Tight radius used to confirm mandatory road features.
    pub road_validation_radius_km: f64,
    /// Images requested per desired candidate, to survive filtering.
    pub fetch_multiplier: usize,
    /// Only images captured within this many years are requested.
    pub years_back: u32,
    pub default_limit: usize,
    pub default_quality_threshold: f64,
    pub feature_search_limit: usize,
    pub road_validation_limit: usize,
    pub resolution: ImageResolution,
    /// Optional feature category filter sent with the image search itself.
    pub image_object_values: Vec<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            radius_km: 5.0,
            detector_radius_km: 3.0,
            road_validation_radius_km: 0.55,
            fetch_multiplier: 4,
            years_back: 10,
            default_limit: 20,
            default_quality_threshold: 0.4,
            feature_search_limit: 500,
            road_validation_limit: 200,
            resolution: ImageResolution::Thumb2048,
            image_object_values: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Identifiers embedded in URLs of images known to be unusable.
    pub blacklisted_identifiers: Vec<String>,
    /// Matched case-insensitively against the camera type.
    pub excluded_camera_types: Vec<String>,
    /// Matched case-insensitively against the camera model.
    pub excluded_camera_models: Vec<String>,
    pub min_aspect_ratio: f64,
    pub max_aspect_ratio: f64,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            blacklisted_identifiers: strings(&[
                "An8NShOw78k3pGN8EoVrZyqjBuqDR5YtvNKmTzOiVbYse527npF5OUXNPvvvjdJY",
                "An-bISCPCtMS3qyX-gjXaqNuMKnGabShOGUh4WDUNTdli-eMlnHMGf9fXm3GHKZk",
                "An9y5YkZKerXHQ8-RCbiRem1UHdS1NxZaOhsnAvLEaQ2o2gqezGFD1lG4CkOz9nC",
                "An9pvLOmuHkTbUjw416wYc_w7I3IPPJfm0MebHRfJAvkz9yw9HbK-7u7Y5K_crLA",
                "An_oaNqVVSkViiEFaOM7ItLCu4ASpFHpGFEGGD5oBs_OYfSZchUTkEVC6htzFGeF",
                "An8qGFStJGOdWQzo6Xn1eipwLZLHBvtp17J7OAxHBJCoZeQON2cBk8Zn4vlBEEJ_",
                "An8S8i2wDCVO4YERJ_IgOo_KbF8-hHkn6D038delY_fY1zj0kdwkNLadwAksbwrl",
                "An-YvNugNSA0LSlppSKKa0W54j4sjSOT2ttWfiS9Qr68xxBH",
                "An84ydomjfvWudlvXLDE-xBu3795H_SPXyMEqeTRAi8BbH6g",
                "An9Y3v16CDPgv1SO9e-dFudqNzceKnqjMK6Z11rpPHO4htje",
            ]),
            excluded_camera_types: strings(&["spherical", "360", "panoramic", "equirectangular"]),
            excluded_camera_models: strings(&[
                "Insta360",
                "Ricoh Theta",
                "Samsung Gear 360",
                "Garmin VIRB X",
                "LG 360 CAM",
                "Kodak PIXPRO SP360",
                "Vuze",
                "Orah",
            ]),
            min_aspect_ratio: 0.3,
            max_aspect_ratio: 3.0,
        }
    }
}

/// Category lists and scores of the map feature detectors.
///
/// Category names support a trailing `*` wildcard, which the catalog expands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorSettings {
    pub traffic_sign_types: Vec<String>,
    pub road_infrastructure_types: Vec<String>,
    pub vehicle_related_types: Vec<String>,
    pub mandatory_road_features: Vec<String>,
    /// Score of an image the detector confirmed.
    pub matched_score: f64,
    /// Score of an image the detector did not confirm.
    pub baseline_score: f64,
    /// Score of every image when the detector query itself failed.
    pub degraded_score: f64,
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            traffic_sign_types: strings(&["regulatory--*", "warning--*", "information--*"]),
            road_infrastructure_types: strings(&[
                "object--street-light",
                "object--traffic-light",
                "object--fire-hydrant",
                "object--pole",
                "construction--barrier--*",
                "marking--*",
                "object--support--utility-pole",
            ]),
            vehicle_related_types: strings(&[
                "object--vehicle--*",
                "object--vehicle--car",
                "object--vehicle--truck",
                "object--vehicle--bus",
                "object--vehicle--motorcycle",
                "construction--flat--road",
                "construction--flat--parking",
                "marking--discrete--lane-marking",
                "marking--discrete--stop-line",
                "construction--barrier--curb",
            ]),
            mandatory_road_features: strings(&[
                "construction--flat--road",
                "marking--*",
                "object--vehicle--*",
                "construction--barrier--curb",
                "object--traffic-light",
                "regulatory--*",
                "warning--*",
            ]),
            matched_score: 1.0,
            baseline_score: 0.3,
            degraded_score: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PerspectiveSettings {
    /// Likelihood for images sharing a capture sequence with another candidate.
    pub sequence_likelihood: f64,
    pub singleton_likelihood: f64,
    /// Vehicle likelihood at or above which an image counts as road validated.
    pub validation_threshold: f64,
}

impl Default for PerspectiveSettings {
    fn default() -> Self {
        Self {
            sequence_likelihood: 0.8,
            singleton_likelihood: 0.5,
            validation_threshold: 0.6,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSettings {
    /// Substrings of camera makes that earn the preferred quality score.
    pub preferred_camera_makes: Vec<String>,
    pub preferred_make_score: f64,
    pub other_make_score: f64,
    pub weights: ScoreWeights,
    pub recency: RecencySettings,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            preferred_camera_makes: strings(&[
                "GoPro", "Canon", "Nikon", "Sony", "Apple", "Samsung", "Google", "OnePlus",
                "Huawei", "Xiaomi", "DJI", "Garmin", "Blackvue", "Nextbase", "Insta360",
            ]),
            preferred_make_score: 1.0,
            other_make_score: 0.8,
            weights: ScoreWeights::default(),
            recency: RecencySettings::default(),
        }
    }
}

/// Weights of the composite score. They should sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub educational: f64,
    pub road_infrastructure: f64,
    pub vehicle_content: f64,
    pub vehicle_perspective: f64,
    pub road_validation: f64,
    pub quality: f64,
    pub recency: f64,
}

impl ScoreWeights {
    #[must_use]
    pub fn total(&self) -> f64 {
        self.educational
            + self.road_infrastructure
            + self.vehicle_content
            + self.vehicle_perspective
            + self.road_validation
            + self.quality
            + self.recency
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            educational: 0.25,
            road_infrastructure: 0.25,
            vehicle_content: 0.2,
            vehicle_perspective: 0.2,
            road_validation: 0.05,
            quality: 0.03,
            recency: 0.02,
        }
    }
}

/// Step function of image age in days.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecencySettings {
    pub recent_days: i64,
    pub medium_days: i64,
    pub old_days: i64,
    pub recent_score: f64,
    pub medium_score: f64,
    pub old_score: f64,
    pub very_old_score: f64,
}

impl Default for RecencySettings {
    fn default() -> Self {
        Self {
            recent_days: 90,
            medium_days: 1095,
            old_days: 2190,
            recent_score: 1.0,
            medium_score: 0.9,
            old_score: 0.8,
            very_old_score: 0.6,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionSettings {
    /// Number of best candidates the final pick is drawn from.
    pub top_k: usize,
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self { top_k: 5 }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        let config = SelectorConfig::default();
        assert!((config.scoring.weights.total() - 1.0).abs() < 1e-9);
        assert!(config.validate());
    }

    #[test]
    fn validate_flags_unbalanced_weights() {
        let mut config = SelectorConfig::default();
        config.scoring.weights.educational = 0.6;
        assert!(!config.validate());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() -> serde_json::Result<()> {
        let config: SelectorConfig = serde_json::from_str(
            r#"{ "selection": { "top_k": 3 }, "search": { "resolution": "thumb_1024_url" } }"#,
        )?;
        assert_eq!(config.selection.top_k, 3);
        assert_eq!(config.search.resolution, ImageResolution::Thumb1024);
        assert_eq!(config.search.fetch_multiplier, 4);
        assert_eq!(config.detectors.traffic_sign_types.len(), 3);
        Ok(())
    }

    #[test]
    fn resolution_field_names_match_serde_names() -> serde_json::Result<()> {
        for resolution in [
            ImageResolution::Thumb256,
            ImageResolution::Thumb1024,
            ImageResolution::Thumb2048,
        ] {
            let serialized = serde_json::to_string(&resolution)?;
            assert_eq!(serialized, format!("\"{}\"", resolution.field_name()));
        }
        Ok(())
    }
}
