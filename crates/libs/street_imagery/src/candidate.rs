/// One street-level image under consideration for selection.
///
/// Created from a catalog record and only ever enriched afterwards: the
/// pipeline stages fill in [`Signals`] but never clear metadata.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageCandidate {
    pub id: String,
    /// Direct URL at the configured resolution.
    pub url: String,
    /// Groups images captured along one camera trajectory.
    pub sequence_id: Option<String>,
    /// Epoch milliseconds, 0 when unknown.
    pub captured_at: i64,
    pub camera_make: String,
    pub camera_model: String,
    pub camera_type: String,
    pub width: u32,
    pub height: u32,
    pub is_pano: bool,
    pub signals: Signals,
}

impl ImageCandidate {
    #[must_use]
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    /// Width over height, `None` when either dimension is unknown.
    #[must_use]
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        Some(f64::from(self.width) / f64::from(self.height))
    }
}

/// Relevance signals derived by the pipeline stages, each in `[0, 1]`.
///
/// Every field starts at an explicit 0.0/false, so the composite scorer never
/// sees a missing signal.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Signals {
    pub quality_score: f64,
    pub educational_score: f64,
    pub road_infrastructure_score: f64,
    pub vehicle_content_score: f64,
    pub vehicle_likelihood: f64,
    pub road_validated: bool,
    pub recency_score: f64,
}
