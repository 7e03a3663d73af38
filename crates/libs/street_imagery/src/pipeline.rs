use crate::candidate::ImageCandidate;
use crate::catalog::{ImageryCatalog, ImageryError, MapillaryClient};
use crate::config::SelectorConfig;
use crate::detectors::Detections;
use crate::error::SelectionError;
use crate::fetcher::fetch_candidates;
use crate::geocoder::{Geocoder, NominatimGeocoder};
use crate::perspective::{assign_vehicle_likelihood, validate_road_context};
use crate::quality_filter::filter_candidates;
use crate::scoring::assign_intrinsic_scores;
use crate::selector::{rank, select};
use bon::bon;
use chrono::{Duration, Utc};
use fastrand::Rng;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Picks a representative, driving-relevant street image for a city.
///
/// Stateless between calls: every selection owns its own candidate batch, so
/// one selector can serve concurrent requests.
#[derive(Clone)]
pub struct StreetImageSelector {
    geocoder: Arc<dyn Geocoder>,
    catalog: Arc<dyn ImageryCatalog>,
    config: Arc<SelectorConfig>,
}

#[bon]
impl StreetImageSelector {
    #[must_use]
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        catalog: Arc<dyn ImageryCatalog>,
        config: SelectorConfig,
    ) -> Self {
        Self {
            geocoder,
            catalog,
            config: Arc::new(config),
        }
    }

    /// Selector backed by Nominatim and Mapillary, sharing one HTTP client.
    pub fn connect(access_token: &str, config: SelectorConfig) -> Result<Self, ImageryError> {
        let http = reqwest::Client::builder()
            .user_agent(&config.endpoints.user_agent)
            .build()?;
        let geocoder = NominatimGeocoder::new(http.clone(), &config.endpoints, &config.timeouts);
        let catalog = MapillaryClient::new(http, access_token, &config)?;
        Ok(Self::new(Arc::new(geocoder), Arc::new(catalog), config))
    }

    #[must_use]
    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// URL of a selected image for `city`, or `None` when no image is
    /// available for any reason. Never fails.
    pub async fn get_street_image_url(
        &self,
        city: &str,
        limit: usize,
        quality_threshold: f64,
    ) -> Option<String> {
        match self
            .select_image(city)
            .limit(limit)
            .quality_threshold(quality_threshold)
            .call()
            .await
        {
            Ok(candidate) => Some(candidate.url),
            Err(e) => {
                warn!("No street image for {city:?}: {e}");
                None
            }
        }
    }

    /// Runs the whole pipeline within the configured budget.
    ///
    /// `limit` defaults to the configured limit (also when 0) and
    /// `quality_threshold` to the configured threshold. A `seed` makes the
    /// final random pick reproducible.
    #[builder]
    pub async fn select_image(
        &self,
        #[builder(start_fn)] city: &str,
        limit: Option<usize>,
        quality_threshold: Option<f64>,
        seed: Option<u64>,
    ) -> Result<ImageCandidate, SelectionError> {
        let limit = limit
            .filter(|l| *l > 0)
            .unwrap_or(self.config.search.default_limit);
        let quality_threshold =
            quality_threshold.unwrap_or(self.config.search.default_quality_threshold);
        let mut rng = seed.map_or_else(Rng::new, Rng::with_seed);

        let budget = self.config.timeouts.pipeline_budget();
        if budget.is_zero() {
            return self.run(city, limit, quality_threshold, &mut rng).await;
        }
        tokio::time::timeout(budget, self.run(city, limit, quality_threshold, &mut rng))
            .await
            .map_err(|_| SelectionError::TimedOut(budget))?
    }

    #[instrument(skip(self, rng))]
    async fn run(
        &self,
        city: &str,
        limit: usize,
        quality_threshold: f64,
        rng: &mut Rng,
    ) -> Result<ImageCandidate, SelectionError> {
        let config = self.config.as_ref();
        let catalog = self.catalog.as_ref();

        let city = city.trim();
        if city.is_empty() {
            return Err(SelectionError::LookupFailure(city.to_string()));
        }
        let center = self
            .geocoder
            .resolve(city)
            .await
            .ok_or_else(|| SelectionError::LookupFailure(city.to_string()))?;

        let since = (config.search.years_back > 0)
            .then(|| Utc::now() - Duration::days(i64::from(config.search.years_back) * 365));
        let fetched = fetch_candidates(
            catalog,
            center,
            config.search.radius_km,
            since,
            limit.saturating_mul(config.search.fetch_multiplier),
            &config.search.image_object_values,
        )
        .await;
        if fetched.is_empty() {
            return Err(SelectionError::FetchFailure(center));
        }
        let fetched_count = fetched.len();

        let mut candidates = filter_candidates(fetched, &config.filter);
        if candidates.is_empty() {
            return Err(SelectionError::SelectionEmpty(fetched_count));
        }

        assign_intrinsic_scores(&mut candidates, &config.scoring, Utc::now());

        let detections = Detections::run(catalog, center, config).await;
        let degraded = detections.degraded_count();
        if degraded > 0 {
            warn!("{degraded} of 3 detectors degraded, using neutral scores for them");
        }
        detections.tag(&mut candidates, &config.detectors);

        assign_vehicle_likelihood(&mut candidates, &config.perspective);
        validate_road_context(catalog, center, &mut candidates, config).await;

        let filtered_count = candidates.len();
        let mut ranked = rank(candidates, &config.scoring.weights);
        ranked.retain(|scored| scored.score >= quality_threshold);
        ranked.truncate(limit);

        let selected = select(&ranked, config.selection.top_k, rng)
            .ok_or(SelectionError::SelectionEmpty(fetched_count))?;
        info!(
            fetched = fetched_count,
            filtered = filtered_count,
            ranked = ranked.len(),
            score = selected.score,
            "Selected image {} for {city:?}",
            selected.candidate.id
        );
        Ok(selected.candidate.clone())
    }
}
