use super::error::ImageryError;
use super::interfaces::{DataEnvelope, FeatureImages, FeatureRecord, ImageRecord};
use super::{FeatureQuery, ImageQuery, ImageryCatalog};
use crate::candidate::ImageCandidate;
use crate::config::{ImageResolution, SelectorConfig};
use async_trait::async_trait;
use chrono::SecondsFormat;
use reqwest::{Client, Response};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

const FEATURE_FIELDS: &str = "id,object_value,images";

/// Client for the Mapillary graph API image and map feature endpoints.
#[derive(Clone)]
pub struct MapillaryClient {
    http: Client,
    access_token: String,
    images_url: Url,
    map_features_url: Url,
    resolution: ImageResolution,
    image_timeout: Duration,
    feature_timeout: Duration,
}

impl MapillaryClient {
    pub fn new(
        http: Client,
        access_token: impl Into<String>,
        config: &SelectorConfig,
    ) -> Result<Self, ImageryError> {
        Ok(Self {
            http,
            access_token: access_token.into(),
            images_url: Url::parse(&config.endpoints.images_url)?,
            map_features_url: Url::parse(&config.endpoints.map_features_url)?,
            resolution: config.search.resolution,
            image_timeout: config.timeouts.image_search(),
            feature_timeout: config.timeouts.feature_search(),
        })
    }

    fn image_fields(&self) -> String {
        format!(
            "id,{},captured_at,camera_type,is_pano,make,model,width,height,sequence",
            self.resolution.field_name()
        )
    }

    async fn check_status(response: Response) -> Result<Response, ImageryError> {
        if response.status().is_success() {
            return Ok(response);
        }
        Err(ImageryError::Api {
            status: response.status(),
            body: response.text().await.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl ImageryCatalog for MapillaryClient {
    #[instrument(skip(self), fields(bbox = %query.bbox))]
    async fn search_images(&self, query: &ImageQuery) -> Result<Vec<ImageCandidate>, ImageryError> {
        let mut params = vec![
            ("access_token", self.access_token.clone()),
            ("bbox", query.bbox.to_query_param()),
            ("limit", query.limit.to_string()),
            ("fields", self.image_fields()),
        ];
        if let Some(since) = query.since {
            params.push((
                "start_captured_at",
                since.to_rfc3339_opts(SecondsFormat::Secs, true),
            ));
        }
        if !query.object_values.is_empty() {
            params.push(("object_values", query.object_values.join(",")));
        }

        let response = self
            .http
            .get(self.images_url.clone())
            .query(&params)
            .timeout(self.image_timeout)
            .send()
            .await?;
        let page: DataEnvelope<ImageRecord> = Self::check_status(response).await?.json().await?;

        let received = page.data.len();
        let candidates: Vec<ImageCandidate> = page
            .data
            .into_iter()
            .filter_map(|record| record.into_candidate(self.resolution))
            .collect();
        debug!(
            received,
            usable = candidates.len(),
            "Image search returned records"
        );
        Ok(candidates)
    }

    #[instrument(skip(self), fields(bbox = %query.bbox, categories = query.object_values.len()))]
    async fn search_map_features(
        &self,
        query: &FeatureQuery,
    ) -> Result<HashSet<String>, ImageryError> {
        let params = [
            ("access_token", self.access_token.clone()),
            ("bbox", query.bbox.to_query_param()),
            ("limit", query.limit.to_string()),
            ("object_values", query.object_values.join(",")),
            ("fields", FEATURE_FIELDS.to_string()),
        ];

        let response = self
            .http
            .get(self.map_features_url.clone())
            .query(&params)
            .timeout(self.feature_timeout)
            .send()
            .await?;
        let page: DataEnvelope<FeatureRecord> = Self::check_status(response).await?.json().await?;

        let features = page.data.len();
        let image_ids: HashSet<String> = page
            .data
            .into_iter()
            .filter_map(|feature| feature.images)
            .flat_map(FeatureImages::into_ids)
            .collect();
        debug!(features, images = image_ids.len(), "Map feature search");
        Ok(image_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::{BoundingBox, Coordinate};
    use chrono::{TimeZone, Utc};
    use mockito::Matcher;

    fn client_for(server: &mockito::Server) -> MapillaryClient {
        let mut config = SelectorConfig::default();
        config.endpoints.images_url = format!("{}/images", server.url());
        config.endpoints.map_features_url = format!("{}/map_features", server.url());
        MapillaryClient::new(Client::new(), "token-123", &config).expect("valid mock urls")
    }

    fn paris_bbox() -> BoundingBox {
        BoundingBox::around(Coordinate::new(48.85, 2.35), 5.0)
    }

    #[tokio::test]
    async fn search_images_sends_query_and_parses_records() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/images")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("access_token".into(), "token-123".into()),
                Matcher::UrlEncoded("bbox".into(), paris_bbox().to_query_param()),
                Matcher::UrlEncoded("limit".into(), "40".into()),
                Matcher::UrlEncoded("start_captured_at".into(), "2016-01-01T00:00:00Z".into()),
                Matcher::UrlEncoded(
                    "fields".into(),
                    "id,thumb_2048_url,captured_at,camera_type,is_pano,make,model,width,height,sequence"
                        .into(),
                ),
            ]))
            .with_status(200)
            .with_body(
                r#"{ "data": [
                    { "id": "1", "thumb_2048_url": "https://img/1.jpg", "sequence": "s1", "width": 2000, "height": 1500 },
                    { "id": "2", "thumb_256_url": "https://img/2-small.jpg" },
                    { "id": "3", "thumb_2048_url": "https://img/3.jpg", "is_pano": true }
                ] }"#,
            )
            .create_async()
            .await;

        let query = ImageQuery {
            bbox: paris_bbox(),
            limit: 40,
            since: Some(Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 0).single().expect("valid date")),
            object_values: Vec::new(),
        };
        let candidates = client_for(&server)
            .search_images(&query)
            .await
            .expect("mock returns 200");

        mock.assert_async().await;
        let ids: Vec<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert!(candidates[1].is_pano);
    }

    #[tokio::test]
    async fn search_images_reports_api_errors() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/images")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"error": "invalid token"}"#)
            .create_async()
            .await;

        let query = ImageQuery {
            bbox: paris_bbox(),
            limit: 10,
            since: None,
            object_values: Vec::new(),
        };
        let result = client_for(&server).search_images(&query).await;
        assert!(matches!(
            result,
            Err(ImageryError::Api { status, .. }) if status.as_u16() == 401
        ));
    }

    #[tokio::test]
    async fn search_map_features_unions_image_ids() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/map_features")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("object_values".into(), "regulatory--*,warning--*".into()),
                Matcher::UrlEncoded("limit".into(), "500".into()),
                Matcher::UrlEncoded("fields".into(), FEATURE_FIELDS.into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{ "data": [
                    { "id": "f1", "object_value": "regulatory--stop--g1", "images": ["a", "b"] },
                    { "id": "f2", "object_value": "warning--curve--g1", "images": ["b", "c"] }
                ] }"#,
            )
            .create_async()
            .await;

        let query = FeatureQuery {
            bbox: paris_bbox(),
            object_values: vec!["regulatory--*".to_string(), "warning--*".to_string()],
            limit: 500,
        };
        let ids = client_for(&server)
            .search_map_features(&query)
            .await
            .expect("mock returns 200");

        mock.assert_async().await;
        let expected: HashSet<String> = ["a", "b", "c"].iter().map(ToString::to_string).collect();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn transport_errors_do_not_leak_the_token() {
        let mut config = SelectorConfig::default();
        config.endpoints.images_url = "http://127.0.0.1:9/images".to_string();
        config.endpoints.map_features_url = "http://127.0.0.1:9/map_features".to_string();
        let client = MapillaryClient::new(Client::new(), "SECRET-TOKEN", &config)
            .expect("valid urls");

        let image_error = client
            .search_images(&ImageQuery {
                bbox: paris_bbox(),
                limit: 10,
                since: None,
                object_values: Vec::new(),
            })
            .await
            .expect_err("nothing listens on port 9");
        let feature_error = client
            .search_map_features(&FeatureQuery {
                bbox: paris_bbox(),
                object_values: vec!["regulatory--*".to_string()],
                limit: 10,
            })
            .await
            .expect_err("nothing listens on port 9");

        for error in [image_error, feature_error] {
            assert!(matches!(error, ImageryError::Http(_)));
            let logged = format!("{error} / {error:?}");
            assert!(!logged.contains("SECRET-TOKEN"), "token leaked: {logged}");
        }
    }

    #[tokio::test]
    async fn decode_errors_do_not_leak_the_token() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/images")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let error = client_for(&server)
            .search_images(&ImageQuery {
                bbox: paris_bbox(),
                limit: 10,
                since: None,
                object_values: Vec::new(),
            })
            .await
            .expect_err("body is not json");
        let logged = format!("{error} / {error:?}");
        assert!(!logged.contains("token-123"), "token leaked: {logged}");
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let mut config = SelectorConfig::default();
        config.endpoints.images_url = "not a url".to_string();
        assert!(matches!(
            MapillaryClient::new(Client::new(), "t", &config),
            Err(ImageryError::Url(_))
        ));
    }
}
