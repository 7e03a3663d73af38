use crate::candidate::ImageCandidate;
use crate::config::ImageResolution;
use serde::Deserialize;

/// Every catalog list response wraps its records in `data`.
#[derive(Deserialize, Debug)]
pub struct DataEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Catalog ids are numeric strings, but some records carry bare numbers.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum CatalogId {
    Text(String),
    Number(u64),
}

impl CatalogId {
    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct IdRef {
    pub id: CatalogId,
}

/// Sequence reference, either the bare id or an expanded `{ id }` object.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum SequenceRef {
    Id(CatalogId),
    Object(IdRef),
}

impl SequenceRef {
    fn into_id(self) -> String {
        match self {
            Self::Id(id) | Self::Object(IdRef { id }) => id.into_string(),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct ImageRecord {
    pub id: CatalogId,
    pub thumb_256_url: Option<String>,
    pub thumb_1024_url: Option<String>,
    pub thumb_2048_url: Option<String>,
    pub captured_at: Option<i64>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub camera_type: Option<String>,
    pub is_pano: Option<bool>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub sequence: Option<SequenceRef>,
}

impl ImageRecord {
    /// Converts the record into a candidate, or `None` when it has no URL at
    /// the requested resolution.
    #[must_use]
    pub fn into_candidate(self, resolution: ImageResolution) -> Option<ImageCandidate> {
        let url = match resolution {
            ImageResolution::Thumb256 => self.thumb_256_url,
            ImageResolution::Thumb1024 => self.thumb_1024_url,
            ImageResolution::Thumb2048 => self.thumb_2048_url,
        }
        .filter(|u| !u.is_empty())?;

        Some(ImageCandidate {
            id: self.id.into_string(),
            url,
            sequence_id: self
                .sequence
                .map(SequenceRef::into_id)
                .filter(|s| !s.is_empty()),
            captured_at: self.captured_at.unwrap_or_default(),
            camera_make: self.make.unwrap_or_default().trim().to_string(),
            camera_model: self.model.unwrap_or_default().trim().to_string(),
            camera_type: self.camera_type.unwrap_or_default(),
            width: self.width.unwrap_or_default(),
            height: self.height.unwrap_or_default(),
            is_pano: self.is_pano.unwrap_or_default(),
            signals: crate::candidate::Signals::default(),
        })
    }
}

/// Image ids of a feature, either a bare list or a `{ data: [{ id }] }` page.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum FeatureImages {
    Ids(Vec<CatalogId>),
    Page(DataEnvelope<IdRef>),
}

impl FeatureImages {
    pub fn into_ids(self) -> impl Iterator<Item = String> {
        let ids: Vec<CatalogId> = match self {
            Self::Ids(ids) => ids,
            Self::Page(page) => page.data.into_iter().map(|r| r.id).collect(),
        };
        ids.into_iter().map(CatalogId::into_string)
    }
}

#[derive(Deserialize, Debug)]
pub struct FeatureRecord {
    pub id: CatalogId,
    pub object_value: Option<String>,
    pub images: Option<FeatureImages>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_record_with_sequence_object() -> serde_json::Result<()> {
        let record: ImageRecord = serde_json::from_str(
            r#"{
                "id": "1234",
                "thumb_2048_url": "https://img/1234.jpg",
                "captured_at": 1700000000000,
                "make": " GoPro ",
                "model": "HERO9",
                "camera_type": "perspective",
                "is_pano": false,
                "width": 4000,
                "height": 3000,
                "sequence": { "id": "seq-a" }
            }"#,
        )?;
        let candidate = record
            .into_candidate(ImageResolution::Thumb2048)
            .expect("record has a 2048 url");
        assert_eq!(candidate.id, "1234");
        assert_eq!(candidate.sequence_id.as_deref(), Some("seq-a"));
        assert_eq!(candidate.camera_make, "GoPro");
        assert_eq!(candidate.captured_at, 1_700_000_000_000);
        assert_eq!((candidate.width, candidate.height), (4000, 3000));
        Ok(())
    }

    #[test]
    fn image_record_with_bare_sequence_and_missing_fields() -> serde_json::Result<()> {
        let record: ImageRecord = serde_json::from_str(
            r#"{ "id": 99, "thumb_1024_url": "https://img/99.jpg", "sequence": "seq-b" }"#,
        )?;
        let candidate = record
            .into_candidate(ImageResolution::Thumb1024)
            .expect("record has a 1024 url");
        assert_eq!(candidate.id, "99");
        assert_eq!(candidate.sequence_id.as_deref(), Some("seq-b"));
        assert_eq!(candidate.captured_at, 0);
        assert!(!candidate.is_pano);
        assert_eq!(candidate.camera_type, "");
        Ok(())
    }

    #[test]
    fn image_record_without_requested_resolution_is_dropped() -> serde_json::Result<()> {
        let record: ImageRecord = serde_json::from_str(
            r#"{ "id": "1", "thumb_256_url": "https://img/small.jpg" }"#,
        )?;
        assert!(record.into_candidate(ImageResolution::Thumb2048).is_none());
        Ok(())
    }

    #[test]
    fn feature_images_in_both_shapes() -> serde_json::Result<()> {
        let page: DataEnvelope<FeatureRecord> = serde_json::from_str(
            r#"{ "data": [
                { "id": "f1", "object_value": "regulatory--stop--g1", "images": ["a", "b"] },
                { "id": "f2", "object_value": "warning--curve--g1", "images": { "data": [{ "id": "c" }, { "id": 7 }] } },
                { "id": "f3", "object_value": "information--parking--g1" }
            ] }"#,
        )?;
        let ids: Vec<String> = page
            .data
            .into_iter()
            .filter_map(|f| f.images)
            .flat_map(FeatureImages::into_ids)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c", "7"]);
        Ok(())
    }

    #[test]
    fn envelope_without_data_is_empty() -> serde_json::Result<()> {
        let page: DataEnvelope<ImageRecord> = serde_json::from_str("{}")?;
        assert!(page.data.is_empty());
        Ok(())
    }
}
