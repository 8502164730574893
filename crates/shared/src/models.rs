use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One photo in the remote feed. The server owns these records; clients
/// only decode and render them. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub id: u64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl PhotoRecord {
    /// Both coordinates, when the record is geotagged. Map rendering uses
    /// this; the list rendering deliberately does not filter on it.
    pub fn position(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }

    fn created_at_parsed(&self) -> Option<DateTime<FixedOffset>> {
        let raw = self.created_at.as_deref()?;
        DateTime::parse_from_rfc3339(raw).ok()
    }

    /// `created_at` as a pt-BR date ("01/01/2024"), if present and parseable.
    pub fn created_date_pt(&self) -> Option<String> {
        self.created_at_parsed()
            .map(|dt| dt.format("%d/%m/%Y").to_string())
    }

    /// `created_at` as a wall-clock time ("14:30:00").
    pub fn created_time_pt(&self) -> Option<String> {
        self.created_at_parsed()
            .map(|dt| dt.format("%H:%M:%S").to_string())
    }

    /// Date and time together, used by the marker popup.
    pub fn created_at_pt(&self) -> Option<String> {
        self.created_at_parsed()
            .map(|dt| dt.format("%d/%m/%Y %H:%M").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_record_deserializes() {
        let json = r#"{"id":1,"image_url":"http://x/a.jpg","latitude":-23.5,"longitude":-46.6,"created_at":"2024-01-01T00:00:00Z"}"#;
        let photo: PhotoRecord = serde_json::from_str(json).unwrap();
        assert_eq!(photo.id, 1);
        assert_eq!(photo.image_url.as_deref(), Some("http://x/a.jpg"));
        assert_eq!(photo.position(), Some((-23.5, -46.6)));
    }

    #[test]
    fn test_record_with_null_coordinates_has_no_position() {
        let json = r#"{"id":2,"latitude":null,"longitude":null}"#;
        let photo: PhotoRecord = serde_json::from_str(json).unwrap();
        assert_eq!(photo.position(), None);
        assert!(photo.image_url.is_none());
    }

    #[test]
    fn test_record_with_one_coordinate_has_no_position() {
        let json = r#"{"id":3,"latitude":-23.5}"#;
        let photo: PhotoRecord = serde_json::from_str(json).unwrap();
        assert_eq!(photo.position(), None);
    }

    #[test]
    fn test_record_with_missing_fields_deserializes() {
        // Old records omit fields instead of sending null
        let json = r#"{"id":4}"#;
        let photo: PhotoRecord = serde_json::from_str(json).unwrap();
        assert_eq!(photo.id, 4);
        assert!(photo.created_at.is_none());
    }

    #[test]
    fn test_created_date_pt() {
        let photo = PhotoRecord {
            id: 1,
            image_url: None,
            latitude: None,
            longitude: None,
            created_at: Some("2024-01-01T00:00:00Z".to_string()),
        };
        assert_eq!(photo.created_date_pt().as_deref(), Some("01/01/2024"));
        assert_eq!(photo.created_time_pt().as_deref(), Some("00:00:00"));
        assert_eq!(photo.created_at_pt().as_deref(), Some("01/01/2024 00:00"));
    }

    #[test]
    fn test_created_date_pt_with_offset() {
        let photo = PhotoRecord {
            id: 1,
            image_url: None,
            latitude: None,
            longitude: None,
            created_at: Some("2024-06-15T18:45:30-03:00".to_string()),
        };
        assert_eq!(photo.created_date_pt().as_deref(), Some("15/06/2024"));
        assert_eq!(photo.created_time_pt().as_deref(), Some("18:45:30"));
    }

    #[test]
    fn test_unparseable_date_formats_as_none() {
        let photo = PhotoRecord {
            id: 1,
            image_url: None,
            latitude: None,
            longitude: None,
            created_at: Some("ontem".to_string()),
        };
        assert!(photo.created_date_pt().is_none());
        assert!(photo.created_at_pt().is_none());
    }

    #[test]
    fn test_feed_array_deserializes() {
        let json = r#"[{"id":1,"latitude":-23.5,"longitude":-46.6},{"id":2,"latitude":null,"longitude":null}]"#;
        let photos: Vec<PhotoRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(photos.len(), 2);
        assert!(photos[0].position().is_some());
        assert!(photos[1].position().is_none());
    }
}
