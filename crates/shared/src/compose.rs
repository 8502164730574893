use chrono::{DateTime, Utc};

/// A captured-but-not-yet-posted image. Replaced when a newer capture
/// arrives, cleared on successful post.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCapture {
    pub image: Vec<u8>,
    pub captured_at: DateTime<Utc>,
}

impl PendingCapture {
    pub fn new(image: Vec<u8>) -> Self {
        PendingCapture {
            image,
            captured_at: Utc::now(),
        }
    }
}

/// One geolocation sample. Later acquisitions overwrite earlier ones;
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoFix {
    pub latitude: f64,
    pub longitude: f64,
    pub obtained_at: DateTime<Utc>,
}

impl GeoFix {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        GeoFix {
            latitude,
            longitude,
            obtained_at: Utc::now(),
        }
    }

    /// Six-decimal rendering used by the location status line.
    pub fn display(&self) -> String {
        format!("{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// The post trigger is enabled iff both halves are present. Single source
/// of truth for every front-end.
pub fn can_post(capture: Option<&PendingCapture>, fix: Option<&GeoFix>) -> bool {
    capture.is_some() && fix.is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_post_requires_both() {
        let capture = PendingCapture::new(vec![0xff, 0xd8]);
        let fix = GeoFix::new(-23.5505, -46.6333);

        assert!(!can_post(None, None));
        assert!(!can_post(Some(&capture), None));
        assert!(!can_post(None, Some(&fix)));
        assert!(can_post(Some(&capture), Some(&fix)));
    }

    #[test]
    fn test_fix_display_has_six_decimals() {
        let fix = GeoFix::new(-23.5505, -46.6333);
        assert_eq!(fix.display(), "-23.550500, -46.633300");
    }

    #[test]
    fn test_pending_capture_keeps_bytes() {
        let capture = PendingCapture::new(vec![1, 2, 3]);
        assert_eq!(capture.image, vec![1, 2, 3]);
    }
}
