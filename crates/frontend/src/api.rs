use mural_shared::compose::GeoFix;
use mural_shared::error::{FeedError, UploadError};
use mural_shared::models::PhotoRecord;

/// Production photo service. Deployments can point the bundle elsewhere
/// by defining `window.MURAL_API_BASE` before the script loads.
const DEFAULT_API_BASE: &str = "https://api-mural.onrender.com";
const OVERRIDE_GLOBAL: &str = "MURAL_API_BASE";

fn api_base() -> String {
    let Some(window) = web_sys::window() else {
        return DEFAULT_API_BASE.to_string();
    };
    js_sys::Reflect::get(&window, &OVERRIDE_GLOBAL.into())
        .ok()
        .and_then(|value| value.as_string())
        .filter(|base| !base.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

/// Build the feed-listing URL.
pub fn photos_url(base: &str) -> String {
    format!("{}/photos", base.trim_end_matches('/'))
}

/// Build the upload URL.
pub fn photo_post_url(base: &str) -> String {
    format!("{}/photo", base.trim_end_matches('/'))
}

/// Coordinates travel as plain decimal strings in the multipart body.
pub fn coord_field(value: f64) -> String {
    value.to_string()
}

/// Fetch the whole feed. No client-side timeout and no retry — a retry is
/// always an explicit user action.
pub async fn fetch_photos() -> Result<Vec<PhotoRecord>, FeedError> {
    let resp = reqwest::Client::new()
        .get(photos_url(&api_base()))
        .send()
        .await
        .map_err(|e| FeedError::Network(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FeedError::Http {
            status: status.as_u16(),
        });
    }

    resp.json::<Vec<PhotoRecord>>()
        .await
        .map_err(|e| FeedError::Decode(e.to_string()))
}

fn upload_form(image: Vec<u8>, fix: &GeoFix) -> Result<reqwest::multipart::Form, UploadError> {
    let part = reqwest::multipart::Part::bytes(image)
        .file_name("foto.jpg")
        .mime_str("image/jpeg")
        .map_err(|e| UploadError::Network(e.to_string()))?;

    Ok(reqwest::multipart::Form::new()
        .part("image", part)
        .text("latitude", coord_field(fix.latitude))
        .text("longitude", coord_field(fix.longitude)))
}

/// Post one capture with its fix. The caller clears the pending capture
/// on success and leaves all state untouched on failure.
pub async fn post_photo(image: Vec<u8>, fix: &GeoFix) -> Result<(), UploadError> {
    let form = upload_form(image, fix)?;

    let resp = reqwest::Client::new()
        .post(photo_post_url(&api_base()))
        .multipart(form)
        .send()
        .await
        .map_err(|e| UploadError::Network(e.to_string()))?;

    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(UploadError::Http {
            status: status.as_u16(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_photos_url() {
        assert_eq!(
            photos_url("https://api-mural.onrender.com"),
            "https://api-mural.onrender.com/photos"
        );
    }

    #[test]
    fn test_photo_post_url() {
        assert_eq!(
            photo_post_url("https://api-mural.onrender.com"),
            "https://api-mural.onrender.com/photo"
        );
    }

    #[test]
    fn test_urls_tolerate_trailing_slash() {
        assert_eq!(photos_url("http://localhost:8080/"), "http://localhost:8080/photos");
        assert_eq!(photo_post_url("http://localhost:8080/"), "http://localhost:8080/photo");
    }

    #[test]
    fn test_coord_field_is_plain_decimal() {
        assert_eq!(coord_field(-23.5505), "-23.5505");
        assert_eq!(coord_field(0.0), "0");
        assert_eq!(coord_field(-46.6333), "-46.6333");
    }

    #[test]
    fn test_upload_form_builds() {
        let fix = GeoFix::new(-23.5505, -46.6333);
        assert!(upload_form(vec![0xff, 0xd8, 0xff], &fix).is_ok());
    }

    #[test]
    fn test_feed_response_decodes() {
        // The exact shape the service returns from GET /photos
        let json = r#"[{"id":1,"image_url":"http://x/a.jpg","latitude":-23.5,"longitude":-46.6,"created_at":"2024-01-01T00:00:00Z"}]"#;
        let photos: Vec<PhotoRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(photos.len(), 1);
        assert_eq!(photos[0].id, 1);
        assert_eq!(photos[0].position(), Some((-23.5, -46.6)));
        assert_eq!(photos[0].created_date_pt().as_deref(), Some("01/01/2024"));
    }
}
