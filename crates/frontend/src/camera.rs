use mural_shared::error::CameraError;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, MediaStream,
    MediaStreamConstraints, MediaStreamTrack,
};

/// Preview resolution requested from the device.
const IDEAL_WIDTH: f64 = 1280.0;
const IDEAL_HEIGHT: f64 = 720.0;

/// Which physical camera a stream uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacingMode {
    Environment,
    User,
}

impl FacingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            FacingMode::Environment => "environment",
            FacingMode::User => "user",
        }
    }

    /// The other camera, for the switch control.
    pub fn flipped(self) -> Self {
        match self {
            FacingMode::Environment => FacingMode::User,
            FacingMode::User => FacingMode::Environment,
        }
    }
}

/// Whether the platform exposes a camera at all. When false, the file
/// picker is the only capture strategy.
pub fn camera_supported() -> bool {
    web_sys::window()
        .map(|w| w.navigator().media_devices().is_ok())
        .unwrap_or(false)
}

fn video_constraints(facing: FacingMode) -> Result<JsValue, CameraError> {
    let set = |obj: &js_sys::Object, key: &str, value: &JsValue| {
        js_sys::Reflect::set(obj, &key.into(), value)
            .map(|_| ())
            .map_err(|_| CameraError::new("constraint object"))
    };
    let ideal = |value: f64| -> Result<JsValue, CameraError> {
        let obj = js_sys::Object::new();
        set(&obj, "ideal", &JsValue::from_f64(value))?;
        Ok(obj.into())
    };

    let video = js_sys::Object::new();
    set(&video, "facingMode", &facing.as_str().into())?;
    set(&video, "width", &ideal(IDEAL_WIDTH)?)?;
    set(&video, "height", &ideal(IDEAL_HEIGHT)?)?;
    Ok(video.into())
}

/// Open a camera stream for the given facing mode. The caller owns the
/// stream and must release it with `stop_stream`.
pub async fn open_stream(facing: FacingMode) -> Result<MediaStream, CameraError> {
    let devices = web_sys::window()
        .ok_or_else(|| CameraError::new("no window"))?
        .navigator()
        .media_devices()
        .map_err(|_| CameraError::new("mediaDevices unavailable"))?;

    let constraints = MediaStreamConstraints::new();
    constraints.set_video(&video_constraints(facing)?);

    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|e| CameraError::new(format!("{e:?}")))?;
    let stream = JsFuture::from(promise)
        .await
        .map_err(|e| CameraError::new(format!("{e:?}")))?;
    stream
        .dyn_into::<MediaStream>()
        .map_err(|_| CameraError::new("unexpected stream type"))
}

/// Stop every track, releasing the hardware handle. Must run before a new
/// facing mode is requested — only one stream may be open at a time.
pub fn stop_stream(stream: &MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
            track.stop();
        }
    }
}

/// Freeze the current preview frame into JPEG bytes.
pub async fn capture_frame(
    video: &HtmlVideoElement,
    canvas: &HtmlCanvasElement,
) -> Result<Vec<u8>, CameraError> {
    canvas.set_width(video.video_width());
    canvas.set_height(video.video_height());

    let ctx = canvas
        .get_context("2d")
        .map_err(|_| CameraError::new("2d context"))?
        .ok_or_else(|| CameraError::new("2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| CameraError::new("2d context"))?;
    ctx.draw_image_with_html_video_element(video, 0.0, 0.0)
        .map_err(|_| CameraError::new("draw frame"))?;

    let blob = canvas_to_jpeg(canvas).await?;
    blob_bytes(&blob).await
}

async fn canvas_to_jpeg(canvas: &HtmlCanvasElement) -> Result<Blob, CameraError> {
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let callback = Closure::once_into_js(move |blob: JsValue| {
            let _ = resolve.call1(&JsValue::NULL, &blob);
        });
        if canvas
            .to_blob_with_type(callback.unchecked_ref(), "image/jpeg")
            .is_err()
        {
            let _ = reject.call0(&JsValue::NULL);
        }
    });

    let value = JsFuture::from(promise)
        .await
        .map_err(|e| CameraError::new(format!("{e:?}")))?;
    // to_blob hands the callback null when encoding fails
    value
        .dyn_into::<Blob>()
        .map_err(|_| CameraError::new("encode frame"))
}

/// Read a blob (camera frame or picked file) into memory.
pub async fn blob_bytes(blob: &Blob) -> Result<Vec<u8>, CameraError> {
    let buffer = JsFuture::from(blob.array_buffer())
        .await
        .map_err(|e| CameraError::new(format!("{e:?}")))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_mode_strings() {
        assert_eq!(FacingMode::Environment.as_str(), "environment");
        assert_eq!(FacingMode::User.as_str(), "user");
    }

    #[test]
    fn test_facing_mode_flip_is_involution() {
        assert_eq!(FacingMode::Environment.flipped(), FacingMode::User);
        assert_eq!(FacingMode::User.flipped(), FacingMode::Environment);
        assert_eq!(FacingMode::Environment.flipped().flipped(), FacingMode::Environment);
    }
}
