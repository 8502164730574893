use mural_shared::compose::GeoFix;
use mural_shared::error::GeoError;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Position, PositionError, PositionOptions};

/// Single-shot request bounds: 10 s wait, and the platform may hand back
/// a cached fix up to 60 s old without re-sampling hardware.
const TIMEOUT_MS: u32 = 10_000;
const MAX_AGE_MS: u32 = 60_000;

fn geolocation() -> Option<web_sys::Geolocation> {
    web_sys::window()?.navigator().geolocation().ok()
}

/// Request one geolocation fix. Browsers without the API map to
/// `Unavailable`, like hardware that cannot produce a position.
pub async fn acquire_fix() -> Result<GeoFix, GeoError> {
    let Some(geo) = geolocation() else {
        return Err(GeoError::Unavailable);
    };

    let options = PositionOptions::new();
    options.set_enable_high_accuracy(true);
    options.set_timeout(TIMEOUT_MS);
    options.set_maximum_age(MAX_AGE_MS);

    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let reject_on_error = reject.clone();
        let success = Closure::once_into_js(move |pos: JsValue| {
            let _ = resolve.call1(&JsValue::NULL, &pos);
        });
        let failure = Closure::once_into_js(move |err: JsValue| {
            let _ = reject.call1(&JsValue::NULL, &err);
        });
        if geo
            .get_current_position_with_error_callback_and_options(
                success.unchecked_ref(),
                Some(failure.unchecked_ref()),
                &options,
            )
            .is_err()
        {
            let _ = reject_on_error.call0(&JsValue::NULL);
        }
    });

    match JsFuture::from(promise).await {
        Ok(value) => {
            let pos: Position = value.dyn_into().map_err(|_| GeoError::Unknown)?;
            let coords = pos.coords();
            Ok(GeoFix::new(coords.latitude(), coords.longitude()))
        }
        Err(err) => Err(position_error(&err)),
    }
}

/// Map the platform error object onto the four failure kinds.
fn position_error(err: &JsValue) -> GeoError {
    match err.dyn_ref::<PositionError>() {
        Some(e) => GeoError::from_code(e.code()),
        None => GeoError::Unknown,
    }
}
