use dioxus::prelude::*;
use mural_shared::compose::{can_post, GeoFix, PendingCapture};
use wasm_bindgen::JsCast;

use crate::camera::{self, FacingMode};
use crate::components::status_banner::{Status, StatusBanner};
use crate::geoloc;

const VIDEO_ID: &str = "camera-preview";
const CANVAS_ID: &str = "capture-canvas";
const FILE_INPUT_ID: &str = "photo-file-input";

// ---------------------------------------------------------------------------
// DOM helpers
// ---------------------------------------------------------------------------

fn element_by_id<T: JsCast>(id: &str) -> Option<T> {
    web_sys::window()?
        .document()?
        .get_element_by_id(id)?
        .dyn_into::<T>()
        .ok()
}

fn video_element() -> Option<web_sys::HtmlVideoElement> {
    element_by_id(VIDEO_ID)
}

fn canvas_element() -> Option<web_sys::HtmlCanvasElement> {
    element_by_id(CANVAS_ID)
}

fn file_input_element() -> Option<web_sys::HtmlInputElement> {
    element_by_id(FILE_INPUT_ID)
}

fn bytes_to_object_url(bytes: &[u8]) -> Option<String> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("image/jpeg");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).ok()?;
    web_sys::Url::create_object_url_with_blob(&blob).ok()
}

// ---------------------------------------------------------------------------
// Capture plumbing
// ---------------------------------------------------------------------------

/// Install a fresh capture: a new selection always replaces the previous
/// one, and its preview URL is revoked before being dropped.
fn apply_capture(
    mut pending_capture: Signal<Option<PendingCapture>>,
    mut preview_url: Signal<Option<String>>,
    bytes: Vec<u8>,
) {
    if let Some(old) = preview_url.write().take() {
        let _ = web_sys::Url::revoke_object_url(&old);
    }
    if let Some(url) = bytes_to_object_url(&bytes) {
        preview_url.set(Some(url));
    }
    pending_capture.set(Some(PendingCapture::new(bytes)));
}

/// Open the camera for `facing`. The hardware stream is exclusive, so any
/// previous stream is released first. Failure is non-fatal: the file
/// picker stays available.
async fn start_camera(
    mut stream: Signal<Option<web_sys::MediaStream>>,
    mut status: Signal<Option<Status>>,
    facing: FacingMode,
) {
    if let Some(old) = stream.write().take() {
        camera::stop_stream(&old);
    }
    match camera::open_stream(facing).await {
        Ok(new_stream) => {
            if let Some(video) = video_element() {
                video.set_src_object(Some(&new_stream));
                let _ = video.play();
            }
            stream.set(Some(new_stream));
        }
        Err(err) => {
            web_sys::console::error_1(&format!("câmera: {}", err.detail).into());
            status.set(Some(Status::error(err.to_string())));
        }
    }
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

/// The posting pane: capture a photo (camera or file picker), acquire a
/// fix, and submit when both are held. Mounting starts the camera;
/// unmounting always releases it.
#[component]
pub fn CapturePanel(
    pending_capture: Signal<Option<PendingCapture>>,
    geo_fix: Signal<Option<GeoFix>>,
    status: Signal<Option<Status>>,
    on_post: EventHandler<()>,
) -> Element {
    let camera_available = camera::camera_supported();
    let stream = use_signal(|| None::<web_sys::MediaStream>);
    let mut facing = use_signal(|| FacingMode::Environment);
    let preview_url = use_signal(|| None::<String>);
    let mut location_info = use_signal(|| None::<String>);

    // Live preview starts as soon as the pane mounts
    use_effect(move || {
        if camera_available {
            spawn(async move {
                start_camera(stream, status, FacingMode::Environment).await;
            });
        }
    });

    // Release the hardware handle when the pane goes away
    use_drop(move || {
        if let Some(s) = &*stream.peek() {
            camera::stop_stream(s);
        }
    });

    // A cleared capture (successful post) also resets the picker and preview
    use_effect(move || {
        if pending_capture.read().is_none() {
            if let Some(input) = file_input_element() {
                input.set_value("");
            }
            let mut preview_url = preview_url;
            let old = preview_url.write().take();
            if let Some(old) = old {
                let _ = web_sys::Url::revoke_object_url(&old);
            }
        }
    });

    let post_enabled = can_post(pending_capture.read().as_ref(), geo_fix.read().as_ref());
    let has_capture = pending_capture.read().is_some();
    let camera_label = if camera_available {
        "Tirar foto com a câmera:"
    } else {
        "Tirar foto com a câmera (não suportado neste navegador):"
    };

    rsx! {
        div { class: "capture-panel",
            div { class: "panel",
                h3 { "Foto" }
                label { r#for: VIDEO_ID, "{camera_label}" }
                video {
                    id: VIDEO_ID,
                    class: "camera-preview",
                    autoplay: true,
                    muted: true,
                    playsinline: true,
                }
                canvas { id: CANVAS_ID, style: "display: none;" }
                div { class: "camera-controls",
                    button {
                        disabled: !camera_available,
                        onclick: move |_| {
                            if stream.read().is_none() {
                                return;
                            }
                            spawn(async move {
                                let (Some(video), Some(canvas)) = (video_element(), canvas_element()) else {
                                    return;
                                };
                                match camera::capture_frame(&video, &canvas).await {
                                    Ok(bytes) => apply_capture(pending_capture, preview_url, bytes),
                                    Err(err) => {
                                        web_sys::console::error_1(&format!("câmera: {}", err.detail).into());
                                        status.set(Some(Status::error(err.to_string())));
                                    }
                                }
                            });
                        },
                        "Capturar"
                    }
                    button {
                        class: "secondary",
                        disabled: !camera_available,
                        onclick: move |_| {
                            let next = facing.peek().flipped();
                            facing.set(next);
                            spawn(async move {
                                start_camera(stream, status, next).await;
                            });
                        },
                        "Alternar câmera"
                    }
                }

                label { r#for: FILE_INPUT_ID, "Ou escolha um arquivo:" }
                input {
                    id: FILE_INPUT_ID,
                    r#type: "file",
                    accept: "image/*",
                    onchange: move |_| {
                        spawn(async move {
                            let Some(input) = file_input_element() else { return };
                            let Some(file) = input.files().and_then(|list| list.get(0)) else {
                                return;
                            };
                            match camera::blob_bytes(&file).await {
                                Ok(bytes) => apply_capture(pending_capture, preview_url, bytes),
                                Err(err) => {
                                    web_sys::console::error_1(&format!("arquivo: {}", err.detail).into());
                                    status.set(Some(Status::error("Erro ao ler o arquivo selecionado.")));
                                }
                            }
                        });
                    },
                }

                if has_capture {
                    if let Some(url) = &*preview_url.read() {
                        img { class: "capture-preview", src: "{url}", alt: "Pré-visualização" }
                    }
                }
            }

            div { class: "panel",
                h3 { "Localização" }
                button {
                    onclick: move |_| {
                        status.set(Some(Status::info("Obtendo localização...")));
                        spawn(async move {
                            match geoloc::acquire_fix().await {
                                Ok(fix) => {
                                    location_info.set(Some(format!("Localização obtida: {}", fix.display())));
                                    geo_fix.set(Some(fix));
                                    status.set(Some(Status::info("Localização obtida com sucesso!")));
                                }
                                Err(err) => {
                                    // The fix stays as it was — failure never clears state
                                    web_sys::console::error_1(&format!("geolocalização: {err}").into());
                                    location_info.set(Some(err.to_string()));
                                    status.set(Some(Status::error(err.to_string())));
                                }
                            }
                        });
                    },
                    "Obter localização"
                }
                if let Some(info) = &*location_info.read() {
                    p { class: "location-info", "{info}" }
                }
            }

            StatusBanner { status }

            button {
                class: "primary post-button",
                disabled: !post_enabled,
                onclick: move |_| on_post.call(()),
                "Postar"
            }
        }
    }
}
