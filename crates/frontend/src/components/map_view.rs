use dioxus::html::geometry::WheelDelta;
use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;
use mural_shared::models::PhotoRecord;
use mural_shared::worldmap::{self, Cluster};

use crate::coords;

const MAP_CONTAINER_ID: &str = "mural-map-container";

/// Drag threshold in pixels — movement below this is treated as a click.
const DRAG_THRESHOLD: f64 = 3.0;

/// Touch drag threshold — larger than mouse because touch is less precise.
const TOUCH_DRAG_THRESHOLD: f64 = 8.0;

const ZOOM_MIN: f64 = 1.0;
const ZOOM_MAX: f64 = 12.0;
const ZOOM_STEP: f64 = 1.1;

/// Zoom used when centering on a fix; clusters expand by doubling.
const FOCUS_ZOOM: f64 = 5.0;
const CLUSTER_ZOOM_FACTOR: f64 = 2.0;

/// Tap hit radius in native map pixels (before zoom).
const SELECT_THRESHOLD: f64 = 48.0;

/// Reference container width (desktop panel) used to normalize marker sizes.
const REFERENCE_WIDTH: f64 = 960.0;

const OCEAN_FILL: &str = "#10263f";
const GRATICULE_STROKE: &str = "rgba(255,255,255,0.12)";
const AXIS_STROKE: &str = "rgba(255,255,255,0.28)";
const PIN_FILL: &str = "#c43030";
const CLUSTER_FILL: &str = "#2f6db5";

// ---------------------------------------------------------------------------
// DOM helpers
// ---------------------------------------------------------------------------

/// Get the bounding client rect of the map container element.
fn container_rect() -> Option<web_sys::DomRect> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(MAP_CONTAINER_ID)?;
    Some(element.get_bounding_client_rect())
}

// ---------------------------------------------------------------------------
// Zoom / pan math (pure functions, easily testable)
// ---------------------------------------------------------------------------

/// Compute new pan offsets so that `cursor` stays over the same content
/// point when zooming from `old_zoom` to `new_zoom`.
fn zoom_pan_at_cursor(
    cursor_x: f64,
    cursor_y: f64,
    old_zoom: f64,
    new_zoom: f64,
    old_pan_x: f64,
    old_pan_y: f64,
) -> (f64, f64) {
    let content_x = (cursor_x - old_pan_x) / old_zoom;
    let content_y = (cursor_y - old_pan_y) / old_zoom;
    (
        cursor_x - content_x * new_zoom,
        cursor_y - content_y * new_zoom,
    )
}

/// Clamp pan values so the map can't be dragged off-screen.
///
/// The map renders at `width: 100%` of the container with a fixed 2:1
/// aspect ratio, so its rendered height may differ from the container's.
fn clamp_pan(pan_x: f64, pan_y: f64, zoom: f64, container_w: f64, container_h: f64) -> (f64, f64) {
    let content_w = container_w * zoom;
    let content_h = container_w * (worldmap::MAP_HEIGHT_PX / worldmap::MAP_WIDTH_PX) * zoom;
    let min_pan_x = -(content_w - container_w).max(0.0);
    let min_pan_y = -(content_h - container_h).max(0.0);
    (pan_x.clamp(min_pan_x, 0.0), pan_y.clamp(min_pan_y, 0.0))
}

/// Apply `clamp_pan` using the live container dimensions.
fn clamp_pan_to_container(pan_x: f64, pan_y: f64, zoom: f64) -> (f64, f64) {
    match container_rect() {
        Some(rect) => clamp_pan(pan_x, pan_y, zoom, rect.width(), rect.height()),
        None => (pan_x, pan_y),
    }
}

/// Convert a wheel delta (pixels / lines / pages) to a uniform pixel-like value.
fn wheel_delta_y(delta: WheelDelta) -> f64 {
    match delta {
        WheelDelta::Pixels(d) => d.y,
        WheelDelta::Lines(d) => d.y * 40.0,
        WheelDelta::Pages(d) => d.y * 400.0,
    }
}

/// Distance between two client-coordinate points.
fn point_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

// ---------------------------------------------------------------------------
// Marker derivation and hit-testing
// ---------------------------------------------------------------------------

/// Project the geotagged subset of the feed into marker positions.
/// Records missing either coordinate are silently excluded here — the
/// list rendering has no such filter.
fn pin_positions(photos: &[PhotoRecord]) -> (Vec<u64>, Vec<(f64, f64)>) {
    let mut ids = Vec::new();
    let mut positions = Vec::new();
    for photo in photos {
        if let Some((lat, lon)) = photo.position() {
            ids.push(photo.id);
            positions.push(worldmap::latlon_to_px(lat, lon));
        }
    }
    (ids, positions)
}

/// Find the index of the nearest cluster within `threshold`.
fn find_nearest_cluster(clusters: &[Cluster], click: (f64, f64), threshold: f64) -> Option<usize> {
    let mut best_idx = None;
    let mut best_dist = threshold;
    for (i, cluster) in clusters.iter().enumerate() {
        let dist = point_distance((cluster.x, cluster.y), click);
        if dist < best_dist {
            best_dist = dist;
            best_idx = Some(i);
        }
    }
    best_idx
}

// ---------------------------------------------------------------------------
// SVG builder
// ---------------------------------------------------------------------------

/// Build the full SVG content as a string for reliable rendering.
/// Marker positions are in native map pixel space (2048x1024).
fn build_svg_content(
    clusters: &[Cluster],
    ids: &[u64],
    selected_id: Option<u64>,
    zoom: f64,
    container_width: f64,
) -> String {
    let mut svg = String::with_capacity(8192);

    // Scale factor: keeps markers and strokes a consistent physical size
    // on screen regardless of container width and zoom.
    let mobile_boost = (REFERENCE_WIDTH / container_width).max(1.0);
    let s = mobile_boost / zoom.min(5.0);

    build_backdrop(&mut svg, mobile_boost);
    build_markers(&mut svg, clusters, ids, selected_id, s);

    svg
}

/// Ocean backdrop with a graticule every 30 degrees. The equator and the
/// prime meridian get a stronger stroke.
fn build_backdrop(svg: &mut String, mb: f64) {
    svg.push_str(&format!(
        r#"<rect x="0" y="0" width="{}" height="{}" fill="{OCEAN_FILL}"/>"#,
        worldmap::MAP_WIDTH_PX,
        worldmap::MAP_HEIGHT_PX
    ));

    let sw = 1.0 * mb;
    let axis_sw = 1.6 * mb;
    for step in 0..=12 {
        let lon = -180.0 + step as f64 * 30.0;
        let (x, _) = worldmap::latlon_to_px(0.0, lon);
        let stroke = if lon == 0.0 { AXIS_STROKE } else { GRATICULE_STROKE };
        let width = if lon == 0.0 { axis_sw } else { sw };
        svg.push_str(&format!(
            r#"<line x1="{x}" y1="0" x2="{x}" y2="{}" stroke="{stroke}" stroke-width="{width}"/>"#,
            worldmap::MAP_HEIGHT_PX
        ));
    }
    for step in 0..=6 {
        let lat = 90.0 - step as f64 * 30.0;
        let (_, y) = worldmap::latlon_to_px(lat, 0.0);
        let stroke = if lat == 0.0 { AXIS_STROKE } else { GRATICULE_STROKE };
        let width = if lat == 0.0 { axis_sw } else { sw };
        svg.push_str(&format!(
            r#"<line x1="0" y1="{y}" x2="{}" y2="{y}" stroke="{stroke}" stroke-width="{width}"/>"#,
            worldmap::MAP_WIDTH_PX
        ));
    }
}

fn build_markers(
    svg: &mut String,
    clusters: &[Cluster],
    ids: &[u64],
    selected_id: Option<u64>,
    s: f64,
) {
    for cluster in clusters {
        if cluster.is_single() {
            let id = ids[cluster.indices[0]];
            build_pin(svg, cluster.x, cluster.y, s, selected_id == Some(id));
        } else {
            build_cluster_badge(svg, cluster.x, cluster.y, cluster.count(), s);
        }
    }
}

fn build_pin(svg: &mut String, x: f64, y: f64, s: f64, selected: bool) {
    let r = 10.0 * s;
    let sw = 3.0 * s;
    svg.push_str(&format!(
        r##"<circle cx="{x}" cy="{y}" r="{r}" fill="{PIN_FILL}" stroke="white" stroke-width="{sw}"/>"##
    ));
    if selected {
        build_selection_ring(svg, x, y, s);
    }
}

fn build_cluster_badge(svg: &mut String, x: f64, y: f64, count: usize, s: f64) {
    let r = 16.0 * s;
    let sw = 3.0 * s;
    let fs = 15.0 * s;
    svg.push_str(&format!(
        r##"<g role="img"><title>{count} fotos</title><circle cx="{x}" cy="{y}" r="{r}" fill="{CLUSTER_FILL}" stroke="white" stroke-width="{sw}"/>"##
    ));
    svg.push_str(&format!(
        r##"<text x="{x}" y="{y}" fill="white" font-size="{fs}" font-family="sans-serif" font-weight="700" text-anchor="middle" dominant-baseline="central">{count}</text></g>"##
    ));
}

/// Emit an animated dashed selection ring around a pin.
fn build_selection_ring(svg: &mut String, cx: f64, cy: f64, s: f64) {
    let r = 20.0 * s;
    let sw = 3.0 * s;
    let da1 = 6.0 * s;
    let da2 = 4.0 * s;
    svg.push_str(&format!(
        r##"<circle cx="{cx}" cy="{cy}" r="{r}" fill="none" stroke="white" stroke-width="{sw}" stroke-dasharray="{da1} {da2}" opacity="0.9"><animate attributeName="opacity" values="0.5;1;0.5" dur="1.2s" repeatCount="indefinite"/></circle>"##
    ));
}

// ---------------------------------------------------------------------------
// Tap handling (shared by mouse and touch)
// ---------------------------------------------------------------------------

/// A tap selects the nearest pin, zooms into the nearest cluster, or
/// clears the selection when it hits open water.
fn handle_tap(
    map_x: f64,
    map_y: f64,
    ids: &[u64],
    positions: &[(f64, f64)],
    mut selected: Signal<Option<u64>>,
    mut zoom: Signal<f64>,
    mut pan_x: Signal<f64>,
    mut pan_y: Signal<f64>,
) {
    let cur_zoom = *zoom.peek();
    let threshold = SELECT_THRESHOLD / cur_zoom.min(5.0);
    let clusters = worldmap::cluster_markers(positions, cur_zoom);

    match find_nearest_cluster(&clusters, (map_x, map_y), threshold) {
        Some(ci) if clusters[ci].is_single() => {
            selected.set(Some(ids[clusters[ci].indices[0]]));
        }
        Some(ci) => {
            // Zoom toward the cluster so it breaks apart
            let cluster = &clusters[ci];
            let new_zoom = (cur_zoom * CLUSTER_ZOOM_FACTOR).clamp(ZOOM_MIN, ZOOM_MAX);
            if let Some(rect) = container_rect() {
                let (px, py) =
                    coords::center_pan(cluster.x, cluster.y, new_zoom, rect.width(), rect.height());
                let (px, py) = clamp_pan(px, py, new_zoom, rect.width(), rect.height());
                zoom.set(new_zoom);
                pan_x.set(px);
                pan_y.set(py);
            }
        }
        None => selected.set(None),
    }
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

#[component]
pub fn MapView(
    photos: Vec<PhotoRecord>,
    selected: Signal<Option<u64>>,
    center_target: Signal<Option<(f64, f64)>>,
    resize_counter: ReadSignal<u64>,
) -> Element {
    let (ids, positions) = pin_positions(&photos);

    // Zoom / pan state
    let mut zoom = use_signal(|| 1.0_f64);
    let mut pan_x = use_signal(|| 0.0_f64);
    let mut pan_y = use_signal(|| 0.0_f64);

    // Layout fixup: re-clamp pan against the live container whenever the
    // parent bumps the counter (pane switches, post-reload).
    use_effect(move || {
        let _counter = *resize_counter.read();
        let (px, py) = clamp_pan_to_container(*pan_x.peek(), *pan_y.peek(), *zoom.peek());
        pan_x.set(px);
        pan_y.set(py);
    });

    // Center request from the "my location" control.
    use_effect(move || {
        let Some((lat, lon)) = *center_target.read() else {
            return;
        };
        let (map_x, map_y) = worldmap::latlon_to_px(lat, lon);
        let new_zoom = zoom.peek().max(FOCUS_ZOOM);
        if let Some(rect) = container_rect() {
            let (px, py) = coords::center_pan(map_x, map_y, new_zoom, rect.width(), rect.height());
            let (px, py) = clamp_pan(px, py, new_zoom, rect.width(), rect.height());
            zoom.set(new_zoom);
            pan_x.set(px);
            pan_y.set(py);
        }
    });

    // Drag state (mouse)
    let mut is_dragging = use_signal(|| false);
    let mut did_drag = use_signal(|| false);
    let mut drag_start_x = use_signal(|| 0.0_f64);
    let mut drag_start_y = use_signal(|| 0.0_f64);
    let mut drag_start_pan_x = use_signal(|| 0.0_f64);
    let mut drag_start_pan_y = use_signal(|| 0.0_f64);

    // Touch state
    let mut touch_start_pos = use_signal(|| None::<(f64, f64)>);
    let mut touch_did_pan = use_signal(|| false);
    let mut touch_start_pan_x = use_signal(|| 0.0_f64);
    let mut touch_start_pan_y = use_signal(|| 0.0_f64);

    // Rebuild the SVG from the current feed every render — marker sets are
    // small and a reload must replace all pins wholesale.
    let svg_html = {
        let cur_zoom = *zoom.read();
        let cur_selected = *selected.read();
        let clusters = worldmap::cluster_markers(&positions, cur_zoom);
        let cw = container_rect().map(|r| r.width()).unwrap_or(REFERENCE_WIDTH);

        let svg_content = build_svg_content(&clusters, &ids, cur_selected, cur_zoom, cw);
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" preserveAspectRatio="none" style="position:absolute;top:0;left:0;width:100%;height:100%;">{}</svg>"#,
            worldmap::MAP_WIDTH_PX,
            worldmap::MAP_HEIGHT_PX,
            svg_content
        )
    };

    let cur_pan_x = *pan_x.read();
    let cur_pan_y = *pan_y.read();
    let cur_zoom = *zoom.read();
    let dragging = *is_dragging.read();

    let transform_style = format!(
        "transform: translate({cur_pan_x}px, {cur_pan_y}px) scale({cur_zoom}); transform-origin: 0 0;"
    );
    let container_class = if dragging {
        "map-container dragging"
    } else {
        "map-container"
    };

    let selected_photo = (*selected.read())
        .and_then(|id| photos.iter().find(|p| p.id == id))
        .cloned();

    let ids_tap = ids.clone();
    let positions_tap = positions.clone();
    let ids_touch = ids;
    let positions_touch = positions;

    rsx! {
        div {
            id: MAP_CONTAINER_ID,
            class: "{container_class}",

            onwheel: move |evt: Event<WheelData>| {
                evt.prevent_default();

                let delta_y = wheel_delta_y(evt.data().delta());
                let factor = if delta_y < 0.0 { ZOOM_STEP } else { 1.0 / ZOOM_STEP };
                let old_z = *zoom.read();
                let new_z = (old_z * factor).clamp(ZOOM_MIN, ZOOM_MAX);
                if (new_z - old_z).abs() < 1e-9 {
                    return;
                }

                let Some(rect) = container_rect() else { return };
                let client = evt.data().client_coordinates();
                let cx = client.x - rect.left();
                let cy = client.y - rect.top();

                let (new_px, new_py) =
                    zoom_pan_at_cursor(cx, cy, old_z, new_z, *pan_x.read(), *pan_y.read());
                let (px, py) = clamp_pan(new_px, new_py, new_z, rect.width(), rect.height());

                zoom.set(new_z);
                pan_x.set(px);
                pan_y.set(py);
            },

            onmousedown: move |evt: Event<MouseData>| {
                if evt.trigger_button() != Some(MouseButton::Primary) {
                    return;
                }
                let client = evt.client_coordinates();
                is_dragging.set(true);
                did_drag.set(false);
                drag_start_x.set(client.x);
                drag_start_y.set(client.y);
                drag_start_pan_x.set(*pan_x.read());
                drag_start_pan_y.set(*pan_y.read());
            },

            onmousemove: move |evt: Event<MouseData>| {
                if !*is_dragging.read() {
                    return;
                }
                let client = evt.client_coordinates();
                let dx = client.x - *drag_start_x.read();
                let dy = client.y - *drag_start_y.read();

                if !*did_drag.read() && (dx.abs() > DRAG_THRESHOLD || dy.abs() > DRAG_THRESHOLD) {
                    did_drag.set(true);
                }
                if *did_drag.read() {
                    let new_px = *drag_start_pan_x.read() + dx;
                    let new_py = *drag_start_pan_y.read() + dy;
                    let (px, py) = clamp_pan_to_container(new_px, new_py, *zoom.read());
                    pan_x.set(px);
                    pan_y.set(py);
                }
            },

            onmouseup: move |evt: Event<MouseData>| {
                let was_dragging = *is_dragging.read();
                let was_drag = *did_drag.read();
                is_dragging.set(false);

                // A mouseup without drag movement = a click
                if was_dragging && !was_drag {
                    let client = evt.client_coordinates();
                    if let Some((map_x, map_y)) = coords::click_to_map_px(
                        client.x, client.y, MAP_CONTAINER_ID,
                        *zoom.read(), *pan_x.read(), *pan_y.read(),
                    ) {
                        handle_tap(map_x, map_y, &ids_tap, &positions_tap, selected, zoom, pan_x, pan_y);
                    }
                }
            },

            onmouseleave: move |_| {
                is_dragging.set(false);
            },

            ondoubleclick: move |evt: Event<MouseData>| {
                evt.prevent_default();
                zoom.set(1.0);
                pan_x.set(0.0);
                pan_y.set(0.0);
            },

            // --- Touch handlers ---

            ontouchstart: move |evt: Event<TouchData>| {
                evt.prevent_default();
                let touches = evt.data().touches();
                if touches.len() == 1 {
                    let t = &touches[0];
                    touch_start_pos.set(Some((t.client_coordinates().x, t.client_coordinates().y)));
                    touch_did_pan.set(false);
                    touch_start_pan_x.set(*pan_x.read());
                    touch_start_pan_y.set(*pan_y.read());
                } else {
                    // Multi-finger gestures cancel tap tracking
                    touch_start_pos.set(None);
                    touch_did_pan.set(true);
                }
            },

            ontouchmove: move |evt: Event<TouchData>| {
                evt.prevent_default();
                let touches = evt.data().touches();
                if touches.len() != 1 {
                    return;
                }
                let t = &touches[0];
                let cur = (t.client_coordinates().x, t.client_coordinates().y);
                if let Some(start) = *touch_start_pos.read() {
                    let dx = cur.0 - start.0;
                    let dy = cur.1 - start.1;
                    if !*touch_did_pan.read() && point_distance(start, cur) > TOUCH_DRAG_THRESHOLD {
                        touch_did_pan.set(true);
                    }
                    if *touch_did_pan.read() {
                        let new_px = *touch_start_pan_x.read() + dx;
                        let new_py = *touch_start_pan_y.read() + dy;
                        let (px, py) = clamp_pan_to_container(new_px, new_py, *zoom.read());
                        pan_x.set(px);
                        pan_y.set(py);
                    }
                }
            },

            ontouchend: move |evt: Event<TouchData>| {
                evt.prevent_default();
                let remaining = evt.data().touches().len();

                if remaining == 0 && !*touch_did_pan.read() {
                    if let Some(start) = *touch_start_pos.read() {
                        if let Some((map_x, map_y)) = coords::click_to_map_px(
                            start.0, start.1, MAP_CONTAINER_ID,
                            *zoom.read(), *pan_x.read(), *pan_y.read(),
                        ) {
                            handle_tap(map_x, map_y, &ids_touch, &positions_touch, selected, zoom, pan_x, pan_y);
                        }
                    }
                }

                if remaining == 0 {
                    touch_start_pos.set(None);
                }
            },

            ontouchcancel: move |_evt: Event<TouchData>| {
                touch_start_pos.set(None);
                touch_did_pan.set(false);
            },

            // Inner wrapper — CSS transform applies zoom/pan to the whole surface
            div {
                class: "map-inner",
                style: "{transform_style}",
                dangerous_inner_html: "{svg_html}",
            }

            // Popup for the selected photo (outside the transform)
            if let Some(photo) = selected_photo {
                div { class: "photo-popup",
                    button {
                        class: "popup-close",
                        onclick: move |_| selected.set(None),
                        "\u{00d7}"
                    }
                    if let Some(url) = &photo.image_url {
                        img { src: "{url}", alt: "Foto postada" }
                    } else {
                        div { class: "photo-image-missing", "Imagem não disponível" }
                    }
                    if let Some(when) = photo.created_at_pt() {
                        p { class: "date", "{when}" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, lat: Option<f64>, lon: Option<f64>) -> PhotoRecord {
        PhotoRecord {
            id,
            image_url: None,
            latitude: lat,
            longitude: lon,
            created_at: None,
        }
    }

    // --- pin_positions ---

    #[test]
    fn test_pin_positions_excludes_records_without_coordinates() {
        let photos = vec![
            record(1, Some(-23.5), Some(-46.6)),
            record(2, None, None),
            record(3, Some(10.0), None),
        ];
        let (ids, positions) = pin_positions(&photos);
        assert_eq!(ids, vec![1]);
        assert_eq!(positions.len(), 1);
    }

    #[test]
    fn test_pin_positions_keeps_feed_order() {
        let photos = vec![
            record(5, Some(0.0), Some(0.0)),
            record(7, Some(10.0), Some(10.0)),
        ];
        let (ids, _) = pin_positions(&photos);
        assert_eq!(ids, vec![5, 7]);
    }

    // --- hit-testing ---

    #[test]
    fn test_find_nearest_cluster_within_threshold() {
        let clusters = vec![
            Cluster { x: 100.0, y: 100.0, indices: vec![0] },
            Cluster { x: 500.0, y: 500.0, indices: vec![1] },
        ];
        assert_eq!(find_nearest_cluster(&clusters, (105.0, 95.0), 30.0), Some(0));
        assert_eq!(find_nearest_cluster(&clusters, (495.0, 505.0), 30.0), Some(1));
    }

    #[test]
    fn test_find_nearest_cluster_outside_threshold() {
        let clusters = vec![Cluster { x: 100.0, y: 100.0, indices: vec![0] }];
        assert_eq!(find_nearest_cluster(&clusters, (300.0, 300.0), 30.0), None);
    }

    #[test]
    fn test_find_nearest_cluster_picks_closest() {
        let clusters = vec![
            Cluster { x: 100.0, y: 100.0, indices: vec![0] },
            Cluster { x: 110.0, y: 110.0, indices: vec![1] },
        ];
        assert_eq!(find_nearest_cluster(&clusters, (108.0, 108.0), 30.0), Some(1));
    }

    // --- SVG builders ---

    #[test]
    fn test_build_pin_at_position() {
        let mut svg = String::new();
        build_pin(&mut svg, 758.0, 645.0, 1.0, false);
        assert!(svg.contains(r#"cx="758""#));
        assert!(svg.contains(r#"cy="645""#));
        assert!(!svg.contains("animate"), "unselected pin has no ring");
    }

    #[test]
    fn test_build_pin_selected_has_ring() {
        let mut svg = String::new();
        build_pin(&mut svg, 100.0, 100.0, 1.0, true);
        assert!(svg.contains("animate"));
    }

    #[test]
    fn test_build_cluster_badge_shows_count() {
        let mut svg = String::new();
        build_cluster_badge(&mut svg, 200.0, 300.0, 7, 1.0);
        assert!(svg.contains(">7</text>"));
        assert!(svg.contains(r#"cx="200""#));
    }

    #[test]
    fn test_build_markers_mixes_pins_and_badges() {
        let clusters = vec![
            Cluster { x: 100.0, y: 100.0, indices: vec![0] },
            Cluster { x: 400.0, y: 400.0, indices: vec![1, 2] },
        ];
        let ids = vec![10, 11, 12];
        let mut svg = String::new();
        build_markers(&mut svg, &clusters, &ids, None, 1.0);
        assert!(svg.contains(PIN_FILL));
        assert!(svg.contains(CLUSTER_FILL));
        assert!(svg.contains(">2</text>"));
    }

    #[test]
    fn test_backdrop_has_equator_and_meridians() {
        let mut svg = String::new();
        build_backdrop(&mut svg, 1.0);
        // Equator at y = 512
        assert!(svg.contains(r#"y1="512""#));
        // 13 meridians + 7 parallels + the ocean rect
        assert_eq!(svg.matches("<line").count(), 20);
    }

    #[test]
    fn test_svg_content_empty_feed_has_no_markers() {
        let svg = build_svg_content(&[], &[], None, 1.0, REFERENCE_WIDTH);
        assert!(!svg.contains(PIN_FILL));
        assert!(!svg.contains(CLUSTER_FILL));
    }

    // --- zoom/pan math ---

    #[test]
    fn test_zoom_pan_at_cursor_keeps_cursor_point() {
        // Content point under the cursor before and after must match
        let (cursor_x, cursor_y) = (300.0, 200.0);
        let (old_zoom, new_zoom) = (1.0, 2.0);
        let (old_pan_x, old_pan_y) = (-50.0, -20.0);
        let (new_pan_x, new_pan_y) =
            zoom_pan_at_cursor(cursor_x, cursor_y, old_zoom, new_zoom, old_pan_x, old_pan_y);

        let before = ((cursor_x - old_pan_x) / old_zoom, (cursor_y - old_pan_y) / old_zoom);
        let after = ((cursor_x - new_pan_x) / new_zoom, (cursor_y - new_pan_y) / new_zoom);
        assert!((before.0 - after.0).abs() < 1e-9);
        assert!((before.1 - after.1).abs() < 1e-9);
    }

    #[test]
    fn test_clamp_pan_prevents_positive_pan() {
        let (px, py) = clamp_pan(50.0, 50.0, 1.0, 800.0, 600.0);
        assert!((px - 0.0).abs() < 0.01);
        assert!((py - 0.0).abs() < 0.01);
    }

    #[test]
    fn test_clamp_pan_limits_negative_pan_to_content() {
        // container 800x600, zoom 2: content is 1600x800
        let (px, py) = clamp_pan(-5000.0, -5000.0, 2.0, 800.0, 600.0);
        assert!((px - (-800.0)).abs() < 0.01);
        assert!((py - (-200.0)).abs() < 0.01);
    }

    #[test]
    fn test_clamp_pan_short_container_allows_vertical_pan() {
        // Wide container: the 2:1 map renders taller than the container
        let map_h = 1000.0 * (worldmap::MAP_HEIGHT_PX / worldmap::MAP_WIDTH_PX);
        let min_y = -(map_h - 400.0);
        let (_, py) = clamp_pan(0.0, -10_000.0, 1.0, 1000.0, 400.0);
        assert!((py - min_y).abs() < 0.01);
    }
}
