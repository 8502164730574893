use mural_shared::worldmap;

/// Convert container-relative coordinates to native map pixels, undoing
/// the zoom/pan CSS transform. Pure — usable in unit tests.
///
/// Only `container_w` is needed because the map renders at `width: 100%`
/// with a fixed aspect ratio, so both axes share one scale factor.
pub fn container_to_map_px(
    container_x: f64,
    container_y: f64,
    container_w: f64,
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
) -> Option<(f64, f64)> {
    if container_w <= 0.0 || zoom <= 0.0 {
        return None;
    }

    // Undo CSS transform: translate(pan_x, pan_y) scale(zoom)
    let rendered_x = (container_x - pan_x) / zoom;
    let rendered_y = (container_y - pan_y) / zoom;

    let scale = worldmap::MAP_WIDTH_PX / container_w;
    let map_x = (rendered_x * scale).clamp(0.0, worldmap::MAP_WIDTH_PX);
    let map_y = (rendered_y * scale).clamp(0.0, worldmap::MAP_HEIGHT_PX);

    Some((map_x, map_y))
}

/// Get container-relative click coordinates using web_sys, then convert
/// to native map pixels.
pub fn click_to_map_px(
    client_x: f64,
    client_y: f64,
    container_id: &str,
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
) -> Option<(f64, f64)> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(container_id)?;
    let rect = element.get_bounding_client_rect();

    let container_x = client_x - rect.left();
    let container_y = client_y - rect.top();

    container_to_map_px(container_x, container_y, rect.width(), zoom, pan_x, pan_y)
}

/// Pan offsets that put the given map point at the container center.
/// The result still needs clamping against the container bounds.
pub fn center_pan(
    map_x: f64,
    map_y: f64,
    zoom: f64,
    container_w: f64,
    container_h: f64,
) -> (f64, f64) {
    let scale = container_w / worldmap::MAP_WIDTH_PX;
    (
        container_w / 2.0 - map_x * scale * zoom,
        container_h / 2.0 - map_y * scale * zoom,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_to_map_px_no_zoom() {
        // 1024-wide container renders the 2048 px map at scale 0.5
        let result = container_to_map_px(512.0, 256.0, 1024.0, 1.0, 0.0, 0.0);
        let (x, y) = result.unwrap();
        assert!((x - 1024.0).abs() < 1e-9);
        assert!((y - 512.0).abs() < 1e-9);
    }

    #[test]
    fn test_container_to_map_px_with_zoom() {
        // At zoom 2 the same click lands at half the map coordinates
        let result = container_to_map_px(512.0, 256.0, 1024.0, 2.0, 0.0, 0.0);
        let (x, y) = result.unwrap();
        assert!((x - 512.0).abs() < 1e-9);
        assert!((y - 256.0).abs() < 1e-9);
    }

    #[test]
    fn test_container_to_map_px_with_pan() {
        // Pan shifts the content right/down, so the click maps further left/up
        let result = container_to_map_px(612.0, 306.0, 1024.0, 1.0, 100.0, 50.0);
        let (x, y) = result.unwrap();
        assert!((x - 1024.0).abs() < 1e-9);
        assert!((y - 512.0).abs() < 1e-9);
    }

    #[test]
    fn test_container_to_map_px_clamps() {
        let result = container_to_map_px(-50.0, -50.0, 1024.0, 1.0, 0.0, 0.0);
        let (x, y) = result.unwrap();
        assert!((x - 0.0).abs() < 1e-9);
        assert!((y - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_container_to_map_px_invalid_container() {
        assert!(container_to_map_px(10.0, 10.0, 0.0, 1.0, 0.0, 0.0).is_none());
        assert!(container_to_map_px(10.0, 10.0, 800.0, 0.0, 0.0, 0.0).is_none());
    }

    #[test]
    fn test_center_pan_centers_the_point() {
        // Centering map point (1024, 512) in a 1024x512 container at zoom 1:
        // the point renders at (512, 256), so pan is the distance to center.
        let (px, py) = center_pan(1024.0, 512.0, 1.0, 1024.0, 512.0);
        assert!((px - 0.0).abs() < 1e-9);
        assert!((py - 0.0).abs() < 1e-9);

        // At zoom 2 the rendered point is twice as far out
        let (px, py) = center_pan(1024.0, 512.0, 2.0, 1024.0, 512.0);
        assert!((px - (-512.0)).abs() < 1e-9);
        assert!((py - (-256.0)).abs() < 1e-9);
    }

    #[test]
    fn test_center_pan_roundtrip() {
        // After centering, converting the container center back must yield
        // the original map point.
        let (zoom, cw, ch) = (3.0, 900.0, 600.0);
        let (map_x, map_y) = (758.7, 645.9);
        let (pan_x, pan_y) = center_pan(map_x, map_y, zoom, cw, ch);
        let (rx, ry) = container_to_map_px(cw / 2.0, ch / 2.0, cw, zoom, pan_x, pan_y).unwrap();
        assert!((rx - map_x).abs() < 1e-6);
        assert!((ry - map_y).abs() < 1e-6);
    }
}
