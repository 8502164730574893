//! Equirectangular world backdrop used by the map rendering.
//!
//! The drawing surface is 2048x1024 native pixels covering
//! longitude [-180, 180] x latitude [90, -90] (north at the top).

use std::collections::BTreeMap;

// Native drawing-surface dimensions in pixels
pub const MAP_WIDTH_PX: f64 = 2048.0;
pub const MAP_HEIGHT_PX: f64 = 1024.0;

/// Fallback map center when no fix is available: São Paulo.
pub const DEFAULT_CENTER: (f64, f64) = (-23.5505, -46.6333);

/// Cluster bucket edge in native pixels at zoom 1. The bucket shrinks as
/// the user zooms in, so clusters break apart.
pub const CLUSTER_CELL_PX: f64 = 96.0;

/// Past this zoom every pin renders individually.
pub const CLUSTER_BREAKUP_ZOOM: f64 = 6.0;

/// Project latitude/longitude onto the drawing surface. Out-of-range
/// inputs clamp to the map edge.
pub fn latlon_to_px(lat: f64, lon: f64) -> (f64, f64) {
    let x = (lon + 180.0) / 360.0 * MAP_WIDTH_PX;
    let y = (90.0 - lat) / 180.0 * MAP_HEIGHT_PX;
    (x.clamp(0.0, MAP_WIDTH_PX), y.clamp(0.0, MAP_HEIGHT_PX))
}

/// Inverse projection, for hit-testing and debugging overlays.
pub fn px_to_latlon(x: f64, y: f64) -> (f64, f64) {
    let lon = x / MAP_WIDTH_PX * 360.0 - 180.0;
    let lat = 90.0 - y / MAP_HEIGHT_PX * 180.0;
    (lat, lon)
}

/// A group of nearby markers rendered as one icon. `indices` point into
/// the caller's marker slice; a singleton cluster renders as a plain pin.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub x: f64,
    pub y: f64,
    pub indices: Vec<usize>,
}

impl Cluster {
    pub fn count(&self) -> usize {
        self.indices.len()
    }

    pub fn is_single(&self) -> bool {
        self.indices.len() == 1
    }
}

/// Grid-bucket clustering in native pixel space. Markers sharing a bucket
/// collapse into one cluster positioned at their centroid. Order is
/// deterministic (bucket-sorted), so rendering is stable across frames.
pub fn cluster_markers(points: &[(f64, f64)], zoom: f64) -> Vec<Cluster> {
    if zoom >= CLUSTER_BREAKUP_ZOOM {
        return points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Cluster {
                x,
                y,
                indices: vec![i],
            })
            .collect();
    }

    let cell = CLUSTER_CELL_PX / zoom.max(1.0);
    let mut buckets: BTreeMap<(i64, i64), Vec<usize>> = BTreeMap::new();
    for (i, &(x, y)) in points.iter().enumerate() {
        let key = ((x / cell).floor() as i64, (y / cell).floor() as i64);
        buckets.entry(key).or_default().push(i);
    }

    buckets
        .into_values()
        .map(|indices| {
            let n = indices.len() as f64;
            let (sx, sy) = indices
                .iter()
                .fold((0.0, 0.0), |(ax, ay), &i| (ax + points[i].0, ay + points[i].1));
            Cluster {
                x: sx / n,
                y: sy / n,
                indices,
            }
        })
        .collect()
}
