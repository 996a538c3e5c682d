//! Camera matching strategies. Both are stable filters over the input order.

use camsearch_core::{Camera, Coordinate};

/// Cameras whose name or direction mentions `keyword`, or whose leading
/// name token appears inside `keyword`. Case-sensitive.
///
/// The last rule catches queries broader than a camera name (a station
/// name that prefixes a road camera's name). Short name tokens match many
/// keywords.
pub fn match_direct(keyword: &str, cameras: &[Camera]) -> Vec<Camera> {
    cameras
        .iter()
        .filter(|cam| direct_hit(keyword, cam))
        .cloned()
        .collect()
}

fn direct_hit(keyword: &str, cam: &Camera) -> bool {
    if cam.name.contains(keyword) {
        return true;
    }
    if cam
        .direction
        .as_deref()
        .is_some_and(|d| d.contains(keyword))
    {
        return true;
    }
    // A blank name has no leading token and must not match everything.
    cam.name
        .split_whitespace()
        .next()
        .is_some_and(|token| keyword.contains(token))
}

/// Cameras within `radius` degrees of `center`, boundary inclusive.
///
/// Planar distance over raw degrees, not geodesic.
pub fn match_proximity(center: &Coordinate, cameras: &[Camera], radius: f64) -> Vec<Camera> {
    cameras
        .iter()
        .filter(|cam| cam.coordinate.degree_distance(center) <= radius)
        .cloned()
        .collect()
}
