/// Planar angle utilities for normalized keypoints
///
/// All functions work in image coordinates (y grows downward) and ignore z.
/// Degenerate input (coincident points) is not an error: the angles follow
/// the `atan2` conventions, so `angle_between` reads 0 and `vertical_angle`
/// reads 180 (`atan2(0, -0)` is pi).

use crate::models::keypoint::Keypoint;

/// Interior angle at `b` formed by the rays `b→a` and `b→c`, in degrees [0, 180]
///
/// # Arguments
/// * `a` - First point (e.g., ear midpoint)
/// * `b` - Vertex (e.g., shoulder midpoint)
/// * `c` - Third point (e.g., hip midpoint)
pub fn angle_between(a: &Keypoint, b: &Keypoint, c: &Keypoint) -> f64 {
    let radians = (c.y - b.y).atan2(c.x - b.x) - (a.y - b.y).atan2(a.x - b.x);
    let angle = radians.to_degrees().abs();
    if angle > 180.0 {
        360.0 - angle
    } else {
        angle
    }
}

/// Deviation of the segment `top→bottom` from the vertical axis, in degrees [0, 180]
pub fn vertical_angle(top: &Keypoint, bottom: &Keypoint) -> f64 {
    let dx = top.x - bottom.x;
    let dy = top.y - bottom.y;
    dx.atan2(-dy).to_degrees().abs()
}

/// Componentwise mean of two keypoints
///
/// The midpoint is only as trustworthy as its least confident parent.
pub fn midpoint(a: &Keypoint, b: &Keypoint) -> Keypoint {
    Keypoint {
        x: (a.x + b.x) / 2.0,
        y: (a.y + b.y) / 2.0,
        z: (a.z + b.z) / 2.0,
        visibility: Some(a.confidence().min(b.confidence())),
    }
}
