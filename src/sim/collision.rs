//! Shared collision primitives
//!
//! Every hit in the game resolves through squared distances: circle vs circle
//! for bullets against hulls, point vs segment for the boss laser. No square
//! roots on the hot path.

use glam::Vec2;

/// Squared distance between two points
#[inline]
pub fn dist_sq(a: Vec2, b: Vec2) -> f32 {
    a.distance_squared(b)
}

/// True when two circles overlap (touching counts as a hit)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let r = ra + rb;
    dist_sq(a, b) <= r * r
}

/// Squared distance from point `p` to segment `ab`
///
/// Projects `p` onto the segment, clamps the parameter to [0, 1] and measures
/// to the clamped point. A degenerate segment collapses to a point test.
pub fn point_segment_dist_sq(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let v = b - a;
    let vv = v.length_squared();
    if vv <= 1e-8 {
        return dist_sq(p, a);
    }
    let t = ((p - a).dot(v) / vv).clamp(0.0, 1.0);
    dist_sq(p, a + v * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dist_sq() {
        assert_eq!(dist_sq(Vec2::ZERO, Vec2::new(3.0, 4.0)), 25.0);
    }

    #[test]
    fn test_circles_overlap() {
        assert!(circles_overlap(Vec2::ZERO, 3.0, Vec2::new(4.0, 0.0), 1.0));
        assert!(!circles_overlap(Vec2::ZERO, 2.0, Vec2::new(4.0, 0.0), 1.0));
    }

    #[test]
    fn test_point_segment_interior() {
        // Closest point is the projection onto the segment body
        let d2 = point_segment_dist_sq(
            Vec2::new(5.0, 3.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
        );
        assert!((d2 - 9.0).abs() < 1e-5);
    }

    #[test]
    fn test_point_segment_clamps_to_endpoints() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        let d2 = point_segment_dist_sq(Vec2::new(-3.0, 4.0), a, b);
        assert!((d2 - 25.0).abs() < 1e-5);
        let d2 = point_segment_dist_sq(Vec2::new(13.0, 4.0), a, b);
        assert!((d2 - 25.0).abs() < 1e-5);
    }

    #[test]
    fn test_point_segment_degenerate() {
        let a = Vec2::new(2.0, 2.0);
        let d2 = point_segment_dist_sq(Vec2::new(5.0, 6.0), a, a);
        assert!((d2 - 25.0).abs() < 1e-5);
    }
}
