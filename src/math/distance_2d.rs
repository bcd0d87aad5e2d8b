use super::intersect_2d::segments_cross;
use super::polygon_2d::point_in_polygon_inclusive;
use super::Point2;

/// Returns the minimum distance from point `(px, py)` to the line segment
/// from `(ax, ay)` to `(bx, by)`.
#[must_use]
pub fn point_to_segment_dist(px: f64, py: f64, ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let dx = bx - ax;
    let dy = by - ay;
    let len_sq = dx * dx + dy * dy;

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return ((px - ax).powi(2) + (py - ay).powi(2)).sqrt();
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((px - ax) * dx + (py - ay) * dy) / len_sq;
    let t = t.clamp(0.0, 1.0);

    let closest_x = ax + t * dx;
    let closest_y = ay + t * dy;

    ((px - closest_x).powi(2) + (py - closest_y).powi(2)).sqrt()
}

/// Minimum distance between the boundaries of two closed polygons, or `0.0`
/// when they overlap or one contains the other.
#[must_use]
pub fn polygon_distance(a: &[Point2], b: &[Point2]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return f64::INFINITY;
    }
    if point_in_polygon_inclusive(&a[0], b) || point_in_polygon_inclusive(&b[0], a) {
        return 0.0;
    }

    let (na, nb) = (a.len(), b.len());
    let mut best = f64::INFINITY;
    for i in 0..na {
        let (a0, a1) = (a[i], a[(i + 1) % na]);
        for j in 0..nb {
            let (b0, b1) = (b[j], b[(j + 1) % nb]);
            if segments_cross(&a0, &a1, &b0, &b1) {
                return 0.0;
            }
            best = best
                .min(point_to_segment_dist(a0.x, a0.y, b0.x, b0.y, b1.x, b1.y))
                .min(point_to_segment_dist(b0.x, b0.y, a0.x, a0.y, a1.x, a1.y));
        }
    }
    best
}
