use super::distance_2d::point_to_segment_dist;
use super::{Point2, TOLERANCE};

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Arithmetic mean of the polygon's vertices.
///
/// Returns the origin for an empty slice.
#[must_use]
pub fn vertex_centroid(points: &[Point2]) -> Point2 {
    if points.is_empty() {
        return Point2::origin();
    }
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |acc, p| (acc.0 + p.x, acc.1 + p.y));
    #[allow(clippy::cast_precision_loss)]
    let n = points.len() as f64;
    Point2::new(sx / n, sy / n)
}

/// Returns `true` if `p` lies on any edge of the closed polygon (within [`TOLERANCE`]).
#[must_use]
pub fn point_on_boundary(p: &Point2, points: &[Point2]) -> bool {
    let n = points.len();
    (0..n).any(|i| {
        let a = points[i];
        let b = points[(i + 1) % n];
        point_to_segment_dist(p.x, p.y, a.x, a.y, b.x, b.y) < TOLERANCE
    })
}

/// Even-odd ray casting test. Boundary points give an unspecified answer;
/// use [`point_in_polygon_inclusive`] or [`point_strictly_inside`] instead.
#[must_use]
pub fn point_in_polygon(p: &Point2, points: &[Point2]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (points[i], points[j]);
        if (pi.y > p.y) != (pj.y > p.y) {
            let x_cross = pj.x + (p.y - pj.y) / (pi.y - pj.y) * (pi.x - pj.x);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Point inside the polygon or on its boundary.
#[must_use]
pub fn point_in_polygon_inclusive(p: &Point2, points: &[Point2]) -> bool {
    point_on_boundary(p, points) || point_in_polygon(p, points)
}

/// Point inside the polygon and not on its boundary.
#[must_use]
pub fn point_strictly_inside(p: &Point2, points: &[Point2]) -> bool {
    !point_on_boundary(p, points) && point_in_polygon(p, points)
}

/// Drops consecutive duplicate vertices and a repeated closing vertex.
#[must_use]
pub fn dedup_vertices(points: &[Point2]) -> Vec<Point2> {
    let mut out: Vec<Point2> = Vec::with_capacity(points.len());
    for &p in points {
        if out.last().map_or(true, |last| (p - *last).norm() >= TOLERANCE) {
            out.push(p);
        }
    }
    while out.len() > 1 {
        let (first, last) = (out[0], out[out.len() - 1]);
        if (first - last).norm() < TOLERANCE {
            out.pop();
        } else {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: f64) -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(size, 0.0),
            Point2::new(size, size),
            Point2::new(0.0, size),
        ]
    }

    #[test]
    fn signed_area_ccw_square() {
        assert!((signed_area_2d(&square(1.0)) - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_cw_square() {
        let mut pts = square(1.0);
        pts.reverse();
        assert!((signed_area_2d(&pts) + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_degenerate() {
        assert!(signed_area_2d(&[Point2::new(0.0, 0.0)]).abs() < TOLERANCE);
        assert!(signed_area_2d(&[]).abs() < TOLERANCE);
    }

    #[test]
    fn centroid_of_square() {
        let c = vertex_centroid(&square(4.0));
        assert!((c.x - 2.0).abs() < TOLERANCE);
        assert!((c.y - 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn inside_outside_and_boundary() {
        let sq = square(10.0);
        assert!(point_in_polygon(&Point2::new(5.0, 5.0), &sq));
        assert!(!point_in_polygon(&Point2::new(15.0, 5.0), &sq));
        assert!(point_in_polygon_inclusive(&Point2::new(10.0, 5.0), &sq));
        assert!(!point_strictly_inside(&Point2::new(10.0, 5.0), &sq));
        assert!(point_strictly_inside(&Point2::new(9.0, 9.0), &sq));
    }

    #[test]
    fn concave_notch_is_outside() {
        // L-shape with the top-right quadrant cut away.
        let l = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 5.0),
            Point2::new(5.0, 5.0),
            Point2::new(5.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        assert!(!point_in_polygon(&Point2::new(7.5, 7.5), &l));
        assert!(point_in_polygon(&Point2::new(2.5, 7.5), &l));
    }

    #[test]
    fn dedup_removes_closing_vertex() {
        let mut pts = square(1.0);
        pts.insert(1, Point2::new(0.0, 0.0));
        pts.push(Point2::new(0.0, 0.0));
        assert_eq!(dedup_vertices(&pts).len(), 4);
    }
}
