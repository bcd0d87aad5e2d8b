use super::{Point2, TOLERANCE};

/// `true` when the two segments cross at a point interior to both.
///
/// Touching at an endpoint or running collinear does not count as a
/// crossing.
#[must_use]
pub fn segments_cross(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> bool {
    let side = |p: &Point2, q: &Point2, r: &Point2| {
        (q.x - p.x) * (r.y - p.y) - (q.y - p.y) * (r.x - p.x)
    };
    let d1 = side(b0, b1, a0);
    let d2 = side(b0, b1, a1);
    let d3 = side(a0, a1, b0);
    let d4 = side(a0, a1, b1);

    // Scale the orientation tolerance by the segment lengths so the test
    // behaves the same in millimeters and meters.
    let eps_a = TOLERANCE * (a1 - a0).norm().max(1.0);
    let eps_b = TOLERANCE * (b1 - b0).norm().max(1.0);

    ((d1 > eps_b && d2 < -eps_b) || (d1 < -eps_b && d2 > eps_b))
        && ((d3 > eps_a && d4 < -eps_a) || (d3 < -eps_a && d4 > eps_a))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn cross_proper() {
        assert!(segments_cross(&p(0.0, 0.0), &p(2.0, 2.0), &p(0.0, 2.0), &p(2.0, 0.0)));
    }

    #[test]
    fn cross_ignores_touching_endpoints() {
        assert!(!segments_cross(&p(0.0, 0.0), &p(1.0, 0.0), &p(1.0, 0.0), &p(1.0, 1.0)));
        // T-junction: endpoint of one lies on the other.
        assert!(!segments_cross(&p(0.0, 0.0), &p(2.0, 0.0), &p(1.0, 0.0), &p(1.0, 1.0)));
    }

    #[test]
    fn cross_ignores_collinear_overlap() {
        assert!(!segments_cross(&p(0.0, 0.0), &p(2.0, 0.0), &p(1.0, 0.0), &p(3.0, 0.0)));
    }

    #[test]
    fn cross_large_coordinates() {
        assert!(segments_cross(
            &p(0.0, 50_000.0),
            &p(100_000.0, 50_000.0),
            &p(50_000.0, 0.0),
            &p(50_000.0, 100_000.0)
        ));
    }
}
