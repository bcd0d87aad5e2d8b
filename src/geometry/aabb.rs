use serde::{Deserialize, Serialize};

use crate::math::{Point2, TOLERANCE};

/// An axis-aligned rectangle in drawing coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum (bottom-left) corner.
    pub min: Point2,
    /// Maximum (top-right) corner.
    pub max: Point2,
}

impl Aabb {
    /// Creates a box from two corners given in any order.
    #[must_use]
    pub fn new(a: Point2, b: Point2) -> Self {
        Self {
            min: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Creates a box from its bottom-left corner and size.
    #[must_use]
    pub fn from_origin_size(origin: Point2, width: f64, height: f64) -> Self {
        Self::new(origin, Point2::new(origin.x + width, origin.y + height))
    }

    /// Smallest box containing all points. `None` for an empty slice.
    #[must_use]
    pub fn from_points(points: &[Point2]) -> Option<Self> {
        let first = points.first()?;
        let mut min = *first;
        let mut max = *first;
        for p in &points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Self { min, max })
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[must_use]
    pub fn center(&self) -> Point2 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Grows the box by `d` on every side.
    #[must_use]
    pub fn expanded(&self, d: f64) -> Self {
        Self {
            min: Point2::new(self.min.x - d, self.min.y - d),
            max: Point2::new(self.max.x + d, self.max.y + d),
        }
    }

    /// Corners in counter-clockwise order starting at `min`.
    #[must_use]
    pub fn corners(&self) -> [Point2; 4] {
        [
            self.min,
            Point2::new(self.max.x, self.min.y),
            self.max,
            Point2::new(self.min.x, self.max.y),
        ]
    }

    /// Edge midpoints: bottom, right, top, left.
    #[must_use]
    pub fn edge_midpoints(&self) -> [Point2; 4] {
        let c = self.center();
        [
            Point2::new(c.x, self.min.y),
            Point2::new(self.max.x, c.y),
            Point2::new(c.x, self.max.y),
            Point2::new(self.min.x, c.y),
        ]
    }

    /// Edges as `(start, end)` pairs, counter-clockwise.
    #[must_use]
    pub fn edges(&self) -> [(Point2, Point2); 4] {
        let c = self.corners();
        [(c[0], c[1]), (c[1], c[2]), (c[2], c[3]), (c[3], c[0])]
    }

    /// `true` when the interiors overlap. Boxes that only share an edge or
    /// a corner do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min.x < other.max.x - TOLERANCE
            && other.min.x < self.max.x - TOLERANCE
            && self.min.y < other.max.y - TOLERANCE
            && other.min.y < self.max.y - TOLERANCE
    }

    /// `true` when `other` lies inside this box (boundary inclusive).
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        other.min.x >= self.min.x - TOLERANCE
            && other.min.y >= self.min.y - TOLERANCE
            && other.max.x <= self.max.x + TOLERANCE
            && other.max.y <= self.max.y + TOLERANCE
    }

    /// `true` when `p` is inside the box and not on its boundary.
    #[must_use]
    pub fn contains_point_strict(&self, p: &Point2) -> bool {
        p.x > self.min.x + TOLERANCE
            && p.x < self.max.x - TOLERANCE
            && p.y > self.min.y + TOLERANCE
            && p.y < self.max.y - TOLERANCE
    }

    /// `true` when the segment `a`–`b` passes through the interior of the box.
    ///
    /// Clips the segment against the box (Liang-Barsky) and tests the middle
    /// of the clipped part, so segments running along an edge do not count.
    #[must_use]
    pub fn intersects_segment(&self, a: &Point2, b: &Point2) -> bool {
        let d = b - a;
        let mut t0 = 0.0_f64;
        let mut t1 = 1.0_f64;
        for (p, q) in [
            (-d.x, a.x - self.min.x),
            (d.x, self.max.x - a.x),
            (-d.y, a.y - self.min.y),
            (d.y, self.max.y - a.y),
        ] {
            if p.abs() < f64::EPSILON {
                if q < 0.0 {
                    return false;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
            if t0 > t1 {
                return false;
            }
        }
        let mid = *a + d * ((t0 + t1) * 0.5);
        self.contains_point_strict(&mid)
    }
}
