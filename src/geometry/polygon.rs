use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::error::GeometryError;
use crate::math::distance_2d::polygon_distance;
use crate::math::intersect_2d::segments_cross;
use crate::math::polygon_2d::{
    dedup_vertices, point_in_polygon_inclusive, point_strictly_inside, signed_area_2d,
    vertex_centroid,
};
use crate::math::{Point2, TOLERANCE};

/// A simple closed polygon in millimeter coordinates.
///
/// The closing edge from the last vertex back to the first is implicit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point2>", into = "Vec<Point2>")]
pub struct Polygon {
    vertices: Vec<Point2>,
}

impl Polygon {
    /// Builds a polygon, dropping repeated vertices and a duplicated
    /// closing vertex.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::TooFewVertices` if fewer than 3 distinct
    /// vertices remain, or `GeometryError::ZeroArea` for a collinear ring.
    pub fn new(points: &[Point2]) -> Result<Self, GeometryError> {
        let vertices = dedup_vertices(points);
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices(vertices.len()));
        }
        if signed_area_2d(&vertices).abs() < TOLERANCE {
            return Err(GeometryError::ZeroArea);
        }
        Ok(Self { vertices })
    }

    /// The four corners of a box as a counter-clockwise polygon.
    #[must_use]
    pub fn from_aabb(b: &Aabb) -> Self {
        Self {
            vertices: b.corners().to_vec(),
        }
    }

    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// Unsigned area in mm².
    #[must_use]
    pub fn area(&self) -> f64 {
        signed_area_2d(&self.vertices).abs()
    }

    /// Vertex average.
    #[must_use]
    pub fn centroid(&self) -> Point2 {
        vertex_centroid(&self.vertices)
    }

    #[must_use]
    pub fn bounds(&self) -> Aabb {
        // A constructed polygon always has at least 3 vertices.
        Aabb::from_points(&self.vertices).unwrap_or(Aabb::new(Point2::origin(), Point2::origin()))
    }

    /// Edges as `(start, end)` pairs including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Point inside or on the boundary.
    #[must_use]
    pub fn contains_point(&self, p: &Point2) -> bool {
        point_in_polygon_inclusive(p, &self.vertices)
    }

    /// `true` when the box lies entirely inside the polygon. Touching the
    /// boundary is allowed.
    #[must_use]
    pub fn contains_aabb(&self, b: &Aabb) -> bool {
        if !self.bounds().contains(b) {
            return false;
        }
        if !b.corners().iter().all(|c| self.contains_point(c)) {
            return false;
        }
        if !b.edge_midpoints().iter().all(|m| self.contains_point(m)) {
            return false;
        }
        if self.vertices.iter().any(|v| b.contains_point_strict(v)) {
            return false;
        }
        let box_edges = b.edges();
        !self.edges().any(|(p0, p1)| {
            box_edges
                .iter()
                .any(|(q0, q1)| segments_cross(&p0, &p1, q0, q1))
        })
    }

    /// `true` when the interiors of the polygon and the box overlap.
    /// Shared edges or corners alone do not count.
    #[must_use]
    pub fn intersects_aabb(&self, b: &Aabb) -> bool {
        if !self.bounds().overlaps(b) {
            return false;
        }
        let inside = |p: &Point2| point_strictly_inside(p, &self.vertices);
        if b.corners().iter().any(inside)
            || b.edge_midpoints().iter().any(inside)
            || inside(&b.center())
        {
            return true;
        }
        if self.vertices.iter().any(|v| b.contains_point_strict(v)) {
            return true;
        }
        self.edges().any(|(p0, p1)| b.intersects_segment(&p0, &p1))
    }

    /// Minimum boundary distance to another polygon; `0.0` when they overlap.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        polygon_distance(&self.vertices, &other.vertices)
    }
}

impl TryFrom<Vec<Point2>> for Polygon {
    type Error = GeometryError;

    fn try_from(points: Vec<Point2>) -> Result<Self, Self::Error> {
        Self::new(&points)
    }
}

impl From<Polygon> for Vec<Point2> {
    fn from(polygon: Polygon) -> Self {
        polygon.vertices
    }
}
