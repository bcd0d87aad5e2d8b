//! Engine output: placed ilots, corridors and measurements.

use serde::{Deserialize, Serialize};

use crate::geometry::Aabb;
use crate::math::{Point2, MM2_PER_M2};
use crate::zones::RoomId;

/// Identifier of a placed ilot, assigned in placement order.
pub type IlotId = usize;

/// An ilot committed to a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedIlot {
    pub id: IlotId,
    /// Bottom-left corner, in mm.
    pub position: Point2,
    pub width: f64,
    pub height: f64,
    pub room: RoomId,
}

impl PlacedIlot {
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_origin_size(self.position, self.width, self.height)
    }

    /// Footprint in m².
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height / MM2_PER_M2
    }

    /// Midpoint of the left edge.
    #[must_use]
    pub fn left_midpoint(&self) -> Point2 {
        Point2::new(self.position.x, self.position.y + self.height / 2.0)
    }

    /// Midpoint of the right edge.
    #[must_use]
    pub fn right_midpoint(&self) -> Point2 {
        Point2::new(
            self.position.x + self.width,
            self.position.y + self.height / 2.0,
        )
    }
}

/// A circulation path between two facing ilots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corridor {
    pub start: Point2,
    pub end: Point2,
    /// Corridor width, in mm.
    pub width: f64,
    /// Ilot on the start side.
    pub from: IlotId,
    /// Ilot on the end side.
    pub to: IlotId,
}

impl Corridor {
    /// Centerline length, in mm.
    #[must_use]
    pub fn length(&self) -> f64 {
        nalgebra::distance(&self.start, &self.end)
    }
}

/// Aggregate measurements of a layout. Areas in m², length in m.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurements {
    pub total_area: f64,
    pub walkable_area: f64,
    pub ilot_area: f64,
    pub corridor_area: f64,
    pub number_of_ilots: usize,
    pub corridor_length: f64,
}

/// The result of one run. Owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub placed_ilots: Vec<PlacedIlot>,
    pub corridors: Vec<Corridor>,
    pub measurements: Measurements,
    /// Requests that found no valid position.
    pub unplaced: usize,
}
